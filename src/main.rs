use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, List,
    ListItem, ListState, Paragraph, Row, Table, Tabs,
};

use fpl_dashboard::charts::{HeatmapSpec, HistogramSpec, LineSpec, ScatterSpec};
use fpl_dashboard::config::AppConfig;
use fpl_dashboard::dashboard::Dashboard;
use fpl_dashboard::feed::spawn_provider;
use fpl_dashboard::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};
use fpl_dashboard::summary::{DEFENDER, FORWARD, GOALKEEPER, MIDFIELDER};

const SERIES_COLORS: [Color; 10] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightGreen,
];

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    cfg: AppConfig,
}

impl App {
    fn new(cfg: AppConfig, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let mut state = AppState::new();
        state.loading = true;
        Self {
            state,
            should_quit: false,
            cmd_tx,
            cfg,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.state.help_overlay = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.state.screen = self.state.screen.next(),
            KeyCode::BackTab | KeyCode::Left => self.state.screen = self.state.screen.prev(),
            KeyCode::Char(c @ '1'..='7') => {
                if let Some(screen) = Screen::from_digit(c) {
                    self.state.screen = screen;
                }
            }
            KeyCode::Char('r') => self.request_reload(false),
            KeyCode::Char('R') => self.request_reload(true),
            KeyCode::Char('e') | KeyCode::Char('E') => self.request_export(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => self.on_screen_key(key),
        }
    }

    fn on_screen_key(&mut self, key: KeyEvent) {
        match self.state.screen {
            Screen::Development => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.dev_cursor_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.dev_cursor_prev(),
                KeyCode::Char(' ') | KeyCode::Enter => self.state.toggle_dev_at_cursor(),
                KeyCode::Char('c') => self.state.clear_dev_selection(),
                KeyCode::Char('t') => self.state.reset_dev_selection(),
                _ => {}
            },
            Screen::Data => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.scroll_data_down(),
                KeyCode::Char('k') | KeyCode::Up => self.state.scroll_data_up(),
                KeyCode::Char('s') => self.state.cycle_data_sort(),
                _ => {}
            },
            _ => {}
        }
    }

    fn request_reload(&mut self, refresh: bool) {
        if self.state.loading {
            self.state.push_log("[INFO] Load already running");
            return;
        }
        if self.cmd_tx.send(ProviderCommand::Reload { refresh }).is_err() {
            self.state.push_log("[WARN] Reload request failed");
            return;
        }
        self.state.loading = true;
        self.state.push_log("[INFO] Reload requested");
    }

    fn request_export(&mut self) {
        if self.state.exporting {
            self.state.push_log("[INFO] Export already running");
            return;
        }
        let path = self.cfg.export_path.clone();
        if self.cmd_tx.send(ProviderCommand::Export(path)).is_err() {
            self.state.push_log("[WARN] Export request failed");
            return;
        }
        self.state.exporting = true;
        self.state.push_log(format!(
            "[INFO] Exporting to {}",
            self.cfg.export_path.display()
        ));
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let cfg = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(cfg.clone(), tx, cmd_rx);

    let mut app = App::new(cfg, cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    let titles: Vec<String> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", i + 1, s.label()))
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == app.state.screen)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[1]);

    let body = chunks[2];
    match app.state.dashboard.as_ref() {
        None => render_placeholder(frame, body, &app.state),
        Some(dashboard) => match app.state.screen {
            Screen::Overview => render_overview(frame, body, dashboard),
            Screen::Value => render_value_histograms(frame, body, &dashboard.value_histograms),
            Screen::Squad => render_most_valuable(frame, body, dashboard),
            Screen::Teams => render_team_points(frame, body, dashboard),
            Screen::Correlation => render_heatmap(frame, body, &dashboard.heatmap),
            Screen::Development => render_development(frame, body, &app.state),
            Screen::Data => render_data(frame, body, &app.state),
        },
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = if state.loading {
        match state.load_progress.as_deref() {
            Some(msg) => format!("LOADING: {msg}"),
            None => "LOADING".to_string(),
        }
    } else if let Some(at) = state.loaded_at.as_deref() {
        format!("Updated {at}")
    } else {
        "No data".to_string()
    };
    let gws = state
        .dashboard
        .as_ref()
        .map(|d| format!(" | GW {}", d.gameweeks_played))
        .unwrap_or_default();
    format!(
        "FPL DASHBOARD | {}{gws} | {status}\nTab/←/→ Screens | r Reload | R Refresh | e Export | ? Help | q Quit",
        state.screen.label()
    )
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.loading {
        "Fetching data...".to_string()
    } else if let Some(err) = state.last_error.as_deref() {
        format!("Load failed: {err}\nPress r to retry.")
    } else {
        "No data loaded. Press r to load.".to_string()
    };
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_overview(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    render_scatter(frame, rows[0], &dashboard.scatter);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (spec, cell) in dashboard.distributions.iter().zip(cols.iter()) {
        render_histogram(frame, *cell, spec, spec.label.clone());
    }
}

fn render_scatter(frame: &mut Frame, area: Rect, spec: &ScatterSpec) {
    let series: Vec<(String, Vec<(f64, f64)>)> = spec
        .series
        .iter()
        .map(|s| {
            (
                s.group.clone(),
                s.points.iter().map(|p| (p.x, p.y)).collect(),
            )
        })
        .collect();
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(group, points)| {
            Dataset::default()
                .name(group.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(position_color(group)))
                .data(points)
        })
        .collect();

    let all = series.iter().flat_map(|(_, pts)| pts.iter().copied());
    let (x_bounds, y_bounds) = bounds(all);
    let chart = Chart::new(datasets)
        .block(Block::default().title("Cost vs. Total Points").borders(Borders::ALL))
        .x_axis(axis(&spec.x_label, x_bounds))
        .y_axis(axis(&spec.y_label, y_bounds));
    frame.render_widget(chart, area);
}

fn render_value_histograms(frame: &mut Frame, area: Rect, specs: &[HistogramSpec]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let mut cells = Vec::new();
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(cols.iter().copied());
    }

    for (spec, cell) in specs.iter().zip(cells) {
        render_histogram(frame, cell, spec, format!("{} ({})", spec.title, spec.label));
    }
}

fn render_histogram(frame: &mut Frame, area: Rect, spec: &HistogramSpec, title: String) {
    let bars: Vec<Bar> = spec
        .bins
        .iter()
        .map(|bin| {
            let label = if bin.end - bin.start < 1.0 {
                format!("{:.1}", bin.start)
            } else {
                format!("{:.0}", bin.start)
            };
            Bar::default()
                .value(bin.count)
                .label(Line::from(label))
                .text_value(String::new())
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(named_color(&spec.color)));
    frame.render_widget(chart, area);
}

fn render_most_valuable(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let header = Row::new(vec![
        "Name", "Team", "Position", "Points", "Cost", "Value", "Sel %", "Minutes",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = dashboard
        .most_valuable
        .iter()
        .map(|p| {
            let position = p.position.clone().unwrap_or_default();
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.team.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(position.clone()).style(Style::default().fg(position_color(&position))),
                Cell::from(p.total_points.to_string()),
                Cell::from(format!("{:.1}", p.cost)),
                Cell::from(format!("{:.1}", p.value)),
                Cell::from(opt_f64(p.selected_by_percent, 1)),
                Cell::from(p.minutes.to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(22),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().title("Most Valuable Team").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_team_points(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let bars: Vec<Bar> = dashboard
        .team_bar
        .bars
        .iter()
        .enumerate()
        .map(|(i, (team, points))| {
            Bar::default()
                .value((*points).max(0) as u64)
                .label(Line::from(short_label(team, 12)))
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Total Points per Team").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(chart, area);
}

fn render_heatmap(frame: &mut Frame, area: Rect, heatmap: &HeatmapSpec) {
    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(heatmap.labels.iter().map(|l| Cell::from(short_label(l, 6))));
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = heatmap
        .cells
        .iter()
        .zip(&heatmap.labels)
        .map(|(values, label)| {
            let mut cells = vec![Cell::from(short_label(label, 14))];
            cells.extend(values.iter().map(|v| match v {
                Some(r) => Cell::from(format!("{r:>5.2}"))
                    .style(Style::default().fg(Color::Black).bg(heat_color(*r))),
                None => Cell::from(""),
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(14)];
    widths.extend(heatmap.labels.iter().map(|_| Constraint::Length(6)));
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Variable Correlation Heatmap").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_development(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(area);

    let items: Vec<ListItem> = state
        .dev_domain()
        .iter()
        .map(|player| {
            let mark = if state.is_dev_selected(player.id) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{mark} {}", player.name))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Players ({} selected)", state.dev_selected.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default();
    if !state.dev_domain().is_empty() {
        list_state.select(Some(state.dev_cursor));
    }
    frame.render_stateful_widget(list, cols[0], &mut list_state);

    match state.development_plot() {
        Some(plot) if !plot.series.is_empty() => render_line_chart(frame, cols[1], &plot),
        _ => {
            let empty = Paragraph::new("No players selected (space to toggle, t for defaults)")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Points Development").borders(Borders::ALL));
            frame.render_widget(empty, cols[1]);
        }
    }
}

fn render_line_chart(frame: &mut Frame, area: Rect, plot: &LineSpec) {
    let datasets: Vec<Dataset> = plot
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(&s.points)
        })
        .collect();
    let all = plot.series.iter().flat_map(|s| s.points.iter().copied());
    let (x_bounds, y_bounds) = bounds(all);
    let chart = Chart::new(datasets)
        .block(Block::default().title("Points Development").borders(Borders::ALL))
        .x_axis(axis(&plot.x_label, x_bounds))
        .y_axis(axis(&plot.y_label, y_bounds));
    frame.render_widget(chart, area);
}

fn render_data(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = Row::new(vec![
        "Name", "Team", "Pos", "Pts", "Form", "Cost", "Value", "Cre", "Thr", "Inf", "Sel %",
        "Min", "xG/90", "xA/90",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = state
        .data_rows()
        .into_iter()
        .skip(state.data_scroll)
        .map(|r| {
            Row::new(vec![
                r.name.clone(),
                r.team.clone().unwrap_or_else(|| "-".to_string()),
                r.position
                    .as_deref()
                    .map(|p| short_label(p, 3))
                    .unwrap_or_else(|| "-".to_string()),
                r.total_points.to_string(),
                format!("{:.1}", r.form),
                format!("{:.1}", r.cost),
                format!("{:.1}", r.value),
                format!("{:.1}", r.creativity),
                format!("{:.1}", r.threat),
                format!("{:.1}", r.influence),
                opt_f64(r.selected_by_percent, 1),
                r.minutes.to_string(),
                opt_f64(r.expected_goals_per_90, 2),
                opt_f64(r.expected_assists_per_90, 2),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!("Data | Sort: {} (s)", state.data_sort.label()))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

fn axis(title: &str, bounds: [f64; 2]) -> Axis<'static> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    Axis::default()
        .title(title.to_string())
        .style(Style::default().fg(Color::Gray))
        .bounds(bounds)
        .labels(vec![
            Span::raw(format!("{:.0}", bounds[0])),
            Span::raw(format!("{mid:.0}")),
            Span::raw(format!("{:.0}", bounds[1])),
        ])
}

fn bounds(points: impl Iterator<Item = (f64, f64)>) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for (px, py) in points {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    (pad_bounds(x), pad_bounds(y))
}

fn pad_bounds(b: [f64; 2]) -> [f64; 2] {
    if !b[0].is_finite() || !b[1].is_finite() {
        return [0.0, 1.0];
    }
    if b[1] - b[0] < 1.0 {
        return [b[0] - 0.5, b[1] + 0.5];
    }
    let pad = (b[1] - b[0]) * 0.05;
    [b[0] - pad, b[1] + pad]
}

fn heat_color(r: f64) -> Color {
    // viridis-ish ramp from -1 (purple) to +1 (yellow)
    let t = ((r + 1.0) / 2.0).clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    Color::Rgb(lerp(68.0, 253.0), lerp(1.0, 231.0), lerp(84.0, 37.0))
}

fn position_color(position: &str) -> Color {
    match position {
        GOALKEEPER => named_color("darkorange"),
        DEFENDER => named_color("mediumseagreen"),
        MIDFIELDER => Color::LightBlue,
        FORWARD => named_color("crimson"),
        _ => Color::Gray,
    }
}

fn named_color(name: &str) -> Color {
    match name {
        "darkorange" => Color::Rgb(255, 140, 0),
        "mediumseagreen" => Color::Rgb(60, 179, 113),
        "midnightblue" => Color::Rgb(25, 25, 112),
        "crimson" => Color::Rgb(220, 20, 60),
        "steelblue" => Color::Rgb(70, 130, 180),
        "goldenrod" => Color::Rgb(218, 165, 32),
        "slategray" => Color::Rgb(112, 128, 144),
        _ => Color::White,
    }
}

fn short_label(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn opt_f64(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(|| "-".to_string())
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FPL Dashboard - Help",
        "",
        "Global:",
        "  1-7 / Tab / ←→  Switch screen",
        "  r               Reload (cached responses reused)",
        "  R               Revalidate all cached responses, reload",
        "  e               Export workbook",
        "  ?               Toggle help",
        "  q               Quit",
        "",
        "Development:",
        "  j/k or ↑/↓      Move",
        "  Space / Enter   Toggle player",
        "  c / t           Clear / default picks",
        "",
        "Data:",
        "  j/k or ↑/↓      Scroll",
        "  s               Cycle sort",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
