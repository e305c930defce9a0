use serde_json::Value;
use thiserror::Error;

/// Why a stat field could not be read as a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("field `{field}` is missing")]
    Missing { field: &'static str },
    #[error("field `{field}` is not numeric: {raw:?}")]
    NonNumeric { field: &'static str, raw: String },
}

/// Reads a field the API sends either as a JSON number or as a decimal string ("4.5").
pub fn parse_f64(field: &'static str, raw: Option<&Value>) -> Result<f64, FieldError> {
    match raw {
        None | Some(Value::Null) => Err(FieldError::Missing { field }),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FieldError::NonNumeric {
            field,
            raw: n.to_string(),
        }),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(FieldError::NonNumeric {
                    field,
                    raw: s.clone(),
                }),
            }
        }
        Some(other) => Err(FieldError::NonNumeric {
            field,
            raw: other.to_string(),
        }),
    }
}

/// Like [`parse_f64`] but treats any failure as absent.
pub fn parse_f64_lenient(raw: Option<&Value>) -> Option<f64> {
    parse_f64("", raw).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_and_numeric_strings_parse() {
        assert_eq!(parse_f64("form", Some(&json!(4.5))), Ok(4.5));
        assert_eq!(parse_f64("form", Some(&json!(" 12.0 "))), Ok(12.0));
        assert_eq!(parse_f64("form", Some(&json!(3))), Ok(3.0));
    }

    #[test]
    fn missing_and_null_are_distinguished_from_garbage() {
        assert_eq!(
            parse_f64("form", None),
            Err(FieldError::Missing { field: "form" })
        );
        assert_eq!(
            parse_f64("form", Some(&Value::Null)),
            Err(FieldError::Missing { field: "form" })
        );
        assert_eq!(
            parse_f64("form", Some(&json!("n/a"))),
            Err(FieldError::NonNumeric {
                field: "form",
                raw: "n/a".to_string()
            })
        );
        assert!(matches!(
            parse_f64("form", Some(&json!("NaN"))),
            Err(FieldError::NonNumeric { .. })
        ));
        assert!(matches!(
            parse_f64("form", Some(&json!([1]))),
            Err(FieldError::NonNumeric { .. })
        ));
    }

    #[test]
    fn lenient_swallows_errors() {
        assert_eq!(parse_f64_lenient(Some(&json!("2.1"))), Some(2.1));
        assert_eq!(parse_f64_lenient(Some(&json!(""))), None);
        assert_eq!(parse_f64_lenient(None), None);
    }
}
