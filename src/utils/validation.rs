use crate::utils::error::{PeriodError, Result};
use chrono_tz::Tz;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證時區名稱並回傳解析後的時區
pub fn validate_timezone(field_name: &str, name: &str) -> Result<Tz> {
    validate_non_empty_string(field_name, name)?;
    name.trim()
        .parse::<Tz>()
        .map_err(|_| PeriodError::InvalidTimezone {
            name: name.to_string(),
        })
}

pub fn validate_positive_number(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(PeriodError::InvalidInterval {
            message: format!("{} must be at least {}, got {}", field_name, min_value, value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PeriodError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timezone() {
        assert_eq!(
            validate_timezone("timezone.display", "America/Montevideo").unwrap(),
            chrono_tz::America::Montevideo
        );
        assert_eq!(validate_timezone("timezone.input", " UTC ").unwrap(), chrono_tz::UTC);
        assert!(matches!(
            validate_timezone("timezone.input", "Mars/Olympus_Mons"),
            Err(PeriodError::InvalidTimezone { .. })
        ));
        assert!(matches!(
            validate_timezone("timezone.input", "  "),
            Err(PeriodError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("interval", 5, 1).is_ok());
        assert!(validate_positive_number("interval", 0, 1).is_err());
        assert!(validate_positive_number("interval", -3, 1).is_err());
    }
}
