use once_cell::sync::Lazy;
use regex::Regex;

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("Invalid period regex"));

/// 校验考核周期格式：YYYY-MM，月份 01~12
pub fn validate_period(period: &str) -> Result<(), &'static str> {
    if !PERIOD_RE.is_match(period) {
        return Err("Period must be in YYYY-MM format");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_periods() {
        assert!(validate_period("2025-01").is_ok());
        assert!(validate_period("2025-12").is_ok());
        assert!(validate_period("1999-09").is_ok());
    }

    #[test]
    fn test_invalid_month() {
        assert!(validate_period("2025-00").is_err());
        assert!(validate_period("2025-13").is_err());
    }

    #[test]
    fn test_invalid_format() {
        assert!(validate_period("2025-1").is_err());
        assert!(validate_period("2025/01").is_err());
        assert!(validate_period("25-01").is_err());
        assert!(validate_period("2025-01-15").is_err());
        assert!(validate_period("").is_err());
    }
}
