use crate::utils::error::{Result, StudioError};
use chrono::{NaiveDate, NaiveTime};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StudioError::validation(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StudioError::validation(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(StudioError::validation(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StudioError::validation(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(StudioError::validation(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(StudioError::validation(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// Integer coercion of the selected service value.
pub fn parse_service_id(field_name: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| StudioError::validation(field_name, "Vui lòng chọn dịch vụ"))
}

/// Calendar date as sent by a date input (`YYYY-MM-DD`).
pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| {
            StudioError::validation(field_name, "Ngày không hợp lệ (định dạng 2024-05-01)")
        })
}

pub fn validate_time(field_name: &str, value: &str) -> Result<()> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|_| ())
        .map_err(|_| StudioError::validation(field_name, "Giờ không hợp lệ (định dạng 10:00)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://example.com/api").is_ok());
        assert!(validate_url("api.base_url", "http://127.0.0.1:8000/api").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "invalid-url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("dismiss_after_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("dismiss_after_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_parse_service_id() {
        assert_eq!(parse_service_id("service", "3").unwrap(), 3);
        assert_eq!(parse_service_id("service", " 12 ").unwrap(), 12);
        assert!(parse_service_id("service", "").is_err());
        assert!(parse_service_id("service", "abc").is_err());
        assert_eq!(
            parse_service_id("service", "").unwrap_err().user_message(),
            "Vui lòng chọn dịch vụ"
        );
    }

    #[test]
    fn test_date_and_time_formats() {
        assert!(parse_date("date", "2024-05-01").is_ok());
        assert!(parse_date("date", "01/05/2024").is_err());
        assert!(parse_date("date", "2024-02-30").is_err());
        assert!(validate_time("time", "10:00").is_ok());
        assert!(validate_time("time", "10:00:00").is_ok());
        assert!(validate_time("time", "25:00").is_err());
        assert!(validate_time("time", "").is_err());
        assert_eq!(
            parse_date("date", "01/05/2024").unwrap_err().user_message(),
            "Ngày không hợp lệ (định dạng 2024-05-01)"
        );
        assert_eq!(
            validate_time("time", "25:00").unwrap_err().user_message(),
            "Giờ không hợp lệ (định dạng 10:00)"
        );
    }
}
