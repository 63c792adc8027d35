use crate::error::AdError;

pub const CONTENT_MIN_CHARS: usize = 10;
pub const CONTENT_MAX_CHARS: usize = 1000;

pub fn validate_content(content: Option<&str>) -> Result<&str, AdError> {
    let content = content.ok_or_else(|| AdError::validation("content", "must not be blank"))?;
    if content.trim().is_empty() {
        return Err(AdError::validation("content", "must not be blank"));
    }
    let len = content.chars().count();
    if !(CONTENT_MIN_CHARS..=CONTENT_MAX_CHARS).contains(&len) {
        return Err(AdError::validation(
            "content",
            format!("must be between {CONTENT_MIN_CHARS} and {CONTENT_MAX_CHARS} characters"),
        ));
    }
    Ok(content)
}

pub fn validate_view_count(view_count: i64) -> Result<u64, AdError> {
    u64::try_from(view_count).map_err(|_| AdError::validation("viewCount", "must not be negative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_boundaries() {
        assert!(validate_content(Some("a".repeat(9).as_str())).is_err());
        assert!(validate_content(Some("a".repeat(10).as_str())).is_ok());
        assert!(validate_content(Some("a".repeat(1000).as_str())).is_ok());
        assert!(validate_content(Some("a".repeat(1001).as_str())).is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 10 characters, 20 bytes
        assert!(validate_content(Some("ąęćłńóśźżą")).is_ok());
    }

    #[test]
    fn missing_and_blank_rejected() {
        let err = validate_content(None).unwrap_err();
        assert!(err.to_string().contains("content"));
        assert!(validate_content(Some("            ")).is_err());
    }

    #[test]
    fn negative_view_count_rejected() {
        assert_eq!(validate_view_count(5).unwrap(), 5);
        let err = validate_view_count(-1).unwrap_err();
        assert!(err.to_string().contains("viewCount"));
    }
}
