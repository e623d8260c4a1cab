use std::fmt;

use crate::error::{MoodError, MoodResult};

/// Explicit user identity passed into every store and service call.
///
/// Normalized to trimmed lowercase. The value doubles as the log file-name
/// component, so the charset is restricted to `[a-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: &str) -> MoodResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(MoodError::Validation("Username must not be empty".into()));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(MoodError::Validation(format!(
                "Username may only contain letters, digits, '-' and '_', got: {}",
                normalized
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let user = UserId::new("  Gibran ").unwrap();
        assert_eq!(user.as_str(), "gibran");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn test_rejects_path_unsafe_characters() {
        assert!(UserId::new("../etc/passwd").is_err());
        assert!(UserId::new("a b").is_err());
    }
}
