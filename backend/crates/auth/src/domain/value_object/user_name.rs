//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための**公開識別子（ハンドル）**。
//! 登録時の一意性チェックとログインに使用される。
//!
//! ## 不変条件
//! - NFKC正規化後の長さ: 3〜30文字
//! - 使用可能文字: ASCII英数字と `_` `.` `-`
//! - 先頭は英数字
//! - canonical（正規形）は小文字。一意性は canonical で判定する

use kernel::error::app_error::{AppResult, ApplicationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

const RESERVED_WORDS: &[&str] = &[
    "admin", "administrator", "root", "system", "support", "api", "auth", "login", "register",
    "null", "undefined",
];

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    /// 入力された表記（NFKC正規化済み）
    original: String,
    /// 小文字化した正規形
    canonical: String,
}

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let original: String = raw.as_ref().trim().nfkc().collect();
        let len = original.chars().count();

        if len == 0 {
            return Err(ApplicationError::bad_request("\"userName\" is required"));
        }
        if len < USER_NAME_MIN_LENGTH {
            return Err(ApplicationError::bad_request(format!(
                "\"userName\" length must be at least {USER_NAME_MIN_LENGTH} characters long"
            )));
        }
        if len > USER_NAME_MAX_LENGTH {
            return Err(ApplicationError::bad_request(format!(
                "\"userName\" length must be less than or equal to {USER_NAME_MAX_LENGTH} characters long"
            )));
        }
        if !original
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(ApplicationError::bad_request(
                "\"userName\" may only contain letters, digits, '_', '.' and '-'",
            ));
        }
        if !original.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(ApplicationError::bad_request(
                "\"userName\" must start with a letter or digit",
            ));
        }

        let canonical = original.to_ascii_lowercase();
        if RESERVED_WORDS.contains(&canonical.as_str()) {
            return Err(ApplicationError::bad_request(
                "\"userName\" is reserved",
            ));
        }

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["ada", "Ada_Lovelace", "user.name-01", "x9z"] {
            assert!(UserName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("AdaLovelace").unwrap();
        assert_eq!(name.original(), "AdaLovelace");
        assert_eq!(name.canonical(), "adalovelace");
    }

    #[test]
    fn test_fullwidth_input_is_normalized() {
        let name = UserName::new("ａｄａ").unwrap();
        assert_eq!(name.original(), "ada");
    }

    #[test]
    fn test_invalid_names() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("a".repeat(31)).is_err());
        assert!(UserName::new("has space").is_err());
        assert!(UserName::new("_leading").is_err());
        assert!(UserName::new("Admin").is_err());
    }
}
