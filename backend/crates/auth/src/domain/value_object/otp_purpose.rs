//! One-time code purpose
//!
//! A code issued for one purpose never verifies another.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpPurpose {
    /// Email verification during signup
    Signup,
}

impl OtpPurpose {
    /// Stored code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Signup => "SIGNUP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SIGNUP" => Some(Self::Signup),
            _ => None,
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(OtpPurpose::from_code("SIGNUP"), Some(OtpPurpose::Signup));
        assert_eq!(OtpPurpose::from_code("signup"), None);
        assert_eq!(
            serde_json::to_string(&OtpPurpose::Signup).unwrap(),
            "\"SIGNUP\""
        );
    }
}
