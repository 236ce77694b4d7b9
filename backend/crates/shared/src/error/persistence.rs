//! Persistence errors
//!
//! Storage-driver failures classified into the three shapes the API reports
//! (validation, cast, duplicate key). Anything else is `Other` and falls
//! through to the generic 500 path.

use std::collections::BTreeMap;

use thiserror::Error;

/// Storage-layer failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A stored value violated a schema rule (`field -> message`)
    #[error("Validation failed: {}", join_values(.fields))]
    ValidationFailure { fields: BTreeMap<String, String> },

    /// A value could not be converted to the column type
    #[error("Invalid {field}: {value}")]
    CastFailure { field: String, value: String },

    /// A unique index rejected the write (`field -> conflicting value`)
    #[error("Duplicate key: {}", join_pairs(.conflicting))]
    DuplicateKeyFailure { conflicting: BTreeMap<String, String> },

    /// Driver failure with no dedicated shape
    #[error("Database error: {0}")]
    Other(String),
}

impl PersistenceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        PersistenceError::ValidationFailure { fields }
    }

    pub fn cast(field: impl Into<String>, value: impl Into<String>) -> Self {
        PersistenceError::CastFailure {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut conflicting = BTreeMap::new();
        conflicting.insert(field.into(), value.into());
        PersistenceError::DuplicateKeyFailure { conflicting }
    }

    /// Classify a PostgreSQL error by SQLSTATE
    ///
    /// 23505 is matched before every other class. See
    /// <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
    pub fn from_sqlstate(
        code: &str,
        column: Option<&str>,
        constraint: Option<&str>,
        detail: Option<&str>,
        message: &str,
    ) -> Self {
        if code == "23505" {
            let conflicting = detail.and_then(parse_duplicate_detail).unwrap_or_else(|| {
                let mut map = BTreeMap::new();
                map.insert(
                    constraint.unwrap_or("key").to_string(),
                    "already exists".to_string(),
                );
                map
            });
            return PersistenceError::DuplicateKeyFailure { conflicting };
        }

        match code {
            // Class 23: Integrity Constraint Violation
            "23502" => {
                let field = column.unwrap_or("value");
                PersistenceError::validation(field, format!("{field} is required"))
            }
            "23514" => PersistenceError::validation(constraint.unwrap_or("check"), message),
            // Class 22: Data Exception
            "22001" => PersistenceError::validation(column.unwrap_or("value"), message),
            "22P02" | "22007" | "22008" => match parse_cast_message(message) {
                Some((type_name, value)) => {
                    PersistenceError::cast(column.map(str::to_string).unwrap_or(type_name), value)
                }
                None => PersistenceError::cast(column.unwrap_or("value"), message),
            },
            _ => PersistenceError::Other(message.to_string()),
        }
    }
}

fn join_values(map: &BTreeMap<String, String>) -> String {
    map.values().cloned().collect::<Vec<_>>().join(", ")
}

fn join_pairs(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a PostgreSQL unique-violation detail into `column -> value`
///
/// The driver reports `Key (email)=(a@b.c) already exists.`; composite keys
/// list columns and values comma-separated in the same order.
pub fn parse_duplicate_detail(detail: &str) -> Option<BTreeMap<String, String>> {
    let rest = detail.strip_prefix("Key (")?;
    let (columns, rest) = rest.split_once(")=(")?;
    let end = rest.rfind(") already exists")?;
    let values = &rest[..end];

    let columns: Vec<&str> = columns.split(',').map(str::trim).collect();
    let mut map = BTreeMap::new();
    if columns.len() == 1 {
        map.insert(columns[0].to_string(), values.to_string());
        return Some(map);
    }

    let values: Vec<&str> = values.split(',').map(str::trim).collect();
    if values.len() != columns.len() {
        map.insert(columns.join(", "), values.join(", "));
        return Some(map);
    }

    for (column, value) in columns.into_iter().zip(values) {
        map.insert(column.to_string(), value.to_string());
    }
    Some(map)
}

/// Parse `invalid input syntax for type uuid: "abc"` into `(type, value)`
pub fn parse_cast_message(message: &str) -> Option<(String, String)> {
    let (_, rest) = message.split_once("for type ")?;
    let (type_name, value) = rest.split_once(':')?;
    let value = value.trim().trim_matches('"');
    Some((type_name.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_column_detail() {
        let map = parse_duplicate_detail("Key (email)=(a@b.c) already exists.").unwrap();
        assert_eq!(map.get("email").map(String::as_str), Some("a@b.c"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_composite_detail() {
        let map =
            parse_duplicate_detail("Key (email, purpose)=(a@b.c, SIGNUP) already exists.").unwrap();
        assert_eq!(map.get("email").map(String::as_str), Some("a@b.c"));
        assert_eq!(map.get("purpose").map(String::as_str), Some("SIGNUP"));
    }

    #[test]
    fn test_parse_detail_with_comma_in_value() {
        let map = parse_duplicate_detail("Key (display)=(Doe, Jane) already exists.").unwrap();
        assert_eq!(map.get("display").map(String::as_str), Some("Doe, Jane"));
    }

    #[test]
    fn test_parse_unrelated_detail() {
        assert!(parse_duplicate_detail("Failing row contains (1, null).").is_none());
    }

    #[test]
    fn test_parse_cast_message() {
        let (ty, value) =
            parse_cast_message("invalid input syntax for type uuid: \"not-a-uuid\"").unwrap();
        assert_eq!(ty, "uuid");
        assert_eq!(value, "not-a-uuid");
    }

    #[test]
    fn test_sqlstate_unique_violation() {
        let err = PersistenceError::from_sqlstate(
            "23505",
            None,
            Some("users_email_key"),
            Some("Key (email)=(a@b.c) already exists."),
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        assert_eq!(err, PersistenceError::duplicate("email", "a@b.c"));
    }

    #[test]
    fn test_sqlstate_unique_violation_without_parsable_detail() {
        let err = PersistenceError::from_sqlstate(
            "23505",
            None,
            Some("users_email_key"),
            Some("something else"),
            "duplicate key",
        );
        assert_eq!(
            err,
            PersistenceError::duplicate("users_email_key", "already exists")
        );

        let err = PersistenceError::from_sqlstate("23505", None, None, None, "duplicate key");
        assert_eq!(err, PersistenceError::duplicate("key", "already exists"));
    }

    #[test]
    fn test_sqlstate_unique_violation_wins_over_column() {
        let err = PersistenceError::from_sqlstate(
            "23505",
            Some("email"),
            None,
            Some("Key (user_name_canonical)=(ada) already exists."),
            "duplicate key",
        );
        assert_eq!(err, PersistenceError::duplicate("user_name_canonical", "ada"));
    }

    #[test]
    fn test_sqlstate_validation_classes() {
        assert_eq!(
            PersistenceError::from_sqlstate("23502", Some("email"), None, None, "null value"),
            PersistenceError::validation("email", "email is required")
        );
        assert_eq!(
            PersistenceError::from_sqlstate("23502", None, None, None, "null value"),
            PersistenceError::validation("value", "value is required")
        );
        assert_eq!(
            PersistenceError::from_sqlstate(
                "23514",
                None,
                Some("users_phone_check"),
                None,
                "new row violates check constraint"
            ),
            PersistenceError::validation("users_phone_check", "new row violates check constraint")
        );
        assert_eq!(
            PersistenceError::from_sqlstate("23514", None, None, None, "violates check"),
            PersistenceError::validation("check", "violates check")
        );
        assert_eq!(
            PersistenceError::from_sqlstate(
                "22001",
                Some("first_name"),
                None,
                None,
                "value too long for type character varying(50)"
            ),
            PersistenceError::validation(
                "first_name",
                "value too long for type character varying(50)"
            )
        );
    }

    #[test]
    fn test_sqlstate_cast_classes() {
        let message = "invalid input syntax for type uuid: \"abc\"";
        assert_eq!(
            PersistenceError::from_sqlstate("22P02", None, None, None, message),
            PersistenceError::cast("uuid", "abc")
        );
        assert_eq!(
            PersistenceError::from_sqlstate("22P02", Some("user_id"), None, None, message),
            PersistenceError::cast("user_id", "abc")
        );
        for code in ["22007", "22008"] {
            assert_eq!(
                PersistenceError::from_sqlstate(code, Some("expires_at"), None, None, "bad date"),
                PersistenceError::cast("expires_at", "bad date")
            );
        }
    }

    #[test]
    fn test_sqlstate_other() {
        assert_eq!(
            PersistenceError::from_sqlstate("40001", None, None, None, "serialization failure"),
            PersistenceError::Other("serialization failure".into())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PersistenceError::cast("userId", "abc").to_string(),
            "Invalid userId: abc"
        );
        assert_eq!(
            PersistenceError::duplicate("email", "a@b.c").to_string(),
            "Duplicate key: email=a@b.c"
        );
    }
}
