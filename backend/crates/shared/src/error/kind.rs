//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] taxonomy and the default HTTP status code of each kind.

use serde::Serialize;

/// エラー種別の列挙体
///
/// アプリケーションで発生し得る失敗の分類を定義します。
/// 各バリアントはデフォルトの HTTP ステータスコードを持ちます。
/// 実際に返却されるコードはエラー側で上書きされる場合があります
/// (例: `GeneralApplicationError` の呼び出し元指定コード)。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 400 - Bad Request: 入力不正・業務ルール違反
    BadRequest,
    /// 401 - Unauthorized: 認証失敗
    Unauthorized,
    /// 403 - Insufficient Access: アクセス権限なし
    InsufficientAccess,
    /// 404 - Not Found: リソースが見つからない
    NotFound,
    /// 400 - General Application Error: 汎用アプリケーションエラー（コード指定可）
    GeneralApplicationError,
    /// 400 - Validation Error: 入力検証エラー
    ValidationError,
    /// 409 - Cast Error: 値の型変換に失敗
    CastError,
    /// 409 - Duplicate Key Error: 一意制約違反
    DuplicateKeyError,
    /// 500 - Unknown Error: 分類不能なエラー
    UnknownError,
}

impl ErrorKind {
    /// 全種別（テストや網羅チェック用）
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::InsufficientAccess,
        ErrorKind::NotFound,
        ErrorKind::GeneralApplicationError,
        ErrorKind::ValidationError,
        ErrorKind::CastError,
        ErrorKind::DuplicateKeyError,
        ErrorKind::UnknownError,
    ];

    /// デフォルトの HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.status_code(), 400);
    /// assert_eq!(ErrorKind::DuplicateKeyError.status_code(), 409);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::InsufficientAccess => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralApplicationError => 400,
            ErrorKind::ValidationError => 400,
            ErrorKind::CastError => 409,
            ErrorKind::DuplicateKeyError => 409,
            ErrorKind::UnknownError => 500,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::InsufficientAccess => "Insufficient Access",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::GeneralApplicationError => "General Application Error",
            ErrorKind::ValidationError => "Validation Error",
            ErrorKind::CastError => "Cast Error",
            ErrorKind::DuplicateKeyError => "Duplicate Key Error",
            ErrorKind::UnknownError => "Unknown Error",
        }
    }

    /// アプリケーションエラーとして直接送出される種別かどうか
    ///
    /// `true` の種別はエラー自身のメッセージとコードでそのまま応答されます。
    #[inline]
    pub const fn is_application(&self) -> bool {
        matches!(
            self,
            ErrorKind::BadRequest
                | ErrorKind::GeneralApplicationError
                | ErrorKind::InsufficientAccess
                | ErrorKind::Unauthorized
                | ErrorKind::NotFound
        )
    }

    /// サーバー側のエラーかどうかを判定
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// クライアント側のエラーかどうかを判定
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::InsufficientAccess.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::GeneralApplicationError.status_code(), 400);
        assert_eq!(ErrorKind::ValidationError.status_code(), 400);
        assert_eq!(ErrorKind::CastError.status_code(), 409);
        assert_eq!(ErrorKind::DuplicateKeyError.status_code(), 409);
        assert_eq!(ErrorKind::UnknownError.status_code(), 500);
    }

    #[test]
    fn test_all_codes_are_known_http_errors() {
        for kind in ErrorKind::ALL {
            assert!(
                [400, 401, 403, 404, 409, 500].contains(&kind.status_code()),
                "{kind} maps to an unexpected status"
            );
        }
    }

    #[test]
    fn test_is_application() {
        assert!(ErrorKind::BadRequest.is_application());
        assert!(ErrorKind::NotFound.is_application());
        assert!(!ErrorKind::CastError.is_application());
        assert!(!ErrorKind::UnknownError.is_application());
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(ErrorKind::UnknownError.is_server_error());
        assert!(ErrorKind::DuplicateKeyError.is_client_error());
    }
}
