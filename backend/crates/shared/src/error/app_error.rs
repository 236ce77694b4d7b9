//! Application Error - Errors raised where a business rule is violated
//!
//! Defines [`ApplicationError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーションエラー型
///
/// 業務ルール違反を検出した箇所で生成され、正規化処理で一度だけ消費されます。
/// 送出後は変更されません（ビルダーメソッドは送出前の構築にのみ使用）。
///
/// ## Fields
/// * `kind` - エラー種別
/// * `message` - ユーザー向けのエラーメッセージ
/// * `code` - HTTP ステータスコード（デフォルトは種別のコード）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::ApplicationError, kind::ErrorKind};
///
/// let err = ApplicationError::new(ErrorKind::NotFound, "User not found");
/// assert_eq!(err.code(), 404);
///
/// let err = ApplicationError::new(ErrorKind::GeneralApplicationError, "Quota reached")
///     .with_code(403);
/// assert_eq!(err.code(), 403);
/// ```
pub struct ApplicationError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    code: u16,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, ApplicationError>` の省略形
pub type AppResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成（コードは種別のデフォルト）
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: kind.status_code(),
            source: None,
        }
    }

    /// 400 Bad Request
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// 403 Insufficient Access
    #[inline]
    pub fn insufficient_access(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InsufficientAccess, message)
    }

    /// 404 Not Found
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 汎用アプリケーションエラー（呼び出し元がコードを指定）
    #[inline]
    pub fn application(message: impl Into<Cow<'static, str>>, code: u16) -> Self {
        Self::new(ErrorKind::GeneralApplicationError, message).with_code(code)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ステータスコードを上書き
    #[inline]
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::{ApplicationError, AppResult};
    ///
    /// fn parse_age(raw: &str) -> AppResult<u8> {
    ///     raw.parse()
    ///         .map_err(|e| ApplicationError::bad_request("Invalid age").with_source(e))
    /// }
    /// assert!(parse_age("abc").is_err());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("ApplicationError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        builder.field("code", &self.code);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for ApplicationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}
