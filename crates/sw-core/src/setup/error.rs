use thiserror::Error;

/// Input-shape errors caught locally and rendered inline.
///
/// 本地输入校验错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("configure at least one library path starting with /")]
    NoLibraryPath,
}
