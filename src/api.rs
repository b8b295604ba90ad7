pub mod console;

use std::fmt;

/// Host operations a plugin is permitted to call.
pub trait HostApi {
    fn log(&self, message: &str);
    fn show_notice(&self, message: &str, duration_ms: u32) -> Result<(), NoticeError>;
}

/// The host could not display a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeError(pub String);

impl fmt::Display for NoticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice failed: {}", self.0)
    }
}

impl std::error::Error for NoticeError {}
