use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::manifest::{PluginCapability, PluginManifest};

use super::{HostApi, NoticeError};

/// Host surface backed by the process log. Notices are written as log
/// records, so they show up wherever `env_logger` sends output.
pub struct ConsoleApi<'a> {
    pub manifest: &'a PluginManifest,
}

impl ConsoleApi<'_> {
    #[must_use]
    pub fn notice_expiry(now: DateTime<Utc>, duration_ms: u32) -> DateTime<Utc> {
        now + Duration::milliseconds(i64::from(duration_ms))
    }
}

impl HostApi for ConsoleApi<'_> {
    fn log(&self, message: &str) {
        info!("[Plugin: {}] {}", self.manifest.id, message);
    }

    fn show_notice(&self, message: &str, duration_ms: u32) -> Result<(), NoticeError> {
        if !self.manifest.has_capability(PluginCapability::ModifyUi) {
            warn!("[Plugin: {}] notice rejected, missing modify_ui", self.manifest.id);
            return Err(NoticeError(format!(
                "plugin {} does not have modify_ui capability",
                self.manifest.id
            )));
        }
        let expiry = Self::notice_expiry(Utc::now(), duration_ms);
        info!(
            "[Plugin: {}] Notice: {} (until {})",
            self.manifest.id,
            message,
            expiry.format("%H:%M:%S%.3f")
        );
        Ok(())
    }
}
