pub mod markdown_save;

use crate::api::HostApi;

/// Entry points a host invokes on a plugin, one call at a time.
///
/// None of these may fail from the host's point of view: a plugin handles
/// its own errors and reports them through its own output or `api.log`.
pub trait Plugin {
    fn identifier(&self) -> String;
    fn on_load(&mut self, api: &dyn HostApi);
    fn on_unload(&mut self);
    /// `event_json` is the serialized [`crate::event::Event`].
    fn on_event(&mut self, event_json: &str);
}
