use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::api::console::ConsoleApi;
use crate::event::Event;
use crate::manifest::PluginManifest;
use crate::plugin::Plugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Unloaded,
    Loaded,
    Disabled,
}

struct Registered {
    manifest: PluginManifest,
    plugin: Box<dyn Plugin>,
    state: PluginState,
    instance: Option<uuid::Uuid>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Owns plugins and drives their callbacks, one at a time.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Registered>,
}

impl PluginHost {
    /// Returns `false` when a plugin with the same manifest id is already
    /// registered.
    pub fn register(&mut self, manifest: PluginManifest, plugin: Box<dyn Plugin>) -> bool {
        if self.plugins.iter().any(|p| p.manifest.id == manifest.id) {
            warn!("Plugin {} already registered", manifest.id);
            return false;
        }
        let state = if manifest.enabled {
            PluginState::Unloaded
        } else {
            PluginState::Disabled
        };
        debug!("Registered {} as {:?}", manifest.id, state);
        self.plugins.push(Registered {
            manifest,
            plugin,
            state,
            instance: None,
            loaded_at: None,
        });
        true
    }

    pub fn load_all(&mut self) {
        for p in self
            .plugins
            .iter_mut()
            .filter(|p| p.state == PluginState::Unloaded)
        {
            let instance = uuid::Uuid::new_v4();
            let api = ConsoleApi {
                manifest: &p.manifest,
            };
            p.plugin.on_load(&api);
            p.state = PluginState::Loaded;
            p.instance = Some(instance);
            p.loaded_at = Some(Utc::now());
            info!(
                "Loaded {} v{} ({}) instance {}",
                p.manifest.id,
                p.manifest.version,
                p.plugin.identifier(),
                instance
            );
        }
    }

    pub fn unload_all(&mut self) {
        for p in self
            .plugins
            .iter_mut()
            .filter(|p| p.state == PluginState::Loaded)
        {
            p.plugin.on_unload();
            p.state = PluginState::Unloaded;
            if let (Some(instance), Some(loaded_at)) = (p.instance.take(), p.loaded_at.take()) {
                info!(
                    "Unloaded {} instance {} after {}s",
                    p.manifest.id,
                    instance,
                    (Utc::now() - loaded_at).num_seconds()
                );
            }
        }
    }

    /// Forwards the event to every loaded plugin that handles its type.
    /// Returns how many plugins were invoked.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                error!("Could not serialize {} event: {}", event.tag(), e);
                return 0;
            }
        };
        let mut invoked = 0;
        for p in self.plugins.iter_mut().filter(|p| {
            p.state == PluginState::Loaded && p.manifest.handles(event.tag())
        }) {
            p.plugin.on_event(&text);
            invoked += 1;
        }
        debug!("Dispatched {} to {} plugin(s)", event.tag(), invoked);
        invoked
    }

    /// Forwards undecoded text to every loaded plugin.
    pub fn dispatch_raw(&mut self, event_json: &str) -> usize {
        let mut invoked = 0;
        for p in self
            .plugins
            .iter_mut()
            .filter(|p| p.state == PluginState::Loaded)
        {
            p.plugin.on_event(event_json);
            invoked += 1;
        }
        invoked
    }

    #[must_use]
    pub fn state(&self, id: &str) -> Option<PluginState> {
        self.plugins
            .iter()
            .find(|p| p.manifest.id == id)
            .map(|p| p.state)
    }

    #[must_use]
    pub fn instance(&self, id: &str) -> Option<uuid::Uuid> {
        self.plugins
            .iter()
            .find(|p| p.manifest.id == id)
            .and_then(|p| p.instance)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::api::HostApi;
    use crate::manifest::{PluginCapability, PluginHook};

    use super::*;

    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Plugin for Recorder {
        fn identifier(&self) -> String {
            String::from("recorder")
        }

        fn on_load(&mut self, api: &dyn HostApi) {
            let shown = api.show_notice("hi", 1000).is_ok();
            self.calls.borrow_mut().push(format!("load:{shown}"));
        }

        fn on_unload(&mut self) {
            self.calls.borrow_mut().push(String::from("unload"));
        }

        fn on_event(&mut self, event_json: &str) {
            self.calls.borrow_mut().push(String::from(event_json));
        }
    }

    fn manifest(id: &str, hooks: Vec<PluginHook>, enabled: bool) -> PluginManifest {
        PluginManifest {
            id: String::from(id),
            name: String::from(id),
            version: String::from("1.0.0"),
            description: None,
            author: None,
            hooks,
            capabilities: vec![PluginCapability::ModifyUi],
            enabled,
        }
    }

    fn recorder() -> (Box<dyn Plugin>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Box::new(Recorder {
                calls: Rc::clone(&calls),
            }),
            calls,
        )
    }

    fn file_save(path: &str) -> Event {
        let text = format!(r#"{{"event_type":"FileSave","data":{{"path":"{path}"}}}}"#);
        Event::try_from(text.as_str()).unwrap()
    }

    #[test]
    fn test_given_duplicate_id_when_register_then_ignored() {
        let mut host = PluginHost::default();
        let (a, _) = recorder();
        let (b, _) = recorder();
        assert!(host.register(manifest("one", Vec::new(), true), a));
        assert!(!host.register(manifest("one", Vec::new(), true), b));
        assert_eq!(host.state("one"), Some(PluginState::Unloaded));
        assert_eq!(host.state("two"), None);
    }

    #[test]
    fn test_given_registered_when_load_all_then_loaded_with_notice() {
        let mut host = PluginHost::default();
        let (plugin, calls) = recorder();
        host.register(manifest("one", Vec::new(), true), plugin);
        host.load_all();
        assert_eq!(host.state("one"), Some(PluginState::Loaded));
        assert!(host.instance("one").is_some());
        assert_eq!(calls.borrow().as_slice(), ["load:true"]);
    }

    #[test]
    fn test_given_disabled_manifest_when_load_all_then_never_called() {
        let mut host = PluginHost::default();
        let (plugin, calls) = recorder();
        host.register(manifest("off", Vec::new(), false), plugin);
        host.load_all();
        assert_eq!(host.dispatch(&file_save("a.md")), 0);
        host.unload_all();
        assert_eq!(host.state("off"), Some(PluginState::Disabled));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_given_hooks_when_dispatch_then_only_matching_plugins() {
        let mut host = PluginHost::default();
        let (saver, saver_calls) = recorder();
        let (opener, opener_calls) = recorder();
        host.register(manifest("saver", vec![PluginHook::OnFileSave], true), saver);
        host.register(manifest("opener", vec![PluginHook::OnFileOpen], true), opener);
        host.load_all();
        assert_eq!(host.dispatch(&file_save("a.md")), 1);
        assert_eq!(
            saver_calls.borrow()[1],
            r#"{"event_type":"FileSave","data":{"path":"a.md"}}"#
        );
        assert_eq!(opener_calls.borrow().len(), 1);
    }

    #[test]
    fn test_given_unloaded_plugin_when_dispatch_then_skipped() {
        let mut host = PluginHost::default();
        let (plugin, calls) = recorder();
        host.register(manifest("one", Vec::new(), true), plugin);
        assert_eq!(host.dispatch_raw("not json"), 0);
        host.load_all();
        assert_eq!(host.dispatch_raw("not json"), 1);
        host.unload_all();
        assert_eq!(host.dispatch_raw("not json"), 0);
        assert_eq!(host.state("one"), Some(PluginState::Unloaded));
        assert!(host.instance("one").is_none());
        assert_eq!(
            calls.borrow().as_slice(),
            ["load:true", "not json", "unload"]
        );
    }

    #[test]
    fn test_given_reload_when_load_all_then_new_instance() {
        let mut host = PluginHost::default();
        let (plugin, _) = recorder();
        host.register(manifest("one", Vec::new(), true), plugin);
        host.load_all();
        let first = host.instance("one");
        host.unload_all();
        host.load_all();
        assert_ne!(host.instance("one"), first);
    }
}
