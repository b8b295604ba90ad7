use std::fs::File;

use serde::{Deserialize, Serialize};

use crate::event::EventType;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ManifestError;

/// Plugin metadata: what it is, which hooks it implements and what it may do.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PluginManifest {
    /// Unique identifier, e.g. "com.example.markdown-save".
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub hooks: Vec<PluginHook>,
    #[serde(default)]
    pub capabilities: Vec<PluginCapability>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PluginCapability {
    ReadFiles,
    WriteFiles,
    DeleteFiles,
    VaultMetadata,
    Network,
    Storage,
    ModifyUi,
    Commands,
    EditorAccess,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PluginHook {
    OnLoad,
    OnUnload,
    OnFileOpen,
    OnFileSave,
    OnFileCreate,
    OnFileDelete,
    OnFileRename,
    OnVaultSwitch,
    OnEditorChange,
}

impl PluginHook {
    #[must_use]
    pub fn for_event(event_type: EventType) -> Self {
        match event_type {
            EventType::FileOpen => Self::OnFileOpen,
            EventType::FileSave => Self::OnFileSave,
            EventType::FileCreate => Self::OnFileCreate,
            EventType::FileDelete => Self::OnFileDelete,
            EventType::FileRename => Self::OnFileRename,
            EventType::VaultSwitch => Self::OnVaultSwitch,
            EventType::EditorChange => Self::OnEditorChange,
        }
    }

    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::OnLoad | Self::OnUnload)
    }
}

impl PluginManifest {
    pub fn read(s: String) -> Result<Self, ManifestError> {
        let file = File::open(s).map_or(Err(ManifestError), Ok);
        serde_json::from_reader(file?).map_or(Err(ManifestError), Ok)
    }

    #[must_use]
    pub fn has_capability(&self, capability: PluginCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// A plugin declaring no event hooks receives every event; otherwise only
    /// known event types with a matching hook reach it.
    #[must_use]
    pub fn handles(&self, event_type: &str) -> bool {
        if !self.hooks.iter().any(|h| !h.is_lifecycle()) {
            return true;
        }
        EventType::try_from(event_type)
            .map(|kind| self.hooks.contains(&PluginHook::for_event(kind)))
            .unwrap_or(false)
    }
}
