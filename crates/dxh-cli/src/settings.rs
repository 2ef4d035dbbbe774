//! CLI settings, persisted as TOML in the user's config directory.
//!
//! ```toml
//! [endpoint]
//! url = "https://script.google.com/macros/s/.../exec"
//! method = "post"
//! response = "opaque"
//! timeout_secs = 10
//!
//! [storage]
//! draft_key = "dxHearingDraft"
//!
//! [export]
//! format = "markdown"
//!
//! [notifications]
//! display_secs = 3
//!
//! [form]
//! schema = "dx_hearing"
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dxh_export::{DEFAULT_PLACEHOLDER, DEFAULT_PREFIX, TranscriptFormat, TranscriptOptions};
use dxh_model::FormSchema;
use dxh_persistence::{DEFAULT_ARCHIVE_KEY, DEFAULT_DRAFT_KEY};
use dxh_submit::EndpointSettings;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "DxHearing";
const APPLICATION: &str = "dx-hearing";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote spreadsheet endpoint.
    pub endpoint: EndpointSettings,

    /// Draft and archive storage.
    pub storage: StorageSettings,

    /// Transcript files.
    pub export: ExportSettings,

    pub notifications: NotificationSettings,

    /// Which sheet to fill in.
    pub form: FormSettings,
}

impl Settings {
    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("parse settings {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("read settings {}", path.display())),
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content).with_context(|| format!("write {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `<key>.json` files. Defaults to the user data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_dir: Option<PathBuf>,
    pub draft_key: String,
    pub archive_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            draft_dir: None,
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            archive_key: DEFAULT_ARCHIVE_KEY.to_string(),
        }
    }
}

impl StorageSettings {
    pub fn draft_dir(&self) -> PathBuf {
        self.draft_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().join("drafts"))
                .unwrap_or_else(|| PathBuf::from("drafts"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Transcript directory. Defaults to the user's download directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub format: TranscriptFormat,
    pub prefix: String,
    pub placeholder: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: TranscriptFormat::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            directories::UserDirs::new()
                .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    pub fn transcript_options(&self) -> TranscriptOptions {
        TranscriptOptions {
            format: self.format,
            prefix: self.prefix.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub display_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { display_secs: 3 }
    }
}

impl NotificationSettings {
    pub fn display(&self) -> Duration {
        Duration::from_secs(self.display_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// `dx_hearing`, `quick_hearing`, or a path to a TOML schema.
    pub schema: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            schema: "dx_hearing".to_string(),
        }
    }
}

impl FormSettings {
    pub fn load_schema(&self) -> Result<FormSchema> {
        match self.schema.trim() {
            "" | "dx_hearing" => Ok(FormSchema::dx_hearing()),
            "quick_hearing" => Ok(FormSchema::quick_hearing()),
            path => FormSchema::load(Path::new(path))
                .with_context(|| format!("load form schema {path}")),
        }
    }
}
