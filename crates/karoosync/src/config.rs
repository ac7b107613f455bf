//! The `karoosync.cfg` settings file.
//!
//! INI, with one section per service and an optional `[SYNC]` section:
//!
//! ```ini
//! [INTERVALS.ICU]
//! INTERVALS_ICU_ID = i12345
//! INTERVALS_ICU_APIKEY = ...
//!
//! [HAMMERHEAD]
//! HAMMERHEAD_USERNAME = rider@example.com
//! HAMMERHEAD_PASSWORD = ...
//!
//! [SYNC]
//! OLDEST_DATE = 2024-03-01
//! NEWEST_DATE = 2024-03-07
//! ```
//!
//! Section and key names are matched case-insensitively.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ini::{Ini, ParseOption};
use karoosync_client::utils::parse_date;
use secrecy::SecretString;

use crate::error::{SyncError, SyncResult};

pub const DEFAULT_SETTINGS_FILE: &str = "karoosync.cfg";

const INTERVALS_SECTION: &str = "INTERVALS.ICU";
const HAMMERHEAD_SECTION: &str = "HAMMERHEAD";
const SYNC_SECTION: &str = "SYNC";

pub const SETTINGS_TEMPLATE: &str = r"[INTERVALS.ICU]
INTERVALS_ICU_ID = i00000
INTERVALS_ICU_APIKEY = 00000000000000000000

[HAMMERHEAD]
HAMMERHEAD_USERNAME = your_email_address
HAMMERHEAD_PASSWORD = your_password

[SYNC]
; Dates to sync, YYYY-MM-DD. Only today's workouts are synced when unset.
; OLDEST_DATE = 2024-03-01
; NEWEST_DATE = 2024-03-07
";

/// Values the template ships with.
const PLACEHOLDERS: &[&str] = &[
    "i00000",
    "00000000000000000000",
    "your_email_address",
    "your_password",
];

#[derive(Clone, Debug)]
pub struct Settings {
    pub source_athlete_id: String,
    pub source_api_key: SecretString,
    pub destination_username: String,
    pub destination_password: SecretString,
    pub oldest_date: Option<NaiveDate>,
    pub newest_date: Option<NaiveDate>,
}

/// Outcome of [`load_or_create`].
#[derive(Debug)]
pub enum Loaded {
    Settings(Settings),
    /// No settings existed; a template was written to this path.
    TemplateCreated(PathBuf),
}

impl Settings {
    /// Read settings through `get(section, key)`. Missing or empty required
    /// keys, template placeholders and unreadable dates are rejected.
    pub fn from_lookup<F>(mut get: F) -> SyncResult<Self>
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        let mut required = |section: &str, key: &str| -> SyncResult<String> {
            let value = get(section, key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SyncError::ConfigInvalid(format!("{key} missing in [{section}]")))?;
            if PLACEHOLDERS.contains(&value.as_str()) {
                return Err(SyncError::ConfigInvalid(format!(
                    "{key} in [{section}] still has the placeholder value {value:?}"
                )));
            }
            Ok(value)
        };
        let source_athlete_id = required(INTERVALS_SECTION, "INTERVALS_ICU_ID")?;
        let source_api_key = required(INTERVALS_SECTION, "INTERVALS_ICU_APIKEY")?;
        let destination_username = required(HAMMERHEAD_SECTION, "HAMMERHEAD_USERNAME")?;
        let destination_password = required(HAMMERHEAD_SECTION, "HAMMERHEAD_PASSWORD")?;

        let mut date = |key: &str| -> SyncResult<Option<NaiveDate>> {
            match get(SYNC_SECTION, key).filter(|v| !v.trim().is_empty()) {
                None => Ok(None),
                Some(v) => parse_date(&v).map(Some).ok_or_else(|| {
                    SyncError::ConfigInvalid(format!("{key} {v:?} is not a YYYY-MM-DD date"))
                }),
            }
        };
        let oldest_date = date("OLDEST_DATE")?;
        let newest_date = date("NEWEST_DATE")?;

        Ok(Self {
            source_athlete_id,
            source_api_key: SecretString::new(source_api_key.into()),
            destination_username,
            destination_password: SecretString::new(destination_password.into()),
            oldest_date,
            newest_date,
        })
    }

    /// Parse the INI text of a settings file.
    pub fn from_ini_str(text: &str) -> SyncResult<Self> {
        // Passwords may contain quotes and backslashes; take values verbatim.
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, opt)
            .map_err(|e| SyncError::ConfigInvalid(format!("cannot parse settings: {e}")))?;
        Self::from_lookup(|section, key| lookup(&ini, section, key))
    }

    /// Read settings from `path`, failing with [`SyncError::ConfigMissing`]
    /// when it does not exist.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::ConfigMissing(path.to_path_buf()));
            }
            Err(e) => return Err(SyncError::Io(e)),
        };
        Self::from_ini_str(&text).map_err(|e| match e {
            SyncError::ConfigInvalid(msg) => {
                SyncError::ConfigInvalid(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

fn lookup(ini: &Ini, section: &str, key: &str) -> Option<String> {
    ini.iter()
        .filter(|(name, _)| name.is_some_and(|n| n.trim().eq_ignore_ascii_case(section)))
        .flat_map(|(_, props)| props.iter())
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.to_string())
}

/// Write the settings template to `path`.
pub fn write_template(path: &Path) -> SyncResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, SETTINGS_TEMPLATE)?;
    tracing::info!(path = %path.display(), "wrote settings template");
    Ok(())
}

/// Load settings, or write the template when there are none yet.
pub fn load_or_create(path: &Path) -> SyncResult<Loaded> {
    match Settings::load(path) {
        Ok(s) => Ok(Loaded::Settings(s)),
        Err(SyncError::ConfigMissing(p)) => {
            write_template(&p)?;
            Ok(Loaded::TemplateCreated(p))
        }
        Err(e) => Err(e),
    }
}
