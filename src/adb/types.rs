// Data records shared across the device API.
use serde::Serialize;
use std::path::PathBuf;

/// Raw `key=value` settings lines grouped by namespace.
///
/// All three namespaces are always present; a namespace the device returned
/// nothing for is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceSettings {
    pub system: Vec<String>,
    pub global: Vec<String>,
    pub secure: Vec<String>,
}

/// Flags for `adb backup`. The backup always covers all app data
/// (`-all`); the booleans opt additional content in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupOptions {
    /// Include shared storage (`-shared`).
    pub shared_storage: bool,
    /// Include the apks themselves (`-apk`).
    pub apks: bool,
    /// Include system apps (`-system`).
    pub system: bool,
    /// Destination file; must end in `.ab` and sit in an existing
    /// directory. `None` lets adb use its default.
    pub path: Option<PathBuf>,
}
