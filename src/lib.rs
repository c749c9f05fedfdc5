pub mod adb;

pub use adb::{
    Adb, AdbError, AdbResult, BackupOptions, CommandSpec, Device, DeviceSettings, InstallPrompt,
    SettingEntry, StdinPrompt,
};
