// adb module - thin automation layer over the adb platform tool.
// Device work splits into a process executor (exec), a declarative
// command table (registry) and per-device handles (device); everything
// else supports those three.

pub mod device;
pub mod download;
pub mod error;
pub mod exec;
pub mod packages;
pub mod registry;
pub mod resolve;
pub mod settings;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export the main types and functions for easy access
pub use device::Device;
pub use error::{AdbError, AdbResult};
pub use exec::{Adb, split_shell_words};
pub use packages::load_package_names;
pub use registry::{COMMANDS, CommandSpec};
pub use resolve::{InstallPrompt, StdinPrompt, find_in_path};
pub use settings::SettingEntry;
pub use types::{BackupOptions, DeviceSettings};
