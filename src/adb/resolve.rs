//! Locating the adb executable, with an opt-in download fallback.

use std::io::Write;
use std::path::PathBuf;

use log::info;

use super::download;
use super::error::{AdbError, AdbResult};
use super::exec::Adb;

#[cfg(windows)]
pub(crate) const ADB_EXECUTABLE: &str = "adb.exe";
#[cfg(not(windows))]
pub(crate) const ADB_EXECUTABLE: &str = "adb";

/// Decides what happens when adb is missing from `PATH`.
///
/// [`StdinPrompt`] asks the user interactively; non-interactive callers
/// can implement this with a fixed policy instead.
pub trait InstallPrompt {
    /// May the platform-tools archive be downloaded?
    fn confirm_download(&mut self) -> bool;

    /// Where to put it. `None` falls back to the home directory.
    fn download_directory(&mut self) -> Option<PathBuf>;
}

/// Interactive prompt on stdin/stdout, matching the classic
/// "adb was not found, download platform-tools? (y/n)" flow.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl InstallPrompt for StdinPrompt {
    fn confirm_download(&mut self) -> bool {
        print!("adb was not found in PATH. Download the latest SDK platform-tools? (y/n) ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }

    fn download_directory(&mut self) -> Option<PathBuf> {
        print!("Download directory (empty for home): ");
        let _ = std::io::stdout().flush();
        let mut dir = String::new();
        if std::io::stdin().read_line(&mut dir).is_err() {
            return None;
        }
        let dir = dir.trim();
        if dir.is_empty() { None } else { Some(PathBuf::from(dir)) }
    }
}

/// Scan `PATH` for the adb executable.
pub fn find_in_path() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(ADB_EXECUTABLE))
        .find(|candidate| candidate.is_file())
}

fn home_directory() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Adb {
    /// Resolve the adb executable once, at startup.
    ///
    /// Uses `PATH` when possible; otherwise asks `prompt` for permission
    /// to download platform-tools. A declined download is fatal
    /// ([`AdbError::ExecutableNotConfigured`]) since nothing else in the
    /// crate can work without the executable. Clone the returned handle
    /// wherever it is needed instead of resolving again.
    pub async fn resolve(prompt: &mut dyn InstallPrompt) -> AdbResult<Self> {
        Self::resolve_from(find_in_path(), prompt).await
    }

    async fn resolve_from(
        found: Option<PathBuf>,
        prompt: &mut dyn InstallPrompt,
    ) -> AdbResult<Self> {
        if let Some(exe) = found {
            info!("using adb at {}", exe.display());
            return Ok(Adb::new(exe));
        }
        if !prompt.confirm_download() {
            return Err(AdbError::ExecutableNotConfigured);
        }
        let directory = prompt.download_directory().unwrap_or_else(home_directory);
        let exe = download::download_platform_tools(&directory).await?;
        Ok(Adb::new(exe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        consent: bool,
        asked: bool,
    }

    impl InstallPrompt for Scripted {
        fn confirm_download(&mut self) -> bool {
            self.asked = true;
            self.consent
        }
        fn download_directory(&mut self) -> Option<PathBuf> {
            None
        }
    }

    #[tokio::test]
    async fn found_executable_skips_the_prompt() {
        let mut prompt = Scripted { consent: false, asked: false };
        let adb = Adb::resolve_from(Some(PathBuf::from("/opt/platform-tools/adb")), &mut prompt)
            .await
            .unwrap();
        assert_eq!(adb.exe(), std::path::Path::new("/opt/platform-tools/adb"));
        assert!(!prompt.asked, "prompt must not fire when adb is found");
    }

    #[tokio::test]
    async fn declined_download_is_fatal() {
        let mut prompt = Scripted { consent: false, asked: false };
        let err = Adb::resolve_from(None, &mut prompt).await.unwrap_err();
        assert!(matches!(err, AdbError::ExecutableNotConfigured));
        assert!(prompt.asked);
    }
}
