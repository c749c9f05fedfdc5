//! Fetching and unpacking Google's SDK platform-tools archive.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use log::info;

use super::error::{AdbError, AdbResult};
use super::resolve::ADB_EXECUTABLE;

const DOWNLOAD_URL_BASE: &str = "https://dl.google.com/android/repository/platform-tools-latest-";

fn archive_url() -> AdbResult<String> {
    let os = match std::env::consts::OS {
        "linux" => "linux",
        "macos" => "darwin",
        "windows" => "windows",
        other => {
            return Err(AdbError::DownloadFailed {
                reason: format!("no platform-tools archive for '{other}'"),
            });
        }
    };
    Ok(format!("{DOWNLOAD_URL_BASE}{os}.zip"))
}

/// Download platform-tools into `output_directory` and return the path to
/// the extracted adb executable.
pub async fn download_platform_tools(output_directory: &Path) -> AdbResult<PathBuf> {
    let url = archive_url()?;
    info!("downloading {url}");
    let failed = |reason: String| AdbError::DownloadFailed { reason };

    let response = reqwest::get(&url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| failed(e.to_string()))?;
    let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| failed(e.to_string()))?;
    archive
        .extract(output_directory)
        .map_err(|e| failed(e.to_string()))?;

    let exe = output_directory.join("platform-tools").join(ADB_EXECUTABLE);
    if !exe.is_file() {
        return Err(failed(format!(
            "archive did not contain {}",
            exe.display()
        )));
    }
    info!("platform-tools extracted to {}", output_directory.display());
    Ok(exe)
}
