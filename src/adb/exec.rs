use std::path::{Path, PathBuf};

use log::{debug, warn};
use tokio::process::Command;

use super::device::Device;
use super::error::{AdbError, AdbResult};

/// Handle to a resolved adb executable.
///
/// Holds the executable path explicitly instead of relying on ambient
/// process state; construct it once (see [`Adb::resolve`]) and clone it
/// into every device handle that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adb {
    exe: PathBuf,
}

impl Adb {
    /// Wrap an already-known executable path (or bare program name, which
    /// the OS resolves against `PATH` at spawn time).
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Run `<exe> [-s <device>] <args...>` to completion and return the
    /// captured output.
    ///
    /// stdout and stderr are combined and decoded lossily, so binary noise
    /// in diagnostics never aborts the call. There is no timeout; a hung
    /// external process blocks the caller (wrap in `tokio::time::timeout`
    /// if that matters).
    ///
    /// A non-zero exit becomes [`AdbError::CommandFailed`] which still
    /// carries the captured output.
    pub async fn execute<S: AsRef<str>>(
        &self,
        args: &[S],
        device: Option<&str>,
    ) -> AdbResult<String> {
        if args.is_empty() {
            return Err(AdbError::InvalidArgument {
                reason: "empty command".to_string(),
            });
        }

        let mut argv = vec![self.exe.display().to_string()];
        if let Some(id) = device {
            argv.push("-s".to_string());
            argv.push(id.to_string());
        }
        argv.extend(args.iter().map(|a| a.as_ref().to_string()));

        debug!("exec: {argv:?}");
        let output = Command::new(&self.exe)
            .args(&argv[1..])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AdbError::ExecutableNotFound {
                        path: self.exe.display().to_string(),
                    }
                } else {
                    AdbError::CommandSpawnFailed {
                        program: self.exe.display().to_string(),
                        source: e,
                    }
                }
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        let text = text.trim().to_string();

        if !output.status.success() {
            warn!("exec failed ({:?}): {argv:?}", output.status.code());
            return Err(AdbError::CommandFailed {
                exit_code: output.status.code(),
                argv,
                output: text,
            });
        }
        Ok(text)
    }

    /// Tokenize `line` with shell-word rules, then [`execute`](Self::execute).
    pub async fn execute_line(&self, line: &str, device: Option<&str>) -> AdbResult<String> {
        let args = split_shell_words(line)?;
        self.execute(&args, device).await
    }

    /// List connected devices and return a handle for each.
    pub async fn devices(&self) -> AdbResult<Vec<Device>> {
        let output = self.execute(&["devices"], None).await?;
        Ok(Self::parse_device_ids(&output)
            .into_iter()
            .map(|id| Device::new(id, self.clone()))
            .collect())
    }

    /// Extract device identifiers from `adb devices` output.
    ///
    /// Only lines of exactly two whitespace-separated tokens count; the
    /// header, trailing blanks and daemon-startup chatter all fall out.
    pub fn parse_device_ids(output: &str) -> Vec<String> {
        output
            .lines()
            .filter_map(|line| {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                match tokens.as_slice() {
                    [id, _state] => Some((*id).to_string()),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Split a command line into words the way a POSIX shell would: whitespace
/// separates words, single and double quotes group, backslash escapes the
/// next character outside single quotes.
pub fn split_shell_words(line: &str) -> AdbResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(AdbError::InvalidArgument {
                                reason: format!("unbalanced single quote in '{line}'"),
                            });
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c) => current.push(c),
                            None => {
                                return Err(AdbError::InvalidArgument {
                                    reason: format!("trailing backslash in '{line}'"),
                                });
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(AdbError::InvalidArgument {
                                reason: format!("unbalanced double quote in '{line}'"),
                            });
                        }
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => {
                        return Err(AdbError::InvalidArgument {
                            reason: format!("trailing backslash in '{line}'"),
                        });
                    }
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
