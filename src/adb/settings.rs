//! Parsing of `settings put` entries written in the compact
//! `namespace.key=value` form used by provisioning scripts.

use super::error::{AdbError, AdbResult};

/// One parsed settings assignment: `settings put <namespace> <key> <value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl SettingEntry {
    /// Parse an entry of one of these shapes:
    ///
    /// a) `namespace.key=value`
    /// b) `namespace.key value`
    /// c) `namespace.key.sub_key value`
    ///
    /// The first `=` separates key from value; entries without `=` split on
    /// the last space instead. The remainder splits on the first `.` into
    /// namespace and key, so dotted sub-keys survive intact.
    pub fn parse(entry: &str) -> AdbResult<Self> {
        let entry = entry.trim();
        let (head, value) = if let Some((head, value)) = entry.split_once('=') {
            (head, value)
        } else if let Some((head, value)) = entry.rsplit_once(' ') {
            (head, value)
        } else {
            return Err(AdbError::InvalidArgument {
                reason: format!("setting '{entry}' has no '=' or space separator"),
            });
        };

        let (namespace, key) = head.trim().split_once('.').ok_or_else(|| {
            AdbError::InvalidArgument {
                reason: format!("setting '{entry}' is missing a 'namespace.key' prefix"),
            }
        })?;
        if namespace.is_empty() || key.is_empty() {
            return Err(AdbError::InvalidArgument {
                reason: format!("setting '{entry}' has an empty namespace or key"),
            });
        }

        Ok(SettingEntry {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}
