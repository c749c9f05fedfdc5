use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use super::error::{AdbError, AdbResult};
use super::exec::Adb;
use super::packages;
use super::registry;
use super::settings::SettingEntry;
use super::types::{BackupOptions, DeviceSettings};

/// One connected device.
///
/// Every operation runs through the owning [`Adb`] executable with this
/// device's identifier, so multiple handles can coexist over one adb
/// installation. The `*_packages` and `settings` fields are snapshots of
/// the last matching query; they start empty and are private to this
/// handle (no state is shared between handles).
#[derive(Debug, Clone)]
pub struct Device {
    id: String,
    adb: Adb,
    /// Packages that `uninstall_packages` must never touch.
    pub do_not_delete: HashSet<String>,
    settings: DeviceSettings,
    system_packages: Vec<String>,
    third_party_packages: Vec<String>,
}

impl Device {
    pub fn new(id: impl Into<String>, adb: Adb) -> Self {
        Self {
            id: id.into(),
            adb,
            do_not_delete: HashSet::new(),
            settings: DeviceSettings::default(),
            system_packages: Vec::new(),
            third_party_packages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Dispatch a registered command by name, binding it to this device.
    pub async fn run(&self, name: &str, args: &[&str]) -> AdbResult<String> {
        let spec = registry::spec(name).ok_or_else(|| AdbError::InvalidArgument {
            reason: format!("unknown command '{name}'"),
        })?;
        let argv = spec.render(args)?;
        self.adb.execute(&argv, Some(&self.id)).await
    }

    // ---- device properties --------------------------------------------

    pub async fn getprop(&self, prop: &str) -> AdbResult<String> {
        self.run("getprop", &[prop]).await
    }

    pub async fn model(&self) -> AdbResult<String> {
        self.getprop("ro.product.model").await
    }

    pub async fn product_name(&self) -> AdbResult<String> {
        self.getprop("ro.product.name").await
    }

    pub async fn sdk_version(&self) -> AdbResult<String> {
        self.getprop("ro.build.version.sdk").await
    }

    // ---- connectivity and lock screen ---------------------------------

    pub async fn enable_wifi(&self) -> AdbResult<String> {
        self.run("enable_wifi", &[]).await
    }

    pub async fn disable_wifi(&self) -> AdbResult<String> {
        self.run("disable_wifi", &[]).await
    }

    pub async fn enable_mobile_data(&self) -> AdbResult<String> {
        self.run("enable_mobile_data", &[]).await
    }

    pub async fn disable_mobile_data(&self) -> AdbResult<String> {
        self.run("disable_mobile_data", &[]).await
    }

    pub async fn set_password(&self, password: &str) -> AdbResult<String> {
        self.run("set_password", &[password]).await
    }

    pub async fn clear_password(&self, old_password: &str) -> AdbResult<String> {
        self.run("clear_password", &[old_password]).await
    }

    pub async fn disable_lock_screen(&self) -> AdbResult<String> {
        self.run("disable_lock_screen", &[]).await
    }

    pub async fn expand_notifications(&self) -> AdbResult<String> {
        self.run("expand_notifications", &[]).await
    }

    pub async fn tap(&self, x: u32, y: u32) -> AdbResult<String> {
        self.run("tap", &[&x.to_string(), &y.to_string()]).await
    }

    pub async fn set_home_app(&self, package: &str) -> AdbResult<String> {
        self.run("set_home_app", &[package]).await
    }

    /// Broadcast a master-clear intent. Only works on rooted devices.
    pub async fn factory_reset(&self) -> AdbResult<String> {
        self.run("factory_reset", &[]).await
    }

    // ---- settings -----------------------------------------------------

    pub async fn system_settings(&self) -> AdbResult<String> {
        self.run("get_system_settings", &[]).await
    }

    pub async fn global_settings(&self) -> AdbResult<String> {
        self.run("get_global_settings", &[]).await
    }

    pub async fn secure_settings(&self) -> AdbResult<String> {
        self.run("get_secure_settings", &[]).await
    }

    /// Query all three settings namespaces, cache and return the aggregate.
    pub async fn settings(&mut self) -> AdbResult<&DeviceSettings> {
        self.settings = DeviceSettings {
            system: split_lines(&self.system_settings().await?),
            global: split_lines(&self.global_settings().await?),
            secure: split_lines(&self.secure_settings().await?),
        };
        Ok(&self.settings)
    }

    /// The settings snapshot from the last [`settings`](Self::settings) call.
    pub fn cached_settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Apply settings entries written as `namespace.key=value` (or the
    /// space-separated forms, see [`SettingEntry::parse`]), one
    /// `settings put` per entry. A malformed or failing entry does not
    /// stop the rest.
    pub async fn set_settings<S: AsRef<str>>(&self, entries: &[S]) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = match SettingEntry::parse(entry.as_ref()) {
                Ok(s) => {
                    self.run("put_setting", &[&s.namespace, &s.key, &s.value])
                        .await
                }
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                warn!("[{}] set_settings '{}': {e}", self.id, entry.as_ref());
            }
            results.push(result);
        }
        results
    }

    // ---- packages -----------------------------------------------------

    pub async fn system_packages(&mut self) -> AdbResult<Vec<String>> {
        self.system_packages = split_lines(&self.run("get_system_packages", &[]).await?);
        Ok(self.system_packages.clone())
    }

    pub async fn third_party_packages(&mut self) -> AdbResult<Vec<String>> {
        self.third_party_packages = split_lines(&self.run("get_third_party_packages", &[]).await?);
        Ok(self.third_party_packages.clone())
    }

    /// System packages followed by third-party packages, refreshing both
    /// caches.
    pub async fn packages(&mut self) -> AdbResult<Vec<String>> {
        let mut packages = self.system_packages().await?;
        packages.extend(self.third_party_packages().await?);
        Ok(packages)
    }

    pub async fn install_package(&self, path: &str) -> AdbResult<String> {
        self.run("install", &[path]).await
    }

    pub async fn uninstall_package(&self, package: &str) -> AdbResult<String> {
        self.run("uninstall", &[package]).await
    }

    /// Install apks one by one. Failures are isolated per item: each apk
    /// is attempted regardless of what happened to the ones before it.
    pub async fn install_packages<S: AsRef<str>>(&self, paths: &[S]) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            info!("[{}] installing {path}", self.id);
            let result = self.install_package(path).await;
            if let Err(e) = &result {
                warn!("[{}] install {path}: {e}", self.id);
            }
            results.push(result);
        }
        results
    }

    /// Uninstall packages one by one, skipping anything listed in
    /// [`do_not_delete`](Self::do_not_delete). Failures are isolated per
    /// item.
    pub async fn uninstall_packages<S: AsRef<str>>(&self, packages: &[S]) -> Vec<AdbResult<String>> {
        let mut results = Vec::new();
        for package in packages {
            let package = package.as_ref();
            if self.do_not_delete.contains(package) {
                info!("[{}] keeping {package} (do-not-delete)", self.id);
                continue;
            }
            info!("[{}] uninstalling {package}", self.id);
            let result = self.uninstall_package(package).await;
            if let Err(e) = &result {
                warn!("[{}] uninstall {package}: {e}", self.id);
            }
            results.push(result);
        }
        results
    }

    /// Uninstall the bundled Google-app debloat list.
    pub async fn debloat_google(&self) -> AdbResult<Vec<AdbResult<String>>> {
        let names = packages::parse_package_names(packages::GOOGLE_PACKAGE_LIST).map_err(|e| {
            AdbError::FileFormat {
                path: "lists/google.json".into(),
                reason: e.to_string(),
            }
        })?;
        Ok(self.uninstall_packages(&names).await)
    }

    // ---- permissions --------------------------------------------------

    pub async fn grant_permission(&self, package: &str, permission: &str) -> AdbResult<String> {
        self.run("grant_permission", &[package, permission]).await
    }

    pub async fn revoke_permission(&self, package: &str, permission: &str) -> AdbResult<String> {
        self.run("revoke_permission", &[package, permission]).await
    }

    pub async fn grant_permissions<S: AsRef<str>>(
        &self,
        package: &str,
        permissions: &[S],
    ) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(permissions.len());
        for permission in permissions {
            let result = self.grant_permission(package, permission.as_ref()).await;
            if let Err(e) = &result {
                warn!("[{}] grant {} {}: {e}", self.id, package, permission.as_ref());
            }
            results.push(result);
        }
        results
    }

    pub async fn revoke_permissions<S: AsRef<str>>(
        &self,
        package: &str,
        permissions: &[S],
    ) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(permissions.len());
        for permission in permissions {
            let result = self.revoke_permission(package, permission.as_ref()).await;
            if let Err(e) = &result {
                warn!("[{}] revoke {} {}: {e}", self.id, package, permission.as_ref());
            }
            results.push(result);
        }
        results
    }

    // ---- files and backup ---------------------------------------------

    pub async fn push_file(&self, local: &str, device_path: &str) -> AdbResult<String> {
        self.run("push", &[local, device_path]).await
    }

    pub async fn pull_file(&self, device_path: &str, local: &str) -> AdbResult<String> {
        self.run("pull", &[device_path, local]).await
    }

    /// Push local files to one device directory, one `push` per file.
    pub async fn push_files<S: AsRef<str>>(
        &self,
        local_files: &[S],
        device_path: &str,
    ) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(local_files.len());
        for file in local_files {
            let result = self.push_file(file.as_ref(), device_path).await;
            if let Err(e) = &result {
                warn!("[{}] push {}: {e}", self.id, file.as_ref());
            }
            results.push(result);
        }
        results
    }

    /// Pull device files into one local directory, one `pull` per file.
    pub async fn pull_files<S: AsRef<str>>(
        &self,
        device_files: &[S],
        local_path: &str,
    ) -> Vec<AdbResult<String>> {
        let mut results = Vec::with_capacity(device_files.len());
        for file in device_files {
            let result = self.pull_file(file.as_ref(), local_path).await;
            if let Err(e) = &result {
                warn!("[{}] pull {}: {e}", self.id, file.as_ref());
            }
            results.push(result);
        }
        results
    }

    /// Run `adb backup -all` with the selected extras. When a destination
    /// path is given, its directory must exist and the file must end in
    /// `.ab`; both are checked before anything is spawned.
    pub async fn backup(&self, options: &BackupOptions) -> AdbResult<String> {
        let mut argv = vec!["backup", "-all"];
        if options.shared_storage {
            argv.push("-shared");
        }
        if options.apks {
            argv.push("-apk");
        }
        if options.system {
            argv.push("-system");
        }

        let rendered_path;
        if let Some(path) = &options.path {
            let directory = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            if !directory.is_dir() {
                return Err(AdbError::DirectoryNotFound {
                    path: directory.to_path_buf(),
                });
            }
            if path.extension().and_then(|e| e.to_str()) != Some("ab") {
                return Err(AdbError::InvalidExtension {
                    path: path.clone(),
                    expected: ".ab".to_string(),
                });
            }
            rendered_path = path.display().to_string();
            argv.push("-f");
            argv.push(&rendered_path);
        }

        self.adb.execute(&argv, Some(&self.id)).await
    }

    pub async fn restore(&self, backup_file: &str) -> AdbResult<String> {
        self.run("restore", &[backup_file]).await
    }
}

fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|l| l.trim_end().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
