// Tests for the executor / registry / device-handle stack.
// Focus: argv construction, failure classification, bulk-op isolation.
// No device needed: substitute executables (echo, sh, generated scripts)
// stand in for adb so the exact issued argv can be observed.

#[cfg(test)]
mod executor_tests {
    use crate::adb::error::AdbError;
    use crate::adb::exec::Adb;

    // ============================================================
    // PROCESS EXECUTION
    // ============================================================

    #[tokio::test]
    async fn execute_captures_output() {
        let adb = Adb::new("echo");
        let out = adb.execute(&["hello", "world"], None).await.unwrap();
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn execute_inserts_device_selector_after_executable() {
        let adb = Adb::new("echo");
        let out = adb
            .execute(&["shell", "ls"], Some("emulator-5554"))
            .await
            .unwrap();
        assert_eq!(out, "-s emulator-5554 shell ls");
    }

    #[tokio::test]
    async fn execute_rejects_empty_command() {
        let adb = Adb::new("echo");
        let err = adb.execute::<&str>(&[], None).await.unwrap_err();
        assert!(matches!(err, AdbError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn nonzero_exit_keeps_captured_output() {
        let adb = Adb::new("sh");
        let err = adb
            .execute(&["-c", "echo boom; exit 3"], None)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(3), "exit code must be reported");
        assert_eq!(err.output(), Some("boom"), "output must survive failure");
    }

    #[tokio::test]
    async fn stderr_is_merged_into_output() {
        let adb = Adb::new("sh");
        let out = adb
            .execute(&["-c", "echo out; echo err 1>&2"], None)
            .await
            .unwrap();
        assert!(out.contains("out") && out.contains("err"), "got: {out}");
    }

    #[tokio::test]
    async fn missing_executable_is_not_command_failed() {
        let adb = Adb::new("/no/such/dir/adb-missing");
        let err = adb.execute(&["devices"], None).await.unwrap_err();
        assert!(matches!(err, AdbError::ExecutableNotFound { .. }));
    }

    #[tokio::test]
    async fn execute_line_tokenizes_before_running() {
        let adb = Adb::new("echo");
        let out = adb
            .execute_line(r#"push "a file.txt" /sdcard"#, None)
            .await
            .unwrap();
        assert_eq!(out, "push a file.txt /sdcard");
    }
}

#[cfg(test)]
mod dispatch_tests {
    use crate::adb::device::Device;
    use crate::adb::error::AdbError;
    use crate::adb::exec::Adb;

    fn echo_device() -> Device {
        Device::new("serial", Adb::new("echo"))
    }

    // ============================================================
    // REGISTRY DISPATCH THROUGH A DEVICE HANDLE
    // ============================================================

    #[tokio::test]
    async fn arity_zero_command_runs_fixed_template() {
        let out = echo_device().enable_wifi().await.unwrap();
        assert_eq!(out, "-s serial shell svc wifi enable");
    }

    #[tokio::test]
    async fn arity_two_command_substitutes_in_argument_order() {
        let out = echo_device()
            .grant_permission("pkg", "perm")
            .await
            .unwrap();
        assert_eq!(out, "-s serial shell pm grant pkg perm");
    }

    #[tokio::test]
    async fn tap_renders_coordinates() {
        let out = echo_device().tap(120, 640).await.unwrap();
        assert_eq!(out, "-s serial shell input tap 120 640");
    }

    #[tokio::test]
    async fn unknown_command_is_invalid_argument() {
        let err = echo_device().run("reboot_flux", &[]).await.unwrap_err();
        assert!(matches!(err, AdbError::InvalidArgument { .. }));
    }

    // ============================================================
    // SETTINGS
    // ============================================================

    #[tokio::test]
    async fn set_settings_issues_one_put_per_entry() {
        let device = echo_device();
        let results = device
            .set_settings(&[
                "global.user_switcher_enabled=0",
                "system.screen_off_timeout 600000",
            ])
            .await;
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_deref().unwrap(),
            "-s serial shell settings put global user_switcher_enabled 0"
        );
        assert_eq!(
            results[1].as_deref().unwrap(),
            "-s serial shell settings put system screen_off_timeout 600000"
        );
    }

    #[tokio::test]
    async fn malformed_setting_does_not_stop_the_rest() {
        let device = echo_device();
        let results = device.set_settings(&["not-a-setting", "secure.location_mode=0"]).await;
        assert!(matches!(results[0], Err(AdbError::InvalidArgument { .. })));
        assert_eq!(
            results[1].as_deref().unwrap(),
            "-s serial shell settings put secure location_mode 0"
        );
    }
}

#[cfg(test)]
mod bulk_tests {
    use crate::adb::device::Device;
    use crate::adb::exec::Adb;

    // ============================================================
    // BULK OPERATIONS: ORDERING, SKIPS, FAILURE ISOLATION
    // ============================================================

    #[tokio::test]
    async fn uninstall_skips_do_not_delete_packages() {
        let mut device = Device::new("serial", Adb::new("echo"));
        device.do_not_delete.insert("b".to_string());

        let results = device.uninstall_packages(&["a", "b", "c"]).await;
        assert_eq!(results.len(), 2, "only a and c may be attempted");
        assert_eq!(
            results[0].as_deref().unwrap(),
            "-s serial uninstall --user 0 a"
        );
        assert_eq!(
            results[1].as_deref().unwrap(),
            "-s serial uninstall --user 0 c"
        );
    }

    #[tokio::test]
    async fn install_failure_does_not_halt_the_sequence() {
        // `sh` rejects every rendered install command, so each item fails
        // independently; all of them must still be attempted.
        let device = Device::new("serial", Adb::new("sh"));
        let results = device.install_packages(&["one.apk", "two.apk"]).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_err()));
    }

    #[tokio::test]
    async fn grant_permissions_pairs_package_with_each_permission() {
        let device = Device::new("serial", Adb::new("echo"));
        let results = device
            .grant_permissions("com.example", &["android.permission.CAMERA"])
            .await;
        assert_eq!(
            results[0].as_deref().unwrap(),
            "-s serial shell pm grant com.example android.permission.CAMERA"
        );
    }

    #[tokio::test]
    async fn push_files_targets_one_device_directory() {
        let device = Device::new("serial", Adb::new("echo"));
        let results = device.push_files(&["a.txt", "b.txt"], "/sdcard").await;
        assert_eq!(results[0].as_deref().unwrap(), "-s serial push a.txt /sdcard");
        assert_eq!(results[1].as_deref().unwrap(), "-s serial push b.txt /sdcard");
    }
}

#[cfg(test)]
mod backup_tests {
    use crate::adb::device::Device;
    use crate::adb::error::AdbError;
    use crate::adb::exec::Adb;
    use crate::adb::types::BackupOptions;
    use std::path::PathBuf;

    // ============================================================
    // BACKUP VALIDATION
    // ============================================================

    #[tokio::test]
    async fn backup_missing_directory_fails_before_spawn() {
        // The executable does not exist either; seeing DirectoryNotFound
        // instead of ExecutableNotFound proves nothing was spawned.
        let device = Device::new("serial", Adb::new("/no/such/dir/adb-missing"));
        let options = BackupOptions {
            path: Some(PathBuf::from("/no/such/dir/backup.ab")),
            ..Default::default()
        };
        let err = device.backup(&options).await.unwrap_err();
        assert!(matches!(err, AdbError::DirectoryNotFound { .. }));
    }

    #[tokio::test]
    async fn backup_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let device = Device::new("serial", Adb::new("echo"));
        let options = BackupOptions {
            path: Some(dir.path().join("backup.txt")),
            ..Default::default()
        };
        let err = device.backup(&options).await.unwrap_err();
        assert!(matches!(err, AdbError::InvalidExtension { .. }));
    }

    #[tokio::test]
    async fn backup_accumulates_selected_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.ab");
        let device = Device::new("serial", Adb::new("echo"));
        let options = BackupOptions {
            shared_storage: true,
            apks: true,
            system: false,
            path: Some(path.clone()),
        };
        let out = device.backup(&options).await.unwrap();
        assert_eq!(
            out,
            format!("-s serial backup -all -shared -apk -f {}", path.display())
        );
    }

    #[tokio::test]
    async fn backup_without_path_skips_validation() {
        let device = Device::new("serial", Adb::new("echo"));
        let out = device.backup(&BackupOptions::default()).await.unwrap();
        assert_eq!(out, "-s serial backup -all");
    }
}

#[cfg(all(test, unix))]
mod discovery_tests {
    use crate::adb::exec::Adb;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    // ============================================================
    // DEVICE DISCOVERY AND CACHED QUERIES (scripted fake adb)
    // ============================================================

    fn fake_adb(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let script = dir.path().join("fake-adb");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[tokio::test]
    async fn devices_builds_one_handle_per_listed_device() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_adb(
            &dir,
            r"printf 'List of devices attached\nemulator-5554\tdevice\n\n'",
        );
        let devices = Adb::new(script).devices().await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id(), "emulator-5554");
    }

    #[tokio::test]
    async fn devices_with_empty_listing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_adb(&dir, r"printf 'List of devices attached\n\n'");
        assert!(Adb::new(script).devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settings_aggregates_all_three_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        // argv: -s <id> shell settings list <namespace>; echo one line
        // back per namespace so the triple can be told apart.
        let script = fake_adb(&dir, r#"echo "key_$6=1""#);
        let mut device = crate::adb::device::Device::new("serial", Adb::new(script));

        let settings = device.settings().await.unwrap().clone();
        assert_eq!(settings.system, vec!["key_system=1"]);
        assert_eq!(settings.global, vec!["key_global=1"]);
        assert_eq!(settings.secure, vec!["key_secure=1"]);
        assert_eq!(device.cached_settings(), &settings);
    }

    #[tokio::test]
    async fn packages_concatenates_system_then_third_party() {
        let dir = tempfile::tempdir().unwrap();
        // $7 is the trailing pm flag (-f system, -3 third-party).
        let script = fake_adb(
            &dir,
            r#"if [ "$7" = "-3" ]; then echo "package:com.example.third"; else echo "package:com.android.system"; fi"#,
        );
        let mut device = crate::adb::device::Device::new("serial", Adb::new(script));
        let packages = device.packages().await.unwrap();
        assert_eq!(
            packages,
            vec!["package:com.android.system", "package:com.example.third"]
        );
    }
}
