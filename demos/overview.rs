// Tour of the device API against every connected device.
// Run with: cargo run --example overview

use android_adb_manage::{Adb, BackupOptions, StdinPrompt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // One-time resolution; offers a platform-tools download when adb is
    // missing from PATH.
    let mut prompt = StdinPrompt;
    let adb = Adb::resolve(&mut prompt).await?;

    // Raw dispatch is available next to the typed API.
    let listing = adb.execute_line("devices -l", None).await?;
    println!("{listing}");

    for mut device in adb.devices().await? {
        println!("== {} ==", device.id());
        println!("model: {}", device.model().await?);
        println!("name:  {}", device.product_name().await?);
        println!("sdk:   {}", device.sdk_version().await?);

        let packages = device.packages().await?;
        println!("{} packages installed", packages.len());

        let settings = device.settings().await?;
        println!(
            "settings: {} system / {} global / {} secure",
            settings.system.len(),
            settings.global.len(),
            settings.secure.len()
        );

        for result in device
            .set_settings(&[
                "global.user_switcher_enabled=0",
                "secure.lock_screen_show_notifications=0",
            ])
            .await
        {
            if let Err(e) = result {
                eprintln!("setting failed: {e}");
            }
        }

        device
            .backup(&BackupOptions {
                shared_storage: true,
                apks: true,
                system: false,
                path: Some("device-backup.ab".into()),
            })
            .await?;
    }
    Ok(())
}
