// Kiosk-style tablet provisioning: debloat, lock down the UI and pin a
// single home app. Mirrors a flow used on retail tablets.
// Run with: cargo run --example provision -- path/to/app.apk

use android_adb_manage::{Adb, StdinPrompt};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let apk = match std::env::args().nth(1) {
        Some(p) if Path::new(&p).exists() && p.ends_with(".apk") => p,
        Some(p) => {
            eprintln!("'{p}' is not an existing .apk file");
            std::process::exit(1);
        }
        None => {
            eprintln!("usage: provision <path/to/app.apk>");
            std::process::exit(1);
        }
    };

    let mut prompt = StdinPrompt;
    let adb = Adb::resolve(&mut prompt).await?;

    for device in adb.devices().await? {
        println!("provisioning {} ({})", device.id(), device.model().await?);

        for result in device
            .set_settings(&[
                "global.heads_up_notifications_enabled=0",
                "global.install_non_market_apps=1",
                "system.screen_off_timeout=600000",
                "secure.lock_screen_allow_private_notifications=0",
                "secure.lock_screen_show_notifications=0",
                "global.user_switcher_enabled=0",
                "secure.location_mode=0",
            ])
            .await
        {
            if let Err(e) = result {
                eprintln!("setting failed: {e}");
            }
        }

        let failures = device
            .debloat_google()
            .await?
            .into_iter()
            .filter(Result::is_err)
            .count();
        if failures > 0 {
            eprintln!("{failures} debloat uninstalls failed (see log)");
        }

        device.install_package(&apk).await?;
        device.disable_lock_screen().await?;
        device.disable_wifi().await?;
        device.enable_mobile_data().await?;
        device
            .grant_permission("com.example.kiosk", "android.permission.WRITE_EXTERNAL_STORAGE")
            .await?;
        device.set_home_app("com.example.kiosk").await?;
        device.uninstall_packages(&["com.tblenovo.launcher"]).await;
    }
    Ok(())
}
