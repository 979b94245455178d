use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::auth::token_manager, config, error, info, spotify::SpotifyClient, utils, warning,
};

pub async fn devices() {
    let credential = match token_manager().current_token().await {
        Ok(Some(c)) => c,
        Ok(None) => error!("No stored credential. Please run voxplay login"),
        Err(e) => error!("Failed to load token. Please run voxplay login\n Error: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playback devices...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let spotify = SpotifyClient::new(config::spotify_apiurl());
    let result = spotify.list_devices(&credential.access_token).await;
    pb.finish_and_clear();

    match result {
        Ok(devices) if devices.is_empty() => {
            warning!("No devices found. Open Spotify on a device and try again.")
        }
        Ok(devices) => {
            info!("{} device(s) available, playback goes to the first", devices.len());
            println!("{}", Table::new(utils::device_table_rows(&devices)));
        }
        Err(e) => error!("Failed to fetch devices: {}", e),
    }
}
