use crate::types::{Device, DeviceTableRow};

/// Builds the catalog search query for a play command:
/// `"<song> artist:<artist>"`, or just the song when no artist was named.
pub fn search_query(song_name: &str, artist_name: Option<&str>) -> String {
    match artist_name {
        Some(artist) => format!("{} artist:{}", song_name, artist),
        None => song_name.to_string(),
    }
}

pub fn device_table_rows(devices: &[Device]) -> Vec<DeviceTableRow> {
    devices
        .iter()
        .map(|d| DeviceTableRow {
            name: d.name.clone(),
            kind: d.kind.clone(),
            active: if d.is_active { "yes" } else { "" }.to_string(),
            id: d.id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Root-mean-square energy of a run of 16-bit samples.
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt()
}
