//! Application configuration, managed by confy

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted state files
    pub data_directory: String,
    /// JSON file with the motivational quote list (an array of strings)
    pub quotes_file: String,
    /// Seconds before the displayed quote is rotated
    pub quote_interval_secs: u64,
    /// Fire a desktop notification when a badge is earned
    pub desktop_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir();
        let quotes_file = data_dir.join("quotes.json");
        Self {
            data_directory: data_dir.to_string_lossy().into_owned(),
            quotes_file: quotes_file.to_string_lossy().into_owned(),
            quote_interval_secs: 300,
            desktop_notifications: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("", "", "ember") {
        return dirs.data_dir().to_path_buf();
    }
    dirs::home_dir()
        .map(|home| home.join(".ember"))
        .unwrap_or_else(|| PathBuf::from("."))
}
