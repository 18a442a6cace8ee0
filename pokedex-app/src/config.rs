use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
/// config.json
use std::path::PathBuf;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    pub vsync: bool,
    pub framerate: u64,
}

#[cfg(target_os = "linux")]
pub fn config_dir() -> PathBuf {
    if let Some(path) = dirs::home_dir() {
        return path.join(".local/pokedex/");
    }

    PathBuf::from("./")
}

#[cfg(target_os = "windows")]
pub fn config_dir() -> PathBuf {
    if let Some(path) = dirs::home_dir() {
        return path.join("pokedex/");
    }

    PathBuf::from("./")
}

#[cfg(target_os = "macos")]
pub fn config_dir() -> PathBuf {
    if let Some(path) = dirs::home_dir() {
        return path.join("Library/Application Support/pokedex/");
    }

    PathBuf::from("./")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::from("https://graphql-pokemon2.vercel.app"),
            page_size: 151,
            vsync: true,
            framerate: 165,
        }
    }
}

impl Config {
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(config_dir())?;
        serde_json::to_writer(&fs::File::create(config_dir().join("config.json"))?, self)?;
        Ok(())
    }
}
