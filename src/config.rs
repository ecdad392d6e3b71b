use std::fs;
use iced::Theme;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
/// Environment override for the backend base URL.
pub const API_URL_ENV: &str = "ESCOLAR_API_URL";

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub theme_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            theme_name: "Light".to_string(),
        }
    }
}

pub fn load_config() -> Config {
    fs::read_to_string(CONFIG_FILE)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default()
}

pub fn save_config(theme: &Theme, api_base_url: &str) -> std::io::Result<()> {
    let config = Config {
        api_base_url: api_base_url.to_string(),
        theme_name: theme_to_str(theme).to_string(),
    };
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(CONFIG_FILE, json)?;
    Ok(())
}

/// Configured URL, unless the environment says otherwise.
pub fn api_base_url(config: &Config) -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| config.api_base_url.clone())
}

pub fn theme_from_str(name: &str) -> Option<Theme> {
    Theme::ALL
        .iter()
        .find(|t| theme_to_str(t).eq_ignore_ascii_case(name))
        .cloned()
}

pub fn theme_to_str(theme: &Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
        Theme::Dracula => "Dracula",
        Theme::Nord => "Nord",
        Theme::SolarizedLight => "SolarizedLight",
        Theme::SolarizedDark => "SolarizedDark",
        Theme::GruvboxLight => "GruvboxLight",
        Theme::GruvboxDark => "GruvboxDark",
        Theme::CatppuccinLatte => "CatppuccinLatte",
        Theme::CatppuccinFrappe => "CatppuccinFrappe",
        Theme::CatppuccinMacchiato => "CatppuccinMacchiato",
        Theme::CatppuccinMocha => "CatppuccinMocha",
        Theme::TokyoNight => "TokyoNight",
        Theme::TokyoNightStorm => "TokyoNightStorm",
        Theme::TokyoNightLight => "TokyoNightLight",
        Theme::KanagawaWave => "KanagawaWave",
        Theme::KanagawaDragon => "KanagawaDragon",
        Theme::KanagawaLotus => "KanagawaLotus",
        Theme::Moonfly => "Moonfly",
        Theme::Nightfly => "Nightfly",
        Theme::Oxocarbon => "Oxocarbon",
        Theme::Ferra => "Ferra",
        _ => "Unknown",
    }
}
