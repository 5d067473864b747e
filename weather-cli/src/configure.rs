use anyhow::{Context, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::Config;

/// Prompt for the API key and default city, then save them.
///
/// Reads the file without the environment override so an exported key is
/// never written to disk.
pub fn run() -> Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.api_key = Some(api_key.to_string());
    }
    config.default_city = default_city.trim().to_string();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
