use weather_core::{RenderBranch, WeatherView};

pub const PROMPT: &str = "Enter a city name to get weather information";

/// Text for whichever branch the view state selected.
pub fn branch_text(branch: &RenderBranch<'_>) -> String {
    match branch {
        RenderBranch::Loading => "Loading...".to_string(),
        RenderBranch::Error(msg) => format!("⚠ {msg}"),
        RenderBranch::Weather(view) => weather_text(view),
        RenderBranch::Prompt => PROMPT.to_string(),
    }
}

// Wind speed is m/s: requests always ask for metric units.
fn weather_text(view: &WeatherView) -> String {
    format!(
        "{}  {}°C  {}\n   Humidity    {}%\n   Wind speed  {} m/s",
        view.icon.symbol(),
        view.temperature_c,
        view.location_name,
        view.humidity_pct,
        view.wind_speed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::Icon;

    #[test]
    fn weather_branch_lists_all_readings() {
        let view = WeatherView {
            temperature_c: 18,
            humidity_pct: 60,
            wind_speed: 3.4,
            location_name: "London".into(),
            icon: Icon::Rain,
        };
        let text = branch_text(&RenderBranch::Weather(&view));

        assert!(text.starts_with("🌧  18°C  London"));
        assert!(text.contains("Humidity    60%"));
        assert!(text.contains("Wind speed  3.4 m/s"));
    }

    #[test]
    fn error_branch_shows_message() {
        assert_eq!(branch_text(&RenderBranch::Error("city not found")), "⚠ city not found");
    }

    #[test]
    fn prompt_and_loading_branches() {
        assert_eq!(branch_text(&RenderBranch::Prompt), PROMPT);
        assert_eq!(branch_text(&RenderBranch::Loading), "Loading...");
    }
}
