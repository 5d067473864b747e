use serde::{Deserialize, Serialize};

/// Icon shown next to the temperature.
///
/// The provider reports conditions as codes like `"09d"`; only a fixed subset
/// is mapped, everything else renders as [`Icon::Clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
    Mist,
}

impl Icon {
    /// Look up a provider condition code. `None` for codes outside the table.
    pub fn from_code(code: &str) -> Option<Icon> {
        let icon = match code {
            "01d" | "01n" => Icon::Clear,
            "02d" | "02n" | "03d" | "03n" => Icon::Cloud,
            "04d" | "04n" => Icon::Drizzle,
            "09d" | "09n" | "11d" | "11n" => Icon::Rain,
            "13d" | "13n" => Icon::Snow,
            "50d" | "50n" => Icon::Mist,
            _ => return None,
        };
        Some(icon)
    }

    /// Same as [`Icon::from_code`], falling back to the default icon for
    /// unknown or missing codes.
    pub fn from_code_or_default(code: Option<&str>) -> Icon {
        code.and_then(Icon::from_code).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Clear => "clear",
            Icon::Cloud => "cloud",
            Icon::Drizzle => "drizzle",
            Icon::Rain => "rain",
            Icon::Snow => "snow",
            Icon::Mist => "mist",
        }
    }

    /// Terminal glyph for the icon.
    pub fn symbol(&self) -> &'static str {
        match self {
            Icon::Clear => "☀",
            Icon::Cloud => "☁",
            Icon::Drizzle => "🌦",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
            Icon::Mist => "🌫",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
