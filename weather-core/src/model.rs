use serde::{Deserialize, Serialize};

use crate::icon::Icon;

/// Upper bound on the number of city suggestions kept at once.
pub const MAX_SUGGESTIONS: usize = 5;

/// Display-ready weather for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    /// Whole degrees Celsius, floored.
    pub temperature_c: i64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub location_name: String,
    pub icon: Icon,
}

/// One geocoding hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityMatch {
    pub name: String,
    /// ISO country code, e.g. "FR".
    pub country: String,
}

impl CityMatch {
    /// Suggestion label, "Name, CountryCode".
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_joins_name_and_country() {
        let hit = CityMatch { name: "Paris".into(), country: "FR".into() };
        assert_eq!(hit.label(), "Paris, FR");
    }

    #[test]
    fn label_without_country_is_just_the_name() {
        let hit = CityMatch { name: "Atlantis".into(), country: String::new() };
        assert_eq!(hit.label(), "Atlantis");
    }
}
