use thiserror::Error;

/// Failure of a weather or geocoding lookup.
///
/// Both variants display as the bare message so the front end can show it
/// as-is in place of the weather result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success `cod`; carries its message.
    #[error("{0}")]
    Provider(String),

    /// Network failure, unreadable body or unexpected payload shape.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(format!("Failed to reach weather provider: {err}"))
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Transport(format!("Failed to parse weather provider response: {err}"))
    }
}
