//! View state for the weather lookup.
//!
//! All mutation goes through `begin_*` / `finish_*` pairs. A `begin_*` call
//! hands out a ticket for the request it starts (or `None` when there is
//! nothing to fetch); the matching `finish_*` applies the outcome. Tickets are
//! sequence numbers per flow, which is what allows responses overtaken by a
//! newer request to be recognised.

use crate::{WeatherError, model::MAX_SUGGESTIONS, model::WeatherView};

/// What to do with a response that arrives after a newer request of the same
/// kind was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Ignore it; only the latest request may update the state.
    #[default]
    DiscardStale,
    /// Apply it anyway, so whichever response lands last is shown.
    LastWriteWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket(u64);

/// The single view to draw for the result area.
///
/// Precedence: loading, then error, then weather, then the prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderBranch<'a> {
    Loading,
    Error(&'a str),
    Weather(&'a WeatherView),
    Prompt,
}

#[derive(Debug, Default)]
pub struct ViewState {
    query: String,
    suggestions: Vec<String>,
    loading: bool,
    error: Option<String>,
    weather: Option<WeatherView>,
    weather_seq: u64,
    suggestion_seq: u64,
    policy: StalePolicy,
}

impl ViewState {
    pub fn new(policy: StalePolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn weather(&self) -> Option<&WeatherView> {
        self.weather.as_ref()
    }

    pub fn render(&self) -> RenderBranch<'_> {
        if self.loading {
            RenderBranch::Loading
        } else if let Some(err) = &self.error {
            RenderBranch::Error(err)
        } else if let Some(view) = &self.weather {
            RenderBranch::Weather(view)
        } else {
            RenderBranch::Prompt
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Empty the suggestion list. Suggestion requests still in flight become
    /// stale.
    pub fn clear_suggestions(&mut self) {
        self.suggestion_seq += 1;
        self.suggestions.clear();
    }

    /// Start a weather fetch for `city`. An empty name starts nothing and
    /// leaves the state untouched.
    pub fn begin_weather(&mut self, city: &str) -> Option<WeatherTicket> {
        if city.is_empty() {
            return None;
        }

        self.weather_seq += 1;
        self.loading = true;
        self.error = None;
        Some(WeatherTicket(self.weather_seq))
    }

    /// Apply a weather outcome. Returns `false` when it was discarded as stale.
    pub fn finish_weather(
        &mut self,
        ticket: WeatherTicket,
        outcome: Result<WeatherView, WeatherError>,
    ) -> bool {
        if self.is_stale(ticket.0, self.weather_seq) {
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(view) => self.weather = Some(view),
            Err(err) => {
                self.error = Some(err.to_string());
                self.weather = None;
            }
        }
        true
    }

    /// Start a suggestion fetch for `query`. A blank query clears the list and
    /// starts nothing.
    pub fn begin_suggestions(&mut self, query: &str) -> Option<SuggestionTicket> {
        if query.trim().is_empty() {
            self.clear_suggestions();
            return None;
        }

        self.suggestion_seq += 1;
        Some(SuggestionTicket(self.suggestion_seq))
    }

    /// Apply a suggestion outcome. Failures clear the list and never touch the
    /// result area. Returns `false` when discarded as stale.
    pub fn finish_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        outcome: Result<Vec<String>, WeatherError>,
    ) -> bool {
        if self.is_stale(ticket.0, self.suggestion_seq) {
            return false;
        }

        match outcome {
            Ok(mut labels) => {
                labels.truncate(MAX_SUGGESTIONS);
                self.suggestions = labels;
            }
            Err(_) => self.suggestions.clear(),
        }
        true
    }

    fn is_stale(&self, seq: u64, latest: u64) -> bool {
        self.policy == StalePolicy::DiscardStale && seq < latest
    }
}
