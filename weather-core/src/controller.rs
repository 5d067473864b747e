use tracing::{info, warn};

use crate::{
    Config,
    model::{CityMatch, MAX_SUGGESTIONS},
    provider::{WeatherProvider, provider_from_config},
    state::{RenderBranch, StalePolicy, ViewState},
};

/// Called with the view state once a weather request has been issued and
/// before its response is awaited.
pub type LoadingHook = Box<dyn Fn(&ViewState) + Send + Sync>;

/// Owns the view state and runs fetches against a provider.
///
/// Commands await their request before returning, so a controller used from
/// one task never sees overlapping responses. A [`LoadingHook`] lets the front
/// end draw the loading state while a weather request is in flight. Front
/// ends that want overlap drive [`ViewState`]'s `begin_*`/`finish_*` pairs
/// directly.
pub struct Controller {
    provider: Box<dyn WeatherProvider>,
    state: ViewState,
    default_city: String,
    on_loading: Option<LoadingHook>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("provider", &self.provider)
            .field("state", &self.state)
            .field("default_city", &self.default_city)
            .field("on_loading", &self.on_loading.is_some())
            .finish()
    }
}

impl Controller {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        default_city: impl Into<String>,
        policy: StalePolicy,
    ) -> Self {
        Self {
            provider,
            state: ViewState::new(policy),
            default_city: default_city.into(),
            on_loading: None,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(provider, config.default_city.clone(), config.stale_policy()))
    }

    /// Install a hook run each time a weather request goes out.
    pub fn on_loading(mut self, hook: impl Fn(&ViewState) + Send + Sync + 'static) -> Self {
        self.on_loading = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn render(&self) -> RenderBranch<'_> {
        self.state.render()
    }

    /// Start-up fetch of the configured default city.
    pub async fn load_default(&mut self) {
        let city = self.default_city.clone();
        self.fetch_weather(&city).await;
    }

    /// The query text changed: store it and refresh suggestions.
    pub async fn update_query(&mut self, text: &str) {
        self.state.set_query(text);
        self.fetch_suggestions(text).await;
    }

    /// A city was picked: store it as the query, drop suggestions, fetch.
    pub async fn select_city(&mut self, name: &str) {
        self.state.set_query(name);
        self.state.clear_suggestions();
        self.fetch_weather(name).await;
    }

    /// Search for whatever is currently typed.
    pub async fn search(&mut self) {
        let query = self.state.query().to_owned();
        self.select_city(&query).await;
    }

    async fn fetch_weather(&mut self, city: &str) {
        let Some(ticket) = self.state.begin_weather(city) else {
            return;
        };

        if let Some(hook) = &self.on_loading {
            hook(&self.state);
        }

        let outcome = self.provider.current_weather(city).await;
        match &outcome {
            Ok(view) => info!(city, temperature_c = view.temperature_c, "weather updated"),
            Err(err) => warn!(city, error = %err, "weather lookup failed"),
        }

        self.state.finish_weather(ticket, outcome);
    }

    async fn fetch_suggestions(&mut self, query: &str) {
        let Some(ticket) = self.state.begin_suggestions(query) else {
            return;
        };

        let outcome = self
            .provider
            .search_cities(query, MAX_SUGGESTIONS)
            .await
            .map(|hits| hits.iter().map(CityMatch::label).collect::<Vec<_>>());

        if let Err(err) = &outcome {
            warn!(query, error = %err, "city suggestions unavailable");
        }

        self.state.finish_suggestions(ticket, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WeatherError, icon::Icon, model::WeatherView};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct Calls {
        weather: Vec<String>,
        search: Vec<(String, usize)>,
    }

    #[derive(Debug)]
    struct FakeProvider {
        calls: Arc<Mutex<Calls>>,
        weather: Result<WeatherView, WeatherError>,
        cities: Result<Vec<CityMatch>, WeatherError>,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, city: &str) -> Result<WeatherView, WeatherError> {
            self.calls.lock().unwrap().weather.push(city.to_string());
            self.weather.clone()
        }

        async fn search_cities(
            &self,
            query: &str,
            limit: usize,
        ) -> Result<Vec<CityMatch>, WeatherError> {
            self.calls.lock().unwrap().search.push((query.to_string(), limit));
            self.cities.clone()
        }
    }

    fn london() -> WeatherView {
        WeatherView {
            temperature_c: 18,
            humidity_pct: 60,
            wind_speed: 3.4,
            location_name: "London".into(),
            icon: Icon::Clear,
        }
    }

    fn controller(
        weather: Result<WeatherView, WeatherError>,
        cities: Result<Vec<CityMatch>, WeatherError>,
    ) -> (Controller, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let provider = FakeProvider { calls: Arc::clone(&calls), weather, cities };
        let controller = Controller::new(Box::new(provider), "London", StalePolicy::default());
        (controller, calls)
    }

    #[tokio::test]
    async fn load_default_fetches_default_city_once() {
        let (mut ctl, calls) = controller(Ok(london()), Ok(vec![]));

        ctl.load_default().await;

        assert_eq!(calls.lock().unwrap().weather, vec!["London"]);
        assert_eq!(ctl.render(), RenderBranch::Weather(&london()));
    }

    #[tokio::test]
    async fn update_query_maps_hits_to_labels() {
        let hits = vec![CityMatch { name: "Paris".into(), country: "FR".into() }];
        let (mut ctl, calls) = controller(Ok(london()), Ok(hits));

        ctl.update_query("Paris").await;

        assert_eq!(ctl.state().query(), "Paris");
        assert_eq!(ctl.state().suggestions(), ["Paris, FR"]);
        assert_eq!(calls.lock().unwrap().search, vec![("Paris".to_string(), 5)]);
        assert!(calls.lock().unwrap().weather.is_empty());
    }

    #[tokio::test]
    async fn blank_query_issues_no_request() {
        let (mut ctl, calls) = controller(Ok(london()), Ok(vec![]));

        ctl.update_query("  \t").await;

        assert!(calls.lock().unwrap().search.is_empty());
        assert!(ctl.state().suggestions().is_empty());
        assert_eq!(ctl.state().query(), "  \t");
    }

    #[tokio::test]
    async fn suggestion_failure_is_not_surfaced() {
        let (mut ctl, _calls) =
            controller(Ok(london()), Err(WeatherError::Transport("offline".into())));

        ctl.update_query("Ber").await;

        assert!(ctl.state().suggestions().is_empty());
        assert_eq!(ctl.render(), RenderBranch::Prompt);
    }

    #[tokio::test]
    async fn select_city_clears_suggestions_and_fetches() {
        let hits = vec![CityMatch { name: "London".into(), country: "GB".into() }];
        let (mut ctl, calls) = controller(Ok(london()), Ok(hits));

        ctl.update_query("Lon").await;
        assert_eq!(ctl.state().suggestions().len(), 1);

        ctl.select_city("London, GB").await;

        assert!(ctl.state().suggestions().is_empty());
        assert_eq!(ctl.state().query(), "London, GB");
        assert_eq!(calls.lock().unwrap().weather, vec!["London, GB"]);
        assert!(!ctl.state().is_loading());
    }

    #[tokio::test]
    async fn search_with_empty_query_is_a_no_op() {
        let (mut ctl, calls) = controller(Ok(london()), Ok(vec![]));

        ctl.search().await;

        assert!(calls.lock().unwrap().weather.is_empty());
        assert_eq!(ctl.render(), RenderBranch::Prompt);
    }

    #[tokio::test]
    async fn provider_error_replaces_weather_with_message() {
        let (mut ctl, _calls) =
            controller(Err(WeatherError::Provider("city not found".into())), Ok(vec![]));

        ctl.update_query("Atlantis").await;
        ctl.search().await;

        assert!(ctl.state().weather().is_none());
        assert_eq!(ctl.state().error(), Some("city not found"));
        assert_eq!(ctl.render(), RenderBranch::Error("city not found"));
    }

    #[tokio::test]
    async fn loading_is_visible_before_the_provider_answers() {
        let (ctl, calls) = controller(Ok(london()), Ok(vec![]));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let hook_seen = Arc::clone(&seen);
        let hook_calls = Arc::clone(&calls);
        let mut ctl = ctl.on_loading(move |state| {
            let requested = hook_calls.lock().unwrap().weather.len();
            let loading = state.render() == RenderBranch::Loading;
            hook_seen.lock().unwrap().push((loading, requested));
        });

        ctl.select_city("London").await;

        assert_eq!(*seen.lock().unwrap(), vec![(true, 0)]);
        assert_eq!(ctl.render(), RenderBranch::Weather(&london()));
    }

    #[tokio::test]
    async fn loading_hook_skipped_for_empty_city() {
        let (ctl, _calls) = controller(Ok(london()), Ok(vec![]));
        let fired = Arc::new(Mutex::new(0));

        let hook_fired = Arc::clone(&fired);
        let mut ctl = ctl.on_loading(move |_| *hook_fired.lock().unwrap() += 1);

        ctl.search().await;
        ctl.update_query("Lon").await;

        assert_eq!(*fired.lock().unwrap(), 0);
    }
}
