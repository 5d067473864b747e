//! Interactive lookup: type a name, pick from the suggestions, see the weather.

use anyhow::Context;
use inquire::{
    CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use std::sync::Arc;
use tokio::{runtime::Handle, sync::Mutex};
use weather_core::Controller;

use crate::render;

/// Refreshes suggestions through the controller on every input change.
///
/// inquire calls this from the prompt thread, so requests are driven with
/// `Handle::block_on`; the prompt must run on a blocking thread.
#[derive(Clone)]
struct CitySuggester {
    controller: Arc<Mutex<Controller>>,
    runtime: Handle,
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let controller = Arc::clone(&self.controller);
        let suggestions = self.runtime.block_on(async move {
            let mut controller = controller.lock().await;
            controller.update_query(input).await;
            controller.state().suggestions().to_vec()
        });
        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run(controller: Controller) -> anyhow::Result<()> {
    let controller = controller.on_loading(|state| {
        println!("{}", render::branch_text(&state.render()));
    });
    let controller = Arc::new(Mutex::new(controller));

    {
        let mut ctl = controller.lock().await;
        ctl.load_default().await;
        println!("{}\n", render::branch_text(&ctl.render()));
    }

    loop {
        let suggester =
            CitySuggester { controller: Arc::clone(&controller), runtime: Handle::current() };
        let initial = controller.lock().await.state().query().to_owned();

        let answer = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_initial_value(&initial)
                .with_autocomplete(suggester)
                .with_help_message("Tab takes a suggestion, Enter searches, Esc quits")
                .prompt()
        })
        .await
        .context("City prompt stopped unexpectedly")?;

        let city = match answer {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let mut ctl = controller.lock().await;
        ctl.select_city(&city).await;
        println!("{}\n", render::branch_text(&ctl.render()));
    }

    Ok(())
}
