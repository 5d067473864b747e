use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use weather_core::{Config, Controller, RenderBranch};

use crate::{configure, render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city, with search suggestions")]
pub struct Cli {
    /// Log requests and outcomes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris" or "Paris, FR". Uses the default city if absent.
        city: Option<String>,

        /// Print the weather as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List city suggestions for a partial name.
    Suggest {
        /// Partial city name.
        query: String,
    },

    /// Search, pick a suggestion and see the weather, repeatedly.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure::run()?,
            Command::Show { city, json } => {
                // stderr keeps `--json` output clean.
                let mut controller = controller()?.on_loading(|state| {
                    eprintln!("{}", render::branch_text(&state.render()));
                });
                match city {
                    Some(city) => controller.select_city(&city).await,
                    None => controller.load_default().await,
                }

                match controller.render() {
                    RenderBranch::Error(msg) => return Err(anyhow!("{msg}")),
                    RenderBranch::Weather(view) if json => {
                        let out = serde_json::to_string_pretty(view)
                            .context("Failed to serialize weather as JSON")?;
                        println!("{out}");
                    }
                    branch => println!("{}", render::branch_text(&branch)),
                }
            }
            Command::Suggest { query } => {
                let mut controller = controller()?;
                controller.update_query(&query).await;

                for suggestion in controller.state().suggestions() {
                    println!("{suggestion}");
                }
            }
            Command::Interactive => session::run(controller()?).await?,
        }

        Ok(())
    }
}

fn controller() -> anyhow::Result<Controller> {
    let config = Config::load()?;
    Controller::from_config(&config)
}
