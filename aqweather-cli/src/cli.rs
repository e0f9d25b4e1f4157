use std::process::ExitCode;

use anyhow::Context;
use aqweather_core::{
    Config, SearchOutcome, View, WeatherProvider, WeatherQueryController,
    provider::provider_from_config,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{debug, warn};

use crate::render::Renderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "aqweather", version, about = "Current weather and air quality")]
pub struct Cli {
    /// OpenWeather API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show weather and air quality for a city.
    Show {
        /// City name, e.g. "London" or "San Francisco".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Search repeatedly; press Enter to search, Esc or Ctrl-C to quit.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let renderer = Renderer::new(!self.plain);

        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let controller = build_controller(self.api_key)?;
                let outcome = controller.execute_search(&city.join(" ")).await;
                print_view(&renderer, &controller);

                match outcome {
                    SearchOutcome::Failed(_) => Ok(ExitCode::FAILURE),
                    _ => Ok(ExitCode::SUCCESS),
                }
            }
            Command::Interactive => {
                let controller = build_controller(self.api_key)?;
                interactive(&renderer, &controller).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_controller(
    api_key: Option<String>,
) -> anyhow::Result<WeatherQueryController<Box<dyn WeatherProvider>>> {
    let config = Config::load()?.with_api_key_override(api_key);

    if !config.has_api_key() {
        warn!("No OpenWeather API key configured. Hint: run `aqweather configure` first.");
    }
    debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "using configuration");

    let provider = provider_from_config(&config)?;
    Ok(WeatherQueryController::new(provider))
}

fn print_view<P: WeatherProvider>(renderer: &Renderer, controller: &WeatherQueryController<P>) {
    let view = View::build(&controller.snapshot(), &Local::now().date_naive());
    println!("{}", renderer.render(&view));
}

async fn interactive<P: WeatherProvider>(
    renderer: &Renderer,
    controller: &WeatherQueryController<P>,
) -> anyhow::Result<()> {
    print_view(renderer, controller);

    loop {
        let input = match Text::new("Search city...").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        };

        controller.set_query(input);
        if controller.query().trim().is_empty() {
            continue;
        }

        println!("{}", renderer.loading());
        controller.submit().await;
        print_view(renderer, controller);
    }

    Ok(())
}
