use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    compose_profile_controller, config::DEFAULT_SETTINGS_FILE, load_settings, ClientSettings,
    ProfileController, ProfileUiState,
};
use tracing_subscriber::EnvFilter;

mod links;
mod render;

#[derive(Parser, Debug)]
#[command(about = "Fetch the profile document and print it")]
struct Args {
    /// TOML settings file; missing files are ignored.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    profile_path: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the loaded profile as JSON instead of the formatted page.
    #[arg(long)]
    json: bool,
    /// Open a social link after loading: a platform name or `website`.
    #[arg(long, value_name = "PLATFORM")]
    open: Option<String>,
}

impl Args {
    fn apply(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(v) = &self.base_url {
            settings.base_url = v.clone();
        }
        if let Some(v) = &self.profile_path {
            settings.profile_path = v.clone();
        }
        if let Some(v) = self.timeout_secs {
            settings.request_timeout_secs = v;
        }
        settings
    }
}

/// Shows the loading line while the fetch is in flight, then waits for it to settle.
async fn await_profile(controller: &ProfileController) -> ProfileUiState {
    if controller.current().is_loading() {
        eprintln!("Loading profile…");
    }
    controller.settled().await
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = args.apply(load_settings(&args.config));
    let controller =
        compose_profile_controller(&settings).context("failed to set up profile client")?;

    match await_profile(&controller).await {
        ProfileUiState::Loaded(user) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                print!("{}", render::render_profile(&user));
            }

            if let Some(target) = args.open.as_deref() {
                let raw = links::link_for(&user, target)
                    .with_context(|| format!("profile has no '{target}' link"))?;
                links::open_link(&links::default_opener(), raw)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        ProfileUiState::Failed(message) => {
            eprintln!("{}", render::render_failure(&message));
            Ok(ExitCode::FAILURE)
        }
        ProfileUiState::Loading => {
            eprintln!("{}", render::render_failure("profile fetch stopped before finishing"));
            Ok(ExitCode::FAILURE)
        }
    }
}
