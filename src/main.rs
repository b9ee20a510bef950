//! # apiline Main Entry Point

use anyhow::{anyhow, Result};
use apiline::cmd_args::CommandLineArgs;
use apiline::panel::examples::{is_request, request_names};
use apiline::{config, ConsoleController, PanelExamples, PanelProfile, QueryPanel, Services, TextRenderer};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tokio::io::BufReader;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    let profile_path = config::get_profile_path();
    let profile = PanelProfile::load(cmd_args.profile(), &profile_path)?;
    tracing::debug!("Profile: {:?}", profile.name);

    if !is_request(cmd_args.example()) {
        return Err(anyhow!(
            "Unknown example '{}' (available: {})",
            cmd_args.example(),
            request_names().collect::<Vec<_>>().join(", ")
        ));
    }

    let session = profile.session(cmd_args.site());
    let examples = PanelExamples::for_request(cmd_args.example());
    let panel = QueryPanel::new(session, examples, profile.schema_url());
    let services = Services::from_profile(&profile);

    let mut controller = ConsoleController::new(panel, services, TextRenderer::stdout());
    controller.mount(profile.schema_url().as_deref()).await;

    println!("apiline: profile '{}' -> {}", profile.name, profile.query_url());
    if !profile.is_logged_in() {
        println!("No credentials in profile '{}', the panel is read-only", profile.name);
    }
    println!("Type :help for commands, :q to quit\n");

    controller.run(BufReader::new(tokio::io::stdin())).await
}

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_new(config::get_log_filter(verbose))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL))
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339());

    let result = match config::get_log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| anyhow!("Failed to open log file '{path}': {e}"))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
