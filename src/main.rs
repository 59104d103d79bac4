//! cloud-console - a terminal console for hosted storage
//!
//! Shows the signed-in account, recently accessed files, a video tour, and a
//! playground for creating and testing hosted locations.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::{BusyPolicy, Config};
use crate::model::SessionContext;
use crate::services::HttpGateway;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const HELP: &str = "\
cloud-console

USAGE:
  cloud-console [OPTIONS]

OPTIONS:
  --config <PATH>      Config file (default ~/.cloud-console/config.json)
  --api-url <URL>      Backend base URL
  --log-level <LEVEL>  trace, debug, info, warn or error
  --coarse-busy        Disable every location control while any mutation runs
  -h, --help           Print this help
";

struct Args {
    config: Option<PathBuf>,
    api_url: Option<String>,
    log_level: Option<String>,
    coarse_busy: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str::<_, String>("--config")?.map(PathBuf::from),
        api_url: args.opt_value_from_str("--api-url")?,
        log_level: args.opt_value_from_str("--log-level")?,
        coarse_busy: args.contains("--coarse-busy"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", rest);
    }
    Ok(Some(parsed))
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.coarse_busy {
        config.busy_policy = BusyPolicy::Coarse;
    }

    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(Config::default_log_file);
    logging::init(&log_file, &config.log_level)?;
    info!(api_url = %config.api_url, busy_policy = ?config.busy_policy, "starting");

    let session = SessionContext::new(config.auth_token.clone())
        .with_refresh_token(config.refresh_token.clone());
    let gateway = HttpGateway::new(&config, session.clone())?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(&config, Arc::new(gateway), session);
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "exiting with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("bye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }

        // Ticks run on elapsed time so held keys cannot starve completions
        if tui.tick_due() {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
