//! oo headless driver.
//!
//! Replays a scripted session (pointer gestures, insets, address bar input,
//! page events, permission decisions, back presses) against the browser
//! chrome with a headless content host, persists settings to a TOML file,
//! and prints the final chrome state as JSON.
//!
//! Usage: `oo-app <session.toml> [settings.toml]`. `OO_SESSION` and
//! `OO_SETTINGS` are read when the arguments are absent.

mod runner;
mod script;

use anyhow::{Context, Result};

use oo_chrome::Shell;
use oo_platform::content::HeadlessContentHost;
use oo_platform::permission::DesktopPermissionService;
use oo_platform::settings::TomlSettingsStore;

use runner::Runner;
use script::Session;

const DEFAULT_SETTINGS_PATH: &str = "oo-settings.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("OO_SESSION").ok())
        .context("usage: oo-app <session.toml> [settings.toml]")?;
    let settings_path = std::env::args()
        .nth(2)
        .or_else(|| std::env::var("OO_SETTINGS").ok())
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let text = std::fs::read_to_string(&session_path)
        .with_context(|| format!("reading session {session_path}"))?;
    let session =
        Session::from_toml(&text).with_context(|| format!("parsing session {session_path}"))?;
    log::info!(
        "Replaying {} steps from {session_path} (settings: {settings_path})",
        session.steps.len()
    );

    let store = match TomlSettingsStore::open(&settings_path) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Settings file {settings_path} unreadable ({e}), starting from defaults");
            TomlSettingsStore::empty(&settings_path)
        },
    };

    let shell = Shell::start(
        store,
        HeadlessContentHost::new(),
        DesktopPermissionService::new(session.grant_policy),
    )?;
    let mut runner = Runner::new(shell);
    runner.run(&session)?;

    let report = runner.report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!("Session finished after {} steps", report.steps_run);
    Ok(())
}
