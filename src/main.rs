use anyhow::Context;
use clap::Parser;
use swiftread::app::App;
use swiftread::cli::Cli;
use swiftread::input::LoadRequest;
use swiftread::logging;
use swiftread::storage::FilePreferencesStore;
use swiftread::ui::TuiManager;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(err) = logging::init(&log_path) {
        eprintln!("Logging disabled: {:#}", err);
    }

    let prefs_path = cli
        .prefs
        .clone()
        .unwrap_or_else(FilePreferencesStore::default_path);
    log::info!("Preferences at {}", prefs_path.display());
    let mut app = App::new(Box::new(FilePreferencesStore::new(prefs_path)));

    if let Some(wpm) = cli.wpm {
        app.set_rate(wpm);
    }
    if let Some(theme) = cli.theme {
        app.set_theme(theme);
    }
    if let Some(path) = cli.path {
        app.begin_load(LoadRequest::File(path));
    }

    let mut tui = TuiManager::new().context("Cannot set up the terminal")?;
    tui.run_event_loop(&mut app)?;
    drop(tui);

    log::info!("Exiting");
    Ok(())
}
