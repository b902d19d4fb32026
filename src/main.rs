mod ui;

use std::{
    io::{self, stdin},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use pomo::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    notify::{notifier_for, NotificationKind, Notifier},
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
};

use crate::ui::ui;

/// focused pomodoro timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal: set a focus and a break duration, start the countdown, and let it alternate between focusing and breaks until you stop it."
)]
pub struct Cli {
    /// read settings from this file instead of the default config location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// how to announce the end of a session
    #[clap(short = 'n', long, value_enum)]
    notification: Option<NotificationKind>,

    /// milliseconds per countdown second (for demos)
    #[clap(long, hide = true)]
    tick_millis: Option<u64>,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and lay the command line flags over it
    fn resolve_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        self.apply_overrides(store.load())
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(notification) = self.notification {
            config.notification = notification;
        }
        if let Some(tick_millis) = self.tick_millis {
            config.tick_millis = tick_millis;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = logging::init(cli.log_file.as_deref())? {
        info!("logging to {}", path.display());
    }

    let config = cli.resolve_config();
    info!("starting with {:?}", config);
    let mut app = App::new(config.clone(), notifier_for(config.notification));

    enable_raw_mode().context("enabling raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, CrosstermEventSource::new());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, N: Notifier, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<N>,
    event_source: E,
) -> Result<()> {
    let mut runner = Runner::new(event_source);
    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        runner.set_interval(app.tick_delay());

        match runner.step() {
            Some(AppEvent::Tick) => {
                app.on_tick();
            }
            Some(AppEvent::Key(key)) => {
                if !app.handle_key(key) {
                    continue;
                }
            }
            Some(AppEvent::Resize) => {}
            None => continue,
        }

        terminal.draw(|f| ui(app, f))?;
    }

    runner.shutdown();
    info!("quitting");
    Ok(())
}
