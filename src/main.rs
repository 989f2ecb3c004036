use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};
use snake::clock::TickClock;
use snake::config::GameConfig;
use snake::game::{GameSession, Phase};
use snake::input::GameInput;
use snake::renderer;
use snake::score::{JsonScoreStore, MemoryScoreStore, ScoreStore};
use snake::terminal_runtime::{cleanup_terminal_best_effort, TerminalSession};
use snake::ui::hud::HudInfo;

/// Redraw cadence; input is polled for at most this long per frame.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const LOG_FILE_NAME: &str = "grid-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with grid, start layout, scoring and speed settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells (overrides the config file).
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells (overrides the config file).
    #[arg(long)]
    height: Option<u16>,

    /// Base milliseconds per step (overrides the config file).
    #[arg(long = "speed-ms")]
    speed_ms: Option<u64>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the best score in memory only.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Log file path; defaults to the platform data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("Logging disabled: {error}");
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    if cli.no_save {
        launch(&cli, config, MemoryScoreStore::default())
    } else {
        launch(&cli, config, JsonScoreStore::new())
    }
}

fn launch<S: ScoreStore>(cli: &Cli, config: GameConfig, store: S) -> io::Result<()> {
    let built = match cli.seed {
        Some(seed) => GameSession::new_with_seed(config, store, seed),
        None => GameSession::new(config, store),
    };
    let session = match built {
        Ok(session) => session,
        Err(error) => {
            eprintln!("Invalid config: {error}");
            process::exit(2);
        }
    };

    install_panic_hook();
    info!("starting on {}x{} grid", session.bounds().width, session.bounds().height);

    let mut terminal = TerminalSession::enter()?;
    let result = run(&mut terminal, session);
    if let Err(error) = &result {
        error!("game loop failed: {error}");
    }
    result
}

fn run<S: ScoreStore>(terminal: &mut TerminalSession, mut session: GameSession<S>) -> io::Result<()> {
    let mut clock = TickClock::new();
    let mut reference_best_score = session.best_score();
    let mut last_frame = Instant::now();

    loop {
        terminal.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &session,
                HudInfo {
                    reference_best_score,
                },
            )
        })?;

        if let Some(input) = terminal.poll_input(FRAME_INTERVAL)? {
            if input == GameInput::Quit {
                break;
            }

            let before = session.phase();
            session.apply_input(input);
            let after = session.phase();

            if before.can_start() && after == Phase::Running {
                reference_best_score = session.best_score();
            }
            if before != Phase::Running && after == Phase::Running {
                clock.reset();
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;

        if session.phase() == Phase::Running {
            let interval = session
                .config()
                .speed
                .interval_for_level(session.speed_level());
            for _ in 0..clock.advance(elapsed, interval) {
                if session.tick().phase != Phase::Running {
                    break;
                }
            }
        }
    }

    info!("quit with best score {}", session.best_score());
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig, String> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path).map_err(|error| error.to_string())?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(speed_ms) = cli.speed_ms {
        config.speed.base_interval_ms = speed_ms;
    }

    config
        .validate()
        .map_err(|error| format!("invalid config: {error}"))?;
    Ok(config)
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(cli.log_level.into(), Config::default(), File::create(&path)?)
        .map_err(io::Error::other)
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("grid-snake");
    base.push(LOG_FILE_NAME);
    base
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
