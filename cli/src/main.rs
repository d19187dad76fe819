use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

use cellsweep_core::{CellCount, Coord, Difficulty, GameConfig};

mod play;
mod records;
mod render;
mod worker;

const DEFAULT_RECORDS: &str = "cellsweep-records.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal (default)
    Play(PlayArgs),
    /// Answer board requests, one JSON message per line on stdin
    Worker,
}

#[derive(clap::Args, Clone, Debug)]
pub(crate) struct PlayArgs {
    /// Preset board
    #[arg(short, long, value_enum, default_value_t = Level::Beginner)]
    pub level: Level,

    /// Custom board width, overrides the preset
    #[arg(long)]
    pub width: Option<Coord>,

    /// Custom board height, overrides the preset
    #[arg(long)]
    pub height: Option<Coord>,

    /// Custom mine count, overrides the preset
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Where best times are kept
    #[arg(short, long, default_value = DEFAULT_RECORDS)]
    pub records: PathBuf,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            level: Level::Beginner,
            width: None,
            height: None,
            mines: None,
            seed: None,
            records: DEFAULT_RECORDS.into(),
        }
    }
}

impl PlayArgs {
    pub fn difficulty(&self) -> Result<Difficulty> {
        let preset = self.level.difficulty();
        if self.width.is_none() && self.height.is_none() && self.mines.is_none() {
            return Ok(preset);
        }

        let base = preset.config();
        let size = (
            self.width.unwrap_or(base.size.0),
            self.height.unwrap_or(base.size.1),
        );
        let config = GameConfig::new(size, self.mines.unwrap_or(base.mines))?;
        Ok(Difficulty::Custom(config))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    fn difficulty(self) -> Difficulty {
        match self {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    // also picks up the `log` records emitted by the engine
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);
    log::debug!("{:?}", args);

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    match args.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(play_args) => play::run(&play_args, stdin, stdout),
        Command::Worker => worker::run(stdin, stdout),
    }
}
