use anyhow::{Context, Result, anyhow, bail};
use std::io::{BufRead, Write};
use web_time::Instant;

use cellsweep_core::{Coord, Coord2, Difficulty, RevealOutcome, Session};

use crate::PlayArgs;
use crate::records::RecordStore;
use crate::render;

const HELP: &str = "\
commands:
  o X Y   open a cell (chords a numbered cell)
  f X Y   cycle flag / question mark
  c X Y   chord a numbered cell
  n       new game
  h       this help
  q       quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Open(Coord2),
    Mark(Coord2),
    Chord(Coord2),
    NewGame,
    Help,
    Quit,
}

pub(crate) fn parse_action(line: &str) -> Result<Action> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        bail!("Empty command, try `h`");
    };

    let mut coords = || -> Result<Coord2> {
        let mut next = |axis: &str| -> Result<Coord> {
            let word = words
                .next()
                .ok_or_else(|| anyhow!("Missing {} coordinate", axis))?;
            word.parse()
                .with_context(|| format!("Invalid {} coordinate `{}`", axis, word))
        };
        let x = next("x")?;
        let y = next("y")?;
        Ok((x, y))
    };

    let action = match command {
        "o" | "open" => Action::Open(coords()?),
        "f" | "flag" => Action::Mark(coords()?),
        "c" | "chord" => Action::Chord(coords()?),
        "n" | "new" => Action::NewGame,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" => Action::Quit,
        other => bail!("Unknown command `{}`, try `h`", other),
    };

    if words.next().is_some() {
        bail!("Too many arguments for `{}`", command);
    }
    Ok(action)
}

/// A session plus the clock around it.
pub(crate) struct Game {
    session: Session,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Game {
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        log::debug!("New {} game, seed: {}", difficulty.name(), seed);
        Ok(Self {
            session: Session::new(difficulty.config(), seed)?,
            started_at: None,
            ended_at: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whole seconds since the first reveal, frozen once the game ends.
    pub fn elapsed_secs(&self) -> u32 {
        match self.started_at {
            Some(started_at) => {
                let end = self.ended_at.unwrap_or_else(Instant::now);
                end.duration_since(started_at).as_secs().try_into().unwrap_or(u32::MAX)
            }
            None => 0,
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<RevealOutcome> {
        let outcome = match action {
            Action::Open(coords) => self.session.primary_action(coords)?,
            Action::Chord(coords) => self.session.chord_action(coords)?,
            Action::Mark(coords) => {
                self.session.secondary_action(coords)?;
                RevealOutcome::NoChange
            }
            Action::NewGame | Action::Help | Action::Quit => RevealOutcome::NoChange,
        };

        if self.started_at.is_none() && self.session.mines_dealt() && outcome.has_update() {
            self.started_at = Some(Instant::now());
        }
        if outcome.is_final() {
            self.ended_at = Some(Instant::now());
        }
        Ok(outcome)
    }
}

pub(crate) fn run(args: &PlayArgs, input: impl BufRead, mut output: impl Write) -> Result<()> {
    let difficulty = args.difficulty()?;
    let mut store = RecordStore::load(&args.records)?;
    let mut game = Game::new(difficulty, args.seed)?;

    writeln!(output, "{}", HELP)?;
    if let Some(best) = store.times().best(difficulty) {
        writeln!(output, "Best {} time: {}s", difficulty.name(), best)?;
    }
    render::draw(&mut output, game.session(), game.elapsed_secs())?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(err) => {
                writeln!(output, "{:#}", err)?;
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Action::NewGame => game = Game::new(difficulty, args.seed)?,
            _ => match game.apply(action) {
                Ok(RevealOutcome::Won) => {
                    let secs = game.elapsed_secs();
                    writeln!(output, "You win! Time: {}s", secs)?;
                    match store.submit(difficulty, secs) {
                        Ok(true) => writeln!(output, "New best time for {}!", difficulty.name())?,
                        Ok(false) => {}
                        Err(err) => {
                            log::warn!("{:#}", err);
                            writeln!(output, "{:#}", err)?;
                        }
                    }
                }
                Ok(RevealOutcome::HitMine) => writeln!(output, "Boom! Game over, `n` for a new game")?,
                Ok(_) => {}
                Err(err) => {
                    writeln!(output, "{}", err)?;
                    continue;
                }
            },
        }

        render::draw(&mut output, game.session(), game.elapsed_secs())?;
    }

    output.flush()?;
    Ok(())
}
