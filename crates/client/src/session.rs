//! Line-oriented game loop.
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use game_core::{
    GameEngine, GameError, PcgRng, PlayerMoveOutcome, RngOracle, TurnError, TurnPhase,
};
use tracing::{debug, info, warn};

use crate::config::ViewConfig;
use crate::render;
use crate::viewport::Viewport;

pub const HELP: &str = "\
commands:
  h/a left   j/s down   k/w up   l/d right
  . or e     advance the enemy phase one step
  i <x> <y>  inspect a map cell
  p          player stats as JSON
  ?          this help
  q          quit";

/// One parsed input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move { dx: i32, dy: i32 },
    EnemyStep,
    Inspect { x: i32, y: i32 },
    Stats,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (? for help)")]
    Unknown(String),

    #[error("usage: i <x> <y>")]
    InspectUsage,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;

        let command = match head {
            "h" | "a" => Command::Move { dx: -1, dy: 0 },
            "j" | "s" => Command::Move { dx: 0, dy: 1 },
            "k" | "w" => Command::Move { dx: 0, dy: -1 },
            "l" | "d" => Command::Move { dx: 1, dy: 0 },
            "." | "e" => Command::EnemyStep,
            "p" => Command::Stats,
            "?" => Command::Help,
            "q" => Command::Quit,
            "i" => {
                let mut coordinate = || {
                    words
                        .next()
                        .and_then(|word| word.parse::<i32>().ok())
                        .ok_or(CommandError::InspectUsage)
                };
                let x = coordinate()?;
                let y = coordinate()?;
                return Ok(Command::Inspect { x, y });
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if words.next().is_some() {
            return Err(CommandError::Unknown(line.trim().to_string()));
        }
        Ok(command)
    }
}

/// Whether the loop should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A running game: engine, dice, camera.
pub struct Session<R = PcgRng> {
    engine: GameEngine,
    rng: R,
    viewport: Viewport,
    auto_enemy_turn: bool,
}

impl Session<PcgRng> {
    pub fn new(engine: GameEngine, seed: u64, view: ViewConfig, auto_enemy_turn: bool) -> Self {
        Self::with_rng(engine, PcgRng::new(seed), view, auto_enemy_turn)
    }
}

impl<R: RngOracle> Session<R> {
    pub fn with_rng(engine: GameEngine, rng: R, view: ViewConfig, auto_enemy_turn: bool) -> Self {
        let dungeon = engine.dungeon();
        let mut viewport = Viewport::new(view.width, view.height, dungeon.width(), dungeon.height());
        viewport.follow(dungeon.player().position());
        Self {
            engine,
            rng,
            viewport,
            auto_enemy_turn,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Reads commands until `q`, end of input or the end of the game.
    pub fn run<I: BufRead, W: Write>(&mut self, input: I, output: &mut W) -> Result<()> {
        self.draw(output)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            };

            if self.execute(command, output)? == Flow::Stop {
                break;
            }
        }

        output.flush()?;
        Ok(())
    }

    /// Applies one command and writes what happened.
    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<Flow> {
        debug!(?command, "command");
        match command {
            Command::Quit => {
                info!(round = self.engine.turn().round, "player quit");
                return Ok(Flow::Stop);
            }
            Command::Help => {
                writeln!(output, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Stats => {
                let json = serde_json::to_string_pretty(&self.engine.player_stats())?;
                writeln!(output, "{json}")?;
                return Ok(Flow::Continue);
            }
            Command::Inspect { x, y } => {
                let inspection = self.engine.inspect(x, y);
                writeln!(output, "{}", render::inspection(inspection.as_ref()))?;
                return Ok(Flow::Continue);
            }
            Command::Move { dx, dy } => match self.engine.move_player(dx, dy, &mut self.rng) {
                Ok(PlayerMoveOutcome::Blocked) => writeln!(output, "Blocked.")?,
                Ok(_) => {
                    if self.auto_enemy_turn && !self.engine.phase().is_player_turn() {
                        self.run_enemies(output)?;
                    }
                }
                Err(err) => return self.refused(err, output),
            },
            Command::EnemyStep => match self.engine.advance_enemy_turn(&mut self.rng) {
                Ok(report) => writeln!(output, "{}", render::enemy_step_line(&report))?,
                Err(err) => return self.refused(err, output),
            },
        }

        self.draw(output)?;
        if self.engine.is_game_over() {
            writeln!(output, "You died. Game over.")?;
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    fn run_enemies<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let reports = self.engine.run_enemy_turn(&mut self.rng)?;
        for report in &reports {
            writeln!(output, "{}", render::enemy_step_line(report))?;
        }
        Ok(())
    }

    /// Reports a refused command. Anything but a recoverable refusal ends the loop.
    fn refused<W: Write>(&self, err: TurnError, output: &mut W) -> Result<Flow> {
        writeln!(output, "{err}")?;
        if err.severity().is_recoverable() {
            Ok(Flow::Continue)
        } else {
            warn!(code = err.error_code(), "session stopped: {err}");
            Ok(Flow::Stop)
        }
    }

    fn draw<W: Write>(&mut self, output: &mut W) -> Result<()> {
        self.viewport.follow(self.engine.dungeon().player().position());
        writeln!(output, "{}", render::frame(&self.engine, &self.viewport))?;
        writeln!(output, "{}", render::status_line(&self.engine.player_stats()))?;
        for event in self.engine.drain_events() {
            writeln!(output, "{}", render::event_line(&event))?;
        }
        if let TurnPhase::EnemyTurn { queue } = self.engine.phase() {
            writeln!(output, "enemy turn: {} to act", queue.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use game_core::{CharacterKind, Dungeon, GameConfig, ScriptedRng, StatBlock, StatTable};

    use super::*;

    fn session(rows: &[&str], rolls: &[f64], auto: bool) -> Session<ScriptedRng> {
        let config = GameConfig::default();
        let dungeon = Dungeon::from_ascii(rows, &StatTable::default(), &config).unwrap();
        let engine = GameEngine::new(dungeon, config);
        Session::with_rng(engine, ScriptedRng::new(rolls.to_vec()), ViewConfig::default(), auto)
    }

    fn play(session: &mut Session<ScriptedRng>, input: &str) -> String {
        let mut output = Vec::new();
        session.run(Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("l".parse(), Ok(Command::Move { dx: 1, dy: 0 }));
        assert_eq!("w".parse(), Ok(Command::Move { dx: 0, dy: -1 }));
        assert_eq!(" . ".parse(), Ok(Command::EnemyStep));
        assert_eq!("i 3 -1".parse(), Ok(Command::Inspect { x: 3, y: -1 }));
        assert_eq!("i 3".parse::<Command>(), Err(CommandError::InspectUsage));
        assert_eq!(
            "x".parse::<Command>(),
            Err(CommandError::Unknown("x".to_string()))
        );
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
    }

    #[test]
    fn moves_and_redraws() {
        let mut game = session(&["@   "], &[], true);
        let out = play(&mut game, "l\nq\n");
        assert!(out.contains("│.@..│"), "{out}");
        assert!(out.contains("Moves 2/3"));
    }

    #[test]
    fn walls_report_blocked() {
        let mut game = session(&["@#"], &[], true);
        let out = play(&mut game, "l\n");
        assert!(out.contains("Blocked."));
        assert_eq!(game.engine().player_stats().move_remaining, 3);
    }

    #[test]
    fn spent_budget_runs_enemies_automatically() {
        let mut game = session(&["@   "], &[], true);
        let out = play(&mut game, "l\nl\nl\n");
        assert!(out.contains("enemy step 1: nobody moves"), "{out}");
        assert!(game.engine().phase().is_player_turn());
        assert_eq!(game.engine().turn().round, 1);
    }

    #[test]
    fn manual_enemy_phase_waits_for_steps() {
        let mut game = session(&["@   "], &[], false);
        let out = play(&mut game, "l\nl\nl\nl\n.\n");
        assert!(out.contains("enemy turn: 0 to act"));
        assert!(out.contains("it is not the player's turn"));
        assert!(out.contains("enemy step 1:"));
        assert!(game.engine().phase().is_player_turn());
    }

    #[test]
    fn inspect_and_stats_commands() {
        let mut game = session(&["@1"], &[], true);
        let out = play(&mut game, "i 1 0\np\n");
        assert!(out.contains("Goblin\n  xp: 10"));
        assert!(out.contains("\"name\": \"Player\""));
    }

    #[test]
    fn death_ends_the_session() {
        let config = GameConfig::default();
        let stats = StatTable::default().with(CharacterKind::Player, StatBlock::new(1, 3, 5, 4));
        let dungeon = Dungeon::from_ascii(&["@1"], &stats, &config).unwrap();
        let engine = GameEngine::new(dungeon, config);
        // Player fumbles, goblin counters with a high roll against a zero defense roll.
        let mut game = Session::with_rng(
            engine,
            ScriptedRng::new(vec![0.1, 0.85, 0.0]),
            ViewConfig::default(),
            true,
        );
        let out = play(&mut game, "l\nl\n");
        assert!(out.contains("You died. Game over."), "{out}");
        assert!(game.engine().is_game_over());
    }
}
