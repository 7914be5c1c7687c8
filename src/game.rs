//! Text driver: prompts a human for moves and prints the board between plies.

use crate::board::Board;
use crate::boards::tic_tac_toe::Position;
use crate::error::{Error, Result};
use crate::random::RandomGenerator;
use log::{debug, info};
use std::fmt;
use std::io::{BufRead, Write};

/// Who sits on one side of the board.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Seat {
    Human,
    Computer,
}

impl Seat {
    /// Returns the seat across the board.
    pub fn other(self) -> Seat {
        match self {
            Seat::Human => Seat::Computer,
            Seat::Computer => Seat::Human,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => write!(f, "human"),
            Seat::Computer => write!(f, "computer"),
        }
    }
}

/// How the computer picks its moves.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ComputerKind {
    /// Full minimax search. Never loses.
    #[default]
    Perfect,
    /// Any legal move, uniformly.
    Random,
}

/// Settings for one game.
#[derive(Debug, Default, Clone)]
pub struct GameConfig {
    /// Who moves first. `None` asks the human.
    pub first: Option<Seat>,
    /// How the computer picks its moves.
    pub computer: ComputerKind,
}

/// Result of a finished game.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub final_position: Position,
    /// The seat that played the winning move, or `None` for a draw.
    pub winner: Option<Seat>,
}

/// One game between a human on `input` and the computer, shown on `output`.
pub struct TextGame<R, W, K> {
    input: R,
    output: W,
    random: K,
    config: GameConfig,
}

impl<R: BufRead, W: Write, K: RandomGenerator> TextGame<R, W, K> {
    /// Creates a game reading moves from `input` and writing the board to `output`.
    pub fn new(input: R, output: W, config: GameConfig) -> Self {
        Self {
            input,
            output,
            random: K::default(),
            config,
        }
    }

    /// Sets the random number generator used by `ComputerKind::Random`.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random = rg;
        self
    }

    /// Consumes the game and hands back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks until the human answers `1` (human first) or `2` (computer first).
    pub fn ask_for_player(&mut self) -> Result<Seat> {
        writeln!(self.output, "Who do you want to play first?")?;
        writeln!(self.output, "1. Human")?;
        writeln!(self.output, "2. Computer")?;
        loop {
            write!(self.output, "choice: ")?;
            self.output.flush()?;
            match self.read_line("choice")?.as_str() {
                "1" => return Ok(Seat::Human),
                "2" => return Ok(Seat::Computer),
                other => debug!("ignoring choice {other:?}"),
            }
        }
    }

    /// Asks until the human names an empty cell of `position`.
    pub fn ask_for_move(&mut self, position: &Position) -> Result<usize> {
        loop {
            write!(self.output, "move: ")?;
            self.output.flush()?;
            let line = self.read_line("move")?;
            let idx = line
                .parse::<usize>()
                .ok()
                .filter(|_| line.bytes().all(|b| b.is_ascii_digit()));
            if let Some(idx) = idx.filter(|&idx| position.cell(idx) == Some(None)) {
                return Ok(idx);
            }
            debug!("ignoring move {line:?}");
        }
    }

    /// Plays one game to the end and announces the result.
    pub fn play(&mut self) -> Result<GameReport> {
        let mut seat = match self.config.first {
            Some(seat) => seat,
            None => self.ask_for_player()?,
        };
        let mut position = Position::new();

        while !position.is_end() {
            write!(self.output, "{position}")?;
            writeln!(self.output)?;
            let mv = match seat {
                Seat::Human => Some(self.ask_for_move(&position)?),
                Seat::Computer => self.computer_move(&mut position),
            };
            // a position that is not over has at least one empty cell
            let Some(mv) = mv else { break };
            info!("{seat} plays {mv} as {}", position.side_to_move());
            position.make_move(mv);
            seat = seat.other();
        }

        write!(self.output, "{position}")?;
        let winner = if position.is_blocked() {
            writeln!(self.output, "draw")?;
            None
        } else {
            let winner = seat.other();
            writeln!(self.output, "winner: {winner}")?;
            Some(winner)
        };
        info!("game over after {} plies", position.plies_played());

        Ok(GameReport {
            final_position: position,
            winner,
        })
    }

    fn computer_move(&mut self, position: &mut Position) -> Option<usize> {
        match self.config.computer {
            ComputerKind::Perfect => position.best_move(),
            ComputerKind::Random => self.random.pick(&position.possible_moves()).copied(),
        }
    }

    fn read_line(&mut self, waiting_for: &'static str) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed { waiting_for });
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
