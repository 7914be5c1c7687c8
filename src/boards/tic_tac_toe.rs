use crate::board::{Board, Mark, O_WIN_SCORE, TIE_SCORE, X_WIN_SCORE};
use crate::error::{Error, Result};
use crate::minimax;
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const DIM: usize = 3;
/// Number of cells on the board.
pub const SIZE: usize = DIM * DIM;

/// Cell indices of every three-in-a-row: rows top to bottom, columns left to
/// right, then the two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const ROW_DIVIDER: &str = "\n-----------\n";

/// A tic-tac-toe position: the nine cells, the side to move and the moves
/// played so far.
///
/// Cell `i` sits at row `i / 3`, column `i % 3`. A move is a cell index.
/// The move history only records moves played through `make_move`; a
/// position built with `from_cells` starts with an empty history whatever
/// marks are already on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    cells: [Option<Mark>; SIZE],
    turn: Mark,
    move_history: Vec<usize>,
}

impl Position {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self::from_cells([None; SIZE], Mark::X)
    }

    /// Creates a position from explicit cells and side to move.
    ///
    /// The caller is responsible for `turn` agreeing with the marks on the board.
    pub fn from_cells(cells: [Option<Mark>; SIZE], turn: Mark) -> Self {
        Self {
            cells,
            turn,
            move_history: Vec::with_capacity(SIZE),
        }
    }

    /// Replaces the side to move.
    pub fn with_turn(mut self, turn: Mark) -> Self {
        self.turn = turn;
        self
    }

    /// Returns all nine cells, `None` for empty.
    pub fn cells(&self) -> &[Option<Mark>; SIZE] {
        &self.cells
    }

    /// Returns the contents of a cell, or `None` if the index is off the board.
    pub fn cell(&self, idx: usize) -> Option<Option<Mark>> {
        self.cells.get(idx).copied()
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the cells played through `make_move`, oldest first.
    pub fn move_history(&self) -> &[usize] {
        &self.move_history
    }

    /// Returns the side that played the most recent move.
    pub fn last_mover(&self) -> Mark {
        self.turn.opponent()
    }

    /// Plays a move after checking it is on the board and the cell is empty.
    pub fn try_make_move(&mut self, idx: usize) -> Result<&mut Self> {
        match self.cell(idx) {
            None => Err(Error::OutOfRange { index: idx }),
            Some(Some(_)) => Err(Error::Occupied { index: idx }),
            Some(None) => Ok(self.make_move(idx)),
        }
    }

    /// Takes back the last move, failing if there is none.
    pub fn try_unmake_move(&mut self) -> Result<&mut Self> {
        if self.move_history.is_empty() {
            return Err(Error::NothingToUndo);
        }
        Ok(self.unmake_move())
    }

    /// Returns the contents of the eight lines in `WIN_LINES` order.
    pub fn win_lines(&self) -> [[Option<Mark>; 3]; 8] {
        WIN_LINES.map(|line| line.map(|idx| self.cells[idx]))
    }

    /// Returns true if `mark` fills some line.
    pub fn is_win(&self, mark: Mark) -> bool {
        self.win_lines()
            .iter()
            .any(|line| line.iter().all(|&cell| cell == Some(mark)))
    }

    /// Returns true if every line holds at least one X and at least one O.
    ///
    /// This looks only at the marks on the board, not at the moves left.
    pub fn is_blocked(&self) -> bool {
        self.win_lines()
            .iter()
            .all(|line| line.contains(&Some(Mark::X)) && line.contains(&Some(Mark::O)))
    }

    /// Returns true once either side has won or no empty cell is left.
    pub fn is_end(&self) -> bool {
        self.is_win(Mark::X) || self.is_win(Mark::O) || self.cells.iter().all(Option::is_some)
    }

    /// Scores the position, optionally after playing `idx` first.
    ///
    /// The position is unchanged when this returns.
    pub fn minimax(&mut self, idx: Option<usize>) -> i32 {
        minimax::minimax(self, idx)
    }

    /// Returns the best cell for the side to move, or `None` on a full board.
    pub fn best_move(&mut self) -> Option<usize> {
        minimax::best_move(self)
    }
}

impl Default for Position {
    /// Creates an empty board with X to move.
    fn default() -> Self {
        Position::new()
    }
}

impl Board for Position {
    type Move = usize;

    fn side_to_move(&self) -> Mark {
        self.turn
    }

    fn plies_played(&self) -> usize {
        self.move_history.len()
    }

    fn possible_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    fn make_move(&mut self, idx: usize) -> &mut Self {
        assert!(self.cells[idx].is_none(), "BUG: playing on occupied cell {idx}");
        self.cells[idx] = Some(self.turn);
        self.turn = self.turn.opponent();
        self.move_history.push(idx);
        self
    }

    fn unmake_move(&mut self) -> &mut Self {
        let idx = self
            .move_history
            .pop()
            .unwrap_or_else(|| panic!("BUG: unmaking a move with an empty history"));
        self.cells[idx] = None;
        self.turn = self.turn.opponent();
        self
    }

    fn evaluate_leaf(&self) -> Option<i32> {
        if self.is_win(Mark::X) {
            Some(X_WIN_SCORE)
        } else if self.is_win(Mark::O) {
            Some(O_WIN_SCORE)
        } else if self.is_blocked() {
            Some(TIE_SCORE)
        } else {
            None
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parses nine cells written as `x`, `o` and `-` (or `.`) for empty.
    /// Whitespace is ignored, so `"x-- -o- --x"` reads row by row. X moves next.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if chars.len() != SIZE {
            return Err(Error::InvalidBoardLength {
                expected: SIZE,
                got: chars.len(),
            });
        }

        let mut cells = [None; SIZE];
        for (position, (cell, &character)) in cells.iter_mut().zip(&chars).enumerate() {
            *cell = match character {
                'x' | 'X' => Some(Mark::X),
                'o' | 'O' => Some(Mark::O),
                '-' | '.' => None,
                _ => {
                    return Err(Error::InvalidCellCharacter {
                        character,
                        position,
                    });
                }
            };
        }

        Ok(Position::from_cells(cells, Mark::X))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .chunks(DIM)
            .map(|row| {
                let row: Vec<String> = row
                    .iter()
                    .map(|cell| cell.map_or(' ', Mark::to_char).to_string())
                    .collect();
                format!(" {} ", row.join(" | "))
            })
            .collect();
        writeln!(f, "{}", rows.join(ROW_DIVIDER))
    }
}
