use std::fmt;

/// Score of a position X has won.
pub const X_WIN_SCORE: i32 = 100;
/// Score of a position O has won.
pub const O_WIN_SCORE: i32 = -100;
/// Score of a drawn position.
pub const TIE_SCORE: i32 = 0;

/// The interface the minimax search needs from a game state.
///
/// The search mutates the board in place: every `make_move` it performs is
/// paired with an `unmake_move` before it returns, so a board handed to the
/// search comes back exactly as it went in.
pub trait Board {
    /// The type representing a move. For tic-tac-toe this is a cell index.
    type Move: Copy + fmt::Debug;

    /// Returns the side whose turn it is to move.
    fn side_to_move(&self) -> Mark;

    /// Returns the number of moves played through `make_move` and not yet undone.
    fn plies_played(&self) -> usize;

    /// Returns all legal moves from the current state, in a stable order.
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Plays a move for the side to move.
    ///
    /// # Panics
    ///
    /// Implementations panic if the move is not legal.
    fn make_move(&mut self, mv: Self::Move) -> &mut Self;

    /// Takes back the most recent move.
    ///
    /// # Panics
    ///
    /// Implementations panic if no move has been played.
    fn unmake_move(&mut self) -> &mut Self;

    /// Returns the score of a terminal position, or `None` if play goes on.
    ///
    /// Scores are from X's point of view: `X_WIN_SCORE`, `O_WIN_SCORE` or `TIE_SCORE`.
    fn evaluate_leaf(&self) -> Option<i32>;
}

/// A player's mark. X always maximizes, O always minimizes.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other side.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the lowercase letter the board shows for this mark.
    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
