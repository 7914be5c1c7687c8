use crate::board::{Board, Mark, TIE_SCORE};
use log::{debug, trace};
use std::ops::{Deref, DerefMut};

/// Scores a position by exhaustive minimax search.
///
/// When `mv` is given it is played first and taken back before returning, so
/// the board is left exactly as it was passed in. Scores are from X's point
/// of view. Each ply above a leaf pulls the score toward zero by
/// `plies_played + 1`, so quick wins and slow losses are preferred.
pub fn minimax<B: Board>(board: &mut B, mv: Option<B::Move>) -> i32 {
    match mv {
        Some(mv) => {
            let mut guard = MoveGuard::new(board, mv);
            search(&mut *guard)
        }
        None => search(board),
    }
}

/// Returns the move with the best minimax score for the side to move.
///
/// Ties go to the move `possible_moves` lists first. Returns `None` if there
/// are no legal moves.
pub fn best_move<B: Board>(board: &mut B) -> Option<B::Move> {
    let strategy = Strategy::for_side(board.side_to_move());
    let mut best: Option<(B::Move, i32)> = None;

    for mv in board.possible_moves() {
        let score = minimax(board, Some(mv));
        debug!("move {mv:?} scores {score}");
        if best.is_none_or(|(_, best_score)| strategy.prefers(score, best_score)) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv)
}

fn search<B: Board>(board: &mut B) -> i32 {
    if let Some(leaf_value) = board.evaluate_leaf() {
        trace!("leaf at ply {}: {leaf_value}", board.plies_played());
        return leaf_value;
    }

    let strategy = Strategy::for_side(board.side_to_move());
    let margin = board.plies_played() as i32 + 1;
    let scores: Vec<i32> = board
        .possible_moves()
        .into_iter()
        .map(|mv| strategy.discount(minimax(board, Some(mv)), margin))
        .collect();

    strategy.pick(scores).unwrap_or(TIE_SCORE)
}

/// Which way the side to move pushes the score.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Strategy {
    /// X wants the largest score.
    Maximize,
    /// O wants the smallest score.
    Minimize,
}

impl Strategy {
    /// X maximizes, O minimizes.
    pub fn for_side(side: Mark) -> Self {
        match side {
            Mark::X => Strategy::Maximize,
            Mark::O => Strategy::Minimize,
        }
    }

    /// Moves a child score against the side to move by `margin`.
    pub fn discount(self, score: i32, margin: i32) -> i32 {
        match self {
            Strategy::Maximize => score - margin,
            Strategy::Minimize => score + margin,
        }
    }

    /// Returns true if `candidate` is strictly better than `incumbent`.
    pub fn prefers(self, candidate: i32, incumbent: i32) -> bool {
        match self {
            Strategy::Maximize => candidate > incumbent,
            Strategy::Minimize => candidate < incumbent,
        }
    }

    /// Returns the best of `scores`, or `None` if there are none.
    pub fn pick(self, scores: impl IntoIterator<Item = i32>) -> Option<i32> {
        let scores = scores.into_iter();
        match self {
            Strategy::Maximize => scores.max(),
            Strategy::Minimize => scores.min(),
        }
    }
}

/// Holds a played move and takes it back when dropped.
struct MoveGuard<'a, B: Board> {
    board: &'a mut B,
}

impl<'a, B: Board> MoveGuard<'a, B> {
    fn new(board: &'a mut B, mv: B::Move) -> Self {
        board.make_move(mv);
        Self { board }
    }
}

impl<B: Board> Deref for MoveGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board> DerefMut for MoveGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Board> Drop for MoveGuard<'_, B> {
    fn drop(&mut self) {
        self.board.unmake_move();
    }
}

#[cfg(test)]
mod tests {
    use super::{Strategy, best_move, minimax};
    use crate::board::{Board, Mark, O_WIN_SCORE, X_WIN_SCORE};
    use crate::boards::tic_tac_toe::Position;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn position(cells: &str, turn: Mark) -> Position {
        cells.parse::<Position>().unwrap().with_turn(turn)
    }

    #[test]
    fn strategy_follows_side() {
        assert_eq!(Strategy::for_side(Mark::X), Strategy::Maximize);
        assert_eq!(Strategy::for_side(Mark::O), Strategy::Minimize);
        assert_eq!(Strategy::Maximize.discount(100, 3), 97);
        assert_eq!(Strategy::Minimize.discount(-100, 3), -97);
        assert_eq!(Strategy::Maximize.pick([1, 5, -2]), Some(5));
        assert_eq!(Strategy::Minimize.pick([1, 5, -2]), Some(-2));
        assert_eq!(Strategy::Minimize.pick(Vec::new()), None);
        assert!(!Strategy::Maximize.prefers(5, 5));
        assert!(!Strategy::Minimize.prefers(5, 5));
    }

    #[test]
    fn already_won_game_scores_leaf_value() {
        // arrange
        let mut pos = position("xx- xoo xoo", Mark::X);

        // act
        let score = minimax(&mut pos, None);

        // assert
        assert_eq!(score, X_WIN_SCORE);
    }

    #[test]
    fn win_in_one_is_discounted_by_one_ply() {
        let mut x_to_move = position("xx- --- -oo", Mark::X);
        let mut o_to_move = position("xx- --- -oo", Mark::O);

        assert_eq!(minimax(&mut x_to_move, None), 99);
        assert_eq!(minimax(&mut o_to_move, None), -99);
    }

    #[test]
    fn played_move_is_scored_then_taken_back() {
        // arrange
        let mut pos = position("xx- --- -oo", Mark::X);
        let before = pos.clone();

        // act
        let score = minimax(&mut pos, Some(2));

        // assert
        assert_eq!(score, X_WIN_SCORE);
        assert_eq!(pos, before);
    }

    #[test]
    fn margin_grows_with_moves_played() {
        // arrange
        let mut pos = Position::new();
        pos.make_move(0).make_move(6).make_move(1).make_move(7);

        // act
        let score = minimax(&mut pos, None);

        // assert
        assert_eq!(score, X_WIN_SCORE - 5);
        assert_eq!(pos.plies_played(), 4);
    }

    #[test]
    fn best_move_completes_own_line() {
        let mut x_to_move = position("xx- --- -oo", Mark::X);
        let mut o_to_move = position("xx- --- -oo", Mark::O);

        assert_eq!(best_move(&mut x_to_move), Some(2));
        assert_eq!(best_move(&mut o_to_move), Some(6));
    }

    #[test]
    fn best_move_blocks_immediate_threat() {
        // arrange
        // x x -
        // - o -
        // - - -
        let mut pos = position("xx- -o- ---", Mark::O);

        // act
        let mv = best_move(&mut pos);

        // assert
        assert_eq!(mv, Some(2));
    }

    #[test]
    fn best_move_prefers_faster_win() {
        // arrange
        // o x o
        // - x -
        // - - -
        // Cell 3 forks and wins two plies later; cell 7 wins at once.
        let mut pos = position("oxo -x- ---", Mark::X);

        // act
        let slow = minimax(&mut pos, Some(3));
        let fast = minimax(&mut pos, Some(7));
        let mv = best_move(&mut pos);

        // assert
        assert_eq!(fast, X_WIN_SCORE);
        assert_eq!(Strategy::Maximize.discount(slow, 1), 98);
        assert_eq!(mv, Some(7));
    }

    #[test]
    fn best_move_on_full_board_is_none() {
        let mut pos = position("xox xox oxo", Mark::X);

        assert_eq!(best_move(&mut pos), None);
    }

    #[test]
    fn empty_board_is_a_draw_with_perfect_play() {
        // arrange
        let mut pos = Position::new();

        // act
        let score = minimax(&mut pos, None);

        // assert
        assert!(score > O_WIN_SCORE / 2 && score < X_WIN_SCORE / 2);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn occupied_cell_panics_without_touching_position() {
        // arrange
        let mut pos = Position::new();
        pos.make_move(0);
        let before = pos.clone();

        // act
        let result = catch_unwind(AssertUnwindSafe(|| minimax(&mut pos, Some(0))));

        // assert
        assert!(result.is_err());
        assert_eq!(pos, before);
        assert_eq!(pos.move_history(), &[0]);
    }

    /// Delegates to a `Position` but panics when asked to score a node at `panic_at_ply`.
    struct FailingBoard {
        inner: Position,
        panic_at_ply: usize,
    }

    impl Board for FailingBoard {
        type Move = usize;

        fn side_to_move(&self) -> Mark {
            self.inner.side_to_move()
        }

        fn plies_played(&self) -> usize {
            self.inner.plies_played()
        }

        fn possible_moves(&self) -> Vec<usize> {
            self.inner.possible_moves()
        }

        fn make_move(&mut self, mv: usize) -> &mut Self {
            self.inner.make_move(mv);
            self
        }

        fn unmake_move(&mut self) -> &mut Self {
            self.inner.unmake_move();
            self
        }

        fn evaluate_leaf(&self) -> Option<i32> {
            if self.inner.plies_played() == self.panic_at_ply {
                panic!("evaluation failed at ply {}", self.panic_at_ply);
            }
            self.inner.evaluate_leaf()
        }
    }

    #[test]
    fn moves_are_taken_back_when_search_unwinds() {
        // arrange
        let mut inner = Position::new();
        inner.make_move(4);
        let mut board = FailingBoard {
            inner,
            panic_at_ply: 4,
        };
        let before = board.inner.clone();

        // act
        let result = catch_unwind(AssertUnwindSafe(|| minimax(&mut board, Some(0))));

        // assert
        assert!(result.is_err());
        assert_eq!(board.inner, before);
        assert_eq!(board.inner.move_history(), &[4]);
    }
}
