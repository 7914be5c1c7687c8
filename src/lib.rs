//! Perfect tic-tac-toe by exhaustive minimax search.
//!
//! The search walks the whole game tree below a position. Scores are from
//! X's point of view (+100 X has won, -100 O has won, 0 drawn) and every ply
//! pulls a score toward zero by the number of moves played so far plus one,
//! so the engine takes the quickest win and puts off a loss as long as it can.
//!
//! # Example
//!
//! ```rust
//! use ttt_minimax::board::{Board, Mark};
//! use ttt_minimax::boards::tic_tac_toe::Position;
//!
//! // x x -
//! // - - -
//! // - o o
//! let mut position: Position = "xx- --- -oo".parse().unwrap();
//!
//! // X completes the top row; the position is restored after the search.
//! assert_eq!(position.best_move(), Some(2));
//! assert_eq!(position.minimax(None), 99);
//!
//! let mut position = position.with_turn(Mark::O);
//! assert_eq!(position.best_move(), Some(6));
//! position.make_move(6);
//! assert!(position.is_end());
//! ```

/// Contains the `Board` trait, the `Mark` enum and the leaf scores.
pub mod board;
/// Contains the concrete 3×3 board.
pub mod boards;
/// Error and `Result` types.
pub mod error;
/// The text driver that plays a human against the engine.
pub mod game;
/// The depth-discounted minimax search.
pub mod minimax;
/// Contains traits and implementations for random number generation.
pub mod random;

pub use error::{Error, Result};
