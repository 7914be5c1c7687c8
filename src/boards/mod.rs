//! Concrete implementations of the `Board` trait.

/// The 3×3 tic-tac-toe position.
pub mod tic_tac_toe;
