extern crate ttt_minimax;

use ttt_minimax::board::{Board, Mark};
use ttt_minimax::boards::tic_tac_toe::Position;
use ttt_minimax::random::{CustomNumberGenerator, RandomGenerator};

const GAMES_PER_SIDE: usize = 5;

fn main() {
    // The engine against itself always draws
    let mut position = Position::new();
    while !position.is_end() {
        let best_move = position
            .best_move()
            .expect("a game in progress has a legal move");
        println!("{} plays {best_move}", position.side_to_move());
        position.make_move(best_move);
        println!("{position}");
    }
    assert!(position.is_blocked(), "perfect play must end in a draw");
    println!("draw after {} plies", position.plies_played());

    // The engine never loses to random moves, whichever side it plays
    let mut random = CustomNumberGenerator::default();
    for engine in [Mark::X, Mark::O] {
        let mut losses = 0;
        for _ in 0..GAMES_PER_SIDE {
            let mut position = Position::new();
            while !position.is_end() {
                let mv = if position.side_to_move() == engine {
                    position.best_move()
                } else {
                    random.pick(&position.possible_moves()).copied()
                };
                position.make_move(mv.expect("a game in progress has a legal move"));
            }
            if position.is_win(engine.opponent()) {
                losses += 1;
            }
        }
        println!("engine as {engine}: {losses} losses in {GAMES_PER_SIDE} games");
        assert_eq!(losses, 0);
    }
}
