use crate::*;
pub use random::*;

mod random;

/// Produces the mine placement for a new game.
///
/// Fixed layouts skip this and go straight to [`GameSession::with_board`].
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Board;
}
