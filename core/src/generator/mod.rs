use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places the mines of a game once the first cell to open is known.
pub trait MineGenerator {
    /// The returned layout must leave `start` free of mines.
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout>;
}
