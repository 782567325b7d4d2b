use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement by rejection: draw random cells, skipping the start cell and cells that already hold a mine.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        let cells = config.total_cells();
        if config.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: config.mines,
                cells,
            });
        }

        let (size_x, size_y) = config.size;
        let mut layout = MineLayout::empty(config.size);
        let mut rejected = 0_u32;

        while layout.mine_count() < config.mines {
            let coords = (
                self.rng.random_range(0..size_x),
                self.rng.random_range(0..size_y),
            );
            if coords == start || !layout.place_mine(coords) {
                rejected += 1;
            }
        }

        log::trace!(
            "Placed {} mines around {:?}, {} draws rejected",
            layout.mine_count(),
            start,
            rejected
        );
        Ok(layout)
    }
}
