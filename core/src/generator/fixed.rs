use alloc::vec::Vec;

use super::*;

/// Places a predetermined set of mines, for reproducible boards.
///
/// The configured mine count is ignored; the layout holds exactly the given mines, minus the start cell if it is
/// among them.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        if self.mines.contains(&start) {
            log::warn!("Fixed layout mines the start cell {:?}, leaving it safe", start);
        }

        let mines: Vec<Coord2> = self
            .mines
            .iter()
            .copied()
            .filter(|&coords| coords != start)
            .collect();
        MineLayout::from_mine_coords(config.size, &mines)
    }
}
