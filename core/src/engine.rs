use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Win
/// - Playing -> Lose
/// - Win -> Playing, Lose -> Playing (restart only)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Win,
    Lose,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

/// Owns the grid and the rules of one game at a time, and tells its observers about every change.
///
/// Mines are placed by every [`open_cell`](Self::open_cell) made while no cell is opened yet, never under the cell
/// being opened.
#[derive(Debug)]
pub struct GameEngine<G = RandomMineGenerator> {
    config: GameConfig,
    generator: G,
    mine_layout: Option<MineLayout>,
    board: Array2<CellState>,
    opened_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
    dispatcher: EventDispatcher,
}

impl GameEngine<RandomMineGenerator> {
    /// Standard 10×10 game with 12 mines, placed from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_generator(GameConfig::STANDARD, RandomMineGenerator::new(seed))
    }
}

impl<G: MineGenerator> GameEngine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            mine_layout: None,
            board: Array2::default(config.size.to_nd_index()),
            opened_count: 0,
            flagged_count: 0,
            status: GameStatus::Playing,
            triggered_mine: None,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        kind: NotificationKind,
        observer: impl Observer + 'static,
    ) -> SubscriptionId {
        self.dispatcher.subscribe(kind, observer)
    }

    pub fn subscribe_all(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.dispatcher.subscribe_all(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout
            .as_ref()
            .map_or(self.config.mines, MineLayout::mine_count)
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flagged_count as isize)
    }

    pub fn mines_placed(&self) -> bool {
        self.mine_layout.is_some()
    }

    /// The mine whose opening lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the grid.
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    pub fn is_opened(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_opened()
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_flagged()
    }

    /// Always `false` before the first cell of the game is opened.
    pub fn is_mined(&self, coords: Coord2) -> bool {
        self.mine_layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Mines around an opened cell, `None` while the cell is unopened.
    pub fn surrounding_mines(&self, coords: Coord2) -> Option<u8> {
        self.cell_at(coords).surrounding_mines()
    }

    /// Coordinates of every mine, empty until mines are placed.
    pub fn mines(&self) -> Vec<Coord2> {
        self.mine_layout
            .as_ref()
            .map(MineLayout::mine_coords)
            .unwrap_or_default()
    }

    /// Opens a cell at the player's request, cascading over cells without surrounding mines.
    ///
    /// Returns [`RevealOutcome::NoChange`] when the game is over or the cell is already opened or flagged.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.status.is_over() {
            return Ok(RevealOutcome::NoChange);
        }

        // rejected first opens (flagged target) place again on the next try
        if self.opened_count == 0 {
            let layout = self.generator.generate(self.config, coords)?;
            log::debug!(
                "Placed {} mines, first open at {:?}",
                layout.mine_count(),
                coords
            );
            self.mine_layout = Some(layout);
        }

        if !matches!(self.cell_at(coords), CellState::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.is_mined(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.set_status(GameStatus::Lose);
            self.dispatcher.dispatch(Notification::GameOver);
            return Ok(RevealOutcome::HitMine);
        }

        let surrounding_mines = self.open_safe_cell(coords);
        if self.check_win() {
            return Ok(RevealOutcome::Won);
        }

        if surrounding_mines == 0 && self.flood_fill(coords) {
            return Ok(RevealOutcome::Won);
        }

        Ok(RevealOutcome::Opened)
    }

    /// Flags or unflags an unopened cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        Ok(match self.cell_at(coords) {
            CellState::Hidden => self.mark(coords, true),
            CellState::Flagged => self.mark(coords, false),
            CellState::Opened(_) => MarkOutcome::NoChange,
        })
    }

    pub fn set_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        Ok(match self.cell_at(coords) {
            CellState::Hidden => self.mark(coords, true),
            CellState::Flagged | CellState::Opened(_) => MarkOutcome::NoChange,
        })
    }

    pub fn unset_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        Ok(match self.cell_at(coords) {
            CellState::Flagged => self.mark(coords, false),
            CellState::Hidden | CellState::Opened(_) => MarkOutcome::NoChange,
        })
    }

    /// Starts a new game on the same engine. Subscriptions are kept.
    pub fn restart(&mut self) {
        self.mine_layout = None;
        self.board.fill(CellState::Hidden);
        self.opened_count = 0;
        self.flagged_count = 0;
        self.triggered_mine = None;
        log::debug!("Game restarted");

        self.dispatcher.dispatch(Notification::GameRestarted);
        self.set_status(GameStatus::Playing);
    }

    /// Flags are frozen once the game is over.
    fn mark(&mut self, coords: Coord2, flagged: bool) -> MarkOutcome {
        if self.status.is_over() {
            return MarkOutcome::NoChange;
        }

        if flagged {
            self.board[coords.to_nd_index()] = CellState::Flagged;
            self.flagged_count += 1;
            self.dispatcher
                .dispatch(Notification::CellFlagged { coords });
            MarkOutcome::Flagged
        } else {
            self.board[coords.to_nd_index()] = CellState::Hidden;
            self.flagged_count -= 1;
            self.dispatcher
                .dispatch(Notification::CellUnflagged { coords });
            MarkOutcome::Unflagged
        }
    }

    /// Opens a hidden cell known to be free of mines and returns its surrounding mine count.
    fn open_safe_cell(&mut self, coords: Coord2) -> u8 {
        let surrounding_mines = self
            .mine_layout
            .as_ref()
            .map_or(0, |layout| layout.adjacent_mine_count(coords));
        self.board[coords.to_nd_index()] = CellState::Opened(surrounding_mines);
        self.opened_count += 1;

        self.dispatcher.dispatch(Notification::CellOpened {
            coords,
            surrounding_mines,
        });
        surrounding_mines
    }

    /// Opens everything reachable from `origin` through cells without surrounding mines. Returns whether that won
    /// the game.
    fn flood_fill(&mut self, origin: Coord2) -> bool {
        let mut to_visit: VecDeque<Coord2> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(coords) = to_visit.pop_front() {
            // queued twice, flagged since, or a mine
            if !matches!(self.cell_at(coords), CellState::Hidden) || self.is_mined(coords) {
                continue;
            }

            let surrounding_mines = self.open_safe_cell(coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                coords,
                surrounding_mines
            );

            if self.check_win() {
                return true;
            }

            if surrounding_mines == 0 {
                to_visit.extend(self.hidden_neighbors(coords));
            }
        }

        false
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.board
            .neighbors(coords)
            .filter(|&pos| matches!(self.cell_at(pos), CellState::Hidden))
    }

    fn check_win(&mut self) -> bool {
        let safe_cells = self
            .mine_layout
            .as_ref()
            .map_or(self.config.safe_cell_count(), MineLayout::safe_cell_count);

        if self.opened_count == safe_cells {
            log::debug!("All {} safe cells opened", safe_cells);
            self.set_status(GameStatus::Win);
            true
        } else {
            false
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status == status {
            return;
        }

        log::debug!("Status {:?} -> {:?}", self.status, status);
        self.status = status;
        self.dispatcher
            .dispatch(Notification::StatusChanged { status });
    }
}
