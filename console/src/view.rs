use std::fmt::Write as _;

use minesweeper_core::*;
use ndarray::Array2;

use crate::coords::column_letter;

const HIDDEN: char = '+';
const FLAGGED: char = 'F';
const EMPTY: char = '.';
const MINE: char = '*';

/// Character grid kept in sync with the engine through its notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleView {
    field: Array2<char>,
    status: GameStatus,
    game_over: bool,
}

impl ConsoleView {
    pub fn new(size: Coord2) -> Self {
        Self {
            field: Array2::from_elem(size.to_nd_index(), HIDDEN),
            status: GameStatus::Playing,
            game_over: false,
        }
    }

    pub fn apply(&mut self, notification: &Notification) {
        match *notification {
            Notification::CellOpened {
                coords,
                surrounding_mines,
            } => {
                self.field[coords.to_nd_index()] = match surrounding_mines {
                    0 => EMPTY,
                    count => char::from_digit(count.into(), 10).unwrap_or('?'),
                };
            }
            Notification::CellFlagged { coords } => self.field[coords.to_nd_index()] = FLAGGED,
            Notification::CellUnflagged { coords } => self.field[coords.to_nd_index()] = HIDDEN,
            Notification::StatusChanged { status } => self.status = status,
            Notification::GameRestarted => {
                self.field.fill(HIDDEN);
                self.game_over = false;
            }
            Notification::GameOver => self.game_over = true,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether a game-over notification arrived since the last call.
    pub fn take_game_over(&mut self) -> bool {
        std::mem::take(&mut self.game_over)
    }

    pub fn reveal_mines(&mut self, mines: &[Coord2]) {
        for &coords in mines {
            self.field[coords.to_nd_index()] = MINE;
        }
    }

    pub fn render(&self) -> String {
        render_field(&self.field)
    }

    /// Renders with mines drawn in, leaving the kept field untouched.
    pub fn render_with_mines(&self, mines: &[Coord2]) -> String {
        let mut field = self.field.clone();
        for &coords in mines {
            field[coords.to_nd_index()] = MINE;
        }
        render_field(&field)
    }
}

fn render_field(field: &Array2<char>) -> String {
    let (size_x, size_y) = field.dim();
    let mut out = String::from("  ");

    for x in 0..size_x {
        let _ = write!(out, " {}", column_letter(x as Coord));
    }
    out.push('\n');

    for y in 0..size_y {
        let _ = write!(out, "{:>2}", y + 1);
        for x in 0..size_x {
            let _ = write!(out, " {}", field[[x, y]]);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_hidden_field_with_labels() {
        let view = ConsoleView::new((3, 2));

        assert_eq!(view.render(), "   a b c\n 1 + + +\n 2 + + +\n");
    }

    #[test]
    fn follows_cell_notifications() {
        let mut view = ConsoleView::new((3, 2));

        view.apply(&Notification::CellOpened {
            coords: (0, 0),
            surrounding_mines: 0,
        });
        view.apply(&Notification::CellOpened {
            coords: (1, 0),
            surrounding_mines: 2,
        });
        view.apply(&Notification::CellFlagged { coords: (2, 1) });
        assert_eq!(view.render(), "   a b c\n 1 . 2 +\n 2 + + F\n");

        view.apply(&Notification::CellUnflagged { coords: (2, 1) });
        assert_eq!(view.render(), "   a b c\n 1 . 2 +\n 2 + + +\n");
    }

    #[test]
    fn tracks_status_and_game_over() {
        let mut view = ConsoleView::new((2, 2));

        view.apply(&Notification::StatusChanged {
            status: GameStatus::Lose,
        });
        view.apply(&Notification::GameOver);
        assert_eq!(view.status(), GameStatus::Lose);
        assert!(view.take_game_over());
        assert!(!view.take_game_over());

        view.reveal_mines(&[(1, 1)]);
        assert_eq!(view.render(), "   a b\n 1 + +\n 2 + *\n");

        view.apply(&Notification::GameRestarted);
        assert_eq!(view.render(), ConsoleView::new((2, 2)).render());
    }

    #[test]
    fn mine_overlay_does_not_stick() {
        let view = ConsoleView::new((2, 1));

        assert_eq!(view.render_with_mines(&[(0, 0)]), "   a b\n 1 * +\n");
        assert_eq!(view.render(), "   a b\n 1 + +\n");
    }
}
