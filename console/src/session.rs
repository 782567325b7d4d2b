use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use minesweeper_core::*;

use crate::command::{Command, HELP};
use crate::coords::format_coords;
use crate::view::ConsoleView;

/// One console game: the engine plus the view subscribed to it.
pub struct Session<G = RandomMineGenerator> {
    engine: GameEngine<G>,
    view: Arc<Mutex<ConsoleView>>,
}

impl<G: MineGenerator> Session<G> {
    pub fn new(mut engine: GameEngine<G>) -> Self {
        let view = Arc::new(Mutex::new(ConsoleView::new(engine.size())));
        let observed = Arc::clone(&view);
        engine.subscribe_all(move |notification: &Notification| {
            lock(&observed).apply(notification)
        });
        Self { engine, view }
    }

    pub fn engine(&self) -> &GameEngine<G> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<G> {
        &mut self.engine
    }

    pub fn render(&self) -> String {
        lock(&self.view).render()
    }

    /// Runs a command and returns what to print. [`Command::Quit`] is left to the caller.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        let message = match command {
            Command::Open(coords) => {
                let outcome = self.engine.open_cell(coords)?;
                log::debug!("open {:?}: {:?}", coords, outcome);
                match outcome {
                    RevealOutcome::Opened => String::new(),
                    RevealOutcome::Won => "You win! Type `restart` to play again.".to_owned(),
                    RevealOutcome::HitMine => {
                        "Boom! You lose. Type `restart` to play again.".to_owned()
                    }
                    RevealOutcome::NoChange => self.rejected(coords, "opened"),
                }
            }
            Command::Flag(coords) => {
                let outcome = self.engine.set_flag(coords)?;
                self.mark_message(coords, outcome, "flagged")
            }
            Command::Unflag(coords) => {
                let outcome = self.engine.unset_flag(coords)?;
                self.mark_message(coords, outcome, "unflagged")
            }
            Command::Toggle(coords) => {
                let outcome = self.engine.toggle_flag(coords)?;
                self.mark_message(coords, outcome, "flagged")
            }
            Command::Mines => {
                let mines = self.engine.mines();
                if mines.is_empty() {
                    return Ok("No mines yet, they are placed on the first open.".to_owned());
                }
                return Ok(lock(&self.view).render_with_mines(&mines));
            }
            Command::Restart => {
                self.engine.restart();
                "New game.".to_owned()
            }
            Command::Help => return Ok(HELP.to_owned()),
            Command::Quit => return Ok(String::new()),
        };

        let mut view = lock(&self.view);
        if view.take_game_over() {
            view.reveal_mines(&self.engine.mines());
        }

        let mut out = view.render();
        if !message.is_empty() {
            out.push_str(&message);
            out.push('\n');
        }
        Ok(out)
    }

    fn mark_message(&self, coords: Coord2, outcome: MarkOutcome, verb: &str) -> String {
        if outcome.has_update() {
            String::new()
        } else {
            self.rejected(coords, verb)
        }
    }

    fn rejected(&self, coords: Coord2, verb: &str) -> String {
        if lock(&self.view).status().is_over() {
            "The game is over, type `restart` to play again.".to_owned()
        } else {
            format!("Cell {} can't be {}.", format_coords(coords), verb)
        }
    }
}

fn lock(view: &Mutex<ConsoleView>) -> MutexGuard<'_, ConsoleView> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINES: [Coord2; 12] = [
        (1, 0),
        (0, 1),
        (1, 1),
        (9, 9),
        (8, 9),
        (9, 8),
        (5, 5),
        (5, 6),
        (6, 5),
        (3, 8),
        (8, 2),
        (2, 5),
    ];

    fn session() -> Session<FixedMineGenerator> {
        let engine = GameEngine::with_generator(GameConfig::STANDARD, FixedMineGenerator::new(&MINES));
        Session::new(engine)
    }

    fn row(out: &str, number: usize) -> &str {
        out.lines().nth(number).unwrap()
    }

    #[test]
    fn opening_updates_the_field() {
        let mut session = session();

        let out = session.execute(Command::Open((2, 0))).unwrap();

        assert_eq!(row(&out, 1), " 1 + + 2 + + + + + + +");
        assert_eq!(out.lines().count(), 11);
    }

    #[test]
    fn flags_are_drawn_and_rejections_explained() {
        let mut session = session();

        let out = session.execute(Command::Flag((0, 0))).unwrap();
        assert_eq!(row(&out, 1), " 1 F + + + + + + + + +");

        let out = session.execute(Command::Flag((0, 0))).unwrap();
        assert!(out.ends_with("Cell a1 can't be flagged.\n"));

        let out = session.execute(Command::Open((0, 0))).unwrap();
        assert!(out.ends_with("Cell a1 can't be opened.\n"));

        let out = session.execute(Command::Toggle((0, 0))).unwrap();
        assert_eq!(row(&out, 1), " 1 + + + + + + + + + +");
    }

    #[test]
    fn losing_reveals_every_mine() {
        let mut session = session();
        session.execute(Command::Open((2, 0))).unwrap();

        let out = session.execute(Command::Open((1, 0))).unwrap();

        assert!(out.ends_with("Boom! You lose. Type `restart` to play again.\n"));
        assert_eq!(out.matches('*').count(), 12);
        assert_eq!(session.engine().status(), GameStatus::Lose);

        let out = session.execute(Command::Open((4, 0))).unwrap();
        assert!(out.ends_with("The game is over, type `restart` to play again.\n"));
    }

    #[test]
    fn restart_clears_the_field() {
        let mut session = session();
        session.execute(Command::Open((2, 0))).unwrap();
        session.execute(Command::Open((1, 0))).unwrap();

        let out = session.execute(Command::Restart).unwrap();

        assert_eq!(out.matches('+').count(), 100);
        assert!(out.ends_with("New game.\n"));
        assert_eq!(session.engine().status(), GameStatus::Playing);
    }

    #[test]
    fn mines_command_waits_for_placement() {
        let mut session = session();

        let out = session.execute(Command::Mines).unwrap();
        assert_eq!(out, "No mines yet, they are placed on the first open.");

        session.execute(Command::Open((2, 0))).unwrap();
        let out = session.execute(Command::Mines).unwrap();
        assert_eq!(out.matches('*').count(), 12);
        assert!(!session.render().contains('*'));
    }
}
