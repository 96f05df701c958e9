//! The output side of the game: what the engine announces and how a front end shows it.
use std::fmt;

use crate::board::Grid;

/// Announcement made by the engine while resolving a move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Message {
    /// The player uncovered a safe cell with this many neighboring mines.
    AdjacentMines(u8),
    /// The player uncovered a mine. The round is lost.
    Detonated,
    /// Every safe cell is uncovered. The round is won.
    Won,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Message::AdjacentMines(count) => write!(
                f,
                "This square contains {} adjacent mine{}.",
                count,
                if count == 1 { "" } else { "s" }
            ),
            Message::Detonated => f.write_str("Oh no, you detonated a mine! Game over."),
            Message::Won => f.write_str("Congratulations, you have won the game!"),
        }
    }
}

/// Sink for everything the player gets to see.
pub trait Output {
    /// Emit a single human-readable message.
    fn display_message(&mut self, message: &Message);

    /// Render the current state of the grid.
    fn display_grid(&mut self, grid: &Grid);
}

impl<O: Output + ?Sized> Output for &mut O {
    fn display_message(&mut self, message: &Message) {
        (**self).display_message(message)
    }

    fn display_grid(&mut self, grid: &Grid) {
        (**self).display_grid(grid)
    }
}

/// [`Output`] that keeps every message it is given and ignores grid renders.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Construct an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Output for MessageLog {
    fn display_message(&mut self, message: &Message) {
        self.messages.push(*message);
    }

    fn display_grid(&mut self, _grid: &Grid) {}
}
