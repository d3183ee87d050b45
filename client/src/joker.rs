use crate::session::{CommandError, GameSession, UiEvent};
use crate::tile::TileId;

/// Modal sub-flow for assigning a letter to a joker dropped on the board.
/// While a selection is open the tile sits on the board but stays out of
/// the ledger, and no other interaction may touch the tile containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JokerFlow {
    #[default]
    Idle,
    AwaitingSelection {
        tile: TileId,
    },
}

impl JokerFlow {
    pub fn is_open(&self) -> bool {
        matches!(self, JokerFlow::AwaitingSelection { .. })
    }

    pub fn awaiting(&self) -> Option<TileId> {
        match self {
            JokerFlow::AwaitingSelection { tile } => Some(*tile),
            JokerFlow::Idle => None,
        }
    }
}

impl GameSession {
    /// Resolve the open joker selection to a concrete letter. The tile
    /// keeps zero points forever; the placement is committed to the
    /// ledger and verification is scheduled.
    pub fn choose_joker_letter(&mut self, letter: char) -> Result<(), CommandError> {
        let JokerFlow::AwaitingSelection { tile } = self.joker else {
            return Err(CommandError::NoSelectionOpen);
        };
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(CommandError::InvalidLetter);
        }

        let Some(placed) = self.board.find_mut(tile) else {
            // The board was refreshed out from under the dialog.
            self.joker = JokerFlow::Idle;
            return Err(CommandError::NoSelectionOpen);
        };
        placed.resolve(letter);
        let Some(cell) = placed.cell else {
            self.joker = JokerFlow::Idle;
            return Err(CommandError::NoSelectionOpen);
        };

        self.joker = JokerFlow::Idle;
        self.ledger.upsert(tile, letter, cell, true);
        self.schedule_validation();
        self.push_ui(UiEvent::BoardChanged);
        Ok(())
    }

    /// Dismiss the selection. The tile stays on the board with the blank
    /// glyph and zero points, still excluded from the ledger; the player
    /// has to pick a letter before a word through it can validate.
    pub fn cancel_joker_selection(&mut self) -> Result<(), CommandError> {
        let JokerFlow::AwaitingSelection { tile } = self.joker else {
            return Err(CommandError::NoSelectionOpen);
        };
        if let Some(placed) = self.board.find_mut(tile) {
            placed.blank();
        }
        self.joker = JokerFlow::Idle;
        self.push_ui(UiEvent::BoardChanged);
        Ok(())
    }
}
