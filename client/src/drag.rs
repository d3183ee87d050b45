use crate::joker::JokerFlow;
use crate::session::{CommandError, GameSession, UiEvent};
use crate::tile::TileId;
use wordrack_protocol::CellCoord;

/// Hit-test result from the input adapter. The adapter only reports which
/// zone the pointer released over; occupancy is judged here against the
/// session's own board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Cell(CellCoord),
    Rack,
    Outside,
}

/// The five drop cases the placement policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropClass {
    EmptyCell(CellCoord),
    /// The dragged tile's own origin cell.
    OwnOrigin(CellCoord),
    OccupiedByOther,
    RackArea,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(CellCoord),
    /// Placed, but the joker needs a letter before the ledger sees it.
    AwaitingJoker(CellCoord),
    Withdrawn,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub tile: TileId,
    /// `None` when the drag started from the rack.
    pub origin: Option<CellCoord>,
    pub pointer: (f32, f32),
}

impl GameSession {
    /// Pick a tile up. Refused while the joker dialog is open, while
    /// another drag is active, when the rack is not interactive, or when
    /// the tile is finalized or unknown.
    pub fn begin_drag(&mut self, id: TileId) -> Result<(), CommandError> {
        self.ensure_no_modal()?;
        if self.drag.is_some() {
            return Err(CommandError::DragInProgress);
        }
        self.gate(self.controls.rack)?;

        let origin = if self.rack.get(id).is_some() {
            None
        } else {
            match self.board.find(id) {
                Some(tile) if !tile.blocked => tile.cell,
                _ => return Err(CommandError::NotDraggable),
            }
        };

        self.drag = Some(ActiveDrag {
            tile: id,
            origin,
            pointer: (0.0, 0.0),
        });
        Ok(())
    }

    pub fn update_drag_position(&mut self, x: f32, y: f32) {
        if let Some(drag) = &mut self.drag {
            drag.pointer = (x, y);
        }
    }

    /// Release the drag and resolve the drop. Returns `None` when nothing
    /// happened: no drag was active, or the dragged tile disappeared under
    /// a snapshot refresh mid-flight (the drop then completes against the
    /// refreshed containers as a no-op).
    pub fn end_drag(&mut self, zone: DropZone) -> Option<DropOutcome> {
        let drag = self.drag.take()?;
        let class = self.classify(&drag, zone);

        let mut tile = self
            .rack
            .take(drag.tile)
            .or_else(|| self.board.take(drag.tile))?;
        let from_board = drag.origin.is_some();

        // Dropping a joker always re-blanks it; placing it again re-opens
        // the letter selection.
        tile.blank();

        let outcome = match class {
            DropClass::OccupiedByOther | DropClass::Invalid => {
                tile.cell = None;
                self.rack.push(tile);
                self.ledger.remove(drag.tile);
                self.push_ui(UiEvent::RackChanged);
                if from_board {
                    self.push_ui(UiEvent::BoardChanged);
                }
                self.log(format!("tile {} returned to rack", drag.tile.0));
                DropOutcome::Rejected
            }

            DropClass::EmptyCell(cell) | DropClass::OwnOrigin(cell) => {
                let letter = tile.letter;
                let is_joker = tile.is_joker;
                let unresolved_joker = tile.is_unresolved_joker();
                self.board.place(tile, cell);
                self.push_ui(UiEvent::BoardChanged);
                if !from_board {
                    self.push_ui(UiEvent::RackChanged);
                }
                if unresolved_joker {
                    // A stale entry from an earlier resolution must not
                    // survive into the selection window.
                    self.ledger.remove(drag.tile);
                    self.joker = JokerFlow::AwaitingSelection { tile: drag.tile };
                    DropOutcome::AwaitingJoker(cell)
                } else {
                    self.ledger.upsert(drag.tile, letter, cell, is_joker);
                    DropOutcome::Placed(cell)
                }
            }

            DropClass::RackArea => {
                tile.cell = None;
                self.rack.push(tile);
                self.ledger.remove(drag.tile);
                self.push_ui(UiEvent::RackChanged);
                if from_board {
                    self.push_ui(UiEvent::BoardChanged);
                }
                DropOutcome::Withdrawn
            }
        };

        // Every resolution re-checks the word against the ledger.
        self.schedule_validation();

        Some(outcome)
    }

    fn classify(&self, drag: &ActiveDrag, zone: DropZone) -> DropClass {
        match zone {
            DropZone::Rack => DropClass::RackArea,
            DropZone::Outside => DropClass::Invalid,
            DropZone::Cell(cell) => match self.board.tile_at(cell) {
                None => DropClass::EmptyCell(cell),
                Some(t) if t.id == drag.tile => DropClass::OwnOrigin(cell),
                Some(_) => DropClass::OccupiedByOther,
            },
        }
    }
}
