pub mod board;
pub mod drag;
pub mod joker;
pub mod ledger;
pub mod phase;
pub mod session;
pub mod sync;
pub mod tile;
pub mod validate;


pub use board::{Board, Rack};
pub use drag::{ActiveDrag, DropOutcome, DropZone};
pub use joker::JokerFlow;
pub use ledger::{LedgerEntry, SelectionLedger};
pub use phase::{ControlSet, PanelVisibility};
pub use session::{CommandError, GameMirror, GameSession, PlayerMirror, UiEvent};
pub use tile::{Tile, TileId};
pub use validate::WordValidationClient;
