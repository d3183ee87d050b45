use crate::tile::TileId;
use std::collections::HashMap;
use wordrack_protocol::{CellCoord, PlacedTile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub letter: char,
    pub cell: CellCoord,
    pub is_joker: bool,
}

/// The set of tiles committed to board cells as the in-progress word
/// attempt. An entry exists iff its tile sits on a board cell with a
/// resolved letter; unresolved jokers are excluded until a letter is
/// chosen.
///
/// `version` increases on every content change. Verification requests
/// carry the version they were built against, so answers to a ledger that
/// has since moved on can be recognized and dropped.
#[derive(Debug, Default)]
pub struct SelectionLedger {
    entries: HashMap<TileId, LedgerEntry>,
    version: u64,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: TileId) -> Option<&LedgerEntry> {
        self.entries.get(&id)
    }

    /// Commit a placement. Re-placing a tile already in the ledger updates
    /// its entry in place rather than duplicating it.
    pub fn upsert(&mut self, id: TileId, letter: char, cell: CellCoord, is_joker: bool) {
        self.entries.insert(
            id,
            LedgerEntry {
                letter,
                cell,
                is_joker,
            },
        );
        self.version += 1;
    }

    /// Returns whether an entry was actually removed.
    pub fn remove(&mut self, id: TileId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            self.version += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.version += 1;
        }
    }

    /// Wire form of the current attempt, ordered by tile identity so the
    /// payload is deterministic.
    pub fn wire(&self) -> Vec<PlacedTile> {
        let mut tiles: Vec<PlacedTile> = self
            .entries
            .iter()
            .map(|(id, e)| PlacedTile {
                tile_id: id.0,
                letter: e.letter,
                location: e.cell,
                is_joker: e.is_joker,
            })
            .collect();
        tiles.sort_by_key(|t| t.tile_id);
        tiles
    }
}
