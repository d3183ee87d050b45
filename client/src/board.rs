use crate::tile::{Tile, TileId};
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::collections::HashMap;
use wordrack_protocol::CellCoord;

/// The player's private pool of unplayed tiles. Order is cosmetic only.
#[derive(Debug, Default)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn letters(&self) -> Vec<char> {
        self.tiles.iter().map(|t| t.letter).collect()
    }

    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn take(&mut self, id: TileId) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t.id == id)?;
        Some(self.tiles.remove(pos))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn shuffle(&mut self) {
        self.tiles.shuffle(&mut thread_rng());
    }
}

/// The shared grid. At most one tile per cell; tiles finalized by previous
/// turns carry the `blocked` marker and only snapshots may replace them.
#[derive(Debug, Default)]
pub struct Board {
    cells: HashMap<CellCoord, Tile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_at(&self, cell: CellCoord) -> Option<&Tile> {
        self.cells.get(&cell)
    }

    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.cells.values().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.cells.values_mut().find(|t| t.id == id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.values()
    }

    /// Place a tile on its cell. The caller resolves occupancy first; a
    /// tile landing on a taken cell replaces the occupant.
    pub fn place(&mut self, mut tile: Tile, cell: CellCoord) -> Option<Tile> {
        tile.cell = Some(cell);
        self.cells.insert(cell, tile)
    }

    pub fn take(&mut self, id: TileId) -> Option<Tile> {
        let cell = *self.cells.iter().find(|(_, t)| t.id == id)?.0;
        self.cells.remove(&cell)
    }

    pub fn remove_at(&mut self, cell: CellCoord) -> Option<Tile> {
        self.cells.remove(&cell)
    }

    /// Drop every finalized tile, keeping tentative placements. Used when
    /// a board snapshot rebuilds the finalized layer from scratch.
    pub fn drop_blocked(&mut self) {
        self.cells.retain(|_, t| !t.blocked);
    }

    /// Tentative (draggable) tiles currently on the board.
    pub fn tentative(&self) -> impl Iterator<Item = &Tile> {
        self.cells.values().filter(|t| !t.blocked)
    }

    pub fn tentative_ids(&self) -> Vec<TileId> {
        self.tentative().map(|t| t.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rack_takes_by_identity() {
        let mut rack = Rack::new();
        rack.push(Tile::new(TileId(1), 'A'));
        rack.push(Tile::new(TileId(2), 'B'));

        let taken = rack.take(TileId(1)).unwrap();
        assert_eq!(taken.letter, 'A');
        assert_eq!(rack.len(), 1);
        assert!(rack.take(TileId(1)).is_none());
    }

    #[test]
    fn drop_blocked_spares_tentative_tiles() {
        let mut board = Board::new();
        let mut finalized = Tile::new(TileId(1), 'K');
        finalized.blocked = true;
        board.place(finalized, CellCoord::new(7, 7));
        board.place(Tile::new(TileId(2), 'A'), CellCoord::new(7, 8));

        board.drop_blocked();
        assert!(board.tile_at(CellCoord::new(7, 7)).is_none());
        assert_eq!(
            board.tile_at(CellCoord::new(7, 8)).unwrap().cell,
            Some(CellCoord::new(7, 8))
        );
    }
}
