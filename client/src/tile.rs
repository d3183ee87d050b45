use wordrack_protocol::{letter_points, CellCoord, BLANK};

/// Session-unique tile identity. Assigned once on creation, strictly
/// increasing, never reused for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

/// One letter tile. Owned by exactly one container at a time: the rack
/// (`cell == None`) or a single board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub is_joker: bool,
    /// Zero for a joker, resolved or not; the letter value otherwise.
    pub points: u32,
    pub cell: Option<CellCoord>,
    /// Finalized by a previous turn (or an order token); not draggable.
    pub blocked: bool,
}

impl Tile {
    pub fn new(id: TileId, letter: char) -> Self {
        let is_joker = letter == BLANK;
        Tile {
            id,
            letter,
            is_joker,
            points: if is_joker { 0 } else { letter_points(letter) },
            cell: None,
            blocked: false,
        }
    }

    /// Joker still showing the blank glyph, waiting for a letter.
    pub fn is_unresolved_joker(&self) -> bool {
        self.is_joker && self.letter == BLANK
    }

    /// Assign the chosen display letter to a joker. Points stay at zero.
    pub fn resolve(&mut self, letter: char) {
        self.letter = letter;
        self.points = 0;
    }

    /// Revert a joker to the blank glyph. No effect on ordinary tiles.
    pub fn blank(&mut self) {
        if self.is_joker {
            self.letter = BLANK;
            self.points = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_tile_takes_fixed_points() {
        let tile = Tile::new(TileId(1), 'Q');
        assert_eq!(tile.points, 10);
        assert!(!tile.is_joker);
        assert!(tile.cell.is_none());
    }

    #[test]
    fn joker_stays_at_zero_points_through_resolution() {
        let mut tile = Tile::new(TileId(2), BLANK);
        assert!(tile.is_unresolved_joker());
        assert_eq!(tile.points, 0);

        tile.resolve('Z');
        assert_eq!(tile.letter, 'Z');
        assert_eq!(tile.points, 0);
        assert!(tile.is_joker);
        assert!(!tile.is_unresolved_joker());

        tile.blank();
        assert!(tile.is_unresolved_joker());
        assert_eq!(tile.points, 0);
    }

    #[test]
    fn blank_leaves_ordinary_tiles_alone() {
        let mut tile = Tile::new(TileId(3), 'E');
        tile.blank();
        assert_eq!(tile.letter, 'E');
        assert_eq!(tile.points, 1);
    }
}
