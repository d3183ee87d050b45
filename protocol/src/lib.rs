use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ---- Game Phases ----
///
/// Mirrored from the server; the client never advances these on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Undefined,
    WaitingForPlayers,
    OrderSelection,
    Started,
    Over,
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Undefined
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerPhase {
    Undefined,
    LobbyWaiting,
    LobbyReady,
    /// In the game, waiting to draw a turn-order tile.
    WaitingOrder,
    /// Waiting for another player to finish their move.
    Waiting,
    /// It is this player's turn.
    Playing,
    Won,
    Lost,
}

impl Default for PlayerPhase {
    fn default() -> Self {
        PlayerPhase::Undefined
    }
}

/// ---- Board Geometry ----
pub const BOARD_ROWS: u8 = 15;
pub const BOARD_COLS: u8 = 15;

/// Number of tiles a full rack holds.
pub const HAND_SIZE: usize = 7;

/// Display letter of a joker that has not been assigned a letter yet.
pub const BLANK: char = ' ';

/// A board cell. Wire form is the string `"row_col"` so that board
/// snapshots serialize as plain JSON maps keyed by cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoord {
    pub row: u8,
    pub col: u8,
}

impl CellCoord {
    pub fn new(row: u8, col: u8) -> Self {
        CellCoord { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellError(String);

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell coordinate: {:?}", self.0)
    }
}

impl std::error::Error for ParseCellError {}

impl FromStr for CellCoord {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once('_').ok_or_else(|| ParseCellError(s.into()))?;
        let row: u8 = row.parse().map_err(|_| ParseCellError(s.into()))?;
        let col: u8 = col.parse().map_err(|_| ParseCellError(s.into()))?;
        if row >= BOARD_ROWS || col >= BOARD_COLS {
            return Err(ParseCellError(s.into()));
        }
        Ok(CellCoord { row, col })
    }
}

impl Serialize for CellCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// ---- Tile Data ----
///
/// English tile set as `(letter, count, points)`. The blank tile carries no
/// points and keeps none after it is assigned a letter.
pub const TILE_DISTRIBUTION: &[(char, u8, u32)] = &[
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
    (BLANK, 2, 0),
];

/// Point value of a letter; the blank and unknown letters are worth zero.
pub fn letter_points(letter: char) -> u32 {
    TILE_DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == letter)
        .map(|(_, _, points)| *points)
        .unwrap_or(0)
}

/// One tentatively placed tile, as submitted for verification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlacedTile {
    pub tile_id: u64,
    pub letter: char,
    pub location: CellCoord,
    pub is_joker: bool,
}

/// ---- Players ----
///
/// Roster entry as reported by the server. The client holds these as read
/// replicas and never mutates them locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerMeta {
    pub id: Uuid,
    pub name: String,
    pub phase: PlayerPhase,
    pub points: u32,
    pub is_admin: bool,
    pub rack_count: u8,
}

/// ---- Requests & Responses ----
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientRequest {
    /// `version` is the ledger version the snapshot was taken at; the
    /// result echoes it back so stale answers can be dropped.
    VerifyWord {
        version: u64,
        tiles: Vec<PlacedTile>,
    },
    SubmitWord {
        tiles: Vec<PlacedTile>,
    },
    RequestRack,
    RequestOrder,
    ExchangeLetter {
        letter: char,
    },
    RequestHint {
        letters: Vec<char>,
    },
    SkipTurn,
    QuitGame,
    RequestUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServerEvent {
    VerifyWordResult {
        version: u64,
        status: Status,
        points: u32,
    },
    SubmitWordResult {
        status: Status,
        points: u32,
        message: Option<String>,
    },
    RackResult {
        status: Status,
        rack: BTreeMap<char, u8>,
        message: Option<String>,
    },
    OrderResult {
        status: Status,
        letter: char,
        message: Option<String>,
    },
    ExchangeResult {
        status: Status,
        message: Option<String>,
    },
    HintResult {
        status: Status,
        hint: String,
        message: Option<String>,
    },
    SkipTurnResult {
        status: Status,
        message: Option<String>,
    },
    QuitGameResult {
        status: Status,
        message: Option<String>,
    },
    UpdateAck {
        status: Status,
    },

    /// Authoritative snapshots. Each one replaces its whole container on
    /// the client; none of them is a diff.
    BoardSnapshot {
        cells: BTreeMap<CellCoord, char>,
    },
    RosterSnapshot {
        players: Vec<PlayerMeta>,
    },
    GameSnapshot {
        phase: GamePhase,
        tiles_in_bag: u32,
    },

    Notice {
        message: String,
    },
}
