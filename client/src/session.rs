use futures::channel::mpsc::UnboundedSender;
use thiserror::Error;
use uuid::Uuid;

use crate::board::{Board, Rack};
use crate::drag::ActiveDrag;
use crate::joker::JokerFlow;
use crate::ledger::SelectionLedger;
use crate::phase::{ControlSet, PanelVisibility};
use crate::tile::{Tile, TileId};
use crate::validate::WordValidationClient;
use wordrack_protocol::{ClientRequest, GamePhase, PlayerMeta, PlayerPhase, ServerEvent};

const LOG_CAP: usize = 400;

/// Read replica of the server-side game record. Overwritten wholesale by
/// snapshots, never advanced locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameMirror {
    pub phase: GamePhase,
    pub tiles_in_bag: u32,
}

/// Read replica of the own roster entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerMirror {
    pub phase: PlayerPhase,
    pub points: u32,
    pub is_admin: bool,
}

/// Why a command was refused. None of these is fatal; the caller surfaces
/// or ignores them and the session state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("action is not available in the current player phase")]
    ActionUnavailable,
    #[error("a joker letter selection is in progress")]
    SelectionInProgress,
    #[error("no joker letter selection is open")]
    NoSelectionOpen,
    #[error("joker letters must be A-Z")]
    InvalidLetter,
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("tile cannot be dragged")]
    NotDraggable,
    #[error("request channel is closed")]
    Disconnected,
}

/// Redraw hints for the rendering collaborator, drained after each batch
/// of session work. `Notice` carries a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    BoardChanged,
    RackChanged,
    LeaderboardChanged,
    PanelsChanged,
    ControlsChanged,
    TentativeScoreChanged,
    RemainingTilesChanged,
    OrderTileChanged,
    Notice(String),
}

/// One joined game from this client's point of view: the tile containers,
/// the tentative word attempt, the mirrored phases, and the outbound
/// request channel. Created on game entry and dropped by the owner on
/// quit or game over; everything here is mutated only from the command
/// methods, `handle_server_event` and `tick`, which all run on the one
/// event loop.
pub struct GameSession {
    pub(crate) game_id: Uuid,
    pub(crate) player_id: Uuid,
    pub(crate) player_name: String,

    pub(crate) game: GameMirror,
    pub(crate) me: PlayerMirror,
    pub(crate) roster: Vec<PlayerMeta>,
    pub(crate) current_player: Option<Uuid>,

    pub(crate) board: Board,
    pub(crate) rack: Rack,
    pub(crate) ledger: SelectionLedger,

    pub(crate) joker: JokerFlow,
    pub(crate) drag: Option<ActiveDrag>,
    pub(crate) controls: ControlSet,
    pub(crate) panels: PanelVisibility,
    pub(crate) validation: WordValidationClient,

    pub(crate) tentative_points: Option<u32>,
    pub(crate) remaining_tiles: u32,
    pub(crate) order_letter: Option<char>,
    pub(crate) order_tile: Option<Tile>,

    pub(crate) tile_seq: u64,
    pub(crate) tx_out: UnboundedSender<ClientRequest>,
    pub(crate) log: Vec<String>,
    pub(crate) ui_events: Vec<UiEvent>,
}

impl GameSession {
    pub fn new(
        game_id: Uuid,
        player_id: Uuid,
        player_name: String,
        tx_out: UnboundedSender<ClientRequest>,
    ) -> Self {
        GameSession {
            game_id,
            player_id,
            player_name,
            game: GameMirror::default(),
            me: PlayerMirror::default(),
            roster: Vec::new(),
            current_player: None,
            board: Board::new(),
            rack: Rack::new(),
            ledger: SelectionLedger::new(),
            joker: JokerFlow::Idle,
            drag: None,
            controls: ControlSet::default(),
            panels: PanelVisibility::default(),
            validation: WordValidationClient::new(),
            tentative_points: None,
            remaining_tiles: 0,
            order_letter: None,
            order_tile: None,
            tile_seq: 0,
            tx_out,
            log: Vec::new(),
            ui_events: Vec::new(),
        }
    }

    // ---- read access for the rendering collaborator ----

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn game(&self) -> GameMirror {
        self.game
    }

    pub fn me(&self) -> PlayerMirror {
        self.me
    }

    pub fn roster(&self) -> &[PlayerMeta] {
        &self.roster
    }

    /// Whoever the roster reports as currently playing.
    pub fn current_player(&self) -> Option<Uuid> {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn ledger(&self) -> &SelectionLedger {
        &self.ledger
    }

    pub fn joker_flow(&self) -> JokerFlow {
        self.joker
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    pub fn controls(&self) -> ControlSet {
        self.controls
    }

    pub fn panels(&self) -> PanelVisibility {
        self.panels
    }

    pub fn tentative_points(&self) -> Option<u32> {
        self.tentative_points
    }

    pub fn remaining_tiles(&self) -> u32 {
        self.remaining_tiles
    }

    pub fn order_letter(&self) -> Option<char> {
        self.order_letter
    }

    pub fn order_tile(&self) -> Option<&Tile> {
        self.order_tile.as_ref()
    }

    pub fn game_over(&self) -> bool {
        self.game.phase == GamePhase::Over
    }

    pub fn event_log(&self) -> &[String] {
        &self.log
    }

    pub fn take_ui_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.ui_events)
    }

    // ---- plumbing ----

    pub(crate) fn next_tile_id(&mut self) -> TileId {
        let id = TileId(self.tile_seq);
        self.tile_seq += 1;
        id
    }

    pub(crate) fn log<S: Into<String>>(&mut self, s: S) {
        self.log.push(s.into());
        if self.log.len() > LOG_CAP {
            self.log.remove(0);
        }
    }

    pub(crate) fn push_ui(&mut self, ev: UiEvent) {
        if matches!(ev, UiEvent::Notice(_)) || !self.ui_events.contains(&ev) {
            self.ui_events.push(ev);
        }
    }

    pub(crate) fn notice<S: Into<String>>(&mut self, s: S) {
        let s = s.into();
        self.log(s.clone());
        self.ui_events.push(UiEvent::Notice(s));
    }

    fn failure_notice(&mut self, message: Option<String>) {
        let msg = message.unwrap_or_else(|| "unknown error".into());
        self.notice(format!("Error: {msg}"));
    }

    pub(crate) fn send(&mut self, req: ClientRequest) -> Result<(), CommandError> {
        let echo = serde_json::to_string(&req).ok();
        match self.tx_out.unbounded_send(req) {
            Ok(()) => {
                if let Some(json) = echo {
                    self.log(format!("sent: {json}"));
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("request channel closed: {e}");
                self.log("not connected");
                Err(CommandError::Disconnected)
            }
        }
    }

    pub(crate) fn gate(&self, enabled: bool) -> Result<(), CommandError> {
        if enabled {
            Ok(())
        } else {
            Err(CommandError::ActionUnavailable)
        }
    }

    pub(crate) fn ensure_no_modal(&self) -> Result<(), CommandError> {
        if self.joker.is_open() {
            Err(CommandError::SelectionInProgress)
        } else {
            Ok(())
        }
    }

    pub(crate) fn set_tentative(&mut self, points: Option<u32>) {
        let points = points.filter(|p| *p > 0);
        if self.tentative_points != points {
            self.tentative_points = points;
            self.push_ui(UiEvent::TentativeScoreChanged);
        }
    }

    /// A ledger mutation happened. An empty ledger is nothing to validate:
    /// the tentative score clears right away and no request goes out.
    pub(crate) fn schedule_validation(&mut self) {
        if self.ledger.is_empty() {
            self.validation.cancel();
            self.set_tentative(None);
        } else {
            self.validation.schedule();
        }
    }

    /// Timer hook from the event loop; flushes debounced verification.
    pub fn tick(&mut self) {
        if let Some(req) = self.validation.flush(&self.ledger) {
            let _ = self.send(req);
        }
    }

    // ---- player actions ----

    pub fn submit_word(&mut self) -> Result<(), CommandError> {
        self.gate(self.controls.submit)?;
        self.ensure_no_modal()?;
        self.send(ClientRequest::SubmitWord {
            tiles: self.ledger.wire(),
        })
    }

    /// Return every tentative placement to the rack. Safe to call again on
    /// an already-clean board.
    pub fn revert_all(&mut self) -> Result<(), CommandError> {
        self.gate(self.controls.revert)?;
        self.ensure_no_modal()?;
        self.revert_placements();
        Ok(())
    }

    pub(crate) fn revert_placements(&mut self) {
        let ids = self.board.tentative_ids();
        if ids.is_empty() && self.ledger.is_empty() {
            self.set_tentative(None);
            return;
        }
        for id in ids {
            if let Some(mut tile) = self.board.take(id) {
                tile.blank();
                tile.cell = None;
                self.rack.push(tile);
            }
        }
        self.ledger.clear();
        self.validation.cancel();
        self.set_tentative(None);
        self.push_ui(UiEvent::BoardChanged);
        self.push_ui(UiEvent::RackChanged);
    }

    /// Cosmetic reorder; never phase-gated.
    pub fn shuffle_rack(&mut self) {
        self.rack.shuffle();
        self.push_ui(UiEvent::RackChanged);
    }

    pub fn request_order(&mut self) -> Result<(), CommandError> {
        self.gate(self.controls.order_request)?;
        self.send(ClientRequest::RequestOrder)
    }

    pub fn request_rack(&mut self) -> Result<(), CommandError> {
        self.send(ClientRequest::RequestRack)
    }

    /// Opening the exchange selector first returns all tentative tiles to
    /// the rack, then offers the rack contents to choose from.
    pub fn prepare_exchange(&mut self) -> Result<Vec<Tile>, CommandError> {
        self.gate(self.controls.exchange)?;
        self.ensure_no_modal()?;
        self.revert_placements();
        Ok(self.rack.tiles().to_vec())
    }

    pub fn exchange_letter(&mut self, letter: char) -> Result<(), CommandError> {
        self.gate(self.controls.exchange)?;
        self.send(ClientRequest::ExchangeLetter { letter })
    }

    pub fn request_hint(&mut self) -> Result<(), CommandError> {
        self.gate(self.controls.hint)?;
        self.send(ClientRequest::RequestHint {
            letters: self.rack.letters(),
        })
    }

    pub fn skip_turn(&mut self) -> Result<(), CommandError> {
        self.gate(self.controls.skip_turn)?;
        self.send(ClientRequest::SkipTurn)
    }

    pub fn quit_game(&mut self) -> Result<(), CommandError> {
        self.send(ClientRequest::QuitGame)
    }

    pub fn request_update(&mut self) -> Result<(), CommandError> {
        self.send(ClientRequest::RequestUpdate)
    }

    // ---- inbound events ----

    pub fn handle_server_event(&mut self, ev: ServerEvent) {
        match ev {
            ServerEvent::VerifyWordResult {
                version,
                status,
                points,
            } => {
                if !self.validation.accept(version, &self.ledger) {
                    return;
                }
                if status.is_success() {
                    self.set_tentative(Some(points));
                } else {
                    self.set_tentative(None);
                }
            }

            ServerEvent::SubmitWordResult {
                status,
                points,
                message,
            } => {
                if status.is_success() && points > 0 {
                    // The submit response reports the new running total,
                    // shown in the remaining-tiles box.
                    self.remaining_tiles = points;
                    self.push_ui(UiEvent::RemainingTilesChanged);
                    // The accepted placements are finalized in place; the
                    // next board snapshot replaces them authoritatively.
                    for placed in self.ledger.wire() {
                        if let Some(tile) = self.board.find_mut(TileId(placed.tile_id)) {
                            tile.blocked = true;
                        }
                    }
                    self.ledger.clear();
                    self.validation.cancel();
                    self.set_tentative(None);
                    self.push_ui(UiEvent::BoardChanged);
                    self.log("word submitted");
                } else {
                    self.set_tentative(None);
                    let msg = message.unwrap_or_else(|| "Word verification failed!".into());
                    self.notice(msg);
                }
            }

            ServerEvent::RackResult {
                status,
                rack,
                message,
            } => {
                if status.is_success() {
                    self.apply_rack_snapshot(&rack);
                } else {
                    self.failure_notice(message);
                }
            }

            ServerEvent::OrderResult {
                status,
                letter,
                message,
            } => {
                if status.is_success() {
                    self.order_letter = Some(letter);
                    let id = self.next_tile_id();
                    let mut tile = Tile::new(id, letter);
                    tile.blocked = true;
                    self.order_tile = Some(tile);
                    // Once the order tile is drawn the rack takes over.
                    self.panels = PanelVisibility {
                        turn_order: false,
                        rack: true,
                        order_token: false,
                    };
                    self.push_ui(UiEvent::OrderTileChanged);
                    self.push_ui(UiEvent::PanelsChanged);
                    self.log(format!("order tile: {letter}"));
                } else {
                    self.failure_notice(message);
                }
            }

            ServerEvent::ExchangeResult { status, message } => {
                if status.is_success() {
                    let _ = self.send(ClientRequest::RequestRack);
                } else {
                    self.failure_notice(message);
                }
            }

            ServerEvent::HintResult {
                status,
                hint,
                message,
            } => {
                if status.is_success() {
                    self.notice(format!("Hint: {hint}"));
                } else {
                    self.failure_notice(message);
                }
            }

            ServerEvent::SkipTurnResult { status, message } => {
                if !status.is_success() {
                    self.failure_notice(message);
                }
            }

            ServerEvent::QuitGameResult { status, message } => {
                if status.is_success() {
                    self.log("left the game");
                } else {
                    let msg = message.unwrap_or_else(|| "unknown error".into());
                    self.notice(format!("Cannot quit from the game: {msg}"));
                }
            }

            ServerEvent::UpdateAck { status } => {
                if !status.is_success() {
                    self.log("update request refused");
                }
            }

            ServerEvent::BoardSnapshot { cells } => self.apply_board_snapshot(&cells),
            ServerEvent::RosterSnapshot { players } => self.apply_roster_snapshot(players),
            ServerEvent::GameSnapshot {
                phase,
                tiles_in_bag,
            } => self.apply_game_snapshot(phase, tiles_in_bag),

            ServerEvent::Notice { message } => self.notice(message),
        }
    }
}
