use crate::joker::JokerFlow;
use crate::phase::{ControlSet, PanelVisibility};
use crate::session::{GameSession, PlayerMirror, UiEvent};
use crate::tile::Tile;
use std::collections::BTreeMap;
use wordrack_protocol::{CellCoord, ClientRequest, GamePhase, PlayerMeta, PlayerPhase};

/// Snapshot reconciliation. Every application is a wholesale replacement
/// of its container; the server is the authority and wins over any local
/// tentative state it collides with.
impl GameSession {
    /// Rebuild the finalized board layer. Tentative tiles keep their cells
    /// and ledger entries unless a finalized tile now claims the same
    /// cell, in which case the local placement is discarded.
    pub fn apply_board_snapshot(&mut self, cells: &BTreeMap<CellCoord, char>) {
        self.board.drop_blocked();

        let mut ledger_changed = false;
        for (&cell, &letter) in cells {
            if let Some(displaced) = self.board.remove_at(cell) {
                log::debug!(
                    "board snapshot displaced tentative tile {} at {}",
                    displaced.id.0,
                    cell
                );
                ledger_changed |= self.ledger.remove(displaced.id);
                if self.joker.awaiting() == Some(displaced.id) {
                    self.joker = JokerFlow::Idle;
                }
            }
            let id = self.next_tile_id();
            let mut tile = Tile::new(id, letter);
            tile.blocked = true;
            self.board.place(tile, cell);
        }

        if ledger_changed {
            self.schedule_validation();
        }
        self.push_ui(UiEvent::BoardChanged);
    }

    /// Replace the rack from letter counts. Every letter expands into that
    /// many fresh tiles; prior rack identities are gone after this.
    pub fn apply_rack_snapshot(&mut self, letter_counts: &BTreeMap<char, u8>) {
        self.rack.clear();
        for (&letter, &count) in letter_counts {
            for _ in 0..count {
                let id = self.next_tile_id();
                self.rack.push(Tile::new(id, letter));
            }
        }
        self.push_ui(UiEvent::RackChanged);
    }

    /// Overwrite the mirrored roster, rederive whose turn it is, and
    /// refresh the own mirror, control set and rack.
    pub fn apply_roster_snapshot(&mut self, players: Vec<PlayerMeta>) {
        self.current_player = players
            .iter()
            .find(|p| p.phase == PlayerPhase::Playing)
            .map(|p| p.id);

        if let Some(meta) = players.iter().find(|p| p.id == self.player_id) {
            self.me = PlayerMirror {
                phase: meta.phase,
                points: meta.points,
                is_admin: meta.is_admin,
            };
            let controls = ControlSet::for_player(meta.phase);
            if controls != self.controls {
                self.controls = controls;
                self.push_ui(UiEvent::ControlsChanged);
            }
            let _ = self.send(ClientRequest::RequestRack);
        }

        self.roster = players;
        self.push_ui(UiEvent::LeaderboardChanged);
    }

    /// Overwrite the game mirror. Entering `Started` from any other phase
    /// pulls one authoritative full refresh; later `Started` snapshots do
    /// not repeat it.
    pub fn apply_game_snapshot(&mut self, phase: GamePhase, tiles_in_bag: u32) {
        let entered_started = phase == GamePhase::Started && self.game.phase != GamePhase::Started;

        self.game.phase = phase;
        self.game.tiles_in_bag = tiles_in_bag;
        if self.remaining_tiles != tiles_in_bag {
            self.remaining_tiles = tiles_in_bag;
            self.push_ui(UiEvent::RemainingTilesChanged);
        }

        let panels = PanelVisibility::for_game(phase);
        if panels != self.panels {
            self.panels = panels;
            self.push_ui(UiEvent::PanelsChanged);
        }

        if entered_started {
            let _ = self.send(ClientRequest::RequestUpdate);
        }
    }
}
