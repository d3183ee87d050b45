use wordrack_protocol::{GamePhase, PlayerPhase};

/// Which action controls are available to the player right now. Pure
/// derivation from the mirrored player phase; holds no state of its own
/// and is recomputed whenever the mirror changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSet {
    pub order_request: bool,
    pub exchange: bool,
    pub revert: bool,
    pub hint: bool,
    pub skip_turn: bool,
    pub submit: bool,
    /// Whether rack tiles react to dragging at all.
    pub rack: bool,
}

impl ControlSet {
    pub fn for_player(phase: PlayerPhase) -> Self {
        match phase {
            PlayerPhase::Playing => ControlSet {
                order_request: true,
                exchange: true,
                revert: true,
                hint: true,
                skip_turn: true,
                submit: true,
                rack: true,
            },
            // The order tile may be requested before the first real turn.
            PlayerPhase::WaitingOrder => ControlSet {
                order_request: true,
                ..ControlSet::default()
            },
            PlayerPhase::Undefined
            | PlayerPhase::LobbyWaiting
            | PlayerPhase::LobbyReady
            | PlayerPhase::Waiting
            | PlayerPhase::Won
            | PlayerPhase::Lost => ControlSet::default(),
        }
    }
}

/// Which structural panels the game phase makes visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelVisibility {
    pub turn_order: bool,
    pub rack: bool,
    pub order_token: bool,
}

impl PanelVisibility {
    pub fn for_game(phase: GamePhase) -> Self {
        match phase {
            GamePhase::OrderSelection => PanelVisibility {
                turn_order: true,
                ..PanelVisibility::default()
            },
            GamePhase::Started => PanelVisibility {
                rack: true,
                ..PanelVisibility::default()
            },
            GamePhase::Undefined | GamePhase::WaitingForPlayers | GamePhase::Over => {
                PanelVisibility::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_is_disabled_while_waiting() {
        let controls = ControlSet::for_player(PlayerPhase::Waiting);
        assert_eq!(controls, ControlSet::default());
        assert!(!controls.order_request);
    }

    #[test]
    fn playing_enables_the_full_set() {
        let controls = ControlSet::for_player(PlayerPhase::Playing);
        assert!(controls.order_request);
        assert!(controls.exchange);
        assert!(controls.revert);
        assert!(controls.hint);
        assert!(controls.skip_turn);
        assert!(controls.submit);
        assert!(controls.rack);
    }

    #[test]
    fn waiting_for_order_only_allows_the_order_request() {
        let controls = ControlSet::for_player(PlayerPhase::WaitingOrder);
        assert!(controls.order_request);
        assert!(!controls.submit);
        assert!(!controls.rack);
    }

    #[test]
    fn panel_visibility_follows_the_game_phase() {
        assert_eq!(
            PanelVisibility::for_game(GamePhase::WaitingForPlayers),
            PanelVisibility::default()
        );
        assert_eq!(
            PanelVisibility::for_game(GamePhase::OrderSelection),
            PanelVisibility {
                turn_order: true,
                rack: false,
                order_token: false
            }
        );
        assert_eq!(
            PanelVisibility::for_game(GamePhase::Started),
            PanelVisibility {
                turn_order: false,
                rack: true,
                order_token: false
            }
        );
        assert_eq!(
            PanelVisibility::for_game(GamePhase::Over),
            PanelVisibility::default()
        );
    }
}
