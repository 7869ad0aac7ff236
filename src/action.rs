//! The action protocol: a closed, tagged set of state transitions.
//!
//! Each variant carries exactly the fields it needs — the player submitting
//! it, the card/target references, and, for any transition involving chance,
//! a caller-supplied [`RngSeq`] consumed in a fixed order. Peers and replays
//! that supply the same sequences reproduce identical outcomes.

use serde::{Deserialize, Serialize};

use crate::catalog::ChoiceOption;
use crate::rng::RngSeq;
use crate::state::{GameState, InstanceId, PlayerId};

/// How a formation card is being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseKind {
    Attack,
    Ability,
}

/// One submitted game action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Replace the entire state with a freshly constructed match, applying
    /// one-time habitat and formation start bonuses.
    InitGame { payload: Box<GameState> },
    /// Move a hand card into formation; upgrades replace their base instead.
    PlayCard {
        player: PlayerId,
        card: InstanceId,
        /// Upgrade target in formation; auto-resolved when unambiguous.
        target: Option<InstanceId>,
    },
    /// Spend the Evolve card to swap a formation card with a hand card.
    PlayEvolveCard {
        player: PlayerId,
        evolve: InstanceId,
        formation_target: InstanceId,
        hand_replacement: InstanceId,
    },
    /// Use a formation card as an attack or ability.
    UseAction {
        player: PlayerId,
        kind: UseKind,
        card: InstanceId,
        target: PlayerId,
        rng: RngSeq,
        /// Opponent hand card for theft effects.
        hand_target: Option<InstanceId>,
    },
    /// Answer a pending evade reaction.
    ResolveAgile {
        player: PlayerId,
        use_evade: bool,
        rng: RngSeq,
    },
    /// Answer a pending multi-way choice.
    ResolveChoice {
        player: PlayerId,
        choice: ChoiceOption,
        rng: RngSeq,
    },
    EndTurn { player: PlayerId, rng: RngSeq },
    ClearPoison { player: PlayerId },
    ClearLeech { player: PlayerId },
    AttemptGrappleEscape { player: PlayerId, rng: RngSeq },
    UseHabitatAction { player: PlayerId, rng: RngSeq },
    AcknowledgeCoinFlip,
    DismissNotification { id: u32 },
}

impl Action {
    /// The player submitting this action, when the variant names one.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        match self {
            Action::PlayCard { player, .. }
            | Action::PlayEvolveCard { player, .. }
            | Action::UseAction { player, .. }
            | Action::ResolveAgile { player, .. }
            | Action::ResolveChoice { player, .. }
            | Action::EndTurn { player, .. }
            | Action::ClearPoison { player }
            | Action::ClearLeech { player }
            | Action::AttemptGrappleEscape { player, .. }
            | Action::UseHabitatAction { player, .. } => Some(*player),
            Action::InitGame { .. }
            | Action::AcknowledgeCoinFlip
            | Action::DismissNotification { .. } => None,
        }
    }

    /// Does this action only touch UI bookkeeping?
    #[must_use]
    pub fn is_ui_only(&self) -> bool {
        matches!(
            self,
            Action::AcknowledgeCoinFlip | Action::DismissNotification { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_actor() {
        let action = Action::EndTurn {
            player: PlayerId::new(1),
            rng: smallvec![0.5],
        };
        assert_eq!(action.actor(), Some(PlayerId::new(1)));
        assert_eq!(Action::AcknowledgeCoinFlip.actor(), None);
    }

    #[test]
    fn test_ui_only() {
        assert!(Action::AcknowledgeCoinFlip.is_ui_only());
        assert!(Action::DismissNotification { id: 3 }.is_ui_only());
        assert!(!Action::ClearPoison {
            player: PlayerId::new(0)
        }
        .is_ui_only());
    }

    #[test]
    fn test_serde_round_trip() {
        let action = Action::UseAction {
            player: PlayerId::new(0),
            kind: UseKind::Attack,
            card: InstanceId::new(12),
            target: PlayerId::new(1),
            rng: smallvec![0.1, 0.9],
            hand_target: None,
        };

        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
