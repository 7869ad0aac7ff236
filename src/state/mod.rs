//! Authoritative game state.
//!
//! A `GameState` is created once per match by the factory and thereafter
//! only replaced by the resolver's pure transitions. The append-only log and
//! notification queue use `im` persistent vectors so snapshots stay cheap.

mod player;

pub use player::{CardInstance, InstanceId, InstanceIds, PlayerId, PlayerState, Players};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardId, ChoiceOption, Habitat};
use crate::rng::CoinSide;

/// Coarse game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Match constructed, start-of-game bookkeeping pending.
    Start,
    /// Normal play.
    Action,
    /// Winner decided; no further mutating transitions.
    End,
}

/// The last coin flip, kept for display and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlip {
    pub result: CoinSide,
    pub reason: String,
}

/// Severity of a user-visible notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Error,
    Success,
    Warning,
}

/// Transient UI notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// An unresolved interrupt: the defender may evade before damage lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReaction {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub card: CardId,
}

/// An unresolved interrupt: the actor picks one of several branches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChoice {
    pub player: PlayerId,
    pub card: CardId,
    pub options: Vec<ChoiceOption>,
    pub target: PlayerId,
}

/// The most recently resolved use-card action, for copy effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub player: PlayerId,
    pub card: CardId,
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub habitat: Habitat,
    /// Strictly increasing; bumps on every turn change.
    pub turn: u32,
    pub current_player: PlayerId,
    pub players: Players<PlayerState>,
    /// Append-only event log.
    pub log: Vector<String>,
    pub winner: Option<PlayerId>,
    pub phase: Phase,
    pub notifications: Vector<Notification>,
    pub active_flip: Option<CoinFlip>,
    pub pending_reaction: Option<PendingReaction>,
    pub pending_choice: Option<PendingChoice>,
    pub last_action: Option<LastAction>,
    pub instances: InstanceIds,
    next_notification: u32,
}

impl GameState {
    /// Assemble a match from two fully-built players.
    #[must_use]
    pub fn new(
        habitat: Habitat,
        players: Players<PlayerState>,
        instances: InstanceIds,
    ) -> Self {
        Self {
            habitat,
            turn: 1,
            current_player: PlayerId::new(0),
            players,
            log: Vector::new(),
            winner: None,
            phase: Phase::Start,
            notifications: Vector::new(),
            active_flip: None,
            pending_reaction: None,
            pending_choice: None,
            last_action: None,
            instances,
            next_notification: 0,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        self.players.get_mut(id)
    }

    /// Append a turn-stamped line to the event log.
    pub fn record(&mut self, message: impl Into<String>) {
        let line = format!("[T{}] {}", self.turn, message.into());
        self.log.push_back(line);
    }

    /// Queue a user-visible notification.
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.next_notification;
        self.next_notification += 1;
        self.notifications.push_back(Notification {
            id,
            kind,
            message: message.into(),
        });
    }

    pub fn dismiss_notification(&mut self, id: u32) {
        self.notifications.retain(|n| n.id != id);
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::End
    }

    /// Is any interrupt awaiting an answer?
    #[must_use]
    pub fn has_interrupt(&self) -> bool {
        self.pending_reaction.is_some() || self.pending_choice.is_some()
    }

    /// Every card instance across all zones of both players.
    pub fn all_instances(&self) -> impl Iterator<Item = &CardInstance> {
        self.players.iter().flat_map(|(_, p)| {
            p.hand
                .iter()
                .chain(p.deck.iter())
                .chain(p.discard.iter())
                .chain(p.formation.iter())
        })
    }
}
