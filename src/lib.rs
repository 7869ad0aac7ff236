//! # wildclash
//!
//! A deterministic rules engine for a two-player, turn-based creature-combat
//! card game.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `resolver::resolve(catalog, state, action)`
//!    returns the next authoritative state and never mutates its input.
//!    Failed preconditions return the prior state plus a notification.
//!
//! 2. **External randomness**: chance-bearing actions carry their own draw
//!    sequences, so identical `(state, action)` pairs always produce
//!    identical results and remote peers replay exactly.
//!
//! 3. **Interrupts as data**: "the defender may react" and "pick a branch"
//!    are pending-reaction/pending-choice records on the state, not control
//!    flow. The driver stops dispatching ordinary actions until the
//!    designated player answers.
//!
//! 4. **Catalog-driven effects**: card behavior lives in effect descriptors
//!    (attack profiles, ability ops, passive markers) plus a short list of
//!    named special handlers, so new cards extend data rather than code.
//!
//! ## Modules
//!
//! - `catalog`: card definitions, effect descriptors, the builtin set
//! - `state`: players, zones, statuses, the authoritative game state
//! - `status`: status vocabulary and stacking/expiry rules
//! - `action`: the closed action protocol
//! - `rng`: caller-supplied draw streams and the seeded factory RNG
//! - `factory`: deck generation and match setup
//! - `resolver`: the state-transition engine and win check
//! - `ai`: heuristic action proposer (collaborator contract)
//! - `wire`: transport codec for actions and state syncs

pub mod action;
pub mod ai;
pub mod catalog;
pub mod factory;
pub mod resolver;
pub mod rng;
pub mod state;
pub mod status;
pub mod wire;

pub use crate::action::{Action, UseKind};
pub use crate::catalog::{
    cards, CardDef, CardId, Catalog, Category, ChoiceOption, Consumable, CreatureKind, Habitat,
    KindSet, SizeClass,
};
pub use crate::factory::{create_player, new_match};
pub use crate::resolver::{resolve, EVADE_COST};
pub use crate::rng::{CoinSide, GameRng, GameRngState, RngSeq, RngStream};
pub use crate::state::{
    CardInstance, CoinFlip, GameState, InstanceId, LastAction, Notification, NoticeKind,
    PendingChoice, PendingReaction, Phase, PlayerId, PlayerState, Players,
};
pub use crate::status::{Status, StatusId, StatusSet};
pub use crate::wire::{decode_frame, encode_frame, Frame, FrameReader, WireError};
