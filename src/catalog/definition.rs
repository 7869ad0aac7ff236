//! Card definitions and effect descriptors.
//!
//! Per-card behavior is expressed as data: an optional [`AttackProfile`], an
//! optional [`AbilityProfile`], a list of [`Passive`] markers the resolver
//! scans during combat, and a [`Special`] tag for the handful of cards whose
//! behavior cannot be tabulated (choice branching, mimicry, card theft,
//! evolution). The resolver dispatches on these descriptors instead of
//! matching card ids.

use serde::{Deserialize, Serialize};

use super::{Category, Consumable, Habitat, KindSet, SizeClass};
use crate::status::StatusId;

/// Unique identifier for a card definition.
///
/// Identifies the card "type" (e.g. Bite), not a specific instance in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Base damage of an attack before modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageBase {
    /// Flat base damage.
    Fixed(i32),
    /// Stronger while the attacker holds the Flying status (Dive Bomb).
    Airborne { grounded: i32, flying: i32 },
    /// Full damage only at or above a minimum size. A smaller attacker
    /// springs away instead, gaining the Evading status for one attack.
    SizeGated { min: SizeClass, amount: i32 },
}

/// Whether an attack prevents the defender's evade reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvadeLock {
    No,
    /// The defender can never react (Swim Fast's chase).
    Always,
    /// Locked only if the attacker flips heads (Ambush Attack).
    OnHeads,
}

/// Side effect applied after attack damage lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnHit {
    Poison,
    PoisonOnTails,
    Grapple,
    GrappleOnHeads,
    /// Attach a Leeched status sourced to the attacker, unless the defender
    /// carries armor protection.
    LeechAttach,
}

/// Descriptor for a Physical attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub base: DamageBase,
    /// Ignores all defense (Dive Bomb).
    pub pierces_armor: bool,
    pub evade_lock: EvadeLock,
    pub on_hit: Vec<OnHit>,
}

impl AttackProfile {
    #[must_use]
    pub fn new(base: DamageBase) -> Self {
        Self {
            base,
            pierces_armor: false,
            evade_lock: EvadeLock::No,
            on_hit: Vec::new(),
        }
    }

    #[must_use]
    pub fn pierces_armor(mut self) -> Self {
        self.pierces_armor = true;
        self
    }

    #[must_use]
    pub fn evade_lock(mut self, lock: EvadeLock) -> Self {
        self.evade_lock = lock;
        self
    }

    #[must_use]
    pub fn on_hit(mut self, hook: OnHit) -> Self {
        self.on_hit.push(hook);
        self
    }
}

/// Who receives a status applied by an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTarget {
    Actor,
    Opponent,
}

/// A single tabulated ability effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityOp {
    GainStamina(i32),
    /// +1 stamina now, 1 stamina owed at the start of the next turn.
    StaminaSurge,
    Heal {
        amount: i32,
        /// Grants +1 stamina when the heal leaves the actor at full HP.
        surplus_stamina: bool,
    },
    Status {
        target: StatusTarget,
        status: StatusId,
        duration: Option<u8>,
    },
    /// Escape Grappled/Stuck, optionally with a one-turn damage buff and a
    /// guaranteed next coin flip.
    Breakout {
        damage_buff: bool,
        guarantee_flip: bool,
    },
    /// Remove all negative statuses from the actor.
    Cleanse,
    /// Opponent discards their whole hand.
    DiscardHand,
    DrainStamina(i32),
    /// Strip the opponent's Hidden/Camouflaged statuses and start chasing.
    RevealAndChase,
}

/// Descriptor for an Ability card (or a self-buffing Physical like
/// Camouflage). A `flip` reason gates the effect on a coin flip; `on_tails`
/// fires on a failed flip when present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityProfile {
    pub flip: Option<String>,
    pub on_heads: AbilityOp,
    pub on_tails: Option<AbilityOp>,
}

impl AbilityProfile {
    #[must_use]
    pub fn direct(op: AbilityOp) -> Self {
        Self {
            flip: None,
            on_heads: op,
            on_tails: None,
        }
    }

    #[must_use]
    pub fn flip(reason: impl Into<String>, on_heads: AbilityOp) -> Self {
        Self {
            flip: Some(reason.into()),
            on_heads,
            on_tails: None,
        }
    }

    #[must_use]
    pub fn or_tails(mut self, op: AbilityOp) -> Self {
        self.on_tails = Some(op);
        self
    }
}

/// Which side flips the coin for a probabilistic defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipParty {
    /// Defender flips; heads grants the bonus (Fur).
    Defender,
    /// Attacker flips; tails grants the bonus (Armored Exoskeleton).
    Attacker,
}

/// Passive formation effects, scanned by the resolver during combat and at
/// turn boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Passive {
    FlatDefense(i32),
    FlipDefense { amount: i32, flipper: FlipParty },
    SpikyBody,
    BarbedQuills,
    PoisonSkin,
    DamageBonus(i32),
    HabitatDamageBonus { habitat: Habitat, amount: i32 },
    BonusHp(i32),
    /// Opponent stealth (Hidden/Camouflaged) fails against this creature.
    StealthImmune,
    ConfusionImmune,
    /// Enables the evade reaction (Small size, Agile).
    EvadeCapable,
    /// Refunds 1 stamina on a successful evade (Swift Reflexes).
    EvadeRefund,
    /// Attackers must flip heads or lose their attack (Stand on Hind Legs).
    Intimidate,
    /// In Water, attacks miss on tails unless the attacker is chasing.
    WaterCamouflage,
    HabitatRegen { habitat: Habitat, amount: i32 },
}

/// Option offered by a pending choice interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceOption {
    Attack,
    Dig,
    Climb,
}

/// Named special-case handler for cards whose behavior is not tabulated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Special {
    None,
    /// Offers the actor a fork instead of a fixed effect (Big Claws).
    Choice(Vec<ChoiceOption>),
    /// Re-dispatch the opponent's last resolved move (Mimicry).
    Mimic,
    /// Steal a card from the opponent's hand (Copycat).
    Steal,
    /// Swap a formation card with a hand card (Evolve).
    Evolve,
}

/// Static card definition. Built with the builder pattern; registered in a
/// [`super::Catalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDef {
    pub id: CardId,
    pub name: String,
    pub category: Category,
    pub consumable: Consumable,
    pub kinds: KindSet,
    pub cost: i32,
    /// Base cards this card replaces in formation. Empty = not an upgrade.
    pub upgrades: Vec<CardId>,
    pub max_charges: Option<u8>,
    /// Does not consume the once-per-turn action.
    pub free_action: bool,
    /// Requires this exact size class to play (Crushing Weight).
    pub requires_size: Option<SizeClass>,
    /// Counts as movement for the Stuck restriction (Dig).
    pub needs_mobility: bool,
    /// Drawn copies are never auto-played even when zero-cost (Camouflage).
    pub interactive: bool,
    pub attack: Option<AttackProfile>,
    pub ability: Option<AbilityProfile>,
    pub special: Special,
    pub passives: Vec<Passive>,
}

impl CardDef {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            consumable: Consumable::None,
            kinds: KindSet::All,
            cost: 0,
            upgrades: Vec::new(),
            max_charges: None,
            free_action: false,
            requires_size: None,
            needs_mobility: false,
            interactive: false,
            attack: None,
            ability: None,
            special: Special::None,
            passives: Vec::new(),
        }
    }

    #[must_use]
    pub fn cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn kinds(mut self, kinds: &[super::CreatureKind]) -> Self {
        self.kinds = KindSet::Only(kinds.to_vec());
        self
    }

    #[must_use]
    pub fn consumable(mut self, class: Consumable) -> Self {
        self.consumable = class;
        self
    }

    #[must_use]
    pub fn upgrade_of(mut self, bases: &[CardId]) -> Self {
        self.upgrades = bases.to_vec();
        self
    }

    #[must_use]
    pub fn charges(mut self, max: u8) -> Self {
        self.max_charges = Some(max);
        self
    }

    #[must_use]
    pub fn free_action(mut self) -> Self {
        self.free_action = true;
        self
    }

    #[must_use]
    pub fn requires_size(mut self, size: SizeClass) -> Self {
        self.requires_size = Some(size);
        self
    }

    #[must_use]
    pub fn needs_mobility(mut self) -> Self {
        self.needs_mobility = true;
        self
    }

    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    #[must_use]
    pub fn attack(mut self, profile: AttackProfile) -> Self {
        self.attack = Some(profile);
        self
    }

    #[must_use]
    pub fn ability(mut self, profile: AbilityProfile) -> Self {
        self.ability = Some(profile);
        self
    }

    #[must_use]
    pub fn special(mut self, special: Special) -> Self {
        self.special = special;
        self
    }

    #[must_use]
    pub fn passive(mut self, passive: Passive) -> Self {
        self.passives.push(passive);
        self
    }

    /// Is this card an upgrade of some base card?
    #[must_use]
    pub fn is_upgrade(&self) -> bool {
        !self.upgrades.is_empty()
    }
}
