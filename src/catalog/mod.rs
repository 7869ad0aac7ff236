//! Card catalog: static card data and the builtin card set.
//!
//! A `CardDef` holds the immutable properties of a card: its category, cost,
//! creature-kind compatibility, and the effect descriptors the resolver
//! dispatches on. Instance-specific data (remaining charges, current zone)
//! lives in `state::CardInstance`.
//!
//! The engine supports an arbitrary catalog; `Catalog::builtin()` registers
//! the standard creature-combat set with well-known ids in [`cards`].

mod builtin;
mod definition;
mod registry;

pub use builtin::cards;
pub use definition::{
    AbilityOp, AbilityProfile, AttackProfile, CardDef, CardId, ChoiceOption, DamageBase,
    EvadeLock, FlipParty, OnHit, Passive, Special, StatusTarget,
};
pub use registry::Catalog;

use serde::{Deserialize, Serialize};

/// Creature kinds a card can require.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    Mammal,
    Reptile,
    Avian,
    Amphibian,
}

impl CreatureKind {
    /// All kinds, for random assignment at player creation.
    pub const ALL: [CreatureKind; 4] = [
        CreatureKind::Mammal,
        CreatureKind::Reptile,
        CreatureKind::Avian,
        CreatureKind::Amphibian,
    ];
}

/// Battlefield habitat. Affects damage and regeneration modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Desert,
    Forest,
    Water,
    Arena,
}

impl Habitat {
    pub const ALL: [Habitat; 4] = [
        Habitat::Desert,
        Habitat::Forest,
        Habitat::Water,
        Habitat::Arena,
    ];
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Physical,
    Ability,
    Size,
    Special,
}

/// Consumable classification.
///
/// `ConsumableImpact` cards leave the formation for the discard pile once
/// their effect resolves; the rest stay in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    None,
    PermanentUtility,
    ConsumableImpact,
}

/// Size class. Ordered: `Small < Medium < Big`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Big,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Big];

    /// Starting HP for this size.
    #[must_use]
    pub const fn base_hp(self) -> i32 {
        match self {
            SizeClass::Small => 10,
            SizeClass::Medium => 15,
            SizeClass::Big => 20,
        }
    }

    /// Starting stamina for this size. Small creatures trade HP for stamina.
    #[must_use]
    pub const fn base_stamina(self) -> i32 {
        match self {
            SizeClass::Small => 4,
            SizeClass::Medium => 3,
            SizeClass::Big => 2,
        }
    }

    /// The size card auto-equipped at match start.
    #[must_use]
    pub const fn size_card(self) -> CardId {
        match self {
            SizeClass::Small => cards::SMALL_SIZE,
            SizeClass::Medium => cards::MEDIUM_SIZE,
            SizeClass::Big => cards::BIG_SIZE,
        }
    }
}

/// Creature-kind compatibility of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindSet {
    All,
    Only(Vec<CreatureKind>),
}

impl KindSet {
    #[must_use]
    pub fn allows(&self, kind: CreatureKind) -> bool {
        match self {
            KindSet::All => true,
            KindSet::Only(kinds) => kinds.contains(&kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_baselines() {
        assert_eq!(SizeClass::Small.base_hp(), 10);
        assert_eq!(SizeClass::Small.base_stamina(), 4);
        assert_eq!(SizeClass::Big.base_hp(), 20);
        assert_eq!(SizeClass::Big.base_stamina(), 2);
    }

    #[test]
    fn test_size_ordering() {
        assert!(SizeClass::Small < SizeClass::Medium);
        assert!(SizeClass::Medium < SizeClass::Big);
    }

    #[test]
    fn test_kind_set() {
        let set = KindSet::Only(vec![CreatureKind::Mammal, CreatureKind::Reptile]);
        assert!(set.allows(CreatureKind::Mammal));
        assert!(!set.allows(CreatureKind::Avian));
        assert!(KindSet::All.allows(CreatureKind::Avian));
    }
}
