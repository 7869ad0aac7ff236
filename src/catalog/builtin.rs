//! The builtin creature-combat card set.
//!
//! Well-known ids live in [`cards`]; `Catalog::builtin()` registers the full
//! set. Sizes sit at 1-3, the Evolve special at 4, Physical cards at 10-39
//! and Ability cards at 40-62.

use super::definition::{
    AbilityOp, AbilityProfile, AttackProfile, CardDef, CardId, ChoiceOption, DamageBase,
    EvadeLock, FlipParty, OnHit, Passive, Special, StatusTarget,
};
use super::registry::Catalog;
use super::{Category, Consumable, Habitat, SizeClass};
use crate::catalog::CreatureKind::{Amphibian, Avian, Mammal, Reptile};
use crate::status::StatusId;

/// Well-known ids of the builtin set.
pub mod cards {
    use super::CardId;

    pub const SMALL_SIZE: CardId = CardId(1);
    pub const MEDIUM_SIZE: CardId = CardId(2);
    pub const BIG_SIZE: CardId = CardId(3);

    pub const EVOLVE: CardId = CardId(4);

    pub const SPIKY_BODY: CardId = CardId(10);
    pub const ARMORED_EXOSKELETON: CardId = CardId(11);
    pub const CLAW_ATTACK: CardId = CardId(12);
    pub const CAMOUFLAGE: CardId = CardId(13);
    pub const WHISKERS: CardId = CardId(14);
    pub const STRONG_JAW: CardId = CardId(15);
    pub const BITE: CardId = CardId(16);
    pub const FUR: CardId = CardId(17);
    pub const THICK_FUR: CardId = CardId(18);
    pub const STAND_ON_HIND_LEGS: CardId = CardId(19);
    pub const SWIMS_WELL: CardId = CardId(20);
    pub const STRONG_BUILD: CardId = CardId(21);
    pub const LARGE_HIND_LEGS: CardId = CardId(22);
    pub const BIG_CLAWS: CardId = CardId(23);
    pub const STRONG_TAIL: CardId = CardId(24);
    pub const ARMORED_SCALES: CardId = CardId(25);
    pub const DEATH_ROLL: CardId = CardId(26);
    pub const CAMOUFLAGE_WATER: CardId = CardId(27);
    pub const SWIM_FAST: CardId = CardId(28);
    pub const AMBUSH_ATTACK: CardId = CardId(29);
    pub const KEEN_EYESIGHT: CardId = CardId(30);
    pub const GRASPING_TALONS: CardId = CardId(31);
    pub const POISON_SKIN: CardId = CardId(32);
    pub const DIVE_BOMB: CardId = CardId(33);
    pub const PIERCING_BEAK: CardId = CardId(34);
    pub const BARBED_QUILLS: CardId = CardId(35);
    pub const VENOMOUS_FANGS: CardId = CardId(36);
    pub const CRUSHING_WEIGHT: CardId = CardId(37);
    pub const AMPHIBIOUS: CardId = CardId(38);
    pub const LEECH: CardId = CardId(39);

    pub const SHORT_BURST: CardId = CardId(40);
    pub const CONFUSE: CardId = CardId(41);
    pub const INTELLIGENCE: CardId = CardId(42);
    pub const DIG: CardId = CardId(43);
    pub const FREEZE: CardId = CardId(44);
    pub const ROAR: CardId = CardId(45);
    pub const HIBERNATE: CardId = CardId(46);
    pub const LOUD_HISS: CardId = CardId(47);
    pub const FLIGHT: CardId = CardId(48);
    pub const TOXIC_SPIT: CardId = CardId(49);
    pub const REGENERATION: CardId = CardId(50);
    pub const FOCUS: CardId = CardId(51);
    pub const ADRENALINE_RUSH: CardId = CardId(52);
    pub const STICKY_TONGUE: CardId = CardId(53);
    pub const SHED_SKIN: CardId = CardId(54);
    pub const RAGE: CardId = CardId(55);
    pub const TERRITORIAL_DISPLAY: CardId = CardId(56);
    pub const MIMICRY: CardId = CardId(57);
    pub const EXHAUSTING_ROAR: CardId = CardId(58);
    pub const SWIFT_REFLEXES: CardId = CardId(59);
    pub const ENHANCED_SMELL: CardId = CardId(60);
    pub const COPYCAT: CardId = CardId(61);
    pub const AGILE: CardId = CardId(62);
}

use cards::*;

fn self_status(status: StatusId, duration: Option<u8>) -> AbilityOp {
    AbilityOp::Status {
        target: StatusTarget::Actor,
        status,
        duration,
    }
}

fn opponent_status(status: StatusId, duration: Option<u8>) -> AbilityOp {
    AbilityOp::Status {
        target: StatusTarget::Opponent,
        status,
        duration,
    }
}

impl Catalog {
    /// The standard creature-combat card set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut c = Catalog::new();

        // Sizes
        c.register(
            CardDef::new(SMALL_SIZE, "Small Size", Category::Size).passive(Passive::EvadeCapable),
        );
        c.register(CardDef::new(MEDIUM_SIZE, "Medium Size", Category::Size));
        c.register(CardDef::new(BIG_SIZE, "Big Size", Category::Size));

        // Special
        c.register(
            CardDef::new(EVOLVE, "Evolve", Category::Special)
                .cost(2)
                .consumable(Consumable::ConsumableImpact)
                .special(Special::Evolve),
        );

        // Physical
        c.register(
            CardDef::new(SPIKY_BODY, "Spiky Body", Category::Physical)
                .kinds(&[Mammal, Reptile])
                .passive(Passive::SpikyBody),
        );
        c.register(
            CardDef::new(ARMORED_EXOSKELETON, "Armored Exoskeleton", Category::Physical)
                .kinds(&[Mammal, Reptile])
                .passive(Passive::FlipDefense {
                    amount: 2,
                    flipper: FlipParty::Attacker,
                }),
        );
        c.register(
            CardDef::new(CLAW_ATTACK, "Claw Attack", Category::Physical)
                .cost(1)
                .kinds(&[Avian, Reptile, Mammal])
                .attack(AttackProfile::new(DamageBase::Fixed(2))),
        );
        c.register(
            CardDef::new(CAMOUFLAGE, "Camouflage", Category::Physical)
                .charges(2)
                .interactive()
                .ability(AbilityProfile::flip(
                    "Camouflage",
                    self_status(StatusId::Camouflaged, None),
                )),
        );
        c.register(
            CardDef::new(WHISKERS, "Whiskers", Category::Physical)
                .kinds(&[Mammal])
                .passive(Passive::StealthImmune),
        );
        c.register(
            CardDef::new(STRONG_JAW, "Strong Jaw Grip", Category::Physical)
                .cost(2)
                .kinds(&[Mammal, Reptile])
                .upgrade_of(&[BITE])
                .attack(AttackProfile::new(DamageBase::Fixed(3)).on_hit(OnHit::Grapple)),
        );
        c.register(
            CardDef::new(BITE, "Bite", Category::Physical)
                .cost(1)
                .kinds(&[Mammal, Reptile, Avian])
                .attack(AttackProfile::new(DamageBase::Fixed(3))),
        );
        c.register(
            CardDef::new(FUR, "Fur", Category::Physical)
                .kinds(&[Mammal])
                .passive(Passive::FlipDefense {
                    amount: 1,
                    flipper: FlipParty::Defender,
                }),
        );
        c.register(
            CardDef::new(THICK_FUR, "Thick Fur", Category::Physical)
                .kinds(&[Mammal])
                .passive(Passive::FlatDefense(1)),
        );
        c.register(
            CardDef::new(STAND_ON_HIND_LEGS, "Stand on Hind Legs", Category::Physical)
                .kinds(&[Mammal])
                .passive(Passive::Intimidate),
        );
        c.register(
            CardDef::new(SWIMS_WELL, "Swims Well", Category::Physical)
                .kinds(&[Mammal, Amphibian])
                .passive(Passive::HabitatDamageBonus {
                    habitat: Habitat::Water,
                    amount: 1,
                }),
        );
        c.register(
            CardDef::new(STRONG_BUILD, "Strong Build", Category::Physical)
                .kinds(&[Mammal, Reptile])
                .passive(Passive::DamageBonus(1))
                .passive(Passive::BonusHp(2)),
        );
        c.register(
            CardDef::new(LARGE_HIND_LEGS, "Large Hind Legs", Category::Physical)
                .cost(1)
                .kinds(&[Mammal, Avian, Amphibian])
                .attack(AttackProfile::new(DamageBase::SizeGated {
                    min: SizeClass::Medium,
                    amount: 2,
                })),
        );
        c.register(
            CardDef::new(BIG_CLAWS, "Big Claws", Category::Physical)
                .cost(1)
                .kinds(&[Mammal, Reptile])
                .upgrade_of(&[CLAW_ATTACK])
                .attack(AttackProfile::new(DamageBase::Fixed(3)))
                .special(Special::Choice(vec![
                    ChoiceOption::Attack,
                    ChoiceOption::Dig,
                    ChoiceOption::Climb,
                ])),
        );
        c.register(
            CardDef::new(STRONG_TAIL, "Strong Tail", Category::Physical)
                .cost(1)
                .kinds(&[Reptile, Mammal])
                .attack(AttackProfile::new(DamageBase::Fixed(2))),
        );
        c.register(
            CardDef::new(ARMORED_SCALES, "Armored Scales", Category::Physical)
                .kinds(&[Reptile])
                .passive(Passive::FlatDefense(1)),
        );
        c.register(
            CardDef::new(DEATH_ROLL, "Death Roll", Category::Physical)
                .cost(2)
                .kinds(&[Reptile])
                .upgrade_of(&[BITE, STRONG_JAW, VENOMOUS_FANGS])
                .attack(AttackProfile::new(DamageBase::Fixed(4)).on_hit(OnHit::GrappleOnHeads)),
        );
        c.register(
            CardDef::new(CAMOUFLAGE_WATER, "Camouflage in Water", Category::Physical)
                .kinds(&[Reptile, Amphibian])
                .interactive()
                .passive(Passive::WaterCamouflage),
        );
        c.register(
            CardDef::new(SWIM_FAST, "Swim Fast", Category::Physical)
                .cost(1)
                .kinds(&[Reptile, Amphibian])
                .passive(Passive::HabitatDamageBonus {
                    habitat: Habitat::Water,
                    amount: 2,
                })
                .attack(AttackProfile::new(DamageBase::Fixed(0)).evade_lock(EvadeLock::Always)),
        );
        c.register(
            CardDef::new(AMBUSH_ATTACK, "Ambush Attack", Category::Physical)
                .cost(1)
                .kinds(&[Reptile, Mammal])
                .attack(AttackProfile::new(DamageBase::Fixed(0)).evade_lock(EvadeLock::OnHeads)),
        );
        c.register(
            CardDef::new(KEEN_EYESIGHT, "Keen Eyesight", Category::Physical)
                .kinds(&[Avian])
                .passive(Passive::StealthImmune),
        );
        c.register(
            CardDef::new(GRASPING_TALONS, "Grasping Talons", Category::Physical)
                .cost(1)
                .kinds(&[Avian])
                .attack(AttackProfile::new(DamageBase::Fixed(2)).on_hit(OnHit::GrappleOnHeads)),
        );
        c.register(
            CardDef::new(POISON_SKIN, "Poison Skin", Category::Physical)
                .kinds(&[Amphibian, Reptile])
                .passive(Passive::PoisonSkin),
        );
        c.register(
            CardDef::new(DIVE_BOMB, "Dive Bomb", Category::Physical)
                .cost(2)
                .kinds(&[Avian])
                .attack(
                    AttackProfile::new(DamageBase::Airborne {
                        grounded: 2,
                        flying: 4,
                    })
                    .pierces_armor(),
                ),
        );
        c.register(
            CardDef::new(PIERCING_BEAK, "Piercing Beak", Category::Physical)
                .cost(1)
                .kinds(&[Avian])
                .attack(AttackProfile::new(DamageBase::Fixed(2))),
        );
        c.register(
            CardDef::new(BARBED_QUILLS, "Barbed Quills", Category::Physical)
                .kinds(&[Mammal])
                .passive(Passive::BarbedQuills),
        );
        c.register(
            CardDef::new(VENOMOUS_FANGS, "Venomous Fangs", Category::Physical)
                .cost(1)
                .kinds(&[Reptile, Mammal])
                .attack(AttackProfile::new(DamageBase::Fixed(1)).on_hit(OnHit::Poison)),
        );
        c.register(
            CardDef::new(CRUSHING_WEIGHT, "Crushing Weight", Category::Physical)
                .cost(2)
                .requires_size(SizeClass::Big)
                .attack(AttackProfile::new(DamageBase::SizeGated {
                    min: SizeClass::Big,
                    amount: 4,
                })),
        );
        c.register(
            CardDef::new(AMPHIBIOUS, "Amphibious", Category::Physical)
                .kinds(&[Amphibian])
                .passive(Passive::HabitatRegen {
                    habitat: Habitat::Water,
                    amount: 1,
                }),
        );
        c.register(
            CardDef::new(LEECH, "Leech", Category::Physical)
                .cost(1)
                .kinds(&[Amphibian])
                .attack(
                    AttackProfile::new(DamageBase::Fixed(1))
                        .on_hit(OnHit::PoisonOnTails)
                        .on_hit(OnHit::LeechAttach),
                ),
        );

        // Abilities
        c.register(
            CardDef::new(SHORT_BURST, "Short Burst", Category::Ability)
                .free_action()
                .ability(AbilityProfile::direct(AbilityOp::GainStamina(1))),
        );
        c.register(
            CardDef::new(CONFUSE, "Confuse", Category::Ability)
                .cost(1)
                .ability(AbilityProfile::flip(
                    "Confuse",
                    opponent_status(StatusId::Confused, Some(1)),
                )),
        );
        c.register(
            CardDef::new(INTELLIGENCE, "Intelligence", Category::Ability)
                .kinds(&[Mammal, Avian])
                .passive(Passive::ConfusionImmune),
        );
        c.register(
            CardDef::new(DIG, "Dig", Category::Ability)
                .cost(1)
                .kinds(&[Mammal, Reptile, Amphibian])
                .needs_mobility()
                .ability(AbilityProfile::direct(self_status(
                    StatusId::Hidden,
                    Some(1),
                ))),
        );
        c.register(
            CardDef::new(FREEZE, "Freeze", Category::Ability)
                .cost(1)
                .ability(AbilityProfile::flip(
                    "Freeze",
                    self_status(StatusId::Hidden, Some(1)),
                )),
        );
        c.register(
            CardDef::new(ROAR, "Roar", Category::Ability)
                .cost(1)
                .kinds(&[Mammal, Reptile])
                .ability(AbilityProfile::flip(
                    "Roar",
                    opponent_status(StatusId::CannotAttack, Some(1)),
                )),
        );
        c.register(
            CardDef::new(HIBERNATE, "Hibernate", Category::Ability)
                .cost(2)
                .kinds(&[Mammal, Reptile, Amphibian])
                .ability(AbilityProfile::direct(AbilityOp::Heal {
                    amount: 2,
                    surplus_stamina: true,
                })),
        );
        c.register(
            CardDef::new(LOUD_HISS, "Loud Hiss", Category::Ability)
                .kinds(&[Reptile])
                .ability(AbilityProfile::direct(self_status(
                    StatusId::Intimidating,
                    Some(1),
                ))),
        );
        c.register(
            CardDef::new(FLIGHT, "Flight", Category::Ability)
                .cost(1)
                .kinds(&[Avian])
                .ability(AbilityProfile::direct(self_status(
                    StatusId::Flying,
                    Some(3),
                ))),
        );
        c.register(
            CardDef::new(TOXIC_SPIT, "Toxic Spit", Category::Ability)
                .cost(1)
                .kinds(&[Reptile, Amphibian])
                .ability(
                    AbilityProfile::flip("Toxic Spit", opponent_status(StatusId::Poisoned, None))
                        .or_tails(opponent_status(StatusId::Stuck, Some(1))),
                ),
        );
        c.register(
            CardDef::new(REGENERATION, "Regeneration", Category::Ability)
                .cost(2)
                .kinds(&[Reptile, Amphibian])
                .consumable(Consumable::ConsumableImpact)
                .ability(AbilityProfile::direct(AbilityOp::Heal {
                    amount: 4,
                    surplus_stamina: false,
                })),
        );
        c.register(
            CardDef::new(FOCUS, "Focus", Category::Ability)
                .cost(1)
                .consumable(Consumable::ConsumableImpact)
                .free_action()
                .ability(AbilityProfile::direct(AbilityOp::Breakout {
                    damage_buff: true,
                    guarantee_flip: true,
                })),
        );
        c.register(
            CardDef::new(ADRENALINE_RUSH, "Adrenaline Rush", Category::Ability)
                .free_action()
                .ability(AbilityProfile::direct(AbilityOp::StaminaSurge)),
        );
        c.register(
            CardDef::new(STICKY_TONGUE, "Sticky Tongue", Category::Ability)
                .cost(1)
                .kinds(&[Amphibian, Reptile])
                .ability(AbilityProfile::flip(
                    "Sticky Tongue",
                    opponent_status(StatusId::Stuck, Some(1)),
                )),
        );
        c.register(
            CardDef::new(SHED_SKIN, "Shed Skin", Category::Ability)
                .cost(1)
                .kinds(&[Reptile, Amphibian])
                .ability(AbilityProfile::direct(AbilityOp::Cleanse)),
        );
        c.register(
            CardDef::new(RAGE, "Rage", Category::Ability)
                .cost(2)
                .kinds(&[Mammal])
                .free_action()
                .ability(AbilityProfile::direct(AbilityOp::Breakout {
                    damage_buff: true,
                    guarantee_flip: false,
                })),
        );
        c.register(
            CardDef::new(TERRITORIAL_DISPLAY, "Territorial Display", Category::Ability)
                .cost(1)
                .ability(AbilityProfile::flip(
                    "Territorial Display",
                    AbilityOp::DiscardHand,
                )),
        );
        c.register(
            CardDef::new(MIMICRY, "Mimicry", Category::Ability)
                .cost(1)
                .kinds(&[Avian])
                .special(Special::Mimic),
        );
        c.register(
            CardDef::new(EXHAUSTING_ROAR, "Exhausting Roar", Category::Ability)
                .cost(1)
                .kinds(&[Mammal])
                .ability(AbilityProfile::flip(
                    "Exhausting Roar",
                    AbilityOp::DrainStamina(1),
                )),
        );
        c.register(
            CardDef::new(SWIFT_REFLEXES, "Swift Reflexes", Category::Ability)
                .kinds(&[Mammal, Avian])
                .passive(Passive::EvadeRefund),
        );
        c.register(
            CardDef::new(ENHANCED_SMELL, "Enhanced Smell", Category::Ability)
                .kinds(&[Mammal])
                .free_action()
                .ability(AbilityProfile::direct(AbilityOp::RevealAndChase)),
        );
        c.register(
            CardDef::new(COPYCAT, "Copycat", Category::Ability)
                .cost(1)
                .kinds(&[Avian])
                .special(Special::Steal),
        );
        c.register(
            CardDef::new(AGILE, "Agile", Category::Ability)
                .cost(1)
                .free_action()
                .passive(Passive::EvadeCapable)
                .ability(AbilityProfile::direct(self_status(
                    StatusId::Accurate,
                    Some(1),
                ))),
        );

        c
    }
}
