//! Attacks, damage resolution, and the two interrupt answers.
//!
//! Hit/miss is evaluated before damage: stealth and flight impose miss
//! flips, and an evade-capable defender raises a pending reaction instead.
//! Damage then resolves in a fixed order (modifiers, defense, recoil
//! passives, on-hit status effects) with the win check last.

use super::ability;
use super::{check_win, rejected};
use crate::action::UseKind;
use crate::catalog::{
    AbilityOp, AttackProfile, CardDef, Catalog, Category, ChoiceOption, Consumable, CreatureKind,
    DamageBase, EvadeLock, FlipParty, Habitat, OnHit, Passive, Special,
};
use crate::rng::{flip, RngStream};
use crate::state::{
    GameState, InstanceId, LastAction, NoticeKind, PendingChoice, PendingReaction, PlayerId,
};
use crate::status::{Status, StatusId};

/// Stamina price of the evade reaction.
pub const EVADE_COST: i32 = 2;

#[allow(clippy::too_many_arguments)]
pub(crate) fn use_action(
    catalog: &Catalog,
    mut next: GameState,
    player: PlayerId,
    kind: UseKind,
    card: InstanceId,
    target: PlayerId,
    rng: &[f64],
    hand_target: Option<InstanceId>,
) -> GameState {
    let mut stream = RngStream::new(rng);

    if target != player.opponent() {
        return rejected(next, "Actions must target your opponent.");
    }
    let Some(instance) = next.player(player).formation_card(card).copied() else {
        return rejected(next, "That card is not in your formation.");
    };
    let def = catalog.def(instance.def).clone();

    match (kind, def.category) {
        (UseKind::Attack, Category::Physical) | (UseKind::Ability, Category::Ability) => {}
        _ => return rejected(next, &format!("{} cannot be used that way.", def.name)),
    }

    {
        let p = next.player(player);
        if p.has_acted_this_turn && !def.free_action {
            return rejected(next, "Already acted this turn.");
        }
        if p.stamina < def.cost {
            return rejected(next, &format!("Need {} stamina.", def.cost));
        }
        if p.statuses.has(StatusId::Stuck)
            && (def.category == Category::Physical || def.needs_mobility)
        {
            return rejected(next, "You are Stuck and cannot move.");
        }
        if p.statuses.has(StatusId::CannotAttack) && def.category == Category::Physical {
            return rejected(next, "You are too shaken to attack.");
        }
    }

    if next.player(player).statuses.has(StatusId::Grappled) {
        let is_breakout = matches!(
            def.ability.as_ref().map(|a| &a.on_heads),
            Some(AbilityOp::Breakout { .. })
        );
        if def.category != Category::Physical && !is_breakout {
            return rejected(next, "Grappled! Attack or break out first.");
        }
        if def.category == Category::Physical {
            let side = flip(&mut next, "Grappled Attack", &mut stream, Some(player));
            if !side.is_heads() {
                let p = next.player_mut(player);
                p.stamina -= def.cost;
                p.has_acted_this_turn = true;
                let name = p.name.clone();
                next.record(format!("{}'s attack slipped in the grapple.", name));
                next.notify(NoticeKind::Warning, "Attack failed in the grapple.");
                return next;
            }
        }
    }

    if next.player(player).statuses.has(StatusId::Confused) {
        let side = flip(&mut next, "Confusion Check", &mut stream, Some(player));
        if !side.is_heads() {
            let p = next.player_mut(player);
            p.stamina -= def.cost;
            p.has_acted_this_turn = true;
            p.hp -= 1;
            let name = p.name.clone();
            next.record(format!("{} thrashed in confusion and took 1 damage.", name));
            next.notify(NoticeKind::Error, "Confusion caused self-harm!");
            check_win(&mut next);
            return next;
        }
    }

    {
        let p = next.player_mut(player);
        p.stamina -= def.cost;
        if !def.free_action {
            p.has_acted_this_turn = true;
        }
    }
    spend_card(&mut next, player, card, &def);
    next.last_action = Some(LastAction {
        player,
        card: def.id,
    });

    if def.category == Category::Physical {
        attack_action(catalog, &mut next, player, target, &def, &mut stream);
    } else {
        ability::ability_action(
            catalog,
            &mut next,
            player,
            target,
            &def,
            &mut stream,
            hand_target,
            0,
        );
    }
    next
}

/// Consumables leave play after use; charged cards burn a charge and leave
/// at zero.
fn spend_card(state: &mut GameState, player: PlayerId, card: InstanceId, def: &CardDef) {
    let p = state.player_mut(player);
    if def.consumable == Consumable::ConsumableImpact {
        if let Some(spent) = p.take_from_formation(card) {
            p.discard.push(spent);
        }
        return;
    }
    let mut exhausted = false;
    if let Some(slot) = p.formation.iter_mut().find(|c| c.instance == card) {
        if let Some(charges) = &mut slot.charges {
            *charges = charges.saturating_sub(1);
            exhausted = *charges == 0;
        }
    }
    if exhausted {
        if let Some(spent) = p.take_from_formation(card) {
            p.discard.push(spent);
        }
    }
}

pub(crate) fn attack_action(
    catalog: &Catalog,
    state: &mut GameState,
    attacker: PlayerId,
    defender: PlayerId,
    def: &CardDef,
    stream: &mut RngStream<'_>,
) {
    if let Special::Choice(options) = &def.special {
        state.pending_choice = Some(PendingChoice {
            player: attacker,
            card: def.id,
            options: options.clone(),
            target: defender,
        });
        let name = state.player(attacker).name.clone();
        state.record(format!("{} readies {} and weighs the options...", name, def.name));
        return;
    }

    let Some(attack) = def.attack.clone() else {
        // Self-buffing Physicals (Camouflage) short-circuit into their
        // ability profile without dealing damage.
        if def.ability.is_some() {
            ability::apply_profile(catalog, state, attacker, defender, def, stream);
        }
        return;
    };

    // An undersized attacker springs away instead of striking.
    if let DamageBase::SizeGated { min, .. } = attack.base {
        if state.player(attacker).size < min {
            state
                .player_mut(attacker)
                .statuses
                .apply(Status::lasting(StatusId::Evading, 1));
            let name = state.player(attacker).name.clone();
            state.record(format!("{} coils to spring away from the next attack.", name));
            state.notify(NoticeKind::Info, "Ready to evade.");
            return;
        }
    }

    let airborne_card = matches!(attack.base, DamageBase::Airborne { .. });
    if state.player(defender).statuses.has(StatusId::Climbing)
        && !state.player(attacker).statuses.has(StatusId::Flying)
        && !airborne_card
    {
        let name = state.player(defender).name.clone();
        state.record(format!("The attack misses; {} is up and climbing.", name));
        state.notify(NoticeKind::Warning, "Miss! Target is climbing.");
        return;
    }

    let accurate = {
        let a = state.player(attacker);
        a.statuses.has(StatusId::Accurate) || a.statuses.has(StatusId::Chasing)
    };
    let stealth_immune = state
        .player(attacker)
        .has_passive(catalog, |p| matches!(p, Passive::StealthImmune));

    if !accurate {
        if state.player(defender).statuses.has(StatusId::Hidden) && !stealth_immune {
            miss(state, attacker, "the target is hidden");
            return;
        }
        if state.player(defender).statuses.has(StatusId::Evading) {
            state.player_mut(defender).statuses.clear(StatusId::Evading);
            miss(state, attacker, "the target sprang away");
            return;
        }
        if state.player(defender).statuses.has(StatusId::Camouflaged) && !stealth_immune {
            let side = flip(state, "Camouflage Miss Chance", stream, Some(attacker));
            if !side.is_heads() {
                miss(state, attacker, "camouflage");
                return;
            }
        }
        if state.player(defender).statuses.has(StatusId::Flying) {
            let side = flip(state, "Flying Miss Chance", stream, Some(attacker));
            if !side.is_heads() {
                miss(state, attacker, "the target is airborne");
                return;
            }
        }
        if state.habitat == Habitat::Water
            && !stealth_immune
            && state
                .player(defender)
                .has_passive(catalog, |p| matches!(p, Passive::WaterCamouflage))
        {
            let side = flip(state, "Water Camouflage", stream, Some(attacker));
            if !side.is_heads() {
                miss(state, attacker, "the water hides the target");
                return;
            }
        }
        if state
            .player(defender)
            .has_passive(catalog, |p| matches!(p, Passive::Intimidate))
        {
            let side = flip(state, "Intimidation", stream, Some(attacker));
            if !side.is_heads() {
                miss(state, attacker, "intimidation");
                return;
            }
        }
    }

    let evade_locked = match attack.evade_lock {
        EvadeLock::No => false,
        EvadeLock::Always => true,
        EvadeLock::OnHeads => flip(state, "Ambush", stream, Some(attacker)).is_heads(),
    };

    let can_evade = {
        let d = state.player(defender);
        d.has_passive(catalog, |p| matches!(p, Passive::EvadeCapable))
            && d.stamina >= EVADE_COST
            && !d.statuses.has(StatusId::Grappled)
            && !d.statuses.has(StatusId::CannotEvade)
            && !d.statuses.has(StatusId::Stuck)
    };

    if can_evade && !evade_locked && !accurate {
        state.pending_reaction = Some(PendingReaction {
            attacker,
            defender,
            card: def.id,
        });
        let name = state.player(defender).name.clone();
        state.record(format!("{} can evade! Waiting for the reaction...", name));
        return;
    }

    resolve_damage(catalog, state, attacker, defender, def, &attack, stream);
}

fn miss(state: &mut GameState, attacker: PlayerId, why: &str) {
    let name = state.player(attacker).name.clone();
    state.record(format!("{} missed; {}.", name, why));
    state.notify(NoticeKind::Warning, "Miss!");
}

pub(crate) fn resolve_damage(
    catalog: &Catalog,
    state: &mut GameState,
    attacker: PlayerId,
    defender: PlayerId,
    def: &CardDef,
    attack: &AttackProfile,
    stream: &mut RngStream<'_>,
) {
    let habitat = state.habitat;

    let mut damage = {
        let a = state.player(attacker);
        match attack.base {
            DamageBase::Fixed(n) => n,
            DamageBase::Airborne { grounded, flying } => {
                if a.statuses.has(StatusId::Flying) {
                    flying
                } else {
                    grounded
                }
            }
            DamageBase::SizeGated { min, amount } => {
                if a.size >= min {
                    amount
                } else {
                    0
                }
            }
        }
    };

    {
        let a = state.player(attacker);
        for passive in a.passives(catalog) {
            match passive {
                Passive::DamageBonus(n) => damage += n,
                Passive::HabitatDamageBonus { habitat: h, amount } if *h == habitat => {
                    damage += amount;
                }
                _ => {}
            }
        }
        if habitat == Habitat::Water && a.kind == CreatureKind::Amphibian {
            damage += 1;
        }
        if a.statuses.has(StatusId::DamageBuff) {
            damage += 1;
        }
    }

    let mut defense = 0;
    if !attack.pierces_armor {
        let flips: Vec<(i32, FlipParty)> = state
            .player(defender)
            .passives(catalog)
            .filter_map(|p| match p {
                Passive::FlatDefense(n) => {
                    defense += n;
                    None
                }
                Passive::FlipDefense { amount, flipper } => Some((*amount, *flipper)),
                _ => None,
            })
            .collect();
        for (amount, flipper) in flips {
            match flipper {
                FlipParty::Defender => {
                    if flip(state, "Fur Defense", stream, Some(defender)).is_heads() {
                        defense += amount;
                    }
                }
                FlipParty::Attacker => {
                    if !flip(state, "Exoskeleton", stream, Some(attacker)).is_heads() {
                        defense += amount;
                    }
                }
            }
        }
    }

    // Recoil passives fire before status application.
    if state
        .player(defender)
        .has_passive(catalog, |p| matches!(p, Passive::SpikyBody))
    {
        let attacker_agile = state
            .player(attacker)
            .has_passive(catalog, |p| matches!(p, Passive::EvadeCapable));
        if !attacker_agile {
            state.player_mut(attacker).hp -= 1;
            let name = state.player(attacker).name.clone();
            state.record(format!("{} took 1 damage from the spiky body.", name));
        } else if flip(state, "Spiky Body", stream, Some(attacker)).is_heads() {
            state.player_mut(attacker).hp -= 1;
            let name = state.player(attacker).name.clone();
            state.record(format!("{} grazed the spikes for 1 damage.", name));
        } else {
            damage += 1;
        }
    }

    if state
        .player(defender)
        .has_passive(catalog, |p| matches!(p, Passive::BarbedQuills))
    {
        let armored = state.player(attacker).has_passive(catalog, |p| {
            matches!(
                p,
                Passive::SpikyBody
                    | Passive::FlipDefense {
                        flipper: FlipParty::Attacker,
                        ..
                    }
            )
        });
        if armored {
            let name = state.player(attacker).name.clone();
            state.record(format!("{}'s armor turned aside the quills.", name));
        } else {
            let recoil = if state.player(defender).statuses.has(StatusId::Grappled) {
                2
            } else {
                1
            };
            state.player_mut(attacker).hp -= recoil;
            let name = state.player(attacker).name.clone();
            state.record(format!("{} took {} recoil damage from quills.", name, recoil));
            state.notify(NoticeKind::Warning, "Pricked by quills!");
        }
    }

    if state
        .player(defender)
        .has_passive(catalog, |p| matches!(p, Passive::PoisonSkin))
    {
        state
            .player_mut(attacker)
            .statuses
            .apply(Status::new(StatusId::Poisoned).from_player(defender));
        let name = state.player(attacker).name.clone();
        state.record(format!("{} was poisoned by the target's skin.", name));
        state.notify(NoticeKind::Warning, "Poisoned by skin!");
    }

    let dealt = (damage - defense).max(0);
    state.player_mut(defender).hp -= dealt;
    let attacker_name = state.player(attacker).name.clone();
    state.record(format!("{} attacked for {} damage.", attacker_name, dealt));
    state.notify(NoticeKind::Success, format!("Dealt {} damage!", dealt));

    for hook in &attack.on_hit {
        match hook {
            OnHit::Poison => {
                state
                    .player_mut(defender)
                    .statuses
                    .apply(Status::new(StatusId::Poisoned));
            }
            OnHit::PoisonOnTails => {
                if !flip(state, "Venom Chance", stream, Some(defender)).is_heads() {
                    state
                        .player_mut(defender)
                        .statuses
                        .apply(Status::new(StatusId::Poisoned));
                    let name = state.player(defender).name.clone();
                    state.record(format!("{} is poisoned.", name));
                }
            }
            OnHit::Grapple => {
                state
                    .player_mut(defender)
                    .statuses
                    .apply(Status::new(StatusId::Grappled));
            }
            OnHit::GrappleOnHeads => {
                if flip(state, "Grapple Chance", stream, Some(attacker)).is_heads() {
                    state
                        .player_mut(defender)
                        .statuses
                        .apply(Status::new(StatusId::Grappled));
                }
            }
            OnHit::LeechAttach => {
                let protected = state.player(defender).has_passive(catalog, |p| {
                    matches!(
                        p,
                        Passive::FlatDefense(_)
                            | Passive::FlipDefense {
                                flipper: FlipParty::Attacker,
                                ..
                            }
                    )
                });
                if protected {
                    let name = state.player(defender).name.clone();
                    state.record(format!("{}'s hide shrugged off the leech.", name));
                    state.notify(NoticeKind::Warning, "Leech blocked.");
                } else {
                    state
                        .player_mut(defender)
                        .statuses
                        .apply(Status::new(StatusId::Leeched).from_player(attacker));
                    let name = state.player(defender).name.clone();
                    state.record(format!("{} is leeched!", name));
                    state.notify(NoticeKind::Success, "Leeched!");
                }
            }
        }
    }

    check_win(state);
}

/// Answer a pending evade reaction. Evading costs [`EVADE_COST`] stamina and
/// negates the attack; declining (or being unable to pay) lets the attack
/// resolve as if no reaction existed.
pub(crate) fn resolve_agile(
    catalog: &Catalog,
    mut next: GameState,
    reaction: PendingReaction,
    use_evade: bool,
    rng: &[f64],
) -> GameState {
    let mut stream = RngStream::new(rng);
    next.pending_reaction = None;

    let def = catalog.def(reaction.card).clone();
    let defender = reaction.defender;

    if use_evade && next.player(defender).stamina >= EVADE_COST {
        next.player_mut(defender).stamina -= EVADE_COST;
        let name = next.player(defender).name.clone();
        next.record(format!("{} evaded {}!", name, def.name));
        next.notify(NoticeKind::Success, "Evaded!");

        if next
            .player(defender)
            .has_passive(catalog, |p| matches!(p, Passive::EvadeRefund))
        {
            next.player_mut(defender).gain_stamina(1);
            next.notify(NoticeKind::Info, "Swift Reflexes refund (+1 stamina)");
        }
        return next;
    }

    let attack = def.attack.clone().expect("reaction card must attack");
    resolve_damage(
        catalog,
        &mut next,
        reaction.attacker,
        defender,
        &def,
        &attack,
        &mut stream,
    );
    next
}

/// Answer a pending multi-way choice.
pub(crate) fn resolve_choice(
    catalog: &Catalog,
    mut next: GameState,
    choice: PendingChoice,
    picked: ChoiceOption,
    rng: &[f64],
) -> GameState {
    if !choice.options.contains(&picked) {
        return rejected(next, "That option is not on offer.");
    }

    let mut stream = RngStream::new(rng);
    next.pending_choice = None;

    let def = catalog.def(choice.card).clone();
    let player = choice.player;
    let name = next.player(player).name.clone();
    next.record(format!("{} chose {:?} for {}.", name, picked, def.name));

    match picked {
        ChoiceOption::Attack => {
            let attack = def.attack.clone().expect("choice card must attack");
            resolve_damage(
                catalog,
                &mut next,
                player,
                choice.target,
                &def,
                &attack,
                &mut stream,
            );
        }
        ChoiceOption::Dig => {
            next.player_mut(player)
                .statuses
                .apply(Status::lasting(StatusId::Hidden, 1));
            next.notify(NoticeKind::Success, "Dug in (Hidden)");
        }
        ChoiceOption::Climb => {
            next.player_mut(player)
                .statuses
                .apply(Status::lasting(StatusId::Climbing, 1));
            next.notify(NoticeKind::Success, "Climbed up (Climbing)");
        }
    }
    next
}
