//! Ability dispatch: tabulated effects plus the named special handlers.

use super::combat;
use crate::catalog::{
    AbilityOp, CardDef, Catalog, Category, Passive, Special, StatusTarget,
};
use crate::rng::{flip, RngStream};
use crate::state::{GameState, InstanceId, LastAction, NoticeKind, PlayerId};
use crate::status::{Status, StatusId};

#[allow(clippy::too_many_arguments)]
pub(crate) fn ability_action(
    catalog: &Catalog,
    state: &mut GameState,
    actor: PlayerId,
    opponent: PlayerId,
    def: &CardDef,
    stream: &mut RngStream<'_>,
    hand_target: Option<InstanceId>,
    depth: u8,
) {
    match &def.special {
        Special::Mimic => {
            mimic(catalog, state, actor, opponent, stream, depth);
            return;
        }
        Special::Steal => {
            steal(catalog, state, actor, opponent, hand_target);
            return;
        }
        _ => {}
    }

    apply_profile(catalog, state, actor, opponent, def, stream);
}

/// Run a card's ability profile: resolve the gating flip, then the chosen
/// branch.
pub(crate) fn apply_profile(
    catalog: &Catalog,
    state: &mut GameState,
    actor: PlayerId,
    opponent: PlayerId,
    def: &CardDef,
    stream: &mut RngStream<'_>,
) {
    let Some(profile) = &def.ability else {
        return;
    };

    let heads = match &profile.flip {
        Some(reason) => flip(state, reason, stream, Some(actor)).is_heads(),
        None => true,
    };

    let op = if heads {
        Some(&profile.on_heads)
    } else {
        profile.on_tails.as_ref()
    };

    match op {
        Some(op) => apply_op(catalog, state, actor, opponent, def, op),
        None => {
            state.notify(NoticeKind::Warning, format!("{} had no effect.", def.name));
        }
    }
}

fn apply_op(
    catalog: &Catalog,
    state: &mut GameState,
    actor: PlayerId,
    opponent: PlayerId,
    def: &CardDef,
    op: &AbilityOp,
) {
    match op {
        AbilityOp::GainStamina(amount) => {
            state.player_mut(actor).gain_stamina(*amount);
            state.notify(NoticeKind::Success, format!("+{} stamina", amount));
        }
        AbilityOp::StaminaSurge => {
            let p = state.player_mut(actor);
            p.gain_stamina(1);
            p.statuses.apply(Status::new(StatusId::StaminaDebt));
            let name = p.name.clone();
            state.record(format!("{} surges now and will pay for it later.", name));
            state.notify(NoticeKind::Success, "Adrenaline rush!");
        }
        AbilityOp::Heal {
            amount,
            surplus_stamina,
        } => {
            let p = state.player_mut(actor);
            p.heal(*amount);
            if *surplus_stamina && p.hp == p.max_hp {
                p.gain_stamina(1);
            }
            let name = p.name.clone();
            state.record(format!("{} recovered with {}.", name, def.name));
        }
        AbilityOp::Status {
            target,
            status,
            duration,
        } => {
            let dest = match target {
                StatusTarget::Actor => actor,
                StatusTarget::Opponent => opponent,
            };
            if *status == StatusId::Confused
                && dest == opponent
                && state
                    .player(opponent)
                    .has_passive(catalog, |p| matches!(p, Passive::ConfusionImmune))
            {
                let name = state.player(opponent).name.clone();
                state.record(format!("{} is immune to confusion.", name));
                state.notify(NoticeKind::Info, "Immune!");
                return;
            }
            let applied = match duration {
                Some(turns) => Status::lasting(*status, *turns),
                None => Status::new(*status),
            };
            state.player_mut(dest).statuses.apply(applied);
            let name = state.player(dest).name.clone();
            state.record(format!("{} is now {:?}.", name, status));
        }
        AbilityOp::Breakout {
            damage_buff,
            guarantee_flip,
        } => {
            let p = state.player_mut(actor);
            p.statuses.clear(StatusId::Grappled);
            p.statuses.clear(StatusId::Stuck);
            if *damage_buff {
                p.statuses.apply(Status::lasting(StatusId::DamageBuff, 1));
            }
            if *guarantee_flip {
                p.guaranteed_next_flip = true;
            }
            let name = p.name.clone();
            state.record(format!("{} breaks loose with {}.", name, def.name));
        }
        AbilityOp::Cleanse => {
            state.player_mut(actor).statuses.cleanse_negative();
            let name = state.player(actor).name.clone();
            state.record(format!("{} shed every affliction.", name));
        }
        AbilityOp::DiscardHand => {
            let p = state.player_mut(opponent);
            let dropped = std::mem::take(&mut p.hand);
            let count = dropped.len();
            p.discard.extend(dropped);
            let name = state.player(opponent).name.clone();
            state.record(format!("{} panicked and dropped {} cards.", name, count));
            state.notify(NoticeKind::Success, "Opponent discarded their hand!");
        }
        AbilityOp::DrainStamina(amount) => {
            state.player_mut(opponent).drain_stamina(*amount);
            let name = state.player(opponent).name.clone();
            state.record(format!("{} lost {} stamina.", name, amount));
        }
        AbilityOp::RevealAndChase => {
            let o = state.player_mut(opponent);
            o.statuses.clear(StatusId::Hidden);
            o.statuses.clear(StatusId::Camouflaged);
            state
                .player_mut(actor)
                .statuses
                .apply(Status::lasting(StatusId::Chasing, 1));
            let name = state.player(actor).name.clone();
            state.record(format!("{} sniffed out the opponent.", name));
        }
    }
}

/// Mimicry: re-dispatch the opponent's last resolved move as our own,
/// consuming the next unused draws from the same stream, then record the
/// mimicked card as the new last action so chains keep working.
fn mimic(
    catalog: &Catalog,
    state: &mut GameState,
    actor: PlayerId,
    opponent: PlayerId,
    stream: &mut RngStream<'_>,
    depth: u8,
) {
    if depth > 0 {
        state.notify(NoticeKind::Warning, "The echo fades into nothing.");
        return;
    }

    let Some(last) = state.last_action.filter(|l| l.player == opponent) else {
        state.notify(NoticeKind::Warning, "Nothing to mimic yet.");
        return;
    };
    let Some(copied) = catalog.get(last.card).cloned() else {
        state.notify(NoticeKind::Warning, "Nothing to mimic yet.");
        return;
    };
    if matches!(copied.special, Special::Mimic) {
        state.notify(NoticeKind::Warning, "Mimicking a mimic goes nowhere.");
        return;
    }

    let name = state.player(actor).name.clone();
    state.record(format!("{} mimics {}!", name, copied.name));

    if copied.category == Category::Physical {
        combat::attack_action(catalog, state, actor, opponent, &copied, stream);
    } else {
        ability_action(
            catalog,
            state,
            actor,
            opponent,
            &copied,
            stream,
            None,
            depth + 1,
        );
    }

    state.last_action = Some(LastAction {
        player: actor,
        card: copied.id,
    });
}

/// Copycat: lift a named card out of the opponent's hand.
fn steal(
    catalog: &Catalog,
    state: &mut GameState,
    actor: PlayerId,
    opponent: PlayerId,
    hand_target: Option<InstanceId>,
) {
    let Some(wanted) = hand_target else {
        state.notify(NoticeKind::Warning, "No card was marked to steal.");
        return;
    };
    let Some(stolen) = state.player_mut(opponent).take_from_hand(wanted) else {
        state.notify(NoticeKind::Warning, "That card slipped away.");
        return;
    };

    let card_name = catalog.def(stolen.def).name.clone();
    state.player_mut(actor).hand.push(stolen);
    let name = state.player(actor).name.clone();
    state.record(format!("{} stole {}!", name, card_name));
    state.notify(NoticeKind::Success, "Card stolen!");
}
