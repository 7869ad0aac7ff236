//! Turn boundaries: end-of-turn bookkeeping, start-of-turn upkeep, the
//! unique-card draw, and the small status-clearing actions.

use super::play::{apply_entry_effects, FORMATION_CAP};
use super::{check_win, rejected};
use crate::catalog::{Catalog, Category, Habitat, Passive};
use crate::rng::{flip, RngStream};
use crate::state::{GameState, NoticeKind, Phase, PlayerId};
use crate::status::{Status, StatusId};

/// Bounded extra scans past the deck when hunting a non-duplicate draw.
const DRAW_SLACK: usize = 5;

pub(crate) fn end_turn(
    catalog: &Catalog,
    mut next: GameState,
    player: PlayerId,
    rng: &[f64],
) -> GameState {
    let mut stream = RngStream::new(rng);

    {
        let ender = next.player_mut(player);
        ender.guaranteed_next_flip = false;
        ender.statuses.clear(StatusId::DamageBuff);
        if ender.statuses.clear(StatusId::Stuck) {
            let name = ender.name.clone();
            next.record(format!("{} is no longer stuck.", name));
        }
    }
    next.active_flip = None;

    let incoming = player.opponent();
    next.current_player = incoming;
    next.turn += 1;
    next.phase = Phase::Start;

    // Start-of-turn upkeep for the incoming player.
    if next.player(incoming).statuses.has(StatusId::Confused) {
        let side = flip(&mut next, "Confusion Check", &mut stream, Some(incoming));
        let name = next.player(incoming).name.clone();
        if side.is_heads() {
            next.player_mut(incoming).statuses.clear(StatusId::Confused);
            next.notify(NoticeKind::Success, format!("{} snapped out of confusion!", name));
        } else {
            next.notify(NoticeKind::Error, format!("{} is still confused!", name));
        }
    }

    if next.player_mut(incoming).statuses.clear(StatusId::StaminaDebt) {
        next.player_mut(incoming).drain_stamina(1);
        let name = next.player(incoming).name.clone();
        next.record(format!("{} pays 1 stamina for the earlier rush.", name));
    }

    next.player_mut(incoming).gain_stamina(1);

    if next.player(incoming).statuses.has(StatusId::Poisoned) {
        next.player_mut(incoming).hp -= 1;
        let name = next.player(incoming).name.clone();
        next.record(format!("{} took 1 poison damage.", name));
        next.notify(NoticeKind::Warning, format!("{} suffers from poison", name));
    }

    if let Some(leech) = next.player(incoming).statuses.any(StatusId::Leeched).copied() {
        next.player_mut(incoming).hp -= 1;
        let name = next.player(incoming).name.clone();
        next.record(format!("{} is drained by the leech.", name));
        if let Some(source) = leech.source {
            let source_player = next.player_mut(source);
            if source_player.hp < source_player.max_hp {
                source_player.heal(1);
                let source_name = source_player.name.clone();
                next.record(format!("{} feeds on the leeched blood.", source_name));
            }
        }
    }

    next.player_mut(incoming).statuses.tick();

    {
        let p = next.player_mut(incoming);
        p.cards_played_this_turn = 0;
        p.has_acted_this_turn = false;
    }

    let regen: i32 = next
        .player(incoming)
        .passives(catalog)
        .filter_map(|p| match p {
            Passive::HabitatRegen { habitat, amount } if *habitat == next.habitat => Some(*amount),
            _ => None,
        })
        .sum();
    if regen > 0 {
        next.player_mut(incoming).heal(regen);
        let name = next.player(incoming).name.clone();
        next.record(format!("{} regenerates {} HP in this habitat.", name, regen));
    }

    check_win(&mut next);
    if next.is_over() {
        return next;
    }

    draw_unique(catalog, &mut next, incoming);

    next.phase = Phase::Action;
    next
}

/// Draw one card, returning duplicates of defs already held to the deck
/// bottom for a bounded number of attempts. A drawn passive (Size, or a
/// zero-cost non-upgrade non-interactive Physical) auto-plays into a
/// formation slot when its category cap allows.
fn draw_unique(catalog: &Catalog, state: &mut GameState, player: PlayerId) {
    let drawn = {
        let p = state.player_mut(player);
        if p.deck.is_empty() {
            return;
        }

        let max_attempts = p.deck.len() + DRAW_SLACK;
        let mut attempts = 0;
        loop {
            let candidate = match p.deck.pop() {
                Some(card) => card,
                None => return,
            };
            let duplicate = p.hand.iter().any(|c| c.def == candidate.def)
                || p.formation.iter().any(|c| c.def == candidate.def);
            attempts += 1;
            if duplicate && attempts < max_attempts {
                p.deck.insert(0, candidate);
                continue;
            }
            if duplicate {
                // Whole deck cycled through duplicates; leave it be.
                p.deck.insert(0, candidate);
                return;
            }
            break candidate;
        }
    };

    let def = catalog.def(drawn.def).clone();
    let auto_play = def.category == Category::Size
        || (def.category == Category::Physical
            && def.cost == 0
            && !def.is_upgrade()
            && !def.interactive);

    let name = state.player(player).name.clone();
    if auto_play {
        let full = def.category == Category::Physical
            && state.player(player).formation_count(catalog, Category::Physical) >= FORMATION_CAP;
        if full {
            state.player_mut(player).hand.push(drawn);
            state.record(format!(
                "{} drew {} but the formation is full (kept in hand).",
                name, def.name
            ));
        } else {
            state.player_mut(player).formation.push(drawn);
            apply_entry_effects(catalog, state, player, def.id);
            state.record(format!("{} drew and fielded {} (passive).", name, def.name));
            state.notify(NoticeKind::Info, format!("{} auto-played", def.name));
        }
    } else {
        state.player_mut(player).hand.push(drawn);
        state.record(format!("{} drew a card.", name));
    }
}

/// Pay 1 stamina and spend the turn's action to shake off a named status.
pub(crate) fn clear_status_action(
    mut next: GameState,
    player: PlayerId,
    status: StatusId,
    label: &str,
) -> GameState {
    if !next.player(player).statuses.has(status) {
        return rejected(next, &format!("You are not affected by {}.", label));
    }
    if next.player(player).has_acted_this_turn {
        return rejected(next, "Already acted this turn.");
    }
    if next.player(player).stamina < 1 {
        return rejected(next, "Not enough stamina.");
    }

    let p = next.player_mut(player);
    p.stamina -= 1;
    p.has_acted_this_turn = true;
    p.statuses.clear(status);
    let name = p.name.clone();
    next.record(format!("{} cleared {}.", name, label));
    next.notify(NoticeKind::Success, format!("Removed {}!", label));
    next
}

/// Coin-flip attempt to break a grapple; spends the turn's action win or
/// lose.
pub(crate) fn grapple_escape(mut next: GameState, player: PlayerId, rng: &[f64]) -> GameState {
    if !next.player(player).statuses.has(StatusId::Grappled) {
        return rejected(next, "You are not grappled.");
    }
    if next.player(player).has_acted_this_turn {
        return rejected(next, "Already acted this turn.");
    }

    let mut stream = RngStream::new(rng);
    let side = flip(&mut next, "Grapple Escape", &mut stream, Some(player));
    next.player_mut(player).has_acted_this_turn = true;

    let name = next.player(player).name.clone();
    if side.is_heads() {
        next.player_mut(player).statuses.clear(StatusId::Grappled);
        next.record(format!("{} broke free from the grapple!", name));
        next.notify(NoticeKind::Success, "Broke free!");
    } else {
        next.record(format!("{} failed to break free.", name));
        next.notify(NoticeKind::Warning, "Failed to break free.");
    }
    next
}

/// The once-per-game forest hide: heads grants a lasting Hidden status.
pub(crate) fn habitat_action(mut next: GameState, player: PlayerId, rng: &[f64]) -> GameState {
    if next.habitat != Habitat::Forest {
        return rejected(next, "This habitat offers nowhere to hide.");
    }
    if next.player(player).used_habitat_hide {
        return rejected(next, "You already went to ground this match.");
    }

    let mut stream = RngStream::new(rng);
    let side = flip(&mut next, "Forest Hide", &mut stream, Some(player));
    next.player_mut(player).used_habitat_hide = true;

    let name = next.player(player).name.clone();
    if side.is_heads() {
        next.player_mut(player)
            .statuses
            .apply(Status::new(StatusId::Hidden));
        next.record(format!("{} melts into the undergrowth.", name));
        next.notify(NoticeKind::Success, "You are now Hidden!");
    } else {
        next.record(format!("{} failed to find cover.", name));
        next.notify(NoticeKind::Warning, "Failed to hide.");
    }
    next
}
