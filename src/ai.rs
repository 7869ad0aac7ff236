//! Heuristic action proposer.
//!
//! Consumes the public game state read-only and produces the same action
//! variants a human submits, with pre-generated draw sequences. The driver
//! feeds the proposed actions through the resolver one at a time; the
//! proposer never mutates state itself.

use crate::action::{Action, UseKind};
use crate::catalog::{cards, AbilityOp, CardId, Catalog, Category, DamageBase, Special};
use crate::resolver::EVADE_COST;
use crate::rng::GameRng;
use crate::state::{GameState, InstanceId, PlayerId};
use crate::status::StatusId;

/// Draws attached to each chance-bearing proposal.
const SEQ_LEN: usize = 10;

/// Propose an ordered batch of actions for one full turn.
///
/// The batch always ends with `EndTurn`; earlier entries may be rejected by
/// the resolver without harm (rejections leave the state unchanged).
pub fn propose_actions(
    catalog: &Catalog,
    state: &GameState,
    self_id: PlayerId,
    rng: &mut GameRng,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let me = state.player(self_id);
    let opponent = state.player(self_id.opponent());

    let mut stamina = me.stamina;
    let mut played_card: Option<(InstanceId, CardId)> = None;

    // Card phase: prefer an affordable upgrade, otherwise field something
    // compatible, leaning Physical while the formation is thin.
    if me.cards_played_this_turn == 0 {
        let mut upgraded = false;
        for card in &me.hand {
            let def = catalog.def(card.def);
            if !def.is_upgrade() || def.cost > stamina {
                continue;
            }
            if let Some(base) = me.formation.iter().find(|c| def.upgrades.contains(&c.def)) {
                actions.push(Action::PlayCard {
                    player: self_id,
                    card: card.instance,
                    target: Some(base.instance),
                });
                stamina -= def.cost;
                upgraded = true;
                break;
            }
        }

        if !upgraded {
            let playable: Vec<_> = me
                .hand
                .iter()
                .filter(|c| {
                    let def = catalog.def(c.def);
                    !def.is_upgrade()
                        && def.kinds.allows(me.kind)
                        && def.category != Category::Special
                        && !me.formation_has(def.id)
                        && def.requires_size.map_or(true, |s| me.size == s)
                })
                .collect();

            let physical_count = me.formation_count(catalog, Category::Physical);
            let pick = playable
                .iter()
                .find(|c| {
                    catalog.def(c.def).category == Category::Physical && physical_count < 2
                })
                .or_else(|| playable.first())
                .copied();

            if let Some(card) = pick {
                actions.push(Action::PlayCard {
                    player: self_id,
                    card: card.instance,
                    target: None,
                });
                played_card = Some((card.instance, card.def));
            }
        }
    }

    // Action phase: score every usable formation card and take the best.
    if !me.has_acted_this_turn && !me.statuses.has(StatusId::Stuck) {
        let mut candidates: Vec<(InstanceId, CardId)> = me
            .formation
            .iter()
            .map(|c| (c.instance, c.def))
            .collect();
        if let Some(pending) = played_card {
            candidates.push(pending);
        }

        let mut best: Option<(f64, Action)> = None;
        for (instance, def_id) in candidates {
            let def = catalog.def(def_id);
            if def.cost > stamina || def.category == Category::Size {
                continue;
            }
            if def.category == Category::Physical && me.statuses.has(StatusId::CannotAttack) {
                continue;
            }

            let mut score = 0.0;
            let mut hand_target = None;

            if matches!(
                def.ability.as_ref().map(|a| &a.on_heads),
                Some(AbilityOp::Heal { .. })
            ) {
                let missing = me.max_hp - me.hp;
                score += if missing * 10 > me.max_hp * 6 {
                    20.0
                } else if missing * 10 > me.max_hp * 3 {
                    5.0
                } else {
                    -10.0
                };
            }

            if let Some(attack) = &def.attack {
                let damage = match attack.base {
                    DamageBase::Fixed(n) => n,
                    DamageBase::Airborne { grounded, .. } => grounded,
                    DamageBase::SizeGated { amount, .. } => amount,
                };
                score += if opponent.hp <= damage {
                    1000.0
                } else {
                    f64::from(damage) * 2.0
                };
            }

            if matches!(def.special, Special::Steal) {
                if opponent.hand.is_empty() {
                    score -= 100.0;
                } else {
                    score += 15.0;
                    hand_target = opponent
                        .hand
                        .iter()
                        .max_by_key(|c| catalog.def(c.def).cost)
                        .map(|c| c.instance);
                }
            }

            if def_id == cards::CONFUSE || def_id == cards::TOXIC_SPIT {
                score += 5.0;
            }
            if def_id == cards::TERRITORIAL_DISPLAY {
                score += 4.0;
            }

            // Small jitter keeps the proposer from being fully predictable.
            score += rng.roll() * 3.0;

            if score > 0.0 && best.as_ref().map_or(true, |(s, _)| score > *s) {
                let kind = if def.category == Category::Physical {
                    UseKind::Attack
                } else {
                    UseKind::Ability
                };
                best = Some((
                    score,
                    Action::UseAction {
                        player: self_id,
                        kind,
                        card: instance,
                        target: self_id.opponent(),
                        rng: rng.seq(SEQ_LEN),
                        hand_target,
                    },
                ));
            }
        }

        if let Some((_, action)) = best {
            actions.push(action);
        }
    }

    actions.push(Action::EndTurn {
        player: self_id,
        rng: rng.seq(SEQ_LEN),
    });
    actions
}

/// Answer a pending reaction aimed at us: evade whenever we can afford it
/// with a point to spare.
pub fn propose_reaction(
    _catalog: &Catalog,
    state: &GameState,
    self_id: PlayerId,
    rng: &mut GameRng,
) -> Option<Action> {
    let reaction = state.pending_reaction?;
    if reaction.defender != self_id {
        return None;
    }

    let me = state.player(self_id);
    let use_evade = me.stamina > EVADE_COST || (me.stamina >= EVADE_COST && me.hp <= 4);
    Some(Action::ResolveAgile {
        player: self_id,
        use_evade,
        rng: rng.seq(SEQ_LEN),
    })
}
