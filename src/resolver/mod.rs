//! The action resolver: one pure state transition per submitted action.
//!
//! `resolve(catalog, state, action)` never mutates its input and never
//! fails: a transition whose preconditions are unmet returns the prior state
//! plus an error notification. Interrupts (pending reaction, pending choice)
//! are plain data; while one is set, only the designated player's answering
//! action is accepted.

mod ability;
mod combat;
mod play;
mod turn;

pub use combat::EVADE_COST;

use crate::action::Action;
use crate::catalog::Catalog;
use crate::factory;
use crate::state::{GameState, NoticeKind, Phase, PlayerId};
use crate::status::StatusId;

/// Apply one action to the game state, returning the next state.
#[must_use]
pub fn resolve(catalog: &Catalog, state: &GameState, action: &Action) -> GameState {
    let mut next = state.clone();

    match action {
        Action::InitGame { payload } => {
            let mut fresh = (**payload).clone();
            factory::apply_start_bonuses(catalog, &mut fresh);
            fresh.record("The clash begins!");
            return fresh;
        }
        Action::AcknowledgeCoinFlip => {
            next.active_flip = None;
            return next;
        }
        Action::DismissNotification { id } => {
            next.dismiss_notification(*id);
            return next;
        }
        _ => {}
    }

    if next.is_over() {
        return rejected(next, "The match is already decided.");
    }

    // A raised interrupt suspends everything but the designated answer.
    if let Some(reaction) = next.pending_reaction {
        return match action {
            Action::ResolveAgile {
                player,
                use_evade,
                rng,
            } if *player == reaction.defender => {
                combat::resolve_agile(catalog, next, reaction, *use_evade, rng)
            }
            _ => rejected(next, "Waiting for the defender's reaction."),
        };
    }
    if let Some(choice) = next.pending_choice.clone() {
        return match action {
            Action::ResolveChoice {
                player,
                choice: picked,
                rng,
            } if *player == choice.player => {
                combat::resolve_choice(catalog, next, choice, *picked, rng)
            }
            _ => rejected(next, "Waiting for a pending choice."),
        };
    }
    match action {
        Action::ResolveAgile { .. } => return rejected(next, "No reaction is pending."),
        Action::ResolveChoice { .. } => return rejected(next, "No choice is pending."),
        _ => {}
    }

    if let Some(actor) = action.actor() {
        if actor != next.current_player {
            return rejected(next, "It is not your turn.");
        }
    }

    match action {
        Action::PlayCard {
            player,
            card,
            target,
        } => play::play_card(catalog, next, *player, *card, *target),
        Action::PlayEvolveCard {
            player,
            evolve,
            formation_target,
            hand_replacement,
        } => play::play_evolve(
            catalog,
            next,
            *player,
            *evolve,
            *formation_target,
            *hand_replacement,
        ),
        Action::UseAction {
            player,
            kind,
            card,
            target,
            rng,
            hand_target,
        } => combat::use_action(
            catalog,
            next,
            *player,
            *kind,
            *card,
            *target,
            rng,
            *hand_target,
        ),
        Action::EndTurn { player, rng } => turn::end_turn(catalog, next, *player, rng),
        Action::ClearPoison { player } => {
            turn::clear_status_action(next, *player, StatusId::Poisoned, "Poison")
        }
        Action::ClearLeech { player } => {
            turn::clear_status_action(next, *player, StatusId::Leeched, "Leech")
        }
        Action::AttemptGrappleEscape { player, rng } => turn::grapple_escape(next, *player, rng),
        Action::UseHabitatAction { player, rng } => turn::habitat_action(next, *player, rng),
        Action::InitGame { .. }
        | Action::ResolveAgile { .. }
        | Action::ResolveChoice { .. }
        | Action::AcknowledgeCoinFlip
        | Action::DismissNotification { .. } => next,
    }
}

/// Reject a transition: unchanged state plus an error notification.
pub(crate) fn rejected(mut next: GameState, message: &str) -> GameState {
    next.notify(NoticeKind::Error, message);
    next
}

/// Freeze the match once a player's HP reaches zero.
///
/// Called after every HP-affecting step. Negative HP is clamped to zero; if
/// both players drop at once, the current player's recklessness costs them
/// the match.
pub(crate) fn check_win(state: &mut GameState) {
    if state.is_over() {
        return;
    }

    let mut dead = Vec::new();
    for (id, player) in state.players.iter_mut() {
        if player.hp <= 0 {
            player.hp = 0;
            dead.push(id);
        }
    }

    let winner = match dead.len() {
        0 => return,
        1 => dead[0].opponent(),
        _ => state.current_player.opponent(),
    };

    state.winner = Some(winner);
    state.phase = Phase::End;
    let name = state.player(winner).name.clone();
    state.record(format!("{} wins the match!", name));
    state.notify(NoticeKind::Success, format!("{} wins!", name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InstanceIds, PlayerState, Players};
    use crate::status::StatusSet;
    use crate::catalog::{CreatureKind, Habitat, SizeClass};

    fn bare_player(id: PlayerId) -> PlayerState {
        PlayerState {
            id,
            name: format!("P{}", id.0),
            hp: 10,
            max_hp: 10,
            stamina: 3,
            max_stamina: 3,
            kind: CreatureKind::Mammal,
            size: SizeClass::Medium,
            hand: Vec::new(),
            deck: Vec::new(),
            discard: Vec::new(),
            formation: Vec::new(),
            statuses: StatusSet::new(),
            cards_played_this_turn: 0,
            has_acted_this_turn: false,
            guaranteed_next_flip: false,
            used_habitat_hide: false,
        }
    }

    fn bare_state() -> GameState {
        let mut state = GameState::new(
            Habitat::Arena,
            Players::new(bare_player),
            InstanceIds::new(),
        );
        state.phase = Phase::Action;
        state
    }

    #[test]
    fn test_check_win_clamps_and_freezes() {
        let mut state = bare_state();
        state.player_mut(PlayerId::new(1)).hp = -2;

        check_win(&mut state);

        assert_eq!(state.player(PlayerId::new(1)).hp, 0);
        assert_eq!(state.winner, Some(PlayerId::new(0)));
        assert_eq!(state.phase, Phase::End);
    }

    #[test]
    fn test_check_win_no_casualty() {
        let mut state = bare_state();
        check_win(&mut state);
        assert!(state.winner.is_none());
        assert_eq!(state.phase, Phase::Action);
    }

    #[test]
    fn test_check_win_double_knockout() {
        let mut state = bare_state();
        state.current_player = PlayerId::new(0);
        state.player_mut(PlayerId::new(0)).hp = 0;
        state.player_mut(PlayerId::new(1)).hp = -1;

        check_win(&mut state);

        assert_eq!(state.winner, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let catalog = Catalog::builtin();
        let state = bare_state();

        let next = resolve(
            &catalog,
            &state,
            &Action::EndTurn {
                player: PlayerId::new(1),
                rng: Default::default(),
            },
        );

        assert_eq!(next.turn, state.turn);
        assert_eq!(next.current_player, state.current_player);
        assert!(next
            .notifications
            .iter()
            .any(|n| n.kind == NoticeKind::Error));
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let catalog = Catalog::builtin();
        let mut state = bare_state();
        state.phase = Phase::End;
        state.winner = Some(PlayerId::new(0));

        let next = resolve(
            &catalog,
            &state,
            &Action::EndTurn {
                player: PlayerId::new(0),
                rng: Default::default(),
            },
        );

        assert_eq!(next.turn, state.turn);
        assert_eq!(next.phase, Phase::End);
    }

    #[test]
    fn test_ui_actions_survive_terminal_state() {
        let catalog = Catalog::builtin();
        let mut state = bare_state();
        state.phase = Phase::End;
        state.notify(NoticeKind::Info, "done");
        let id = state.notifications[0].id;

        let next = resolve(&catalog, &state, &Action::DismissNotification { id });
        assert!(next.notifications.is_empty());
    }
}
