//! Card play: moving hand cards into formation, upgrades, and evolution.

use super::rejected;
use crate::catalog::{CardDef, CardId, Catalog, Category, Passive};
use crate::state::{GameState, InstanceId, NoticeKind, PlayerId};

/// Formation capacity per counted category.
pub(crate) const FORMATION_CAP: usize = 5;

/// Apply the immediate stat effect of a card entering formation.
pub(crate) fn apply_entry_effects(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    def: CardId,
) {
    let bonus: i32 = catalog
        .def(def)
        .passives
        .iter()
        .filter_map(|p| match p {
            Passive::BonusHp(n) => Some(*n),
            _ => None,
        })
        .sum();
    if bonus > 0 {
        let p = state.player_mut(player);
        p.max_hp += bonus;
        p.hp += bonus;
    }
}

pub(crate) fn play_card(
    catalog: &Catalog,
    mut next: GameState,
    player: PlayerId,
    card: InstanceId,
    target: Option<InstanceId>,
) -> GameState {
    let Some(instance) = next.player(player).hand_card(card).copied() else {
        return rejected(next, "That card is not in your hand.");
    };
    let def = catalog.def(instance.def).clone();

    if !def.kinds.allows(next.player(player).kind) {
        return rejected(next, &format!("{} does not suit your creature.", def.name));
    }

    if def.is_upgrade() {
        return play_upgrade(catalog, next, player, card, &def, target);
    }

    {
        let p = next.player(player);
        if def.category == Category::Physical
            && p.formation_count(catalog, Category::Physical) >= FORMATION_CAP
        {
            return rejected(next, "Max 5 Physical cards in play. Upgrade or Evolve instead.");
        }
        if def.category == Category::Ability
            && p.formation_count(catalog, Category::Ability) >= FORMATION_CAP
        {
            return rejected(next, "Max 5 Ability cards in play. Upgrade or Evolve instead.");
        }
        if p.cards_played_this_turn >= 1 {
            return rejected(next, "Only one card can be played per turn.");
        }
        if p.formation_has(def.id) {
            return rejected(next, &format!("{} is already in play.", def.name));
        }
        if let Some(required) = def.requires_size {
            if p.size != required {
                return rejected(
                    next,
                    &format!("Only {:?} creatures can play {}.", required, def.name),
                );
            }
        }
    }

    let p = next.player_mut(player);
    let taken = p.take_from_hand(card).expect("hand card vanished");
    p.formation.push(taken);
    p.cards_played_this_turn += 1;

    apply_entry_effects(catalog, &mut next, player, def.id);

    let name = next.player(player).name.clone();
    next.record(format!("{} played {}.", name, def.name));
    next.notify(NoticeKind::Success, format!("Played {}", def.name));
    next
}

/// Upgrades replace a compatible base card in formation instead of taking a
/// new slot; the displaced base goes to the discard pile. Auto-targets when
/// exactly one base is eligible.
fn play_upgrade(
    catalog: &Catalog,
    mut next: GameState,
    player: PlayerId,
    card: InstanceId,
    def: &CardDef,
    target: Option<InstanceId>,
) -> GameState {
    if next.player(player).cards_played_this_turn >= 1 {
        return rejected(next, "Only one card can be played per turn.");
    }
    if next.player(player).stamina < def.cost {
        return rejected(next, &format!("Need {} stamina to upgrade.", def.cost));
    }

    let target_instance = match target {
        Some(t) => t,
        None => {
            let eligible: Vec<InstanceId> = next
                .player(player)
                .formation
                .iter()
                .filter(|c| def.upgrades.contains(&c.def))
                .map(|c| c.instance)
                .collect();
            match eligible.as_slice() {
                [only] => *only,
                [] => return rejected(next, &format!("Nothing in play that {} upgrades.", def.name)),
                _ => return rejected(next, "Pick which card to upgrade."),
            }
        }
    };

    let Some(base) = next.player(player).formation_card(target_instance).copied() else {
        return rejected(next, "Upgrade target is not in your formation.");
    };
    if !def.upgrades.contains(&base.def) {
        let base_name = catalog.def(base.def).name.clone();
        return rejected(next, &format!("{} cannot upgrade {}.", def.name, base_name));
    }

    let base_name = catalog.def(base.def).name.clone();
    let p = next.player_mut(player);
    p.stamina -= def.cost;
    let upgrade = p.take_from_hand(card).expect("hand card vanished");
    let slot = p
        .formation
        .iter()
        .position(|c| c.instance == target_instance)
        .expect("formation slot vanished");
    let displaced = std::mem::replace(&mut p.formation[slot], upgrade);
    p.discard.push(displaced);
    p.cards_played_this_turn += 1;

    let name = next.player(player).name.clone();
    next.record(format!("{} upgraded {} to {}.", name, base_name, def.name));
    next.notify(NoticeKind::Success, format!("Upgraded to {}", def.name));
    next
}

/// Evolve: pay 2 stamina, discard the Evolve card, and swap a formation
/// card with a hand card. Size cards cannot be swapped out; an upgrade
/// replacement whose base sits elsewhere in formation lands on that base
/// instead of the vacated slot.
pub(crate) fn play_evolve(
    catalog: &Catalog,
    mut next: GameState,
    player: PlayerId,
    evolve: InstanceId,
    formation_target: InstanceId,
    hand_replacement: InstanceId,
) -> GameState {
    let Some(evolve_card) = next.player(player).hand_card(evolve).copied() else {
        return rejected(next, "The Evolve card is not in your hand.");
    };
    let evolve_def = catalog.def(evolve_card.def).clone();
    if next.player(player).stamina < evolve_def.cost {
        return rejected(next, "Need 2 stamina to Evolve.");
    }

    let Some(target) = next.player(player).formation_card(formation_target).copied() else {
        return rejected(next, "Invalid Evolve target.");
    };
    if catalog.def(target.def).category == Category::Size {
        return rejected(next, "Size cards cannot be evolved away.");
    }

    let Some(replacement) = next.player(player).hand_card(hand_replacement).copied() else {
        return rejected(next, "Invalid replacement card.");
    };
    let replacement_def = catalog.def(replacement.def).clone();
    if !replacement_def.kinds.allows(next.player(player).kind) {
        return rejected(
            next,
            &format!("{} does not suit your creature.", replacement_def.name),
        );
    }
    if next
        .player(player)
        .formation
        .iter()
        .any(|c| c.instance != formation_target && c.def == replacement.def)
    {
        return rejected(
            next,
            &format!("{} is already in play.", replacement_def.name),
        );
    }
    let target_category = catalog.def(target.def).category;
    if replacement_def.category != target_category
        && matches!(
            replacement_def.category,
            Category::Physical | Category::Ability
        )
        && next
            .player(player)
            .formation_count(catalog, replacement_def.category)
            >= FORMATION_CAP
    {
        return rejected(
            next,
            &format!("No room for another {:?} card.", replacement_def.category),
        );
    }

    let target_name = catalog.def(target.def).name.clone();
    let p = next.player_mut(player);
    p.stamina -= evolve_def.cost;
    let spent = p.take_from_hand(evolve).expect("hand card vanished");
    p.discard.push(spent);

    let replacement = p.take_from_hand(hand_replacement).expect("hand card vanished");

    // Reparent onto the base when the replacement upgrades something else in
    // formation; the targeted slot still frees up either way.
    let base_slot = if replacement_def.is_upgrade() {
        p.formation
            .iter()
            .position(|c| replacement_def.upgrades.contains(&c.def) && c.instance != formation_target)
    } else {
        None
    };

    let displaced = p
        .take_from_formation(formation_target)
        .expect("formation card vanished");
    p.hand.push(displaced);

    if let Some(slot) = base_slot {
        let base = std::mem::replace(&mut p.formation[slot], replacement);
        p.discard.push(base);
    } else {
        p.formation.push(replacement);
    }

    let name = next.player(player).name.clone();
    next.record(format!(
        "{} evolved, swapping {} for {}.",
        name, target_name, replacement_def.name
    ));
    next.notify(NoticeKind::Success, "Evolution complete!");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::cards;
    use crate::catalog::{CreatureKind, Habitat, SizeClass};
    use crate::state::{CardInstance, InstanceIds, Phase, PlayerState, Players};
    use crate::status::StatusSet;

    fn player(id: PlayerId, kind: CreatureKind) -> PlayerState {
        PlayerState {
            id,
            name: format!("P{}", id.0),
            hp: 15,
            max_hp: 15,
            stamina: 3,
            max_stamina: 3,
            kind,
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

    fn state_with(kind: CreatureKind) -> (Catalog, GameState) {
        let catalog = Catalog::builtin();
        let mut state = GameState::new(
            Habitat::Arena,
            Players::new(|id| player(id, kind)),
            InstanceIds::new(),
        );
        state.phase = Phase::Action;
        (catalog, state)
    }

    fn give(state: &mut GameState, p: PlayerId, def: crate::catalog::CardId) -> InstanceId {
        let id = state.instances.alloc();
        let charges = Catalog::builtin().def(def).max_charges;
        state
            .player_mut(p)
            .hand
            .push(CardInstance::new(id, def, charges));
        id
    }

    const P0: PlayerId = PlayerId(0);

    #[test]
    fn test_play_card_moves_to_formation() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let bite = give(&mut state, P0, cards::BITE);

        let next = play_card(&catalog, state, P0, bite, None);

        let p = next.player(P0);
        assert!(p.formation_has(cards::BITE));
        assert!(p.hand.is_empty());
        assert_eq!(p.cards_played_this_turn, 1);
    }

    #[test]
    fn test_play_rejects_second_card_same_turn() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let bite = give(&mut state, P0, cards::BITE);
        let claw = give(&mut state, P0, cards::CLAW_ATTACK);

        let next = play_card(&catalog, state, P0, bite, None);
        let next = play_card(&catalog, next, P0, claw, None);

        let p = next.player(P0);
        assert!(!p.formation_has(cards::CLAW_ATTACK));
        assert_eq!(p.hand.len(), 1);
    }

    #[test]
    fn test_play_rejects_duplicate_def() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let first = give(&mut state, P0, cards::BITE);
        let second = give(&mut state, P0, cards::BITE);

        let mut next = play_card(&catalog, state, P0, first, None);
        next.player_mut(P0).cards_played_this_turn = 0;
        let next = play_card(&catalog, next, P0, second, None);

        assert_eq!(next.player(P0).formation.len(), 1);
        assert_eq!(next.player(P0).hand.len(), 1);
    }

    #[test]
    fn test_play_rejects_incompatible_kind() {
        let (catalog, mut state) = state_with(CreatureKind::Avian);
        let fur = give(&mut state, P0, cards::FUR);

        let next = play_card(&catalog, state, P0, fur, None);

        assert!(next.player(P0).formation.is_empty());
        assert_eq!(next.player(P0).hand.len(), 1);
    }

    #[test]
    fn test_sixth_physical_rejected() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        for def in [
            cards::BITE,
            cards::CLAW_ATTACK,
            cards::FUR,
            cards::THICK_FUR,
            cards::WHISKERS,
        ] {
            let id = state.instances.alloc();
            state
                .player_mut(P0)
                .formation
                .push(CardInstance::new(id, def, None));
        }
        let hand_before = 1;
        let sixth = give(&mut state, P0, cards::SPIKY_BODY);

        let next = play_card(&catalog, state, P0, sixth, None);

        assert_eq!(next.player(P0).formation.len(), 5);
        assert_eq!(next.player(P0).hand.len(), hand_before);
        assert!(next
            .notifications
            .iter()
            .any(|n| n.kind == NoticeKind::Error));
    }

    #[test]
    fn test_size_gated_play() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let crush = give(&mut state, P0, cards::CRUSHING_WEIGHT);

        let next = play_card(&catalog, state, P0, crush, None);
        assert!(!next.player(P0).formation_has(cards::CRUSHING_WEIGHT));

        let mut state = next;
        state.player_mut(P0).size = SizeClass::Big;
        let crush = state.player(P0).hand[0].instance;
        let next = play_card(&catalog, state, P0, crush, None);
        assert!(next.player(P0).formation_has(cards::CRUSHING_WEIGHT));
    }

    #[test]
    fn test_upgrade_auto_targets_sole_base() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let base = state.instances.alloc();
        state
            .player_mut(P0)
            .formation
            .push(CardInstance::new(base, cards::BITE, None));
        let jaw = give(&mut state, P0, cards::STRONG_JAW);

        let next = play_card(&catalog, state, P0, jaw, None);

        let p = next.player(P0);
        assert!(p.formation_has(cards::STRONG_JAW));
        assert!(!p.formation_has(cards::BITE));
        assert_eq!(p.discard.len(), 1);
        assert_eq!(p.discard[0].def, cards::BITE);
        assert_eq!(p.stamina, 1);
    }

    #[test]
    fn test_upgrade_without_base_rejected() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let jaw = give(&mut state, P0, cards::STRONG_JAW);

        let next = play_card(&catalog, state, P0, jaw, None);

        assert!(next.player(P0).formation.is_empty());
        assert_eq!(next.player(P0).hand.len(), 1);
    }

    #[test]
    fn test_strong_build_entry_bonus() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let build = give(&mut state, P0, cards::STRONG_BUILD);

        let next = play_card(&catalog, state, P0, build, None);

        assert_eq!(next.player(P0).hp, 17);
        assert_eq!(next.player(P0).max_hp, 17);
    }

    #[test]
    fn test_evolve_swaps_two_ways() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let in_play = state.instances.alloc();
        state
            .player_mut(P0)
            .formation
            .push(CardInstance::new(in_play, cards::BITE, None));
        let evolve = give(&mut state, P0, cards::EVOLVE);
        let replacement = give(&mut state, P0, cards::CLAW_ATTACK);

        let next = play_evolve(&catalog, state, P0, evolve, in_play, replacement);

        let p = next.player(P0);
        assert!(p.formation_has(cards::CLAW_ATTACK));
        assert!(p.hand_has(cards::BITE));
        assert!(p.discard.iter().any(|c| c.def == cards::EVOLVE));
        assert_eq!(p.stamina, 1);
    }

    #[test]
    fn test_evolve_rejects_size_target() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let size = state.instances.alloc();
        state
            .player_mut(P0)
            .formation
            .push(CardInstance::new(size, cards::MEDIUM_SIZE, None));
        let evolve = give(&mut state, P0, cards::EVOLVE);
        let replacement = give(&mut state, P0, cards::CLAW_ATTACK);

        let next = play_evolve(&catalog, state, P0, evolve, size, replacement);

        assert!(next.player(P0).formation_has(cards::MEDIUM_SIZE));
        assert_eq!(next.player(P0).hand.len(), 2);
        assert_eq!(next.player(P0).stamina, 3);
    }

    #[test]
    fn test_evolve_reparents_upgrade_replacement() {
        let (catalog, mut state) = state_with(CreatureKind::Mammal);
        let bite = state.instances.alloc();
        let fur = state.instances.alloc();
        state
            .player_mut(P0)
            .formation
            .push(CardInstance::new(bite, cards::BITE, None));
        state
            .player_mut(P0)
            .formation
            .push(CardInstance::new(fur, cards::FUR, None));
        let evolve = give(&mut state, P0, cards::EVOLVE);
        let jaw = give(&mut state, P0, cards::STRONG_JAW);

        // Swap out Fur, but the Strong Jaw replacement lands on Bite.
        let next = play_evolve(&catalog, state, P0, evolve, fur, jaw);

        let p = next.player(P0);
        assert!(p.formation_has(cards::STRONG_JAW));
        assert!(!p.formation_has(cards::BITE));
        assert!(!p.formation_has(cards::FUR));
        assert!(p.hand_has(cards::FUR));
        assert!(p.discard.iter().any(|c| c.def == cards::BITE));
    }
}
