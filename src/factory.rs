//! Match setup: player creation and deck generation.
//!
//! `create_player` rolls a creature kind and size, generates a deck filtered
//! to that kind, auto-equips the size card, and deals the opening hand from
//! type-partitioned queues. `new_match` assembles the full pre-game state;
//! the resolver's `InitGame` transition applies the one-time start bonuses.

use crate::catalog::{cards, CardId, Catalog, Category, CreatureKind, Habitat, Passive, SizeClass};
use crate::rng::GameRng;
use crate::state::{
    CardInstance, GameState, InstanceIds, Phase, PlayerId, PlayerState, Players,
};
use crate::status::StatusSet;

/// Physical cards rolled into a generated deck.
const DECK_PHYSICAL_PICKS: usize = 12;
/// Ability/Special cards rolled into a generated deck.
const DECK_ABILITY_PICKS: usize = 6;
/// Opening hand: Physical cards.
const HAND_PHYSICAL: usize = 3;
/// Opening hand: Ability/Special cards.
const HAND_ABILITY: usize = 3;

fn instantiate(ids: &mut InstanceIds, catalog: &Catalog, def: CardId) -> CardInstance {
    CardInstance::new(ids.alloc(), def, catalog.def(def).max_charges)
}

/// Build a starting player with a randomized creature kind, size, and deck.
///
/// Guarantees no duplicate definition ids across hand and formation at deal
/// time; HP/stamina baselines come solely from the size class.
pub fn create_player(
    catalog: &Catalog,
    id: PlayerId,
    name: &str,
    rng: &mut GameRng,
    ids: &mut InstanceIds,
) -> PlayerState {
    let kind = *rng.choose(&CreatureKind::ALL).expect("kinds are non-empty");
    let size = *rng.choose(&SizeClass::ALL).expect("sizes are non-empty");

    let physical_pool: Vec<CardId> = catalog
        .find(|d| d.category == Category::Physical && d.kinds.allows(kind))
        .map(|d| d.id)
        .collect();
    let ability_pool: Vec<CardId> = catalog
        .find(|d| {
            (d.category == Category::Ability || d.category == Category::Special)
                && d.kinds.allows(kind)
        })
        .map(|d| d.id)
        .collect();

    let mut physicals: Vec<CardInstance> = (0..DECK_PHYSICAL_PICKS)
        .filter_map(|_| rng.choose(&physical_pool).copied())
        .map(|def| instantiate(ids, catalog, def))
        .collect();
    let mut abilities: Vec<CardInstance> = (0..DECK_ABILITY_PICKS)
        .filter_map(|_| rng.choose(&ability_pool).copied())
        .map(|def| instantiate(ids, catalog, def))
        .collect();
    abilities.push(instantiate(ids, catalog, cards::EVOLVE));

    let formation = vec![instantiate(ids, catalog, size.size_card())];

    // Deal the opening hand, skipping definitions already held.
    let mut hand: Vec<CardInstance> = Vec::with_capacity(HAND_PHYSICAL + HAND_ABILITY);
    let mut deal = |queue: &mut Vec<CardInstance>, count: usize, hand: &mut Vec<CardInstance>| {
        let mut taken = 0;
        let mut i = 0;
        while i < queue.len() && taken < count {
            let def = queue[i].def;
            if hand.iter().any(|c| c.def == def) || formation.iter().any(|c| c.def == def) {
                i += 1;
            } else {
                hand.push(queue.remove(i));
                taken += 1;
            }
        }
    };
    deal(&mut physicals, HAND_PHYSICAL, &mut hand);
    deal(&mut abilities, HAND_ABILITY, &mut hand);

    let mut deck: Vec<CardInstance> = physicals;
    deck.append(&mut abilities);
    rng.shuffle(&mut deck);

    PlayerState {
        id,
        name: name.to_string(),
        hp: size.base_hp(),
        max_hp: size.base_hp(),
        stamina: size.base_stamina(),
        max_stamina: size.base_stamina(),
        kind,
        size,
        hand,
        deck,
        discard: Vec::new(),
        formation,
        statuses: StatusSet::new(),
        cards_played_this_turn: 0,
        has_acted_this_turn: false,
        guaranteed_next_flip: false,
        used_habitat_hide: false,
    }
}

/// Assemble a complete pre-game state for two named players.
///
/// The result is the `InitGame` payload; resolving that action applies the
/// start bonuses and opens play.
#[must_use]
pub fn new_match(catalog: &Catalog, habitat: Habitat, names: [&str; 2], seed: u64) -> GameState {
    let mut rng = GameRng::new(seed);
    let mut ids = InstanceIds::new();

    let p0 = create_player(catalog, PlayerId::new(0), names[0], &mut rng, &mut ids);
    let p1 = create_player(catalog, PlayerId::new(1), names[1], &mut rng, &mut ids);

    let players = Players::new(|id| if id.index() == 0 { p0.clone() } else { p1.clone() });
    GameState::new(habitat, players, ids)
}

/// One-time start-of-match bonuses: formation HP passives plus habitat
/// adaptation for desert and water natives.
pub fn apply_start_bonuses(catalog: &Catalog, state: &mut GameState) {
    let habitat = state.habitat;
    for (_, player) in state.players.iter_mut() {
        let formation_hp: i32 = player
            .passives(catalog)
            .filter_map(|p| match p {
                Passive::BonusHp(n) => Some(*n),
                _ => None,
            })
            .sum();
        let habitat_hp = match (habitat, player.kind) {
            (Habitat::Desert, CreatureKind::Reptile | CreatureKind::Mammal) => 2,
            (Habitat::Water, CreatureKind::Amphibian) => 1,
            _ => 0,
        };

        player.max_hp += formation_hp + habitat_hp;
        player.hp += formation_hp + habitat_hp;
    }
    state.phase = Phase::Action;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Catalog, GameRng, InstanceIds) {
        (Catalog::builtin(), GameRng::new(42), InstanceIds::new())
    }

    #[test]
    fn test_player_baselines_follow_size() {
        let (catalog, mut rng, mut ids) = setup();
        for _ in 0..20 {
            let p = create_player(&catalog, PlayerId::new(0), "Tester", &mut rng, &mut ids);
            assert_eq!(p.hp, p.size.base_hp());
            assert_eq!(p.stamina, p.size.base_stamina());
            assert_eq!(p.hp, p.max_hp);
            assert_eq!(p.stamina, p.max_stamina);
        }
    }

    #[test]
    fn test_size_card_auto_equipped() {
        let (catalog, mut rng, mut ids) = setup();
        let p = create_player(&catalog, PlayerId::new(0), "Tester", &mut rng, &mut ids);

        assert_eq!(p.formation.len(), 1);
        assert_eq!(p.formation[0].def, p.size.size_card());
    }

    #[test]
    fn test_deck_filtered_to_kind() {
        let (catalog, mut rng, mut ids) = setup();
        for _ in 0..10 {
            let p = create_player(&catalog, PlayerId::new(0), "Tester", &mut rng, &mut ids);
            for card in p.hand.iter().chain(p.deck.iter()) {
                assert!(
                    catalog.def(card.def).kinds.allows(p.kind),
                    "{} incompatible with {:?}",
                    catalog.def(card.def).name,
                    p.kind
                );
            }
        }
    }

    #[test]
    fn test_hand_has_no_duplicate_defs() {
        let (catalog, mut rng, mut ids) = setup();
        for _ in 0..20 {
            let p = create_player(&catalog, PlayerId::new(0), "Tester", &mut rng, &mut ids);
            let mut defs: Vec<_> = p
                .hand
                .iter()
                .chain(p.formation.iter())
                .map(|c| c.def)
                .collect();
            defs.sort_by_key(|d| d.raw());
            defs.dedup();
            assert_eq!(defs.len(), p.hand.len() + p.formation.len());
        }
    }

    #[test]
    fn test_evolve_in_every_deck() {
        let (catalog, mut rng, mut ids) = setup();
        let p = create_player(&catalog, PlayerId::new(0), "Tester", &mut rng, &mut ids);
        let has_evolve = p
            .hand
            .iter()
            .chain(p.deck.iter())
            .any(|c| c.def == cards::EVOLVE);
        assert!(has_evolve);
    }

    #[test]
    fn test_instance_ids_unique_across_match() {
        let catalog = Catalog::builtin();
        let state = new_match(&catalog, Habitat::Forest, ["A", "B"], 7);

        let mut ids: Vec<_> = state.all_instances().map(|c| c.instance).collect();
        let total = ids.len();
        ids.sort_by_key(|i| i.0);
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_match_generation_deterministic() {
        let catalog = Catalog::builtin();
        let a = new_match(&catalog, Habitat::Water, ["A", "B"], 99);
        let b = new_match(&catalog, Habitat::Water, ["A", "B"], 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_desert_bonus() {
        let catalog = Catalog::builtin();
        let mut state = new_match(&catalog, Habitat::Desert, ["A", "B"], 5);
        let before: Vec<i32> = state.players.iter().map(|(_, p)| p.max_hp).collect();

        apply_start_bonuses(&catalog, &mut state);

        for (i, (_, p)) in state.players.iter().enumerate() {
            let expected = match p.kind {
                CreatureKind::Reptile | CreatureKind::Mammal => before[i] + 2,
                _ => before[i],
            };
            assert_eq!(p.max_hp, expected);
            assert_eq!(p.hp, expected);
        }
        assert_eq!(state.phase, Phase::Action);
    }
}
