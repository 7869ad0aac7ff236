//! Shared fixtures: hand-built duel states with known cards and stats.
#![allow(dead_code)]

use wildclash::{
    CardInstance, Catalog, CreatureKind, GameState, Habitat, InstanceId, Phase, PlayerId,
    PlayerState, Players, RngSeq, SizeClass, StatusSet,
};

pub const P0: PlayerId = PlayerId(0);
pub const P1: PlayerId = PlayerId(1);

pub fn seq(values: &[f64]) -> RngSeq {
    values.iter().copied().collect()
}

fn duelist(id: PlayerId, kind: CreatureKind, size: SizeClass) -> PlayerState {
    PlayerState {
        id,
        name: format!("Duelist {}", id.0),
        hp: size.base_hp(),
        max_hp: size.base_hp(),
        stamina: size.base_stamina(),
        max_stamina: size.base_stamina(),
        kind,
        size,
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

/// A bare two-player state in the action phase, size cards already fielded.
pub fn duel(
    habitat: Habitat,
    kinds: [CreatureKind; 2],
    sizes: [SizeClass; 2],
) -> (Catalog, GameState) {
    let catalog = Catalog::builtin();
    let players = Players::new(|id| duelist(id, kinds[id.index()], sizes[id.index()]));
    let mut state = GameState::new(habitat, players, Default::default());
    for id in [P0, P1] {
        let size_card = state.player(id).size.size_card();
        let instance = state.instances.alloc();
        state
            .player_mut(id)
            .formation
            .push(CardInstance::new(instance, size_card, None));
    }
    state.phase = Phase::Action;
    (catalog, state)
}

/// Put a card into a player's hand.
pub fn give_hand(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    def: wildclash::CardId,
) -> InstanceId {
    let instance = state.instances.alloc();
    let charges = catalog.def(def).max_charges;
    state
        .player_mut(player)
        .hand
        .push(CardInstance::new(instance, def, charges));
    instance
}

/// Put a card straight into a player's formation.
pub fn field(
    catalog: &Catalog,
    state: &mut GameState,
    player: PlayerId,
    def: wildclash::CardId,
) -> InstanceId {
    let instance = state.instances.alloc();
    let charges = catalog.def(def).max_charges;
    state
        .player_mut(player)
        .formation
        .push(CardInstance::new(instance, def, charges));
    instance
}
