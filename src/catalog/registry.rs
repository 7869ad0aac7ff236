//! Catalog: card definition lookup.

use rustc_hash::FxHashMap;

use super::definition::{CardDef, CardId};
use super::Category;

/// Registry of card definitions.
///
/// The resolver treats the catalog as read-only configuration; games may
/// register an arbitrary card set, or start from [`Catalog::builtin`].
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: FxHashMap<CardId, CardDef>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDef) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDef> {
        self.cards.get(&id)
    }

    /// Get a card definition, panicking if absent.
    ///
    /// Use for ids that came from instances this catalog produced.
    #[must_use]
    pub fn def(&self, id: CardId) -> &CardDef {
        self.cards.get(&id).expect("Card not found in catalog")
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDef> {
        self.cards.values()
    }

    /// Find cards by category.
    pub fn find_by_category(&self, category: Category) -> impl Iterator<Item = &CardDef> {
        self.cards.values().filter(move |c| c.category == category)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDef>
    where
        F: Fn(&CardDef) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut catalog = Catalog::new();
        catalog.register(CardDef::new(CardId::new(1), "Test", Category::Physical));

        assert!(catalog.get(CardId::new(1)).is_some());
        assert!(catalog.get(CardId::new(99)).is_none());
        assert_eq!(catalog.def(CardId::new(1)).name, "Test");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = Catalog::new();
        catalog.register(CardDef::new(CardId::new(1), "A", Category::Physical));
        catalog.register(CardDef::new(CardId::new(1), "B", Category::Physical));
    }

    #[test]
    fn test_find_by_category() {
        let mut catalog = Catalog::new();
        catalog.register(CardDef::new(CardId::new(1), "Bite", Category::Physical));
        catalog.register(CardDef::new(CardId::new(2), "Roar", Category::Ability));
        catalog.register(CardDef::new(CardId::new(3), "Claw", Category::Physical));

        assert_eq!(catalog.find_by_category(Category::Physical).count(), 2);
        assert_eq!(catalog.find_by_category(Category::Ability).count(), 1);
    }

    #[test]
    fn test_find_with_predicate() {
        let mut catalog = Catalog::new();
        catalog.register(CardDef::new(CardId::new(1), "Cheap", Category::Ability));
        catalog.register(CardDef::new(CardId::new(2), "Dear", Category::Ability).cost(2));

        let cheap: Vec<_> = catalog.find(|c| c.cost == 0).collect();
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].name, "Cheap");
    }
}
