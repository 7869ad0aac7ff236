//! Status effects and their stacking/expiry rules.
//!
//! A player carries at most one status per (tag, source) pair: re-applying
//! refreshes the duration instead of stacking. Durationed statuses count
//! down once at the start of the owner's turn and drop at zero; statuses
//! without a duration persist until a card effect clears them.

use serde::{Deserialize, Serialize};

use crate::state::PlayerId;

/// The closed status vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusId {
    Poisoned,
    Stuck,
    Grappled,
    Confused,
    Hidden,
    Camouflaged,
    Flying,
    CannotAttack,
    CannotEvade,
    Accurate,
    DamageBuff,
    StaminaDebt,
    Evading,
    Chasing,
    Climbing,
    Leeched,
    Intimidating,
}

impl StatusId {
    /// Negative statuses are the ones Shed Skin style cleanses remove.
    #[must_use]
    pub fn is_negative(self) -> bool {
        matches!(
            self,
            StatusId::Poisoned
                | StatusId::Stuck
                | StatusId::Grappled
                | StatusId::Confused
                | StatusId::CannotAttack
                | StatusId::CannotEvade
                | StatusId::StaminaDebt
                | StatusId::Leeched
        )
    }
}

/// One active status on a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    /// Remaining turns. `None` = permanent until explicitly cleared.
    pub duration: Option<u8>,
    /// Attribution, e.g. the leech's owner heals through this link.
    pub source: Option<PlayerId>,
}

impl Status {
    #[must_use]
    pub fn new(id: StatusId) -> Self {
        Self {
            id,
            duration: None,
            source: None,
        }
    }

    #[must_use]
    pub fn lasting(id: StatusId, turns: u8) -> Self {
        Self {
            id,
            duration: Some(turns),
            source: None,
        }
    }

    #[must_use]
    pub fn from_player(mut self, source: PlayerId) -> Self {
        self.source = Some(source);
        self
    }
}

/// The set of statuses active on one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSet {
    entries: Vec<Status>,
}

impl StatusSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status, merging with an existing (tag, source) entry.
    ///
    /// Re-application overwrites the duration; a permanent re-application
    /// clears any countdown.
    pub fn apply(&mut self, status: Status) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|s| s.id == status.id && s.source == status.source)
        {
            existing.duration = status.duration;
        } else {
            self.entries.push(status);
        }
    }

    #[must_use]
    pub fn has(&self, id: StatusId) -> bool {
        self.entries.iter().any(|s| s.id == id)
    }

    /// Find a status by tag and source.
    #[must_use]
    pub fn get(&self, id: StatusId, source: Option<PlayerId>) -> Option<&Status> {
        self.entries.iter().find(|s| s.id == id && s.source == source)
    }

    /// First entry with the given tag, any source.
    #[must_use]
    pub fn any(&self, id: StatusId) -> Option<&Status> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// Remove every entry with the given tag. Returns true if any existed.
    pub fn clear(&mut self, id: StatusId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        before != self.entries.len()
    }

    /// Remove every entry matching a predicate.
    pub fn clear_if(&mut self, mut predicate: impl FnMut(&Status) -> bool) {
        self.entries.retain(|s| !predicate(s));
    }

    /// Remove all negative statuses.
    pub fn cleanse_negative(&mut self) {
        self.entries.retain(|s| !s.id.is_negative());
    }

    /// Count down all durationed statuses and drop the expired ones.
    ///
    /// Called once at the start of the owner's turn. Permanent statuses are
    /// unaffected.
    pub fn tick(&mut self) {
        for status in &mut self.entries {
            if let Some(d) = &mut status.duration {
                *d = d.saturating_sub(1);
            }
        }
        self.entries.retain(|s| s.duration != Some(0));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_by_tag_and_source() {
        let mut set = StatusSet::new();
        set.apply(Status::lasting(StatusId::Confused, 1));
        set.apply(Status::lasting(StatusId::Confused, 3));

        assert_eq!(set.len(), 1);
        assert_eq!(set.any(StatusId::Confused).unwrap().duration, Some(3));
    }

    #[test]
    fn test_apply_distinct_sources_coexist() {
        let mut set = StatusSet::new();
        set.apply(Status::new(StatusId::Leeched).from_player(PlayerId::new(0)));
        set.apply(Status::new(StatusId::Leeched).from_player(PlayerId::new(1)));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_permanent_reapplication_clears_countdown() {
        let mut set = StatusSet::new();
        set.apply(Status::lasting(StatusId::Hidden, 1));
        set.apply(Status::new(StatusId::Hidden));

        assert_eq!(set.any(StatusId::Hidden).unwrap().duration, None);
        set.tick();
        assert!(set.has(StatusId::Hidden));
    }

    #[test]
    fn test_tick_expires_durationed() {
        let mut set = StatusSet::new();
        set.apply(Status::lasting(StatusId::Flying, 2));
        set.apply(Status::new(StatusId::Poisoned));

        set.tick();
        assert!(set.has(StatusId::Flying));
        set.tick();
        assert!(!set.has(StatusId::Flying));
        assert!(set.has(StatusId::Poisoned)); // permanent survives
    }

    #[test]
    fn test_cleanse_negative_keeps_buffs() {
        let mut set = StatusSet::new();
        set.apply(Status::new(StatusId::Poisoned));
        set.apply(Status::lasting(StatusId::Stuck, 1));
        set.apply(Status::lasting(StatusId::DamageBuff, 1));
        set.apply(Status::lasting(StatusId::Flying, 2));

        set.cleanse_negative();

        assert!(!set.has(StatusId::Poisoned));
        assert!(!set.has(StatusId::Stuck));
        assert!(set.has(StatusId::DamageBuff));
        assert!(set.has(StatusId::Flying));
    }

    #[test]
    fn test_clear() {
        let mut set = StatusSet::new();
        set.apply(Status::new(StatusId::Grappled));

        assert!(set.clear(StatusId::Grappled));
        assert!(!set.clear(StatusId::Grappled));
        assert!(set.is_empty());
    }
}
