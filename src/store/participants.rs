//! Participant store
//!
//! Participants form a ring: the element after the last one is the first
//! one again. The ring is a `Vec` plus the index of the element that
//! currently counts as first; callers only see ordered iteration starting
//! there.

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{NewParticipant, Participant, ParticipantId, ParticipantUpdate};

/// Ordered, cyclic collection of participants
#[derive(Debug, Clone)]
pub struct ParticipantStore {
    ring: Vec<Participant>,
    /// Index in `ring` of the first element; 0 when empty
    head: usize,
    /// Next id to assign; ids are never reused
    next_id: u32,
}

impl ParticipantStore {
    pub fn new() -> Self {
        Self::with_next_id(1)
    }

    pub fn with_next_id(next_id: u32) -> Self {
        Self {
            ring: Vec::new(),
            head: 0,
            next_id: next_id.max(1),
        }
    }

    pub fn next_id(&self) -> ParticipantId {
        ParticipantId(self.next_id)
    }

    /// Add a participant after the current last one
    pub fn add(&mut self, draft: NewParticipant) -> RegistryResult<ParticipantId> {
        let id = ParticipantId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::IdsExhausted("participant"))?;

        self.link_last(Participant::new(id, draft));
        debug!(participant_id = %id, "participant added");
        Ok(id)
    }

    /// Put back a persisted participant as-is
    ///
    /// Returns the participant unchanged when its id is already taken or is
    /// `u32::MAX`.
    pub fn restore(&mut self, participant: Participant) -> Result<(), Participant> {
        let Some(after) = participant.id.0.checked_add(1) else {
            return Err(participant);
        };
        if self.contains(participant.id) {
            return Err(participant);
        }
        self.next_id = self.next_id.max(after);
        self.link_last(participant);
        Ok(())
    }

    /// The last element sits just before `head`, so inserting at `head` and
    /// moving `head` one step keeps the cycle intact
    fn link_last(&mut self, participant: Participant) {
        if self.ring.is_empty() {
            self.ring.push(participant);
            self.head = 0;
        } else {
            self.ring.insert(self.head, participant);
            self.head += 1;
        }
    }

    fn position(&self, id: ParticipantId) -> Option<usize> {
        self.ring.iter().position(|p| p.id == id)
    }

    pub fn find(&self, id: ParticipantId) -> Option<&Participant> {
        self.ring.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.position(id).is_some()
    }

    /// Remove a participant; if it was first, its successor becomes first
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let pos = self.position(id)?;
        let removed = self.ring.remove(pos);

        if self.ring.is_empty() {
            self.head = 0;
        } else if pos < self.head {
            self.head -= 1;
        } else if pos == self.head && pos == self.ring.len() {
            // First element was stored last; its successor wraps to index 0
            self.head = 0;
        }

        debug!(participant_id = %id, remaining = self.ring.len(), "participant removed");
        Some(removed)
    }

    pub fn edit(&mut self, id: ParticipantId, update: ParticipantUpdate) -> Option<&Participant> {
        let participant = self.ring.iter_mut().find(|p| p.id == id)?;
        participant.apply(update);
        debug!(participant_id = %id, "participant edited");
        Some(&*participant)
    }

    /// Visit every participant once, starting at the first
    pub fn iter(&self) -> impl Iterator<Item = &Participant> + '_ {
        let (wrapped, from_head) = self.ring.split_at(self.head);
        from_head.iter().chain(wrapped.iter())
    }

    /// Participants in order, starting at the first
    pub fn list(&self) -> Vec<&Participant> {
        self.iter().collect()
    }

    pub fn first(&self) -> Option<&Participant> {
        self.ring.get(self.head)
    }

    pub fn count(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

impl Default for ParticipantStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> ParticipantStore {
        let mut store = ParticipantStore::new();
        for name in names {
            store.add(NewParticipant::new(*name, format!("{}@example.com", name), "555")).unwrap();
        }
        store
    }

    fn names(store: &ParticipantStore) -> Vec<String> {
        store.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let store = store_with(&["Ana", "Bruno", "Carla"]);
        assert_eq!(names(&store), vec!["Ana", "Bruno", "Carla"]);
        assert_eq!(store.count(), 3);
        assert_eq!(store.first().unwrap().name, "Ana");
    }

    #[test]
    fn test_remove_sole_element_empties_store() {
        let mut store = store_with(&["Ana"]);
        assert!(store.remove(ParticipantId(1)).is_some());
        assert!(store.is_empty());
        assert!(store.first().is_none());
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn test_remove_first_promotes_successor() {
        let mut store = store_with(&["Ana", "Bruno", "Carla"]);
        store.remove(ParticipantId(1));
        assert_eq!(store.first().unwrap().name, "Bruno");
        assert_eq!(names(&store), vec!["Bruno", "Carla"]);
    }

    #[test]
    fn test_add_after_head_moved() {
        let mut store = store_with(&["Ana", "Bruno", "Carla"]);
        store.remove(ParticipantId(1));
        store.add(NewParticipant::new("Davi", "davi@example.com", "555")).unwrap();
        store.add(NewParticipant::new("Eva", "eva@example.com", "555")).unwrap();

        assert_eq!(names(&store), vec!["Bruno", "Carla", "Davi", "Eva"]);

        // Removing the first again, now stored after the newer elements
        store.remove(ParticipantId(2));
        assert_eq!(names(&store), vec!["Carla", "Davi", "Eva"]);
        store.remove(ParticipantId(3));
        assert_eq!(names(&store), vec!["Davi", "Eva"]);
        assert_eq!(store.first().unwrap().name, "Davi");
    }

    #[test]
    fn test_remove_middle_and_last() {
        let mut store = store_with(&["Ana", "Bruno", "Carla", "Davi"]);
        store.remove(ParticipantId(2));
        store.remove(ParticipantId(4));
        assert_eq!(names(&store), vec!["Ana", "Carla"]);
        assert!(store.remove(ParticipantId(4)).is_none());
    }

    #[test]
    fn test_iteration_visits_each_once_for_every_head() {
        let mut store = store_with(&["A", "B", "C", "D", "E"]);
        for id in 1..=4 {
            store.remove(ParticipantId(id));
            store.add(NewParticipant::new(format!("N{}", id), "n@example.com", "1")).unwrap();
            assert_eq!(store.iter().count(), 5);
            let mut ids: Vec<u32> = store.iter().map(|p| p.id.0).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 5);
        }
        assert_eq!(names(&store), vec!["E", "N1", "N2", "N3", "N4"]);
    }

    #[test]
    fn test_edit_and_find() {
        let mut store = store_with(&["Ana"]);
        store.edit(
            ParticipantId(1),
            ParticipantUpdate {
                phone: Some("999".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(store.find(ParticipantId(1)).unwrap().phone, "999");
        assert!(store.edit(ParticipantId(2), ParticipantUpdate::default()).is_none());
    }

    #[test]
    fn test_restore_advances_counter() {
        let mut store = ParticipantStore::new();
        let p = Participant::new(ParticipantId(5), NewParticipant::new("Ana", "a@b.c", "1"));
        store.restore(p.clone()).unwrap();
        assert!(store.restore(p).is_err());
        assert_eq!(store.add(NewParticipant::default()).unwrap(), ParticipantId(6));
    }

    #[test]
    fn test_id_counter_stops_at_max() {
        let mut store = ParticipantStore::new();
        let top = Participant::new(ParticipantId(u32::MAX), NewParticipant::default());
        assert!(store.restore(top).is_err());

        let last = Participant::new(ParticipantId(u32::MAX - 1), NewParticipant::default());
        store.restore(last).unwrap();
        assert!(matches!(
            store.add(NewParticipant::default()),
            Err(RegistryError::IdsExhausted("participant"))
        ));
        assert_eq!(store.count(), 1);
    }
}
