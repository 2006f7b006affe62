// Race predictions: slot assignments, official results, and scoring.

pub mod score;
pub mod slot;

pub use score::{score, ScoreBreakdown, SlotScore};
pub use slot::Slot;

/// A user's race forecast: at most one driver per slot, at most one slot
/// per driver.
///
/// Draft state lives with the caller; every method here returns a new value
/// rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prediction {
    slots: [Option<String>; 6],
}

impl Prediction {
    pub fn new() -> Self {
        Prediction::default()
    }

    /// The driver predicted for a slot, if any.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    /// The slot a driver currently occupies, if any.
    pub fn slot_of(&self, driver_id: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.get(*slot) == Some(driver_id))
    }

    /// Assign a driver to a slot.
    ///
    /// A driver can hold only one slot, so any slot the driver previously
    /// occupied is cleared first. Whatever driver held the target slot is
    /// displaced without a new home, matching the selection flow where a
    /// pick replaces the current occupant.
    pub fn assign(&self, slot: Slot, driver_id: &str) -> Prediction {
        let mut next = self.clone();
        for existing in &mut next.slots {
            if existing.as_deref() == Some(driver_id) {
                *existing = None;
            }
        }
        next.slots[slot.index()] = Some(driver_id.to_string());
        next
    }

    /// Clear a slot.
    pub fn clear(&self, slot: Slot) -> Prediction {
        let mut next = self.clone();
        next.slots[slot.index()] = None;
        next
    }

    /// Whether every slot has a driver assigned.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// The official outcome of one race, published by the results provider.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceResult {
    race_id: String,
    slots: [Option<String>; 6],
}

impl RaceResult {
    pub fn new(race_id: impl Into<String>) -> Self {
        RaceResult {
            race_id: race_id.into(),
            slots: Default::default(),
        }
    }

    /// Builder-style slot fill, used when assembling a result from the
    /// provider's data.
    pub fn with(mut self, slot: Slot, driver_id: impl Into<String>) -> Self {
        self.slots[slot.index()] = Some(driver_id.into());
        self
    }

    pub fn race_id(&self) -> &str {
        &self.race_id
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }
}
