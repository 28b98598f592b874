//! Slot Arena for Sample Storage.
//!
//! Owns every sample of a [`SampleSet`](super::SampleSet). Views refer to
//! samples through [`SampleId`] handles instead of references. Freed slots are
//! reused; each reuse bumps the slot generation so that a handle to a removed
//! sample never resolves to its successor.

use std::fmt;

/// Stable handle to a sample stored in a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId {
    index: u32,
    generation: u32,
}

impl SampleId {
    /// Slot index of this handle.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.index)?;
        if self.generation > 0 {
            write!(f, "#{}", self.generation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Slot<S> {
    generation: u32,
    value: Option<S>,
}

/// Generational slot arena.
#[derive(Debug, Clone)]
pub struct SampleArena<S> {
    slots: Vec<Slot<S>>,
    free: Vec<u32>,
    live: usize,
}

impl<S> Default for SampleArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SampleArena<S> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store a value and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots would be needed.
    pub fn insert(&mut self, value: S) -> SampleId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return SampleId {
                index,
                generation: slot.generation,
            };
        }

        let Ok(index) = u32::try_from(self.slots.len()) else {
            panic!("sample arena exhausted");
        };
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        SampleId {
            index,
            generation: 0,
        }
    }

    /// Release a slot, returning its value. Stale handles yield `None`.
    pub fn remove(&mut self, id: SampleId) -> Option<S> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(value)
    }

    /// Resolve a handle.
    pub fn get(&self, id: SampleId) -> Option<&S> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Resolve a handle mutably.
    pub fn get_mut(&mut self, id: SampleId) -> Option<&mut S> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Check if a handle refers to a live value.
    pub fn contains(&self, id: SampleId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if no value is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Release every slot. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.live = 0;
    }
}
