//! Single-draw weighted selection.
//!
//! A table is an ordered list of entries, each gated on a minimum wave and an
//! exclusive upper bound on the roll. One uniform draw is compared against
//! each eligible entry in order; the first bound it falls under wins. Entries
//! share the draw, so an earlier entry's range is carved out of every later
//! entry's range.

use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug)]
pub struct RollEntry<T> {
    pub min_wave: u32,
    pub below: f64,
    pub variant: T,
}

#[derive(Clone, Copy, Debug)]
pub struct RollTable<T: 'static> {
    pub entries: &'static [RollEntry<T>],
    pub fallback: T,
}

impl<T: Copy> RollTable<T> {
    pub fn pick(&self, roll: f64, wave: u32) -> T {
        self.entries
            .iter()
            .filter(|entry| wave >= entry.min_wave)
            .find(|entry| roll < entry.below)
            .map(|entry| entry.variant)
            .unwrap_or(self.fallback)
    }

    pub fn roll(&self, wave: u32, rng: &mut impl RandomSource) -> T {
        self.pick(rng.next_f64(), wave)
    }
}
