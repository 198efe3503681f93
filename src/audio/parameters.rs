// Atomic parameters - lock-free sharing between the UI and audio threads

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// An `f32` shared across threads, stored as raw bits in an `AtomicU32`.
/// Used for the master volume: the slider writes, the callback reads.
#[derive(Clone)]
pub struct AtomicF32 {
    bits: Arc<AtomicU32>,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(value.to_bits())),
        }
    }

    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}
