//! Lock-free primitives shared between the audio thread and control threads.

use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache-line aligned atomic f32.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFloat {
    value: AtomicF32,
}

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }
}

impl Clone for AtomicFloat {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFloat {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Cache-line aligned event counter.
///
/// Incremented from the audio thread with relaxed ordering; read from control
/// threads for reporting.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Replace the stored value, returning the previous one.
    #[inline]
    pub fn swap(&self, value: u64) -> u64 {
        self.value.swap(value, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_float() {
        let val = AtomicFloat::new(1.0);
        assert_eq!(val.get(), 1.0);
        val.set(-2.5);
        assert_eq!(val.get(), -2.5);
    }

    #[test]
    fn test_atomic_counter() {
        let counter = AtomicCounter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2);
        assert_eq!(counter.swap(10), 2);
        assert_eq!(counter.get(), 10);
    }
}
