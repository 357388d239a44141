//! Lock-free render statistics shared with control threads.
//!
//! The audio thread only stores atomics here. Logging happens in
//! [`PanMonitor::report`], which the control thread calls at its own pace and
//! which emits at most one warning per `report_interval` rendered blocks.

use strata_core::{AtomicCounter, AtomicFloat};

/// Counters and last-block values published by a [`LayerPanner`](crate::LayerPanner).
#[derive(Debug)]
pub struct PanMonitor {
    blocks: AtomicCounter,
    blends: AtomicCounter,
    render_errors: AtomicCounter,
    elevation: AtomicFloat,
    gain_upper: AtomicFloat,
    gain_lower: AtomicFloat,
    reported_errors: AtomicCounter,
    last_report_block: AtomicCounter,
    report_interval: u64,
}

/// Point-in-time copy of a [`PanMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonitorSnapshot {
    /// Blocks rendered successfully
    pub blocks: u64,
    /// Blocks split across two rings
    pub blends: u64,
    /// Blocks rejected (capacity or not compiled)
    pub render_errors: u64,
    /// Source elevation of the last block, degrees
    pub elevation: f32,
    /// Gain sent to the upper (or only) ring in the last block
    pub gain_upper: f32,
    /// Gain sent to the lower ring in the last block
    pub gain_lower: f32,
}

impl PanMonitor {
    pub fn new(report_interval: u32) -> Self {
        Self {
            blocks: AtomicCounter::new(),
            blends: AtomicCounter::new(),
            render_errors: AtomicCounter::new(),
            elevation: AtomicFloat::new(0.0),
            gain_upper: AtomicFloat::new(0.0),
            gain_lower: AtomicFloat::new(0.0),
            reported_errors: AtomicCounter::new(),
            last_report_block: AtomicCounter::new(),
            report_interval: u64::from(report_interval.max(1)),
        }
    }

    #[inline]
    pub(crate) fn record_block(&self, elevation: f32, gain_upper: f32, gain_lower: f32) {
        self.blocks.increment();
        if gain_upper > 0.0 && gain_lower > 0.0 {
            self.blends.increment();
        }
        self.elevation.set(elevation);
        self.gain_upper.set(gain_upper);
        self.gain_lower.set(gain_lower);
    }

    #[inline]
    pub(crate) fn record_error(&self) {
        self.render_errors.increment();
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            blocks: self.blocks.get(),
            blends: self.blends.get(),
            render_errors: self.render_errors.get(),
            elevation: self.elevation.get(),
            gain_upper: self.gain_upper.get(),
            gain_lower: self.gain_lower.get(),
        }
    }

    /// Log new render errors, rate limited to one warning per report interval.
    ///
    /// Returns the snapshot that was reported, or `None` when there was
    /// nothing new or the interval has not elapsed. Call from a control thread.
    pub fn report(&self) -> Option<MonitorSnapshot> {
        let snapshot = self.snapshot();
        let seen = snapshot.blocks + snapshot.render_errors;
        let since_last = seen.saturating_sub(self.last_report_block.get());
        let new_errors = snapshot
            .render_errors
            .saturating_sub(self.reported_errors.get());

        if new_errors == 0 || since_last < self.report_interval {
            return None;
        }

        self.reported_errors.swap(snapshot.render_errors);
        self.last_report_block.swap(seen);
        tracing::warn!(
            new_errors,
            total_errors = snapshot.render_errors,
            blocks = snapshot.blocks,
            "layer panner rejected render blocks"
        );
        Some(snapshot)
    }
}

impl Default for PanMonitor {
    fn default() -> Self {
        Self::new(1000)
    }
}
