//! Hover picking with optional throttling.
//!
//! Hover picks run on every pointer move purely to choose the cursor; when
//! throttling is enabled they are rate-limited so the engine is not hit at
//! full pointer-event frequency. Both configurations exist: the throttled
//! path and the plain unthrottled one.

use std::time::Duration;

use planar_bridge::PickHit;

use crate::context::EventContext;
use crate::throttle::{Admit, ThrottleGate};

/// Hover-pick front-end for the select tool.
#[derive(Debug, Clone)]
pub struct HoverPicker {
    gate: Option<ThrottleGate>,
}

impl HoverPicker {
    /// Rate-limited hover picking (leading+trailing).
    pub fn throttled(interval: Duration) -> Self {
        Self {
            gate: Some(ThrottleGate::new(interval)),
        }
    }

    /// Pick on every pointer move.
    pub fn unthrottled() -> Self {
        Self { gate: None }
    }

    /// Run a hover pick for this event if the gate admits it.
    /// `None` = suppressed (keep the previous cursor); `Some(result)` = a
    /// fresh pick ran, `result` being the hit or a miss.
    pub fn pick(&mut self, ctx: &EventContext<'_>) -> Option<Option<PickHit>> {
        if let Some(gate) = self.gate.as_mut()
            && gate.admit(ctx.now) == Admit::Deferred
        {
            return None;
        }
        Some(ctx.hover_pick())
    }

    /// Forget throttle history (pointer re-entered, handler reset).
    pub fn reset(&mut self) {
        if let Some(gate) = self.gate.as_mut() {
            gate.reset();
        }
    }
}

impl Default for HoverPicker {
    fn default() -> Self {
        Self::unthrottled()
    }
}
