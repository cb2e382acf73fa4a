//! Structured event emission.
//!
//! The core reports what happened as plain data; narrative formatting,
//! display and log persistence belong to external collaborators. Events are
//! appended in the order they occur within a turn, so consumers observe a
//! deterministic sequence for identical inputs.

/// One structured occurrence inside the rules core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    // ========================================================================
    // Status effects
    // ========================================================================
    /// A status-effect instance was created on a target.
    StatusApplied {
        target: String,
        effect: String,
        /// Turns remaining at application; `-1` for indefinite effects.
        duration: i32,
    },
    /// An incoming application displaced an existing instance of the same
    /// effect identity.
    StatusReplaced { target: String, effect: String },
    /// A finite instance ran out of turns and was removed.
    StatusExpired { target: String, effect: String },
    /// Application failed the capability gate; nothing was mutated.
    StatusRejected { target: String, effect: String },

    // ========================================================================
    // Health
    // ========================================================================
    DamageTaken {
        target: String,
        amount: i32,
        destroyed: bool,
    },
    Healed { target: String, amount: i32 },

    // ========================================================================
    // Destruction
    // ========================================================================
    ComponentDestroyed { component: String },
    VehicleDestroyed { vehicle: String },

    // ========================================================================
    // Power
    // ========================================================================
    PowerDrawn {
        component: String,
        amount: i32,
        remaining: i32,
    },
    PowerDrawRejected { component: String, amount: i32 },
    /// Power-core destruction force-zeroed the energy pool.
    EnergyZeroed { component: String },
}

/// Ordered collector the turn pipeline appends to.
///
/// The external logging collaborator drains it after each turn; the core
/// itself never reads events back.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Removes and returns all collected events in emission order.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
