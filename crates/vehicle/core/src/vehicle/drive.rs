//! Drive component state: speed integration against friction and drag.
//!
//! The numeric formulas live in [`crate::physics`]; this type owns the
//! stored speed and feeds modifier-adjusted inputs into them.

use crate::config::SimConfig;
use crate::entity::Entity;
use crate::physics::{friction_loss, speed_power_cost};
use crate::stats::{gather_rounded, Attribute};

/// Mutable locomotion state of a drive component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveState {
    current_speed: i32,
    base_friction: i32,
    base_drag_percent: i32,
    /// Power the drive draws per turn at speed zero.
    base_power_cost: i32,
}

impl DriveState {
    pub fn new(base_friction: i32, base_drag_percent: i32, base_power_cost: i32) -> Self {
        Self {
            current_speed: 0,
            base_friction,
            base_drag_percent,
            base_power_cost,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.current_speed = speed.max(0);
        self
    }

    pub fn current_speed(&self) -> i32 {
        self.current_speed
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.current_speed = speed.max(0);
    }

    fn effective_friction(&self, entity: &Entity) -> i32 {
        gather_rounded(Some(entity), Attribute::Friction, self.base_friction as f64)
    }

    fn effective_drag(&self, entity: &Entity) -> i32 {
        gather_rounded(Some(entity), Attribute::Drag, self.base_drag_percent as f64)
    }

    /// Bleed speed off to friction for this turn. Returns the speed lost.
    ///
    /// Runs before [`Self::power_cost`]: the cost is computed from the
    /// already-adjusted speed.
    pub fn apply_friction(&mut self, entity: &Entity, config: &SimConfig) -> i32 {
        let loss = friction_loss(
            self.current_speed,
            self.effective_friction(entity),
            self.effective_drag(entity),
            config.friction_scale,
        );
        let lost = loss.clamp(0, self.current_speed);
        self.current_speed -= lost;
        lost
    }

    /// Power required to hold the current (post-friction) speed this turn.
    pub fn power_cost(&self, entity: &Entity, config: &SimConfig) -> i32 {
        let base_power =
            gather_rounded(Some(entity), Attribute::PowerDraw, self.base_power_cost as f64);
        speed_power_cost(
            self.current_speed,
            base_power,
            self.effective_friction(entity),
            self.effective_drag(entity),
            config.friction_scale,
        )
    }

    /// Coasting decay when the drive failed to draw its power cost.
    /// Returns the speed lost.
    pub fn unpowered_decay(&mut self, config: &SimConfig) -> i32 {
        let lost = (self.current_speed * config.unpowered_decay_percent / 100)
            .clamp(0, self.current_speed);
        self.current_speed -= lost;
        lost
    }
}
