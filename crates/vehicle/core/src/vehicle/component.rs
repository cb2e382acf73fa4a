//! Vehicle components: entities with exposure, power and role semantics.

use crate::entity::{CapabilityFlags, Entity};
use crate::events::{EventLog, SimEvent};
use crate::stats::{Attribute, ComponentId, ModifierKind};

use super::drive::DriveState;
use super::power::{DrawPowerError, PowerCoreState};

/// What a component physically is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ComponentKind {
    /// Hull and frame; the vehicle's health and armor-class authority.
    Chassis,
    /// Energy authority; exactly one per vehicle.
    PowerCore,
    /// Locomotion: engine, tracks, wheels.
    Drive,
    /// Supplemental plating.
    Armor,
    Weapon,
    Sensor,
    Utility,
}

impl ComponentKind {
    /// Default functional role for the kind.
    pub const fn default_role(self) -> ComponentRole {
        match self {
            ComponentKind::Chassis => ComponentRole::Structural,
            ComponentKind::PowerCore => ComponentRole::Power,
            ComponentKind::Drive => ComponentRole::Locomotion,
            ComponentKind::Armor => ComponentRole::Defense,
            ComponentKind::Weapon => ComponentRole::Offense,
            ComponentKind::Sensor | ComponentKind::Utility => ComponentRole::Support,
        }
    }
}

/// Functional role a component plays on the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ComponentRole {
    Structural,
    Power,
    Locomotion,
    Defense,
    Offense,
    Support,
}

/// Targeting-accessibility classification of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Exposure {
    /// Always reachable while intact.
    External,
    /// Covered by a shielding sibling component.
    Protected,
    /// Reachable only once the chassis is sufficiently breached.
    Internal,
    /// Actively shielded; same reachability rule as `Protected`.
    Shielded,
}

/// Why a component cannot currently be targeted.
///
/// This is a queryable classification for external presentation; the core
/// never formats it into prose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InaccessibilityReason {
    /// No such component on this vehicle.
    NotPresent,
    /// Destroyed components are never accessible, regardless of exposure.
    Destroyed,
    /// The shielding component is intact.
    BehindShielding,
    /// Chassis damage has not reached the internal-access threshold.
    HullIntact,
}

/// A modifier this component grants to another component once the vehicle
/// is assembled (e.g. armor plating adding armor class to the chassis).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProvidedModifier {
    /// First component of this kind receives the modifier.
    pub recipient: ComponentKind,
    pub attribute: Attribute,
    pub kind: ModifierKind,
    pub value: f64,
    pub label: Option<&'static str>,
}

impl ProvidedModifier {
    pub fn flat(recipient: ComponentKind, attribute: Attribute, value: f64) -> Self {
        Self {
            recipient,
            attribute,
            kind: ModifierKind::Flat,
            value,
            label: None,
        }
    }

    pub fn multiplier(recipient: ComponentKind, attribute: Attribute, value: f64) -> Self {
        Self {
            recipient,
            attribute,
            kind: ModifierKind::Multiplier,
            value,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// A vehicle sub-component: an [`Entity`] plus exposure, power-draw and
/// role semantics.
///
/// Sibling references (`shielded_by`) are [`ComponentId`] handles into the
/// owning vehicle's arena, never owning pointers.
#[derive(Clone, Debug)]
pub struct VehicleComponent {
    kind: ComponentKind,
    role: ComponentRole,
    exposure: Exposure,
    shielded_by: Option<ComponentId>,
    /// Chassis damage fraction (0..1) required before an `Internal`
    /// component becomes reachable.
    internal_access_threshold: f64,
    power_draw: i32,
    disabled: bool,
    entity: Entity,
    provided: Vec<ProvidedModifier>,
    power: Option<PowerCoreState>,
    drive: Option<DriveState>,
}

impl VehicleComponent {
    pub fn new(
        kind: ComponentKind,
        name: impl Into<String>,
        base_max_health: i32,
        base_armor_class: i32,
    ) -> Self {
        Self {
            kind,
            role: kind.default_role(),
            exposure: Exposure::External,
            shielded_by: None,
            internal_access_threshold: 0.0,
            power_draw: 0,
            disabled: false,
            entity: Entity::new(name, base_max_health, base_armor_class),
            provided: Vec::new(),
            power: None,
            drive: None,
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    #[must_use]
    pub fn with_role(mut self, role: ComponentRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityFlags) -> Self {
        self.entity = self.entity.with_capabilities(capabilities);
        self
    }

    /// Mark as internal, reachable once chassis damage reaches `threshold`
    /// (0..1 fraction, clamped).
    #[must_use]
    pub fn with_internal_exposure(mut self, threshold: f64) -> Self {
        self.exposure = Exposure::Internal;
        self.internal_access_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Mark as protected behind the given sibling component.
    #[must_use]
    pub fn with_shielding(mut self, shield: ComponentId) -> Self {
        self.exposure = Exposure::Shielded;
        self.shielded_by = Some(shield);
        self
    }

    #[must_use]
    pub fn with_exposure(mut self, exposure: Exposure) -> Self {
        self.exposure = exposure;
        self
    }

    #[must_use]
    pub fn with_power_draw(mut self, power_draw: i32) -> Self {
        self.power_draw = power_draw;
        self
    }

    #[must_use]
    pub fn with_power_core(mut self, power: PowerCoreState) -> Self {
        self.power = Some(power);
        self
    }

    #[must_use]
    pub fn with_drive(mut self, drive: DriveState) -> Self {
        self.drive = Some(drive);
        self
    }

    #[must_use]
    pub fn provides(mut self, modifier: ProvidedModifier) -> Self {
        self.provided.push(modifier);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn role(&self) -> ComponentRole {
        self.role
    }

    pub fn exposure(&self) -> Exposure {
        self.exposure
    }

    pub fn shielded_by(&self) -> Option<ComponentId> {
        self.shielded_by
    }

    pub fn internal_access_threshold(&self) -> f64 {
        self.internal_access_threshold
    }

    pub fn power_draw(&self) -> i32 {
        self.power_draw
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn is_destroyed(&self) -> bool {
        self.entity.is_destroyed()
    }

    pub fn provided_modifiers(&self) -> &[ProvidedModifier] {
        &self.provided
    }

    pub fn power(&self) -> Option<&PowerCoreState> {
        self.power.as_ref()
    }

    pub fn drive(&self) -> Option<&DriveState> {
        self.drive.as_ref()
    }

    pub fn drive_mut(&mut self) -> Option<&mut DriveState> {
        self.drive.as_mut()
    }

    /// Not destroyed, not disabled, and not blocked by a disabling status.
    pub fn is_operational(&self) -> bool {
        !self.entity.is_destroyed() && !self.disabled && !self.entity.blocks_actions()
    }

    // ========================================================================
    // Power economy (power-core components)
    // ========================================================================

    /// True iff this component fronts a power pool and the draw would
    /// succeed.
    pub fn can_draw_power(&self, amount: i32) -> bool {
        match &self.power {
            Some(power) => !self.entity.is_destroyed() && power.can_draw(amount.max(0)),
            None => false,
        }
    }

    /// Draw energy atomically. Emits [`SimEvent::PowerDrawn`] on success
    /// and [`SimEvent::PowerDrawRejected`] on any refusal, including an
    /// offline core.
    pub fn draw_power(
        &mut self,
        amount: i32,
        events: &mut EventLog,
    ) -> Result<(), DrawPowerError> {
        let destroyed = self.entity.is_destroyed();
        let name = self.entity.name().to_string();
        let amount = amount.max(0);

        let result = match self.power.as_mut() {
            Some(power) if !destroyed => power.draw(amount),
            _ => Err(DrawPowerError::CoreOffline),
        };
        match result {
            Ok(()) => {
                let remaining = self
                    .power
                    .as_ref()
                    .map(PowerCoreState::current_energy)
                    .unwrap_or(0);
                events.push(SimEvent::PowerDrawn {
                    component: name,
                    amount,
                    remaining,
                });
                Ok(())
            }
            Err(err) => {
                events.push(SimEvent::PowerDrawRejected {
                    component: name,
                    amount,
                });
                Err(err)
            }
        }
    }

    /// Once-per-turn regeneration; no-op while destroyed.
    pub fn regenerate_energy(&mut self) {
        if self.entity.is_destroyed() {
            return;
        }
        if let Some(power) = self.power.as_mut() {
            power.regenerate(&self.entity);
        }
    }

    /// Force-zero the pool (power-core destruction cascade).
    pub fn zero_energy(&mut self, events: &mut EventLog) {
        if let Some(power) = self.power.as_mut() {
            power.zero();
            events.push(SimEvent::EnergyZeroed {
                component: self.entity.name().to_string(),
            });
        }
    }

    // ========================================================================
    // Locomotion (drive components)
    // ========================================================================

    /// Bleed speed to friction this turn. `None` for components without a
    /// drive.
    pub fn apply_drive_friction(&mut self, config: &crate::config::SimConfig) -> Option<i32> {
        let entity = &self.entity;
        self.drive.as_mut().map(|drive| drive.apply_friction(entity, config))
    }

    /// Power needed to hold the current (post-friction) speed.
    pub fn drive_power_cost(&self, config: &crate::config::SimConfig) -> Option<i32> {
        self.drive.as_ref().map(|drive| drive.power_cost(&self.entity, config))
    }

    /// Coasting decay after a failed power draw.
    pub fn apply_unpowered_decay(&mut self, config: &crate::config::SimConfig) -> Option<i32> {
        self.drive.as_mut().map(|drive| drive.unpowered_decay(config))
    }

    /// Apply a net energy delta from status ticks, clamped into the pool.
    pub(crate) fn apply_energy_delta(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        if let Some(power) = self.power.as_mut() {
            power.apply_energy_delta(delta, &self.entity);
        }
    }

    /// End-of-turn counter reset.
    pub(crate) fn reset_turn_counters(&mut self) {
        if let Some(power) = self.power.as_mut() {
            power.reset_turn_draw();
        }
    }
}
