//! Vehicle aggregate: component arena, coordinator, effect router and the
//! per-turn pipeline.
//!
//! A vehicle owns exactly one chassis (health/armor authority) and one
//! power core (energy authority) plus any number of optional components.
//! Components live in an arena and refer to each other by [`ComponentId`]
//! handle; "destroyed" is a terminal flag, never memory removal.

pub mod component;
pub mod drive;
pub mod power;

pub use component::{
    ComponentKind, ComponentRole, Exposure, InaccessibilityReason, ProvidedModifier,
    VehicleComponent,
};
pub use drive::DriveState;
pub use power::{DrawPowerError, PowerCoreState};

use crate::config::SimConfig;
use crate::effect::{CombatEffect, IssuedEffect, TargetPrecision};
use crate::entity::DamageOutcome;
use crate::events::{EventLog, SimEvent};
use crate::stats::{Attribute, AttributeModifier, ComponentId, DamageType, ModifierCategory};

/// Fixed attribute → component-kind targeting table used by `Auto` routing.
///
/// Total: unmapped attributes fall through to the chassis.
pub fn component_kind_for_attribute(attribute: Attribute) -> ComponentKind {
    match attribute {
        Attribute::MaxHealth | Attribute::ArmorClass | Attribute::Resistance(_) => {
            ComponentKind::Chassis
        }
        Attribute::MaxEnergy | Attribute::EnergyRegen => ComponentKind::PowerCore,
        Attribute::Speed
        | Attribute::Acceleration
        | Attribute::Deceleration
        | Attribute::Mobility
        | Attribute::Stability
        | Attribute::Friction
        | Attribute::Drag => ComponentKind::Drive,
        _ => ComponentKind::Chassis,
    }
}

/// Non-fatal problems detected while assembling a vehicle.
///
/// Assembly never fails; a malformed vehicle degrades gracefully and
/// reports through [`Vehicle::non_operational_reason`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyWarning {
    #[error("duplicate {kind} demoted to an optional slot")]
    DuplicateMandatory { kind: ComponentKind },

    #[error("no chassis fitted")]
    MissingChassis,

    #[error("no power core fitted")]
    MissingPowerCore,
}

/// Why the vehicle as a whole cannot fight or move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NonOperationalReason {
    Destroyed,
    MissingChassis,
    MissingPowerCore,
}

/// Arena of components addressed by [`ComponentId`].
///
/// Ids are stable indices; components are never removed, only flagged
/// destroyed.
#[derive(Clone, Debug, Default)]
pub struct ComponentArena {
    items: Vec<VehicleComponent>,
}

impl ComponentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: VehicleComponent) -> ComponentId {
        let id = ComponentId(self.items.len() as u32);
        self.items.push(component);
        id
    }

    pub fn get(&self, id: ComponentId) -> Option<&VehicleComponent> {
        self.items.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut VehicleComponent> {
        self.items.get_mut(id.0 as usize)
    }

    pub fn ids(&self) -> impl Iterator<Item = ComponentId> {
        (0..self.items.len() as u32).map(ComponentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &VehicleComponent)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, component)| (ComponentId(index as u32), component))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ComponentId, &mut VehicleComponent)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(index, component)| (ComponentId(index as u32), component))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One vehicle: components, coordinator state, seat table and turn
/// pipeline.
#[derive(Clone, Debug)]
pub struct Vehicle {
    name: String,
    config: SimConfig,
    components: ComponentArena,
    chassis: Option<ComponentId>,
    power_core: Option<ComponentId>,
    optional: Vec<ComponentId>,
    seats: [Option<ComponentId>; SimConfig::MAX_SEATS],
    warnings: Vec<AssemblyWarning>,
    providers_registered: bool,
    destroyed: bool,
    turn: u32,
}

impl Vehicle {
    /// Discovery pass: scan the attached components once, assign the first
    /// chassis and first power core to their dedicated slots, and keep the
    /// rest as ordered optional components.
    pub fn assemble(name: impl Into<String>, components: Vec<VehicleComponent>) -> Self {
        Self::assemble_with_config(name, components, SimConfig::default())
    }

    pub fn assemble_with_config(
        name: impl Into<String>,
        components: Vec<VehicleComponent>,
        config: SimConfig,
    ) -> Self {
        let mut vehicle = Self {
            name: name.into(),
            config,
            components: ComponentArena::new(),
            chassis: None,
            power_core: None,
            optional: Vec::new(),
            seats: [None; SimConfig::MAX_SEATS],
            warnings: Vec::new(),
            providers_registered: false,
            destroyed: false,
            turn: 0,
        };

        for component in components {
            let kind = component.kind();
            let id = vehicle.components.push(component);
            match kind {
                ComponentKind::Chassis if vehicle.chassis.is_none() => vehicle.chassis = Some(id),
                ComponentKind::PowerCore if vehicle.power_core.is_none() => {
                    vehicle.power_core = Some(id)
                }
                ComponentKind::Chassis | ComponentKind::PowerCore => {
                    vehicle
                        .warnings
                        .push(AssemblyWarning::DuplicateMandatory { kind });
                    vehicle.optional.push(id);
                }
                _ => vehicle.optional.push(id),
            }
        }

        if vehicle.chassis.is_none() {
            vehicle.warnings.push(AssemblyWarning::MissingChassis);
        }
        if vehicle.power_core.is_none() {
            vehicle.warnings.push(AssemblyWarning::MissingPowerCore);
        }

        vehicle
    }

    /// Second coordinator pass, run only after all components are known:
    /// every operational provider registers its cross-component modifiers
    /// onto the first component of the recipient kind.
    ///
    /// Registered modifiers are permanent (`Equipment`) and sourced to the
    /// providing component. Idempotent per assembly.
    pub fn register_provided_modifiers(&mut self) {
        if self.providers_registered {
            return;
        }
        self.providers_registered = true;

        let registrations: Vec<(ComponentId, ProvidedModifier)> = self
            .components
            .iter()
            .filter(|(_, provider)| provider.is_operational())
            .flat_map(|(id, provider)| {
                provider
                    .provided_modifiers()
                    .iter()
                    .cloned()
                    .map(move |provided| (id, provided))
            })
            .collect();

        for (provider_id, provided) in registrations {
            let Some(recipient_id) = self.find_component(provided.recipient) else {
                continue;
            };
            let Some(recipient) = self.components.get_mut(recipient_id) else {
                continue;
            };
            let modifier = AttributeModifier {
                attribute: provided.attribute,
                kind: provided.kind,
                value: provided.value,
                source: crate::stats::ModifierSource::Component(provider_id),
                category: ModifierCategory::Equipment,
                label: provided.label,
            };
            recipient.entity_mut().add_modifier(modifier);
        }
    }

    /// Explicit init hook for the turn scheduler; runs the provider
    /// registration pass.
    pub fn initialize(&mut self) {
        self.register_provided_modifiers();
    }

    // ========================================================================
    // Queries (safe defaults when mandatory components are missing)
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    pub fn chassis(&self) -> Option<ComponentId> {
        self.chassis
    }

    pub fn power_core(&self) -> Option<ComponentId> {
        self.power_core
    }

    pub fn optional_components(&self) -> &[ComponentId] {
        &self.optional
    }

    pub fn component(&self, id: ComponentId) -> Option<&VehicleComponent> {
        self.components.get(id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut VehicleComponent> {
        self.components.get_mut(id)
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &VehicleComponent)> {
        self.components.iter()
    }

    /// First component of the given kind, in arena (assembly) order.
    pub fn find_component(&self, kind: ComponentKind) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|(_, component)| component.kind() == kind)
            .map(|(id, _)| id)
    }

    /// Diagnostic reason the vehicle cannot fight, if any.
    pub fn non_operational_reason(&self) -> Option<NonOperationalReason> {
        if self.destroyed {
            return Some(NonOperationalReason::Destroyed);
        }
        if self.chassis.is_none() {
            return Some(NonOperationalReason::MissingChassis);
        }
        if self.power_core.is_none() {
            return Some(NonOperationalReason::MissingPowerCore);
        }
        None
    }

    /// Chassis health; zero when no chassis is fitted.
    pub fn health(&self) -> i32 {
        self.chassis
            .and_then(|id| self.components.get(id))
            .map(|chassis| chassis.entity().health())
            .unwrap_or(0)
    }

    /// Chassis armor class; the baseline when no chassis is fitted.
    pub fn armor_class(&self) -> i32 {
        self.chassis
            .and_then(|id| self.components.get(id))
            .map(|chassis| chassis.entity().armor_class())
            .unwrap_or(self.config.baseline_armor_class)
    }

    /// Power-core energy; zero when no core is fitted.
    pub fn current_energy(&self) -> i32 {
        self.power_core
            .and_then(|id| self.components.get(id))
            .and_then(|core| core.power())
            .map(|power| power.current_energy())
            .unwrap_or(0)
    }

    // ========================================================================
    // Seat assignments
    // ========================================================================

    /// Assign a crew seat to operate a component. Returns false for an
    /// out-of-range seat or unknown component.
    pub fn assign_seat(&mut self, seat: usize, component: ComponentId) -> bool {
        if seat >= SimConfig::MAX_SEATS || self.components.get(component).is_none() {
            return false;
        }
        self.seats[seat] = Some(component);
        true
    }

    pub fn seat_assignment(&self, seat: usize) -> Option<ComponentId> {
        self.seats.get(seat).copied().flatten()
    }

    pub fn clear_seat(&mut self, seat: usize) {
        if let Some(slot) = self.seats.get_mut(seat) {
            *slot = None;
        }
    }

    // ========================================================================
    // Accessibility
    // ========================================================================

    /// Fraction of chassis health lost (0..1); zero when no chassis is
    /// fitted.
    pub fn chassis_damage_fraction(&self) -> f64 {
        let Some(chassis) = self.chassis.and_then(|id| self.components.get(id)) else {
            return 0.0;
        };
        let max = chassis.entity().max_health();
        if max <= 0 {
            return 1.0;
        }
        1.0 - chassis.entity().health() as f64 / max as f64
    }

    /// Single source of truth for accessibility.
    /// [`Self::is_component_accessible`] is defined as this returning
    /// `None`, so the two can never disagree.
    pub fn inaccessibility_reason(&self, id: ComponentId) -> Option<InaccessibilityReason> {
        let Some(component) = self.components.get(id) else {
            return Some(InaccessibilityReason::NotPresent);
        };
        if component.is_destroyed() {
            return Some(InaccessibilityReason::Destroyed);
        }

        match component.exposure() {
            Exposure::External => None,
            Exposure::Protected | Exposure::Shielded => {
                match component
                    .shielded_by()
                    .and_then(|shield_id| self.components.get(shield_id))
                {
                    Some(shield) if !shield.is_destroyed() => {
                        Some(InaccessibilityReason::BehindShielding)
                    }
                    _ => None,
                }
            }
            Exposure::Internal => {
                if self.chassis_damage_fraction() >= component.internal_access_threshold() {
                    None
                } else {
                    Some(InaccessibilityReason::HullIntact)
                }
            }
        }
    }

    pub fn is_component_accessible(&self, id: ComponentId) -> bool {
        self.inaccessibility_reason(id).is_none()
    }

    // ========================================================================
    // Effect routing
    // ========================================================================

    /// Resolve `(effect, precision)` to a concrete component.
    ///
    /// Total: every combination resolves, falling back to the chassis slot
    /// (or arena index 0 on a chassis-less wreck).
    pub fn route_effect_target(
        &self,
        effect: &CombatEffect,
        precision: TargetPrecision,
        explicit: Option<ComponentId>,
    ) -> ComponentId {
        let fallback = self.chassis.unwrap_or(ComponentId(0));
        match precision {
            TargetPrecision::Precise => explicit.unwrap_or(fallback),
            TargetPrecision::VehicleOnly => fallback,
            TargetPrecision::Auto => match effect {
                CombatEffect::Damage { .. } | CombatEffect::ResourceRestoration { .. } => fallback,
                CombatEffect::ApplyModifier(modifier) => self
                    .find_component(component_kind_for_attribute(modifier.attribute))
                    .unwrap_or(fallback),
                CombatEffect::ApplyStatus { template, .. } => template
                    .modifiers()
                    .first()
                    .and_then(|blueprint| {
                        self.find_component(component_kind_for_attribute(blueprint.attribute))
                    })
                    .unwrap_or(fallback),
            },
        }
    }

    /// Route and apply one issued effect. Returns the routed component.
    pub fn resolve_effect(&mut self, issued: IssuedEffect, events: &mut EventLog) -> ComponentId {
        let target =
            self.route_effect_target(&issued.effect, issued.precision, issued.explicit_target);

        match issued.effect {
            CombatEffect::Damage {
                amount,
                damage_type,
            } => {
                self.damage_component(target, amount, damage_type, events);
            }
            CombatEffect::ResourceRestoration { amount } => {
                if let Some(component) = self.components.get_mut(target) {
                    component.entity_mut().heal(amount, events);
                }
            }
            CombatEffect::ApplyModifier(modifier) => {
                if let Some(component) = self.components.get_mut(target) {
                    component.entity_mut().add_modifier(modifier);
                }
            }
            CombatEffect::ApplyStatus { template, applier } => {
                if let Some(component) = self.components.get_mut(target) {
                    component
                        .entity_mut()
                        .apply_status_effect(&template, applier, events);
                }
            }
        }

        target
    }

    /// Resolve a batch of issued effects in issue order.
    pub fn resolve_effects(
        &mut self,
        effects: impl IntoIterator<Item = IssuedEffect>,
        events: &mut EventLog,
    ) {
        for issued in effects {
            self.resolve_effect(issued, events);
        }
    }

    // ========================================================================
    // Damage & destruction cascades
    // ========================================================================

    /// Apply typed damage to a component, running its destruction cascade
    /// on the transition into the destroyed state.
    pub fn damage_component(
        &mut self,
        id: ComponentId,
        amount: i32,
        damage_type: DamageType,
        events: &mut EventLog,
    ) -> DamageOutcome {
        let Some(component) = self.components.get_mut(id) else {
            return DamageOutcome::default();
        };
        let outcome = component
            .entity_mut()
            .take_typed_damage(amount, damage_type, events);
        if outcome.destroyed_now {
            self.run_destruction_cascade(id, events);
        }
        outcome
    }

    /// Kind-specific cascade, fired exactly once per destroyed-transition.
    ///
    /// Every kind emits the component event; the chassis additionally kills
    /// the whole vehicle, and the power core force-zeroes its energy.
    fn run_destruction_cascade(&mut self, id: ComponentId, events: &mut EventLog) {
        let Some(component) = self.components.get(id) else {
            return;
        };
        let kind = component.kind();
        events.push(SimEvent::ComponentDestroyed {
            component: component.name().to_string(),
        });

        match kind {
            ComponentKind::Chassis => {
                if !self.destroyed {
                    self.destroyed = true;
                    events.push(SimEvent::VehicleDestroyed {
                        vehicle: self.name.clone(),
                    });
                }
            }
            ComponentKind::PowerCore => {
                if let Some(core) = self.components.get_mut(id) {
                    core.zero_energy(events);
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Turn pipeline
    // ========================================================================

    /// Turn phases (1) and (2): power regeneration, then drive friction and
    /// sustain cost.
    pub fn begin_turn(&mut self, events: &mut EventLog) {
        if let Some(core) = self.power_core.and_then(|id| self.components.get_mut(id)) {
            core.regenerate_energy();
        }
        self.run_drive_phase(events);
    }

    fn run_drive_phase(&mut self, events: &mut EventLog) {
        let config = self.config.clone();
        let Some(drive_id) = self
            .components
            .iter()
            .find(|(_, component)| component.drive().is_some())
            .map(|(id, _)| id)
        else {
            return;
        };

        // Friction first; the sustain cost is computed from the adjusted
        // speed.
        let Some(component) = self.components.get_mut(drive_id) else {
            return;
        };
        component.apply_drive_friction(&config);
        let cost = component.drive_power_cost(&config).unwrap_or(0);
        let operational = component.is_operational();

        let mut powered = cost == 0;
        if cost > 0 && operational {
            if let Some(core) = self.power_core.and_then(|id| self.components.get_mut(id)) {
                powered = core.draw_power(cost, events).is_ok();
            }
        }

        if !powered {
            if let Some(component) = self.components.get_mut(drive_id) {
                component.apply_unpowered_decay(&config);
            }
        }
    }

    /// Turn phases (4) and (5): status ticks/expiry on every component,
    /// then per-turn counter resets.
    pub fn end_turn(&mut self, events: &mut EventLog) {
        let ids: Vec<ComponentId> = self.components.ids().collect();
        for id in ids {
            let report = match self.components.get_mut(id) {
                Some(component) => {
                    let report = component.entity_mut().update_status_effects(events);
                    component.apply_energy_delta(report.energy_delta);
                    report
                }
                None => continue,
            };
            if report.destroyed_now {
                self.run_destruction_cascade(id, events);
            }
        }

        for (_, component) in self.components.iter_mut() {
            component.reset_turn_counters();
        }
        self.turn += 1;
    }

    /// Full single-vehicle turn: begin, resolve issued effects in order,
    /// end.
    pub fn run_turn(&mut self, effects: Vec<IssuedEffect>, events: &mut EventLog) {
        self.begin_turn(events);
        self.resolve_effects(effects, events);
        self.end_turn(events);
    }
}
