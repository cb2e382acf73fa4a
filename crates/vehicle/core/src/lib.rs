//! Deterministic rules resolution for turn-based vehicular combat.
//!
//! `vehicle-core` owns the numeric and lifecycle rules: attribute
//! modifiers and stat gathering, status-effect stacking and expiry,
//! component health and destruction cascades, the power-core economy and
//! the drive/friction model. It holds no presentation, persistence or
//! networking concerns; callers feed it pre-rolled effect amounts and
//! read results back through typed events. All state mutation flows
//! through [`vehicle::Vehicle`] and [`entity::Entity`], and supporting
//! crates depend on the types re-exported here.
pub mod config;
pub mod effect;
pub mod entity;
pub mod events;
pub mod physics;
pub mod stats;
pub mod status;
pub mod vehicle;

pub use config::SimConfig;
pub use effect::{CombatEffect, IssuedEffect, TargetPrecision};
pub use entity::{CapabilityFlags, DamageOutcome, Entity, StatusTickReport};
pub use events::{EventLog, SimEvent};
pub use stats::{
    gather_attribute_value, gather_rounded, gather_with_breakdown, Attribute, AttributeBreakdown,
    AttributeModifier, BreakdownEntry, ComponentId, DamageType, ModifierCategory, ModifierKind,
    ModifierSource, StatusInstanceId,
};
pub use status::{
    AppliedStatusEffect, ModifierBlueprint, StatusEffectTemplate, StatusEffectTemplateBuilder,
    TemplateError, TickBlueprint, TickKind,
};
pub use vehicle::{
    component_kind_for_attribute, AssemblyWarning, ComponentArena, ComponentKind, ComponentRole,
    DrawPowerError, DriveState, Exposure, InaccessibilityReason, NonOperationalReason,
    PowerCoreState, ProvidedModifier, Vehicle, VehicleComponent,
};
