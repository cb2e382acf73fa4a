//! Combat/buff effect vocabulary consumed by the effect router.
//!
//! Effects carry pre-resolved numeric amounts: dice and roll values are an
//! opaque upstream input, resolved before an effect reaches this core.

use std::sync::Arc;

use crate::stats::{AttributeModifier, ComponentId, DamageType, ModifierSource};
use crate::status::StatusEffectTemplate;

/// How precisely the initiator targeted the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetPrecision {
    /// Honor an explicit player-selected component (chassis if none given).
    Precise,
    /// Always the chassis, regardless of payload.
    VehicleOnly,
    /// Infer the component from the effect payload.
    Auto,
}

/// One effect issued against a vehicle.
///
/// Routing resolves `(effect, precision)` to a concrete component; the
/// mapping is total and never leaves a target unresolved.
#[derive(Clone, Debug)]
pub enum CombatEffect {
    /// Typed damage with a pre-rolled final amount.
    Damage { amount: i32, damage_type: DamageType },

    /// Health restoration (hull patching, field repairs).
    ResourceRestoration { amount: i32 },

    /// Register a single modifier on the routed component.
    ApplyModifier(AttributeModifier),

    /// Apply a status-effect template to the routed component.
    ApplyStatus {
        template: Arc<StatusEffectTemplate>,
        applier: ModifierSource,
    },
}

/// An effect queued for resolution, in issue order.
#[derive(Clone, Debug)]
pub struct IssuedEffect {
    pub effect: CombatEffect,
    pub precision: TargetPrecision,
    /// Player-selected component for [`TargetPrecision::Precise`].
    pub explicit_target: Option<ComponentId>,
}

impl IssuedEffect {
    pub fn new(effect: CombatEffect, precision: TargetPrecision) -> Self {
        Self {
            effect,
            precision,
            explicit_target: None,
        }
    }

    #[must_use]
    pub fn at(mut self, target: ComponentId) -> Self {
        self.explicit_target = Some(target);
        self
    }
}
