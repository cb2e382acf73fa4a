//! Immutable status-effect templates.
//!
//! A template is the reusable definition of a timed or periodic change:
//! duration, capability gates, the modifier blueprints it materializes on a
//! target, and the periodic ticks it runs each turn. Templates are shared
//! (`Arc`) and never mutated after construction; all live state belongs to
//! [`AppliedStatusEffect`](super::AppliedStatusEffect).

use crate::entity::CapabilityFlags;
use crate::stats::{
    Attribute, AttributeModifier, DamageType, ModifierCategory, ModifierKind, StatusInstanceId,
};

/// Validation errors raised while building a template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("status effect template requires a non-empty name")]
    EmptyName,

    #[error("invalid base duration {0}: must be positive or INDEFINITE (-1)")]
    InvalidDuration(i32),
}

/// Blueprint for one modifier a template materializes on its target.
///
/// Materialized instances are tagged `category = StatusEffect` and sourced
/// to the applied instance so they can be stripped on expiry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModifierBlueprint {
    pub attribute: Attribute,
    pub kind: ModifierKind,
    pub value: f64,
    pub label: Option<&'static str>,
}

impl ModifierBlueprint {
    pub fn flat(attribute: Attribute, value: f64) -> Self {
        Self {
            attribute,
            kind: ModifierKind::Flat,
            value,
            label: None,
        }
    }

    pub fn multiplier(attribute: Attribute, value: f64) -> Self {
        Self {
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

    /// Materialize this blueprint as a concrete modifier owned by a live
    /// status-effect instance.
    pub fn materialize(&self, instance: StatusInstanceId) -> AttributeModifier {
        AttributeModifier {
            attribute: self.attribute,
            kind: self.kind,
            value: self.value,
            source: crate::stats::ModifierSource::Status(instance),
            category: ModifierCategory::StatusEffect,
            label: self.label,
        }
    }
}

/// What a periodic tick does to its target each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickKind {
    /// Typed damage against the target's health.
    Damage(DamageType),
    /// Health restoration.
    Heal,
    /// Energy drained from the target's power pool, if it has one.
    EnergyDrain,
    /// Energy restored to the target's power pool, if it has one.
    EnergyRestore,
}

/// Blueprint for one periodic per-turn hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickBlueprint {
    pub kind: TickKind,
    pub amount: i32,
}

impl TickBlueprint {
    pub fn new(kind: TickKind, amount: i32) -> Self {
        Self { kind, amount }
    }
}

/// Reusable immutable definition of a timed/periodic status change.
///
/// Template identity is the `name`: at most one live instance per
/// (target, name) pair exists, and re-application of any template carrying
/// the same name runs stacking resolution against the existing instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusEffectTemplate {
    name: String,
    base_duration: i32,
    required_capabilities: CapabilityFlags,
    excluded_capabilities: CapabilityFlags,
    modifiers: Vec<ModifierBlueprint>,
    ticks: Vec<TickBlueprint>,
    blocks_actions: bool,
}

impl StatusEffectTemplate {
    /// Sentinel duration for effects that never expire on their own.
    pub const INDEFINITE: i32 = -1;

    /// Start building a template with the given identity name.
    pub fn builder(name: impl Into<String>) -> StatusEffectTemplateBuilder {
        StatusEffectTemplateBuilder {
            name: name.into(),
            base_duration: Self::INDEFINITE,
            required_capabilities: CapabilityFlags::empty(),
            excluded_capabilities: CapabilityFlags::empty(),
            modifiers: Vec::new(),
            ticks: Vec::new(),
            blocks_actions: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base duration in turns; [`Self::INDEFINITE`] for unbounded effects.
    pub fn base_duration(&self) -> i32 {
        self.base_duration
    }

    pub fn is_indefinite(&self) -> bool {
        self.base_duration < 0
    }

    pub fn required_capabilities(&self) -> CapabilityFlags {
        self.required_capabilities
    }

    pub fn excluded_capabilities(&self) -> CapabilityFlags {
        self.excluded_capabilities
    }

    /// Ordered modifier blueprints, materialized on application.
    pub fn modifiers(&self) -> &[ModifierBlueprint] {
        &self.modifiers
    }

    /// Periodic per-turn tick blueprints.
    pub fn ticks(&self) -> &[TickBlueprint] {
        &self.ticks
    }

    /// Whether the target is barred from acting while this effect is live.
    pub fn blocks_actions(&self) -> bool {
        self.blocks_actions
    }

    /// Stacking comparison key: the summed absolute modifier values.
    ///
    /// A pure behavioral effect (no modifier blueprints) has magnitude 0.
    pub fn magnitude(&self) -> f64 {
        self.modifiers.iter().map(|m| m.value.abs()).sum()
    }
}

/// Builder validating template invariants at construction.
#[derive(Clone, Debug)]
pub struct StatusEffectTemplateBuilder {
    name: String,
    base_duration: i32,
    required_capabilities: CapabilityFlags,
    excluded_capabilities: CapabilityFlags,
    modifiers: Vec<ModifierBlueprint>,
    ticks: Vec<TickBlueprint>,
    blocks_actions: bool,
}

impl StatusEffectTemplateBuilder {
    /// Set a finite duration in turns, or [`StatusEffectTemplate::INDEFINITE`].
    #[must_use]
    pub fn duration(mut self, turns: i32) -> Self {
        self.base_duration = turns;
        self
    }

    #[must_use]
    pub fn requires(mut self, capabilities: CapabilityFlags) -> Self {
        self.required_capabilities |= capabilities;
        self
    }

    #[must_use]
    pub fn excludes(mut self, capabilities: CapabilityFlags) -> Self {
        self.excluded_capabilities |= capabilities;
        self
    }

    #[must_use]
    pub fn modifier(mut self, blueprint: ModifierBlueprint) -> Self {
        self.modifiers.push(blueprint);
        self
    }

    #[must_use]
    pub fn tick(mut self, blueprint: TickBlueprint) -> Self {
        self.ticks.push(blueprint);
        self
    }

    #[must_use]
    pub fn blocks_actions(mut self) -> Self {
        self.blocks_actions = true;
        self
    }

    pub fn build(self) -> Result<StatusEffectTemplate, TemplateError> {
        if self.name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if self.base_duration == 0 || self.base_duration < StatusEffectTemplate::INDEFINITE {
            return Err(TemplateError::InvalidDuration(self.base_duration));
        }

        Ok(StatusEffectTemplate {
            name: self.name,
            base_duration: self.base_duration,
            required_capabilities: self.required_capabilities,
            excluded_capabilities: self.excluded_capabilities,
            modifiers: self.modifiers,
            ticks: self.ticks,
            blocks_actions: self.blocks_actions,
        })
    }
}
