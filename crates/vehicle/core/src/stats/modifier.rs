//! Attribute modifiers - the deltas and ratios stacked on top of base values.
//!
//! A modifier is pure data: it never applies itself. Resolution happens in
//! [`gather_attribute_value`](super::gather_attribute_value), which folds a
//! modifier collection over a base value in a fixed order.

use super::attribute::Attribute;

/// Stable identity of a live status-effect instance on one entity.
///
/// Used as a modifier source tag so an instance's materialized modifiers can
/// be stripped when the instance expires or is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstanceId(pub u64);

/// Index handle into a vehicle's component arena.
///
/// Components refer to each other (shielding, modifier provision) through
/// these handles rather than owning pointers, so sibling references never
/// form ownership cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(pub u32);

impl core::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning reference to whatever object registered a modifier.
///
/// The originating object can be a sibling component, a status-effect
/// instance, or something environmental; the source is a tagged identity
/// handle, never a pointer back into the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    /// Registered by another component on the same vehicle.
    Component(ComponentId),
    /// Materialized from a live status-effect instance.
    Status(StatusInstanceId),
    /// Environmental object identified by an opaque id (terrain, weather).
    Environment(u32),
    /// No tracked origin; cannot be bulk-removed by source.
    Untracked,
}

/// How a modifier combines with the base value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    /// Additive delta, accumulated before any multiplier applies.
    Flat,
    /// Ratio applied to the flat-adjusted total (1.0 = no-op).
    Multiplier,
}

/// Where a modifier came from, which determines its lifecycle class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierCategory {
    /// Fitted equipment; permanent until the equipment changes.
    Equipment,
    /// Materialized by a status-effect instance.
    StatusEffect,
    /// Runtime-computed adjustment (heat, terrain state).
    Dynamic,
    /// Projected by a nearby friendly source.
    Aura,
    /// Granted by a crew skill.
    Skill,
    Other,
}

impl ModifierCategory {
    /// Dispel effects strip modifiers of these categories.
    pub const fn is_dispellable(self) -> bool {
        matches!(self, ModifierCategory::StatusEffect | ModifierCategory::Aura)
    }

    /// Permanent modifiers survive every cleanup short of refitting.
    pub const fn is_permanent(self) -> bool {
        matches!(self, ModifierCategory::Equipment)
    }
}

/// A single registered adjustment to one attribute channel.
// Serialize only: the static display label cannot round-trip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeModifier {
    pub attribute: Attribute,
    pub kind: ModifierKind,
    /// Additive delta for `Flat`, ratio for `Multiplier`.
    pub value: f64,
    pub source: ModifierSource,
    pub category: ModifierCategory,
    /// Optional display label surfaced in breakdowns; never formatted here.
    pub label: Option<&'static str>,
}

impl AttributeModifier {
    /// Create a flat additive modifier.
    pub fn flat(
        attribute: Attribute,
        value: f64,
        source: ModifierSource,
        category: ModifierCategory,
    ) -> Self {
        Self {
            attribute,
            kind: ModifierKind::Flat,
            value,
            source,
            category,
            label: None,
        }
    }

    /// Create a multiplicative modifier (1.0 = no-op).
    pub fn multiplier(
        attribute: Attribute,
        value: f64,
        source: ModifierSource,
        category: ModifierCategory,
    ) -> Self {
        Self {
            attribute,
            kind: ModifierKind::Multiplier,
            value,
            source,
            category,
            label: None,
        }
    }

    /// Attach a display label (builder pattern).
    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Returns true if applying this modifier changes the result.
    ///
    /// Zero-effect modifiers stay registered but are excluded from
    /// breakdowns.
    pub fn has_effect(&self) -> bool {
        match self.kind {
            ModifierKind::Flat => self.value != 0.0,
            ModifierKind::Multiplier => self.value != 1.0,
        }
    }

    pub fn is_dispellable(&self) -> bool {
        self.category.is_dispellable()
    }

    pub fn is_permanent(&self) -> bool {
        self.category.is_permanent()
    }
}
