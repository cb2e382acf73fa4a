//! Attribute and damage-type vocabularies.
//!
//! Both enums are closed: the set of numeric channels an entity can hold is
//! fixed at compile time and never extended at runtime.

/// Damage type for resistances and typed damage application.
///
/// Each type has a matching [`Attribute::Resistance`] channel on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Solid projectiles, rams, collisions.
    Kinetic,
    /// Heat, plasma, incendiaries.
    Thermal,
    /// Blast and fragmentation.
    Explosive,
    /// EMP and ion weaponry.
    Electromagnetic,
}

/// A named numeric channel an entity can hold a value for.
///
/// Attributes are the keys of the modifier system: every
/// [`AttributeModifier`](super::AttributeModifier) targets exactly one of
/// these channels, and [`gather_attribute_value`](super::gather_attribute_value)
/// resolves the effective value per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    // ========================================================================
    // Survivability
    // ========================================================================
    MaxHealth,
    ArmorClass,
    /// Fractional reduction (0..1) of incoming damage of the given type.
    Resistance(DamageType),

    // ========================================================================
    // Locomotion
    // ========================================================================
    Mobility,
    Speed,
    Acceleration,
    Deceleration,
    Stability,
    Friction,
    Drag,

    // ========================================================================
    // Offense
    // ========================================================================
    DamageDice,
    DamageDieSize,
    DamageBonus,
    AttackBonus,
    AmmoCapacity,

    // ========================================================================
    // Power & fitting
    // ========================================================================
    ComponentSpace,
    PowerDraw,
    MaxEnergy,
    EnergyRegen,
}

impl Attribute {
    /// Returns true for channels that only make sense as whole numbers.
    ///
    /// Discrete channels are rounded at the gather boundary; continuous
    /// channels (resistances, thresholds) stay fractional.
    pub const fn is_discrete(self) -> bool {
        !matches!(self, Attribute::Resistance(_))
    }
}
