/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Scale factor applied to raw friction loss each turn.
    ///
    /// Kept as a named tunable: raising it makes speed bleed off faster and
    /// drives up per-turn power costs across the board.
    pub friction_scale: i32,

    /// Percentage of current speed lost per turn when the drive cannot draw
    /// enough power to sustain it.
    pub unpowered_decay_percent: i32,

    /// Armor class reported for a vehicle with no chassis fitted.
    pub baseline_armor_class: i32,
}

impl SimConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active status effects per entity.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Maximum number of crew seats on a single vehicle.
    pub const MAX_SEATS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FRICTION_SCALE: i32 = 2;
    pub const DEFAULT_UNPOWERED_DECAY_PERCENT: i32 = 25;
    pub const DEFAULT_BASELINE_ARMOR_CLASS: i32 = 10;

    pub fn new() -> Self {
        Self {
            friction_scale: Self::DEFAULT_FRICTION_SCALE,
            unpowered_decay_percent: Self::DEFAULT_UNPOWERED_DECAY_PERCENT,
            baseline_armor_class: Self::DEFAULT_BASELINE_ARMOR_CLASS,
        }
    }

    pub fn with_friction_scale(friction_scale: i32) -> Self {
        Self {
            friction_scale,
            ..Self::new()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
