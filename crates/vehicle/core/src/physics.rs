//! Pure friction and power-cost functions consumed by the drive component.
//!
//! All arithmetic is integer with truncation; the scale factor is the named
//! tunable [`SimConfig::friction_scale`](crate::config::SimConfig).
//!
//! Per-turn order matters: friction is applied to reduce speed first, and
//! the power cost is then computed from the already-adjusted speed.

/// Speed lost to friction and drag in one turn.
///
/// # Formula
///
/// ```text
/// loss = (base_friction + drag_percent × speed / 100) × scale
/// ```
pub fn friction_loss(speed: i32, base_friction: i32, drag_percent: i32, scale: i32) -> i32 {
    (base_friction + drag_percent * speed / 100) * scale
}

/// Power required to hold the given speed for one turn.
///
/// # Formula
///
/// ```text
/// cost = max(0, base_power + friction_loss(speed, ..))
/// ```
pub fn speed_power_cost(
    speed: i32,
    base_power: i32,
    base_friction: i32,
    drag_percent: i32,
    scale: i32,
) -> i32 {
    (base_power + friction_loss(speed, base_friction, drag_percent, scale)).max(0)
}
