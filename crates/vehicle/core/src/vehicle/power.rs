//! Power core economy: energy pool, regeneration, per-turn draw limits.

use crate::entity::Entity;
use crate::stats::{gather_rounded, Attribute};

/// Why a power draw was refused. Draws fail closed: a refused draw leaves
/// the pool and the per-turn counter untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawPowerError {
    #[error("power core is destroyed")]
    CoreOffline,

    #[error("insufficient energy: requested {requested}, available {available}")]
    InsufficientEnergy { requested: i32, available: i32 },

    #[error("per-turn draw cap exceeded: requested {requested}, remaining {remaining}")]
    TurnCapExceeded { requested: i32, remaining: i32 },
}

/// Mutable energy state of a power core component.
///
/// Maximum and regeneration are modifier-adjusted through the owning
/// component's entity; only base values and the live pool are stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerCoreState {
    current_energy: i32,
    base_max_energy: i32,
    base_energy_regen: i32,
    /// Optional ceiling on energy drawn within a single turn.
    turn_draw_cap: Option<i32>,
    /// Energy drawn so far this turn; reset when the turn ends.
    current_turn_draw: i32,
}

impl PowerCoreState {
    /// Create a core with a full pool.
    pub fn new(base_max_energy: i32, base_energy_regen: i32) -> Self {
        Self {
            current_energy: base_max_energy,
            base_max_energy,
            base_energy_regen,
            turn_draw_cap: None,
            current_turn_draw: 0,
        }
    }

    /// Configure a per-turn draw cap (builder pattern). A cap of zero or
    /// less means uncapped.
    #[must_use]
    pub fn with_turn_draw_cap(mut self, cap: i32) -> Self {
        self.turn_draw_cap = (cap > 0).then_some(cap);
        self
    }

    pub fn current_energy(&self) -> i32 {
        self.current_energy
    }

    pub fn current_turn_draw(&self) -> i32 {
        self.current_turn_draw
    }

    pub fn turn_draw_cap(&self) -> Option<i32> {
        self.turn_draw_cap
    }

    /// Modifier-adjusted maximum energy.
    pub fn max_energy(&self, entity: &Entity) -> i32 {
        gather_rounded(Some(entity), Attribute::MaxEnergy, self.base_max_energy as f64).max(0)
    }

    /// Modifier-adjusted per-turn regeneration.
    pub fn energy_regen(&self, entity: &Entity) -> i32 {
        gather_rounded(
            Some(entity),
            Attribute::EnergyRegen,
            self.base_energy_regen as f64,
        )
        .max(0)
    }

    /// True iff a draw of `amount` would succeed right now.
    pub fn can_draw(&self, amount: i32) -> bool {
        self.check_draw(amount).is_ok()
    }

    fn check_draw(&self, amount: i32) -> Result<(), DrawPowerError> {
        if amount > self.current_energy {
            return Err(DrawPowerError::InsufficientEnergy {
                requested: amount,
                available: self.current_energy,
            });
        }
        if let Some(cap) = self.turn_draw_cap {
            if self.current_turn_draw + amount > cap {
                return Err(DrawPowerError::TurnCapExceeded {
                    requested: amount,
                    remaining: cap - self.current_turn_draw,
                });
            }
        }
        Ok(())
    }

    /// Check-then-debit: debits the pool and bumps the turn counter, or
    /// fails without any partial mutation.
    pub fn draw(&mut self, amount: i32) -> Result<(), DrawPowerError> {
        let amount = amount.max(0);
        self.check_draw(amount)?;
        self.current_energy -= amount;
        self.current_turn_draw += amount;
        Ok(())
    }

    /// Once-per-turn regeneration, clamped to the adjusted maximum.
    ///
    /// The caller gates on destruction; a destroyed core never reaches
    /// this.
    pub fn regenerate(&mut self, entity: &Entity) {
        let max = self.max_energy(entity);
        self.current_energy = (self.current_energy + self.energy_regen(entity)).min(max);
    }

    /// Adjust the pool by a signed delta (periodic drain/restore ticks),
    /// clamped into `[0, max]`.
    pub fn apply_energy_delta(&mut self, delta: i32, entity: &Entity) {
        let max = self.max_energy(entity);
        self.current_energy = (self.current_energy + delta).clamp(0, max);
    }

    /// Catastrophic loss: the pool is force-zeroed immediately.
    pub fn zero(&mut self) {
        self.current_energy = 0;
    }

    /// Reset the per-turn draw counter at end of turn.
    pub fn reset_turn_draw(&mut self) {
        self.current_turn_draw = 0;
    }
}
