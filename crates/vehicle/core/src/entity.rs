//! Entity - the abstraction owning health, modifiers and active status
//! effects.
//!
//! Both standalone combatants and vehicle components are entities; the
//! vehicle layer composes over this type. All numeric queries route through
//! the stat calculator so registered modifiers are always in effect.

use std::sync::Arc;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::SimConfig;
use crate::events::{EventLog, SimEvent};
use crate::stats::{
    gather_attribute_value, gather_rounded, gather_with_breakdown, Attribute, AttributeBreakdown,
    AttributeModifier, DamageType, ModifierSource, StatusInstanceId,
};
use crate::status::{AppliedStatusEffect, StatusEffectTemplate, TickKind};

bitflags! {
    /// Capability flags gating which status effects can attach to an entity.
    ///
    /// Templates declare required and excluded flags; application fails the
    /// capability gate when the target's set does not satisfy them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CapabilityFlags: u8 {
        const POWERED    = 1 << 0;
        const MOBILE     = 1 << 1;
        const CREWED     = 1 << 2;
        const ELECTRONIC = 1 << 3;
        const ARMORED    = 1 << 4;
        const WEAPONIZED = 1 << 5;
    }
}

/// Result of a damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health actually removed after clamping (and resistances, if typed).
    pub applied: i32,
    /// True exactly once: on the transition into the destroyed state.
    pub destroyed_now: bool,
}

/// Outcome of one status-effect update pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTickReport {
    /// A periodic damage tick drove the entity to destruction this pass.
    pub destroyed_now: bool,
    /// Net energy adjustment requested by tick hooks; applied by the owner
    /// if this entity fronts a power pool, ignored otherwise.
    pub energy_delta: i32,
}

/// Health, armor, capability flags, owned modifiers and active status
/// effects.
#[derive(Clone, Debug)]
pub struct Entity {
    name: String,
    health: i32,
    base_max_health: i32,
    base_armor_class: i32,
    destroyed: bool,
    capabilities: CapabilityFlags,
    modifiers: Vec<AttributeModifier>,
    statuses: ArrayVec<AppliedStatusEffect, { SimConfig::MAX_STATUS_EFFECTS }>,
    next_instance: u64,
}

impl Entity {
    /// Create an entity at full health.
    pub fn new(name: impl Into<String>, base_max_health: i32, base_armor_class: i32) -> Self {
        Self {
            name: name.into(),
            health: base_max_health,
            base_max_health,
            base_armor_class,
            destroyed: false,
            capabilities: CapabilityFlags::empty(),
            modifiers: Vec::new(),
            statuses: ArrayVec::new(),
            next_instance: 0,
        }
    }

    /// Set capability flags (builder pattern).
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityFlags) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn base_max_health(&self) -> i32 {
        self.base_max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    // ========================================================================
    // Stat queries
    // ========================================================================

    /// Effective value of any attribute channel against a caller-supplied
    /// base.
    pub fn gather(&self, attribute: Attribute, base: f64) -> f64 {
        gather_attribute_value(Some(self), attribute, base)
    }

    /// [`Self::gather`] with contributing modifiers itemized.
    pub fn gather_breakdown(&self, attribute: Attribute, base: f64) -> AttributeBreakdown {
        gather_with_breakdown(Some(self), attribute, base)
    }

    /// Modifier-adjusted maximum health.
    pub fn max_health(&self) -> i32 {
        gather_rounded(Some(self), Attribute::MaxHealth, self.base_max_health as f64).max(0)
    }

    /// Modifier-adjusted armor class.
    pub fn armor_class(&self) -> i32 {
        gather_rounded(Some(self), Attribute::ArmorClass, self.base_armor_class as f64)
    }

    // ========================================================================
    // Modifier collection
    // ========================================================================

    pub fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    pub fn add_modifier(&mut self, modifier: AttributeModifier) {
        self.modifiers.push(modifier);
    }

    /// Remove every modifier registered by `source`. Returns the count
    /// removed.
    pub fn remove_modifiers_from_source(&mut self, source: ModifierSource) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.source != source);
        before - self.modifiers.len()
    }

    /// Strip dispellable modifiers not owned by a live status instance.
    ///
    /// Modifiers materialized by a live status are governed by that
    /// instance; removing them goes through
    /// [`Self::remove_status_effect`].
    pub fn dispel_modifiers(&mut self) -> usize {
        let live: Vec<StatusInstanceId> = self.statuses.iter().map(|s| s.instance()).collect();
        let before = self.modifiers.len();
        self.modifiers.retain(|m| {
            if !m.is_dispellable() {
                return true;
            }
            match m.source {
                ModifierSource::Status(id) => live.contains(&id),
                _ => false,
            }
        });
        before - self.modifiers.len()
    }

    // ========================================================================
    // Damage / heal
    // ========================================================================

    /// Apply raw damage, clamping health into `[0, max_health()]`.
    ///
    /// Crossing to zero flips the destroyed flag exactly once; damage
    /// against an already-destroyed entity is a no-op.
    pub fn take_damage(&mut self, amount: i32, events: &mut EventLog) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::default();
        }

        let max = self.max_health();
        let before = self.health.clamp(0, max);
        let after = (before - amount.max(0)).clamp(0, max);
        self.health = after;

        let destroyed_now = after == 0 && (before > 0 || max == 0);
        if destroyed_now {
            self.destroyed = true;
        }

        let applied = before - after;
        if applied > 0 || destroyed_now {
            events.push(SimEvent::DamageTaken {
                target: self.name.clone(),
                amount: applied,
                destroyed: destroyed_now,
            });
        }

        DamageOutcome {
            applied,
            destroyed_now,
        }
    }

    /// Apply damage reduced by the matching resistance channel.
    ///
    /// Resistance is a 0..1 fraction; values outside that range are clamped
    /// before use.
    pub fn take_typed_damage(
        &mut self,
        amount: i32,
        damage_type: DamageType,
        events: &mut EventLog,
    ) -> DamageOutcome {
        let resistance = self
            .gather(Attribute::Resistance(damage_type), 0.0)
            .clamp(0.0, 1.0);
        let reduced = ((amount.max(0) as f64) * (1.0 - resistance)).round() as i32;
        self.take_damage(reduced, events)
    }

    /// Restore health, clamped to the modifier-adjusted maximum.
    ///
    /// Returns the health actually restored. No-op on a destroyed entity;
    /// use [`Self::repair`] to bring one back.
    pub fn heal(&mut self, amount: i32, events: &mut EventLog) -> i32 {
        if self.destroyed {
            return 0;
        }

        let max = self.max_health();
        let before = self.health;
        self.health = (before + amount.max(0)).clamp(0, max);

        let applied = self.health - before;
        if applied > 0 {
            events.push(SimEvent::Healed {
                target: self.name.clone(),
                amount: applied,
            });
        }
        applied
    }

    /// External repair: clears the destroyed flag and restores health.
    ///
    /// This is the only path back from destruction; it re-enables whatever
    /// the flag was blocking (power regeneration, accessibility).
    pub fn repair(&mut self, amount: i32, events: &mut EventLog) -> i32 {
        if amount <= 0 {
            return 0;
        }
        self.destroyed = false;
        self.heal(amount, events)
    }

    // ========================================================================
    // Status-effect lifecycle
    // ========================================================================

    pub fn active_statuses(&self) -> &[AppliedStatusEffect] {
        &self.statuses
    }

    /// True if any live instance of the template's identity is attached.
    pub fn has_status(&self, template: &StatusEffectTemplate) -> bool {
        self.statuses.iter().any(|s| s.same_identity(template))
    }

    /// True while any live effect bars the entity from acting.
    pub fn blocks_actions(&self) -> bool {
        self.statuses.iter().any(|s| s.template().blocks_actions())
    }

    /// Apply a status-effect template, running stacking resolution against
    /// any live instance of the same identity.
    ///
    /// Returns the live instance id after resolution: the freshly
    /// materialized one, or the retained existing one when the incoming
    /// application loses the stacking comparison. Returns `None` when the
    /// capability gate rejects the target (with a warning; never an error).
    pub fn apply_status_effect(
        &mut self,
        template: &Arc<StatusEffectTemplate>,
        applier: ModifierSource,
        events: &mut EventLog,
    ) -> Option<StatusInstanceId> {
        if !self.capabilities.contains(template.required_capabilities())
            || self.capabilities.intersects(template.excluded_capabilities())
        {
            tracing::warn!(
                entity = %self.name,
                effect = template.name(),
                "status effect rejected by capability gate"
            );
            events.push(SimEvent::StatusRejected {
                target: self.name.clone(),
                effect: template.name().to_string(),
            });
            return None;
        }

        if let Some(index) = self.statuses.iter().position(|s| s.same_identity(template)) {
            let existing = &self.statuses[index];
            let incoming_magnitude = template.magnitude();
            let existing_magnitude = existing.template().magnitude();

            let replace = if incoming_magnitude != existing_magnitude {
                incoming_magnitude > existing_magnitude
            } else {
                // Equal magnitude: incoming base duration must beat the
                // existing instance's remaining turns.
                let incoming_base = if template.is_indefinite() {
                    i32::MAX
                } else {
                    template.base_duration()
                };
                incoming_base > existing.effective_remaining()
            };

            if !replace {
                // The weaker (or not-longer) application has no effect at
                // all, not even a duration refresh.
                return Some(existing.instance());
            }

            let displaced = self.statuses.remove(index);
            self.remove_modifiers_from_source(ModifierSource::Status(displaced.instance()));
            events.push(SimEvent::StatusReplaced {
                target: self.name.clone(),
                effect: displaced.template().name().to_string(),
            });
        } else if self.statuses.is_full() {
            tracing::warn!(
                entity = %self.name,
                effect = template.name(),
                "status effect list full"
            );
            events.push(SimEvent::StatusRejected {
                target: self.name.clone(),
                effect: template.name().to_string(),
            });
            return None;
        }

        Some(self.materialize_status(template, applier, events))
    }

    fn materialize_status(
        &mut self,
        template: &Arc<StatusEffectTemplate>,
        applier: ModifierSource,
        events: &mut EventLog,
    ) -> StatusInstanceId {
        let instance = StatusInstanceId(self.next_instance);
        self.next_instance += 1;

        for blueprint in template.modifiers() {
            self.modifiers.push(blueprint.materialize(instance));
        }

        let applied = AppliedStatusEffect::new(Arc::clone(template), applier, instance);
        events.push(SimEvent::StatusApplied {
            target: self.name.clone(),
            effect: template.name().to_string(),
            duration: applied.turns_remaining(),
        });
        self.statuses.push(applied);
        instance
    }

    /// Remove a live instance of the template's identity, stripping its
    /// modifiers. Returns true if one was removed.
    pub fn remove_status_effect(&mut self, template: &StatusEffectTemplate) -> bool {
        match self.statuses.iter().position(|s| s.same_identity(template)) {
            Some(index) => {
                let removed = self.statuses.remove(index);
                self.remove_modifiers_from_source(ModifierSource::Status(removed.instance()));
                true
            }
            None => false,
        }
    }

    /// Bulk-remove every active effect applied by `source`. Returns the
    /// count removed.
    pub fn remove_status_effects_from_source(&mut self, source: ModifierSource) -> usize {
        let mut removed = 0;
        for index in (0..self.statuses.len()).rev() {
            if self.statuses[index].applier() == source {
                let displaced = self.statuses.remove(index);
                self.remove_modifiers_from_source(ModifierSource::Status(displaced.instance()));
                removed += 1;
            }
        }
        removed
    }

    /// Once-per-turn status pass: run periodic ticks, then decrement and
    /// expire.
    ///
    /// Tick hooks run over a snapshot because they mutate the entity (and
    /// a damage tick may destroy it mid-pass); the live collection is then
    /// walked in reverse-index order for expiry. Indefinite instances are
    /// never decremented; double expiry is impossible because expired
    /// instances are removed in the same pass.
    pub fn update_status_effects(&mut self, events: &mut EventLog) -> StatusTickReport {
        let mut report = StatusTickReport::default();

        let ticks: Vec<crate::status::TickBlueprint> = self
            .statuses
            .iter()
            .flat_map(|s| s.template().ticks().iter().copied())
            .collect();

        for tick in ticks {
            match tick.kind {
                TickKind::Damage(damage_type) => {
                    let outcome = self.take_typed_damage(tick.amount, damage_type, events);
                    report.destroyed_now |= outcome.destroyed_now;
                }
                TickKind::Heal => {
                    self.heal(tick.amount, events);
                }
                TickKind::EnergyDrain => report.energy_delta -= tick.amount,
                TickKind::EnergyRestore => report.energy_delta += tick.amount,
            }
        }

        for index in (0..self.statuses.len()).rev() {
            if self.statuses[index].advance_turn() {
                let expired = self.statuses.remove(index);
                self.remove_modifiers_from_source(ModifierSource::Status(expired.instance()));
                events.push(SimEvent::StatusExpired {
                    target: self.name.clone(),
                    effect: expired.template().name().to_string(),
                });
            }
        }

        report
    }
}
