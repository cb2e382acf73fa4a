//! Live status-effect instances.

use std::sync::Arc;

use crate::stats::{ModifierSource, StatusInstanceId};

use super::template::StatusEffectTemplate;

/// A template bound to one target: shared definition plus per-instance
/// countdown state.
///
/// The materialized modifiers live in the target's modifier collection,
/// tagged `ModifierSource::Status(instance)`; stripping them on expiry or
/// replacement is a bulk remove by that source.
#[derive(Clone, Debug)]
pub struct AppliedStatusEffect {
    template: Arc<StatusEffectTemplate>,
    applier: ModifierSource,
    instance: StatusInstanceId,
    turns_remaining: i32,
}

impl AppliedStatusEffect {
    pub fn new(
        template: Arc<StatusEffectTemplate>,
        applier: ModifierSource,
        instance: StatusInstanceId,
    ) -> Self {
        let turns_remaining = template.base_duration();
        Self {
            template,
            applier,
            instance,
            turns_remaining,
        }
    }

    pub fn template(&self) -> &Arc<StatusEffectTemplate> {
        &self.template
    }

    pub fn applier(&self) -> ModifierSource {
        self.applier
    }

    pub fn instance(&self) -> StatusInstanceId {
        self.instance
    }

    /// Turns left before expiry; negative for indefinite instances.
    pub fn turns_remaining(&self) -> i32 {
        self.turns_remaining
    }

    pub fn is_indefinite(&self) -> bool {
        self.turns_remaining < 0
    }

    /// Remaining turns with the indefinite sentinel mapped to unbounded,
    /// for duration comparisons in stacking resolution.
    pub fn effective_remaining(&self) -> i32 {
        if self.is_indefinite() {
            i32::MAX
        } else {
            self.turns_remaining
        }
    }

    /// Shares the stacking identity (template name) with `template`.
    pub fn same_identity(&self, template: &StatusEffectTemplate) -> bool {
        self.template.name() == template.name()
    }

    /// Decrement the countdown. Indefinite instances are never decremented.
    ///
    /// Returns true if the instance is now expired.
    pub(crate) fn advance_turn(&mut self) -> bool {
        if self.turns_remaining < 0 {
            return false;
        }
        self.turns_remaining -= 1;
        self.turns_remaining <= 0
    }
}
