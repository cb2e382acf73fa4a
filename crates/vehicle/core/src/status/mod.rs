//! Status-effect lifecycle types.
//!
//! Templates are immutable shared definitions; applied instances hold the
//! per-target countdown state. The lifecycle operations themselves
//! (apply/stack/tick/expire) live on [`Entity`](crate::entity::Entity),
//! which owns both the instance list and the materialized modifiers.

pub mod applied;
pub mod template;

pub use applied::AppliedStatusEffect;
pub use template::{
    ModifierBlueprint, StatusEffectTemplate, StatusEffectTemplateBuilder, TemplateError,
    TickBlueprint, TickKind,
};
