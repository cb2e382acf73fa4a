//! Modifier model and stat calculator.
//!
//! The modifier model is pure data ([`AttributeModifier`] and its
//! vocabularies); the calculator ([`gather_attribute_value`]) is a pure
//! function from base value + modifier collection to an effective value.

pub mod attribute;
pub mod gather;
pub mod modifier;

pub use attribute::{Attribute, DamageType};
pub use gather::{
    gather_attribute_value, gather_rounded, gather_with_breakdown, AttributeBreakdown,
    BreakdownEntry,
};
pub use modifier::{
    AttributeModifier, ComponentId, ModifierCategory, ModifierKind, ModifierSource,
    StatusInstanceId,
};
