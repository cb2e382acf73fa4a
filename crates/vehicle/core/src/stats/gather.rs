//! Effective attribute resolution.
//!
//! Folds an entity's registered modifiers over a base value in a fixed
//! order: flats fully accumulate first, then every multiplier applies to the
//! flat-adjusted total. Multiplication is commutative, so multiplier order
//! never changes the result.
//!
//! Formula: `(base + Σflat) × Πmultiplier`

use crate::entity::Entity;

use super::attribute::Attribute;
use super::modifier::{AttributeModifier, ModifierKind};

/// Resolve the effective value of one attribute channel.
///
/// An absent entity resolves to the base value unchanged; callers holding an
/// optional target never need a special case.
///
/// Pure: no side effects, no rounding. Use [`gather_rounded`] at boundaries
/// that require discrete values.
pub fn gather_attribute_value(entity: Option<&Entity>, attribute: Attribute, base: f64) -> f64 {
    match entity {
        Some(entity) => resolve(entity.modifiers(), attribute, base),
        None => base,
    }
}

/// [`gather_attribute_value`] rounded to the nearest integer.
///
/// Rounding happens only here, at the discrete-value boundary; intermediate
/// math stays fractional.
pub fn gather_rounded(entity: Option<&Entity>, attribute: Attribute, base: f64) -> i32 {
    gather_attribute_value(entity, attribute, base).round() as i32
}

/// One modifier's contribution inside an [`AttributeBreakdown`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BreakdownEntry {
    pub kind: ModifierKind,
    pub value: f64,
    pub category: crate::stats::ModifierCategory,
    pub source: crate::stats::ModifierSource,
    pub label: Option<&'static str>,
}

/// Resolution result with the contributing modifiers itemized.
///
/// Zero-effect modifiers (flat 0, multiplier 1) remain registered on the
/// entity but are excluded from `contributions`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeBreakdown {
    pub total: f64,
    pub base: f64,
    pub contributions: Vec<BreakdownEntry>,
}

/// Resolve an attribute and itemize every modifier with a non-zero effect.
pub fn gather_with_breakdown(
    entity: Option<&Entity>,
    attribute: Attribute,
    base: f64,
) -> AttributeBreakdown {
    let modifiers = entity.map(Entity::modifiers).unwrap_or(&[]);

    let contributions = modifiers
        .iter()
        .filter(|m| m.attribute == attribute && m.has_effect())
        .map(|m| BreakdownEntry {
            kind: m.kind,
            value: m.value,
            category: m.category,
            source: m.source,
            label: m.label,
        })
        .collect();

    AttributeBreakdown {
        total: resolve(modifiers, attribute, base),
        base,
        contributions,
    }
}

fn resolve(modifiers: &[AttributeModifier], attribute: Attribute, base: f64) -> f64 {
    // Step 1: Sum all flat modifiers
    let flat_sum: f64 = modifiers
        .iter()
        .filter_map(|m| match m.kind {
            ModifierKind::Flat if m.attribute == attribute => Some(m.value),
            _ => None,
        })
        .sum();

    // Step 2: Apply every multiplier to the flat-adjusted total
    modifiers
        .iter()
        .filter_map(|m| match m.kind {
            ModifierKind::Multiplier if m.attribute == attribute => Some(m.value),
            _ => None,
        })
        .fold(base + flat_sum, |acc, ratio| acc * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ModifierCategory, ModifierSource};

    fn flat(attribute: Attribute, value: f64) -> AttributeModifier {
        AttributeModifier::flat(
            attribute,
            value,
            ModifierSource::Untracked,
            ModifierCategory::Other,
        )
    }

    fn mult(attribute: Attribute, value: f64) -> AttributeModifier {
        AttributeModifier::multiplier(
            attribute,
            value,
            ModifierSource::Untracked,
            ModifierCategory::Other,
        )
    }

    fn entity_with(modifiers: Vec<AttributeModifier>) -> Entity {
        let mut entity = Entity::new("test rig", 100, 10);
        for m in modifiers {
            entity.add_modifier(m);
        }
        entity
    }

    #[test]
    fn absent_entity_returns_base() {
        assert_eq!(gather_attribute_value(None, Attribute::Speed, 42.0), 42.0);
        assert_eq!(gather_rounded(None, Attribute::Speed, 42.4), 42);
    }

    #[test]
    fn flats_accumulate_before_multipliers() {
        let entity = entity_with(vec![
            flat(Attribute::Speed, 10.0),
            mult(Attribute::Speed, 2.0),
            flat(Attribute::Speed, 5.0),
        ]);

        // (20 + 10 + 5) × 2 = 70, not (20 + 10) × 2 + 5
        assert_eq!(
            gather_attribute_value(Some(&entity), Attribute::Speed, 20.0),
            70.0
        );
    }

    #[test]
    fn multiplier_order_is_commutative() {
        let forward = entity_with(vec![
            flat(Attribute::Speed, 3.0),
            mult(Attribute::Speed, 1.5),
            mult(Attribute::Speed, 0.5),
        ]);
        let backward = entity_with(vec![
            mult(Attribute::Speed, 0.5),
            mult(Attribute::Speed, 1.5),
            flat(Attribute::Speed, 3.0),
        ]);

        let a = gather_attribute_value(Some(&forward), Attribute::Speed, 10.0);
        let b = gather_attribute_value(Some(&backward), Attribute::Speed, 10.0);
        assert_eq!(a, b);
        assert_eq!(a, 9.75);
    }

    #[test]
    fn other_attributes_do_not_contribute() {
        let entity = entity_with(vec![
            flat(Attribute::ArmorClass, 100.0),
            mult(Attribute::MaxHealth, 3.0),
        ]);
        assert_eq!(
            gather_attribute_value(Some(&entity), Attribute::Speed, 12.0),
            12.0
        );
    }

    #[test]
    fn breakdown_excludes_zero_effect_modifiers() {
        let entity = entity_with(vec![
            flat(Attribute::Speed, 0.0),
            mult(Attribute::Speed, 1.0),
            flat(Attribute::Speed, 4.0),
        ]);

        let breakdown = gather_with_breakdown(Some(&entity), Attribute::Speed, 10.0);
        assert_eq!(breakdown.total, 14.0);
        assert_eq!(breakdown.base, 10.0);
        assert_eq!(breakdown.contributions.len(), 1);
        assert_eq!(breakdown.contributions[0].value, 4.0);

        // Zero-effect modifiers stay registered on the entity
        assert_eq!(entity.modifiers().len(), 3);
    }

    #[test]
    fn negative_flat_and_reducing_multiplier() {
        let entity = entity_with(vec![
            flat(Attribute::Stability, -4.0),
            mult(Attribute::Stability, 0.5),
        ]);
        // (10 - 4) × 0.5 = 3
        assert_eq!(
            gather_attribute_value(Some(&entity), Attribute::Stability, 10.0),
            3.0
        );
    }
}
