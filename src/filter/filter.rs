//! The composable filter expression tree.

use serde::{Deserialize, Serialize};

use crate::filter::datemath::DateOperand;
use crate::filter::geo::LatLng;
use crate::filter::scope::Scope;

/// An immutable filter expression node.
///
/// Leaf filters carry the target field name, a [`Scope`], and their literal
/// operands; combinators own their child filters exclusively. Trees are built
/// through the associated factory functions (usually via a typed field
/// descriptor, which is the only way to guarantee operands match the field
/// kind) and handed opaquely to a backend translator.
///
/// Two filters are equal iff they have the same variant, field name, scope,
/// and structurally equal operands, recursively for combinators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// The field value equals the given text.
    Equals {
        field: String,
        text: String,
        scope: Scope,
    },
    /// The field value starts with the given text.
    Prefix {
        field: String,
        prefix: String,
        scope: Scope,
    },
    /// The numeric field value lies in `[start, end]`.
    Between {
        field: String,
        start: f64,
        end: f64,
        scope: Scope,
    },
    /// The numeric field value is strictly greater than the bound.
    GreaterThan {
        field: String,
        bound: f64,
        scope: Scope,
    },
    /// The numeric field value is strictly lesser than the bound.
    LesserThan {
        field: String,
        bound: f64,
        scope: Scope,
    },
    /// The date field value lies between two points in time.
    BetweenDates {
        field: String,
        start: DateOperand,
        end: DateOperand,
        scope: Scope,
    },
    /// The date field value is before a point in time.
    Before {
        field: String,
        bound: DateOperand,
        scope: Scope,
    },
    /// The date field value is after a point in time.
    After {
        field: String,
        bound: DateOperand,
        scope: Scope,
    },
    /// The location field value lies within a bounding box.
    WithinBBox {
        field: String,
        upper_left: LatLng,
        lower_right: LatLng,
        scope: Scope,
    },
    /// The location field value lies within a circle.
    WithinCircle {
        field: String,
        center: LatLng,
        radius_km: f64,
        scope: Scope,
    },
    /// The location field has a value.
    NotEmptyLocation { field: String, scope: Scope },
    /// Logical negation of the child filter.
    Not { operand: Box<Filter>, scope: Scope },
    /// Logical conjunction of the child filters.
    And { operands: Vec<Filter>, scope: Scope },
    /// Logical disjunction of the child filters.
    Or { operands: Vec<Filter>, scope: Scope },
}

impl Filter {
    /// Create a text equality filter.
    pub fn eq<F, T>(field: F, text: T) -> Filter
    where
        F: Into<String>,
        T: Into<String>,
    {
        Filter::Equals {
            field: field.into(),
            text: text.into(),
            scope: Scope::default(),
        }
    }

    /// Create a text prefix filter.
    pub fn prefix<F, T>(field: F, prefix: T) -> Filter
    where
        F: Into<String>,
        T: Into<String>,
    {
        Filter::Prefix {
            field: field.into(),
            prefix: prefix.into(),
            scope: Scope::default(),
        }
    }

    /// Create a numeric range filter over `[start, end]`.
    ///
    /// Bounds are stored verbatim: callers must pass `start <= end`.
    /// Reversed bounds are not reordered and denote a range matching no
    /// document; `start == end` denotes the zero-width range matching
    /// exactly that value.
    pub fn between<F, N>(field: F, start: N, end: N) -> Filter
    where
        F: Into<String>,
        N: Into<f64>,
    {
        Filter::Between {
            field: field.into(),
            start: start.into(),
            end: end.into(),
            scope: Scope::default(),
        }
    }

    /// Create a filter matching values greater than the given number.
    pub fn greater_than<F, N>(field: F, bound: N) -> Filter
    where
        F: Into<String>,
        N: Into<f64>,
    {
        Filter::GreaterThan {
            field: field.into(),
            bound: bound.into(),
            scope: Scope::default(),
        }
    }

    /// Create a filter matching values lesser than the given number.
    pub fn lesser_than<F, N>(field: F, bound: N) -> Filter
    where
        F: Into<String>,
        N: Into<f64>,
    {
        Filter::LesserThan {
            field: field.into(),
            bound: bound.into(),
            scope: Scope::default(),
        }
    }

    /// Create a date range filter over `[start, end]`.
    ///
    /// Operands may be absolute instants (any offset, normalized to UTC),
    /// legacy absolute instants, or unresolved date-math expressions. Bounds
    /// are stored verbatim, as with [`Filter::between`].
    pub fn between_dates<F, D>(field: F, start: D, end: D) -> Filter
    where
        F: Into<String>,
        D: Into<DateOperand>,
    {
        Filter::BetweenDates {
            field: field.into(),
            start: start.into(),
            end: end.into(),
            scope: Scope::default(),
        }
    }

    /// Create a filter matching dates before the given point in time.
    pub fn before<F, D>(field: F, bound: D) -> Filter
    where
        F: Into<String>,
        D: Into<DateOperand>,
    {
        Filter::Before {
            field: field.into(),
            bound: bound.into(),
            scope: Scope::default(),
        }
    }

    /// Create a filter matching dates after the given point in time.
    pub fn after<F, D>(field: F, bound: D) -> Filter
    where
        F: Into<String>,
        D: Into<DateOperand>,
    {
        Filter::After {
            field: field.into(),
            bound: bound.into(),
            scope: Scope::default(),
        }
    }

    /// Create a bounding-box filter.
    ///
    /// The two corners are stored verbatim; corner order is not normalized.
    pub fn within_bbox<F: Into<String>>(
        field: F,
        upper_left: LatLng,
        lower_right: LatLng,
    ) -> Filter {
        Filter::WithinBBox {
            field: field.into(),
            upper_left,
            lower_right,
            scope: Scope::default(),
        }
    }

    /// Create a circle filter with a radius in kilometers.
    pub fn within_circle<F: Into<String>>(field: F, center: LatLng, radius_km: f64) -> Filter {
        Filter::WithinCircle {
            field: field.into(),
            center,
            radius_km,
            scope: Scope::default(),
        }
    }

    /// Create a filter matching documents whose location field has a value.
    pub fn not_empty_location<F: Into<String>>(field: F) -> Filter {
        Filter::NotEmptyLocation {
            field: field.into(),
            scope: Scope::default(),
        }
    }

    /// Negate a filter.
    ///
    /// A double negation collapses: `not(not(f))` returns `f` unchanged,
    /// with its original scope.
    pub fn not(operand: Filter) -> Filter {
        match operand {
            Filter::Not { operand, .. } => *operand,
            other => Filter::Not {
                operand: Box::new(other),
                scope: Scope::default(),
            },
        }
    }

    /// Combine filters into a conjunction.
    ///
    /// The combinator carries its own scope, independent of its children.
    /// Mixing children with differing scopes is legal; the translator decides
    /// how to honor per-child scope.
    pub fn all(operands: Vec<Filter>) -> Filter {
        warn_on_mixed_scopes("and", &operands);
        Filter::And {
            operands,
            scope: Scope::default(),
        }
    }

    /// Combine filters into a disjunction.
    pub fn any(operands: Vec<Filter>) -> Filter {
        warn_on_mixed_scopes("or", &operands);
        Filter::Or {
            operands,
            scope: Scope::default(),
        }
    }

    /// Conjunction sugar: `a.and(b)` is `Filter::all(vec![a, b])`.
    pub fn and(self, other: Filter) -> Filter {
        Filter::all(vec![self, other])
    }

    /// Disjunction sugar: `a.or(b)` is `Filter::any(vec![a, b])`.
    pub fn or(self, other: Filter) -> Filter {
        Filter::any(vec![self, other])
    }

    /// Negation sugar: `f.negate()` is `Filter::not(f)`.
    pub fn negate(self) -> Filter {
        Filter::not(self)
    }

    /// Replace this filter's own scope.
    pub fn with_scope(mut self, scope: Scope) -> Filter {
        *self.scope_mut() = scope;
        self
    }

    /// Get this filter's scope.
    pub fn scope(&self) -> Scope {
        match self {
            Filter::Equals { scope, .. }
            | Filter::Prefix { scope, .. }
            | Filter::Between { scope, .. }
            | Filter::GreaterThan { scope, .. }
            | Filter::LesserThan { scope, .. }
            | Filter::BetweenDates { scope, .. }
            | Filter::Before { scope, .. }
            | Filter::After { scope, .. }
            | Filter::WithinBBox { scope, .. }
            | Filter::WithinCircle { scope, .. }
            | Filter::NotEmptyLocation { scope, .. }
            | Filter::Not { scope, .. }
            | Filter::And { scope, .. }
            | Filter::Or { scope, .. } => *scope,
        }
    }

    fn scope_mut(&mut self) -> &mut Scope {
        match self {
            Filter::Equals { scope, .. }
            | Filter::Prefix { scope, .. }
            | Filter::Between { scope, .. }
            | Filter::GreaterThan { scope, .. }
            | Filter::LesserThan { scope, .. }
            | Filter::BetweenDates { scope, .. }
            | Filter::Before { scope, .. }
            | Filter::After { scope, .. }
            | Filter::WithinBBox { scope, .. }
            | Filter::WithinCircle { scope, .. }
            | Filter::NotEmptyLocation { scope, .. }
            | Filter::Not { scope, .. }
            | Filter::And { scope, .. }
            | Filter::Or { scope, .. } => scope,
        }
    }

    /// Get the field name this filter targets.
    ///
    /// Returns `None` for combinators, which target no single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Filter::Equals { field, .. }
            | Filter::Prefix { field, .. }
            | Filter::Between { field, .. }
            | Filter::GreaterThan { field, .. }
            | Filter::LesserThan { field, .. }
            | Filter::BetweenDates { field, .. }
            | Filter::Before { field, .. }
            | Filter::After { field, .. }
            | Filter::WithinBBox { field, .. }
            | Filter::WithinCircle { field, .. }
            | Filter::NotEmptyLocation { field, .. } => Some(field),
            Filter::Not { .. } | Filter::And { .. } | Filter::Or { .. } => None,
        }
    }

    /// Get the child filters of a combinator; empty for leaf filters.
    pub fn children(&self) -> &[Filter] {
        match self {
            Filter::Not { operand, .. } => std::slice::from_ref(&**operand),
            Filter::And { operands, .. } | Filter::Or { operands, .. } => operands,
            _ => &[],
        }
    }

    /// Whether this combinator's direct children carry differing scopes.
    ///
    /// Always `false` for leaf filters. The combinator's own scope is
    /// unaffected; resolving the mix is translator policy.
    pub fn has_mixed_scopes(&self) -> bool {
        match self.children().split_first() {
            Some((first, rest)) => rest.iter().any(|child| child.scope() != first.scope()),
            None => false,
        }
    }

    /// Get a human-readable description of this filter.
    pub fn description(&self) -> String {
        match self {
            Filter::Equals { field, text, scope } => {
                format!("Equals(field:{field}, text:{text}, scope:{scope:?})")
            }
            Filter::Prefix {
                field,
                prefix,
                scope,
            } => format!("Prefix(field:{field}, prefix:{prefix}, scope:{scope:?})"),
            Filter::Between {
                field,
                start,
                end,
                scope,
            } => format!("Between(field:{field}, start:{start}, end:{end}, scope:{scope:?})"),
            Filter::GreaterThan {
                field,
                bound,
                scope,
            } => format!("GreaterThan(field:{field}, bound:{bound}, scope:{scope:?})"),
            Filter::LesserThan {
                field,
                bound,
                scope,
            } => format!("LesserThan(field:{field}, bound:{bound}, scope:{scope:?})"),
            Filter::BetweenDates {
                field,
                start,
                end,
                scope,
            } => {
                format!("BetweenDates(field:{field}, start:{start:?}, end:{end:?}, scope:{scope:?})")
            }
            Filter::Before {
                field,
                bound,
                scope,
            } => format!("Before(field:{field}, bound:{bound:?}, scope:{scope:?})"),
            Filter::After {
                field,
                bound,
                scope,
            } => format!("After(field:{field}, bound:{bound:?}, scope:{scope:?})"),
            Filter::WithinBBox {
                field,
                upper_left,
                lower_right,
                scope,
            } => format!(
                "WithinBBox(field:{field}, upperLeft:{upper_left}, lowerRight:{lower_right}, scope:{scope:?})"
            ),
            Filter::WithinCircle {
                field,
                center,
                radius_km,
                scope,
            } => format!(
                "WithinCircle(field:{field}, center:{center}, radiusKm:{radius_km}, scope:{scope:?})"
            ),
            Filter::NotEmptyLocation { field, scope } => {
                format!("NotEmptyLocation(field:{field}, scope:{scope:?})")
            }
            Filter::Not { operand, scope } => {
                format!("Not({}, scope:{scope:?})", operand.description())
            }
            Filter::And { operands, scope } => {
                let children: Vec<String> =
                    operands.iter().map(|child| child.description()).collect();
                format!("And([{}], scope:{scope:?})", children.join(", "))
            }
            Filter::Or { operands, scope } => {
                let children: Vec<String> =
                    operands.iter().map(|child| child.description()).collect();
                format!("Or([{}], scope:{scope:?})", children.join(", "))
            }
        }
    }
}

fn warn_on_mixed_scopes(combinator: &str, operands: &[Filter]) {
    if let Some((first, rest)) = operands.split_first() {
        if rest.iter().any(|child| child.scope() != first.scope()) {
            tracing::warn!(
                combinator,
                "combinator mixes children with differing scopes; translator policy applies"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::filter::datemath::DateMathExpression;

    #[test]
    fn test_structural_equality() {
        let a = Filter::between("price", 10, 20);
        let b = Filter::between("price", 10, 20);
        assert_eq!(a, b);

        assert_ne!(a, Filter::between("price", 10, 21));
        assert_ne!(a, Filter::between("cost", 10, 20));
        assert_ne!(a, Filter::between("price", 10, 20).with_scope(Scope::Facet));
    }

    #[test]
    fn test_bounds_are_stored_verbatim() {
        match Filter::between("price", 20, 10) {
            Filter::Between { start, end, .. } => {
                assert_eq!(start, 20.0);
                assert_eq!(end, 10.0);
            }
            other => panic!("unexpected filter: {other:?}"),
        }

        let zero_width = Filter::between("price", 10, 10);
        assert_eq!(zero_width, Filter::between("price", 10, 10));
    }

    #[test]
    fn test_double_negation_collapses() {
        let base = Filter::not_empty_location("location").with_scope(Scope::Facet);
        let negated = Filter::not(base.clone());

        assert_ne!(negated, base);
        assert_eq!(Filter::not(negated), base);
    }

    #[test]
    fn test_combinator_children_and_field() {
        let tree = Filter::between("price", 10, 20).and(Filter::greater_than("price", 100));

        assert_eq!(tree.field(), None);
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].field(), Some("price"));
        assert_eq!(tree.children()[1].field(), Some("price"));

        let leaf = Filter::eq("title", "sedge");
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.field(), Some("title"));
    }

    #[test]
    fn test_combinator_scope_is_independent() {
        let mixed = Filter::all(vec![
            Filter::eq("category", "news").with_scope(Scope::Result),
            Filter::eq("tag", "sports").with_scope(Scope::Facet),
        ]);

        assert_eq!(mixed.scope(), Scope::Both);
        assert!(mixed.has_mixed_scopes());
        assert_eq!(mixed.children()[0].scope(), Scope::Result);
        assert_eq!(mixed.children()[1].scope(), Scope::Facet);

        let uniform = Filter::any(vec![
            Filter::eq("category", "news"),
            Filter::eq("category", "sports"),
        ]);
        assert!(!uniform.has_mixed_scopes());
        assert!(!Filter::eq("category", "news").has_mixed_scopes());
    }

    #[test]
    fn test_serde_round_trip() {
        let reference = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let tree = Filter::all(vec![
            Filter::between("price", 10, 20),
            Filter::after("created", DateMathExpression::parse("NOW-7DAYS").unwrap()),
            Filter::before("created", reference),
            Filter::not(Filter::eq("category", "archived")),
        ]);

        let json = serde_json::to_string(&tree).unwrap();
        let decoded: Filter = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, tree);
    }

    #[test]
    fn test_description() {
        let filter = Filter::between("price", 10, 20);
        let description = filter.description();
        assert!(description.contains("price"));
        assert!(description.contains("10"));
        assert!(description.contains("20"));
    }
}
