//! Filter scope and the per-kind default-scope policy.

use serde::{Deserialize, Serialize};

use crate::schema::field::{FieldKind, Multiplicity};

/// Where a filter applies: result restriction, facet computation, or both.
///
/// A `Result`-scoped filter restricts the returned document set. A
/// `Facet`-scoped filter restricts which documents count toward facet and
/// aggregation computation, independent of the result restriction. `Both` is
/// the implicit default when no scope is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// Restricts the returned document set only.
    Result,
    /// Restricts facet/aggregation counting only.
    Facet,
    /// Restricts both the document set and facet counting.
    #[default]
    Both,
}

/// Scope stamped on location emptiness checks, regardless of cardinality.
pub const LOCATION_EMPTINESS_SCOPE: Scope = Scope::Facet;

impl Scope {
    /// Default scope for filters built by a field of the given kind and
    /// cardinality.
    ///
    /// This table is the single home of the convention that multi-valued
    /// text and legacy-timestamp fields are intended for faceted narrowing:
    /// every filter they generate carries `Facet` scope. All other
    /// combinations get the implicit default.
    pub fn default_for(kind: FieldKind, multiplicity: Multiplicity) -> Scope {
        match (kind, multiplicity) {
            (FieldKind::Text, Multiplicity::Multi) => Scope::Facet,
            (FieldKind::Timestamp, Multiplicity::Multi) => Scope::Facet,
            _ => Scope::Both,
        }
    }

    /// Whether filters with this scope restrict the returned document set.
    pub fn applies_to_results(&self) -> bool {
        matches!(self, Scope::Result | Scope::Both)
    }

    /// Whether filters with this scope restrict facet computation.
    pub fn applies_to_facets(&self) -> bool {
        matches!(self, Scope::Facet | Scope::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope_table() {
        assert_eq!(
            Scope::default_for(FieldKind::Text, Multiplicity::Multi),
            Scope::Facet
        );
        assert_eq!(
            Scope::default_for(FieldKind::Timestamp, Multiplicity::Multi),
            Scope::Facet
        );

        assert_eq!(
            Scope::default_for(FieldKind::Text, Multiplicity::Single),
            Scope::Both
        );
        assert_eq!(
            Scope::default_for(FieldKind::Timestamp, Multiplicity::Single),
            Scope::Both
        );
        assert_eq!(
            Scope::default_for(FieldKind::Numeric, Multiplicity::Multi),
            Scope::Both
        );
        assert_eq!(
            Scope::default_for(FieldKind::Date, Multiplicity::Multi),
            Scope::Both
        );
        assert_eq!(
            Scope::default_for(FieldKind::Location, Multiplicity::Multi),
            Scope::Both
        );
        assert_eq!(
            Scope::default_for(FieldKind::Binary, Multiplicity::Single),
            Scope::Both
        );
    }

    #[test]
    fn test_scope_predicates() {
        assert!(Scope::Result.applies_to_results());
        assert!(!Scope::Result.applies_to_facets());

        assert!(!Scope::Facet.applies_to_results());
        assert!(Scope::Facet.applies_to_facets());

        assert!(Scope::Both.applies_to_results());
        assert!(Scope::Both.applies_to_facets());
    }

    #[test]
    fn test_implicit_default() {
        assert_eq!(Scope::default(), Scope::Both);
        assert_eq!(LOCATION_EMPTINESS_SCOPE, Scope::Facet);
    }
}
