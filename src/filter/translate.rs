//! The outbound translation boundary.
//!
//! The core never renders backend syntax itself: a finished [`Filter`] tree
//! is handed to a [`FilterTranslator`], which walks the closed set of
//! variants and emits its engine's native query fragments.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::filter::filter::Filter;

/// Implemented by backend adapters that turn a [`Filter`] tree into a
/// native query fragment.
///
/// An implementation must handle every [`Filter`] variant and honor each
/// node's [`Scope`](crate::filter::Scope), including per-child scopes under
/// a combinator, which the core deliberately does not merge.
pub trait FilterTranslator {
    /// The backend-native query fragment type.
    type Output;

    /// The reference instant used to resolve relative date expressions.
    ///
    /// Consulted at translation time and never cached by the core, so
    /// "now"-relative filters track the actual execution time of each query.
    fn reference_time(&self) -> DateTime<Utc>;

    /// Translate a filter tree into a native query fragment.
    fn translate(&self, filter: &Filter) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::filter::datemath::DateMathExpression;
    use crate::filter::geo::LatLng;
    use crate::filter::scope::Scope;

    /// Minimal translator emitting a Lucene-flavored query string.
    struct QueryStringTranslator {
        now: DateTime<Utc>,
    }

    impl FilterTranslator for QueryStringTranslator {
        type Output = String;

        fn reference_time(&self) -> DateTime<Utc> {
            self.now
        }

        fn translate(&self, filter: &Filter) -> Result<String> {
            let now = self.reference_time();
            let fragment = match filter {
                Filter::Equals { field, text, .. } => format!("{field}:{text}"),
                Filter::Prefix { field, prefix, .. } => format!("{field}:{prefix}*"),
                Filter::Between {
                    field, start, end, ..
                } => format!("{field}:[{start} TO {end}]"),
                Filter::GreaterThan { field, bound, .. } => {
                    format!("{field}:{{{bound} TO *]")
                }
                Filter::LesserThan { field, bound, .. } => {
                    format!("{field}:[* TO {bound}}}")
                }
                Filter::BetweenDates {
                    field, start, end, ..
                } => format!(
                    "{field}:[{} TO {}]",
                    start.resolve(now).to_rfc3339(),
                    end.resolve(now).to_rfc3339()
                ),
                Filter::Before { field, bound, .. } => {
                    format!("{field}:[* TO {}}}", bound.resolve(now).to_rfc3339())
                }
                Filter::After { field, bound, .. } => {
                    format!("{field}:{{{} TO *]", bound.resolve(now).to_rfc3339())
                }
                Filter::WithinBBox {
                    field,
                    upper_left,
                    lower_right,
                    ..
                } => format!("{field}:bbox({upper_left} {lower_right})"),
                Filter::WithinCircle {
                    field,
                    center,
                    radius_km,
                    ..
                } => format!("{field}:circle({center} {radius_km})"),
                Filter::NotEmptyLocation { field, .. } => format!("{field}:*"),
                Filter::Not { operand, .. } => format!("NOT ({})", self.translate(operand)?),
                Filter::And { operands, .. } => {
                    let parts: Result<Vec<String>> =
                        operands.iter().map(|child| self.translate(child)).collect();
                    format!("({})", parts?.join(" AND "))
                }
                Filter::Or { operands, .. } => {
                    let parts: Result<Vec<String>> =
                        operands.iter().map(|child| self.translate(child)).collect();
                    format!("({})", parts?.join(" OR "))
                }
            };

            Ok(if filter.scope() == Scope::Facet {
                format!("facet({fragment})")
            } else {
                fragment
            })
        }
    }

    fn translator() -> QueryStringTranslator {
        QueryStringTranslator {
            now: Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_translates_every_leaf_kind() {
        let translator = translator();
        let center = LatLng::new(47.8, 13.04).unwrap();
        let corner = LatLng::new(48.0, 12.9).unwrap();

        let cases = vec![
            Filter::eq("title", "sedge"),
            Filter::prefix("title", "sed"),
            Filter::between("price", 10, 20),
            Filter::greater_than("price", 100),
            Filter::lesser_than("price", 5),
            Filter::between_dates(
                "created",
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
            ),
            Filter::before("created", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            Filter::after("created", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            Filter::within_bbox("location", corner, center),
            Filter::within_circle("location", center, 10.0),
            Filter::not_empty_location("location"),
        ];

        for filter in cases {
            let fragment = translator.translate(&filter).unwrap();
            assert!(
                fragment.contains(filter.field().unwrap()),
                "fragment '{fragment}' misses field"
            );
        }
    }

    #[test]
    fn test_translates_combinators_and_scope() {
        let translator = translator();
        let tree = Filter::not(Filter::eq("category", "archived"))
            .and(Filter::eq("tag", "sports").with_scope(Scope::Facet));

        let fragment = translator.translate(&tree).unwrap();
        assert_eq!(
            fragment,
            "(NOT (category:archived) AND facet(tag:sports))"
        );
    }

    #[test]
    fn test_date_math_tracks_reference_time() {
        let filter = Filter::after("created", DateMathExpression::parse("NOW-1DAY").unwrap());

        let earlier = translator();
        let later = QueryStringTranslator {
            now: earlier.now + Duration::hours(1),
        };

        let first = earlier.translate(&filter).unwrap();
        let second = later.translate(&filter).unwrap();
        assert_ne!(first, second);
        assert!(first.contains("2020-06-14T12:00:00+00:00"));
        assert!(second.contains("2020-06-14T13:00:00+00:00"));
    }
}
