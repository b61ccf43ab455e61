//! Filter construction for search queries.

pub mod datemath;
#[allow(clippy::module_inception)]
pub mod filter;
pub mod geo;
pub mod scope;
pub mod translate;

pub use self::datemath::{DateMathExpression, DateOperand, TimeUnit};
pub use self::filter::Filter;
pub use self::geo::LatLng;
pub use self::scope::{LOCATION_EMPTINESS_SCOPE, Scope};
pub use self::translate::FilterTranslator;
