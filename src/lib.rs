//! # Sedge
//!
//! A backend-agnostic, typed query and filter construction library for
//! document search.
//!
//! ## Features
//!
//! - Typed field descriptors (numeric, date, legacy timestamp, text,
//!   location, binary; single- or multi-valued) exposing only the filter
//!   operations valid for their kind
//! - Composable, immutable filter trees with boolean combinators
//! - Result/facet scoping with a per-kind default-scope policy
//! - Relative date-math expressions resolved at translation time
//! - A translator trait for backend adapters
//! - Working-directory provisioning for embedded test engines
//!
//! ## Example
//!
//! ```
//! use sedge::filter::DateMathExpression;
//! use sedge::schema::{DateField, MultiTextField, NumericField, Schema};
//!
//! let price = NumericField::new("price")?;
//! let tags = MultiTextField::new("tags")?;
//! let created = DateField::new("created")?;
//!
//! let schema = Schema::builder()
//!     .register(&price)?
//!     .register(&tags)?
//!     .register(&created)?
//!     .build()?;
//!
//! assert!(schema.has_field("price"));
//!
//! let filter = price
//!     .between(10, 20)
//!     .and(tags.equals("sale"))
//!     .and(created.after(DateMathExpression::parse("NOW-7DAYS/DAY")?));
//! assert_eq!(filter.children().len(), 2);
//! # Ok::<(), sedge::error::SedgeError>(())
//! ```

pub mod error;
pub mod filter;
pub mod schema;
pub mod server;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
