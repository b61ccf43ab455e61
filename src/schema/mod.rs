//! Schema management for document field declarations.

pub mod field;
#[allow(clippy::module_inception)]
pub mod schema;

pub use self::field::{
    BinaryField, DateField, FieldDescriptor, FieldInfo, FieldKind, LocationField, MultiDateField,
    MultiLocationField, MultiNumericField, MultiTextField, MultiTimestampField, Multiplicity,
    NumericField, SortReducer, TextField, TimestampField,
};
pub use self::schema::{Schema, SchemaBuilder};
