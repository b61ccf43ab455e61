//! Typed field descriptors for schema definition.
//!
//! Each document field is declared through a descriptor type specific to its
//! value kind and cardinality, and each descriptor exposes only the filter
//! operations that are legal for that kind: a numeric field offers `between`,
//! a location field offers `within_bbox`, a binary field offers nothing. The
//! operand types a filter may carry are therefore fixed at compile time;
//! there is no supertype constructor that bypasses the kind check.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SedgeError};
use crate::filter::datemath::DateOperand;
use crate::filter::filter::Filter;
use crate::filter::geo::LatLng;
use crate::filter::scope::{LOCATION_EMPTINESS_SCOPE, Scope};

/// Semantic kind of a field's values.
///
/// The kind doubles as the value-type tag: `Numeric` fields hold `f64`,
/// `Date` fields hold UTC instants, `Timestamp` fields hold legacy absolute
/// instants (`SystemTime`, coerced to UTC before use), `Text` fields hold
/// strings, `Location` fields hold [`LatLng`] pairs, and `Binary` fields
/// hold opaque bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Numeric,
    Date,
    Timestamp,
    Text,
    Location,
    Binary,
}

/// Cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    /// The field holds at most one value per document.
    Single,
    /// The field holds any number of values per document.
    Multi,
}

/// Reducer collapsing the values of a multi-valued field into a single
/// sortable value.
pub type SortReducer<T> = Arc<dyn Fn(&[T]) -> T + Send + Sync>;

/// Common field metadata; the registry-facing part of every descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    name: String,
    kind: FieldKind,
    multiplicity: Multiplicity,
    sortable: bool,
}

impl FieldInfo {
    fn new<S: Into<String>>(
        name: S,
        kind: FieldKind,
        multiplicity: Multiplicity,
        sortable: bool,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SedgeError::invalid_field_name("field name cannot be empty"));
        }
        Ok(FieldInfo {
            name,
            kind,
            multiplicity,
            sortable,
        })
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The declared cardinality.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Whether downstream sorting may use this field.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }
}

/// Uniform view of a typed field descriptor, as seen by the schema registry.
pub trait FieldDescriptor {
    /// Common metadata for this field.
    fn info(&self) -> &FieldInfo;

    /// The field name.
    fn name(&self) -> &str {
        self.info().name()
    }

    /// The declared value kind.
    fn kind(&self) -> FieldKind {
        self.info().kind()
    }

    /// The declared cardinality.
    fn multiplicity(&self) -> Multiplicity {
        self.info().multiplicity()
    }

    /// Whether downstream sorting may use this field.
    fn is_sortable(&self) -> bool {
        self.info().is_sortable()
    }

    /// Scope stamped on every filter this descriptor builds.
    fn default_scope(&self) -> Scope {
        Scope::default_for(self.kind(), self.multiplicity())
    }
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// A single-valued numeric field.
///
/// # Examples
///
/// ```
/// use sedge::schema::NumericField;
///
/// let price = NumericField::new("price").unwrap();
/// let in_range = price.between(10, 20);
/// let expensive = price.greater_than(100);
/// ```
#[derive(Debug, Clone)]
pub struct NumericField {
    info: FieldInfo,
}

impl NumericField {
    /// Create a new numeric field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(NumericField {
            info: FieldInfo::new(name, FieldKind::Numeric, Multiplicity::Single, true)?,
        })
    }

    /// Set whether this field may be used for sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.info.sortable = sortable;
        self
    }

    /// Filter checking if the field value is between two numbers.
    pub fn between<N: Into<f64>>(&self, start: N, end: N) -> Filter {
        Filter::between(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is greater than a number.
    pub fn greater_than<N: Into<f64>>(&self, bound: N) -> Filter {
        Filter::greater_than(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is lesser than a number.
    pub fn lesser_than<N: Into<f64>>(&self, bound: N) -> Filter {
        Filter::lesser_than(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for NumericField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A multi-valued numeric field.
#[derive(Clone)]
pub struct MultiNumericField {
    info: FieldInfo,
    sort_reducer: Option<SortReducer<f64>>,
}

impl fmt::Debug for MultiNumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiNumericField")
            .field("info", &self.info)
            .field("sort_reducer", &self.sort_reducer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MultiNumericField {
    /// Create a new multi-valued numeric field. Fails on an empty or blank
    /// name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(MultiNumericField {
            info: FieldInfo::new(name, FieldKind::Numeric, Multiplicity::Multi, false)?,
            sort_reducer: None,
        })
    }

    /// Install a reducer collapsing the field's values for sorting, making
    /// the field sortable.
    pub fn with_sort_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.sort_reducer = Some(Arc::new(reducer));
        self.info.sortable = true;
        self
    }

    /// Get the sort reducer, if one is installed.
    pub fn sort_reducer(&self) -> Option<&SortReducer<f64>> {
        self.sort_reducer.as_ref()
    }

    /// Collapse values into one sortable value.
    ///
    /// Fails with an unsupported-operation error when no reducer is
    /// installed; such fields are excluded from sort consideration.
    pub fn reduce_for_sort(&self, values: &[f64]) -> Result<f64> {
        match &self.sort_reducer {
            Some(reducer) => Ok(reducer(values)),
            None => Err(SedgeError::unsupported(format!(
                "field '{}' has no sort reducer",
                self.name()
            ))),
        }
    }

    /// Filter checking if any field value is between two numbers.
    pub fn between<N: Into<f64>>(&self, start: N, end: N) -> Filter {
        Filter::between(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is greater than a number.
    pub fn greater_than<N: Into<f64>>(&self, bound: N) -> Filter {
        Filter::greater_than(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is lesser than a number.
    pub fn lesser_than<N: Into<f64>>(&self, bound: N) -> Filter {
        Filter::lesser_than(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for MultiNumericField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

// ---------------------------------------------------------------------------
// Date fields
// ---------------------------------------------------------------------------

/// A single-valued date field holding UTC instants.
///
/// Temporal operands may be zoned instants, legacy absolute instants, or
/// unresolved date-math expressions; see
/// [`DateOperand`](crate::filter::DateOperand).
#[derive(Debug, Clone)]
pub struct DateField {
    info: FieldInfo,
}

impl DateField {
    /// Create a new date field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(DateField {
            info: FieldInfo::new(name, FieldKind::Date, Multiplicity::Single, true)?,
        })
    }

    /// Set whether this field may be used for sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.info.sortable = sortable;
        self
    }

    /// Filter checking if the field value is between two points in time.
    pub fn between<D: Into<DateOperand>>(&self, start: D, end: D) -> Filter {
        Filter::between_dates(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is before a point in time.
    pub fn before<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::before(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is after a point in time.
    pub fn after<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::after(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for DateField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A multi-valued date field.
#[derive(Clone)]
pub struct MultiDateField {
    info: FieldInfo,
    sort_reducer: Option<SortReducer<DateTime<Utc>>>,
}

impl fmt::Debug for MultiDateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiDateField")
            .field("info", &self.info)
            .field("sort_reducer", &self.sort_reducer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MultiDateField {
    /// Create a new multi-valued date field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(MultiDateField {
            info: FieldInfo::new(name, FieldKind::Date, Multiplicity::Multi, false)?,
            sort_reducer: None,
        })
    }

    /// Install a reducer collapsing the field's values for sorting.
    pub fn with_sort_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&[DateTime<Utc>]) -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.sort_reducer = Some(Arc::new(reducer));
        self.info.sortable = true;
        self
    }

    /// Get the sort reducer, if one is installed.
    pub fn sort_reducer(&self) -> Option<&SortReducer<DateTime<Utc>>> {
        self.sort_reducer.as_ref()
    }

    /// Collapse values into one sortable value.
    pub fn reduce_for_sort(&self, values: &[DateTime<Utc>]) -> Result<DateTime<Utc>> {
        match &self.sort_reducer {
            Some(reducer) => Ok(reducer(values)),
            None => Err(SedgeError::unsupported(format!(
                "field '{}' has no sort reducer",
                self.name()
            ))),
        }
    }

    /// Filter checking if any field value is between two points in time.
    pub fn between<D: Into<DateOperand>>(&self, start: D, end: D) -> Filter {
        Filter::between_dates(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is before a point in time.
    pub fn before<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::before(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is after a point in time.
    pub fn after<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::after(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for MultiDateField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

// ---------------------------------------------------------------------------
// Timestamp fields (legacy absolute instants)
// ---------------------------------------------------------------------------

/// A single-valued field holding legacy absolute instants.
///
/// Values carry no zone; filter operands are coerced to UTC before the
/// filter node is built, so equal physical instants always produce equal
/// filters regardless of input representation.
#[derive(Debug, Clone)]
pub struct TimestampField {
    info: FieldInfo,
}

impl TimestampField {
    /// Create a new timestamp field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(TimestampField {
            info: FieldInfo::new(name, FieldKind::Timestamp, Multiplicity::Single, true)?,
        })
    }

    /// Set whether this field may be used for sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.info.sortable = sortable;
        self
    }

    /// Filter checking if the field value is between two points in time.
    pub fn between<D: Into<DateOperand>>(&self, start: D, end: D) -> Filter {
        Filter::between_dates(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is before a point in time.
    pub fn before<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::before(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is after a point in time.
    pub fn after<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::after(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for TimestampField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A multi-valued timestamp field.
///
/// Intended for faceted narrowing: every filter it builds carries facet
/// scope, per the default-scope table.
#[derive(Clone)]
pub struct MultiTimestampField {
    info: FieldInfo,
    sort_reducer: Option<SortReducer<SystemTime>>,
}

impl fmt::Debug for MultiTimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiTimestampField")
            .field("info", &self.info)
            .field("sort_reducer", &self.sort_reducer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MultiTimestampField {
    /// Create a new multi-valued timestamp field. Fails on an empty or blank
    /// name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(MultiTimestampField {
            info: FieldInfo::new(name, FieldKind::Timestamp, Multiplicity::Multi, false)?,
            sort_reducer: None,
        })
    }

    /// Install a reducer collapsing the field's values for sorting.
    pub fn with_sort_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&[SystemTime]) -> SystemTime + Send + Sync + 'static,
    {
        self.sort_reducer = Some(Arc::new(reducer));
        self.info.sortable = true;
        self
    }

    /// Get the sort reducer, if one is installed.
    pub fn sort_reducer(&self) -> Option<&SortReducer<SystemTime>> {
        self.sort_reducer.as_ref()
    }

    /// Collapse values into one sortable value.
    pub fn reduce_for_sort(&self, values: &[SystemTime]) -> Result<SystemTime> {
        match &self.sort_reducer {
            Some(reducer) => Ok(reducer(values)),
            None => Err(SedgeError::unsupported(format!(
                "field '{}' has no sort reducer",
                self.name()
            ))),
        }
    }

    /// Filter checking if any field value is between two points in time.
    pub fn between<D: Into<DateOperand>>(&self, start: D, end: D) -> Filter {
        Filter::between_dates(self.name(), start, end).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is before a point in time.
    pub fn before<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::before(self.name(), bound).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is after a point in time.
    pub fn after<D: Into<DateOperand>>(&self, bound: D) -> Filter {
        Filter::after(self.name(), bound).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for MultiTimestampField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// A single-valued text field.
#[derive(Debug, Clone)]
pub struct TextField {
    info: FieldInfo,
}

impl TextField {
    /// Create a new text field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(TextField {
            info: FieldInfo::new(name, FieldKind::Text, Multiplicity::Single, true)?,
        })
    }

    /// Set whether this field may be used for sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.info.sortable = sortable;
        self
    }

    /// Filter checking if the field value equals a text.
    pub fn equals<T: Into<String>>(&self, text: T) -> Filter {
        Filter::eq(self.name(), text).with_scope(self.default_scope())
    }

    /// Filter checking if the field value starts with a text.
    pub fn prefix<T: Into<String>>(&self, prefix: T) -> Filter {
        Filter::prefix(self.name(), prefix).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for TextField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A multi-valued text field.
///
/// Intended for faceted narrowing: every filter it builds carries facet
/// scope, per the default-scope table.
#[derive(Clone)]
pub struct MultiTextField {
    info: FieldInfo,
    sort_reducer: Option<SortReducer<String>>,
}

impl fmt::Debug for MultiTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiTextField")
            .field("info", &self.info)
            .field("sort_reducer", &self.sort_reducer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MultiTextField {
    /// Create a new multi-valued text field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(MultiTextField {
            info: FieldInfo::new(name, FieldKind::Text, Multiplicity::Multi, false)?,
            sort_reducer: None,
        })
    }

    /// Install a reducer collapsing the field's values for sorting.
    pub fn with_sort_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        self.sort_reducer = Some(Arc::new(reducer));
        self.info.sortable = true;
        self
    }

    /// Get the sort reducer, if one is installed.
    pub fn sort_reducer(&self) -> Option<&SortReducer<String>> {
        self.sort_reducer.as_ref()
    }

    /// Collapse values into one sortable value.
    pub fn reduce_for_sort(&self, values: &[String]) -> Result<String> {
        match &self.sort_reducer {
            Some(reducer) => Ok(reducer(values)),
            None => Err(SedgeError::unsupported(format!(
                "field '{}' has no sort reducer",
                self.name()
            ))),
        }
    }

    /// Filter checking if any field value equals a text.
    pub fn equals<T: Into<String>>(&self, text: T) -> Filter {
        Filter::eq(self.name(), text).with_scope(self.default_scope())
    }

    /// Filter checking if any field value starts with a text.
    pub fn prefix<T: Into<String>>(&self, prefix: T) -> Filter {
        Filter::prefix(self.name(), prefix).with_scope(self.default_scope())
    }
}

impl FieldDescriptor for MultiTextField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

// ---------------------------------------------------------------------------
// Location fields
// ---------------------------------------------------------------------------

/// A single-valued location field.
#[derive(Debug, Clone)]
pub struct LocationField {
    info: FieldInfo,
}

impl LocationField {
    /// Create a new location field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(LocationField {
            info: FieldInfo::new(name, FieldKind::Location, Multiplicity::Single, false)?,
        })
    }

    /// Filter checking if the field value is within a bounding box.
    ///
    /// Corners are stored verbatim; their order is not normalized.
    pub fn within_bbox(&self, upper_left: LatLng, lower_right: LatLng) -> Filter {
        Filter::within_bbox(self.name(), upper_left, lower_right).with_scope(self.default_scope())
    }

    /// Filter checking if the field value is within a circle with a radius
    /// in kilometers.
    pub fn within_circle(&self, center: LatLng, radius_km: f64) -> Filter {
        Filter::within_circle(self.name(), center, radius_km).with_scope(self.default_scope())
    }

    /// Filter checking if the field has a value.
    pub fn is_not_empty(&self) -> Filter {
        Filter::not_empty_location(self.name()).with_scope(LOCATION_EMPTINESS_SCOPE)
    }

    /// Filter checking if the field has no value.
    ///
    /// Emptiness is the logical negation of [`is_not_empty`], not an
    /// independent predicate.
    ///
    /// [`is_not_empty`]: LocationField::is_not_empty
    pub fn is_empty(&self) -> Filter {
        Filter::not(self.is_not_empty()).with_scope(LOCATION_EMPTINESS_SCOPE)
    }
}

impl FieldDescriptor for LocationField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A multi-valued location field.
#[derive(Clone)]
pub struct MultiLocationField {
    info: FieldInfo,
    sort_reducer: Option<SortReducer<LatLng>>,
}

impl fmt::Debug for MultiLocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLocationField")
            .field("info", &self.info)
            .field("sort_reducer", &self.sort_reducer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MultiLocationField {
    /// Create a new multi-valued location field. Fails on an empty or blank
    /// name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(MultiLocationField {
            info: FieldInfo::new(name, FieldKind::Location, Multiplicity::Multi, false)?,
            sort_reducer: None,
        })
    }

    /// Install a reducer collapsing the field's values for sorting.
    pub fn with_sort_reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&[LatLng]) -> LatLng + Send + Sync + 'static,
    {
        self.sort_reducer = Some(Arc::new(reducer));
        self.info.sortable = true;
        self
    }

    /// Get the sort reducer, if one is installed.
    pub fn sort_reducer(&self) -> Option<&SortReducer<LatLng>> {
        self.sort_reducer.as_ref()
    }

    /// Collapse values into one sortable value.
    pub fn reduce_for_sort(&self, values: &[LatLng]) -> Result<LatLng> {
        match &self.sort_reducer {
            Some(reducer) => Ok(reducer(values)),
            None => Err(SedgeError::unsupported(format!(
                "field '{}' has no sort reducer",
                self.name()
            ))),
        }
    }

    /// Filter checking if any field value is within a bounding box.
    pub fn within_bbox(&self, upper_left: LatLng, lower_right: LatLng) -> Filter {
        Filter::within_bbox(self.name(), upper_left, lower_right).with_scope(self.default_scope())
    }

    /// Filter checking if any field value is within a circle with a radius
    /// in kilometers.
    pub fn within_circle(&self, center: LatLng, radius_km: f64) -> Filter {
        Filter::within_circle(self.name(), center, radius_km).with_scope(self.default_scope())
    }

    /// Filter checking if the field has a value.
    pub fn is_not_empty(&self) -> Filter {
        Filter::not_empty_location(self.name()).with_scope(LOCATION_EMPTINESS_SCOPE)
    }

    /// Filter checking if the field has no value.
    pub fn is_empty(&self) -> Filter {
        Filter::not(self.is_not_empty()).with_scope(LOCATION_EMPTINESS_SCOPE)
    }
}

impl FieldDescriptor for MultiLocationField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

// ---------------------------------------------------------------------------
// Binary fields
// ---------------------------------------------------------------------------

/// A binary field for opaque byte values.
///
/// Binary fields support storage and retrieval only: no filter operations,
/// no sorting, and no multi-valued variant. The single-valued restriction is
/// deliberate.
#[derive(Debug, Clone)]
pub struct BinaryField {
    info: FieldInfo,
}

impl BinaryField {
    /// Create a new binary field. Fails on an empty or blank name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Ok(BinaryField {
            info: FieldInfo::new(name, FieldKind::Binary, Multiplicity::Single, false)?,
        })
    }
}

impl FieldDescriptor for BinaryField {
    fn info(&self) -> &FieldInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration as StdDuration, UNIX_EPOCH};

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_rejects_blank_names() {
        assert!(matches!(
            NumericField::new(""),
            Err(SedgeError::InvalidFieldName(_))
        ));
        assert!(matches!(
            MultiTextField::new("   "),
            Err(SedgeError::InvalidFieldName(_))
        ));
        assert!(BinaryField::new("payload").is_ok());
    }

    #[test]
    fn test_descriptor_matches_direct_factory_call() {
        let price = NumericField::new("price").unwrap();
        assert_eq!(price.between(10, 20), Filter::between("price", 10, 20));
        assert_eq!(price.greater_than(100), Filter::greater_than("price", 100));
        assert_eq!(price.lesser_than(5), Filter::lesser_than("price", 5));
    }

    #[test]
    fn test_multi_text_filters_carry_facet_scope() {
        let tags = MultiTextField::new("tags").unwrap();
        assert_eq!(tags.equals("sports").scope(), Scope::Facet);
        assert_eq!(tags.prefix("spo").scope(), Scope::Facet);

        let title = TextField::new("title").unwrap();
        assert_eq!(title.equals("sedge").scope(), Scope::Both);
        assert_eq!(title.prefix("sed").scope(), Scope::Both);
    }

    #[test]
    fn test_multi_timestamp_filters_carry_facet_scope() {
        let seen = MultiTimestampField::new("seen").unwrap();
        let instant = UNIX_EPOCH + StdDuration::from_secs(1_577_836_800);
        assert_eq!(seen.before(instant).scope(), Scope::Facet);
        assert_eq!(seen.after(instant).scope(), Scope::Facet);
        assert_eq!(seen.between(instant, instant).scope(), Scope::Facet);

        let created = TimestampField::new("created").unwrap();
        assert_eq!(created.before(instant).scope(), Scope::Both);
    }

    #[test]
    fn test_legacy_and_zoned_inputs_normalize_to_equal_filters() {
        let modified = DateField::new("modified").unwrap();
        let utc = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let legacy = UNIX_EPOCH + StdDuration::from_secs(1_577_836_800);

        assert_eq!(modified.before(utc), modified.before(legacy));
        assert_eq!(modified.after(utc), modified.after(legacy));
        assert_eq!(
            modified.between(utc, utc),
            modified.between(legacy, legacy)
        );
    }

    #[test]
    fn test_location_emptiness_is_negated_not_empty() {
        let location = LocationField::new("location").unwrap();

        assert_eq!(
            location.is_empty(),
            Filter::not(location.is_not_empty()).with_scope(Scope::Facet)
        );
        assert_eq!(location.is_not_empty().scope(), Scope::Facet);

        // Double negation restores the base filter.
        assert_eq!(location.is_empty().negate(), location.is_not_empty());
    }

    #[test]
    fn test_sortability_defaults_and_reducers() {
        assert!(NumericField::new("price").unwrap().is_sortable());
        assert!(!NumericField::new("price").unwrap().sortable(false).is_sortable());

        let plain = MultiNumericField::new("prices").unwrap();
        assert!(!plain.is_sortable());
        assert!(plain.sort_reducer().is_none());
        assert!(matches!(
            plain.reduce_for_sort(&[1.0, 2.0]),
            Err(SedgeError::UnsupportedOperation(_))
        ));

        let reduced = MultiNumericField::new("prices")
            .unwrap()
            .with_sort_reducer(|values| values.iter().copied().fold(f64::MIN, f64::max));
        assert!(reduced.is_sortable());
        assert_eq!(reduced.reduce_for_sort(&[1.0, 3.0, 2.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_binary_fields_are_single_valued() {
        let payload = BinaryField::new("payload").unwrap();
        assert_eq!(payload.kind(), FieldKind::Binary);
        assert_eq!(payload.multiplicity(), Multiplicity::Single);
        assert!(!payload.is_sortable());
    }

    #[test]
    fn test_combined_numeric_filters_expose_children_and_bounds() {
        let price = MultiNumericField::new("price").unwrap();
        let tree = price.between(10, 20).and(price.greater_than(100));

        let children = tree.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|child| child.scope().applies_to_results()));

        match &children[0] {
            Filter::Between {
                field, start, end, ..
            } => {
                assert_eq!(field, "price");
                assert_eq!(*start, 10.0);
                assert_eq!(*end, 20.0);
            }
            other => panic!("unexpected filter: {other:?}"),
        }
        match &children[1] {
            Filter::GreaterThan { field, bound, .. } => {
                assert_eq!(field, "price");
                assert_eq!(*bound, 100.0);
            }
            other => panic!("unexpected filter: {other:?}"),
        }
    }
}
