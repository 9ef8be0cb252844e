//! Typed data flattening.
//!
//! Application values are merged into a resource's property map through three
//! capabilities instead of runtime introspection:
//!
//! - [`IsEmpty`]: the zero-value test used for `omitempty` and for skipping
//!   empty inputs
//! - [`DataValue`]: conversion to a JSON-like [`Value`], one level of pointer
//!   indirection, and access to a record view
//! - [`HalData`]: a record's fields in declaration order, each with its
//!   serialization [`Directive`] and embedded flag
//!
//! `#[derive(HalData)]` implements all three for named-field structs.
//!
//! ```
//! use hal_core::{DataValue, Field, HalData, IsEmpty, Value};
//!
//! struct Order {
//!     id: u64,
//!     note: Option<String>,
//! }
//!
//! impl HalData for Order {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("id", &self.id).tagged("id"),
//!             Field::new("note", &self.note).tagged("note,omitempty"),
//!         ]
//!     }
//! }
//!
//! impl IsEmpty for Order {
//!     fn is_empty_value(&self) -> bool {
//!         self.id.is_empty_value() && self.note.is_empty_value()
//!     }
//! }
//!
//! impl DataValue for Order {
//!     fn to_value(&self) -> Value {
//!         Value::Object(hal_core::data::record_fields(self))
//!     }
//!
//!     fn as_record(&self) -> Option<&dyn HalData> {
//!         Some(self)
//!     }
//! }
//!
//! let map = hal_core::data::flatten(&Order { id: 7, note: None });
//! assert_eq!(map["id"], 7);
//! assert!(!map.contains_key("note"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Timelike};
use serde_json::{Map, Value};
use tracing::debug;

use crate::map::PropertyMap;

/// Zero-value test.
///
/// Collections are empty when they hold no elements; their elements are never
/// inspected. Fixed-size arrays are empty when every element is.
pub trait IsEmpty {
    fn is_empty_value(&self) -> bool;
}

/// Result of dereferencing a value by one level.
pub enum Indirection<'a> {
    /// Not a pointer; the value is its own target.
    Direct,
    /// A pointer-like value and its target, `None` when unset.
    Pointer(Option<&'a dyn DataValue>),
}

/// A value that can be stored in a resource's property map.
pub trait DataValue: IsEmpty {
    /// JSON-like form of the value.
    fn to_value(&self) -> Value;

    /// One level of pointer indirection.
    fn indirection(&self) -> Indirection<'_> {
        Indirection::Direct
    }

    /// Record view, for values whose fields can be flattened.
    fn as_record(&self) -> Option<&dyn HalData> {
        None
    }
}

/// A composite record that can describe its fields.
pub trait HalData {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Parsed serialization directive of a field: `name[,omitempty]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    omit_empty: bool,
}

impl Directive {
    #[must_use]
    pub fn new(name: impl Into<String>, omit_empty: bool) -> Self {
        Self {
            name: name.into(),
            omit_empty,
        }
    }

    /// Parse a textual directive.
    ///
    /// Returns `None` for `-`, which opts the field out. An empty name falls
    /// back to `default_name`. `omitempty` is only recognized as the first
    /// option.
    #[must_use]
    pub fn parse(tag: &str, default_name: &str) -> Option<Self> {
        if tag == "-" {
            return None;
        }

        let mut tokens = tag.split(',');
        let name = tokens.next().unwrap_or_default().trim();
        let omit_empty = tokens.next().is_some_and(|option| option.trim() == "omitempty");
        let name = if name.is_empty() { default_name } else { name };

        Some(Self::new(name, omit_empty))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }
}

/// One declared field of a record.
pub struct Field<'a> {
    ident: &'static str,
    directive: Option<Directive>,
    embedded: bool,
    value: &'a dyn DataValue,
}

impl<'a> Field<'a> {
    /// A field without a directive. Such a field is never emitted itself,
    /// but still takes part in embedding and emptiness checks.
    #[must_use]
    pub fn new(ident: &'static str, value: &'a dyn DataValue) -> Self {
        Self {
            ident,
            directive: None,
            embedded: false,
            value,
        }
    }

    /// Attach a textual directive, see [`Directive::parse`].
    #[must_use]
    pub fn tagged(mut self, tag: &str) -> Self {
        self.directive = Directive::parse(tag, self.ident);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Mark the field as embedded: its own fields are promoted into the parent.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    #[must_use]
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    #[must_use]
    pub fn directive(&self) -> Option<&Directive> {
        self.directive.as_ref()
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// The raw, not yet dereferenced value.
    #[must_use]
    pub fn value(&self) -> &'a dyn DataValue {
        self.value
    }
}

/// Dereference at most one level. `None` when the pointer is unset.
#[must_use]
pub fn deref(value: &dyn DataValue) -> Option<&dyn DataValue> {
    match value.indirection() {
        Indirection::Direct => Some(value),
        Indirection::Pointer(target) => target,
    }
}

/// Flatten a value into a fresh property map, skipping it the way
/// [`Resource::add_data`](crate::Resource::add_data) does when it is unset,
/// empty or not a record.
#[must_use]
pub fn flatten(value: &dyn DataValue) -> PropertyMap {
    let mut map = PropertyMap::new();
    read_data_fields(&mut map, value);
    map
}

/// The fields of a record as a property map.
///
/// This is the value form of a record stored under a field. Unlike
/// [`flatten`], an empty record still yields its entries without `omitempty`.
#[must_use]
pub fn record_fields(record: &dyn HalData) -> PropertyMap {
    let mut map = PropertyMap::new();
    merge_fields(&mut map, record);
    map
}

/// Merge the fields of `value` into `target`.
///
/// The value is dereferenced one level first; unset and empty targets and
/// non-records are skipped.
pub(crate) fn read_data_fields(target: &mut PropertyMap, value: &dyn DataValue) {
    let Some(value) = deref(value) else {
        debug!("skipping unset value");
        return;
    };

    if value.is_empty_value() {
        debug!("skipping empty value");
        return;
    }

    let Some(record) = value.as_record() else {
        debug!("skipping value that is not a record");
        return;
    };

    merge_fields(target, record);
}

/// Unset fields are emitted as `null` unless they lack a directive or are
/// `omitempty`. Embedded fields are merged first, so a later tagged field wins
/// over a promoted one.
fn merge_fields(target: &mut PropertyMap, record: &dyn HalData) {
    for field in record.fields() {
        let Some(field_value) = deref(field.value()) else {
            match field.directive() {
                Some(directive) if !directive.omit_empty() => {
                    target.insert(directive.name().to_string(), Value::Null);
                }
                _ => debug!(field = field.ident(), "skipping unset field"),
            }
            continue;
        };

        if field.is_embedded() {
            read_data_fields(target, field_value);
        }

        let Some(directive) = field.directive() else {
            debug!(field = field.ident(), "skipping field without directive");
            continue;
        };

        if directive.omit_empty() && field_value.is_empty_value() {
            debug!(field = field.ident(), "omitting empty field");
            continue;
        }

        target.insert(directive.name().to_string(), field_value.to_value());
    }
}

// === Scalars ===

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IsEmpty for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == <$ty>::default()
                }
            }

            impl DataValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl IsEmpty for char {
    fn is_empty_value(&self) -> bool {
        *self == '\0'
    }
}

impl DataValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl DataValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl DataValue for &str {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl IsEmpty for () {
    fn is_empty_value(&self) -> bool {
        true
    }
}

impl DataValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

// === Pointers ===

impl<T: DataValue> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: DataValue> DataValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, DataValue::to_value)
    }

    fn indirection(&self) -> Indirection<'_> {
        Indirection::Pointer(self.as_ref().map(|value| value as &dyn DataValue))
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),*) => {
        $(
            /// Always set, so never empty; the target is checked after dereferencing.
            impl<T: DataValue> IsEmpty for $ptr<T> {
                fn is_empty_value(&self) -> bool {
                    false
                }
            }

            impl<T: DataValue> DataValue for $ptr<T> {
                fn to_value(&self) -> Value {
                    (**self).to_value()
                }

                fn indirection(&self) -> Indirection<'_> {
                    Indirection::Pointer(Some(&**self as &dyn DataValue))
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

// === Collections ===

macro_rules! impl_sequence {
    ($($seq:ident),*) => {
        $(
            impl<T: DataValue> IsEmpty for $seq<T> {
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }

            impl<T: DataValue> DataValue for $seq<T> {
                fn to_value(&self) -> Value {
                    Value::Array(self.iter().map(DataValue::to_value).collect())
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque, HashSet, BTreeSet);

impl<T: DataValue, const N: usize> IsEmpty for [T; N] {
    fn is_empty_value(&self) -> bool {
        self.iter().all(IsEmpty::is_empty_value)
    }
}

impl<T: DataValue, const N: usize> DataValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(DataValue::to_value).collect())
    }
}

macro_rules! impl_map {
    ($($map:ident),*) => {
        $(
            impl<K: Display, V: DataValue> IsEmpty for $map<K, V> {
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }

            impl<K: Display, V: DataValue> DataValue for $map<K, V> {
                fn to_value(&self) -> Value {
                    Value::Object(
                        self.iter()
                            .map(|(key, value)| (key.to_string(), value.to_value()))
                            .collect(),
                    )
                }
            }
        )*
    };
}

impl_map!(HashMap, BTreeMap);

// === JSON values ===

impl IsEmpty for Value {
    fn is_empty_value(&self) -> bool {
        self.is_null()
    }
}

impl DataValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl IsEmpty for Map<String, Value> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl DataValue for Map<String, Value> {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

// === Timestamps ===
//
// The zero instant is 0001-01-01T00:00:00 UTC.

fn is_zero_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.ordinal() == 1
}

fn is_zero_datetime(datetime: NaiveDateTime) -> bool {
    let time = datetime.time();
    is_zero_date(datetime.date()) && time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0
}

impl<Tz: TimeZone> IsEmpty for DateTime<Tz> {
    fn is_empty_value(&self) -> bool {
        is_zero_datetime(self.naive_utc())
    }
}

impl<Tz: TimeZone> DataValue for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn to_value(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl IsEmpty for NaiveDate {
    fn is_empty_value(&self) -> bool {
        is_zero_date(*self)
    }
}

impl DataValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl IsEmpty for NaiveDateTime {
    fn is_empty_value(&self) -> bool {
        is_zero_datetime(*self)
    }
}

impl DataValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}
