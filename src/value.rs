//! Dynamic values used as registry keys and memoized results.
//!
//! ## Key Components
//!
//! - [`Value`]: the key/result type accepted by every hook.
//! - [`List`], [`Object`]: shared composite handles compared by identity.
//!
//! ## Equality Rules
//!
//! | Variant            | Equality                                      |
//! |--------------------|-----------------------------------------------|
//! | `Undefined`/`Null` | unit                                          |
//! | `Bool`, `Str`      | by value                                      |
//! | `Number`           | SameValueZero (`NaN == NaN`, `0.0 == -0.0`)   |
//! | `List`, `Object`   | by identity (clones of one handle are equal)  |
//!
//! Two lists built separately from the same elements are different keys. A
//! [`KeyProcessor`](crate::hooks::KeyProcessor) such as
//! [`KeyProcessor::stringify`](crate::hooks::KeyProcessor::stringify) can fold
//! them onto one primitive key.
//!
//! ## Example Usage
//!
//! ```
//! use rerandom::value::Value;
//!
//! let a = Value::list(["a"]);
//! let b = Value::list(["a"]);
//! assert_ne!(a, b);
//! assert_eq!(a, a.clone());
//! assert_eq!(a.to_string(), b.to_string());
//!
//! assert!(!Value::from(0).is_truthy());
//! assert!(Value::from("x").is_truthy());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A dynamically typed key or result.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value; the key of an unkeyed call.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(List),
    Object(Object),
}

impl Value {
    /// Builds a list with a fresh identity.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(List::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds an object with a fresh identity.
    pub fn object<I, S, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<Value>,
    {
        Value::Object(Object::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Returns `false` for `undefined`, `null`, `false`, `0`, `-0`, `NaN` and
    /// the empty string.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(*n == 0.0 || n.is_nan()),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Object(_) => true,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant as reported in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

// ---------------------------------------------------------------------------
// Composite handles
// ---------------------------------------------------------------------------

/// Shared list handle. Equality and hashing use the allocation address.
#[derive(Debug, Clone)]
pub struct List(Arc<Vec<Value>>);

impl List {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Arc::new(items))
    }

    pub fn items(&self) -> &[Value] {
        &self.0
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for List {}

impl Hash for List {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

/// Shared object handle. Equality and hashing use the allocation address.
#[derive(Debug, Clone)]
pub struct Object(Arc<BTreeMap<String, Value>>);

impl Object {
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Self(Arc::new(fields))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.0
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

// ---------------------------------------------------------------------------
// Equality and hashing
// ---------------------------------------------------------------------------

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {},
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(l) => l.hash(state),
            Value::Object(o) => o.hash(state),
        }
    }
}

/// Bit pattern that agrees with SameValueZero: all NaNs collapse to one
/// pattern and `-0.0` hashes like `0.0`.
#[inline]
fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

// ---------------------------------------------------------------------------
// String coercion
// ---------------------------------------------------------------------------

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::List(list) => {
                for (i, item) in list.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // nested null/undefined join as empty
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            },
            Value::Object(_) => f.write_str("[object Object]"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }

    // shortest round-trip digits, e.g. "1.2345e20"
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // decimal point sits after `point` digits
    let point = exp.parse::<i32>().unwrap_or(0) + 1;

    if k <= point && point <= 21 {
        f.write_str(&digits)?;
        for _ in 0..point - k {
            f.write_str("0")?;
        }
        Ok(())
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{int}.{frac}")
    } else if -6 < point && point <= 0 {
        f.write_str("0.")?;
        for _ in 0..-point {
            f.write_str("0")?;
        }
        f.write_str(&digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        f.write_str(lead)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let e = point - 1;
        write!(f, "e{}{}", if e < 0 { '-' } else { '+' }, e.abs())
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(f64, f32, i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}
