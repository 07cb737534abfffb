//! In-memory tree values.
//!
//! A [`Node`] is one of: a null, a [`Scalar`] leaf, a mapping keyed by
//! scalars, an ordered sequence, or an [`Object`] exposing named attributes.
//! Every node has a runtime [`NodeType`]; objects carry a [`Class`] that may
//! derive from a base class.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A node of the tree being matched.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use treematch::{Node, NodeType};
///
/// let mut map = BTreeMap::new();
/// map.insert("a", vec![1i64, 2]);
/// let tree = Node::from(map);
///
/// assert_eq!(tree.node_type(), NodeType::Mapping);
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absent value.
    Null,
    /// Scalar leaf.
    Scalar(Scalar),
    /// Associative container; keys iterate in [`Scalar`] order.
    Mapping(BTreeMap<Scalar, Node>),
    /// Ordered container.
    Sequence(Vec<Node>),
    /// Class instance with named attributes.
    Object(Object),
}

impl Node {
    /// Returns the runtime type of this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Null => NodeType::Null,
            Node::Scalar(scalar) => scalar.node_type(),
            Node::Mapping(_) => NodeType::Mapping,
            Node::Sequence(_) => NodeType::Sequence,
            Node::Object(object) => NodeType::Class(object.class.clone()),
        }
    }

    /// Number of direct children (0 for leaves).
    pub fn len(&self) -> usize {
        match self {
            Node::Mapping(map) => map.len(),
            Node::Sequence(items) => items.len(),
            Node::Object(object) => object.attrs.len(),
            Node::Null | Node::Scalar(_) => 0,
        }
    }

    /// Returns `true` if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this is a `Null` node.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Extracts the scalar, if this is a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Extracts the object, if this is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Scalar leaf value.
///
/// Scalars are totally ordered so they can key mappings: booleans sort before
/// numbers, numbers before strings, strings before byte strings. Numbers
/// compare numerically across representations, so `1` and `1.0` are equal.
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Str(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Runtime type of the scalar.
    pub fn node_type(&self) -> NodeType {
        match self {
            Scalar::Bool(_) => NodeType::Bool,
            Scalar::Number(Number::F64(_)) => NodeType::Float,
            Scalar::Number(_) => NodeType::Int,
            Scalar::Str(_) => NodeType::Str,
            Scalar::Bytes(_) => NodeType::Bytes,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Compares two scalars of the same kind.
    ///
    /// Returns `None` across kinds (a string is not less than a number) and
    /// for NaN.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
            (Scalar::Number(a), Scalar::Number(b)) => a.compare(*b),
            (Scalar::Str(a), Scalar::Str(b)) => Some(a.cmp(b)),
            (Scalar::Bytes(a), Scalar::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Bool(_) => 0,
            Scalar::Number(_) => 1,
            Scalar::Str(_) => 2,
            Scalar::Bytes(_) => 3,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.total_cmp(*b),
            _ => self
                .compare(other)
                .unwrap_or_else(|| self.rank().cmp(&other.rank())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Str(s) => write!(f, "{:?}", s),
            Scalar::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are exact: an integer is
/// never rounded to a float to be compared with one.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Mixed with floats - exact, without rounding the integer
            (Number::I64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::U64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::F64(a), Number::I64(b)) => {
                compare_int_float(i128::from(b), a).map(Ordering::reverse)
            }
            (Number::F64(a), Number::U64(b)) => {
                compare_int_float(i128::from(b), a).map(Ordering::reverse)
            }
        }
    }

    /// Total order used for mapping keys; NaN sorts by IEEE total order.
    pub fn total_cmp(self, other: Number) -> Ordering {
        self.compare(other)
            .unwrap_or_else(|| self.to_f64().total_cmp(&other.to_f64()))
    }
}

/// Compares an integer with a float exactly. `None` for NaN.
fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    // Every i64 and u64 lies in [LOW, HIGH).
    const LOW: f64 = -9_223_372_036_854_775_808.0; // -2^63
    const HIGH: f64 = 18_446_744_073_709_551_616.0; // 2^64
    let floor = float.floor();
    if floor < LOW {
        return Some(Ordering::Greater);
    }
    if floor >= HIGH {
        return Some(Ordering::Less);
    }
    // `floor` is integral and in range, so the cast is exact.
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{:?}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Scalar {
                fn from(n: $source) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }

            impl From<$source> for Node {
                fn from(n: $source) -> Self {
                    Node::Scalar(Scalar::from(n))
                }
            }
        )*
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(b: Vec<u8>) -> Self {
        Scalar::Bytes(b)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::Str(s))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::from(s))
    }
}

impl From<Object> for Node {
    fn from(object: Object) -> Self {
        Node::Object(object)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl<K: Into<Scalar>, V: Into<Node>> From<BTreeMap<K, V>> for Node {
    fn from(map: BTreeMap<K, V>) -> Self {
        Node::Mapping(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<Scalar>, V: Into<Node>, S> From<HashMap<K, V, S>> for Node {
    fn from(map: HashMap<K, V, S>) -> Self {
        Node::Mapping(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::from(b),
            Value::Number(n) => {
                let number = if let Some(i) = n.as_i64() {
                    Number::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Number::U64(u)
                } else {
                    Number::F64(n.as_f64().unwrap_or(f64::NAN))
                };
                Node::Scalar(Scalar::Number(number))
            }
            Value::String(s) => Node::from(s),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Scalar::Str(k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A class instance exposing named attributes.
///
/// ```
/// use treematch::{Class, Node, Object};
///
/// let point = Class::new("Point");
/// let origin = Object::new(&point).with("x", 0i64).with("y", 0i64);
///
/// assert_eq!(Node::from(origin).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: Class,
    attrs: BTreeMap<String, Node>,
}

impl Object {
    /// Creates an instance of `class` with no attributes.
    pub fn new(class: &Class) -> Self {
        Object {
            class: class.clone(),
            attrs: BTreeMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// The instance's class.
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Attributes in name order.
    pub fn attrs(&self) -> &BTreeMap<String, Node> {
        &self.attrs
    }
}

/// A named runtime type for [`Object`]s.
///
/// Classes compare by identity: two classes created separately are distinct
/// even if they share a name.
#[derive(Clone)]
pub struct Class(Arc<ClassInfo>);

struct ClassInfo {
    name: String,
    base: Option<Class>,
}

impl Class {
    /// Creates a root class.
    pub fn new(name: impl Into<String>) -> Self {
        Class(Arc::new(ClassInfo {
            name: name.into(),
            base: None,
        }))
    }

    /// Creates a class deriving from `base`.
    pub fn derive(name: impl Into<String>, base: &Class) -> Self {
        Class(Arc::new(ClassInfo {
            name: name.into(),
            base: Some(base.clone()),
        }))
    }

    /// Class name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Direct base class, if any.
    pub fn base(&self) -> Option<&Class> {
        self.0.base.as_ref()
    }

    /// Returns `true` if `self` is `other` or derives from it.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.base();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base() {
            Some(base) => write!(f, "Class({} < {})", self.name(), base.name()),
            None => write!(f, "Class({})", self.name()),
        }
    }
}

/// Runtime type of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// Top of the hierarchy: every type is a kind of `Any`.
    Any,
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Mapping,
    Sequence,
    Class(Class),
}

impl NodeType {
    /// Subtype check used by kind-of patterns.
    pub fn is_kind_of(&self, expected: &NodeType) -> bool {
        match (self, expected) {
            (_, NodeType::Any) => true,
            (NodeType::Class(actual), NodeType::Class(expected)) => actual.is_subclass_of(expected),
            _ => self == expected,
        }
    }
}

impl From<Class> for NodeType {
    fn from(class: Class) -> Self {
        NodeType::Class(class)
    }
}

impl From<&Class> for NodeType {
    fn from(class: &Class) -> Self {
        NodeType::Class(class.clone())
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Any => f.write_str("any"),
            NodeType::Null => f.write_str("null"),
            NodeType::Bool => f.write_str("bool"),
            NodeType::Int => f.write_str("int"),
            NodeType::Float => f.write_str("float"),
            NodeType::Str => f.write_str("str"),
            NodeType::Bytes => f.write_str("bytes"),
            NodeType::Mapping => f.write_str("mapping"),
            NodeType::Sequence => f.write_str("sequence"),
            NodeType::Class(class) => f.write_str(class.name()),
        }
    }
}
