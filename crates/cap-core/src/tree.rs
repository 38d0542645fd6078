//! The [`PropertyTree`] configuration tree and its leaf [`Value`] type.
//!
//! A tree node carries an optional leaf value and an ordered set of named
//! children. Entries are addressed by dotted paths such as
//! `"geometry.geometric_area"`. Lookups of missing entries are always
//! reported as [`TreeError::MissingKey`]; the tree never invents defaults.

use std::fmt;

use indexmap::IndexMap;

use crate::error::TreeError;
use crate::list::split_list;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// A leaf value stored in a [`PropertyTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Free-form text. Text-sourced numbers and booleans are stored this way.
    String(String),
    /// A floating-point number.
    Float(f64),
    /// A signed integer.
    Int(i64),
    /// A boolean flag.
    Bool(bool),
}

impl Value {
    /// Name of the value kind, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// An ordered, nested key/value configuration tree.
///
/// Children keep insertion order, so iterating a tree built from a file
/// yields entries in the order they were written.
///
/// # Examples
///
/// ```
/// use cap_core::PropertyTree;
///
/// let mut ptree = PropertyTree::new();
/// ptree.put("type", "ConstantCurrent").unwrap();
/// ptree.put("geometry.geometric_area", 25.0e-2).unwrap();
///
/// assert_eq!(ptree.get_string("type").unwrap(), "ConstantCurrent");
/// assert_eq!(ptree.get_f64("geometry.geometric_area").unwrap(), 25.0e-2);
/// assert!(ptree.get_required("geometry.missing").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTree {
    value: Option<Value>,
    children: IndexMap<String, PropertyTree>,
}

fn segments(path: &str) -> Result<Vec<&str>, TreeError> {
    let parts: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(TreeError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

fn missing(path: &str) -> TreeError {
    TreeError::MissingKey {
        path: path.to_string(),
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> TreeError {
    TreeError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.kind().to_string(),
    }
}

impl PropertyTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The leaf value stored at this node, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// `true` if the node has neither a value nor children.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Iterate over direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PropertyTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn node(&self, path: &str) -> Result<&PropertyTree, TreeError> {
        let mut node = self;
        for seg in segments(path)? {
            node = node.children.get(seg).ok_or_else(|| missing(path))?;
        }
        Ok(node)
    }

    fn node_mut_or_insert(&mut self, path: &str) -> Result<&mut PropertyTree, TreeError> {
        let mut node = self;
        for seg in segments(path)? {
            node = node.children.entry(seg.to_string()).or_default();
        }
        Ok(node)
    }

    /// `true` if a node exists at `path` (with or without a value).
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_ok()
    }

    /// The value at `path`, failing if there is none.
    pub fn get_required(&self, path: &str) -> Result<&Value, TreeError> {
        self.node(path)?.value.as_ref().ok_or_else(|| missing(path))
    }

    /// The value at `path`, or `None` if absent.
    pub fn get_optional(&self, path: &str) -> Option<&Value> {
        self.node(path).ok().and_then(|n| n.value.as_ref())
    }

    /// The sub-tree rooted at `path`.
    pub fn get_child(&self, path: &str) -> Result<&PropertyTree, TreeError> {
        self.node(path)
    }

    /// Read a string value. Only text leaves qualify.
    pub fn get_string(&self, path: &str) -> Result<String, TreeError> {
        match self.get_required(path)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(path, "string", other)),
        }
    }

    /// Read a floating-point value.
    ///
    /// Integers widen; text leaves are parsed.
    pub fn get_f64(&self, path: &str) -> Result<f64, TreeError> {
        match self.get_required(path)? {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            v @ Value::String(s) => s.trim().parse().map_err(|_| mismatch(path, "float", v)),
            other => Err(mismatch(path, "float", other)),
        }
    }

    /// Read an integer value. Text leaves are parsed; floats are rejected.
    pub fn get_i64(&self, path: &str) -> Result<i64, TreeError> {
        match self.get_required(path)? {
            Value::Int(i) => Ok(*i),
            v @ Value::String(s) => s.trim().parse().map_err(|_| mismatch(path, "int", v)),
            other => Err(mismatch(path, "int", other)),
        }
    }

    /// Read a boolean. Text leaves accept `true`/`false`/`1`/`0`.
    pub fn get_bool(&self, path: &str) -> Result<bool, TreeError> {
        match self.get_required(path)? {
            Value::Bool(b) => Ok(*b),
            v @ Value::String(s) => match s.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(mismatch(path, "bool", v)),
            },
            other => Err(mismatch(path, "bool", other)),
        }
    }

    /// Read a comma-separated list of floats, e.g. `"0.1, 0.2, 0.4"`.
    ///
    /// A single numeric leaf reads as a one-element list.
    pub fn get_vec_f64(&self, path: &str) -> Result<Vec<f64>, TreeError> {
        match self.get_required(path)? {
            Value::Float(x) => Ok(vec![*x]),
            Value::Int(i) => Ok(vec![*i as f64]),
            v @ Value::String(s) => split_list(s)
                .map(|item| item.parse().map_err(|_| mismatch(path, "float list", v)))
                .collect(),
            other => Err(mismatch(path, "float list", other)),
        }
    }

    /// Read a comma-separated list of names, e.g. `"anode, cathode"`.
    pub fn get_vec_string(&self, path: &str) -> Result<Vec<String>, TreeError> {
        match self.get_required(path)? {
            Value::String(s) => Ok(split_list(s).map(str::to_string).collect()),
            other => Err(mismatch(path, "string list", other)),
        }
    }

    /// Store `value` at `path`, creating intermediate nodes.
    ///
    /// Replaces any previous value at that node; children are kept.
    pub fn put(&mut self, path: &str, value: impl Into<Value>) -> Result<(), TreeError> {
        self.node_mut_or_insert(path)?.value = Some(value.into());
        Ok(())
    }

    /// Graft `child` at `path`, replacing whatever node was there.
    pub fn put_child(&mut self, path: &str, child: PropertyTree) -> Result<(), TreeError> {
        *self.node_mut_or_insert(path)? = child;
        Ok(())
    }

    /// Remove and return the node at `path`. Sibling order is preserved.
    pub fn remove(&mut self, path: &str) -> Option<PropertyTree> {
        let parts = segments(path).ok()?;
        let (last, parents) = parts.split_last()?;
        let mut node = self;
        for seg in parents {
            node = node.children.get_mut(*seg)?;
        }
        node.children.shift_remove(*last)
    }

    /// Parse a tree from a JSON object.
    ///
    /// Objects become sub-trees, scalars become leaves, and arrays of
    /// scalars become comma-separated text leaves readable with
    /// [`get_vec_f64`](Self::get_vec_f64) / [`get_vec_string`](Self::get_vec_string).
    pub fn from_json_str(input: &str) -> Result<Self, TreeError> {
        let json: serde_json::Value =
            serde_json::from_str(input).map_err(|e| TreeError::Parse {
                reason: e.to_string(),
            })?;
        Self::from_json_value(&json)
    }

    /// Convert an already-parsed JSON object into a tree.
    pub fn from_json_value(json: &serde_json::Value) -> Result<Self, TreeError> {
        match json {
            serde_json::Value::Object(map) => {
                let mut tree = PropertyTree::new();
                for (key, value) in map {
                    if key.is_empty() || key.contains(PATH_SEPARATOR) {
                        return Err(TreeError::InvalidPath { path: key.clone() });
                    }
                    let child = match value {
                        serde_json::Value::Object(_) => Self::from_json_value(value)?,
                        other => PropertyTree {
                            value: Some(json_leaf(key, other)?),
                            children: IndexMap::new(),
                        },
                    };
                    tree.children.insert(key.clone(), child);
                }
                Ok(tree)
            }
            _ => Err(TreeError::Parse {
                reason: "top-level JSON value must be an object".to_string(),
            }),
        }
    }
}

fn json_leaf(key: &str, json: &serde_json::Value) -> Result<Value, TreeError> {
    use serde_json::Value as J;
    match json {
        J::String(s) => Ok(Value::String(s.clone())),
        J::Bool(b) => Ok(Value::Bool(*b)),
        J::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n.as_f64().map(Value::Float).ok_or_else(|| TreeError::Parse {
                reason: format!("'{key}': number {n} is out of range"),
            }),
        },
        J::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    J::String(_) | J::Bool(_) | J::Number(_) => {
                        parts.push(json_leaf(key, item)?.to_string());
                    }
                    _ => {
                        return Err(TreeError::Parse {
                            reason: format!("'{key}': arrays may only hold scalars"),
                        })
                    }
                }
            }
            Ok(Value::String(parts.join(",")))
        }
        J::Null => Err(TreeError::Parse {
            reason: format!("'{key}': null is not a valid value"),
        }),
        J::Object(_) => Err(TreeError::Parse {
            reason: format!("'{key}': expected a scalar"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_key_is_an_error_not_a_default() {
        let ptree = PropertyTree::new();
        assert_eq!(
            ptree.get_required("type"),
            Err(TreeError::MissingKey {
                path: "type".to_string()
            })
        );
        assert_eq!(ptree.get_optional("type"), None);
    }

    #[test]
    fn intermediate_node_without_value_is_missing() {
        let mut ptree = PropertyTree::new();
        ptree.put("geometry.area", 1.0).unwrap();
        assert!(ptree.contains("geometry"));
        assert!(matches!(
            ptree.get_required("geometry"),
            Err(TreeError::MissingKey { .. })
        ));
    }

    #[test]
    fn empty_segment_is_invalid() {
        let mut ptree = PropertyTree::new();
        assert!(matches!(
            ptree.put("a..b", 1),
            Err(TreeError::InvalidPath { .. })
        ));
        assert!(matches!(
            ptree.get_required(""),
            Err(TreeError::InvalidPath { .. })
        ));
    }

    #[test]
    fn numeric_getters_coerce_text_and_ints() {
        let mut ptree = PropertyTree::new();
        ptree.put("a", "1.5").unwrap();
        ptree.put("b", 3).unwrap();
        ptree.put("c", " 7 ").unwrap();
        ptree.put("d", "1").unwrap();
        assert_eq!(ptree.get_f64("a").unwrap(), 1.5);
        assert_eq!(ptree.get_f64("b").unwrap(), 3.0);
        assert_eq!(ptree.get_i64("c").unwrap(), 7);
        assert!(ptree.get_bool("d").unwrap());
    }

    #[test]
    fn type_mismatch_reports_kinds() {
        let mut ptree = PropertyTree::new();
        ptree.put("flag", true).unwrap();
        match ptree.get_f64("flag") {
            Err(TreeError::TypeMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, "float");
                assert_eq!(found, "bool");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
        assert!(matches!(
            ptree.get_string("flag"),
            Err(TreeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn list_getters_split_on_commas() {
        let mut ptree = PropertyTree::new();
        ptree.put("electrodes", "anode, cathode").unwrap();
        ptree.put("times", "0.1,0.2, 0.4").unwrap();
        ptree.put("single", 2.5).unwrap();
        assert_eq!(
            ptree.get_vec_string("electrodes").unwrap(),
            vec!["anode".to_string(), "cathode".to_string()]
        );
        assert_eq!(ptree.get_vec_f64("times").unwrap(), vec![0.1, 0.2, 0.4]);
        assert_eq!(ptree.get_vec_f64("single").unwrap(), vec![2.5]);
    }

    #[test]
    fn put_child_and_remove_keep_order() {
        let mut geometry = PropertyTree::new();
        geometry.put("area", 1.0).unwrap();
        let mut ptree = PropertyTree::new();
        ptree.put("first", 1).unwrap();
        ptree.put_child("geometry", geometry.clone()).unwrap();
        ptree.put("last", 3).unwrap();

        assert_eq!(ptree.get_child("geometry").unwrap(), &geometry);
        let removed = ptree.remove("geometry").unwrap();
        assert_eq!(removed, geometry);
        let keys: Vec<&str> = ptree.children().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "last"]);
        assert!(ptree.remove("geometry").is_none());
    }

    #[test]
    fn json_loading() {
        let ptree = PropertyTree::from_json_str(
            r#"{
                "type": "Dummy",
                "steps": 4,
                "time_step": 0.5,
                "verbose": false,
                "electrodes": ["anode", "cathode"],
                "geometry": { "area": 2.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(ptree.get_string("type").unwrap(), "Dummy");
        assert_eq!(ptree.get_i64("steps").unwrap(), 4);
        assert_eq!(ptree.get_f64("time_step").unwrap(), 0.5);
        assert!(!ptree.get_bool("verbose").unwrap());
        assert_eq!(ptree.get_vec_string("electrodes").unwrap().len(), 2);
        assert_eq!(ptree.get_f64("geometry.area").unwrap(), 2.0);
        let keys: Vec<&str> = ptree.children().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["type", "steps", "time_step", "verbose", "electrodes", "geometry"]
        );
    }

    #[test]
    fn json_rejects_null_and_non_objects() {
        assert!(matches!(
            PropertyTree::from_json_str(r#"{"a": null}"#),
            Err(TreeError::Parse { .. })
        ));
        assert!(matches!(
            PropertyTree::from_json_str("[1, 2]"),
            Err(TreeError::Parse { .. })
        ));
        assert!(matches!(
            PropertyTree::from_json_str(r#"{"a.b": 1}"#),
            Err(TreeError::InvalidPath { .. })
        ));
    }

    fn arb_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z_]{1,6}", 1..4).prop_map(|segs| segs.join("."))
    }

    proptest! {
        #[test]
        fn put_then_get_returns_value(path in arb_path(), x in -1.0e6f64..1.0e6) {
            let mut ptree = PropertyTree::new();
            ptree.put(&path, x).unwrap();
            prop_assert_eq!(ptree.get_f64(&path).unwrap(), x);
            prop_assert!(ptree.contains(&path));
        }

        #[test]
        fn remove_makes_key_missing(path in arb_path()) {
            let mut ptree = PropertyTree::new();
            ptree.put(&path, "v").unwrap();
            prop_assert!(ptree.remove(&path).is_some());
            let is_missing = matches!(
                ptree.get_required(&path),
                Err(TreeError::MissingKey { .. })
            );
            prop_assert!(is_missing);
        }
    }
}
