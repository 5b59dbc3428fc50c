//! Typed access to YAML nodes.
//!
//! Every extraction returns `Option`: a missing child and a child of the wrong
//! shape are both `None`, nothing here panics on untrusted input.
//!
//! Documents read from text are loaded with [`load_document`], which keeps
//! every scalar as its source text. The typed readers below parse that text
//! on demand, so a label like `1.10` or an all-digit id stays verbatim.

use nalgebra::DVector;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use yaml_rust::parser::{Event, EventReceiver, Parser};
use yaml_rust::scanner::TScalarStyle;
use yaml_rust::ScanError;

const ROWS_KEY: &str = "rows";
const COLS_KEY: &str = "cols";
const DATA_KEY: &str = "data";

/// Conversion of a single node into a typed value.
pub trait FromNode: Sized {
    fn from_node(node: &Value) -> Option<Self>;
}

/// Strips YAML tags (`!foo value`) so that tagged scalars read like plain ones.
pub fn untag(node: &Value) -> &Value {
    match node {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Reads the child `key` of a map node as `T`.
///
/// Returns `None` if `node` is not a map, has no such child, or the child
/// cannot be converted.
pub fn safe_get<T: FromNode>(node: &Value, key: &str) -> Option<T> {
    untag(node).get(key).and_then(T::from_node)
}

/// Parses YAML text and returns its first document.
///
/// Plain scalars are kept as [`Value::String`] holding the source text,
/// except for the null forms (`~`, `null`, empty) which become
/// [`Value::Null`]. Tags are dropped and aliases are resolved to a copy of
/// the anchored node.
///
/// Returns `Ok(None)` for a stream without documents.
///
/// # Errors
///
/// Returns the [`ScanError`] of malformed YAML.
pub fn load_document(contents: &str) -> Result<Option<Value>, ScanError> {
    let mut builder = NodeBuilder::default();
    let mut parser = Parser::new(contents.chars());
    parser.load(&mut builder, false)?;
    Ok(builder.documents.into_iter().next())
}

#[derive(Default)]
struct NodeBuilder {
    documents: Vec<Value>,
    /// Open nodes with their anchor id (0 for none).
    stack: Vec<(Value, usize)>,
    /// Pending key of every open mapping.
    keys: Vec<Option<Value>>,
    anchors: HashMap<usize, Value>,
}

impl NodeBuilder {
    fn insert(&mut self, node: Value, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.stack.last_mut() {
            None => self.stack.push((node, 0)),
            Some((Value::Sequence(values), _)) => values.push(node),
            Some((Value::Mapping(map), _)) => {
                if let Some(slot) = self.keys.last_mut() {
                    match slot.take() {
                        None => *slot = Some(node),
                        Some(key) => {
                            map.insert(key, node);
                        }
                    }
                }
            }
            Some(_) => {}
        }
    }

    fn close(&mut self) {
        if let Some((node, anchor)) = self.stack.pop() {
            self.insert(node, anchor);
        }
    }
}

impl EventReceiver for NodeBuilder {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::DocumentEnd => {
                let root = self.stack.pop().map_or(Value::Null, |(node, _)| node);
                self.documents.push(root);
            }
            Event::SequenceStart(anchor) => {
                self.stack.push((Value::Sequence(Vec::new()), anchor));
            }
            Event::MappingStart(anchor) => {
                self.stack.push((Value::Mapping(Mapping::new()), anchor));
                self.keys.push(None);
            }
            Event::SequenceEnd => self.close(),
            Event::MappingEnd => {
                self.keys.pop();
                self.close();
            }
            Event::Scalar(text, style, anchor, _) => {
                self.insert(scalar_node(text, style), anchor);
            }
            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or(Value::Null);
                self.insert(node, 0);
            }
            _ => {}
        }
    }
}

fn scalar_node(text: String, style: TScalarStyle) -> Value {
    let is_null = matches!(text.as_str(), "" | "~" | "null" | "Null" | "NULL");
    if style == TScalarStyle::Plain && is_null {
        Value::Null
    } else {
        Value::String(text)
    }
}

impl FromNode for String {
    /// Any scalar is accepted. Text is returned verbatim; numbers and
    /// booleans built in memory are rendered with `to_string`.
    fn from_node(node: &Value) -> Option<Self> {
        match untag(node) {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl FromNode for u64 {
    /// Accepts decimal, `0x` hexadecimal and `0o` octal text.
    fn from_node(node: &Value) -> Option<Self> {
        match untag(node) {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => parse_unsigned(s.trim()),
            _ => None,
        }
    }
}

fn parse_unsigned(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(octal) = text.strip_prefix("0o") {
        u64::from_str_radix(octal, 8).ok()
    } else {
        text.parse().ok()
    }
}

impl FromNode for u32 {
    fn from_node(node: &Value) -> Option<Self> {
        u64::from_node(node).and_then(|v| u32::try_from(v).ok())
    }
}

impl FromNode for f64 {
    fn from_node(node: &Value) -> Option<Self> {
        match untag(node) {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_real(s.trim()),
            _ => None,
        }
    }
}

/// Parses a real, including the YAML spellings of infinity and NaN.
fn parse_real(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ => text.parse().ok(),
    }
}

impl FromNode for DVector<f64> {
    /// Accepts a plain sequence of numbers or a column matrix map
    /// `{rows: n, cols: 1, data: [...]}`.
    fn from_node(node: &Value) -> Option<Self> {
        match untag(node) {
            Value::Sequence(values) => sequence_to_vector(values),
            matrix @ Value::Mapping(_) => {
                let rows: usize = usize::try_from(safe_get::<u64>(matrix, ROWS_KEY)?).ok()?;
                let cols: u64 = safe_get(matrix, COLS_KEY)?;
                let data = match untag(matrix.get(DATA_KEY)?) {
                    Value::Sequence(values) => sequence_to_vector(values)?,
                    _ => return None,
                };
                if cols != 1 || data.len() != rows {
                    return None;
                }
                Some(data)
            }
            _ => None,
        }
    }
}

fn sequence_to_vector(values: &[Value]) -> Option<DVector<f64>> {
    let parsed = values
        .iter()
        .map(f64::from_node)
        .collect::<Option<Vec<f64>>>()?;
    Some(DVector::from_vec(parsed))
}

/// Writes a vector as a column matrix map `{rows, cols, data}`.
pub fn vector_to_node(vector: &DVector<f64>) -> Value {
    let mut matrix = Mapping::new();
    matrix.insert(ROWS_KEY.into(), (vector.len() as u64).into());
    matrix.insert(COLS_KEY.into(), 1u64.into());
    matrix.insert(
        DATA_KEY.into(),
        Value::Sequence(vector.iter().map(|&x| Value::from(x)).collect()),
    );
    Value::Mapping(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Value {
        load_document(text).unwrap().unwrap()
    }

    #[test]
    fn test_safe_get_scalars() {
        let node = load(
            "name: cam0\nwidth: 752\nquoted: \"480\"\ndelay: 18446744073709551615\nnegative: -3\nratio: 0.5\nmask: 0x1F\n",
        );

        assert_eq!(safe_get::<String>(&node, "name"), Some("cam0".to_string()));
        assert_eq!(safe_get::<u32>(&node, "width"), Some(752));
        assert_eq!(safe_get::<u32>(&node, "quoted"), Some(480));
        assert_eq!(safe_get::<u64>(&node, "delay"), Some(u64::MAX));
        assert_eq!(safe_get::<u32>(&node, "delay"), None);
        assert_eq!(safe_get::<u64>(&node, "negative"), None);
        assert_eq!(safe_get::<u64>(&node, "ratio"), None);
        assert_eq!(safe_get::<u64>(&node, "mask"), Some(31));
        assert_eq!(safe_get::<String>(&node, "width"), Some("752".to_string()));
        assert_eq!(safe_get::<String>(&node, "missing"), None);
    }

    #[test]
    fn test_scalars_keep_source_text() {
        let node = load("a: 1.10\nb: 1e3\nc: 0x1F\nd: 0012\ne: true\nf: '007'\n");

        assert_eq!(safe_get::<String>(&node, "a").as_deref(), Some("1.10"));
        assert_eq!(safe_get::<String>(&node, "b").as_deref(), Some("1e3"));
        assert_eq!(safe_get::<String>(&node, "c").as_deref(), Some("0x1F"));
        assert_eq!(safe_get::<String>(&node, "d").as_deref(), Some("0012"));
        assert_eq!(safe_get::<String>(&node, "e").as_deref(), Some("true"));
        assert_eq!(safe_get::<String>(&node, "f").as_deref(), Some("007"));
        assert_eq!(safe_get::<f64>(&node, "b"), Some(1000.0));
    }

    #[test]
    fn test_null_forms() {
        let node = load("a: ~\nb: null\nc:\nd: 'null'\n");
        for key in ["a", "b", "c"] {
            assert_eq!(untag(&node).get(key), Some(&Value::Null), "{}", key);
        }
        assert_eq!(safe_get::<String>(&node, "d").as_deref(), Some("null"));
    }

    #[test]
    fn test_real_special_values() {
        let node = load("v: [.inf, -.inf, .nan, -1.5e-3]");
        let v: DVector<f64> = safe_get(&node, "v").unwrap();
        assert_eq!(v[0], f64::INFINITY);
        assert_eq!(v[1], f64::NEG_INFINITY);
        assert!(v[2].is_nan());
        assert_eq!(v[3], -1.5e-3);
    }

    #[test]
    fn test_load_document_structure() {
        let node = load(
            "base: &b [1, 2]\ncopy: *b\nnested:\n  inner: {x: 1}\n---\nsecond: 2\n",
        );
        let base: DVector<f64> = safe_get(&node, "base").unwrap();
        let copy: DVector<f64> = safe_get(&node, "copy").unwrap();
        assert_eq!(base, copy);
        let nested = untag(&node).get("nested").unwrap();
        assert_eq!(safe_get::<u64>(nested.get("inner").unwrap(), "x"), Some(1));
        assert!(untag(&node).get("second").is_none());
    }

    #[test]
    fn test_load_document_empty_and_malformed() {
        assert_eq!(load_document("").unwrap(), None);
        assert_eq!(load_document("# only a comment\n").unwrap(), None);
        assert!(load_document("key: [unclosed").is_err());
    }

    #[test]
    fn test_safe_get_on_non_map() {
        let node = load("[1, 2, 3]");
        assert_eq!(safe_get::<u64>(&node, "rows"), None);
        assert_eq!(safe_get::<u64>(&Value::Null, "rows"), None);
    }

    #[test]
    fn test_vector_from_sequence() {
        let node = load("v: [1, 2.5, -3]");
        let v: DVector<f64> = safe_get(&node, "v").unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.5, -3.0]);

        let bad = load("v: [1, x, 3]");
        assert_eq!(safe_get::<DVector<f64>>(&bad, "v"), None);
    }

    #[test]
    fn test_vector_from_matrix_map() {
        let node = load("v:\n  rows: 3\n  cols: 1\n  data: [0.1, 0.2, 0.3]\n");
        let v: DVector<f64> = safe_get(&node, "v").unwrap();
        assert_eq!(v.as_slice(), &[0.1, 0.2, 0.3]);

        let wrong_rows = load("v: {rows: 2, cols: 1, data: [0.1, 0.2, 0.3]}");
        assert_eq!(safe_get::<DVector<f64>>(&wrong_rows, "v"), None);

        let not_a_column = load("v: {rows: 1, cols: 3, data: [0.1, 0.2, 0.3]}");
        assert_eq!(safe_get::<DVector<f64>>(&not_a_column, "v"), None);

        let missing_data = load("v: {rows: 0, cols: 1}");
        assert_eq!(safe_get::<DVector<f64>>(&missing_data, "v"), None);
    }

    #[test]
    fn test_empty_vector() {
        let node = load("v: []");
        let v: DVector<f64> = safe_get(&node, "v").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_tagged_values_are_read_through() {
        let node = load("width: !pixels 640");
        assert_eq!(safe_get::<u32>(&node, "width"), Some(640));

        let tagged: Value = serde_yaml::from_str("width: !pixels 640").unwrap();
        assert_eq!(safe_get::<u32>(&tagged, "width"), Some(640));
    }

    #[test]
    fn test_in_memory_numbers() {
        let node: Value = serde_yaml::from_str("width: 752\nratio: 0.5\n").unwrap();
        assert_eq!(safe_get::<u32>(&node, "width"), Some(752));
        assert_eq!(safe_get::<f64>(&node, "ratio"), Some(0.5));
        assert_eq!(safe_get::<String>(&node, "ratio").as_deref(), Some("0.5"));
    }

    #[test]
    fn test_vector_to_node_shape() {
        let v = DVector::from_vec(vec![1.5, -2.0]);
        let node = vector_to_node(&v);
        assert_eq!(safe_get::<u64>(&node, "rows"), Some(2));
        assert_eq!(safe_get::<u64>(&node, "cols"), Some(1));
        assert_eq!(DVector::<f64>::from_node(&node), Some(v));
    }
}
