//! Minimal HCL writer
//!
//! Only what the generated files need: string, number and bool literals,
//! lists, and maps whose entries keep insertion order. Output is
//! deterministic: the same value always renders to the same text.

/// A value in a generated locals expression
#[derive(Debug, Clone, PartialEq)]
pub enum HclValue {
    String(String),
    Number(i64),
    Bool(bool),
    List(Vec<HclValue>),
    Map(HclMap),
}

impl From<&str> for HclValue {
    fn from(value: &str) -> Self {
        HclValue::String(value.to_string())
    }
}

impl From<String> for HclValue {
    fn from(value: String) -> Self {
        HclValue::String(value)
    }
}

impl From<i64> for HclValue {
    fn from(value: i64) -> Self {
        HclValue::Number(value)
    }
}

impl From<bool> for HclValue {
    fn from(value: bool) -> Self {
        HclValue::Bool(value)
    }
}

impl From<HclMap> for HclValue {
    fn from(value: HclMap) -> Self {
        HclValue::Map(value)
    }
}

/// Insertion-ordered map of attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HclMap {
    entries: Vec<(String, HclValue)>,
}

impl HclMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing entry in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HclValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HclValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HclValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<HclValue>> FromIterator<(K, V)> for HclMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HclMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Escape special characters in HCL strings, including template sequences
fn escape_hcl_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .replace("${", "$${")
        .replace("%{", "%%{")
}

/// Quoted HCL string literal
pub fn string_literal(s: &str) -> String {
    format!("\"{}\"", escape_hcl_string(s))
}

/// Whether `name` can be written as a bare identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Map key: bare when it is an identifier, quoted otherwise
pub fn format_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`, prefixing `_`
/// when the result would not start like an identifier
pub fn sanitize_identifier(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    match sanitized.chars().next() {
        None => "_".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{}", sanitized),
        Some(_) => sanitized,
    }
}

fn scalar_literal(value: &HclValue) -> Option<String> {
    match value {
        HclValue::String(s) => Some(string_literal(s)),
        HclValue::Number(n) => Some(n.to_string()),
        HclValue::Bool(b) => Some(b.to_string()),
        HclValue::List(_) | HclValue::Map(_) => None,
    }
}

/// Render one attribute, one item per line, two spaces per indent level.
///
/// Named attributes render as `name = value`; list items pass `None` and get
/// a trailing comma after scalars and nested collections.
pub fn render_attribute(name: Option<&str>, value: &HclValue, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    let prefix = match name {
        Some(name) => format!("{}{} = ", pad, format_key(name)),
        None => pad.clone(),
    };
    let separator = if name.is_some() { "" } else { "," };

    if let Some(literal) = scalar_literal(value) {
        lines.push(format!("{}{}{}", prefix, literal, separator));
        return;
    }

    match value {
        HclValue::List(items) if items.is_empty() => {
            lines.push(format!("{}[]{}", prefix, separator));
        }
        HclValue::List(items) => {
            lines.push(format!("{}[", prefix));
            for item in items {
                render_attribute(None, item, indent + 1, lines);
            }
            lines.push(format!("{}]{}", pad, separator));
        }
        HclValue::Map(map) if map.is_empty() => {
            lines.push(format!("{}{{}}{}", prefix, separator));
        }
        HclValue::Map(map) => {
            lines.push(format!("{}{{", prefix));
            for (key, entry) in map.iter() {
                render_attribute(Some(key), entry, indent + 1, lines);
            }
            lines.push(format!("{}}}{}", pad, separator));
        }
        _ => {}
    }
}
