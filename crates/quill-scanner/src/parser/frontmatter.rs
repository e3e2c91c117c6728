//! YAML frontmatter extraction for skills, agents and scoped instructions
//!
//! Extraction is line based so every top-level key keeps its 1-indexed
//! source line. Typed views over the raw mapping report wrong-typed
//! fields individually instead of failing the whole block.

use crate::error::{ScanError, ScanResult};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// A parsed leading `---` block
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontmatter {
    /// Top-level key/value data
    pub data: Mapping,
    /// 1-indexed source line of each top-level key
    pub field_lines: BTreeMap<String, usize>,
    /// 1-indexed line of the opening delimiter
    pub frontmatter_start_line: usize,
    /// 1-indexed line of the first body line after the closing delimiter
    pub body_start_line: usize,
}

impl ParsedFrontmatter {
    /// Line to point a diagnostic about `field` at
    #[must_use]
    pub fn line_of(&self, field: &str) -> usize {
        self.field_lines
            .get(field)
            .copied()
            .unwrap_or(self.frontmatter_start_line)
    }

    /// Typed view of a single field
    #[must_use]
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Field<T> {
        Field::from_value(self.data.get(key))
    }
}

/// Extract the frontmatter block from a file
///
/// Returns `Ok(None)` when the file does not open with a closed `---`
/// block. A closed block whose YAML is invalid, or is not a mapping,
/// is a parse error.
///
/// # Errors
/// Returns an error if the block contents are not a YAML mapping
pub fn extract_frontmatter(content: &str) -> ScanResult<Option<ParsedFrontmatter>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Ok(None),
    }

    let mut block = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == DELIMITER {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return Ok(None);
    }

    let yaml = block.join("\n");
    let data = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(&yaml)
            .map_err(|e| ScanError::FrontmatterParse(e.to_string()))?
        {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => {
                return Err(ScanError::FrontmatterParse(format!(
                    "expected key/value pairs, found {}",
                    value_kind(&other)
                )))
            }
        }
    };

    let mut field_lines = BTreeMap::new();
    for (offset, line) in block.iter().enumerate() {
        if let Some(key) = top_level_key(line) {
            // Line 1 is the opening delimiter
            field_lines.entry(key).or_insert(offset + 2);
        }
    }

    Ok(Some(ParsedFrontmatter {
        data,
        field_lines,
        frontmatter_start_line: 1,
        body_start_line: block.len() + 3,
    }))
}

fn top_level_key(line: &str) -> Option<String> {
    if line.starts_with(char::is_whitespace) || line.starts_with('#') || line.starts_with('-') {
        return None;
    }
    let (key, _) = line.split_once(':')?;
    let key = key.trim().trim_matches(|c| c == '"' || c == '\'');
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Human readable name of a YAML value's type
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Shape of a single frontmatter field after typed conversion
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key absent or explicitly null
    Missing,
    /// Value converted to the expected type
    Present(T),
    /// Value present with an unexpected type
    WrongType(&'static str),
}

impl<T: DeserializeOwned> Field<T> {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(value) => serde_yaml::from_value(value.clone())
                .map_or_else(|_| Self::WrongType(value_kind(value)), Self::Present),
        }
    }
}

impl<T> Field<T> {
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// Either a YAML list of strings or one comma-separated string
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Inline(String),
}

impl StringList {
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Inline(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Skill frontmatter (`SKILL.md`)
#[derive(Debug, Clone, PartialEq)]
pub struct SkillFrontmatter {
    pub name: Field<String>,
    pub description: Field<String>,
    pub allowed_tools: Field<StringList>,
}

impl SkillFrontmatter {
    #[must_use]
    pub fn from_parsed(parsed: &ParsedFrontmatter) -> Self {
        Self {
            name: parsed.field("name"),
            description: parsed.field("description"),
            allowed_tools: parsed.field("allowed-tools"),
        }
    }
}

/// Agent definition frontmatter
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFrontmatter {
    pub name: Field<String>,
    pub description: Field<String>,
    pub tools: Field<StringList>,
    pub model: Field<String>,
}

impl AgentFrontmatter {
    #[must_use]
    pub fn from_parsed(parsed: &ParsedFrontmatter) -> Self {
        Self {
            name: parsed.field("name"),
            description: parsed.field("description"),
            tools: parsed.field("tools"),
            model: parsed.field("model"),
        }
    }
}

/// Scoped instruction frontmatter (`*.instructions.md`)
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionFrontmatter {
    pub apply_to: Field<StringList>,
}

impl InstructionFrontmatter {
    #[must_use]
    pub fn from_parsed(parsed: &ParsedFrontmatter) -> Self {
        Self {
            apply_to: parsed.field("applyTo"),
        }
    }
}
