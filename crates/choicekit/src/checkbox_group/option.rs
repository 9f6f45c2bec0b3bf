//! Option records and the option-list normalizer.
//!
//! A checkbox group accepts its options in one of three shapes:
//!
//! - bare identifiers (`1`, `"apple"`), labelled with their own text,
//! - partial option objects ([`PartialOption`]) that may omit any field but the
//!   identifier, and
//! - markup-declared children ([`OptionNode`]) whose attributes are read as an
//!   option record on every render pass.
//!
//! All three normalize into the same canonical, ordered list of
//! [`CheckboxOption`] records. Identifiers are not checked for uniqueness;
//! duplicate identifiers within one group are unsupported.

use std::fmt;
use std::sync::Arc;

use choicekit_core::PerfSpan;
use choicekit_core::logging::{span_names, targets};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a single option.
///
/// Identifiers compare by variant and content, so `1` and `"1"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A numeric identifier.
    Int(i64),
    /// A textual identifier.
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Literal label text for a bare identifier.
pub fn stringify_label(value: &OptionValue) -> String {
    value.to_string()
}

/// A rendered label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelNode {
    text: String,
}

impl LabelNode {
    /// The label's display text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for LabelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The render primitive handed to label functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelBuilder;

impl LabelBuilder {
    /// A text node.
    pub fn text(&self, text: impl Into<String>) -> LabelNode {
        LabelNode { text: text.into() }
    }

    /// Concatenate several nodes into one.
    pub fn concat(&self, nodes: impl IntoIterator<Item = LabelNode>) -> LabelNode {
        LabelNode {
            text: nodes.into_iter().map(|node| node.text).collect(),
        }
    }
}

/// A pure function producing a label from the render primitive.
pub type LabelFn = Arc<dyn Fn(&LabelBuilder) -> LabelNode + Send + Sync>;

/// Display label of an option: literal text, or a function rendered on demand.
#[derive(Clone)]
pub enum OptionLabel {
    /// Literal text.
    Text(String),
    /// Rendered through [`LabelBuilder`] each time the option is drawn.
    Render(LabelFn),
}

impl OptionLabel {
    /// Create a label from a render function.
    pub fn from_fn<F>(render: F) -> Self
    where
        F: Fn(&LabelBuilder) -> LabelNode + Send + Sync + 'static,
    {
        Self::Render(Arc::new(render))
    }

    /// Produce the displayable node for this label.
    pub fn render(&self) -> LabelNode {
        match self {
            Self::Text(text) => LabelBuilder.text(text.clone()),
            Self::Render(render) => render(&LabelBuilder),
        }
    }
}

impl Default for OptionLabel {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl PartialEq for OptionLabel {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Render(a), Self::Render(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for OptionLabel {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for OptionLabel {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Serialize for OptionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.render().as_str())
    }
}

impl<'de> Deserialize<'de> for OptionLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Text)
    }
}

/// A canonical option record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckboxOption {
    /// The identifier, absent for a select-all record declared without one.
    pub value: Option<OptionValue>,
    /// The display label.
    pub label: OptionLabel,
    /// Whether the option ignores user toggles.
    pub disabled: bool,
    /// Whether this record is the group's select-all control.
    pub check_all: bool,
}

impl CheckboxOption {
    /// Create an enabled option with the given identifier and label.
    pub fn new(value: impl Into<OptionValue>, label: impl Into<OptionLabel>) -> Self {
        Self {
            value: Some(value.into()),
            label: label.into(),
            disabled: false,
            check_all: false,
        }
    }

    /// Create a select-all record.
    pub fn select_all(label: impl Into<OptionLabel>) -> Self {
        Self {
            value: None,
            label: label.into(),
            disabled: false,
            check_all: true,
        }
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A partially-populated option object.
///
/// Fields left unset are filled in by [`normalize_options`]; an unset
/// `disabled` takes the group's flag at normalization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOption {
    /// The identifier.
    pub value: Option<OptionValue>,
    /// The display label.
    pub label: Option<OptionLabel>,
    /// Explicit disabled flag.
    pub disabled: Option<bool>,
    /// Marks the select-all record.
    #[serde(alias = "check-all")]
    pub check_all: bool,
}

/// One element of a declarative options input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    /// A bare identifier.
    Scalar(OptionValue),
    /// A partial option object.
    Partial(PartialOption),
}

impl From<OptionValue> for OptionSpec {
    fn from(value: OptionValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<PartialOption> for OptionSpec {
    fn from(option: PartialOption) -> Self {
        Self::Partial(option)
    }
}

impl From<CheckboxOption> for OptionSpec {
    fn from(option: CheckboxOption) -> Self {
        Self::Partial(PartialOption {
            value: option.value,
            label: Some(option.label),
            disabled: Some(option.disabled),
            check_all: option.check_all,
        })
    }
}

/// Normalize a declarative options input into the canonical option list.
///
/// `group_disabled` is copied into every record that does not set its own
/// flag. The copy is one-shot: changing the group flag later does not reach
/// records produced by an earlier call.
pub fn normalize_options(specs: &[OptionSpec], group_disabled: bool) -> Vec<CheckboxOption> {
    let _span = PerfSpan::new(span_names::NORMALIZE);
    let options: Vec<CheckboxOption> = specs
        .iter()
        .map(|spec| match spec {
            OptionSpec::Scalar(value) => CheckboxOption {
                label: OptionLabel::Text(stringify_label(value)),
                value: Some(value.clone()),
                disabled: group_disabled,
                check_all: false,
            },
            OptionSpec::Partial(partial) => CheckboxOption {
                value: partial.value.clone(),
                label: partial.label.clone().unwrap_or_default(),
                disabled: partial.disabled.unwrap_or(group_disabled),
                check_all: partial.check_all,
            },
        })
        .collect();
    tracing::trace!(target: targets::CHECKBOX_GROUP, count = options.len(), "normalized declared options");
    options
}

/// An attribute value on a markup-declared option.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeAttr {
    /// A boolean attribute (`disabled`, `check-all`).
    Bool(bool),
    /// A numeric attribute.
    Int(i64),
    /// A text attribute; an empty string is a bare attribute.
    Text(String),
    /// A label attribute.
    Label(OptionLabel),
}

impl NodeAttr {
    fn as_value(&self) -> Option<OptionValue> {
        match self {
            Self::Int(n) => Some(OptionValue::Int(*n)),
            Self::Text(s) => Some(OptionValue::Text(s.clone())),
            _ => None,
        }
    }

    fn as_label(&self) -> OptionLabel {
        match self {
            Self::Label(label) => label.clone(),
            Self::Text(s) => OptionLabel::Text(s.clone()),
            Self::Int(n) => OptionLabel::Text(n.to_string()),
            Self::Bool(b) => OptionLabel::Text(b.to_string()),
        }
    }

    /// Whether the attribute switches a boolean flag on.
    ///
    /// A bare attribute (empty string) and the text `"true"` count as set;
    /// any other text, such as `"false"`, leaves the flag off.
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s.is_empty() || s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl From<bool> for NodeAttr {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for NodeAttr {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeAttr {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeAttr {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NodeAttr {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<OptionLabel> for NodeAttr {
    fn from(label: OptionLabel) -> Self {
        Self::Label(label)
    }
}

/// A markup-declared child option, as recorded by the rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionNode {
    attrs: Vec<(String, NodeAttr)>,
}

impl OptionNode {
    /// Create a node with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute using builder pattern. A later value replaces an
    /// earlier one with the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<NodeAttr>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&NodeAttr> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether the node declares no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Read the node's attributes as an option record.
    ///
    /// Returns `None` for a node without attributes (plain text between
    /// children, for instance).
    pub fn to_option(&self) -> Option<CheckboxOption> {
        if self.is_empty() {
            return None;
        }
        let check_all = ["check-all", "checkAll"]
            .iter()
            .filter_map(|name| self.get(name))
            .any(NodeAttr::is_set);
        Some(CheckboxOption {
            value: self.get("value").and_then(NodeAttr::as_value),
            label: self.get("label").map(NodeAttr::as_label).unwrap_or_default(),
            disabled: self.get("disabled").is_some_and(NodeAttr::is_set),
            check_all,
        })
    }
}

/// Derive the canonical option list from markup-declared children.
pub fn options_from_nodes(nodes: &[OptionNode]) -> Vec<CheckboxOption> {
    let _span = PerfSpan::new(span_names::NORMALIZE);
    let options: Vec<CheckboxOption> = nodes.iter().filter_map(OptionNode::to_option).collect();
    tracing::trace!(target: targets::CHECKBOX_GROUP, count = options.len(), "recorded markup options");
    options
}
