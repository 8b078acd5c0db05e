//! Element attributes.
//!
//! [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
//!
//! Attributes are owned by their element. Their values can only change
//! through [`DomTree::set_attribute`](crate::DomTree::set_attribute), so
//! every change is published to mutation observers.

use std::fmt;

use crate::namespace::{Namespace, QualifiedName};

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// "Attr nodes are simply known as attributes. ... Attributes have a
/// namespace (null or a non-empty string), namespace prefix (null or a
/// non-empty string), local name (a non-empty string), value (a string),
/// and element (null or an element)."
///
/// Equality ignores the namespace, so `Attribute` is deliberately not
/// `Eq` or `Hash`:
///
/// ```compile_fail
/// fn needs_hash<T: std::hash::Hash>() {}
/// needs_hash::<quill_dom::Attribute>();
/// ```
#[derive(Debug, Clone)]
pub struct Attribute {
    local_name: String,
    prefix: Option<String>,
    namespace: Option<Namespace>,
    value: String,
}

impl Attribute {
    /// An attribute with no namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            prefix: None,
            namespace: None,
            value: value.into(),
        }
    }

    /// An attribute whose name has already been resolved.
    #[must_use]
    pub fn with_name(name: QualifiedName, value: impl Into<String>) -> Self {
        Self {
            local_name: name.local_name,
            prefix: name.prefix,
            namespace: name.namespace,
            value: value.into(),
        }
    }

    /// Local name (the part after the prefix).
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Namespace prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Namespace, if any.
    #[must_use]
    pub const fn namespace(&self) -> Option<Namespace> {
        self.namespace
    }

    /// Attribute value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// [§ 4.9.2](https://dom.spec.whatwg.org/#concept-attribute-qualified-name)
    ///
    /// "An attribute's qualified name is its local name if its namespace
    /// prefix is null, and its namespace prefix, followed by ":", followed by
    /// its local name, otherwise."
    #[must_use]
    pub fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Whether this is the element's `id` attribute.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.prefix.is_none() && self.local_name.eq_ignore_ascii_case("id")
    }

    /// Whether the attribute was given a non-empty value in the markup.
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        !self.value.is_empty()
    }

    /// Whether `qualified` names this attribute.
    fn matches_name(&self, qualified: &str) -> bool {
        match &self.prefix {
            Some(prefix) => qualified
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                == Some(self.local_name.as_str()),
            None => qualified == self.local_name,
        }
    }

    /// Replace the value, returning the old one.
    pub(crate) fn replace_value(&mut self, value: String) -> String {
        std::mem::replace(&mut self.value, value)
    }

    /// The name as written by the HTML serializer.
    ///
    /// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
    fn serialized_name(&self) -> String {
        match self.namespace {
            None | Some(Namespace::Html | Namespace::MathMl | Namespace::Svg) => {
                self.local_name.clone()
            }
            Some(Namespace::Xmlns) if self.local_name == "xmlns" => "xmlns".to_string(),
            Some(ns) => {
                let prefix = ns.conventional_prefix().unwrap_or_default();
                format!("{prefix}:{}", self.local_name)
            }
        }
    }
}

/// Two attributes are equal when their qualified names and values match.
/// The namespace does not take part in the comparison.
impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.prefix == other.prefix
            && self.local_name == other.local_name
    }
}

/// Serializes as `name="value"`.
///
/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Replace any occurrence of the "&" character by the string "&amp;".
/// Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the
/// string "&nbsp;". If the algorithm was invoked in the attribute mode,
/// replace any occurrences of the """ character by the string "&quot;"."
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"", self.serialized_name())?;
        for c in self.value.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '\u{00A0}' => f.write_str("&nbsp;")?,
                '"' => f.write_str("&quot;")?,
                _ => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

/// [§ 4.9 Element attribute list](https://dom.spec.whatwg.org/#concept-element-attribute)
///
/// Ordered by insertion, unique by qualified name. When the markup repeats a
/// name the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Append `attr` unless an attribute with the same qualified name is
    /// already present.
    ///
    /// Returns `false` if the attribute was rejected as a duplicate.
    pub fn push(&mut self, attr: Attribute) -> bool {
        if self.position(&attr.name()).is_some() {
            return false;
        }
        self.attrs.push(attr);
        true
    }

    fn position(&self, qualified: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.matches_name(qualified))
    }

    /// Value of the attribute with the given qualified name.
    #[must_use]
    pub fn get(&self, qualified: &str) -> Option<&str> {
        self.get_attribute(qualified).map(Attribute::value)
    }

    /// The attribute with the given qualified name.
    #[must_use]
    pub fn get_attribute(&self, qualified: &str) -> Option<&Attribute> {
        self.position(qualified).map(|i| &self.attrs[i])
    }

    /// Value of the attribute with the given namespace and local name.
    #[must_use]
    pub fn get_ns(&self, namespace: Option<Namespace>, local_name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.namespace == namespace && a.local_name == local_name)
            .map(Attribute::value)
    }

    /// Whether an attribute with the given qualified name exists.
    #[must_use]
    pub fn contains(&self, qualified: &str) -> bool {
        self.position(qualified).is_some()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attrs.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Order-insensitive comparison on name, namespace and value.
    ///
    /// Used by the Noah's Ark clause, which needs "the same attributes" in
    /// the stricter sense.
    #[must_use]
    pub fn same_set_as(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.attrs.iter().all(|a| {
                other
                    .attrs
                    .iter()
                    .any(|b| a == b && a.namespace == b.namespace)
            })
    }

    pub(crate) fn get_mut(&mut self, qualified: &str) -> Option<&mut Attribute> {
        let index = self.position(qualified)?;
        self.attrs.get_mut(index)
    }

    pub(crate) fn remove(&mut self, qualified: &str) -> Option<Attribute> {
        let index = self.position(qualified)?;
        Some(self.attrs.remove(index))
    }
}

/// Collects attributes, keeping the first of any repeated name.
impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut list = Self::new();
        for attr in iter {
            let _ = list.push(attr);
        }
        list
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
