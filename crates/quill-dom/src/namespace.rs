//! Namespaces and the prefix resolver.
//!
//! [§ 2.8 Namespaces](https://infra.spec.whatwg.org/#namespaces)
//!
//! The HTML parser only ever deals with six namespaces. Prefixes are resolved
//! against a fixed table; there is no `xmlns` scoping as in XML documents.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// [§ 2.8 Namespaces](https://infra.spec.whatwg.org/#namespaces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum Namespace {
    /// "The HTML namespace is `http://www.w3.org/1999/xhtml`."
    #[strum(serialize = "html")]
    Html,
    /// "The MathML namespace is `http://www.w3.org/1998/Math/MathML`."
    #[strum(serialize = "math")]
    MathMl,
    /// "The SVG namespace is `http://www.w3.org/2000/svg`."
    #[strum(serialize = "svg")]
    Svg,
    /// "The XLink namespace is `http://www.w3.org/1999/xlink`."
    #[strum(serialize = "xlink")]
    XLink,
    /// "The XML namespace is `http://www.w3.org/XML/1998/namespace`."
    #[strum(serialize = "xml")]
    Xml,
    /// "The XMLNS namespace is `http://www.w3.org/2000/xmlns/`."
    #[strum(serialize = "xmlns")]
    Xmlns,
}

impl Namespace {
    /// The namespace URI.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Look a namespace up by its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|ns| ns.uri() == uri)
    }

    /// The conventional prefix used when serializing attributes in this
    /// namespace, if it has one.
    #[must_use]
    pub const fn conventional_prefix(self) -> Option<&'static str> {
        match self {
            Self::XLink => Some("xlink"),
            Self::Xml => Some("xml"),
            Self::Xmlns => Some("xmlns"),
            Self::Html | Self::MathMl | Self::Svg => None,
        }
    }
}

/// Reserved attribute prefixes and the namespace each one is bound to.
const RESERVED_PREFIXES: &[(&str, Namespace)] = &[
    ("xml", Namespace::Xml),
    ("xlink", Namespace::XLink),
    ("xmlns", Namespace::Xmlns),
];

/// Resolve a reserved prefix to its namespace.
///
/// ```
/// use quill_dom::{Namespace, resolve_prefix};
/// assert_eq!(resolve_prefix("xlink"), Some(Namespace::XLink));
/// assert_eq!(resolve_prefix("foo"), None);
/// ```
#[must_use]
pub fn resolve_prefix(prefix: &str) -> Option<Namespace> {
    RESERVED_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|&(_, ns)| ns)
}

/// An attribute name split into prefix, local name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace prefix, if the name had a recognized one.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local_name: String,
    /// Namespace the prefix resolved to.
    pub namespace: Option<Namespace>,
}

impl QualifiedName {
    /// A name with no prefix and no namespace.
    #[must_use]
    pub fn local(name: &str) -> Self {
        Self {
            prefix: None,
            local_name: name.to_string(),
            namespace: None,
        }
    }

    /// Normalize a raw `prefix:local` attribute name.
    ///
    /// A bare `xmlns` lands in the XMLNS namespace. A prefix that is not in
    /// the reserved table is kept as part of the local name, which is what
    /// the HTML parser does for names like `foo:bar`.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        if raw == "xmlns" {
            return Self {
                prefix: None,
                local_name: raw.to_string(),
                namespace: Some(Namespace::Xmlns),
            };
        }
        match raw.split_once(':') {
            Some((prefix, local)) if !local.is_empty() => match resolve_prefix(prefix) {
                Some(ns) => Self {
                    prefix: Some(prefix.to_string()),
                    local_name: local.to_string(),
                    namespace: Some(ns),
                },
                None => Self::local(raw),
            },
            _ => Self::local(raw),
        }
    }
}

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "If any of the attributes on the token match the strings given in the
/// first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string given in the corresponding
/// cell in the second column, the local name being the string given in the
/// corresponding cell in the third column, and the namespace being the
/// namespace given in the corresponding cell in the fourth column."
///
/// Names outside the table come back unprefixed and without a namespace.
#[must_use]
pub fn adjust_foreign_attribute(name: &str) -> QualifiedName {
    match name {
        "xlink:actuate" | "xlink:arcrole" | "xlink:href" | "xlink:role" | "xlink:show"
        | "xlink:title" | "xlink:type" | "xml:lang" | "xml:space" | "xmlns"
        | "xmlns:xlink" => QualifiedName::resolve(name),
        _ => QualifiedName::local(name),
    }
}
