//! Node creation and insertion, the stack of open elements, the list of
//! active formatting elements and the recovery algorithms built on them.
//!
//! [§ 13.2.4 Parse state](https://html.spec.whatwg.org/multipage/parsing.html#parse-state)
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use quill_dom::{ElementData, Namespace, NodeId, NodeType};

use super::LOG_TARGET;
use super::core::{ActiveFormattingElement, HTMLParser, InsertionMode};
use super::foreign_content::attributes_for;
use crate::error::ParseErrorCode;
use crate::tokenizer::{RawTextKind, TagAttribute, Token};

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// The element-type lists that bound each kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup` and
    /// `option`.
    Select,
}

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// HTML elements in the special category.
const SPECIAL_HTML_ELEMENTS: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure", "footer",
    "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
    "hr", "html", "iframe", "img", "input", "keygen", "li", "link", "listing", "main",
    "marquee", "menu", "meta", "nav", "noembed", "noframes", "noscript", "object", "ol", "p",
    "param", "plaintext", "pre", "script", "search", "section", "select", "source", "style",
    "summary", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "title",
    "tr", "track", "ul", "wbr", "xmp",
];

/// [§ 13.2.4.2 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
const FORMATTING_ELEMENTS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "generate all implied end tags thoroughly" adds the table parts.
const IMPLIED_END_TAGS_THOROUGHLY: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt",
    "rtc", "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
///
/// "The adjusted insertion location": inside `parent`, before `before` when
/// it is set, otherwise as the last child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct InsertionPoint {
    pub(super) parent: NodeId,
    pub(super) before: Option<NodeId>,
}

// =============================================================================
// Node queries
// =============================================================================

impl HTMLParser {
    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    pub(super) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<NodeId> {
        match self.context_element {
            Some(context) if self.stack_of_open_elements.len() == 1 => Some(context),
            _ => self.current_node(),
        }
    }

    pub(super) fn is_in_html_namespace(&self, id: NodeId) -> bool {
        self.tree
            .as_element(id)
            .is_some_and(|element| element.namespace == Namespace::Html)
    }

    /// True if `id` is the HTML element `name`.
    pub(super) fn is_html_element(&self, id: NodeId, name: &str) -> bool {
        self.tree
            .as_element(id)
            .is_some_and(|element| element.is_html(name))
    }

    /// True if `id` is an HTML element whose name is one of `names`.
    pub(super) fn is_html_element_in(&self, id: NodeId, names: &[&str]) -> bool {
        self.tree.as_element(id).is_some_and(|element| {
            element.namespace == Namespace::Html && names.contains(&element.local_name.as_str())
        })
    }

    /// True if the current node is the HTML element `name`.
    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node()
            .is_some_and(|id| self.is_html_element(id, name))
    }

    /// The local name of an element, empty for other nodes.
    pub(super) fn local_name(&self, id: NodeId) -> &str {
        self.tree
            .as_element(id)
            .map_or("", |element| element.local_name.as_str())
    }

    /// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    pub(super) fn is_special(&self, id: NodeId) -> bool {
        let Some(element) = self.tree.as_element(id) else {
            return false;
        };
        let name = element.local_name.as_str();
        match element.namespace {
            Namespace::Html => SPECIAL_HTML_ELEMENTS.contains(&name),
            Namespace::MathMl => {
                matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml")
            }
            Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
            _ => false,
        }
    }

    pub(super) fn is_formatting_tag(name: &str) -> bool {
        FORMATTING_ELEMENTS.contains(&name)
    }

    /// Whether the stack of open elements contains the HTML element `name`
    /// anywhere, regardless of scope.
    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.is_html_element(id, name))
    }
}

// =============================================================================
// Creating and inserting nodes
// =============================================================================

impl HTMLParser {
    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target"
    pub(super) fn appropriate_place(&self, override_target: Option<NodeId>) -> InsertionPoint {
        // STEP 1: "If there was an override target specified, then let target be
        //          the override target. Otherwise, let target be the current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents"
        //
        // Template contents are kept as the template's own children.

        // STEP 2: "If foster parenting is enabled and target is a table, tbody,
        //          tfoot, thead, or tr element"
        if self.foster_parenting
            && self.is_html_element_in(target, &["table", "tbody", "tfoot", "thead", "tr"])
        {
            return self.foster_parent_location();
        }
        // "Otherwise: Let adjusted insertion location be inside target, after
        // its last child (if any)."
        InsertionPoint {
            parent: target,
            before: None,
        }
    }

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    fn foster_parent_location(&self) -> InsertionPoint {
        // "Let last template be the last template element in the stack of open
        // elements, if any."
        let last_template = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.is_html_element(id, "template"));
        // "Let last table be the last table element in the stack of open
        // elements, if any."
        let last_table = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.is_html_element(id, "table"));

        // "If there is a last template and either there is no last table, or
        // there is one, but last template is lower (more recently added) than
        // last table in the stack of open elements, then: let adjusted
        // insertion location be inside last template's template contents,
        // after its last child (if any), and abort these steps."
        if let Some(template_index) = last_template
            && last_table.is_none_or(|table_index| template_index > table_index)
        {
            return InsertionPoint {
                parent: self.stack_of_open_elements[template_index],
                before: None,
            };
        }

        match last_table {
            // "If there is no last table, then let adjusted insertion location
            // be inside the first element in the stack of open elements (the
            // html element), after its last child (if any)"
            None => InsertionPoint {
                parent: self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT),
                before: None,
            },
            Some(table_index) => {
                let table = self.stack_of_open_elements[table_index];
                // "If last table has a parent node, then let adjusted insertion
                // location be inside last table's parent node, immediately
                // before last table"
                if let Some(parent) = self.tree.parent(table) {
                    InsertionPoint {
                        parent,
                        before: Some(table),
                    }
                } else {
                    // "Let previous element be the element immediately above
                    // last table in the stack of open elements."
                    InsertionPoint {
                        parent: table_index
                            .checked_sub(1)
                            .map_or(NodeId::ROOT, |i| self.stack_of_open_elements[i]),
                        before: None,
                    }
                }
            }
        }
    }

    pub(super) fn insert_at(&mut self, point: InsertionPoint, node: NodeId) {
        let inserted = match point.before {
            Some(reference) => self.tree.insert_before(point.parent, node, reference),
            None => self.tree.append_child(point.parent, node),
        };
        debug_assert!(inserted.is_ok(), "insertion point is an element or the document");
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token" in the given namespace. The element
    /// is allocated but not attached.
    pub(super) fn create_element(
        &mut self,
        local_name: &str,
        attributes: &[TagAttribute],
        namespace: Namespace,
    ) -> NodeId {
        let attrs = attributes_for(namespace, attributes);
        self.tree.alloc(NodeType::Element(ElementData::new(
            local_name,
            namespace,
            attrs,
        )))
    }

    /// Create an HTML element for a start tag token without inserting it.
    pub(super) fn create_element_for_token(&mut self, token: &Token) -> NodeId {
        let name = token.tag_name().unwrap_or_default().to_string();
        self.create_element(&name, token.attributes(), Namespace::Html)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Insert a foreign element": create it, insert it at the appropriate
    /// place and push it onto the stack of open elements.
    pub(super) fn insert_foreign_element(
        &mut self,
        local_name: &str,
        attributes: &[TagAttribute],
        namespace: Namespace,
    ) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate place
        //          for inserting a node."
        let point = self.appropriate_place(None);
        // STEP 2: "Let element be the result of creating an element for the
        //          token in the given namespace"
        let element = self.create_element(local_name, attributes, namespace);
        // STEP 3: "If it is possible to insert element at the adjusted insertion
        //          location, then insert element"
        self.insert_at(point, element);
        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.stack_of_open_elements.push(element);
        element
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the token,
    /// in the HTML namespace."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        let name = token.tag_name().unwrap_or_default().to_string();
        self.insert_foreign_element(&name, token.attributes(), Namespace::Html)
    }

    /// Insert an HTML element with no attributes, for the synthesized start
    /// tags of implied elements (`html`, `head`, `body`, `tbody`, `tr`, ...).
    pub(super) fn insert_html_element_named(&mut self, name: &str) -> NodeId {
        self.insert_foreign_element(name, &[], Namespace::Html)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data."
    pub(super) fn insert_character(&mut self, c: char) {
        // STEP 2: "Let the adjusted insertion location be the appropriate place
        //          for inserting a node."
        let point = self.appropriate_place(None);

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //          then return."
        if point.parent == NodeId::ROOT {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's data."
        let previous = match point.before {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(point.parent),
        };
        if let Some(previous) = previous
            && let Some(node) = self.tree.get_mut(previous)
            && let NodeType::Text(ref mut text) = node.node_type
        {
            text.push(c);
            return;
        }

        // "Otherwise, create a new Text node whose data is data ... and insert
        // the newly created node at the adjusted insertion location."
        let text = self.tree.alloc(NodeType::Text(String::from(c)));
        self.insert_at(point, text);
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "Insert a comment" at the appropriate place.
    pub(super) fn insert_comment(&mut self, data: &str) {
        let point = self.appropriate_place(None);
        let comment = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.insert_at(point, comment);
    }

    /// Append a freshly created node to the Document.
    pub(super) fn append_to_document(&mut self, node: NodeId) {
        let appended = self.tree.append_child(NodeId::ROOT, node);
        debug_assert!(appended.is_ok(), "node is freshly allocated");
    }

    /// "Insert a comment as the last child of" `parent`.
    pub(super) fn insert_comment_in(&mut self, parent: NodeId, data: &str) {
        let comment = self.tree.alloc(NodeType::Comment(data.to_string()));
        let appended = self.tree.append_child(parent, comment);
        debug_assert!(appended.is_ok(), "comment is freshly allocated");
    }

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// The generic raw text and generic RCDATA element parsing algorithms:
    /// insert the element, switch the tokenizer to the matching text state,
    /// remember the insertion mode and switch to "text".
    pub(super) fn parse_generic_text_element(&mut self, token: &Token, kind: RawTextKind) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // STEP 2: "switch the tokenizer to the RAWTEXT state" / "RCDATA state"
        self.tokenizer.switch_to_raw_text(kind);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.switch_mode(InsertionMode::Text);
    }
}

// =============================================================================
// The stack of open elements
// =============================================================================

impl HTMLParser {
    /// Pop elements until the HTML element `name` has been popped.
    pub(super) fn pop_until(&mut self, name: &str) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.is_html_element(id, name) {
                break;
            }
        }
    }

    /// Pop elements until an HTML element named one of `names` has been
    /// popped. Used for headings and table cells.
    pub(super) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.is_html_element_in(id, names) {
                break;
            }
        }
    }

    /// Pop elements until `node` has been popped.
    pub(super) fn pop_until_node(&mut self, node: NodeId) {
        if let Some(index) = self.stack_of_open_elements.iter().rposition(|&id| id == node) {
            self.stack_of_open_elements.truncate(index);
        }
    }

    /// Remove `node` from the stack wherever it is.
    pub(super) fn remove_from_stack(&mut self, node: NodeId) {
        if let Some(index) = self.stack_of_open_elements.iter().rposition(|&id| id == node) {
            let _ = self.stack_of_open_elements.remove(index);
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// Whether `id` terminates a search in `scope` with a failure.
    fn is_scope_boundary(&self, id: NodeId, scope: Scope) -> bool {
        let Some(element) = self.tree.as_element(id) else {
            return false;
        };
        let name = element.local_name.as_str();
        let html = element.namespace == Namespace::Html;
        let default = || match element.namespace {
            Namespace::Html => matches!(
                name,
                "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                    | "template"
            ),
            Namespace::MathMl => {
                matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml")
            }
            Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
            _ => false,
        };
        match scope {
            Scope::Default => default(),
            Scope::ListItem => default() || (html && matches!(name, "ol" | "ul")),
            Scope::Button => default() || (html && name == "button"),
            Scope::Table => html && matches!(name, "html" | "table" | "template"),
            Scope::Select => !(html && matches!(name, "optgroup" | "option")),
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    ///
    /// "The stack of open elements is said to have an element target node in
    /// a specific scope consisting of a list of element types list when the
    /// following algorithm terminates in a match state"
    ///
    /// The target here is any HTML element named `name`.
    pub(super) fn has_element_in_scope(&self, name: &str, scope: Scope) -> bool {
        // STEP 1: "Initialize node to be the current node."
        for &id in self.stack_of_open_elements.iter().rev() {
            // STEP 2: "If node is the target node, terminate in a match state."
            if self.is_html_element(id, name) {
                return true;
            }
            // STEP 3: "Otherwise, if node is one of the element types in list,
            //          terminate in a failure state."
            if self.is_scope_boundary(id, scope) {
                return false;
            }
            // STEP 4: "Otherwise, set node to the previous entry in the stack of
            //          open elements and return to step 2."
        }
        false
    }

    /// Like [`has_element_in_scope`](Self::has_element_in_scope) for any of
    /// several names (the heading elements, `tbody`/`thead`/`tfoot`,
    /// `td`/`th`).
    pub(super) fn has_any_element_in_scope(&self, names: &[&str], scope: Scope) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            if self.is_html_element_in(id, names) {
                return true;
            }
            if self.is_scope_boundary(id, scope) {
                return false;
            }
        }
        false
    }

    /// The scope check for one particular node.
    pub(super) fn has_node_in_scope(&self, node: NodeId, scope: Scope) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            if id == node {
                return true;
            }
            if self.is_scope_boundary(id, scope) {
                return false;
            }
        }
        false
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the UA must pop the
    /// current node off the stack of open elements."
    ///
    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the above
    /// steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags(&mut self, except: Option<&str>) {
        while let Some(current) = self.current_node() {
            if !self.is_html_element_in(current, IMPLIED_END_TAGS)
                || except.is_some_and(|name| self.is_html_element(current, name))
            {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// "generate all implied end tags thoroughly"
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while let Some(current) = self.current_node() {
            if !self.is_html_element_in(current, IMPLIED_END_TAGS_THOROUGHLY) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the
    /// stack."
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags(Some("p"));
        if !self.current_node_is("p") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, "p");
        }
        self.pop_until("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.has_element_in_scope("p", Scope::Button) {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(current) = self.current_node() {
            if self.is_html_element_in(current, names) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self
            .current_node()
            .is_some_and(|id| self.is_html_element_in(id, &["td", "th"]))
        {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, "cell");
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a td
        //          element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_mode(InsertionMode::InRow);
    }

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let mut node = self.stack_of_open_elements[index];
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            if last && let Some(context) = self.context_element {
                node = context;
            }
            let Some(element) = self.tree.as_element(node) else {
                continue;
            };
            if element.namespace != Namespace::Html {
                if last {
                    break;
                }
                continue;
            }
            let mode = match element.local_name.as_str() {
                // STEP 4: "If node is a select element, run these substeps"
                "select" => {
                    let mut mode = InsertionMode::InSelect;
                    if !last {
                        for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                            if self.is_html_element(ancestor, "template") {
                                break;
                            }
                            if self.is_html_element(ancestor, "table") {
                                mode = InsertionMode::InSelectInTable;
                                break;
                            }
                        }
                    }
                    Some(mode)
                }
                // STEP 5: "If node is a td or th element and last is false"
                "td" | "th" if !last => Some(InsertionMode::InCell),
                "tr" => Some(InsertionMode::InRow),
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                "caption" => Some(InsertionMode::InCaption),
                "colgroup" => Some(InsertionMode::InColumnGroup),
                "table" => Some(InsertionMode::InTable),
                // STEP 12: "If node is a template element, then switch the
                //           insertion mode to the current template insertion mode"
                "template" => Some(
                    self.template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate),
                ),
                // STEP 13: "If node is a head element and last is false"
                "head" if !last => Some(InsertionMode::InHead),
                "body" => Some(InsertionMode::InBody),
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 16: "If node is an html element, run these substeps"
                "html" => Some(if self.head_element_pointer.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ => None,
            };
            if let Some(mode) = mode {
                self.switch_mode(mode);
                return;
            }
            // STEP 17: "If last is true, then switch the insertion mode to "in
            //           body" and return."
            if last {
                break;
            }
        }
        self.switch_mode(InsertionMode::InBody);
    }
}

// =============================================================================
// The list of active formatting elements
// =============================================================================

impl HTMLParser {
    /// Index of the entry for `node` in the list of active formatting
    /// elements.
    pub(super) fn formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements.iter().position(|entry| {
            matches!(entry, ActiveFormattingElement::Element { node_id, .. } if *node_id == node)
        })
    }

    /// The last formatting element named `name` after the last marker.
    pub(super) fn formatting_element_after_last_marker(&self, name: &str) -> Option<(usize, NodeId)> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { node_id, .. } => {
                    if self.is_html_element(*node_id, name) {
                        return Some((index, *node_id));
                    }
                }
            }
        }
        None
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// Includes the Noah's Ark clause: "If there are already three elements
    /// in the list of active formatting elements after the last marker, if
    /// any, or anywhere in the list if there are no markers, that have the
    /// same tag name, namespace, and attributes as element, then remove the
    /// earliest such element from the list of active formatting elements."
    pub(super) fn push_active_formatting_element(&mut self, node_id: NodeId, token: &Token) {
        if let Some(element) = self.tree.as_element(node_id) {
            let mut count = 0;
            let mut earliest = None;
            for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
                let ActiveFormattingElement::Element { node_id: other, .. } = entry else {
                    break;
                };
                if let Some(other) = self.tree.as_element(*other)
                    && other.local_name == element.local_name
                    && other.namespace == element.namespace
                    && other.attrs().same_set_as(element.attrs())
                {
                    count += 1;
                    earliest = Some(index);
                }
            }
            if count >= 3
                && let Some(index) = earliest
            {
                log::trace!(target: LOG_TARGET, "noah's ark drops <{}>", element.local_name);
                let _ = self.active_formatting_elements.remove(index);
            }
        }
        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                token: token.clone(),
            });
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// "When the steps below require the UA to reconstruct the active
    /// formatting elements, the UA must perform the following steps"
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of active
        //          formatting elements is a marker, or if it is an element that
        //          is in the stack of open elements, then there is nothing to
        //          reconstruct; stop this algorithm."
        let needs_reconstruction = |entry: &ActiveFormattingElement| match entry {
            ActiveFormattingElement::Marker => false,
            ActiveFormattingElement::Element { node_id, .. } => {
                !self.stack_of_open_elements.contains(node_id)
            }
        };
        let Some(last) = self.active_formatting_elements.last() else {
            return;
        };
        if !needs_reconstruction(last) {
            return;
        }

        // STEP 3-6: Rewind to the entry after the last marker or open element.
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 && needs_reconstruction(&self.active_formatting_elements[index - 1]) {
            index -= 1;
        }

        // STEP 7-10: "Advance ... Create: Insert an HTML element for the token
        //            for which the element entry was created, to obtain new
        //            element. Replace the entry for entry in the list with an
        //            entry for new element."
        for entry_index in index..self.active_formatting_elements.len() {
            let ActiveFormattingElement::Element { token, .. } =
                self.active_formatting_elements[entry_index].clone()
            else {
                continue;
            };
            let new_element = self.insert_html_element(&token);
            self.active_formatting_elements[entry_index] = ActiveFormattingElement::Element {
                node_id: new_element,
                token,
            };
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    /// [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Returns true when the caller must instead "act as described in the
    /// "any other end tag" entry".
    pub(super) fn run_adoption_agency(&mut self, subject: &str) -> bool {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.is_html_element(current, subject)
            && self.formatting_index_of(current).is_none()
        {
            let _ = self.stack_of_open_elements.pop();
            return false;
        }

        // STEP 3-5: "Let outer loop counter be 0. Outer loop: If outer loop
        //            counter is greater than or equal to 8, then return."
        for _ in 0..8 {
            // STEP 7: "Let formatting element be the last element in the list of
            //          active formatting elements that: is between the end of the
            //          list and the last marker in the list, if any, or the start
            //          of the list otherwise, and has the tag name subject."
            // STEP 8: "If there is no such element, then return and instead act
            //          as described in the "any other end tag" entry above."
            let Some((formatting_index, formatting_element)) =
                self.formatting_element_after_last_marker(subject)
            else {
                return true;
            };

            // STEP 9: "If formatting element is not in the stack of open
            //          elements, then this is a parse error; remove the element
            //          from the list, and return."
            let Some(stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element)
            else {
                self.parse_error(ParseErrorCode::MisnestedTag, subject);
                let _ = self.active_formatting_elements.remove(formatting_index);
                return false;
            };

            // STEP 10: "If formatting element is in the stack of open elements,
            //           but the element is not in scope, then this is a parse
            //           error; return."
            if !self.has_node_in_scope(formatting_element, Scope::Default) {
                self.parse_error(ParseErrorCode::MisnestedTag, subject);
                return false;
            }

            // STEP 11: "If formatting element is not the current node, this is a
            //           parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error(ParseErrorCode::MisnestedTag, subject);
            }

            // STEP 12: "Let furthest block be the topmost node in the stack of
            //           open elements that is lower in the stack than formatting
            //           element, and is an element in the special category."
            let furthest_block_index = (stack_index + 1..self.stack_of_open_elements.len())
                .find(|&i| self.is_special(self.stack_of_open_elements[i]));

            // STEP 13: "If there is no furthest block, then the UA must first pop
            //           all the nodes from the bottom of the stack of open
            //           elements, from the current node up to and including
            //           formatting element, then remove formatting element from
            //           the list of active formatting elements, and finally
            //           return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.stack_of_open_elements.truncate(stack_index);
                let _ = self.active_formatting_elements.remove(formatting_index);
                return false;
            };
            let furthest_block = self.stack_of_open_elements[furthest_block_index];

            // STEP 14: "Let common ancestor be the element immediately above
            //           formatting element in the stack of open elements."
            let Some(common_ancestor) = stack_index
                .checked_sub(1)
                .map(|i| self.stack_of_open_elements[i])
            else {
                return false;
            };

            // STEP 15: "Let a bookmark note the position of formatting element in
            //           the list of active formatting elements relative to the
            //           elements on either side of it in the list."
            let mut bookmark = formatting_index;

            // STEP 16: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // STEP 17-18: "Let inner loop counter be 0. Inner loop: Increment
            //              inner loop counter by 1."
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // STEP 18.2: "Let node be the element immediately above node in
                //             the stack of open elements, or if node is no longer
                //             in the stack of open elements, the element that was
                //             immediately above node in the stack of open
                //             elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // STEP 18.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 18.4: "If inner loop counter is greater than 3 and node is
                //             in the list of active formatting elements, then
                //             remove node from the list of active formatting
                //             elements."
                let mut node_formatting_index = self.formatting_index_of(node);
                if inner_loop_counter > 3
                    && let Some(index) = node_formatting_index
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if bookmark > index {
                        bookmark -= 1;
                    }
                    node_formatting_index = None;
                }

                // STEP 18.5: "If node is not in the list of active formatting
                //             elements, then remove node from the stack of open
                //             elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // STEP 18.6: "Create an element for the token for which the
                //             element node was created, in the HTML namespace,
                //             with common ancestor as the intended parent; replace
                //             the entry for node in the list of active formatting
                //             elements with an entry for the new element, replace
                //             the entry for node in the stack of open elements
                //             with an entry for the new element, and let node be
                //             the new element."
                let ActiveFormattingElement::Element { token, .. } =
                    self.active_formatting_elements[node_formatting_index].clone()
                else {
                    break;
                };
                let new_element = self.create_element_for_token(&token);
                self.active_formatting_elements[node_formatting_index] =
                    ActiveFormattingElement::Element {
                        node_id: new_element,
                        token,
                    };
                self.stack_of_open_elements[node_index] = new_element;

                // STEP 18.7: "If last node is furthest block, then move the
                //             aforementioned bookmark to be immediately after the
                //             new node in the list of active formatting elements."
                if last_node == furthest_block {
                    bookmark = node_formatting_index + 1;
                }

                // STEP 18.8: "Append last node to node."
                let appended = self.tree.append_child(new_element, last_node);
                debug_assert!(appended.is_ok(), "new node is a fresh element");

                // STEP 18.9: "Set last node to node."
                last_node = new_element;
            }

            // STEP 19: "Insert whatever last node ended up being in the previous
            //           step at the appropriate place for inserting a node, but
            //           using common ancestor as the override target."
            let point = self.appropriate_place(Some(common_ancestor));
            self.insert_at(point, last_node);

            // STEP 20: "Create an element for the token for which formatting
            //           element was created, in the HTML namespace, with furthest
            //           block as the intended parent."
            let Some(ActiveFormattingElement::Element { token, .. }) = self
                .formatting_index_of(formatting_element)
                .map(|i| self.active_formatting_elements[i].clone())
            else {
                return false;
            };
            let new_element = self.create_element_for_token(&token);

            // STEP 21: "Take all of the child nodes of furthest block and append
            //           them to the element created in the last step."
            let moved = self.tree.move_children(furthest_block, new_element);
            debug_assert!(moved.is_ok(), "new element is detached from furthest block");

            // STEP 22: "Append that new element to furthest block."
            let appended = self.tree.append_child(furthest_block, new_element);
            debug_assert!(appended.is_ok(), "new element is detached");

            // STEP 23: "Remove formatting element from the list of active
            //           formatting elements, and insert the new element into the
            //           list of active formatting elements at the position of the
            //           aforementioned bookmark."
            if let Some(index) = self.formatting_index_of(formatting_element) {
                let _ = self.active_formatting_elements.remove(index);
                if bookmark > index {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node_id: new_element,
                    token,
                },
            );

            // STEP 24: "Remove formatting element from the stack of open
            //           elements, and insert the new element into the stack of
            //           open elements immediately below the position of furthest
            //           block in that stack."
            self.remove_from_stack(formatting_element);
            if let Some(position) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
            {
                self.stack_of_open_elements.insert(position + 1, new_element);
            }
        }
        false
    }
}
