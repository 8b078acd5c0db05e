use std::mem;

use strum_macros::Display;

use quill_dom::{AttributeList, DomTree, ElementData, Namespace, NodeId, NodeType};

use super::LOG_TARGET;
use crate::config::ParserConfig;
use crate::error::{Error, IssueSink, ParseErrorCode, ParseIssue};
use crate::tokenizer::{HTMLTokenizer, RawTextKind, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Result of [`HTMLParser::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// A token was processed and more may follow.
    Continue,
    /// Parsing has stopped. Further steps do nothing.
    Finished,
}

/// What the dispatcher does after a mode handler returns.
#[derive(Debug)]
pub(super) enum Flow {
    /// The token has been handled.
    Done,
    /// "Reprocess the token": dispatch the same token again, usually after
    /// the handler switched the insertion mode.
    Reprocess,
    /// Dispatch a different token instead, as in "act as if a start tag
    /// token with the tag name X had been seen".
    ReprocessAs(Token),
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list contains elements in the formatting category, and markers."
#[derive(Debug, Clone)]
pub(super) enum ActiveFormattingElement {
    /// A formatting element together with the token that created it, kept
    /// so the element can be recreated by reconstruction or the adoption
    /// agency algorithm.
    Element { node_id: NodeId, token: Token },
    /// "A marker is an entry in the list of active formatting elements that
    /// is distinct from any element." Pushed for applet, object, marquee,
    /// template, td, th and caption.
    Marker,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser builds a DOM tree from the tokens it pulls out of its
/// tokenizer. It owns the tokenizer so it can switch its state between
/// tokens, which is how the contents of `<script>`, `<style>`, `<title>` and
/// `<textarea>` stay text.
///
/// ```
/// use quill_html::HTMLParser;
///
/// let tree = HTMLParser::new("<title>a<b</title><p>hi").run();
/// let body = tree.body().unwrap();
/// assert_eq!(tree.text_content(body), "hi");
/// ```
#[derive(Debug)]
pub struct HTMLParser {
    pub(super) tokenizer: HTMLTokenizer,

    /// DOM tree with parent/sibling pointers.
    /// `NodeId::ROOT` (index 0) is the Document node.
    pub(super) tree: DomTree,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// Where the "text" and "in table text" modes return to.
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. Every entry is an ancestor-or-self of
    /// the one after it.
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    ///
    /// The context element of a fragment parse. It is never attached.
    pub(super) context_element: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    pub(super) scripting_enabled: bool,

    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created. It is
    /// set to "not ok" after certain tokens are seen."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_characters: String,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: "If the next token is
    /// a U+000A LINE FEED (LF) character token, then ignore that token".
    pub(super) skip_next_newline: bool,

    /// Whether the self-closing flag of the token being processed was
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,

    /// Whether we've stopped parsing.
    pub(super) stopped: bool,
}

impl HTMLParser {
    /// Create a parser for a full document with the default configuration.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::build(input, &ParserConfig::default())
    }

    /// Create a parser with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` does not validate.
    pub fn with_config(input: &str, config: &ParserConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::build(input, config))
    }

    fn build(input: &str, config: &ParserConfig) -> Self {
        let issues = IssueSink::new(config.max_issues, config.report_issues);
        let mut parser = Self {
            tokenizer: HTMLTokenizer::with_issue_sink(input, issues),
            tree: DomTree::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            context_element: None,
            scripting_enabled: config.scripting_enabled,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_characters: String::new(),
            skip_next_newline: false,
            self_closing_acknowledged: false,
            stopped: false,
        };
        if let Some(context) = &config.fragment_context {
            parser.begin_fragment(context);
        }
        parser
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Set up the parser state for parsing in the context of an element
    /// named `context`.
    fn begin_fragment(&mut self, context: &str) {
        let context = context.to_ascii_lowercase();
        let namespace = match context.as_str() {
            "svg" => Namespace::Svg,
            "math" => Namespace::MathMl,
            _ => Namespace::Html,
        };
        let context_id = self.tree.alloc(NodeType::Element(ElementData::new(
            context.as_str(),
            namespace,
            AttributeList::new(),
        )));
        self.context_element = Some(context_id);

        // STEP 4: "Set the state of the HTML parser's tokenization stage as
        //          follows, switching on the context element"
        if namespace == Namespace::Html {
            let kind = match context.as_str() {
                "title" | "textarea" => Some(RawTextKind::Rcdata),
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawTextKind::Rawtext),
                "noscript" if self.scripting_enabled => Some(RawTextKind::Rawtext),
                "script" => Some(RawTextKind::ScriptData),
                "plaintext" => Some(RawTextKind::Plaintext),
                _ => None,
            };
            if let Some(kind) = kind {
                self.tokenizer.switch_to_raw_text(kind);
            }
        }

        // STEP 5: "Let root be the result of creating an element given document,
        //          "html", and the HTML namespace."
        // STEP 6: "Append root to document."
        // STEP 7: "Set up the parser's stack of open elements so that it
        //          contains just the single element root."
        let root = self
            .tree
            .alloc(NodeType::Element(ElementData::html("html", AttributeList::new())));
        let appended = self.tree.append_child(NodeId::ROOT, root);
        debug_assert!(appended.is_ok(), "fragment root is freshly allocated");
        self.stack_of_open_elements.push(root);

        // STEP 8: "If context is a template element, then push "in template"
        //          onto the stack of template insertion modes so that it is the
        //          new current template insertion mode."
        if context == "template" && namespace == Namespace::Html {
            self.template_insertion_modes.push(InsertionMode::InTemplate);
        }

        // STEP 10: "Reset the parser's insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
        log::debug!(target: LOG_TARGET, "fragment parse in <{context}>, mode {}", self.insertion_mode);
    }

    /// Run the parser to completion and return the DOM tree.
    #[must_use]
    pub fn run(mut self) -> DomTree {
        while self.step() == ParseStatus::Continue {}
        self.into_tree()
    }

    /// Run the parser to completion and return the tree together with every
    /// parse error found by the tokenizer and the tree constructor, in input
    /// order.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while self.step() == ParseStatus::Continue {}
        let issues = self.tokenizer.take_issues();
        (self.into_tree(), issues)
    }

    /// Pull one token from the tokenizer and process it.
    ///
    /// A caller may stop stepping at any point and take the partial tree with
    /// [`into_tree`](Self::into_tree).
    pub fn step(&mut self) -> ParseStatus {
        if self.stopped {
            return ParseStatus::Finished;
        }
        // [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
        // "If there is an adjusted current node and it is not an element in
        // the HTML namespace, then switch to the CDATA section state."
        let cdata_allowed = self
            .adjusted_current_node()
            .is_some_and(|id| !self.is_in_html_namespace(id));
        self.tokenizer.set_cdata_allowed(cdata_allowed);

        let Some(token) = self.tokenizer.next_token() else {
            self.stop_parsing();
            return ParseStatus::Finished;
        };
        self.process_token(token);
        if self.stopped {
            ParseStatus::Finished
        } else {
            ParseStatus::Continue
        }
    }

    /// Consume the parser and return the tree built so far.
    ///
    /// For a fragment parse the Document's children are the fragment's
    /// top-level nodes.
    #[must_use]
    pub fn into_tree(mut self) -> DomTree {
        if self.context_element.is_some() {
            self.finish_fragment();
        }
        self.tree
    }

    /// [§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// "Return root's children, in tree order." The children of the
    /// synthetic `html` root become children of the Document.
    fn finish_fragment(&mut self) {
        let Some(root) = self
            .tree
            .children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.tree.as_element(id).is_some_and(|e| e.is_html("html")))
        else {
            return;
        };
        let moved = self.tree.move_children(root, NodeId::ROOT);
        debug_assert!(moved.is_ok(), "fragment root is a child of the document");
        let removed = self.tree.remove_child(NodeId::ROOT, root);
        debug_assert!(removed.is_ok(), "fragment root is a child of the document");
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Parse errors found so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        self.tokenizer.issues()
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list, known as the
    /// tree construction dispatcher"
    ///
    /// Reprocessing loops here instead of recursing.
    fn process_token(&mut self, token: Token) {
        if mem::take(&mut self.skip_next_newline) && matches!(token, Token::Character { data: '\n' }) {
            return;
        }

        let self_closing = token.is_self_closing();
        self.self_closing_acknowledged = false;

        let mut token = token;
        loop {
            let flow = if self.should_use_foreign_rules(&token) {
                self.handle_foreign_content(&token)
            } else {
                self.process_using_rules_for(self.insertion_mode, &token)
            };
            match flow {
                Flow::Done => break,
                Flow::Reprocess => {}
                Flow::ReprocessAs(next) => token = next,
            }
        }

        // [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
        // "When a start tag token is emitted with its self-closing flag set, if
        // the flag is not acknowledged when the token is processed by the tree
        // construction stage, that is a
        // non-void-html-element-start-tag-with-trailing-solidus parse error."
        if self_closing && !self.self_closing_acknowledged {
            self.parse_error(
                ParseErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus,
                token.tag_name().unwrap_or_default(),
            );
        }
    }

    /// "Process the token using the rules for the X insertion mode."
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) -> Flow {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// "Switch the insertion mode to X."
    pub(super) fn switch_mode(&mut self, mode: InsertionMode) {
        if mode != self.insertion_mode {
            log::trace!(target: LOG_TARGET, "{} -> {mode}", self.insertion_mode);
        }
        self.insertion_mode = mode;
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Tree construction errors share the tokenizer's sink, so the issue list
    /// stays in input order.
    pub(super) fn parse_error(&mut self, code: ParseErrorCode, detail: &str) {
        self.tokenizer
            .record_issue(LOG_TARGET, code, detail.to_string());
    }

    /// Report a token the current mode has no place for.
    pub(super) fn unexpected_token(&mut self, token: &Token) {
        let code = match token {
            Token::Doctype { .. } => ParseErrorCode::UnexpectedDoctype,
            Token::StartTag { .. } => ParseErrorCode::UnexpectedStartTag,
            Token::EndTag { .. } => ParseErrorCode::UnexpectedEndTag,
            Token::EndOfFile => ParseErrorCode::UnexpectedEndOfFile,
            Token::Character { .. } | Token::Comment { .. } => ParseErrorCode::UnexpectedCharacter,
        };
        let detail = format!("{token} in {}", self.insertion_mode);
        self.parse_error(code, &detail);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "Acknowledge the token's self-closing flag"
    pub(super) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements, if any."
    pub(super) fn stop_parsing(&mut self) {
        log::debug!(target: LOG_TARGET, "stop parsing in {}", self.insertion_mode);
        self.stack_of_open_elements.clear();
        self.active_formatting_elements.clear();
        self.stopped = true;
    }
}

/// Print a DOM tree to stdout, one node per line, indented by depth.
///
/// Elements outside the HTML namespace are prefixed with the namespace name,
/// as in `<svg circle>`. Spaces in text show as `·` and newlines as `\n`.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            println!("{prefix}Document");
        }
        NodeType::DocumentType(doctype) => {
            println!("{prefix}<!DOCTYPE {}>", doctype.name);
        }
        NodeType::Element(data) => {
            let name = if data.namespace == Namespace::Html {
                data.local_name.clone()
            } else {
                format!("{} {}", data.namespace, data.local_name)
            };
            if data.attrs().is_empty() {
                println!("{prefix}<{name}>");
            } else {
                let attrs: Vec<String> = data
                    .attrs()
                    .iter()
                    .map(|attr| {
                        if attr.value().is_empty() {
                            attr.name()
                        } else {
                            format!("{}=\"{}\"", attr.name(), attr.value())
                        }
                    })
                    .collect();
                println!("{prefix}<{name} {}>", attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            println!("{prefix}\"{display}\"");
        }
        NodeType::Comment(data) => {
            println!("{prefix}<!-- {data} -->");
        }
    }
    for &child_id in tree.children(id) {
        print_tree(tree, child_id, indent + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::{HTMLParser, ParseStatus};

    /// Helper to check that every open element sits inside the one below it
    fn assert_stack_is_ancestor_path(parser: &HTMLParser) {
        for pair in parser.stack_of_open_elements.windows(2) {
            assert!(
                parser.tree.is_descendant_of(pair[1], pair[0]),
                "{:?} is not inside {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_open_elements_follow_tree_through_misnesting() {
        let inputs = [
            "<p>A<b>B<p>C</b>D",
            "<a>1<div>2<a>3</div>4",
            "<b><i><p>x</b>y</i>z",
            "<ul><li>a<li><b>b</ul>c",
            "<div><span><em>x</div>y",
            "<svg><g><p>x</svg>",
        ];
        for input in inputs {
            let mut parser = HTMLParser::new(input);
            while parser.step() == ParseStatus::Continue {
                assert_stack_is_ancestor_path(&parser);
            }
        }
    }
}
