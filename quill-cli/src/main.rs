//! Quill CLI
//!
//! Parses an HTML file or string and prints the resulting tree.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use quill_dom::serialize::serialize;
use quill_dom::{DomTree, Namespace, NodeId, NodeType};
use quill_html::{ParseIssue, ParserConfig, parse_document_with, print_tree};
use serde::Serialize;

/// Quill: parse HTML the way a browser does and inspect the tree
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a file
    quill ./index.html

    # Parse inline HTML and list parse errors
    quill --html '<p>a<b>b<p>c' --issues

    # Re-serialize a fragment as it would appear inside a <td>
    quill --html '<tr><td>x' --fragment td --format html

    # Dump the tree as JSON
    quill --format json ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// How to print the parsed tree
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Print parse errors after the tree
    #[arg(short, long)]
    issues: bool,

    /// Parse as if scripting were enabled (affects <noscript>)
    #[arg(long)]
    scripting: bool,

    /// Parse as a fragment in the context of this element
    #[arg(long, value_name = "TAG")]
    fragment: Option<String>,

    /// Stop recording parse errors after this many (0 means no limit)
    #[arg(long, value_name = "N")]
    max_issues: Option<usize>,
}

/// Output formats for the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented tree, one node per line
    Tree,
    /// Nested JSON objects
    Json,
    /// Re-serialized markup
    Html,
}

/// A node as it appears in the JSON dump.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsonNode {
    Document {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<JsonNode>,
    },
    #[serde(rename_all = "camelCase")]
    Doctype {
        name: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        public_id: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        system_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Element {
        tag_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        namespace: Option<&'static str>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<JsonAttribute>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<JsonNode>,
    },
    Text {
        content: String,
    },
    Comment {
        content: String,
    },
}

/// An attribute in the JSON dump.
#[derive(Debug, Serialize)]
struct JsonAttribute {
    name: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'static str>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let html = load_html(&cli)?;
    let config = build_config(&cli);
    log::debug!("parsing {} bytes with {config:?}", html.len());

    let output = parse_document_with(&html, &config)?;

    match cli.format {
        OutputFormat::Tree => print_tree(&output.tree, output.tree.root(), 0),
        OutputFormat::Json => {
            let json = node_to_json(&output.tree, output.tree.root());
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Html => println!("{}", serialize(&output.tree)),
    }

    if cli.issues {
        print_issues(&output.issues);
    }

    Ok(())
}

/// Read the input from `--html` or the file argument.
fn load_html(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    let Some(ref path) = cli.path else {
        anyhow::bail!("a file path or --html is required");
    };
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Map command-line flags onto a parser configuration.
fn build_config(cli: &Cli) -> ParserConfig {
    let mut config = ParserConfig::default();
    if cli.scripting {
        config = config.with_scripting();
    }
    if let Some(max) = cli.max_issues {
        config = config.with_max_issues((max > 0).then_some(max));
    }
    if let Some(ref context) = cli.fragment {
        config = config.with_fragment_context(context.as_str());
    }
    config
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        eprintln!("{}", "No parse errors".green());
        return;
    }
    eprintln!("{}", format!("{} parse error(s):", issues.len()).yellow());
    for issue in issues {
        eprintln!("  {} {}", "-".dimmed(), issue);
    }
}

fn node_to_json(tree: &DomTree, id: NodeId) -> JsonNode {
    let children = || -> Vec<JsonNode> {
        tree.children(id)
            .iter()
            .map(|&child| node_to_json(tree, child))
            .collect()
    };
    let Some(node) = tree.get(id) else {
        return JsonNode::Document {
            children: Vec::new(),
        };
    };
    match &node.node_type {
        NodeType::Document => JsonNode::Document {
            children: children(),
        },
        NodeType::DocumentType(doctype) => JsonNode::Doctype {
            name: doctype.name.clone(),
            public_id: doctype.public_id.clone(),
            system_id: doctype.system_id.clone(),
        },
        NodeType::Element(data) => JsonNode::Element {
            tag_name: data.qualified_name(),
            namespace: (data.namespace != Namespace::Html).then(|| data.namespace.into()),
            attributes: data
                .attrs()
                .iter()
                .map(|attr| JsonAttribute {
                    name: attr.name(),
                    value: attr.value().to_string(),
                    namespace: attr.namespace().map(Into::into),
                })
                .collect(),
            children: children(),
        },
        NodeType::Text(text) => JsonNode::Text {
            content: text.clone(),
        },
        NodeType::Comment(text) => JsonNode::Comment {
            content: text.clone(),
        },
    }
}
