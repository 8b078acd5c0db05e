//! Integration tests for the HTML tokenizer.

use quill_html::tokenizer::RawTextKind;
use quill_html::{HTMLTokenizer, ParseErrorCode, TagAttribute, Token};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to tokenize a string and return the parse error codes
fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.issues().iter().map(|issue| issue.code).collect()
}

/// Helper to collect the character tokens into a string
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

/// Helper to tokenize the contents of a raw text element, the way the tree
/// constructor sets the tokenizer up after the start tag.
fn tokenize_raw_text(tag: &str, kind: RawTextKind, rest: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(rest);
    tokenizer.switch_to_raw_text(kind);
    tokenizer.set_last_start_tag(tag);
    tokenizer.run();
    tokenizer.into_tokens()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_public_and_system_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
    assert!(error_codes("<!DOCTYPE>").contains(&ParseErrorCode::MissingDoctypeName));
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV ID=x></DIV>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[0].attribute("id"), Some("x"));
    assert_eq!(tokens[1].tag_name(), Some("div"));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => assert_eq!(name, "div"),
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    assert!(error_codes("</div class=x>").contains(&ParseErrorCode::EndTagWithAttributes));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(tokens[0].is_self_closing());
    assert_eq!(tokens[0].tag_name(), Some("br"));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " hello "),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_unterminated_comment_closes_at_eof() {
    let tokens = tokenize("<!-- never closed");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " never closed"),
        _ => panic!("Expected Comment token"),
    }
    assert!(tokens[1].is_eof());
    assert_eq!(error_codes("<!-- never closed"), vec![ParseErrorCode::EofInComment]);
}

#[test]
fn test_bogus_comment_from_question_mark() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "?xml version=\"1.0\"?"),
        _ => panic!("Expected Comment token"),
    }
    assert!(
        error_codes("<?x>").contains(&ParseErrorCode::UnexpectedQuestionMarkInsteadOfTagName)
    );
}

#[test]
fn test_cdata_in_html_content_is_a_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "[CDATA[x]]"),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[a<b]]>");
    tokenizer.set_cdata_allowed(true);
    tokenizer.run();
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "a<b");
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="container">"#);
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='container'>");
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=container>");
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    assert_eq!(tokens[0].attributes(), &[TagAttribute::new("disabled", "")]);
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<a href="/x" title='t' data-n=1>"#);
    let names: Vec<&str> = tokens[0]
        .attributes()
        .iter()
        .map(|attr| attr.name.as_str())
        .collect();
    assert_eq!(names, vec!["href", "title", "data-n"]);
}

#[test]
fn test_first_duplicate_attribute_wins() {
    let tokens = tokenize(r#"<p id="first" ID="second">"#);
    assert_eq!(tokens[0].attributes(), &[TagAttribute::new("id", "first")]);
    assert_eq!(
        error_codes(r#"<p id="first" ID="second">"#),
        vec![ParseErrorCode::DuplicateAttribute]
    );
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].tag_name(), Some("p"));
    assert_eq!(text_of(&tokens), "Hi");
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("text<div class=");
    assert_eq!(text_of(&tokens), "text");
    assert!(tokens.last().is_some_and(Token::is_eof));
    assert!(!tokens.iter().any(|t| matches!(t, Token::StartTag { .. })));
    assert!(error_codes("<div class=").contains(&ParseErrorCode::EofInTag));
}

#[test]
fn test_lone_less_than_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert!(error_codes("a < b").contains(&ParseErrorCode::InvalidFirstCharacterOfTagName));
}

#[test]
fn test_style_element_rawtext() {
    let tokens = tokenize_raw_text("style", RawTextKind::Rawtext, "p { color: red; }</style>");
    assert_eq!(text_of(&tokens), "p { color: red; }");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_style_with_fake_tags() {
    let tokens = tokenize_raw_text("style", RawTextKind::Rawtext, "<b>&amp;</b></style>");
    assert_eq!(text_of(&tokens), "<b>&amp;</b>");
}

#[test]
fn test_style_with_wrong_end_tag() {
    let tokens = tokenize_raw_text("style", RawTextKind::Rawtext, "a</div>b</style>");
    assert_eq!(text_of(&tokens), "a</div>b");
}

#[test]
fn test_title_element_rcdata_decodes_references() {
    let tokens = tokenize_raw_text("title", RawTextKind::Rcdata, "a &lt; <b></title>");
    assert_eq!(text_of(&tokens), "a < <b>");
}

#[test]
fn test_textarea_end_tag_is_case_insensitive() {
    let tokens = tokenize_raw_text("textarea", RawTextKind::Rcdata, "x</TEXTAREA>");
    assert_eq!(text_of(&tokens), "x");
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_script_data_escaped_comment() {
    let tokens = tokenize_raw_text(
        "script",
        RawTextKind::ScriptData,
        "<!--<script>x</script>-->y</script>",
    );
    assert_eq!(text_of(&tokens), "<!--<script>x</script>-->y");
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_raw_text("plaintext", RawTextKind::Plaintext, "a</plaintext>b");
    assert_eq!(text_of(&tokens), "a</plaintext>b");
}

#[test]
fn test_character_reference_bare_ampersand() {
    let tokens = tokenize("a & b");
    assert_eq!(text_of(&tokens), "a & b");
    assert!(error_codes("a & b").is_empty());
}

#[test]
fn test_named_character_reference_amp() {
    assert_eq!(text_of(&tokenize("&amp;")), "&");
}

#[test]
fn test_named_character_reference_lt_gt() {
    assert_eq!(text_of(&tokenize("&lt;div&gt;")), "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("&ampx")), "&x");
    assert_eq!(
        error_codes("&ampx"),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_named_character_reference_longest_match() {
    assert_eq!(text_of(&tokenize("&notit;")), "\u{AC}it;");
    assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
}

#[test]
fn test_named_character_reference_unknown() {
    assert_eq!(text_of(&tokenize("&bogus;")), "&bogus;");
    assert_eq!(
        error_codes("&bogus;"),
        vec![ParseErrorCode::UnknownNamedCharacterReference]
    );
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?a=1&b=2"));
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alphanumeric() {
    let tokens = tokenize(r#"<a href="?x=1&copy=2">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?x=1&copy=2"));
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X43;")), "ABC");
}

#[test]
fn test_numeric_reference_c1_replacement() {
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#150;")), "\u{2013}");
    assert_eq!(
        error_codes("&#x80;"),
        vec![ParseErrorCode::ControlCharacterReference]
    );
}

#[test]
fn test_numeric_reference_null_and_out_of_range() {
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(error_codes("&#0;"), vec![ParseErrorCode::NullCharacterReference]);
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(text_of(&tokenize("&#;")), "&#;");
    assert_eq!(
        error_codes("&#;"),
        vec![ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference]
    );
}

#[test]
fn test_null_in_data_becomes_replacement_character() {
    let tokens = tokenize("a\0b");
    assert_eq!(text_of(&tokens), "a\u{FFFD}b");
    assert_eq!(error_codes("a\0b"), vec![ParseErrorCode::UnexpectedNullCharacter]);
}

#[test]
fn test_issue_positions_increase() {
    let mut tokenizer = HTMLTokenizer::new("&#0; <p a=1 a=2> &bogus;");
    tokenizer.run();
    let positions: Vec<usize> = tokenizer.issues().iter().map(|i| i.position).collect();
    assert_eq!(positions.len(), 3);
    assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_exactly_one_eof_token() {
    let mut tokenizer = HTMLTokenizer::new("");
    assert!(tokenizer.next_token().is_some_and(|t| t.is_eof()));
    assert!(tokenizer.next_token().is_none());
}
