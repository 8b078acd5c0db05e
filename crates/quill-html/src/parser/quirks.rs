//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
//!
//! Which document mode a DOCTYPE token selects.

use quill_dom::QuirksMode;

/// Public identifiers that put the document in quirks mode when the DOCTYPE's
/// public identifier starts with them.
const QUIRKS_PUBLIC_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// Public identifiers that select quirks mode only on an exact match.
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// HTML 4.01 Frameset and Transitional: quirks without a system identifier,
/// limited quirks with one.
const HTML401_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

/// XHTML 1.0 Frameset and Transitional always select limited quirks.
const LIMITED_QUIRKS_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

/// The document mode for a DOCTYPE token. Identifiers are compared ASCII
/// case-insensitively; `None` means the identifier was missing.
pub(super) fn quirks_mode_for(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    let public = public_id.map(str::to_ascii_lowercase);
    let public = public.as_deref();
    let system = system_id.map(str::to_ascii_lowercase);
    let system = system.as_deref();
    let public_starts_with =
        |prefixes: &[&str]| public.is_some_and(|id| prefixes.iter().any(|p| id.starts_with(p)));

    // "The force-quirks flag is set to on."
    // "The name is not "html"."
    if force_quirks || name != Some("html") {
        return QuirksMode::Quirks;
    }
    if public.is_some_and(|id| QUIRKS_PUBLIC_IDS.contains(&id))
        || system == Some(QUIRKS_SYSTEM_ID)
        || public_starts_with(QUIRKS_PUBLIC_PREFIXES)
        || (system.is_none() && public_starts_with(HTML401_PREFIXES))
    {
        return QuirksMode::Quirks;
    }
    if public_starts_with(LIMITED_QUIRKS_PREFIXES)
        || (system.is_some() && public_starts_with(HTML401_PREFIXES))
    {
        return QuirksMode::LimitedQuirks;
    }
    QuirksMode::NoQuirks
}

/// [§ 13.2.6.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
///
/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
pub(super) fn is_conforming_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
) -> bool {
    name == Some("html")
        && public_id.is_none()
        && system_id.is_none_or(|id| id == "about:legacy-compat")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html5_doctype_is_no_quirks() {
        assert_eq!(
            quirks_mode_for(Some("html"), None, None, false),
            QuirksMode::NoQuirks
        );
        assert!(is_conforming_doctype(Some("html"), None, None));
        assert!(is_conforming_doctype(
            Some("html"),
            None,
            Some("about:legacy-compat")
        ));
    }

    #[test]
    fn test_missing_or_wrong_name_is_quirks() {
        assert_eq!(quirks_mode_for(None, None, None, true), QuirksMode::Quirks);
        assert_eq!(
            quirks_mode_for(Some("svg"), None, None, false),
            QuirksMode::Quirks
        );
    }

    #[test]
    fn test_public_prefix_is_case_insensitive() {
        assert_eq!(
            quirks_mode_for(Some("html"), Some("-//W3C//DTD HTML 3.2 Final//EN"), None, false),
            QuirksMode::Quirks
        );
    }

    #[test]
    fn test_html401_transitional_depends_on_system_id() {
        let public = Some("-//W3C//DTD HTML 4.01 Transitional//EN");
        assert_eq!(
            quirks_mode_for(Some("html"), public, None, false),
            QuirksMode::Quirks
        );
        assert_eq!(
            quirks_mode_for(
                Some("html"),
                public,
                Some("http://www.w3.org/TR/html4/loose.dtd"),
                false
            ),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn test_xhtml_transitional_is_limited_quirks() {
        assert_eq!(
            quirks_mode_for(
                Some("html"),
                Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
                Some("http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd"),
                false
            ),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn test_ibm_system_id_is_quirks() {
        assert_eq!(
            quirks_mode_for(Some("html"), None, Some(QUIRKS_SYSTEM_ID), false),
            QuirksMode::Quirks
        );
    }
}
