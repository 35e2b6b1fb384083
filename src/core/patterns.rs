//! Extraction patterns, one per template-authoring idiom.
//!
//! Patterns are ordered from most structured to least. Every pattern runs on
//! every line, but a match overlapping text already claimed by an earlier
//! pattern on the same line is ignored (see [`super::extract::extract_line`]).
//! New idioms belong at the end of the list.

use std::sync::LazyLock;

use regex::Regex;

/// A quoted literal. Backslash escapes are consumed as a unit, so `\'` and
/// `\"` never terminate the literal.
const QUOTED: &str = r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#;

/// Filters that may sit between a literal and `trans` without changing it.
const PASSTHROUGH_FILTERS: &str =
    r"(?:\|\s*(?:raw|htmlentities|html_entity_decode|escape|e)\b(?:\([^)]*\))?\s*)*";

const TRANS_FILTER: &str = r"\|\s*trans\b(?:\([^)]*\))?";

const TRAILING_FILTERS: &str = r"(?:\s*\|\s*\w+(?:\([^)]*\))?)*";

/// Name of the capture holding the phrase.
pub const MESSAGE_GROUP: &str = "message";

pub struct ExtractionPattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl ExtractionPattern {
    fn new(name: &'static str, template: &str) -> Self {
        let source = template
            .replace("<quoted>", QUOTED)
            .replace("<passthrough>", PASSTHROUGH_FILTERS)
            .replace("<trans>", TRANS_FILTER)
            .replace("<trailing>", TRAILING_FILTERS);
        Self {
            name,
            regex: Regex::new(&source).unwrap(),
        }
    }
}

pub static PATTERNS: LazyLock<Vec<ExtractionPattern>> = LazyLock::new(|| {
    vec![
        // {% trans %}Hello{% endtrans %}
        ExtractionPattern::new(
            "trans_block",
            r"\{%-?\s*trans\s*-?%\}(?P<message>.*?)\{%-?\s*endtrans\s*-?%\}",
        ),
        // {{ 'Hello'|trans }}
        ExtractionPattern::new(
            "output_tag_filter",
            r"\{\{-?\s*(?P<message><quoted>)\s*<passthrough><trans><trailing>\s*-?\}\}",
        ),
        // {% 'Hello'|trans %}
        ExtractionPattern::new(
            "statement_tag_filter",
            r"\{%-?\s*(?P<message><quoted>)\s*<passthrough><trans><trailing>\s*-?%\}",
        ),
        // 'Hello'|trans, "Hello"|raw|trans
        ExtractionPattern::new(
            "trans_filter",
            r"(?P<message><quoted>)\s*<passthrough><trans>",
        ),
        // __('module', 'Hello'), translate('module', 'Hello')
        ExtractionPattern::new(
            "module_call",
            r"\b(?:__|translate)\(\s*(?P<module><quoted>)\s*,\s*(?P<message><quoted>)",
        ),
        // __('Hello'), translate('Hello')
        ExtractionPattern::new(
            "call",
            r"\b(?:__|translate)\(\s*(?P<message><quoted>)\s*[,)]",
        ),
    ]
});
