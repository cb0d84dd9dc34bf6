//! Suggestion-markup parser.
//!
//! Splits AI-edited text into an ordered list of plain and highlighted
//! segments. A highlight comes from a `[ORIGINAL]{SUGGESTION}` pair where the
//! closing bracket is immediately followed by the opening brace. Both spans
//! are matched non-greedily and may contain newlines, brackets and braces.
//!
//! Parsing never fails: an unmatched `[` or `{` is kept as ordinary text.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Suggestions keyed by their generated id (`suggestion-0`, `suggestion-1`, ...).
/// Keys sort as strings (`suggestion-10` before `suggestion-2`); document order
/// comes from `ParsedDocument::segments`.
pub type SuggestionMap = BTreeMap<String, Suggestion>;

/// The user's verdict on a single suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Not yet reviewed; rendered highlighted, original text kept.
    #[default]
    Pending,
    /// Replacement text is used.
    Accepted,
    /// Original text is kept and rendered struck through.
    Rejected,
}

impl From<bool> for Decision {
    fn from(accept: bool) -> Self {
        if accept {
            Decision::Accepted
        } else {
            Decision::Rejected
        }
    }
}

/// One replacement candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub original: String,
    pub suggestion: String,
    #[serde(default)]
    pub decision: Decision,
}

/// A contiguous run of parsed text. Order is both display and reconstruction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Regular { text: String },
    Highlight { text: String, suggestion_id: String },
}

impl Segment {
    /// The text shown when the segment is not replaced (for highlights, the trimmed original).
    pub fn text(&self) -> &str {
        match self {
            Segment::Regular { text } | Segment::Highlight { text, .. } => text,
        }
    }

    pub fn suggestion_id(&self) -> Option<&str> {
        match self {
            Segment::Regular { .. } => None,
            Segment::Highlight { suggestion_id, .. } => Some(suggestion_id),
        }
    }
}

/// Result of one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub segments: Vec<Segment>,
    pub suggestions: SuggestionMap,
}

/// Byte positions of one `[...]{...}` pair inside the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkupPair {
    /// Position of the opening `[`.
    start: usize,
    original: Range<usize>,
    replacement: Range<usize>,
    /// One past the closing `}`.
    end: usize,
}

/// Finds the first markup pair starting at or after `from`.
///
/// If the first `[` cannot be completed into a pair, no later `[` can either:
/// any `]{ ... }` following a later bracket also follows the first one.
fn find_pair(text: &str, from: usize) -> Option<MarkupPair> {
    let start = from + text[from..].find('[')?;
    let original_start = start + 1;
    let close = original_start + text[original_start..].find("]{")?;
    let replacement_start = close + 2;
    let brace = replacement_start + text[replacement_start..].find('}')?;

    Some(MarkupPair {
        start,
        original: original_start..close,
        replacement: replacement_start..brace,
        end: brace + 1,
    })
}

/// Parses marked-up text into segments and a fresh suggestion map.
///
/// Ids are allocated from a counter local to this call, so parsing the same
/// text twice gives equal results but the ids carry no identity across passes.
/// A pair whose original or replacement is blank after trimming is dropped
/// entirely; its characters are not re-emitted as regular text.
pub fn parse(marked_up: &str) -> ParsedDocument {
    let mut segments = Vec::new();
    let mut suggestions = SuggestionMap::new();
    let mut cursor = 0;

    while let Some(pair) = find_pair(marked_up, cursor) {
        if pair.start > cursor {
            segments.push(Segment::Regular {
                text: marked_up[cursor..pair.start].to_string(),
            });
        }

        let original = marked_up[pair.original.clone()].trim();
        let replacement = marked_up[pair.replacement.clone()].trim();

        if !original.is_empty() && !replacement.is_empty() {
            let id = format!("suggestion-{}", suggestions.len());
            suggestions.insert(
                id.clone(),
                Suggestion {
                    id: id.clone(),
                    original: original.to_string(),
                    suggestion: replacement.to_string(),
                    decision: Decision::Pending,
                },
            );
            segments.push(Segment::Highlight {
                text: original.to_string(),
                suggestion_id: id,
            });
        }

        cursor = pair.end;
    }

    if cursor < marked_up.len() {
        segments.push(Segment::Regular {
            text: marked_up[cursor..].to_string(),
        });
    }

    ParsedDocument {
        segments,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn originals(doc: &ParsedDocument) -> String {
        doc.segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn test_plain_text_is_single_regular_segment() {
        let input = "Senior engineer with 6 years of Rust.\nLed the storage team.";
        let doc = parse(input);
        assert_eq!(
            doc.segments,
            vec![Segment::Regular {
                text: input.to_string()
            }]
        );
        assert!(doc.suggestions.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_segments() {
        let doc = parse("");
        assert!(doc.segments.is_empty());
        assert!(doc.suggestions.is_empty());
    }

    #[test]
    fn test_end_to_end_sentence() {
        let doc = parse("I [worked as a dev]{Served as a Software Engineer} at Acme.");
        assert_eq!(
            doc.segments,
            vec![
                Segment::Regular {
                    text: "I ".to_string()
                },
                Segment::Highlight {
                    text: "worked as a dev".to_string(),
                    suggestion_id: "suggestion-0".to_string(),
                },
                Segment::Regular {
                    text: " at Acme.".to_string()
                },
            ]
        );
        let s = &doc.suggestions["suggestion-0"];
        assert_eq!(s.original, "worked as a dev");
        assert_eq!(s.suggestion, "Served as a Software Engineer");
        assert_eq!(s.decision, Decision::Pending);
    }

    #[test]
    fn test_ids_follow_match_order() {
        let doc = parse("[a]{A} then [b]{B} then [c]{C}");
        let ids: Vec<_> = doc
            .segments
            .iter()
            .filter_map(Segment::suggestion_id)
            .collect();
        assert_eq!(ids, vec!["suggestion-0", "suggestion-1", "suggestion-2"]);
        assert_eq!(doc.suggestions.len(), 3);
        assert_eq!(doc.suggestions["suggestion-2"].suggestion, "C");
    }

    #[test]
    fn test_segments_keep_document_order_past_ten_suggestions() {
        let input: String = (0..12).map(|i| format!("[o{i}]{{s{i}}} ")).collect();
        let doc = parse(&input);

        let in_document: Vec<_> = doc
            .segments
            .iter()
            .filter_map(Segment::suggestion_id)
            .collect();
        let expected: Vec<_> = (0..12).map(|i| format!("suggestion-{i}")).collect();
        assert_eq!(in_document, expected);

        let map_order: Vec<_> = doc.suggestions.keys().cloned().collect();
        assert_eq!(map_order[2], "suggestion-10");
    }

    #[test]
    fn test_whitespace_only_pair_is_dropped() {
        let doc = parse("[  ]{  }");
        assert!(doc.segments.is_empty());
        assert!(doc.suggestions.is_empty());
    }

    #[test]
    fn test_dropped_pair_does_not_consume_an_id() {
        let doc = parse("x [ ]{y} [a]{b}");
        assert_eq!(doc.suggestions.len(), 1);
        assert!(doc.suggestions.contains_key("suggestion-0"));
        // The dropped span leaves its neighbours as two separate regular runs.
        assert_eq!(originals(&doc), "x  a");
    }

    #[test]
    fn test_half_empty_pair_is_dropped() {
        let doc = parse("keep [this]{   } text");
        assert!(doc.suggestions.is_empty());
        assert_eq!(originals(&doc), "keep  text");
    }

    #[test]
    fn test_captures_are_trimmed() {
        let doc = parse("[ Managed  ]{\n  Directed \n}");
        let s = &doc.suggestions["suggestion-0"];
        assert_eq!(s.original, "Managed");
        assert_eq!(s.suggestion, "Directed");
        assert_eq!(doc.segments[0].text(), "Managed");
    }

    #[test]
    fn test_originals_round_trip_to_stripped_source() {
        let doc = parse("Built [APIs]{REST APIs} and [tools]{internal tooling}.\nShipped weekly.");
        assert_eq!(originals(&doc), "Built APIs and tools.\nShipped weekly.");
    }

    #[test]
    fn test_unmatched_brackets_stay_as_text() {
        for input in ["Skills: [Rust, Go", "see {note} and ]{", "[open]{never closed", "a ]{b} c"] {
            let doc = parse(input);
            assert_eq!(doc.segments.len(), 1, "input: {input:?}");
            assert_eq!(doc.segments[0].text(), input);
            assert!(doc.suggestions.is_empty());
        }
    }

    #[test]
    fn test_non_greedy_spans_allow_nested_brackets() {
        let doc = parse("[[a]]{b} and [x [y]{z}");
        assert_eq!(doc.suggestions["suggestion-0"].original, "[a]");
        assert_eq!(doc.suggestions["suggestion-0"].suggestion, "b");
        assert_eq!(doc.suggestions["suggestion-1"].original, "x [y");
        assert_eq!(doc.suggestions["suggestion-1"].suggestion, "z");
    }

    #[test]
    fn test_replacement_stops_at_first_closing_brace() {
        let doc = parse("[a]{b {c} d}");
        assert_eq!(doc.suggestions["suggestion-0"].suggestion, "b {c");
        assert_eq!(doc.segments.last().map(Segment::text), Some(" d}"));
    }

    #[test]
    fn test_multiline_spans() {
        let doc = parse("[Objective: I am seeking\na position]{Objective: Strategic\nadministrator}\n");
        assert_eq!(
            doc.suggestions["suggestion-0"].original,
            "Objective: I am seeking\na position"
        );
        assert_eq!(
            doc.segments,
            vec![
                Segment::Highlight {
                    text: "Objective: I am seeking\na position".to_string(),
                    suggestion_id: "suggestion-0".to_string(),
                },
                Segment::Regular {
                    text: "\n".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_multibyte_text_around_pairs() {
        let doc = parse("Café — [naïve]{expert} résumé ✓");
        assert_eq!(originals(&doc), "Café — naïve résumé ✓");
        assert_eq!(doc.suggestions["suggestion-0"].suggestion, "expert");
    }

    #[test]
    fn test_reparse_yields_fresh_equal_namespace() {
        let input = "[a]{b} [c]{d}";
        assert_eq!(parse(input), parse(input));
    }

    #[test]
    fn test_segment_wire_format() {
        let json = serde_json::to_value(Segment::Highlight {
            text: "x".to_string(),
            suggestion_id: "suggestion-0".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "highlight", "text": "x", "suggestion_id": "suggestion-0"})
        );
        let regular: Segment =
            serde_json::from_value(serde_json::json!({"type": "regular", "text": "y"})).unwrap();
        assert_eq!(regular.suggestion_id(), None);
    }
}
