//! Accept/reject reconciliation over a parsed document.

use crate::suggestions::markup::{Decision, Segment, SuggestionMap};

/// Records a decision for one suggestion and returns the updated map.
/// An unknown id leaves the map untouched.
pub fn set_decision(mut suggestions: SuggestionMap, id: &str, accept: bool) -> SuggestionMap {
    if let Some(suggestion) = suggestions.get_mut(id) {
        suggestion.decision = Decision::from(accept);
    }
    suggestions
}

/// Rebuilds the text the user currently means.
///
/// Highlights contribute their replacement only when accepted; pending,
/// rejected and orphaned highlights contribute the original.
pub fn reconstruct(segments: &[Segment], suggestions: &SuggestionMap) -> String {
    let mut out = String::new();
    for segment in segments {
        let accepted = segment
            .suggestion_id()
            .and_then(|id| suggestions.get(id))
            .filter(|s| s.decision == Decision::Accepted);
        match accepted {
            Some(s) => out.push_str(&s.suggestion),
            None => out.push_str(segment.text()),
        }
    }
    out
}

/// Picks the text to hand to re-scoring or structuring.
///
/// A blank reconstruction falls back to the raw analyzed text; `None` means
/// there is nothing to send.
pub fn final_text(reconstructed: String, raw_fallback: Option<&str>) -> Option<String> {
    if !reconstructed.trim().is_empty() {
        return Some(reconstructed);
    }
    raw_fallback
        .filter(|raw| !raw.trim().is_empty())
        .map(str::to_string)
}
