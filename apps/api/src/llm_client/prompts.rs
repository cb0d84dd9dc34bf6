// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every prompt whose answer is parsed as JSON.
/// The response is still run through the tolerant extractor in `resume::score`.
pub const JSON_ONLY_INSTRUCTION: &str = "RESPOND WITH ONLY THE JSON OBJECT - NO OTHER TEXT. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
