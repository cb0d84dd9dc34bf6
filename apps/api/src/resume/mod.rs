// Resume analysis and builder tool.
// Analysis: PDF/text → AI editor pass → suggestion markup → AI score.
// All LLM calls go through the TextGenerator in AppState.

pub mod analysis;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod score;
pub mod session;
