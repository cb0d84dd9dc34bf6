// Inline suggestion markup: `[original]{suggestion}` pairs produced by the
// resume editor prompt, and the accept/reject model layered on top of them.
// Everything here is pure: no I/O, no shared state.

pub mod markup;
pub mod reconcile;
