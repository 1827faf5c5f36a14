// Cross-cutting prompt fragments shared by every LLM caller.
// Feature-specific prompts live next to the feature (see letter/prompts.rs).

/// Keeps the model to facts present in the supplied context.
pub const GROUNDING_INSTRUCTION: &str = "\
    Use only facts present in the candidate information below. \
    Do NOT invent employers, dates, degrees, metrics or skills. \
    If a detail is missing, write around it instead of guessing.";

/// Asks for the deliverable only, without commentary around it.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with the finished text only. \
    Do NOT add a preamble, notes, explanations or markdown code fences.";
