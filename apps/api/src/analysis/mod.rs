// Lesson-plan analysis: prompt assembly and the structured model call.
// All model traffic goes through llm_client; this module only shapes the payload.

pub mod prompt_builder;
pub mod prompts;

pub use prompt_builder::{build, PromptPayload};
