//! Prompt assembly for the Wayfinder CLI.
//!
//! Builds the grounded prompt handed to the text-generation call: retrieved
//! policy passages in retrieval order, clear section delimiters, the user's
//! question, and an instruction to answer only from the provided context.

pub mod grounded;

pub use grounded::{build_grounded_prompt, GroundedPrompt};
