//! Answer construction.
//!
//! The pipeline orchestrates one request/response cycle: retrieval,
//! the primary generation attempt, the extractive fallback, and the
//! final formatting pass.

pub mod fallback;
pub mod pipeline;
pub mod postprocess;

pub use fallback::{synthesize, NO_INFORMATION_MESSAGE, NOTHING_SPECIFIC_MESSAGE};
pub use pipeline::{AnswerPipeline, NO_RELEVANT_MESSAGE};
pub use postprocess::post_process;
