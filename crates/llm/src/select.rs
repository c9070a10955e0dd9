//! Model selection policy.
//!
//! The service may offer any mix of models; we prefer small, fast ones
//! and fall back to whatever mistral variant is installed.

/// Preferred model identifiers, highest priority first.
pub const PREFERRED_MODELS: [&str; 5] = [
    "llama3.2:1b",
    "mistral:7b",
    "mistral:latest",
    "llama3.1:8b",
    "llama3.1:3b",
];

/// Keyword matched when none of the preferred identifiers is present.
const FALLBACK_MODEL_KEYWORD: &str = "mistral";

/// Pick a model from the service's available list.
///
/// Scans [`PREFERRED_MODELS`] in order and returns the first available
/// model whose name contains that identifier (case-insensitive
/// substring). When none matches, returns the first model containing
/// [`FALLBACK_MODEL_KEYWORD`]. `None` means generation is unavailable.
pub fn select_model(available: &[String]) -> Option<String> {
    for preferred in PREFERRED_MODELS {
        if let Some(name) = available
            .iter()
            .find(|model| model.to_lowercase().contains(preferred))
        {
            return Some(name.clone());
        }
    }

    available
        .iter()
        .find(|model| model.to_lowercase().contains(FALLBACK_MODEL_KEYWORD))
        .cloned()
}
