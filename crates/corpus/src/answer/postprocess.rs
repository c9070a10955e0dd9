//! Final answer formatting.

/// Boilerplate lead-ins the generation service tends to produce despite
/// instructions. The first matching one is stripped.
const BOILERPLATE_LEAD_INS: [&str; 5] = [
    "Based on the provided context,",
    "Based on the context,",
    "According to the provided context,",
    "According to the context,",
    "Based on the information provided,",
];

/// Final formatting pass over an answer.
///
/// Collapses whitespace, strips the first matching boilerplate lead-in,
/// and ensures the text ends with terminal punctuation. Idempotent;
/// empty input stays empty.
pub fn post_process(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut result = strip_lead_in(&collapsed).to_string();

    if result.is_empty() {
        return result;
    }

    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }

    result
}

/// Strip the first matching boilerplate lead-in, case-insensitively.
fn strip_lead_in(text: &str) -> &str {
    for lead_in in BOILERPLATE_LEAD_INS {
        if text.len() >= lead_in.len()
            && text.is_char_boundary(lead_in.len())
            && text[..lead_in.len()].eq_ignore_ascii_case(lead_in)
        {
            return text[lead_in.len()..].trim_start();
        }
    }
    text
}
