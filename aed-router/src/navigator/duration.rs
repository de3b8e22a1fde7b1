//! Provider duration strings.
//!
//! The provider reports durations as whole seconds with an `s` suffix,
//! e.g. `"725s"`.

const SECONDS_SUFFIX: char = 's';

/// Parse the leading integer of a provider duration.
///
/// Returns `None` unless the text ends in `s` and starts with at least one
/// digit. Anything after the leading digits (such as a fraction) is ignored.
pub fn parse_duration_secs(text: &str) -> Option<u64> {
    let body = text.strip_suffix(SECONDS_SUFFIX)?;
    let end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    body[..end].parse().ok()
}

/// Convert a provider duration to whole minutes for display.
///
/// Rounds half-up. Missing or malformed input shows as `"0"`.
pub fn format_minutes(duration_text: Option<&str>) -> String {
    match duration_text.and_then(parse_duration_secs) {
        Some(secs) => (secs / 60 + u64::from(secs % 60 >= 30)).to_string(),
        None => "0".to_string(),
    }
}
