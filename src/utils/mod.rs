//! Project-specific utilities live here.

/// Translate a `0`/`1` style query flag into a boolean filter.
///
/// Absent or empty values mean "no filter". `"1"` is `true`; any other value
/// is `false`.
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        None | Some("") => None,
        Some(flag) => Some(flag == "1"),
    }
}

/// Treat an empty query string value as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
