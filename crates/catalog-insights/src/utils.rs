//! Shared helpers for turning raw cell text into catalog values.

// =============================================================================
// Null Markers
// =============================================================================

/// Cell values read as null. Matching is exact and case-sensitive.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check if a raw cell value is one of the null markers.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_insights::utils::is_null_marker;
///
/// assert!(is_null_marker("N/A"));
/// assert!(!is_null_marker("n/A"));
/// assert!(!is_null_marker("Missing"));
/// ```
pub fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s)
}

/// Normalize a raw cell: null markers become `None`, anything else is kept
/// verbatim (no trimming).
pub fn normalize_cell(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !is_null_marker(v) => Some(v.to_string()),
        _ => None,
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid
/// UTF-8. Latin-1 maps every byte to the code point of the same value, so
/// the fallback never fails.
pub fn decode_text(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(err) => {
            let text = err.into_bytes().into_iter().map(char::from).collect();
            (text, TextEncoding::Latin1)
        }
    }
}

/// Encoding a text source was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Latin1 => write!(f, "Latin-1"),
        }
    }
}
