use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
}

/// Tokenize text into (term, position) using NFKC normalization and lowercasing.
///
/// Tokens are maximal runs of Unicode letters and numbers; everything else is a
/// separator. Indexing and querying must both go through this function.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized)
        .enumerate()
        .map(|(pos, mat)| (mat.as_str().to_string(), pos))
        .collect()
}

/// Just the terms, in order.
pub fn terms(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|(t, _)| t).collect()
}
