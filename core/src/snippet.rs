//! Result previews: a bounded window of page text around the query, with the
//! query marked up.

use regex::{Captures, Regex, RegexBuilder};

pub const DEFAULT_EXCERPT_LEN: usize = 120;
/// Characters of text kept before the first match.
pub const EXCERPT_LEFT_CONTEXT: usize = 30;
const ELLIPSIS: &str = "...";

/// Case-insensitive matcher for the literal query, or None when the query is empty.
fn literal_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%err, query, "could not build highlight pattern");
            None
        }
    }
}

/// At most `max_len` characters of `content` starting shortly before the first
/// case-insensitive occurrence of `query`.
pub fn excerpt(content: &str, query: &str, max_len: usize) -> String {
    let found = literal_pattern(query).and_then(|re| re.find(content).map(|m| (m.start(), m.as_str().chars().count())));
    let Some((byte_idx, match_len)) = found else {
        let mut head: String = content.chars().take(max_len).collect();
        head.push_str(ELLIPSIS);
        return head;
    };

    let total = content.chars().count();
    let match_char = content[..byte_idx].chars().count();
    // shrink the left context so the match itself stays inside short windows
    let left = EXCERPT_LEFT_CONTEXT.min(max_len.saturating_sub(match_len));
    let start = match_char.saturating_sub(left);
    let end = (start + max_len).min(total);

    let mut out = String::new();
    if start > 0 { out.push_str(ELLIPSIS); }
    out.extend(content.chars().skip(start).take(end - start));
    if end < total { out.push_str(ELLIPSIS); }
    out
}

/// Wrap every case-insensitive occurrence of `query` in `<mark>` tags.
pub fn highlight(text: &str, query: &str) -> String {
    match literal_pattern(query) {
        Some(re) => re.replace_all(text, |caps: &Captures| format!("<mark>{}</mark>", &caps[0])).into_owned(),
        None => text.to_string(),
    }
}

/// [`excerpt`] followed by [`highlight`], as shown in a result list.
pub fn highlighted_excerpt(content: &str, query: &str, max_len: usize) -> String {
    highlight(&excerpt(content, query, max_len), query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_left_context_and_ellipses() {
        let content = format!("{}needle{}", "a".repeat(50), "b".repeat(100));
        let ex = excerpt(&content, "NEEDLE", 40);
        assert!(ex.starts_with("..."));
        assert!(ex.ends_with("..."));
        let body = &ex[3..ex.len() - 3];
        assert_eq!(body.chars().count(), 40);
        assert_eq!(body.find("needle"), Some(EXCERPT_LEFT_CONTEXT));
    }

    #[test]
    fn short_window_still_contains_match() {
        let content = format!("{}needle{}", "a".repeat(50), "b".repeat(50));
        let ex = excerpt(&content, "needle", 20);
        assert_eq!(ex, format!("...{}needle...", "a".repeat(14)));
        assert!(highlighted_excerpt(&content, "needle", 20).contains("<mark>needle</mark>"));
        // window narrower than the match keeps its start
        assert_eq!(excerpt(&content, "needle", 3), "...nee...");
    }

    #[test]
    fn match_near_start_has_no_prefix() {
        assert_eq!(excerpt("intro pytest", "pytest", 120), "intro pytest");
    }

    #[test]
    fn no_match_takes_head() {
        assert_eq!(excerpt("abcdef", "zz", 3), "abc...");
        assert_eq!(excerpt("abcdef", "", 3), "abc...");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let content = "性能测试".repeat(20);
        let ex = excerpt(&content, "测试", 10);
        assert!(ex.ends_with("..."));
        assert_eq!(ex.trim_end_matches('.').chars().count(), 10);
    }

    #[test]
    fn highlight_preserves_case() {
        assert_eq!(highlight("Pytest and pytest", "PYTEST"), "<mark>Pytest</mark> and <mark>pytest</mark>");
        assert_eq!(highlight("unchanged", ""), "unchanged");
    }
}
