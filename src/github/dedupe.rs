//! Duplicate-detection heuristics for idempotent creates and comments.
//!
//! Matching is a case-insensitive containment check against item titles
//! and label names. This is best-effort by contract: an occasional
//! duplicate create is accepted rather than blocking progress, and two
//! concurrent check-then-create sequences can still both create.
use crate::github::types::{CommentSummary, Summary};

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Find an existing open item matching the candidate signature, checking
/// titles and label names.
pub fn find_duplicate<'a>(
    signature: &str,
    existing: &'a [Summary],
) -> Option<&'a Summary> {
    let needle = normalize(signature);
    if needle.is_empty() {
        return None;
    }

    existing.iter().find(|item| {
        overlaps(&normalize(&item.title), &needle)
            || item
                .label_names()
                .any(|label| normalize(label) == needle)
    })
}

/// True when an equivalent item already exists.
pub fn has_duplicate(signature: &str, existing: &[Summary]) -> bool {
    find_duplicate(signature, existing).is_some()
}

/// True when a comment containing the signature has already been posted.
pub fn comment_exists(signature: &str, comments: &[CommentSummary]) -> bool {
    let needle = normalize(signature);
    if needle.is_empty() {
        return false;
    }

    comments
        .iter()
        .any(|comment| normalize(&comment.body).contains(&needle))
}
