use std::collections::HashSet;

pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LEN: usize = 30;

/// Maps raw user-entered tags to the canonical set stored with a post.
pub trait TagNormalizer: Send + Sync {
    fn normalize(&self, raw: &[String]) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalTagNormalizer;

impl TagNormalizer for CanonicalTagNormalizer {
    fn normalize(&self, raw: &[String]) -> Vec<String> {
        normalize_tags(raw)
    }
}

/// Best-effort tag sanitization.
///
/// Each value is trimmed, stripped of one leading `#` and lower-cased. Values
/// that end up empty, longer than [`MAX_TAG_LEN`] or outside `[a-z0-9_-]` are
/// dropped silently. Duplicates keep their first position and the output stops
/// at [`MAX_TAGS`] entries.
pub fn normalize_tags<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for value in values {
        let trimmed = value.as_ref().trim();
        let tag = trimmed.strip_prefix('#').unwrap_or(trimmed).to_lowercase();

        if tag.is_empty() || tag.len() > MAX_TAG_LEN || !tag.chars().all(is_tag_char) {
            continue;
        }

        if !seen.insert(tag.clone()) {
            continue;
        }
        normalized.push(tag);
        if normalized.len() >= MAX_TAGS {
            break;
        }
    }

    normalized
}

fn is_tag_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-'
}
