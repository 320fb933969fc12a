use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn format_score(score: f32) -> String {
    format!("{score:.1}")
}

/// Shortens `title` to at most `max_chars` characters, ending with an ellipsis
/// when something was cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut short = title.chars().take(max_chars - 1).collect::<String>();
    short.push('…');
    short
}

pub fn stable_unit(id: &str) -> f32 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32
}
