use std::sync::LazyLock;

use regex::Regex;

// Standard and short URLs (v= query or bare /<id> path), embed paths,
// youtu.be links. YouTube video ids are exactly 11 characters.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
        r"embed/([0-9A-Za-z_-]{11})",
        r"youtu\.be/([0-9A-Za-z_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract the 11-character video id from a user-supplied video reference.
pub fn extract_video_id(video_ref: &str) -> Option<String> {
    for pattern in ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(video_ref) {
            return Some(captures[1].to_string());
        }
    }
    None
}
