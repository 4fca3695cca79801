//! Packaging a request document for a text-generation service.

use std::path::Path;

/// File the manual submission text is written to.
pub const MANUAL_SUBMISSION_FILE: &str = "deck_submission_text.txt";

/// File an API response is written to.
pub const RESPONSE_FILE: &str = "claude_deck_plans.txt";

/// Characters of an API response echoed to the terminal.
pub const PREVIEW_CHARS: usize = 1000;

/// Image extensions picked up as site photos, lowercase.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

const INTRODUCTION: &str =
    "I need help creating detailed deck construction plans. Here's my project information:";

const PHOTO_TOPICS: &[&str] = &[
    "Site conditions and planned deck area",
    "Current house attachment point",
    "Ground conditions and obstacles",
    "Any reference designs or sketches",
];

const REQUESTS: &[&str] = &[
    "Detailed construction plans and step-by-step instructions",
    "Complete material lists with quantities",
    "Cost estimates for my local area",
    "Safety guidelines appropriate for my skill level",
    "Permit and code compliance guidance",
    "Tool requirements and rental recommendations",
];

/// Text sent along with the document in an API request.
pub fn api_prompt(document: &str) -> String {
    format!("{INTRODUCTION}\n\n{document}")
}

/// Copy-paste text for submitting `document` by hand with `photo_count` photos.
pub fn manual_submission_text(document: &str, photo_count: usize) -> String {
    let mut text = format!("{}\n\nPHOTOS INCLUDED:\n", api_prompt(document));
    if photo_count > 0 {
        let noun = if photo_count == 1 { "photo" } else { "photos" };
        text.push_str(&format!("I'm uploading {photo_count} {noun} showing:\n"));
        for topic in PHOTO_TOPICS {
            text.push_str(&format!("• {topic}\n"));
        }
        text.push('\n');
    } else {
        text.push_str("No photos uploaded yet - I'll add them after submitting this request.\n\n");
    }
    text.push_str("PLEASE PROVIDE:\n");
    for request in REQUESTS {
        text.push_str(&format!("• {request}\n"));
    }
    text.push_str("\nThank you for your detailed assistance with this deck project!");
    text
}

/// Whether `path` names a site photo, by extension, in any case.
pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            PHOTO_EXTENSIONS.contains(&ext.as_str())
        })
}

/// MIME type of a photo, from its extension.
pub fn media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// The first `limit` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_text_with_photos() {
        let text = manual_submission_text("<deck_plan_request/>", 3);
        assert!(text.starts_with(INTRODUCTION));
        assert!(text.contains("<deck_plan_request/>"));
        assert!(text.contains("I'm uploading 3 photos showing:"));
        assert!(text.contains("• Current house attachment point"));
        assert!(text.contains("PLEASE PROVIDE:"));
        assert!(text.ends_with("deck project!"));
    }

    #[test]
    fn test_manual_text_without_photos() {
        let text = manual_submission_text("<deck_plan_request/>", 0);
        assert!(text.contains("No photos uploaded yet"));
        assert!(!text.contains("I'm uploading"));

        let single = manual_submission_text("<x/>", 1);
        assert!(single.contains("I'm uploading 1 photo showing:"));
    }

    #[test]
    fn test_photo_detection() {
        assert!(is_photo(Path::new("yard.JPG")));
        assert!(is_photo(Path::new("yard.jpeg")));
        assert!(is_photo(Path::new("sketch.Png")));
        assert!(!is_photo(Path::new("deck_plan_request_1.xml")));
        assert!(!is_photo(Path::new("jpg")));
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(media_type(Path::new("a.bmp")), Some("image/bmp"));
        assert_eq!(media_type(Path::new("a.tiff")), None);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }
}
