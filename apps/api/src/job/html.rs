//! Best-effort HTML to plain text for job postings.
//!
//! No DOM is built. Scripts, styles and comments are dropped, block-level
//! closing tags become line breaks, every other tag is removed, and the result
//! is cut down to the part of the page that looks like the job description.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Upper bound on the characters kept from a page.
pub const MAX_JOB_TEXT_CHARS: usize = 5000;

static INVISIBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<!--.*?-->",
    )
    .expect("static regex")
});

static BLOCK_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<br\s*/?>|</(?:p|div|li|ul|ol|h[1-6]|tr|td|th|table|section|article|header|footer|main|aside|nav|dd|dt|pre|blockquote|title)\s*>",
    )
    .expect("static regex")
});

/// Only a `<` followed by a tag name, `/`, `!` or `?` opens a tag; a bare
/// `<` in running text ("3 < 5 years") is kept.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:/?[A-Za-z][^>]*|![^>]*|\?[^>]*)>").expect("static regex")
});

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("static regex"));

/// Headings that usually open the job section of a posting, most specific
/// first. The first one found wins, not the earliest in the page.
static SECTION_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)job description",
        r"(?i)about the job",
        r"(?i)about this role",
        r"(?i)responsibilities",
        r"(?i)what you['’]ll do",
        r"(?i)requirements",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Strips markup and normalises whitespace. Lines are trimmed, runs of two
/// or more spaces split a line, and blank lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let text = INVISIBLE_RE.replace_all(html, " ");
    let text = BLOCK_BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the job section of page text, capped at `MAX_JOB_TEXT_CHARS`.
/// Falls back to the start of the page when no section heading is found.
pub fn focus_job_section(text: &str) -> &str {
    let start = SECTION_MARKERS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.start())
        .unwrap_or(0);
    truncate_chars(&text[start..], MAX_JOB_TEXT_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                "ndash" => Some('–'),
                "mdash" => Some('—'),
                "rsquo" => Some('’'),
                "lsquo" => Some('‘'),
                "bull" => Some('•'),
                _ => numeric_entity(entity),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn numeric_entity(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTING: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Senior Python Developer | Acme</title>
    <style>body { color: red; } .requirements { display: none; }</style>
    <script>window.tracking = "<b>Requirements</b>";</script>
  </head>
  <body>
    <nav><a href="/">Home</a> <a href="/jobs">Jobs</a></nav>
    <!-- job body starts here -->
    <h1>Senior Python Developer</h1>
    <p>Requirements: Python, 3 years experience</p>
    <ul><li>Django &amp; FastAPI</li><li>Postgres</li></ul>
  </body>
</html>"#;

    #[test]
    fn test_html_to_text_drops_scripts_styles_and_tags() {
        let text = html_to_text(POSTING);
        assert!(text.contains("Requirements: Python, 3 years experience"));
        assert!(!text.contains('<'));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("job body starts"));
        assert!(text.contains("Django & FastAPI"));
    }

    #[test]
    fn test_html_to_text_keeps_bare_less_than() {
        let text = html_to_text("<p>Experience: 3 < 5 years required. Python.</p><p>Next</p>");
        assert_eq!(text, "Experience: 3 < 5 years required. Python.\nNext");
    }

    #[test]
    fn test_html_to_text_one_block_per_line() {
        let text = html_to_text("<div>First</div><div>Second</div><p>Third<br/>Fourth</p>");
        assert_eq!(text, "First\nSecond\nThird\nFourth");
    }

    #[test]
    fn test_html_to_text_splits_on_double_spaces() {
        let text = html_to_text("<p>Salary: 100k    Location: Remote</p>");
        assert_eq!(text, "Salary: 100k\nLocation: Remote");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("It&#39;s &#x41;&#66;"), "It's AB");
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
    }

    #[test]
    fn test_focus_starts_at_first_matching_marker() {
        let text = "Acme Corp\nRequirements\nRust\nAbout the job\nBuild things";
        // "about the job" outranks "requirements" even though it appears later.
        assert_eq!(focus_job_section(text), "About the job\nBuild things");
    }

    #[test]
    fn test_focus_is_case_insensitive() {
        let text = "Menu\nRESPONSIBILITIES\nShip features";
        assert_eq!(focus_job_section(text), "RESPONSIBILITIES\nShip features");
    }

    #[test]
    fn test_focus_without_marker_keeps_page_start() {
        let text = "Acme is hiring a backend engineer.";
        assert_eq!(focus_job_section(text), text);
    }

    #[test]
    fn test_focus_caps_length_on_char_boundary() {
        let text = format!("Requirements: {}", "é".repeat(MAX_JOB_TEXT_CHARS));
        let focused = focus_job_section(&text);
        assert_eq!(focused.chars().count(), MAX_JOB_TEXT_CHARS);
        assert!(focused.starts_with("Requirements: "));
    }
}
