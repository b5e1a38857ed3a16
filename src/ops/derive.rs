use chrono::NaiveDate;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 60;

/// Maximum slug length in characters.
pub const MAX_SLUG_CHARS: usize = 50;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a title from prompt text.
///
/// Whitespace is normalized first. Titles longer than 60 characters are cut
/// to the first 60 and then backed up to the last space in that window, so a
/// word is never split (unless the window has no space at all).
pub fn generate_title(prompt: &str) -> String {
    let normalized = normalize_title(prompt);
    if normalized.chars().count() <= MAX_TITLE_CHARS {
        return normalized;
    }
    let window = take_chars(&normalized, MAX_TITLE_CHARS);
    match window.rfind(' ') {
        Some(pos) if pos > 0 => window[..pos].to_string(),
        _ => window.to_string(),
    }
}

/// Turn a title into a lowercase, hyphen-separated, filesystem-safe slug.
///
/// ```
/// assert_eq!(crumb::ops::derive::slugify("Fix the bug!"), "fix-the-bug");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        let c = if c == ' ' || c == '_' { '-' } else { c };
        if c == '-' {
            // collapse runs and skip leading hyphens
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_alphanumeric() {
            slug.push(c);
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.chars().count() <= MAX_SLUG_CHARS {
        return slug;
    }
    let window = take_chars(&slug, MAX_SLUG_CHARS);
    match window.rfind('-') {
        Some(pos) if pos > 0 => window[..pos].to_string(),
        _ => window.to_string(),
    }
}

/// `YYYY-MM-DD-<slug>.md` for the given title and calendar date.
pub fn generate_filename(title: &str, date: NaiveDate) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slugify(title))
}

/// The first `n` characters of `s` as a borrowed slice.
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn title_collapses_whitespace() {
        assert_eq!(generate_title("   multiple   spaces   "), "multiple spaces");
        assert_eq!(generate_title("line one\n\n\tline two"), "line one line two");
    }

    #[test]
    fn title_short_prompt_unchanged() {
        assert_eq!(generate_title("Fix the bug"), "Fix the bug");
        let exactly_sixty = "a".repeat(60);
        assert_eq!(generate_title(&exactly_sixty), exactly_sixty);
    }

    #[test]
    fn title_truncates_at_word_boundary() {
        // space at index 58, total length 100
        let prompt = format!("{} {}", "a".repeat(58), "b".repeat(41));
        assert_eq!(prompt.chars().count(), 100);
        let title = generate_title(&prompt);
        assert_eq!(title, "a".repeat(58));
        assert!(title.chars().count() <= MAX_TITLE_CHARS);
    }

    #[test]
    fn title_never_splits_words() {
        let prompt = "Refactor the payment reconciliation service so that it retries idempotently";
        let title = generate_title(prompt);
        assert!(title.chars().count() <= MAX_TITLE_CHARS);
        assert!(prompt.starts_with(&title));
        let next = prompt[title.len()..].chars().next();
        assert_eq!(next, Some(' '));
    }

    #[test]
    fn title_without_space_hard_truncates() {
        let prompt = "x".repeat(80);
        assert_eq!(generate_title(&prompt), "x".repeat(60));
    }

    #[test]
    fn title_counts_characters_not_bytes() {
        let prompt = "é".repeat(59);
        assert_eq!(generate_title(&prompt), prompt);
    }

    #[test]
    fn title_empty() {
        assert_eq!(generate_title("  \n "), "");
    }

    #[test]
    fn slug_basic() {
        assert_eq!(slugify("Fix the bug"), "fix-the-bug");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
        assert_eq!(slugify("What's up, doc?"), "whats-up-doc");
    }

    #[test]
    fn slug_collapses_and_trims_hyphens() {
        assert_eq!(slugify("--a  --  b--"), "a-b");
        assert_eq!(slugify(" - "), "");
        assert_eq!(slugify("a - - b"), "a-b");
    }

    #[test]
    fn slug_keeps_unicode_letters() {
        assert_eq!(slugify("Café Über 42"), "café-über-42");
    }

    #[test]
    fn slug_caps_at_hyphen_boundary() {
        let title = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let slug = slugify(title);
        assert!(slug.chars().count() <= MAX_SLUG_CHARS);
        assert!(!slug.ends_with('-'));
        assert_eq!(slug, "alpha-bravo-charlie-delta-echo-foxtrot-golf-hotel");
    }

    #[test]
    fn slug_hard_truncates_without_hyphen() {
        let title = "z".repeat(70);
        assert_eq!(slugify(&title), "z".repeat(50));
    }

    #[test]
    fn slug_is_idempotent() {
        let inputs = [
            "Fix the bug",
            "  __Weird__  input -- with ** symbols ",
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet",
            "İstanbul ŞEHİR",
            "",
            "---",
            "ALL CAPS AND 123 numbers",
            &"q".repeat(90),
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn filename_from_title_and_date() {
        assert_eq!(
            generate_filename("Fix the bug", jan_15()),
            "2024-01-15-fix-the-bug.md"
        );
    }

    #[test]
    fn filename_with_empty_title() {
        assert_eq!(generate_filename("", jan_15()), "2024-01-15-.md");
    }

    #[test]
    fn normalize_title_keeps_length() {
        let long = format!("  {}  ", "word ".repeat(30));
        let normalized = normalize_title(&long);
        assert!(normalized.chars().count() > MAX_TITLE_CHARS);
        assert!(!normalized.starts_with(' '));
        assert!(!normalized.ends_with(' '));
    }
}
