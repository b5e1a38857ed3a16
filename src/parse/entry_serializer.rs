use chrono::SecondsFormat;

use crate::model::entry::Entry;

/// Render an entry as the markdown document stored on disk.
///
/// Front matter carries `title`, `date` (RFC 3339), `author`, `tool` and,
/// when there are any, `tags` as a list. The body has a `## Prompt` section
/// and, only when the output is non-blank, a `## Output` section.
pub fn serialize_entry(entry: &Entry) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    push_field(&mut out, "title", &entry.title);
    push_field(
        &mut out,
        "date",
        &entry.date.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    push_field(&mut out, "author", &entry.author);
    push_field(&mut out, "tool", &entry.tool);

    let tags: Vec<String> = entry
        .tags
        .iter()
        .map(|t| single_line(t))
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        out.push_str("tags:\n");
        for tag in &tags {
            out.push_str(&format!("  - {}\n", scalar(tag)));
        }
    }
    out.push_str("---\n\n");

    out.push_str("## Prompt\n\n");
    out.push_str(&entry.prompt);
    out.push_str("\n\n");

    if entry.has_output() {
        out.push_str("## Output\n\n");
        out.push_str(&entry.output);
        out.push('\n');
    }

    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{}: {}\n", key, scalar(&single_line(value))));
}

/// Front-matter values are one line each.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quote values the front-matter reader would otherwise misread: empty
/// values (a bare `key:` opens a list) and values starting with a quote or
/// a `[`.
fn scalar(value: &str) -> String {
    if value.is_empty() || value.starts_with(['"', '\'', '[']) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
