use indexmap::IndexMap;

const DELIMITER: &str = "---";

/// Why a front-matter block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontMatterError {
    #[error("missing opening `---` line")]
    MissingOpening,
    #[error("front matter is never closed with `---`")]
    Unterminated,
    #[error("line {line}: expected `key: value`, found {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: list item without a preceding `key:` line")]
    OrphanListItem { line: usize },
}

/// Parsed front matter: scalar fields and list fields, both in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub values: IndexMap<String, String>,
    pub lists: IndexMap<String, Vec<String>>,
}

impl FrontMatter {
    /// Scalar value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// List items for `key`; empty when the key is absent.
    pub fn list(&self, key: &str) -> &[String] {
        self.lists.get(key).map_or(&[], |v| v.as_slice())
    }
}

/// Split a markdown document into its front matter and the body after the
/// closing delimiter.
///
/// Accepted shape:
///
/// ```text
/// ---
/// key: value
/// list:
///   - item
/// ---
/// body
/// ```
///
/// Blank lines and `#` comments inside the block are ignored. Anything else
/// that is not a `key: value` pair or a list item under a bare `key:` makes
/// the whole block malformed; there is no partial extraction.
pub fn parse_front_matter(source: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    let mut offset = match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => first.len(),
        _ => return Err(FrontMatterError::MissingOpening),
    };

    let mut fm = FrontMatter::default();
    // key of the most recent bare `key:` line, collecting list items
    let mut open_list: Option<String> = None;

    for (idx, raw) in lines.enumerate() {
        // 1-based, and the opening delimiter is line 1
        let line_no = idx + 2;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);

        if line.trim_end() == DELIMITER {
            if let Some(key) = open_list.take() {
                fm.lists.entry(key).or_default();
            }
            return Ok((fm, &source[offset..]));
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == "-" || trimmed.starts_with("- ") {
            let key = open_list
                .as_ref()
                .ok_or(FrontMatterError::OrphanListItem { line: line_no })?;
            let item = unquote(trimmed[1..].trim());
            if !item.is_empty() {
                fm.lists.entry(key.clone()).or_default().push(item.to_string());
            }
            continue;
        }

        let malformed = || FrontMatterError::MalformedLine {
            line: line_no,
            text: line.to_string(),
        };
        if line.starts_with([' ', '\t']) {
            return Err(malformed());
        }
        let (key, value) = line.split_once(':').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(malformed());
        }

        if let Some(prev) = open_list.take() {
            fm.lists.entry(prev).or_default();
        }

        let value = value.trim();
        if value.is_empty() {
            open_list = Some(key.to_string());
        } else if let Some(inline) = parse_inline_list(value) {
            fm.lists.insert(key.to_string(), inline);
        } else {
            fm.values.insert(key.to_string(), unquote(value).to_string());
        }
    }

    Err(FrontMatterError::Unterminated)
}

/// `[a, b]` flow sequences, as hand-edited files sometimes use them.
fn parse_inline_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    Some(
        inner
            .split(',')
            .map(|s| unquote(s.trim()).to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
