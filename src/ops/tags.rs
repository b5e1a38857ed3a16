use indexmap::IndexMap;

/// Count tags across entries and return the `n` most used, most frequent
/// first. Equal counts keep first-seen order.
pub fn rank_tags<'a, I>(tag_lists: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for tags in tag_lists {
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable: ties stay in insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Favorites first, then frequent tags not already offered.
pub fn merge_suggestions(favorites: &[String], frequent: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(favorites.len() + frequent.len());
    for tag in favorites.iter().chain(frequent) {
        if !merged.iter().any(|t| t == tag) {
            merged.push(tag.clone());
        }
    }
    merged
}
