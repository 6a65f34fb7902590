use std::collections::HashSet;

/// Clean question or option text before it is inserted as markup.
///
/// Trivia text may carry inline formatting; anything outside the allow-list is
/// stripped along with event handlers.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ["em", "strong", "b", "i", "u", "code", "sub", "sup", "span", "br"]
        .into_iter()
        .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}
