use super::escape;

/// Replaces every `?` with a bind-variable name `@p1..@pN`, left to right,
/// and doubles any single quotes already present in the template so the
/// result can be embedded in an outer `N'..'` literal. Returns the
/// rewritten template and the number of placeholders found.
///
/// The scan is purely textual: a `?` inside a string literal or a comment
/// in the template is still counted as a placeholder. There is no escape
/// for `?`.
pub(crate) fn bind_names(template: &str) -> (String, usize) {
    let mut iter = template.split('?');
    let mut rewritten = String::with_capacity(template.len());
    rewritten.push_str(iter.next().unwrap());

    let mut count = 0;
    for part in iter {
        count += 1;
        rewritten.push_str("@p");
        rewritten.push_str(&count.to_string());
        rewritten.push_str(part);
    }

    (escape::double_quotes(&rewritten), count)
}
