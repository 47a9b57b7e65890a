// See https://learn.microsoft.com/en-us/sql/t-sql/data-types/constants-transact-sql
pub(crate) fn double_quotes(src: &str) -> String {
    let mut out = String::with_capacity(src.len());

    for (idx, part) in src.split('\'').enumerate() {
        if idx > 0 {
            out.push_str("''");
        }

        out.push_str(part);
    }

    out
}

#[test]
fn it_doubles_quotes() {
    assert_eq!(double_quotes("it's 'quoted'"), "it''s ''quoted''");
    assert_eq!(double_quotes("'''"), "''''''");
}

#[test]
fn it_leaves_quote_free_text_unchanged() {
    assert_eq!(double_quotes(""), "");
    assert_eq!(double_quotes("select 1"), "select 1");
}
