//! Link normalisation for embed text
//!
//! Every `www.` occurrence followed by non-whitespace is checked on its own,
//! so a bare link later in the same whitespace-free run as a schemed URL is
//! still fixed. A `www.` directly following another `www.` belongs to the
//! same host name and is left alone, which keeps the rewrite idempotent.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WWW_START: Regex = Regex::new(r"www\.\S").expect("valid link regex");
}

const SCHEME: &str = "https://";

/// Prepend `https://` to every `www.` link that has no `http://`/`https://` scheme.
pub fn fix_links(text: &str) -> String {
    let mut fixed = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = WWW_START.find_at(text, pos) {
        let start = found.start();
        let before = &text[..start];

        let schemed = before.ends_with("http://") || before.ends_with("https://");
        if !schemed && !before.ends_with("www.") {
            fixed.push_str(&text[copied..start]);
            fixed.push_str(SCHEME);
            copied = start;
        }

        // `www.` cannot overlap itself, the next candidate starts after it.
        pos = start + "www.".len();
    }

    fixed.push_str(&text[copied..]);
    fixed
}
