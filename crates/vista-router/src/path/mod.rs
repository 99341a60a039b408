/// Path utilities available to generator expressions
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

pub mod flavor;
pub use flavor::{PathBase, PathType};

static MIME_SUBTYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*?/(.{1,6}?)(\+.*)?$").expect("mime subtype regex is valid")
});

/// Simplifies a path part for use in search-engine friendly URLs
///
/// The result only contains lowercase letters, digits and single dashes:
///
/// - Whitespace, `+`, `-`, `_` and `&` collapse into a single `-`
/// - German umlauts are transliterated (`ä` → `ae`, `ß` → `ss`)
/// - Other non-ASCII letters are decomposed, and only the letters and digits are kept
/// - Everything else is dropped
///
/// Consider this a one-way encoding.
///
/// # Examples
///
/// ```
/// use vista_router::path::simplify;
///
/// assert_eq!(simplify("Hello World"), "hello-world");
/// assert_eq!(simplify("Grüße aus Köln"), "gruesse-aus-koeln");
/// assert_eq!(simplify("Crème brûlée"), "creme-brulee");
/// assert_eq!(simplify("Rock & Roll!"), "rock-roll");
/// ```
pub fn simplify(part: &str) -> String {
    let mut result = String::with_capacity(part.len());
    let mut last_was_dash = false;

    for ch in part.to_lowercase().chars() {
        match ch {
            '0'..='9' | 'a'..='z' => {
                result.push(ch);
                last_was_dash = false;
            }
            '+' | '-' | '_' | '&' => {
                if !last_was_dash {
                    result.push('-');
                }
                last_was_dash = true;
            }
            c if c.is_whitespace() => {
                if !last_was_dash {
                    result.push('-');
                }
                last_was_dash = true;
            }
            c if !c.is_ascii() => {
                match transliterate(c) {
                    Some(replacement) => result.push_str(replacement),
                    None => {
                        let decomposed: String = c
                            .nfkd()
                            .flat_map(char::to_lowercase)
                            .filter(|d| d.is_alphanumeric())
                            .collect();
                        if decomposed.is_empty() {
                            continue;
                        }
                        result.push_str(&decomposed);
                    }
                }
                last_was_dash = false;
            }
            _ => {}
        }
    }

    result
}

/// Fixed transliterations that decomposition alone would get wrong
fn transliterate(ch: char) -> Option<&'static str> {
    match ch {
        'ä' | 'Ä' => Some("ae"),
        'ö' | 'Ö' => Some("oe"),
        'ü' | 'Ü' => Some("ue"),
        'ß' => Some("ss"),
        _ => None,
    }
}

/// Suggests a file name suffix for a content type
///
/// Common image types are looked up in a table. Otherwise the subtype is used if it has
/// one to six characters (ignoring a `+suffix`), `text/*` falls back to `txt` and
/// everything else to `bin`.
///
/// # Examples
///
/// ```
/// use vista_router::path::suffix;
///
/// assert_eq!(suffix("image/jpeg"), "jpg");
/// assert_eq!(suffix("application/pdf"), "pdf");
/// assert_eq!(suffix("text/javascript"), "txt");
/// assert_eq!(suffix("application/octet-stream"), "bin");
/// ```
pub fn suffix(mime: &str) -> String {
    match mime {
        "image/png" => return "png".to_string(),
        "image/jpeg" => return "jpg".to_string(),
        "image/gif" => return "gif".to_string(),
        "image/svg+xml" => return "svg".to_string(),
        "image/tiff" => return "tif".to_string(),
        _ => {}
    }

    if let Some(subtype) = MIME_SUBTYPE.captures(mime).and_then(|c| c.get(1)) {
        return subtype.as_str().to_string();
    }

    if mime.starts_with("text/") {
        return "txt".to_string();
    }

    "bin".to_string()
}

/// Percent-encodes a string as UTF-8
///
/// ```
/// use vista_router::path::encode;
///
/// assert_eq!(encode("a b/c"), "a%20b%2Fc");
/// ```
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Decodes a percent-encoded UTF-8 string
///
/// `+` is read as a space. Invalid UTF-8 sequences are replaced, never rejected.
///
/// ```
/// use vista_router::path::decode;
///
/// assert_eq!(decode("a%20b+c"), "a b c");
/// assert_eq!(decode("plain"), "plain");
/// ```
pub fn decode(value: &str) -> String {
    let spaced: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };

    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Collapses every run of `/` into a single separator
///
/// Adjacent empty placeholder substitutions leave `//` behind in generated paths.
///
/// ```
/// use vista_router::path::collapse_separators;
///
/// assert_eq!(collapse_separators("test//and/a/.html"), "test/and/a/.html");
/// assert_eq!(collapse_separators("a///b"), "a/b");
/// ```
pub fn collapse_separators(path: &str) -> Cow<'_, str> {
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut out = String::with_capacity(path.len());
    let mut last_was_slash = false;
    for ch in path.chars() {
        if ch == '/' && last_was_slash {
            continue;
        }
        last_was_slash = ch == '/';
        out.push(ch);
    }
    Cow::Owned(out)
}
