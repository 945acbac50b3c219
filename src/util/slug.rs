use std::path::Path;

/// URL-safe form of `text`: ASCII, lowercase, words joined by single dashes.
/// Punctuation inside words is dropped, so "What's new?" becomes "whats-new".
pub fn slugify(text: &str) -> String {
    let ascii = unidecode::unidecode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' || c == '/' {
            pending_dash = true;
        }
    }

    slug
}

/// Slug of a content file from its path inside the collection.
/// `2024/Hello World.md` gives `2024/hello-world` and `hello/index.md` gives `hello`.
pub fn slug_from_path(relative: &Path) -> String {
    let no_ext = relative.with_extension("");
    let mut segments: Vec<String> = no_ext.iter()
        .map(|s| slugify(&s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  What's new in Rust 1.80?  "), "whats-new-in-rust-180");
        assert_eq!(slugify("snake_case -- and dashes"), "snake-case-and-dashes");
        assert_eq!(slugify("Ábaco de São Paulo"), "abaco-de-sao-paulo");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path(Path::new("hello-world.md")), "hello-world");
        assert_eq!(slug_from_path(Path::new("2024/Hello World.md")), "2024/hello-world");
        assert_eq!(slug_from_path(Path::new("my-trip/index.md")), "my-trip");
        assert_eq!(slug_from_path(Path::new("index.md")), "index");
    }
}
