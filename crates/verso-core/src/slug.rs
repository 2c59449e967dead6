//! URL slug derivation.

/// Derive a URL-safe slug from a post title.
///
/// Lowercases the title, strips every character that is not alphanumeric,
/// an underscore, or a space, then collapses runs of spaces into single
/// hyphens. Pure and idempotent.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch == ' ' {
            if !slug.is_empty() {
                pending_hyphen = true;
            }
        } else if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_hyphenates() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn collapses_space_runs() {
        assert_eq!(slugify("My   First    Post"), "my-first-post");
    }

    #[test]
    fn keeps_word_characters() {
        assert_eq!(slugify("Rust_2024 edition"), "rust_2024-edition");
    }

    #[test]
    fn idempotent_on_own_output() {
        let once = slugify("A Post: On Slugs?");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn empty_title_yields_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn trailing_spaces_do_not_dangle_hyphens() {
        assert_eq!(slugify("  Hello  "), "hello");
    }
}
