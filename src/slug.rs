/// Derives the URL identifier for a posting from its title, and for job-like
/// postings from the title and the hiring brand ("{title} at {brand}").
///
/// The result is lowercase ASCII letters, digits and single hyphens, with no
/// leading or trailing hyphen. Anything else in the input is dropped. The
/// function is pure; uniqueness is enforced by the collection's unique index,
/// not here.
pub fn slugify(title: &str, brand: Option<&str>) -> String {
    let combined = match brand {
        Some(brand) => format!("{} at {}", title, brand),
        None => title.to_string(),
    };

    let mut slug = String::with_capacity(combined.len());
    let mut pending_hyphen = false;

    for c in combined.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_hyphen = false;
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // every other character is stripped without acting as a separator
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_brand() {
        assert_eq!(
            slugify("Backend Engineer", Some("Acme")),
            "backend-engineer-at-acme"
        );
    }

    #[test]
    fn title_alone() {
        assert_eq!(slugify("Weekly Job Digest", None), "weekly-job-digest");
    }

    #[test]
    fn deterministic_and_url_safe() {
        let a = slugify("Senior Rust Developer", Some("Ferrous Ltd"));
        let b = slugify("Senior Rust Developer", Some("Ferrous Ltd"));
        assert_eq!(a, b);
        assert!(!a.chars().any(|c| c.is_whitespace()));
        assert!(!a.chars().any(|c| c.is_uppercase()));
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(slugify("  --Rust??  Dev--  ", None), "rust-dev");
    }

    #[test]
    fn punctuation_is_stripped_without_separating() {
        assert_eq!(slugify("C++ Developer", None), "c-developer");
    }

    #[test]
    fn non_ascii_is_stripped() {
        assert_eq!(slugify("Café Ñandú", None), "caf-and");
    }

    #[test]
    fn punctuation_only_title_yields_empty_slug() {
        assert_eq!(slugify("!!! ???", None), "");
        assert_eq!(slugify("", None), "");
    }
}
