//! URL-safe slug derivation for company workspaces.

/// Derive a slug from a display name: lowercase, runs of non-alphanumeric
/// characters collapsed to a single hyphen, no leading or trailing hyphen.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Append a short random suffix, used when the base slug is already taken.
pub fn with_random_suffix(slug: &str) -> String {
    let bytes: [u8; 3] = rand::random();
    format!("{slug}-{}", hex::encode(bytes))
}

pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() || slug.len() > 100 {
        return Err("Slug must be between 1 and 100 characters".to_string());
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Slug must contain only lowercase letters, numbers, and hyphens".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_derivation() {
        assert_eq!(slugify("Acme Corp!"), "acme-corp");
        assert_eq!(slugify("  Hello   World  "), "hello-world");
        assert_eq!(slugify("Ümlauts & Co."), "mlauts-co");
    }

    #[test]
    fn idempotent() {
        for input in ["Acme Corp!", "a--b", "---", "Already-Slugged", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn output_shape() {
        for input in ["Acme Corp!", "!!!", "a!b!c", "UPPER case 99", "-lead-trail-"] {
            let slug = slugify(input);
            assert!(!slug.starts_with('-'), "leading hyphen in {slug:?}");
            assert!(!slug.ends_with('-'), "trailing hyphen in {slug:?}");
            assert!(!slug.contains("--"), "double hyphen in {slug:?}");
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "bad character in {slug:?}"
            );
        }
    }

    #[test]
    fn suffix_preserves_validity() {
        let suffixed = with_random_suffix("acme-corp");
        assert!(suffixed.starts_with("acme-corp-"));
        assert!(validate_slug(&suffixed).is_ok());
    }
}
