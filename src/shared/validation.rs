use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slug fields
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "placas-de-video", "ssd123", "placa-mae"
    /// - Invalid: "-slug", "slug-", "slug--name", "Slug", "slug_name"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("placas-de-video"));
        assert!(SLUG_REGEX.is_match("ssd123"));
        assert!(SLUG_REGEX.is_match("placa-mae"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-slug")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("slug-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("slug--name")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Slug")); // uppercase
        assert!(!SLUG_REGEX.is_match("slug_name")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("placas de video")); // space
    }

    #[test]
    fn test_derived_slugs_always_match() {
        use crate::shared::slug::slugify;

        for name in ["Placas de Vídeo", "Memória RAM", "HD/SSD", "Coolers"] {
            let slug = slugify(name);
            assert!(SLUG_REGEX.is_match(&slug), "bad slug for {name:?}: {slug:?}");
        }
    }
}
