use unicode_normalization::UnicodeNormalization;

/// Derive a URL slug from a category name.
///
/// Lowercases, strips diacritics (NFD decomposition, combining marks
/// removed), drops everything outside `[a-z0-9 -]`, trims, and collapses
/// whitespace runs into single hyphens. The derivation is deterministic and
/// idempotent: slugifying a slug returns it unchanged.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let cleaned: String = folded
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();

    cleaned
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// Combining diacritical marks block (U+0300..U+036F), the range NFD moves
// accents into for Latin text.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Placas de Vídeo"), "placas-de-video");
        assert_eq!(slugify("Memória RAM"), "memoria-ram");
        assert_eq!(slugify("Fonte & Gabinete"), "fonte-gabinete");
    }

    #[test]
    fn test_slugify_charset() {
        let slug = slugify("Açúcar³ ∆ Café!! 100%");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_idempotent() {
        let once = slugify("Placa-Mãe  B550");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slugify_trims_and_collapses_whitespace() {
        assert_eq!(slugify("  SSD   NVMe  "), "ssd-nvme");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
