//! URL slug canonicalization for region, district and municipality names.

use unicode_normalization::UnicodeNormalization;

/// Qualifier word that every region slug ends with.
pub const REGION_QUALIFIER: &str = "kraj";

/// Lowercase, strip diacritics, hyphenate everything that is not `[a-z0-9]`.
///
/// `"Banská Bystrica"` becomes `"banska-bystrica"`.
pub fn to_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.to_lowercase().nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Region slug with exactly one trailing `-kraj`.
///
/// Source data sometimes carries the qualifier twice
/// (`"Banskobystrický kraj kraj"`); all trailing copies are dropped before the
/// canonical suffix is appended.
pub fn region_slug(region_name: &str) -> String {
    let mut words: Vec<&str> = region_name.split_whitespace().collect();
    while words.len() > 1
        && words
            .last()
            .is_some_and(|word| word.eq_ignore_ascii_case(REGION_QUALIFIER))
    {
        words.pop();
    }

    // A bare "kraj" has nothing to strip and becomes "kraj-kraj".
    let mut slug = to_slug(&words.join(" "));
    let suffix = format!("-{}", REGION_QUALIFIER);
    if !slug.ends_with(&suffix) {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(REGION_QUALIFIER);
    }
    slug
}

pub fn district_slug(district_name: &str) -> String {
    to_slug(district_name)
}

/// Combining Diacritical Marks block (U+0300..U+036F).
fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slug_strips_diacritics() {
        assert_eq!(to_slug("Košice"), "kosice");
        assert_eq!(to_slug("Banská Bystrica"), "banska-bystrica");
        assert_eq!(to_slug("Nové Mesto nad Váhom"), "nove-mesto-nad-vahom");
        assert_eq!(to_slug("Žďár nad Sázavou"), "zdar-nad-sazavou");
    }

    #[test]
    fn test_to_slug_collapses_and_trims_separators() {
        assert_eq!(to_slug("  Frýdek -- Místek  "), "frydek-mistek");
        assert_eq!(to_slug("Praha 10"), "praha-10");
        assert_eq!(to_slug("-Ľubietová!"), "lubietova");
        assert_eq!(to_slug(""), "");
        assert_eq!(to_slug("---"), "");
    }

    #[test]
    fn test_to_slug_is_idempotent() {
        let once = to_slug("Ružomberok – Biely Potok");
        assert_eq!(to_slug(&once), once);
    }

    #[test]
    fn test_region_slug_collapses_duplicated_qualifier() {
        assert_eq!(region_slug("Banskobystrický kraj kraj"), "banskobystricky-kraj");
        assert_eq!(region_slug("Trenčiansky kraj"), "trenciansky-kraj");
        assert_eq!(region_slug("Žilinský"), "zilinsky-kraj");
        assert_eq!(region_slug("Košický KRAJ kraj"), "kosicky-kraj");
    }

    #[test]
    fn test_region_slug_leading_qualifier_still_gets_suffix() {
        assert_eq!(region_slug("Kraj Vysočina"), "kraj-vysocina-kraj");
    }

    #[test]
    fn test_region_slug_bare_qualifier() {
        assert_eq!(region_slug("kraj"), "kraj-kraj");
        assert_eq!(region_slug("Kraj kraj"), "kraj-kraj");
    }

    #[test]
    fn test_district_slug() {
        assert_eq!(district_slug("Bratislava I"), "bratislava-i");
    }
}
