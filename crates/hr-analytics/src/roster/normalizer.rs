/// Strips byte-order marks and zero-width spaces, then collapses runs of
/// whitespace. Case is preserved; classification lower-cases on its own.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accepts both `34.5` and the French `34,5`.
pub(crate) fn parse_decimal(value: &str) -> Option<f64> {
    let normalized = normalize_text(value).replace(',', ".");
    normalized.parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_removes_invisible_characters() {
        assert_eq!(
            normalize_text("\u{feff}Chauffeur \u{200b} Poids   Lourd "),
            "Chauffeur Poids Lourd"
        );
    }

    #[test]
    fn parse_decimal_accepts_comma_separator() {
        assert_eq!(parse_decimal("34,5"), Some(34.5));
        assert_eq!(parse_decimal(" 12 "), Some(12.0));
        assert_eq!(parse_decimal("douze"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
