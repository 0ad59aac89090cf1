use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form: NFC, invisible marks dropped, `_` read as a space, whitespace
/// collapsed, lowercase. Files copied off macOS arrive decomposed (NFD); NFC makes
/// `"й"` and `"и\u{306}"` compare equal.
pub(crate) fn normalize_text(value: &str) -> String {
    let composed: String = value
        .nfc()
        .filter(|c| !matches!(c, '\u{feff}' | '\u{200b}'))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    let collapsed = composed.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_and_decomposed_forms_agree() {
        let composed = "Андрей Жуков Йошкар";
        let decomposed: String = composed.nfd().collect();
        assert_ne!(composed, decomposed);
        assert_eq!(normalize_text(composed), normalize_text(&decomposed));
    }

    #[test]
    fn underscores_and_spacing_fold_to_single_spaces() {
        assert_eq!(
            normalize_text("\u{feff}Иван__Петров  CV.pdf"),
            "иван петров cv.pdf"
        );
    }
}
