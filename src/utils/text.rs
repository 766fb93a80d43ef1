/// Put a raw value into the canonical single-line form the model was trained on.
///
/// Values that are not text (numbers, booleans, empty cells) become an empty string. Line breaks
/// become spaces, every run of whitespace collapses into a single space, and the ends are trimmed.
pub fn clean_text(value: Option<&str>) -> String {
    let Some(text) = value else {
        return String::new();
    };

    // `\n` and `\r` are whitespace, so splitting also replaces the line breaks
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII information separators (`\x1c` to `\x1f`)
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn joins_lines() {
        assert_eq!(
            clean_text(Some("Nome: João Silva\nCPF: 123.456.789-00")),
            "Nome: João Silva CPF: 123.456.789-00"
        );
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        let cleaned = clean_text(Some("  \r\n Solicito   cópia\t\tdo\r\n\r\ncontrato  \n"));

        assert_eq!(cleaned, "Solicito cópia do contrato");
        assert!(!cleaned.contains('\n') && !cleaned.contains('\r'));
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn information_separators_are_whitespace() {
        assert_eq!(clean_text(Some("a\x1fb\x1cc \x1d\x1e d")), "a b c d");
        assert_eq!(clean_text(Some("\u{85}fim\u{a0}")), "fim");
    }

    #[test]
    fn non_text_is_empty() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some(" \n\r\t ")), "");
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "a\n\nb",
            "  já   normalizado ",
            "linha 1\r\nlinha 2\rlinha 3",
            "",
        ] {
            let once = clean_text(Some(raw));

            assert_eq!(clean_text(Some(once.as_str())), once);
        }
    }
}
