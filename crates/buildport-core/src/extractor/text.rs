//! Helpers over `innerText` blocks.

/// Lines of a text block, splitting on `\r\n`, `\r` and `\n`. Empty lines
/// are kept.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|part| part.split(['\r', '\n']))
}

/// Second line, trimmed. `None` when absent or blank.
pub fn second_line(text: &str) -> Option<&str> {
    split_lines(text)
        .nth(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// First non-empty line containing `marker`, ignoring case.
pub fn first_line_containing<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let marker = marker.to_lowercase();
    split_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| line.to_lowercase().contains(&marker))
}

/// Remove the value segment of an item from its primary text.
///
/// Blank values leave the primary text as is.
pub fn strip_value(primary: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => primary.replace(value, "").trim().to_string(),
        _ => primary.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let lines: Vec<&str> = split_lines("a\n\nb").collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_second_line() {
        assert_eq!(second_line("Diablo 4 Build\nWhirlwind Barbarian\n"), Some("Whirlwind Barbarian"));
        assert_eq!(second_line("Only one line"), None);
        assert_eq!(second_line("Title\n   \nMore"), None);
        assert_eq!(second_line("Last Updated\r\n2024-05-01"), Some("2024-05-01"));
    }

    #[test]
    fn test_first_line_containing() {
        let text = "Legendary\nAspect of the Moonrise\nUnique";
        assert_eq!(first_line_containing(text, "Aspect"), Some("Aspect of the Moonrise"));
        assert_eq!(first_line_containing("RAVENOUS ASPECT\nAspect two", "aspect"), Some("RAVENOUS ASPECT"));
        assert_eq!(first_line_containing("Harlequin Crest\nUnique", "Aspect"), None);
    }

    #[test]
    fn test_strip_value() {
        assert_eq!(strip_value("Strength +12", Some("+12")), "Strength");
        assert_eq!(strip_value(" Strength ", Some("  ")), "Strength");
        assert_eq!(strip_value("Strength", None), "Strength");
    }
}
