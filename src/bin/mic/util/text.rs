pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => return String::new(),
        1 => return "…".to_string(),
        _ => {}
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// Splits a one-letter sequence into FASTA lines of at most `width` residues.
pub fn fasta_lines(sequence: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut rest = sequence;
    while rest.len() > width {
        let (line, tail) = rest.split_at(width);
        lines.push(line);
        rest = tail;
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_text() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wrap_long_text() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_unicode() {
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
    }

    #[test]
    fn fasta_lines_split_at_width() {
        assert_eq!(fasta_lines("MKTAYIAK", 3), vec!["MKT", "AYI", "AK"]);
        assert_eq!(fasta_lines("MKT", 3), vec!["MKT"]);
        assert!(fasta_lines("", 60).is_empty());
    }

    #[test]
    fn plural_picks_form() {
        assert_eq!(plural(1, "chain", "chains"), "1 chain");
        assert_eq!(plural(0, "chain", "chains"), "0 chains");
    }
}
