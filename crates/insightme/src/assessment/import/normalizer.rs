use super::super::response::Answer;

pub(crate) fn clean_identifier(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}'], "")
        .trim()
        .to_string()
}

/// Integers first, then finite floats, otherwise the trimmed text.
pub(crate) fn parse_answer(raw: &str) -> Answer {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Answer::Empty;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Answer::Integer(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Answer::Float(value),
        _ => Answer::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_lose_invisible_characters() {
        assert_eq!(clean_identifier("\u{feff} CV01\u{200b} "), "CV01");
    }

    #[test]
    fn answers_take_the_narrowest_shape() {
        assert_eq!(parse_answer(" 4 "), Answer::Integer(4));
        assert_eq!(parse_answer("2.5"), Answer::Float(2.5));
        assert_eq!(parse_answer("NaN"), Answer::Text("NaN".to_string()));
        assert_eq!(parse_answer("inf"), Answer::Text("inf".to_string()));
        assert_eq!(parse_answer("Có"), Answer::Text("Có".to_string()));
        assert_eq!(parse_answer("  "), Answer::Empty);
    }
}
