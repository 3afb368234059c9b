#![forbid(unsafe_code)]

//! Single-pass JSON token scanner.
//!
//! Walks the text once, char by char. A string is a key when the next
//! non-whitespace char is `:`. Bare words are classified as literals or
//! numbers; anything else is skipped. Does not depend on regex or serde.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::json::{JsonClassifier, JsonToken, JsonTokenClass};

/// Classifies JSON text with a hand-written scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanClassifier;

impl ScanClassifier {
    /// Create a classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

impl JsonClassifier for ScanClassifier {
    fn classify(&self, text: &str) -> Vec<JsonToken> {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::trace_span!("classify_json", classifier = "scan", len = text.len()).entered();

        let mut tokens = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some(&(pos, ch)) = chars.peek() {
            match ch {
                '{' | '}' => {
                    chars.next();
                    tokens.push(JsonToken::new(JsonTokenClass::Brace, pos..pos + 1));
                }
                '[' | ']' => {
                    chars.next();
                    tokens.push(JsonToken::new(JsonTokenClass::Bracket, pos..pos + 1));
                }
                ',' => {
                    chars.next();
                    tokens.push(JsonToken::new(JsonTokenClass::Comma, pos..pos + 1));
                }
                ':' => {
                    chars.next();
                    tokens.push(JsonToken::new(JsonTokenClass::Colon, pos..pos + 1));
                }
                '"' => {
                    let end = read_string(&mut chars, text.len());
                    skip_ws(&mut chars);
                    let class = if matches!(chars.peek(), Some(&(_, ':'))) {
                        JsonTokenClass::Key
                    } else {
                        JsonTokenClass::StringValue
                    };
                    tokens.push(JsonToken::new(class, pos..end));
                }
                c if c.is_whitespace() => {
                    chars.next();
                }
                _ => {
                    let end = read_literal(&mut chars, text.len());
                    if let Some(class) = classify_literal(&text[pos..end]) {
                        tokens.push(JsonToken::new(class, pos..end));
                    }
                }
            }
        }

        tokens
    }
}

fn skip_ws(chars: &mut Chars<'_>) {
    while let Some(&(_, ch)) = chars.peek() {
        if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
            chars.next();
        } else {
            break;
        }
    }
}

/// Consume a quoted string and return its end offset (after the closing
/// quote, or end of text when unterminated).
fn read_string(chars: &mut Chars<'_>, text_len: usize) -> usize {
    chars.next(); // opening quote
    let mut escaped = false;
    for (pos, ch) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return pos + 1;
        }
    }
    text_len
}

fn read_literal(chars: &mut Chars<'_>, text_len: usize) -> usize {
    while let Some(&(pos, ch)) = chars.peek() {
        if matches!(ch, ',' | '}' | ']' | '{' | '[' | ':' | '"') || ch.is_whitespace() {
            return pos;
        }
        chars.next();
    }
    text_len
}

fn classify_literal(s: &str) -> Option<JsonTokenClass> {
    match s {
        "true" | "false" => Some(JsonTokenClass::Boolean),
        "null" => Some(JsonTokenClass::Null),
        _ if !s.is_empty()
            && s.bytes().any(|b| b.is_ascii_digit())
            && s.bytes().all(|b| {
                b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E'
            }) =>
        {
            Some(JsonTokenClass::Number)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(text: &str) -> Vec<JsonTokenClass> {
        ScanClassifier::new()
            .classify(text)
            .into_iter()
            .map(|t| t.class)
            .collect()
    }

    #[test]
    fn empty_source() {
        assert!(ScanClassifier::new().classify("").is_empty());
    }

    #[test]
    fn key_detection_skips_whitespace() {
        let text = "{\"a\"  \n : 1}";
        let tokens = ScanClassifier::new().classify(text);
        assert_eq!(tokens[1].class, JsonTokenClass::Key);
        assert_eq!(tokens[1].text(text), "\"a\"");
    }

    #[test]
    fn nested_structures() {
        use JsonTokenClass::*;
        assert_eq!(
            classes(r#"{"a": [1, {"b": null}]}"#),
            vec![
                Brace, Key, Colon, Bracket, Number, Comma, Brace, Key, Colon, Null, Brace,
                Bracket, Brace
            ]
        );
    }

    #[test]
    fn escaped_string() {
        let text = r#"{"msg": "hello \"world\""}"#;
        let tokens = ScanClassifier::new().classify(text);
        let value = tokens
            .iter()
            .find(|t| t.class == JsonTokenClass::StringValue)
            .map(|t| t.text(text));
        assert_eq!(value, Some(r#""hello \"world\"""#));
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let text = r#"{"open": "never closed"#;
        let tokens = ScanClassifier::new().classify(text);
        let last = tokens.last().map(|t| (t.class, t.range.end));
        assert_eq!(last, Some((JsonTokenClass::StringValue, text.len())));
    }

    #[test]
    fn junk_words_are_skipped() {
        assert_eq!(
            classes("[nope, 3]"),
            vec![
                JsonTokenClass::Bracket,
                JsonTokenClass::Comma,
                JsonTokenClass::Number,
                JsonTokenClass::Bracket
            ]
        );
    }

    #[test]
    fn multibyte_text_keeps_boundaries() {
        let text = r#"{"名前": "東京"}"#;
        for token in ScanClassifier::new().classify(text) {
            assert!(text.is_char_boundary(token.range.start));
            assert!(text.is_char_boundary(token.range.end));
        }
    }
}
