use crate::error::ValuegenError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Dot,
    Comma,
    Lt,
    Gt,
    LBracket,
    RBracket,
    Question,
    At,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ValuegenError> {
    let mut chars = input.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some((idx, ch)) = chars.peek().copied() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = match ch {
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '<' => TokenKind::Lt,
            // `>>` is lexed as two closing brackets so nested arguments close cleanly.
            '>' => TokenKind::Gt,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            c if is_ident_start(c) => {
                let start = idx;
                let mut end = idx + c.len_utf8();
                while let Some((i, cc)) = chars.peek().copied() {
                    if is_ident_continue(cc) {
                        end = i + cc.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(input[start..end].to_string()),
                    pos: start,
                });
                continue;
            }
            _ => {
                return Err(ValuegenError::TypeSyntaxError(format!(
                    "unexpected character '{}' at {} in '{}'",
                    ch, idx, input
                )))
            }
        };
        chars.next();
        tokens.push(Token { kind, pos: idx });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: input.len(),
    });
    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::{tokenize, TokenKind};

    #[test]
    fn splits_nested_closing_brackets() {
        let tokens = tokenize("Map<K, List<V>>").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("Map".to_string()),
                TokenKind::Lt,
                TokenKind::Ident("K".to_string()),
                TokenKind::Comma,
                TokenKind::Ident("List".to_string()),
                TokenKind::Lt,
                TokenKind::Ident("V".to_string()),
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_stray_characters() {
        let err = tokenize("List<String>;").unwrap_err();
        assert!(err.to_string().contains("unexpected character ';'"));
    }

    #[test]
    fn keeps_multibyte_identifiers_whole() {
        let tokens = tokenize("café.Menü<É>").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("café".to_string()),
                TokenKind::Dot,
                TokenKind::Ident("Menü".to_string()),
                TokenKind::Lt,
                TokenKind::Ident("É".to_string()),
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }
}
