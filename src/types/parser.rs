//! Recursive-descent parser for Java type strings.

use crate::error::ValuegenError;

use super::lexer::{Token, TokenKind};
use super::TypeRef;

/// Parses a token stream into a [`TypeRef`].
///
/// Every name is parsed as [`TypeRef::Declared`]; binding type variables is a
/// separate step because it depends on the declaration scope.
pub fn parse(tokens: &[Token], source: &str) -> Result<TypeRef, ValuegenError> {
    let mut parser = Parser {
        tokens,
        source,
        pos: 0,
    };
    let ty = parser.parse_type()?;
    if !matches!(parser.current().kind, TokenKind::Eof) {
        return Err(parser.error("unexpected token after type"));
    }
    Ok(ty)
}

struct Parser<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Result<TypeRef, ValuegenError> {
        self.skip_annotations()?;

        if self
            .consume_if(|k| matches!(k, TokenKind::Question))
            .is_some()
        {
            return self.parse_wildcard_bound();
        }

        let name = self.parse_qualified_name()?;
        let mut args = Vec::new();
        if self.consume_if(|k| matches!(k, TokenKind::Lt)).is_some() {
            loop {
                args.push(self.parse_type()?);
                if self.consume_if(|k| matches!(k, TokenKind::Comma)).is_some() {
                    continue;
                }
                self.expect(
                    |k| matches!(k, TokenKind::Gt),
                    "expected '>' after type arguments",
                )?;
                break;
            }
        }

        let mut ty = TypeRef::Declared { name, args };
        while self
            .consume_if(|k| matches!(k, TokenKind::LBracket))
            .is_some()
        {
            self.expect(
                |k| matches!(k, TokenKind::RBracket),
                "expected ']' in array type",
            )?;
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_wildcard_bound(&mut self) -> Result<TypeRef, ValuegenError> {
        let keyword = match &self.current().kind {
            TokenKind::Ident(word) if word == "extends" || word == "super" => word.clone(),
            _ => return Ok(TypeRef::Wildcard),
        };
        self.pos += 1;
        let bound = Box::new(self.parse_type()?);
        if keyword == "extends" {
            Ok(TypeRef::WildcardExtends(bound))
        } else {
            Ok(TypeRef::WildcardSuper(bound))
        }
    }

    fn parse_qualified_name(&mut self) -> Result<String, ValuegenError> {
        let mut segments = vec![self.expect_ident("expected type name")?];
        while self.consume_if(|k| matches!(k, TokenKind::Dot)).is_some() {
            segments.push(self.expect_ident("expected identifier after '.'")?);
        }
        Ok(segments.join("."))
    }

    // Type-use annotations (`@Nullable String`) carry no naming information.
    fn skip_annotations(&mut self) -> Result<(), ValuegenError> {
        while self.consume_if(|k| matches!(k, TokenKind::At)).is_some() {
            self.parse_qualified_name()?;
        }
        Ok(())
    }

    fn expect_ident(&mut self, message: &str) -> Result<String, ValuegenError> {
        match &self.current().kind {
            TokenKind::Ident(v) => {
                let ident = v.clone();
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.error(message)),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn consume_if(&mut self, predicate: fn(&TokenKind) -> bool) -> Option<&Token> {
        if predicate(&self.current().kind) {
            let current = &self.tokens[self.pos];
            self.pos += 1;
            Some(current)
        } else {
            None
        }
    }

    fn expect(
        &mut self,
        predicate: fn(&TokenKind) -> bool,
        message: &str,
    ) -> Result<(), ValuegenError> {
        if self.consume_if(predicate).is_some() {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: &str) -> ValuegenError {
        ValuegenError::TypeSyntaxError(format!(
            "{} at {} in '{}'",
            message,
            self.current().pos,
            self.source
        ))
    }
}
