//! Character scanner over one template invocation.
//!
//! The scanner works on byte positions so that multibyte characters (most of
//! the markup this crate reads is Chinese) never split a span. Braces are
//! always treated as `{{`/`}}` pairs: a pair opens or closes one nesting
//! level, and a parameter value only ends at a `|` or closing `}}` seen at
//! depth zero.

use std::ops::Range;

use crate::{
    error::{TokenizeError, TokenizeErrorKind},
    token::token::{Parameter, Token},
};

/// Scan raw markup containing one template invocation into tokens.
///
/// The input is expected to hold a single template with balanced braces,
/// for example `{{剧情选项|选项1=...|剧情1=...}}`. Text before or after the
/// invocation is emitted as [`Token::Text`].
pub fn scan_template(code: &str) -> Result<Vec<Token>, TokenizeError> {
    TemplateScanner::new(code).scan()
}

/// Byte ranges of the top level `{{...}}` spans in a stretch of text.
///
/// The text is scanned like a parameter value, so the same depth rules
/// apply. Used for handler argument values whose nested templates must be
/// expanded in place.
pub(crate) fn scan_nested_spans(code: &str) -> Result<Vec<Range<usize>>, TokenizeError> {
    let mut scanner = TemplateScanner::new(code);
    let (_, spans) = scanner.scan_value()?;

    Ok(spans)
}

pub(crate) struct TemplateScanner<'a> {
    code: &'a str,
    pos: usize,
    inside_template: bool,
}

impl<'a> TemplateScanner<'a> {
    pub fn new(code: &'a str) -> Self {
        TemplateScanner {
            code,
            pos: 0,
            inside_template: false,
        }
    }

    pub fn scan(mut self) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();

        while let Some(character) = self.peek() {
            match character {
                c if c.is_whitespace() => self.advance(),
                '{' => {
                    self.advance();
                    if let Some('{') = self.peek() {
                        self.advance();
                    }
                    self.inside_template = true;
                }
                '}' => {
                    self.advance();
                    if let Some('}') = self.peek() {
                        self.advance();
                    }
                    self.inside_template = false;
                }
                '|' if self.inside_template => {
                    let parameter = self.scan_parameter()?;
                    tokens.push(parameter);
                }
                '|' | '=' => {
                    return Err(TokenizeError::from_kind(
                        TokenizeErrorKind::UnsupportedCharacter { character },
                        self.code,
                    ));
                }
                _ => {
                    let text = self.scan_text();
                    if !text.is_empty() {
                        if self.inside_template {
                            tokens.push(Token::TemplateName(text));
                        } else {
                            tokens.push(Token::Text(text));
                        }
                    }
                }
            }
        }

        Ok(tokens)
    }

    /// Scan plain text up to the next structural character.
    fn scan_text(&mut self) -> String {
        let start = self.pos;

        while let Some(character) = self.peek() {
            match character {
                '{' | '}' | '|' | '=' => break,
                _ => self.advance(),
            }
        }

        self.code[start..self.pos].trim().to_string()
    }

    /// Scan one parameter, starting at its leading `|`.
    fn scan_parameter(&mut self) -> Result<Token, TokenizeError> {
        self.advance();

        let name = match self.find_assignment() {
            Some(assignment) => {
                let name = self.code[self.pos..assignment].trim().to_string();
                self.pos = assignment + 1;
                name
            }
            // No `=` before the parameter ends: a positional parameter.
            None => String::new(),
        };

        let (value, nested_spans) = self.scan_value()?;

        Ok(Token::Parameter(Parameter {
            name,
            value,
            nested_spans,
        }))
    }

    /// Find the byte position of the `=` ending the current parameter name.
    ///
    /// Only a `=` at brace depth zero counts; hitting a depth zero `|` or
    /// the closing `}}` of the enclosing template first means the parameter
    /// has no name.
    fn find_assignment(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut iter = self.code[self.pos..].char_indices().peekable();

        while let Some((index, character)) = iter.next() {
            match character {
                '{' if matches!(iter.peek(), Some((_, '{'))) => {
                    depth += 1;
                    iter.next();
                }
                '}' if matches!(iter.peek(), Some((_, '}'))) => {
                    if depth == 0 {
                        return None;
                    }
                    depth -= 1;
                    iter.next();
                }
                '|' if depth == 0 => return None,
                '=' if depth == 0 => return Some(self.pos + index),
                _ => (),
            }
        }

        None
    }

    /// Scan a parameter value, recording nested template spans.
    ///
    /// Every `{{` (paired with its successor) raises the nesting level and,
    /// at level zero, starts a span. The matching `}}` that returns the
    /// level to zero closes the span. Scanning stops at a `|` seen at level
    /// zero or at the `}}` closing the enclosing template, which is left
    /// unconsumed for the outer loop.
    fn scan_value(&mut self) -> Result<(String, Vec<Range<usize>>), TokenizeError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut span_start: Option<usize> = None;
        let mut spans = Vec::new();

        loop {
            let character = match self.peek() {
                Some(character) => character,
                None => break,
            };

            match character {
                '{' if self.peek_second() == Some('{') => {
                    if depth == 0 {
                        span_start = Some(self.pos - start);
                    }
                    depth += 1;
                    self.advance();
                    self.advance();
                }
                '}' if self.peek_second() == Some('}') => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.advance();
                    self.advance();

                    if depth == 0 {
                        if let Some(span) = span_start.take() {
                            spans.push(span..self.pos - start);
                        }
                    }
                }
                '|' if depth == 0 => break,
                _ => self.advance(),
            }
        }

        if depth > 0 || span_start.is_some() {
            return Err(TokenizeError::from_kind(
                TokenizeErrorKind::UnmatchedBraces,
                &self.code[start..],
            ));
        }

        Ok((self.code[start..self.pos].to_string(), spans))
    }

    fn peek(&self) -> Option<char> {
        self.code[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.code[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(character) = self.peek() {
            self.pos += character.len_utf8();
        }
    }
}
