//! Message format templates.
//!
//! A template is parsed once into a flat token list so rendering at message
//! time is a straight concatenation. Two placeholders are recognised:
//! `{prefix}` (the status prefix, e.g. `@`) and `{msg}` (the original
//! message text). `{{` and `}}` produce literal braces.

use std::fmt;

use tracing::debug;

use crate::common::error::{TemplateError, TemplateResult};

/// Default format for redirected messages.
pub const DEFAULT_FORMAT: &str = "[{prefix}] {msg}";

/// Probe values a candidate must render before it is accepted.
const PROBE_PREFIX: &str = "test";
const PROBE_MSG: &str = "test";

/// A parsed template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Prefix,
    Msg,
}

/// A validated format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_FORMAT.to_string(),
            tokens: vec![
                Token::Literal("[".to_string()),
                Token::Prefix,
                Token::Literal("] ".to_string()),
                Token::Msg,
            ],
        }
    }
}

impl FormatTemplate {
    /// Parse a template string.
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (inner_pos, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(TemplateError::Malformed {
                                    position: inner_pos,
                                    reason: "unexpected '{' in placeholder".to_string(),
                                })
                            }
                            _ => name.push(inner),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Malformed {
                            position: pos,
                            reason: "unclosed '{'".to_string(),
                        });
                    }

                    let token = match name.as_str() {
                        "prefix" => Token::Prefix,
                        "msg" => Token::Msg,
                        _ => return Err(TemplateError::InvalidTemplate { placeholder: name }),
                    };
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(token);
                }
                '}' => {
                    return Err(TemplateError::Malformed {
                        position: pos,
                        reason: "single '}' (use '}}' for a literal brace)".to_string(),
                    })
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// Parse a candidate and check it renders the probe values.
    pub fn validate(candidate: &str) -> TemplateResult<Self> {
        let template = Self::parse(candidate)?;
        let probe = template.render(PROBE_PREFIX, PROBE_MSG);
        debug!("Template {:?} renders probe as {:?}", candidate, probe);
        Ok(template)
    }

    /// Substitute the placeholders.
    pub fn render(&self, prefix: &str, msg: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + prefix.len() + msg.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Prefix => out.push_str(prefix),
                Token::Msg => out.push_str(msg),
            }
        }
        out
    }

    /// The template as originally written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_parsed_default() {
        let parsed = FormatTemplate::parse(DEFAULT_FORMAT).unwrap();
        assert_eq!(parsed, FormatTemplate::default());
        assert_eq!(parsed.render("@", "hi"), "[@] hi");
    }

    #[test]
    fn test_repeated_and_missing_placeholders() {
        let t = FormatTemplate::parse("{msg} {msg} ({prefix}{prefix})").unwrap();
        assert_eq!(t.render("+", "yo"), "yo yo (++)");

        let only_msg = FormatTemplate::parse("{msg}").unwrap();
        assert_eq!(only_msg.render("@", "hello"), "hello");
    }

    #[test]
    fn test_constant_template_accepted() {
        let t = FormatTemplate::validate("nothing to see").unwrap();
        assert_eq!(t.render("@", "secret"), "nothing to see");
        assert_eq!(t.tokens(), &[Token::Literal("nothing to see".to_string())]);
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        assert_eq!(
            FormatTemplate::validate("{bogus} {msg}"),
            Err(TemplateError::InvalidTemplate {
                placeholder: "bogus".to_string()
            })
        );
        assert_eq!(
            FormatTemplate::validate("{}"),
            Err(TemplateError::InvalidTemplate {
                placeholder: String::new()
            })
        );
    }

    #[test]
    fn test_escaped_braces() {
        let t = FormatTemplate::parse("{{{prefix}}} {msg}").unwrap();
        assert_eq!(t.render("@", "hi"), "{@} hi");
    }

    #[test]
    fn test_malformed_braces() {
        assert!(matches!(
            FormatTemplate::parse("[{prefix] {msg}"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            FormatTemplate::parse("{msg"),
            Err(TemplateError::Malformed { position: 0, .. })
        ));
        assert!(matches!(
            FormatTemplate::parse("oops } {msg}"),
            Err(TemplateError::Malformed { position: 5, .. })
        ));
    }

    #[test]
    fn test_multibyte_literals() {
        let t = FormatTemplate::parse("«{prefix}» {msg} ✓").unwrap();
        assert_eq!(t.render("@", "héllo"), "«@» héllo ✓");
        assert_eq!(t.to_string(), "«{prefix}» {msg} ✓");
    }
}
