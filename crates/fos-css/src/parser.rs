//! Selector Parser
//!
//! Parses selector text into a [`SelectorList`]. Identifiers follow the CSS
//! grammar, so non-ASCII characters and backslash escapes are accepted.

use crate::CssError;
use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SelectorComponent, SelectorList,
};

/// Recursive-descent selector parser
pub struct SelectorParser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    /// Parse the whole input as a selector list
    pub fn parse(mut self) -> Result<SelectorList, CssError> {
        if self.input.trim().is_empty() {
            return Err(CssError::EmptySelector);
        }
        let list = self.parse_list()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(list),
            Some(ch) => Err(self.unexpected(ch)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map(|&(o, _)| o).unwrap_or(self.input.len())
    }

    fn unexpected(&self, ch: char) -> CssError {
        CssError::UnexpectedChar { offset: self.offset(), ch }
    }

    fn expect(&mut self, want: char) -> Result<(), CssError> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => {
                self.pos -= 1;
                Err(self.unexpected(c))
            }
            None => Err(CssError::UnexpectedEnd),
        }
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> Result<SelectorList, CssError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, CssError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(',') | Some(')') | None => break,
                Some(_) if had_space => Combinator::Descendant,
                Some(ch) => return Err(self.unexpected(ch)),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, CssError> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                components.push(SelectorComponent::Universal);
            }
            Some(c) if is_ident_start(c) || c == '\\' => {
                let tag = self.parse_ident()?;
                components.push(SelectorComponent::Type(tag.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.parse_name()?;
                    components.push(SelectorComponent::Id(id));
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.parse_ident()?;
                    components.push(SelectorComponent::Class(class));
                }
                Some('[') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    components.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return match self.peek() {
                Some(ch) => Err(self.unexpected(ch)),
                None => Err(CssError::UnexpectedEnd),
            };
        }
        Ok(CompoundSelector { components })
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, CssError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector { name, matcher: None, case_insensitive: false });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.pos += 1;
                self.expect('=')?;
                c
            }
            Some(ch) => return Err(self.unexpected(ch)),
            None => return Err(CssError::UnexpectedEnd),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(q)?
            }
            Some(_) => self.parse_ident()?,
            None => return Err(CssError::UnexpectedEnd),
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        match self.peek() {
            Some('i' | 'I') => {
                self.pos += 1;
                case_insensitive = true;
                self.skip_whitespace();
            }
            Some('s' | 'S') => {
                self.pos += 1;
                self.skip_whitespace();
            }
            _ => {}
        }
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, CssError> {
        if self.peek() == Some(':') {
            return Err(CssError::Unsupported("pseudo-elements".to_string()));
        }
        let name = self.parse_ident()?;

        if self.peek() != Some('(') {
            return PseudoClass::from_name(&name)
                .ok_or_else(|| CssError::Unsupported(format!(":{}", name)));
        }
        self.pos += 1;

        let lowered = name.to_ascii_lowercase();
        let list = match lowered.as_str() {
            "not" | "is" | "where" | "matches" => self.parse_list()?,
            _ => return Err(CssError::Unsupported(format!(":{}()", name))),
        };
        self.skip_whitespace();
        self.expect(')')?;

        Ok(match lowered.as_str() {
            "not" => PseudoClass::Not(list),
            "where" => PseudoClass::Where(list),
            _ => PseudoClass::Is(list),
        })
    }

    /// CSS identifier (may not start with a digit)
    fn parse_ident(&mut self) -> Result<String, CssError> {
        let start_ok = match (self.peek(), self.peek_at(1)) {
            (Some('-'), Some(c)) => is_ident_start(c) || c == '-' || c == '\\',
            (Some(c), _) => is_ident_start(c) || c == '\\',
            (None, _) => false,
        };
        if !start_ok {
            return match self.peek() {
                Some(ch) => Err(self.unexpected(ch)),
                None => Err(CssError::UnexpectedEnd),
            };
        }
        self.parse_name()
    }

    /// Sequence of name characters (used for `#id`, which may start with a digit)
    fn parse_name(&mut self) -> Result<String, CssError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                out.push(self.parse_escape()?);
            } else if is_name_char(c) {
                self.pos += 1;
                out.push(c);
            } else {
                break;
            }
        }
        if out.is_empty() {
            return match self.peek() {
                Some(ch) => Err(self.unexpected(ch)),
                None => Err(CssError::UnexpectedEnd),
            };
        }
        Ok(out)
    }

    /// Escape sequence after a backslash: up to six hex digits or one literal char
    fn parse_escape(&mut self) -> Result<char, CssError> {
        let mut hex = String::new();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            hex.push(self.bump().unwrap_or('0'));
        }
        if hex.is_empty() {
            return self.bump().ok_or(CssError::UnexpectedEnd);
        }
        // A single whitespace terminates a hex escape
        if self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
        Ok(char::from_u32(code).filter(|&c| c != '\0').unwrap_or('\u{FFFD}'))
    }

    fn parse_string(&mut self, quote: char) -> Result<String, CssError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some('\n') => return Err(CssError::UnexpectedChar { offset: self.offset(), ch: '\n' }),
                Some(c) => out.push(c),
                None => return Err(CssError::UnexpectedEnd),
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}
