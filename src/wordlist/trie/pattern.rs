use nom::branch::alt;
use nom::character::complete::{char as symbol, satisfy};
use nom::combinator::{all_consuming, map, value};
use nom::multi::many0;
use nom::{Finish, IResult};

use crate::alphabet::{is_letter, MULTI_WILDCARD, NULLABLE_WILDCARD, SINGLE_WILDCARD};
use crate::error::TrieError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Element {
    Letter(char),
    /// exactly one letter
    Single,
    /// zero or more letters
    Multi,
    /// zero or one letter
    Nullable,
}

impl Element {
    pub fn is_nullable(&self) -> bool {
        matches!(self, Element::Nullable)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Pattern {
    pub(crate) elements: Vec<Element>,
}

fn letter(input: &str) -> IResult<&str, Element> {
    map(satisfy(is_letter), Element::Letter)(input)
}

fn element(input: &str) -> IResult<&str, Element> {
    alt((
        letter,
        value(Element::Single, symbol(SINGLE_WILDCARD)),
        value(Element::Multi, symbol(MULTI_WILDCARD)),
        value(Element::Nullable, symbol(NULLABLE_WILDCARD)),
    ))(input)
}

pub fn pattern(input: &str) -> IResult<&str, Pattern> {
    map(many0(element), |elements| Pattern { elements })(input)
}

impl Pattern {
    /// Parses a search pattern, case-insensitively.
    pub fn parse(input: &str) -> Result<Pattern, TrieError> {
        let upper = input.to_ascii_uppercase();
        let parsed = all_consuming(pattern)(upper.as_str())
            .finish()
            .map(|(_, parsed)| parsed)
            .map_err(|e| {
                let position = upper[..upper.len() - e.input.len()].chars().count();
                let character = e.input.chars().next().unwrap_or_default();
                TrieError::InvalidCharacter { character, position }
            });
        parsed
    }

    /// Like [`Pattern::parse`], but rejects the multi-wildcard.
    pub fn parse_positional(input: &str) -> Result<Pattern, TrieError> {
        let parsed = Pattern::parse(input)?;
        match parsed.elements.iter().position(|x| *x == Element::Multi) {
            Some(position) => Err(TrieError::InvalidCharacter { character: MULTI_WILDCARD, position }),
            None => Ok(parsed),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of the first element that is not a nullable wildcard, or the length if there is none.
    pub fn first_fixed(&self) -> usize {
        self.elements.iter()
            .position(|x| !x.is_nullable())
            .unwrap_or(self.elements.len())
    }
}
