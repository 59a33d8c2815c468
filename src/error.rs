use std::io;

/// Failures reported by the trie and its searches. None of them is fatal: every one
/// is scoped to the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("empty word")]
    EmptyWord,

    #[error("\"{0}\" is already in the trie")]
    DuplicateWord(String),

    #[error("no '{0}' left in the letter budget")]
    BudgetExhausted(char),
}

impl TrieError {
    /// Builds an `InvalidCharacter` for the first character of `input` rejected by `valid`.
    pub(crate) fn first_invalid<F>(input: &str, valid: F) -> Option<TrieError>
        where F: Fn(char) -> bool {
        input.chars().enumerate()
            .find(|(_, c)| !valid(*c))
            .map(|(position, character)| TrieError::InvalidCharacter { character, position })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WordlistError {
    #[error("could not open \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use crate::error::TrieError;

    #[test]
    fn reports_first_invalid_character() {
        assert_eq!(TrieError::first_invalid("AB1C2", |c| c.is_ascii_uppercase()),
                   Some(TrieError::InvalidCharacter { character: '1', position: 2 }));
        assert_eq!(TrieError::first_invalid("ABC", |c| c.is_ascii_uppercase()), None);
    }

    #[test]
    fn messages_name_the_offender() {
        let e = TrieError::InvalidCharacter { character: '#', position: 3 };
        assert_eq!(e.to_string(), "invalid character '#' at position 3");
        assert_eq!(TrieError::BudgetExhausted('Q').to_string(), "no 'Q' left in the letter budget");
    }
}
