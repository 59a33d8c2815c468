use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use delegate::delegate;
use log::{info, warn};
use typed_builder::TypedBuilder;

use crate::alphabet::normalize;
use crate::error::{TrieError, WordlistError};
use crate::wordlist::trie::letter_budget::LetterBudget;
use crate::wordlist::trie::ranked::WordMatch;
use crate::wordlist::trie::search::SearchResult;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::Trie;

/// A dictionary of playable words, loaded from a text file.
#[derive(Default, Debug)]
pub struct Wordlist {
    trie: Trie,
}

/// How words are laid out in a dictionary file.
#[derive(TypedBuilder, Debug, Clone)]
pub struct FileFormat {
    /// Separates words (or columns) on one line.
    #[builder(default = ',')]
    delimiter: char,
    /// Take only this column of every line, e.g. for `word,frequency` lists.
    #[builder(default, setter(strip_option))]
    word_column: Option<usize>,
}

impl FileFormat {
    fn parse_line<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut columns = line.split(self.delimiter);
        let tokens: Vec<&str> = match self.word_column {
            Some(idx) => columns.nth(idx).into_iter().collect(),
            None => columns.collect(),
        };
        tokens.into_iter().map(str::trim).filter(|x| !x.is_empty()).collect()
    }
}

/// A dictionary token that could not be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub line: usize,
    pub token: String,
    pub error: TrieError,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    pub duplicates: usize,
    /// Lines that were not valid text.
    pub unreadable: usize,
    pub rejected: Vec<Rejected>,
}

impl Wordlist {
    pub fn new() -> Wordlist {
        Default::default()
    }

    pub fn from_trie(trie: Trie) -> Wordlist {
        Wordlist { trie }
    }

    pub fn from_file<P: AsRef<Path>>(path: P, format: &FileFormat) -> Result<(Wordlist, LoadReport), WordlistError> {
        let mut wl = Wordlist::new();
        let report = wl.load_file(path, format)?;
        Ok((wl, report))
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, format: &FileFormat) -> Result<LoadReport, WordlistError> {
        let path = path.as_ref();
        info!("Reading words from {:?}", path);
        let file = File::open(path).map_err(|source| WordlistError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.load_reader(BufReader::new(file), format)
    }

    /// Adds every word in `reader`. Tokens that are not words are skipped and reported;
    /// only a failing reader stops the load.
    pub fn load_reader<R: BufRead>(&mut self, reader: R, format: &FileFormat) -> Result<LoadReport, WordlistError> {
        let start = Instant::now();
        let mut report = LoadReport::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!("Line #{} - {}", idx + 1, e);
                    report.unreadable += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            for token in format.parse_line(&line) {
                let word = normalize(token);
                match self.trie.try_insert(&word) {
                    Ok(()) => report.added += 1,
                    Err(TrieError::DuplicateWord(_)) => report.duplicates += 1,
                    Err(error) => {
                        warn!("Could not add {:?} (line {}): {}", word, idx + 1, error);
                        report.rejected.push(Rejected { line: idx + 1, token: token.to_string(), error });
                    }
                }
            }
        }

        info!("Read {} words in {:.3}s [{} duplicates, {} rejected, {} unreadable lines]",
              report.added, start.elapsed().as_secs_f64(),
              report.duplicates, report.rejected.len(), report.unreadable);
        Ok(report)
    }

    /// Writes every word, one per line.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WordlistError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WordlistError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()?;
        info!("Wrote {} words to {:?}", self.trie.word_count(), path);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for word in self.trie.words() {
            writeln!(out, "{}", word)?;
        }
        Ok(())
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    delegate! {
        to self.trie {
            pub fn insert(&mut self, word: &str) -> bool;
            pub fn contains(&self, word: &str) -> bool;
            pub fn word_count(&self) -> usize;
            pub fn size(&self) -> usize;
            pub fn depth(&self) -> usize;
            pub fn all_words(&self) -> Vec<String>;
            pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>, TrieError>;
            pub fn match_pattern_scored(&self, pattern: &str) -> Result<Vec<WordMatch>, TrieError>;
            pub fn words_from_letters(&self, letters: &str) -> Result<Vec<String>, TrieError>;
            pub fn form_from_letters_scored(&self, budget: &mut LetterBudget) -> Result<Vec<WordMatch>, TrieError>;
            pub fn find_positional_with(&self, pattern: &str, config: &SearchConfig, budget: &mut LetterBudget)
                                        -> Result<Vec<SearchResult>, TrieError>;
        }
    }
}
