
pub const ALPHABET: &[u8] = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".as_bytes();

/// Matches exactly one letter, e.g. `C&T` matches `CAT` and `COT`.
pub const SINGLE_WILDCARD: char = '&';
/// Matches any run of letters, including none.
pub const MULTI_WILDCARD: char = '*';
/// Matches at most one letter, e.g. `%%AT` matches `AT`, `CAT` and `SCAT`.
pub const NULLABLE_WILDCARD: char = '%';

pub fn is_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

pub fn get_idx(a: char) -> usize {
    (a.to_ascii_uppercase() as u8 - b'A') as usize
}

pub fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase()
}

/// Tile value of a letter. Wildcards and anything outside the alphabet are worth nothing.
pub fn letter_score(c: char) -> u32 {
    const POINTS: [u32; 26] = [
        1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, // A..M
        1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10, // N..Z
    ];
    let c = c.to_ascii_uppercase();
    if is_letter(c) { POINTS[get_idx(c)] } else { 0 }
}

pub fn word_score(word: &str) -> u32 {
    word.chars().map(letter_score).sum()
}

#[cfg(test)]
mod tests {
    use crate::alphabet::*;

    #[test]
    fn scores_follow_tile_values() {
        assert_eq!(letter_score('C'), 3);
        assert_eq!(letter_score('a'), 1);
        assert_eq!(letter_score('D'), 2);
        assert_eq!(letter_score('Q'), 10);
        assert_eq!(letter_score('K'), 5);
        assert_eq!(letter_score(SINGLE_WILDCARD), 0);
        assert_eq!(word_score("CARD"), 7);
        assert_eq!(word_score(""), 0);
    }

    #[test]
    fn every_letter_has_a_value() {
        assert!(ALPHABET.iter().all(|&c| letter_score(c as char) > 0));
    }

    #[test]
    fn normalize_upper_cases_and_trims() {
        assert_eq!(normalize("  cat\t"), "CAT");
    }
}
