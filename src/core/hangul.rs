//! Hangul syllable composition over compatibility jamo.
//!
//! [`compose`] turns a typed jamo sequence such as `ㄱㅏㄴㅏ` into syllable
//! blocks (`가나`). It never fails: anything that cannot be placed in a block
//! is copied through unchanged. [`decompose`] is the inverse and splits
//! syllables back into atomic jamo.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const VOWEL_COUNT: u32 = 21;
const TAIL_COUNT: u32 = 28;

const LEADS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ',
    'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants; index 0 is "no tail".
const TAILS: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

const COMPOUND_VOWELS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

const COMPOUND_TAILS: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

fn lead_index(c: char) -> Option<u32> {
    LEADS.iter().position(|&l| l == c).map(|i| i as u32)
}

fn vowel_index(c: char) -> Option<u32> {
    VOWELS.iter().position(|&v| v == c).map(|i| i as u32)
}

fn tail_index(c: char) -> Option<u32> {
    TAILS.iter().position(|&t| t == Some(c)).map(|i| i as u32)
}

pub fn is_vowel(c: char) -> bool {
    vowel_index(c).is_some()
}

fn join_vowels(a: char, b: char) -> Option<char> {
    COMPOUND_VOWELS
        .iter()
        .find(|(x, y, _)| *x == a && *y == b)
        .map(|(_, _, c)| *c)
}

fn join_tails(a: char, b: char) -> Option<char> {
    COMPOUND_TAILS
        .iter()
        .find(|(x, y, _)| *x == a && *y == b)
        .map(|(_, _, c)| *c)
}

fn split_vowel(c: char) -> Option<(char, char)> {
    COMPOUND_VOWELS
        .iter()
        .find(|(_, _, v)| *v == c)
        .map(|(a, b, _)| (*a, *b))
}

fn split_tail(c: char) -> Option<(char, char)> {
    COMPOUND_TAILS
        .iter()
        .find(|(_, _, t)| *t == c)
        .map(|(a, b, _)| (*a, *b))
}

/// Build one precomposed syllable, if the parts form a valid block.
pub fn syllable(lead: char, vowel: char, tail: Option<char>) -> Option<char> {
    let l = lead_index(lead)?;
    let v = vowel_index(vowel)?;
    let t = match tail {
        Some(c) => tail_index(c)?,
        None => 0,
    };
    char::from_u32(SYLLABLE_BASE + (l * VOWEL_COUNT + v) * TAIL_COUNT + t)
}

/// Compose a jamo sequence into syllable blocks.
pub fn compose(jamo: &str) -> String {
    let chars: Vec<char> = jamo.chars().collect();
    let mut out = String::with_capacity(jamo.len());
    let at = |i: usize| chars.get(i).copied();
    let vowel_at = |i: usize| at(i).map(is_vowel).unwrap_or(false);

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if lead_index(c).is_none() || !vowel_at(i + 1) {
            out.push(c);
            i += 1;
            continue;
        }

        let lead = c;
        let mut vowel = chars[i + 1];
        i += 2;

        if let Some(joined) = at(i).and_then(|next| join_vowels(vowel, next)) {
            vowel = joined;
            i += 1;
        }

        // a consonant followed by a vowel leads the next block instead
        let mut tail = None;
        if let Some(next) = at(i) {
            if tail_index(next).is_some() && !vowel_at(i + 1) {
                tail = Some(next);
                i += 1;
                if let Some(joined) = at(i).and_then(|second| join_tails(next, second)) {
                    if !vowel_at(i + 1) {
                        tail = Some(joined);
                        i += 1;
                    }
                }
            }
        }

        match syllable(lead, vowel, tail) {
            Some(block) => out.push(block),
            None => {
                out.push(lead);
                out.push(vowel);
                out.extend(tail);
            }
        }
    }

    out
}

/// Split precomposed syllables into atomic jamo. Compound vowels and
/// compound tails are split as well; other characters pass through.
pub fn decompose(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        let code = c as u32;
        if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
            out.push(c);
            continue;
        }
        let offset = code - SYLLABLE_BASE;
        let lead = LEADS[(offset / (VOWEL_COUNT * TAIL_COUNT)) as usize];
        let vowel = VOWELS[((offset / TAIL_COUNT) % VOWEL_COUNT) as usize];
        let tail = TAILS[(offset % TAIL_COUNT) as usize];

        out.push(lead);
        match split_vowel(vowel) {
            Some((a, b)) => {
                out.push(a);
                out.push(b);
            }
            None => out.push(vowel),
        }
        if let Some(t) = tail {
            match split_tail(t) {
                Some((a, b)) => {
                    out.push(a);
                    out.push(b);
                }
                None => out.push(t),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_syllables() {
        assert_eq!(compose("ㄱㅏ"), "가");
        assert_eq!(compose("ㅎㅏㄴㄱㅡㄹ"), "한글");
        assert_eq!(compose("ㄱㅏㄴㅏ"), "가나");
    }

    #[test]
    fn test_tensed_lead_and_tail() {
        assert_eq!(compose("ㄲㅗㅊ"), "꽃");
        assert_eq!(compose("ㅇㅣㅆㄷㅏ"), "있다");
        assert_eq!(compose("ㄸㅏㅇ"), "땅");
    }

    #[test]
    fn test_compound_vowels() {
        assert_eq!(compose("ㄱㅗㅏ"), "과");
        assert_eq!(compose("ㅇㅡㅣ"), "의");
        assert_eq!(compose("ㅎㅗㅣㅅㅏ"), "회사");
    }

    #[test]
    fn test_compound_tails() {
        assert_eq!(compose("ㄷㅏㄹㄱ"), "닭");
        assert_eq!(compose("ㅇㅓㅂㅅㄷㅏ"), "없다");
        // second consonant belongs to the next block
        assert_eq!(compose("ㄷㅏㄹㄱㅏ"), "달가");
    }

    #[test]
    fn test_best_effort_output() {
        assert_eq!(compose("ㄱ"), "ㄱ");
        assert_eq!(compose("ㅏㄱ"), "ㅏㄱ");
        assert_eq!(compose("ㄱㄱㅏ"), "ㄱ가");
        assert_eq!(compose("ㅁㅏㄸ"), "마ㄸ");
        assert_eq!(compose("ㄱㅏ ㄴ"), "가 ㄴ");
        assert_eq!(compose(""), "");
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose("가"), "ㄱㅏ");
        assert_eq!(decompose("닭"), "ㄷㅏㄹㄱ");
        assert_eq!(decompose("과 x"), "ㄱㅗㅏ x");
    }

    #[test]
    fn test_round_trip() {
        for jamo in ["ㄱㅏ", "ㄲㅏ", "ㅎㅏㄴㄱㅡㄹ", "ㄱㅗㅏㅈㅏㅇ", "ㅇㅓㅂㅅㄷㅏ"] {
            assert_eq!(decompose(&compose(jamo)), jamo);
        }
    }

    #[test]
    fn test_syllable_table_bounds() {
        assert_eq!(syllable('ㄱ', 'ㅏ', None), Some('가'));
        assert_eq!(syllable('ㅎ', 'ㅣ', Some('ㅎ')), Some('힣'));
        assert_eq!(syllable('ㄳ', 'ㅏ', None), None);
        assert_eq!(syllable('ㄱ', 'ㅏ', Some('ㄸ')), None);
    }
}
