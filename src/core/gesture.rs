//! The fixed gesture vocabulary.
//!
//! Every classifier output maps to exactly one [`GestureLabel`]. The label id
//! is the integer stored in the last column of the reference dataset, so the
//! discriminants here must never be reordered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureCategory {
    Consonant,
    Vowel,
    Control,
}

/// One of the 22 recognizable hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GestureLabel {
    Giyeok = 0,
    Nieun = 1,
    Digeut = 2,
    Rieul = 3,
    Mieum = 4,
    Bieup = 5,
    Siot = 6,
    Ieung = 7,
    Jieut = 8,
    Hieut = 9,
    A = 10,
    Eo = 11,
    Yeo = 12,
    O = 13,
    U = 14,
    Eu = 15,
    I = 16,
    Ae = 17,
    E = 18,
    Space = 19,
    Clear = 20,
    Next = 21,
}

impl GestureLabel {
    /// Number of labels in the vocabulary.
    pub const COUNT: usize = 22;

    /// All labels in id order.
    pub const ALL: [GestureLabel; Self::COUNT] = [
        GestureLabel::Giyeok,
        GestureLabel::Nieun,
        GestureLabel::Digeut,
        GestureLabel::Rieul,
        GestureLabel::Mieum,
        GestureLabel::Bieup,
        GestureLabel::Siot,
        GestureLabel::Ieung,
        GestureLabel::Jieut,
        GestureLabel::Hieut,
        GestureLabel::A,
        GestureLabel::Eo,
        GestureLabel::Yeo,
        GestureLabel::O,
        GestureLabel::U,
        GestureLabel::Eu,
        GestureLabel::I,
        GestureLabel::Ae,
        GestureLabel::E,
        GestureLabel::Space,
        GestureLabel::Clear,
        GestureLabel::Next,
    ];

    /// Look up a label by its dataset id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Dataset id of this label.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn category(self) -> GestureCategory {
        match self.id() {
            0..=9 => GestureCategory::Consonant,
            10..=18 => GestureCategory::Vowel,
            _ => GestureCategory::Control,
        }
    }

    /// The compatibility jamo this gesture types, if it types one.
    pub fn jamo(self) -> Option<char> {
        let c = match self {
            GestureLabel::Giyeok => 'ㄱ',
            GestureLabel::Nieun => 'ㄴ',
            GestureLabel::Digeut => 'ㄷ',
            GestureLabel::Rieul => 'ㄹ',
            GestureLabel::Mieum => 'ㅁ',
            GestureLabel::Bieup => 'ㅂ',
            GestureLabel::Siot => 'ㅅ',
            GestureLabel::Ieung => 'ㅇ',
            GestureLabel::Jieut => 'ㅈ',
            GestureLabel::Hieut => 'ㅎ',
            GestureLabel::A => 'ㅏ',
            GestureLabel::Eo => 'ㅓ',
            GestureLabel::Yeo => 'ㅕ',
            GestureLabel::O => 'ㅗ',
            GestureLabel::U => 'ㅜ',
            GestureLabel::Eu => 'ㅡ',
            GestureLabel::I => 'ㅣ',
            GestureLabel::Ae => 'ㅐ',
            GestureLabel::E => 'ㅔ',
            GestureLabel::Space | GestureLabel::Clear | GestureLabel::Next => return None,
        };
        Some(c)
    }

    /// Fortis form for the five consonants that can be doubled.
    pub fn tensed_jamo(self) -> Option<char> {
        match self {
            GestureLabel::Giyeok => Some('ㄲ'),
            GestureLabel::Digeut => Some('ㄸ'),
            GestureLabel::Bieup => Some('ㅃ'),
            GestureLabel::Siot => Some('ㅆ'),
            GestureLabel::Jieut => Some('ㅉ'),
            _ => None,
        }
    }

    /// Whether a repeated acceptance of this consonant tenses it.
    pub fn is_tensable(self) -> bool {
        self.tensed_jamo().is_some()
    }

    /// Short name used in logs and the debug overlay.
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::Giyeok => "ga",
            GestureLabel::Nieun => "na",
            GestureLabel::Digeut => "da",
            GestureLabel::Rieul => "ra",
            GestureLabel::Mieum => "ma",
            GestureLabel::Bieup => "ba",
            GestureLabel::Siot => "sa",
            GestureLabel::Ieung => "a",
            GestureLabel::Jieut => "ja",
            GestureLabel::Hieut => "ha",
            GestureLabel::A => "aa",
            GestureLabel::Eo => "eo",
            GestureLabel::Yeo => "yeo",
            GestureLabel::O => "o",
            GestureLabel::U => "u",
            GestureLabel::Eu => "eu",
            GestureLabel::I => "i",
            GestureLabel::Ae => "ae",
            GestureLabel::E => "e",
            GestureLabel::Space => "space",
            GestureLabel::Clear => "clear",
            GestureLabel::Next => "next",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.jamo() {
            Some(c) => write!(f, "{c}"),
            None => f.write_str(self.name()),
        }
    }
}

impl TryFrom<u8> for GestureLabel {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for (i, label) in GestureLabel::ALL.iter().enumerate() {
            assert_eq!(label.id() as usize, i);
            assert_eq!(GestureLabel::from_id(i as u8), Some(*label));
        }
        assert_eq!(GestureLabel::from_id(22), None);
        assert_eq!(GestureLabel::try_from(30u8), Err(30));
    }

    #[test]
    fn test_category_counts() {
        let count = |cat| {
            GestureLabel::ALL
                .iter()
                .filter(|l| l.category() == cat)
                .count()
        };
        assert_eq!(count(GestureCategory::Consonant), 10);
        assert_eq!(count(GestureCategory::Vowel), 9);
        assert_eq!(count(GestureCategory::Control), 3);
    }

    #[test]
    fn test_tensable_set() {
        let tensable: Vec<char> = GestureLabel::ALL
            .iter()
            .filter(|l| l.is_tensable())
            .filter_map(|l| l.jamo())
            .collect();
        assert_eq!(tensable, vec!['ㄱ', 'ㄷ', 'ㅂ', 'ㅅ', 'ㅈ']);
        assert_eq!(GestureLabel::Siot.tensed_jamo(), Some('ㅆ'));
        assert_eq!(GestureLabel::Nieun.tensed_jamo(), None);
    }

    #[test]
    fn test_controls_have_no_jamo() {
        assert_eq!(GestureLabel::Space.jamo(), None);
        assert_eq!(GestureLabel::Clear.to_string(), "clear");
        assert_eq!(GestureLabel::A.to_string(), "ㅏ");
    }
}
