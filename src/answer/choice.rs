//! Single-choice answers: the letters A-F plus a "no answer" sentinel.

use crate::error::{EvalError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A multiple-choice answer.
///
/// Variants are declared in label order so that `Ord` matches sorting the
/// rendered labels as strings (`"A" < ... < "F" < "None"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
    F,
    /// No in-range letter was found in the response. Never equal to a real letter.
    NoAnswer,
}

impl Choice {
    /// Label as written into reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
            Choice::E => "E",
            Choice::F => "F",
            Choice::NoAnswer => "None",
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'C' => Some(Choice::C),
            'D' => Some(Choice::D),
            'E' => Some(Choice::E),
            'F' => Some(Choice::F),
            _ => None,
        }
    }

    pub fn is_answer(&self) -> bool {
        !matches!(self, Choice::NoAnswer)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Choice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Strict parse used for gold labels: exactly one letter A-F, surrounding
/// whitespace ignored.
impl FromStr for Choice {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Choice::from_letter(c).ok_or_else(|| {
                EvalError::InvalidInput(format!("gold choice must be one of A-F, got {:?}", s))
            }),
            _ => Err(EvalError::InvalidInput(format!(
                "gold choice must be a single letter A-F, got {:?}",
                s
            ))),
        }
    }
}

/// Extract the first letter A-F from a raw model response.
///
/// Scans left to right and returns the first in-range uppercase letter, so
/// verbose output like `"B) because..."` still yields `B`. Any stray capital
/// in that range counts. Returns [`Choice::NoAnswer`] when none is found.
pub fn parse_choice(raw: &str) -> Choice {
    raw.chars()
        .find_map(Choice::from_letter)
        .unwrap_or(Choice::NoAnswer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_leading_letter() {
        assert_eq!(parse_choice("B) because..."), Choice::B);
    }

    #[test]
    fn parse_choice_no_letter() {
        assert_eq!(parse_choice("no letter here"), Choice::NoAnswer);
        assert_eq!(parse_choice(""), Choice::NoAnswer);
    }

    #[test]
    fn parse_choice_first_in_range_wins() {
        // Capitals inside words count too.
        assert_eq!(parse_choice("The answer is C"), Choice::C);
        assert_eq!(parse_choice("ANSWER: D"), Choice::A);
        assert_eq!(parse_choice("回答：E"), Choice::E);
    }

    #[test]
    fn parse_choice_ignores_lowercase_and_out_of_range() {
        assert_eq!(parse_choice("a b c G H"), Choice::NoAnswer);
        assert_eq!(parse_choice("xyz F"), Choice::F);
    }

    #[test]
    fn parse_choice_fullwidth_letters_do_not_count() {
        assert_eq!(parse_choice("Ａ"), Choice::NoAnswer);
    }

    #[test]
    fn gold_from_str_strict() {
        assert_eq!("A".parse::<Choice>().unwrap(), Choice::A);
        assert_eq!(" F\n".parse::<Choice>().unwrap(), Choice::F);
        assert!("G".parse::<Choice>().is_err());
        assert!("AB".parse::<Choice>().is_err());
        assert!("".parse::<Choice>().is_err());
        assert!("None".parse::<Choice>().is_err());
    }

    #[test]
    fn ordering_matches_string_sort() {
        let mut choices = vec![Choice::NoAnswer, Choice::C, Choice::A, Choice::F];
        choices.sort();
        let labels: Vec<&str> = choices.iter().map(Choice::as_str).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&vec![Choice::B, Choice::NoAnswer]).unwrap();
        assert_eq!(json, r#"["B","None"]"#);
    }
}
