//! Character classes and `rand:char` format patterns.
//!
//! Pattern syntax: any character is copied verbatim, except `/` which must be
//! followed by one token:
//! - `W` = A-Z
//! - `w` = a-z
//! - `d` = 0-9
//! - `D` = a-z and A-Z
//! - `@` = a-z, A-Z and 0-9

use std::str::FromStr;

pub const ESCAPE: char = '/';

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Alphabet a random character is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Upper,
    Lower,
    Digit,
    Alpha,
    Alnum,
}

impl Charset {
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'W' => Some(Charset::Upper),
            'w' => Some(Charset::Lower),
            'd' => Some(Charset::Digit),
            'D' => Some(Charset::Alpha),
            '@' => Some(Charset::Alnum),
            _ => None,
        }
    }

    pub fn alphabet(&self) -> &'static [u8] {
        match self {
            Charset::Upper => UPPER,
            Charset::Lower => LOWER,
            Charset::Digit => DIGITS,
            Charset::Alpha => ALPHA,
            Charset::Alnum => ALNUM,
        }
    }
}

/// One position of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatPiece {
    Literal(char),
    Random(Charset),
}

/// A validated `rand:char` format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharFormat {
    pieces: Vec<FormatPiece>,
}

impl CharFormat {
    pub fn pieces(&self) -> &[FormatPiece] {
        &self.pieces
    }

    /// Number of distinct strings the pattern can produce (saturating).
    pub fn domain_size(&self) -> u128 {
        self.pieces.iter().fold(1u128, |acc, piece| match piece {
            FormatPiece::Literal(_) => acc,
            FormatPiece::Random(cs) => acc.saturating_mul(cs.alphabet().len() as u128),
        })
    }
}

impl FromStr for CharFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pieces = Vec::with_capacity(s.len());
        let mut chars = s.chars();

        while let Some(c) = chars.next() {
            if c != ESCAPE {
                pieces.push(FormatPiece::Literal(c));
                continue;
            }
            match chars.next() {
                Some(token) => match Charset::from_token(token) {
                    Some(cs) => pieces.push(FormatPiece::Random(cs)),
                    None => {
                        return Err(format!(
                            "invalid format token '{}{}'. Use /W, /w, /d, /D or /@",
                            ESCAPE, token
                        ))
                    }
                },
                None => return Err(format!("format ends with a dangling '{}'", ESCAPE)),
            }
        }

        Ok(CharFormat { pieces })
    }
}
