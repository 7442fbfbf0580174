//! Orientations and the canonical square representation.
//!
//! Field sheets record, for each of the 5 quadrants of a sampling grid, the
//! trunk orientations where a lichen was seen. Historical exports encode a
//! square as a letter string (`"NE"`), a separated list (`"N,E"`), a
//! PostgreSQL array literal (`"{N,E}"`) or a JSON array (`["N","E"]`).
//! [`OrientationSet::parse`] folds all of them into one 4-bit presence set.
//! Whole orientation words (`Nord`, `OUEST`, `west`, ...) are also accepted.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Number of quadrants (squares) in a sampling grid.
pub const SQUARES_PER_GRID: usize = 5;

/// Trunk orientation. Letters follow the French field sheet (`O` = Ouest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "O")]
    West,
}

impl Orientation {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'O',
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'O' => Some(Self::West),
            _ => None,
        }
    }

    /// Match a whole French or English orientation word, ignoring case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "nord" | "north" => Some(Self::North),
            "est" | "east" => Some(Self::East),
            "sud" | "south" => Some(Self::South),
            "ouest" | "west" => Some(Self::West),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of orientations where a lichen is present in one square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OrientationSet(u8);

impl OrientationSet {
    pub const EMPTY: Self = Self(0);

    /// Parse one raw square cell.
    ///
    /// The cell is split into alphabetic tokens. A token that is a whole
    /// orientation word counts as that orientation; in any other token the
    /// upper-case letters `N`, `E`, `S`, `O` mark presence and every other
    /// character is ignored. Repeated orientations collapse since a square
    /// records presence.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for boolean encodings (`true`,
    /// `false`, `t`, `f`), which carry no orientation information.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "true" | "false" | "t" | "f"
        ) {
            return Err(CoreError::Validation(format!(
                "square value '{trimmed}' is a boolean flag without orientation"
            )));
        }

        let mut set = Self::EMPTY;
        for token in tokens(trimmed) {
            match Orientation::from_word(token) {
                Some(orientation) => set.insert(orientation),
                None => set.extend(token.chars().filter_map(Orientation::from_letter)),
            }
        }
        Ok(set)
    }

    /// Count characters of `raw` that are neither orientation letters nor
    /// list punctuation, outside whole orientation words. Used for
    /// data-quality reporting.
    #[must_use]
    pub fn stray_characters(raw: &str) -> usize {
        let punctuation = raw
            .chars()
            .filter(|c| {
                !c.is_alphabetic()
                    && !c.is_whitespace()
                    && !matches!(c, ',' | ';' | '{' | '}' | '[' | ']' | '"' | '\'')
            })
            .count();
        let letters: usize = tokens(raw)
            .filter(|token| Orientation::from_word(token).is_none())
            .map(|token| {
                token
                    .chars()
                    .filter(|c| Orientation::from_letter(*c).is_none())
                    .count()
            })
            .sum();
        punctuation + letters
    }

    #[must_use]
    pub const fn contains(self, orientation: Orientation) -> bool {
        self.0 & orientation.bit() != 0
    }

    pub fn insert(&mut self, orientation: Orientation) {
        self.0 |= orientation.bit();
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(move |orientation| self.contains(*orientation))
    }
}

/// Alphabetic runs of a raw cell.
fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
}

impl Extend<Orientation> for OrientationSet {
    fn extend<I: IntoIterator<Item = Orientation>>(&mut self, iter: I) {
        for orientation in iter {
            self.insert(orientation);
        }
    }
}

impl FromIterator<Orientation> for OrientationSet {
    fn from_iter<I: IntoIterator<Item = Orientation>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        set.extend(iter);
        set
    }
}

impl fmt::Display for OrientationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for orientation in self.iter() {
            write!(f, "{orientation}")?;
        }
        Ok(())
    }
}

impl Serialize for OrientationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrientationSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

impl JsonSchema for OrientationSet {
    fn schema_name() -> Cow<'static, str> {
        "OrientationSet".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": "^N?E?S?O?$"
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("NE", "NE")]
    #[case("N,E", "NE")]
    #[case("{S,O}", "SO")]
    #[case(r#"["O","N"]"#, "NO")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("NN", "N")]
    #[case("Nord", "N")]
    #[case("NORD", "N")]
    #[case("OUEST", "O")]
    #[case("Est, Sud", "ES")]
    #[case("{west,NORTH}", "NO")]
    #[case("EST", "E")]
    #[case("n e", "")]
    fn parses_historical_encodings(#[case] raw: &str, #[case] expected: &str) {
        let set = OrientationSet::parse(raw).expect("should parse");
        assert_eq!(set.to_string(), expected);
    }

    #[rstest]
    #[case("true")]
    #[case("False")]
    #[case(" t ")]
    #[case("F")]
    fn rejects_boolean_squares(#[case] raw: &str) {
        assert!(matches!(
            OrientationSet::parse(raw),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn stray_characters_ignore_punctuation() {
        assert_eq!(OrientationSet::stray_characters("{N,E}"), 0);
        assert_eq!(OrientationSet::stray_characters("NX?"), 2);
        assert_eq!(OrientationSet::stray_characters("Nord, OUEST"), 0);
    }

    #[test]
    fn len_and_contains() {
        let set: OrientationSet = [Orientation::North, Orientation::West].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Orientation::West));
        assert!(!set.contains(Orientation::South));
        assert!(!set.is_empty());
        assert!(OrientationSet::EMPTY.is_empty());
    }

    #[test]
    fn serde_roundtrip_as_letters() {
        let set = OrientationSet::parse("SE").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"ES\"");
        let back: OrientationSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
