//! Ecological trait enums and display language for LichensGo.
//!
//! Trait values come from a free-text reference table, so every trait enum
//! keeps a catch-all `Other` variant instead of rejecting unknown vocabulary.
//! All of them serialize as their lower-case string form.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! trait_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
            /// Value outside the known vocabulary, kept lower-cased.
            Other(String),
        }

        impl $name {
            /// Return the string representation used in storage and exports.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(value) => value,
                }
            }

            /// Parse a raw trait value. Blank input yields `None`.
            #[must_use]
            pub fn parse(raw: &str) -> Option<Self> {
                let value = raw.trim().to_lowercase();
                if value.is_empty() {
                    return None;
                }
                Some(match value.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(value),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).ok_or_else(|| {
                    D::Error::custom(concat!("empty value for ", stringify!($name)))
                })
            }
        }

        impl JsonSchema for $name {
            fn schema_name() -> Cow<'static, str> {
                stringify!($name).into()
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                json_schema!({
                    "type": "string",
                    "minLength": 1,
                    "examples": [$($text),+]
                })
            }
        }
    };
}

trait_enum! {
    /// Substrate pH preference of a species.
    PhTolerance {
        Acidophilous => "acidophilous",
        Neutrophilous => "neutrophilous",
        Basophilous => "basophilous",
    }
}

trait_enum! {
    /// Tolerance to nitrogen enrichment.
    EutrophicationTolerance {
        Oligotrophic => "oligotrophic",
        Mesotrophic => "mesotrophic",
        Eutrophic => "eutrophic",
    }
}

trait_enum! {
    /// Tolerance to human-disturbed environments (toxitolerance).
    Poleotolerance {
        Resistant => "resistant",
        Intermediate => "intermediate",
        Sensitive => "sensitive",
    }
}

trait_enum! {
    /// Vegetative body form of the lichen.
    Thallus {
        Crustose => "crustose",
        Foliose => "foliose",
        Fruticose => "fruticose",
        Leprose => "leprose",
        Squamulose => "squamulose",
        Gelatinous => "gelatinous",
        Composite => "composite",
    }
}

trait_enum! {
    /// Regional rarity of the species.
    Rarity {
        VeryRare => "very rare",
        Rare => "rare",
        Uncommon => "uncommon",
        Common => "common",
        VeryCommon => "very common",
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Display language for species names and export headers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// Resolve a locale tag such as `fr-FR` or `EN_us` by its first two letters.
    ///
    /// Unknown tags fall back to French.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let prefix: String = tag.chars().take(2).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "en" => Self::En,
            _ => Self::Fr,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(
            Poleotolerance::parse("  Resistant "),
            Some(Poleotolerance::Resistant)
        );
        assert_eq!(PhTolerance::parse("ACIDOPHILOUS"), Some(PhTolerance::Acidophilous));
    }

    #[test]
    fn parse_blank_is_none() {
        assert_eq!(Thallus::parse("   "), None);
        assert_eq!(Rarity::parse(""), None);
    }

    #[test]
    fn unknown_vocabulary_is_kept() {
        let parsed = EutrophicationTolerance::parse("Hypertrophic").unwrap();
        assert_eq!(parsed, EutrophicationTolerance::Other("hypertrophic".into()));
        assert_eq!(parsed.as_str(), "hypertrophic");
    }

    #[test]
    fn multi_word_values_parse() {
        assert_eq!(Rarity::parse("Very Rare"), Some(Rarity::VeryRare));
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = serde_json::to_string(&Thallus::Foliose).unwrap();
        assert_eq!(json, "\"foliose\"");
        let back: Thallus = serde_json::from_str("\"Foliose\"").unwrap();
        assert_eq!(back, Thallus::Foliose);
        assert!(serde_json::from_str::<Thallus>("\"\"").is_err());
    }

    #[test]
    fn language_from_tag() {
        assert_eq!(Language::from_tag("en-US"), Language::En);
        assert_eq!(Language::from_tag("FR"), Language::Fr);
        assert_eq!(Language::from_tag("de"), Language::Fr);
        assert_eq!(Language::from_tag(""), Language::Fr);
    }
}
