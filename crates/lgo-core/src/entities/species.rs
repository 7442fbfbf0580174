use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{
    EutrophicationTolerance, Language, PhTolerance, Poleotolerance, Rarity, Thallus,
};

/// Ecological traits attached to a species from the reference table.
///
/// Every trait is optional: a species missing from the reference table
/// keeps all of them empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EcologicalTraits {
    #[serde(rename = "pH")]
    pub ph: Option<PhTolerance>,
    pub eutrophication: Option<EutrophicationTolerance>,
    pub poleotolerance: Option<Poleotolerance>,
    pub thallus: Option<Thallus>,
    pub rarity: Option<Rarity>,
}

impl EcologicalTraits {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ph.is_none()
            && self.eutrophication.is_none()
            && self.poleotolerance.is_none()
            && self.thallus.is_none()
            && self.rarity.is_none()
    }
}

/// Reference data for a lichen taxon.
///
/// `unique` is false for generic labels such as "Autre lichen crustacé",
/// which may be sighted several times at the same observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LichenSpecies {
    pub id: i64,
    pub name: String,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub unique: bool,
    #[serde(flatten)]
    pub traits: EcologicalTraits,
}

impl LichenSpecies {
    /// Localized display name, falling back to the canonical name.
    #[must_use]
    pub fn display_name(&self, lang: Language) -> &str {
        let localized = match lang {
            Language::Fr => self.name_fr.as_deref(),
            Language::En => self.name_en.as_deref(),
        };
        localized
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}
