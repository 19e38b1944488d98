//! Card, set, and localization records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::power::parse_power;

/// Languages card text may be translated into. English comes first.
pub const LANGUAGES: &[&str] = &["en", "ru", "de", "fr", "it", "es", "pt", "jp", "cn", "tw", "ko"];

/// Play formats a card can be legal, restricted, or banned in.
pub const FORMATS: &[&str] = &[
    "brawl",
    "commander",
    "duel",
    "frontier",
    "future",
    "legacy",
    "modern",
    "oldschool",
    "pauper",
    "penny",
    "pioneer",
    "standard",
    "vintage",
];

/// Legality status of a card in one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Legality {
    /// Playable.
    Legal,
    /// Limited to one copy.
    Restricted,
    /// Not playable.
    Banned,
}

/// Translated card text for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Localization {
    /// Translated name.
    pub name: Option<String>,
    /// Translated type line.
    #[serde(rename = "type")]
    pub type_line: Option<String>,
    /// Translated rules text.
    pub text: Option<String>,
    /// Translated flavor text.
    pub flavor: Option<String>,
}

/// A single printing of a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier of the printing.
    pub id: String,
    /// English name.
    pub name: String,
    /// English type line, e.g. `Legendary Creature - Goblin`.
    #[serde(rename = "type")]
    pub type_line: String,
    /// English rules text.
    pub text: Option<String>,
    /// English flavor text.
    pub flavor: Option<String>,
    /// Mana cost in brace notation, e.g. `{2}{R}`.
    pub mana_cost: Option<String>,
    /// Converted mana cost.
    pub cmc: f32,
    /// Printed power.
    pub power: Option<String>,
    /// Printed toughness.
    pub toughness: Option<String>,
    /// Printed loyalty.
    pub loyalty: Option<String>,
    /// Rarity name.
    pub rarity: String,
    /// Artist credit.
    pub artist: Option<String>,
    /// Collector number.
    pub number: Option<String>,
    /// Card frame layout, e.g. `normal` or `split`.
    pub layout: String,
    /// Color names. Empty for colorless cards.
    pub colors: Vec<String>,
    /// Supertypes, e.g. `Legendary`.
    pub supertypes: Vec<String>,
    /// Card types, e.g. `Creature`.
    pub types: Vec<String>,
    /// Subtypes, e.g. `Goblin`.
    pub subtypes: Vec<String>,
    /// Legality status keyed by format name.
    pub legalities: BTreeMap<String, Legality>,
    /// Translations keyed by language code.
    pub localizations: BTreeMap<String, Localization>,
    /// Code of the owning set, filled in by the repository.
    #[serde(skip)]
    pub set_code: String,
    /// Name of the owning set, filled in by the repository.
    #[serde(skip)]
    pub set_name: String,
}

impl Card {
    /// Translation for `language`, if any.
    fn localization(&self, language: &str) -> Option<&Localization> {
        self.localizations.get(language)
    }

    /// Name in `language`. English is always available.
    pub fn name_in(&self, language: &str) -> Option<&str> {
        if language == "en" {
            return Some(&self.name);
        }
        self.localization(language)?.name.as_deref()
    }

    /// Type line in `language`.
    pub fn type_in(&self, language: &str) -> Option<&str> {
        if language == "en" {
            return Some(&self.type_line);
        }
        self.localization(language)?.type_line.as_deref()
    }

    /// Rules text in `language`.
    pub fn text_in(&self, language: &str) -> Option<&str> {
        if language == "en" {
            return self.text.as_deref();
        }
        self.localization(language)?.text.as_deref()
    }

    /// Flavor text in `language`.
    pub fn flavor_in(&self, language: &str) -> Option<&str> {
        if language == "en" {
            return self.flavor.as_deref();
        }
        self.localization(language)?.flavor.as_deref()
    }

    /// Power as a number, when it has one.
    pub fn power_value(&self) -> Option<f32> {
        self.power.as_deref().and_then(parse_power)
    }

    /// Toughness as a number, when it has one.
    pub fn toughness_value(&self) -> Option<f32> {
        self.toughness.as_deref().and_then(parse_power)
    }

    /// Loyalty as a whole number, when it has one.
    pub fn loyalty_value(&self) -> Option<i64> {
        self.loyalty.as_deref()?.trim().parse().ok()
    }

    /// Color names, with `Colorless` standing in for no colors.
    pub fn color_names(&self) -> Vec<&str> {
        if self.colors.is_empty() {
            vec!["Colorless"]
        } else {
            self.colors.iter().map(String::as_str).collect()
        }
    }

    /// Formats in which the card has the given status.
    pub fn formats_with(&self, legality: Legality) -> impl Iterator<Item = &str> {
        self.legalities
            .iter()
            .filter(move |(_, status)| **status == legality)
            .map(|(format, _)| format.as_str())
    }
}

/// A released set of cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Set {
    /// Short set code, e.g. `LEA`.
    pub code: String,
    /// Full set name.
    pub name: String,
    /// Release date as printed in the dump.
    pub release_date: Option<String>,
    /// Cards printed in the set.
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> Card {
        let mut card = Card {
            name: "Lightning Bolt".into(),
            type_line: "Instant".into(),
            power: Some("1+*".into()),
            loyalty: Some(" 3 ".into()),
            ..Card::default()
        };
        card.localizations.insert(
            "ru".into(),
            Localization {
                name: Some("Молния".into()),
                ..Localization::default()
            },
        );
        card.legalities.insert("modern".into(), Legality::Legal);
        card.legalities.insert("vintage".into(), Legality::Restricted);
        card
    }

    #[test]
    fn localized_accessors_fall_through_to_none() {
        let card = bolt();
        assert_eq!(card.name_in("en"), Some("Lightning Bolt"));
        assert_eq!(card.name_in("ru"), Some("Молния"));
        assert_eq!(card.type_in("ru"), None);
        assert_eq!(card.name_in("de"), None);
    }

    #[test]
    fn numeric_accessors() {
        let card = bolt();
        assert_eq!(card.power_value(), Some(1.0));
        assert_eq!(card.toughness_value(), None);
        assert_eq!(card.loyalty_value(), Some(3));
    }

    #[test]
    fn colorless_stands_in() {
        assert_eq!(bolt().color_names(), vec!["Colorless"]);
    }

    #[test]
    fn formats_by_status() {
        let card = bolt();
        assert_eq!(card.formats_with(Legality::Legal).collect::<Vec<_>>(), vec!["modern"]);
        assert_eq!(
            card.formats_with(Legality::Restricted).collect::<Vec<_>>(),
            vec!["vintage"]
        );
        assert_eq!(card.formats_with(Legality::Banned).count(), 0);
    }

    #[test]
    fn deserializes_camel_case() {
        let card: Card = serde_json::from_str(
            r#"{"name":"Shock","type":"Instant","manaCost":"{R}","cmc":1,"legalities":{"modern":"legal"}}"#,
        )
        .unwrap();
        assert_eq!(card.mana_cost.as_deref(), Some("{R}"));
        assert_eq!(card.cmc, 1.0);
        assert_eq!(card.legalities.get("modern"), Some(&Legality::Legal));
    }
}
