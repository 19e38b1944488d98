//! Maps cards to named, typed fields.

use std::{collections::HashMap, fmt};

use cardq_card::{Card, Legality};

use crate::fields::{ANY_FIELD, FieldMetadata, LIKE_FIELD, UserField};

/// A field reference as typed in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    /// A concrete card field.
    Field(UserField),
    /// `like`: the English name.
    Like,
    /// `*`: every field.
    Any,
}

/// A numeric field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    /// Floating point value.
    Float(f64),
    /// Whole number value.
    Int(i64),
}

/// Read-only view of cards as indexable fields.
///
/// Field names resolve through a table built once, so lookups are constant
/// time and case-insensitive.
#[derive(Debug, Clone)]
pub struct CardDocumentAdapter {
    /// Lowercase field name to field.
    by_name: HashMap<&'static str, UserField>,
}

impl Default for CardDocumentAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CardDocumentAdapter {
    /// Builds the name lookup table.
    pub fn new() -> Self {
        let by_name = UserField::ALL.iter().map(|f| (f.name(), *f)).collect();
        Self { by_name }
    }

    /// Resolves a user-typed field name.
    pub fn resolve(&self, name: &str) -> Option<FieldRef> {
        let lower = name.to_lowercase();
        match lower.as_str() {
            LIKE_FIELD => Some(FieldRef::Like),
            ANY_FIELD => Some(FieldRef::Any),
            other => self.by_name.get(other).copied().map(FieldRef::Field),
        }
    }

    /// Metadata for a field name. `like` reports the name field's metadata.
    pub fn metadata(&self, name: &str) -> Option<FieldMetadata> {
        match self.resolve(name)? {
            FieldRef::Field(field) => Some(field.metadata()),
            FieldRef::Like => Some(UserField::Name.metadata()),
            FieldRef::Any => None,
        }
    }

    /// Every user-visible field name including `like`, sorted.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.push(LIKE_FIELD);
        names.sort_unstable();
        names
    }

    /// The field's values on `card` in `language`, without empty strings.
    ///
    /// Localized fields with no translation yield nothing.
    pub fn values(&self, card: &Card, field: UserField, language: &str) -> Vec<String> {
        let values: Vec<String> = match field {
            UserField::Name => card.name_in(language).map(str::to_string).into_iter().collect(),
            UserField::Type => card.type_in(language).map(str::to_string).into_iter().collect(),
            UserField::Text => card.text_in(language).map(str::to_string).into_iter().collect(),
            UserField::Flavor => card.flavor_in(language).map(str::to_string).into_iter().collect(),
            UserField::Artist => card.artist.iter().cloned().collect(),
            UserField::ManaCost => card.mana_cost.iter().cloned().collect(),
            UserField::SetName => vec![card.set_name.clone()],
            UserField::Number => card.number.iter().cloned().collect(),
            UserField::Rarity => vec![card.rarity.clone()],
            UserField::SetCode => vec![card.set_code.clone()],
            UserField::Layout => vec![card.layout.clone()],
            UserField::Color => card.color_names().into_iter().map(str::to_string).collect(),
            UserField::Supertypes => card.supertypes.clone(),
            UserField::Types => card.types.clone(),
            UserField::Subtypes => card.subtypes.clone(),
            UserField::LegalIn => formats(card, Legality::Legal),
            UserField::RestrictedIn => formats(card, Legality::Restricted),
            UserField::BannedIn => formats(card, Legality::Banned),
            UserField::Cmc | UserField::Power | UserField::Toughness | UserField::Loyalty => self
                .numeric_value(card, field)
                .map(|value| value.to_string())
                .into_iter()
                .collect(),
        };
        values.into_iter().filter(|v| !v.trim().is_empty()).collect()
    }

    /// Numeric value of a numeric field, when the card has one.
    pub fn numeric_value(&self, card: &Card, field: UserField) -> Option<NumericValue> {
        match field {
            UserField::Cmc => Some(NumericValue::Float(f64::from(card.cmc))),
            UserField::Power => card.power_value().map(|v| NumericValue::Float(f64::from(v))),
            UserField::Toughness => card
                .toughness_value()
                .map(|v| NumericValue::Float(f64::from(v))),
            UserField::Loyalty => card.loyalty_value().map(NumericValue::Int),
            _ => None,
        }
    }
}

/// Format names with the given status.
fn formats(card: &Card, legality: Legality) -> Vec<String> {
    card.formats_with(legality).map(str::to_string).collect()
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod test {
    use cardq_card::fixtures;

    use super::*;

    fn card(name: &str) -> Card {
        fixtures::sample_repository()
            .cards()
            .find(|c| c.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn resolves_special_names() {
        let adapter = CardDocumentAdapter::new();
        assert_eq!(adapter.resolve("like"), Some(FieldRef::Like));
        assert_eq!(adapter.resolve("*"), Some(FieldRef::Any));
        assert_eq!(
            adapter.resolve("RARITY"),
            Some(FieldRef::Field(UserField::Rarity))
        );
        assert_eq!(adapter.resolve("bogus"), None);
    }

    #[test]
    fn metadata_by_name() {
        let adapter = CardDocumentAdapter::new();
        assert!(adapter.metadata("power").unwrap().is_numeric);
        assert!(adapter.metadata("like").unwrap().per_language_storage);
        assert!(adapter.metadata("*").is_none());
    }

    #[test]
    fn field_names_are_sorted_and_include_like() {
        let names = CardDocumentAdapter::new().field_names();
        assert!(names.contains(&"like"));
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(names.len(), UserField::ALL.len() + 1);
    }

    #[test]
    fn card_values() {
        let adapter = CardDocumentAdapter::new();
        let bolt = card("Lightning Bolt");
        assert_eq!(
            adapter.values(&bolt, UserField::Name, "ru"),
            vec!["Молния".to_string()]
        );
        assert!(adapter.values(&bolt, UserField::Name, "de").is_empty());
        assert_eq!(adapter.values(&bolt, UserField::SetCode, "en"), vec!["LEA"]);

        let bears = card("Grizzly Bears");
        assert_eq!(adapter.values(&bears, UserField::Power, "en"), vec!["2"]);
        assert_eq!(
            adapter.numeric_value(&bears, UserField::Power),
            Some(NumericValue::Float(2.0))
        );
    }

    #[test]
    fn legality_values() {
        let adapter = CardDocumentAdapter::new();
        let lotus = card("Black Lotus");
        assert_eq!(
            adapter.values(&lotus, UserField::RestrictedIn, "en"),
            vec!["vintage"]
        );
        assert_eq!(adapter.values(&lotus, UserField::BannedIn, "en"), vec!["legacy"]);
    }
}
