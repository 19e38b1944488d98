//! Card fields as seen by indexing and suggestion.
//!
//! Each [`UserField`] is a name users type before a colon. Its [`ValueKind`]
//! decides how values are indexed and which suggestion strategy applies.

use cardq_card::LANGUAGES;

/// Field name that aliases the English card name.
pub const LIKE_FIELD: &str = "like";

/// Field name that matches any field.
pub const ANY_FIELD: &str = "*";

/// How a field's values are stored and suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text split into terms.
    Text,
    /// Short text kept whole.
    Keyword,
    /// Floating point number.
    Float,
    /// Whole number.
    Int,
    /// One value out of a small, fixed domain.
    Limited,
    /// A set of values out of a small domain.
    Combinatoric,
    /// Format names a card is legal, restricted, or banned in.
    Legality,
}

/// Static capabilities of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Storage and suggestion strategy.
    pub kind: ValueKind,
    /// Values are numbers.
    pub is_numeric: bool,
    /// Values are indexed whole instead of split into terms.
    pub is_not_analyzed: bool,
    /// Values come from a small domain cached from the card data.
    pub has_limited_value_set: bool,
    /// A card holds several independent values.
    pub is_combinatoric: bool,
    /// One physical field exists per language.
    pub per_language_storage: bool,
}

/// A field users can name in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// Card name.
    Name,
    /// Type line.
    Type,
    /// Rules text.
    Text,
    /// Flavor text.
    Flavor,
    /// Artist credit.
    Artist,
    /// Mana cost in brace notation.
    ManaCost,
    /// Full set name.
    SetName,
    /// Collector number.
    Number,
    /// Converted mana cost.
    Cmc,
    /// Numeric power.
    Power,
    /// Numeric toughness.
    Toughness,
    /// Numeric loyalty.
    Loyalty,
    /// Rarity.
    Rarity,
    /// Set code.
    SetCode,
    /// Frame layout.
    Layout,
    /// Colors.
    Color,
    /// Supertypes.
    Supertypes,
    /// Card types.
    Types,
    /// Subtypes.
    Subtypes,
    /// Formats the card is legal in.
    LegalIn,
    /// Formats the card is restricted in.
    RestrictedIn,
    /// Formats the card is banned in.
    BannedIn,
}

impl UserField {
    /// Every field, in suggestion order for "any field" lookups.
    pub const ALL: &'static [Self] = &[
        Self::Name,
        Self::Type,
        Self::Text,
        Self::Flavor,
        Self::Artist,
        Self::ManaCost,
        Self::SetName,
        Self::Number,
        Self::Cmc,
        Self::Power,
        Self::Toughness,
        Self::Loyalty,
        Self::Rarity,
        Self::SetCode,
        Self::Layout,
        Self::Color,
        Self::Supertypes,
        Self::Types,
        Self::Subtypes,
        Self::LegalIn,
        Self::RestrictedIn,
        Self::BannedIn,
    ];

    /// Name typed in queries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Text => "text",
            Self::Flavor => "flavor",
            Self::Artist => "artist",
            Self::ManaCost => "mana",
            Self::SetName => "setname",
            Self::Number => "number",
            Self::Cmc => "cmc",
            Self::Power => "power",
            Self::Toughness => "toughness",
            Self::Loyalty => "loyalty",
            Self::Rarity => "rarity",
            Self::SetCode => "set",
            Self::Layout => "layout",
            Self::Color => "color",
            Self::Supertypes => "supertypes",
            Self::Types => "types",
            Self::Subtypes => "subtypes",
            Self::LegalIn => "legal",
            Self::RestrictedIn => "restricted",
            Self::BannedIn => "banned",
        }
    }

    /// Storage and suggestion strategy.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Type | Self::Text | Self::Flavor | Self::Artist => ValueKind::Text,
            Self::ManaCost | Self::SetName | Self::Number => ValueKind::Keyword,
            Self::Cmc | Self::Power | Self::Toughness => ValueKind::Float,
            Self::Loyalty => ValueKind::Int,
            Self::Rarity | Self::SetCode | Self::Layout => ValueKind::Limited,
            Self::Color | Self::Supertypes | Self::Types | Self::Subtypes => {
                ValueKind::Combinatoric
            }
            Self::LegalIn | Self::RestrictedIn | Self::BannedIn => ValueKind::Legality,
        }
    }

    /// True for fields stored once per language.
    pub fn is_localized(self) -> bool {
        matches!(self, Self::Name | Self::Type | Self::Text | Self::Flavor)
    }

    /// Capabilities derived from the kind.
    pub fn metadata(self) -> FieldMetadata {
        let kind = self.kind();
        FieldMetadata {
            kind,
            is_numeric: matches!(kind, ValueKind::Float | ValueKind::Int),
            is_not_analyzed: matches!(
                kind,
                ValueKind::Keyword
                    | ValueKind::Limited
                    | ValueKind::Combinatoric
                    | ValueKind::Legality
            ),
            has_limited_value_set: kind == ValueKind::Limited,
            is_combinatoric: kind == ValueKind::Combinatoric,
            per_language_storage: self.is_localized(),
        }
    }

    /// True when the spellchecker index holds words for this field.
    pub fn is_spellchecked(self) -> bool {
        matches!(self.kind(), ValueKind::Text | ValueKind::Keyword)
    }

    /// True when the spellchecker stores whole values instead of terms.
    ///
    /// Names are suggested whole even though they are searched by term.
    pub fn spellchecks_whole_value(self) -> bool {
        self == Self::Name || self.kind() == ValueKind::Keyword
    }

    /// Languages with a physical field: all of them when localized, else English.
    pub fn languages(self) -> &'static [&'static str] {
        if self.is_localized() {
            LANGUAGES
        } else {
            &LANGUAGES[..1]
        }
    }

    /// Physical index field for `language`.
    ///
    /// Localized fields map to `<name>_<lang>`, falling back to English for
    /// unknown languages. Other fields ignore the language.
    pub fn physical_name(self, language: &str) -> String {
        if self.is_localized() {
            format!("{}_{}", self.name(), resolve_language(language))
        } else {
            self.name().to_string()
        }
    }
}

/// Maps a language code to a supported one, defaulting to English.
pub fn resolve_language(language: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(language))
        .copied()
        .unwrap_or("en")
}
