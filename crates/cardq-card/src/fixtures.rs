//! A small card database for tests.

use std::collections::BTreeMap;

use crate::{
    card::{Card, Legality, Localization, Set},
    repository::CardRepository,
};

/// Builds a card with the common fields set.
fn card(id: &str, name: &str, type_line: &str, mana_cost: &str, cmc: f32, rarity: &str) -> Card {
    let (supertypes, rest) = split_supertypes(type_line);
    let (types, subtypes) = match rest.split_once(" - ") {
        Some((types, subtypes)) => (words(types), words(subtypes)),
        None => (words(rest), Vec::new()),
    };
    Card {
        id: id.to_string(),
        name: name.to_string(),
        type_line: type_line.to_string(),
        mana_cost: (!mana_cost.is_empty()).then(|| mana_cost.to_string()),
        cmc,
        rarity: rarity.to_string(),
        layout: "normal".to_string(),
        supertypes,
        types,
        subtypes,
        ..Card::default()
    }
}

/// Splits a leading `Legendary` off a type line.
fn split_supertypes(type_line: &str) -> (Vec<String>, &str) {
    match type_line.strip_prefix("Legendary ") {
        Some(rest) => (vec!["Legendary".to_string()], rest),
        None => (Vec::new(), type_line),
    }
}

/// Splits on whitespace into owned words.
fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Adds a Russian translation.
fn ru(mut card: Card, name: &str, type_line: &str, text: Option<&str>) -> Card {
    card.localizations.insert(
        "ru".to_string(),
        Localization {
            name: Some(name.to_string()),
            type_line: Some(type_line.to_string()),
            text: text.map(str::to_string),
            flavor: None,
        },
    );
    card
}

/// Sets the given legality for several formats.
fn legal(mut card: Card, status: Legality, formats: &[&str]) -> Card {
    let entries: BTreeMap<String, Legality> =
        formats.iter().map(|f| ((*f).to_string(), status)).collect();
    card.legalities.extend(entries);
    card
}

/// Sets printed stats.
fn body(mut card: Card, power: &str, toughness: &str) -> Card {
    card.power = Some(power.to_string());
    card.toughness = Some(toughness.to_string());
    card
}

/// Sets colors, artist, and rules text.
fn details(mut card: Card, colors: &[&str], artist: &str, text: Option<&str>) -> Card {
    card.colors = colors.iter().map(|c| (*c).to_string()).collect();
    card.artist = Some(artist.to_string());
    card.text = text.map(str::to_string);
    card
}

/// Four sets with a handful of cards each.
pub fn sample_sets() -> Vec<Set> {
    let bolt = details(
        card("lea-161", "Lightning Bolt", "Instant", "{R}", 1.0, "common"),
        &["Red"],
        "Christopher Rush",
        Some("Lightning Bolt deals 3 damage to any target."),
    );
    let bolt = ru(
        bolt,
        "Молния",
        "Мгновенное заклинание",
        Some("Молния наносит 3 повреждения любой цели."),
    );
    let bolt = legal(bolt, Legality::Legal, &["legacy", "modern", "vintage"]);

    let fireball = details(
        card("lea-144", "Fireball", "Sorcery", "{X}{R}", 1.0, "common"),
        &["Red"],
        "Mark Tedin",
        Some("Fireball deals X damage divided evenly among any number of targets."),
    );
    let fireball = ru(fireball, "Огненный шар", "Волшебство", None);
    let fireball = legal(fireball, Legality::Legal, &["legacy", "vintage"]);

    let bears = details(
        card("lea-198", "Grizzly Bears", "Creature - Bear", "{1}{G}", 2.0, "common"),
        &["Green"],
        "Jeff A. Menges",
        None,
    );
    let bears = body(ru(bears, "Медведи-гризли", "Существо - Медведь", None), "2", "2");

    let dragon = details(
        card("lea-174", "Shivan Dragon", "Creature - Dragon", "{4}{R}{R}", 6.0, "rare"),
        &["Red"],
        "Melissa Benson",
        Some("Flying. {R}: Shivan Dragon gets +1/+0 until end of turn."),
    );
    let mut dragon = body(ru(dragon, "Шиванский дракон", "Существо - Дракон", None), "5", "5");
    dragon.flavor = Some("While it's true most dragons are cruel, the Shivan dragon seems to take particular glee in the misery of others.".to_string());

    let elemental = details(
        card("lea-145", "Fire Elemental", "Creature - Elemental", "{3}{R}{R}", 5.0, "uncommon"),
        &["Red"],
        "Melissa Benson",
        None,
    );
    let elemental = body(ru(elemental, "Огненный элементаль", "Существо - Элементаль", None), "5", "4");

    let lotus = details(
        card("lea-232", "Black Lotus", "Artifact", "{0}", 0.0, "rare"),
        &[],
        "Christopher Rush",
        Some("Sacrifice Black Lotus: Add three mana of any one color."),
    );
    let lotus = legal(lotus, Legality::Restricted, &["vintage"]);
    let lotus = legal(lotus, Legality::Banned, &["legacy"]);

    let ornithopter = details(
        card("lea-252", "Ornithopter", "Artifact Creature - Thopter", "{0}", 0.0, "uncommon"),
        &[],
        "Amy Weber",
        Some("Flying"),
    );
    let ornithopter = body(ornithopter, "0", "2");

    let dreadnought = details(
        card("mir-306", "Phyrexian Dreadnought", "Artifact Creature - Phyrexian Dreadnought", "{1}", 1.0, "rare"),
        &[],
        "Pete Venters",
        Some("Trample. When Phyrexian Dreadnought enters, sacrifice it unless you sacrifice any number of creatures with total power 12 or greater."),
    );
    let dreadnought = body(dreadnought, "12", "12");

    let lage = details(
        card("csp-t1", "Marit Lage", "Legendary Creature - Avatar", "", 0.0, "special"),
        &["Black"],
        "Brad Rigney",
        Some("Flying, indestructible"),
    );
    let mut lage = body(lage, "20", "20");
    lage.layout = "token".to_string();

    let chandra = details(
        card("m10-132", "Chandra Nalaar", "Legendary Planeswalker - Chandra", "{3}{R}{R}", 5.0, "mythic"),
        &["Red"],
        "Aleksi Briclot",
        None,
    );
    let mut chandra = ru(chandra, "Чандра Налаар", "Легендарный Planeswalker - Чандра", None);
    chandra.loyalty = Some("6".to_string());

    vec![
        Set {
            code: "LEA".to_string(),
            name: "Limited Edition Alpha".to_string(),
            release_date: Some("1993-08-05".to_string()),
            cards: vec![bolt, fireball, bears, dragon, elemental, lotus, ornithopter],
        },
        Set {
            code: "MIR".to_string(),
            name: "Mirage".to_string(),
            release_date: Some("1996-10-08".to_string()),
            cards: vec![dreadnought],
        },
        Set {
            code: "CSP".to_string(),
            name: "Coldsnap".to_string(),
            release_date: Some("2006-07-21".to_string()),
            cards: vec![lage],
        },
        Set {
            code: "M10".to_string(),
            name: "Magic 2010".to_string(),
            release_date: Some("2009-07-17".to_string()),
            cards: vec![chandra],
        },
    ]
}

/// Sample repository with translations marked loaded.
pub fn sample_repository() -> CardRepository {
    let mut repository = unlocalized_repository();
    repository.mark_localizations_loaded();
    repository
}

/// Sample repository whose translations are not yet loaded.
pub fn unlocalized_repository() -> CardRepository {
    match CardRepository::new(sample_sets()) {
        Ok(repository) => repository,
        Err(err) => panic!("fixture sets are invalid: {err}"),
    }
}

/// The sample database as a JSON dump.
pub fn sample_dump_json() -> String {
    let sets = sample_sets();
    let value = serde_json::json!({ "sets": sets, "localized": true });
    value.to_string()
}
