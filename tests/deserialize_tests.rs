//! End-to-end tests for deserializing config files into Rust types

use std::fs;

use serde::Deserialize;
use serde_json::json;
use tcod_config::{Color, Deserializer, DeserializerConfig, Dice, Error, Span, from_reader, from_str, from_str_with_config};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename = "item_type")]
struct ItemType {
    name: String,
    damage: u32,
    weight: f32,
    symbol: char,
    color: Color,
    roll: Dice,
    #[serde(default)]
    two_handed: bool,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(rename = "effect", default)]
    effects: Vec<Effect>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename = "effect")]
struct Effect {
    name: String,
    chance: f32,
    turns: u8,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename = "monster")]
struct Monster {
    name: String,
    hp: u8,
    #[serde(default)]
    glyph: Option<char>,
    #[serde(default)]
    undead: Option<bool>,
}

fn load_fixture(name: &str) -> String {
    let path = format!("tests/fixtures/{}.cfg", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {}", path))
}

// ============================================================================
// Mapping
// ============================================================================

#[test]
fn test_items_fixture() {
    let source = load_fixture("items");
    let items: Vec<ItemType> = from_str(&source).unwrap();

    assert_eq!(items.len(), 2);
    let sword = &items[0];
    assert_eq!(sword.name, "sword");
    assert_eq!(sword.damage, 4);
    assert_eq!(sword.weight, 3.5);
    assert_eq!(sword.symbol, '/');
    assert_eq!(sword.color, Color::new(0xC0, 0xC0, 0xC0));
    assert_eq!(sword.roll, "2d6+1".parse::<Dice>().unwrap());
    assert!(sword.two_handed);
    assert_eq!(sword.tags, vec!["blade", "metal"]);
    assert_eq!(
        sword.effects,
        vec![Effect {
            name: "bleed".into(),
            chance: 0.25,
            turns: 3
        }]
    );

    let potion = &items[1];
    assert!(!potion.two_handed);
    assert!(potion.tags.is_empty());
    let effects: Vec<(&str, f32, u8)> = potion.effects.iter().map(|e| (e.name.as_str(), e.chance, e.turns)).collect();
    assert_eq!(effects, vec![("heal", 1.0, 1), ("regen", 0.5, 10)]);
}

#[test]
fn test_from_reader_matches_from_str() {
    let file = fs::File::open("tests/fixtures/items.cfg").unwrap();
    let from_file: Vec<ItemType> = from_reader(file).unwrap();
    let from_text: Vec<ItemType> = from_str(&load_fixture("items")).unwrap();
    assert_eq!(from_file, from_text);
}

#[test]
fn test_anonymous_instance_has_empty_name() {
    let monster: Monster = from_str("monster { hp = 3 }").unwrap();
    assert_eq!(monster.name, "");
    assert_eq!(monster.hp, 3);
}

#[test]
fn test_flags_and_explicit_bools() {
    let monster: Monster = from_str(r#"monster "ghost" { undead hp = 1 }"#).unwrap();
    assert_eq!(monster.undead, Some(true));

    let monster: Monster = from_str(r#"monster "orc" { hp = 1 undead = false }"#).unwrap();
    assert_eq!(monster.undead, Some(false));

    let monster: Monster = from_str(r#"monster "rat" { hp = 1 }"#).unwrap();
    assert_eq!(monster.undead, None);
}

#[test]
fn test_char_from_code() {
    let monster: Monster = from_str(r#"monster "orc" { hp = 1 glyph = 64 }"#).unwrap();
    assert_eq!(monster.glyph, Some('@'));

    let monster: Monster = from_str(r#"monster "orc" { hp = 1 glyph = '\x41' }"#).unwrap();
    assert_eq!(monster.glyph, Some('A'));
}

#[test]
fn test_unknown_members_are_skipped() {
    let source = r#"
monster "orc" {
    hp = 3
    extra = [1, [2, 3], "x"]
    loot "gold" { amount = 5 nested { deep } }
    unknown_flag
    glyph = 'o'
}
"#;
    let monster: Monster = from_str(source).unwrap();
    assert_eq!(
        monster,
        Monster {
            name: "orc".into(),
            hp: 3,
            glyph: Some('o'),
            undead: None,
        }
    );
}

#[test]
fn test_nested_single_struct_and_tuple() {
    #[derive(Debug, Deserialize)]
    #[serde(rename = "room")]
    struct Room {
        name: String,
        pos: (i32, i32),
        door: Door,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename = "door")]
    struct Door {
        #[serde(default)]
        name: String,
        locked: bool,
    }

    let room: Room = from_str(r#"room "hall" { pos = [3, -4] door { locked } }"#).unwrap();
    assert_eq!(room.name, "hall");
    assert_eq!(room.pos, (3, -4));
    assert_eq!(room.door.name, "");
    assert!(room.door.locked);
}

#[test]
fn test_strings_escapes_and_concatenation() {
    #[derive(Debug, Deserialize)]
    #[serde(rename = "text")]
    struct Text {
        name: String,
        body: String,
    }

    let text: Text = from_str("text \"intro\" { body = \"line one\\n\"\n  \"line \\\"two\\\"\" }").unwrap();
    assert_eq!(text.name, "intro");
    assert_eq!(text.body, "line one\nline \"two\"");
}

#[test]
fn test_unit_enum_from_string() {
    #[allow(dead_code)]
    #[derive(Debug, Deserialize, PartialEq)]
    enum Slot {
        Head,
        Hand,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename = "gear")]
    struct Gear {
        name: String,
        slot: Slot,
    }

    let gear: Gear = from_str(r#"gear "helm" { slot = "Head" }"#).unwrap();
    assert_eq!((gear.name.as_str(), &gear.slot), ("helm", &Slot::Head));

    let err = from_str::<Gear>(r#"gear "helm" { slot = "Foot" }"#).unwrap_err();
    assert!(err.to_string().contains("unknown variant `Foot`"), "got: {}", err);
    assert_eq!(err.span(), Some(Span::new(21, 27)));
}

#[test]
fn test_newtype_field() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Hp(u32);

    #[derive(Debug, Deserialize)]
    #[serde(rename = "monster")]
    struct Typed {
        name: String,
        hp: Hp,
    }

    let typed: Typed = from_str("monster { hp = 12 }").unwrap();
    assert_eq!(typed.name, "");
    assert_eq!(typed.hp, Hp(12));
}

#[test]
fn test_untyped_value() {
    let value: serde_json::Value =
        from_str(r#"monster "orc" { hp = 10 speed = 1.5 tags = [1, 2] undead tint = #00FF00 }"#).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "orc",
            "hp": 10,
            "speed": 1.5,
            "tags": [1, 2],
            "undead": true,
            "tint": "#00FF00",
        })
    );
}

#[test]
fn test_empty_document_is_empty_vec() {
    let monsters: Vec<Monster> = from_str("// nothing to see\n").unwrap();
    assert!(monsters.is_empty());
}

#[test]
fn test_name_field_optional_with_config() {
    #[derive(Debug, Deserialize)]
    #[serde(rename = "settings")]
    struct Settings {
        volume: f32,
    }

    let err = from_str::<Settings>("settings { volume = 1 }").unwrap_err();
    assert!(matches!(err, Error::MissingName { ref type_name, .. } if type_name == "settings"));

    let config = DeserializerConfig::new().with_require_name_field(false);
    let settings: Settings = from_str_with_config(r#"settings "main" { volume = 1 }"#, config).unwrap();
    assert_eq!(settings.volume, 1.0);
}

#[test]
fn test_deserializer_can_be_driven_manually() {
    let mut deserializer = Deserializer::new(r#"monster "a" { hp = 1 } monster "b" { hp = 2 }"#).unwrap();
    let first = Monster::deserialize(&mut deserializer).unwrap();
    let second = Monster::deserialize(&mut deserializer).unwrap();
    deserializer.end().unwrap();
    assert_eq!((first.name.as_str(), second.name.as_str()), ("a", "b"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_number_out_of_range() {
    let err = from_str::<Monster>(r#"monster "orc" { hp = 300 }"#).unwrap_err();
    match err {
        Error::NumberOutOfRange { value, target, span } => {
            assert_eq!(value, 300);
            assert_eq!(target, "u8");
            assert_eq!(span, Span::new(21, 24));
        }
        other => panic!("Expected NumberOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_u64_beyond_i64_range() {
    #[derive(Debug, Deserialize)]
    #[serde(rename = "seed")]
    struct Seed {
        name: String,
        value: u64,
    }

    let seed: Seed = from_str("seed { value = 18446744073709551615 }").unwrap();
    assert_eq!((seed.name.as_str(), seed.value), ("", u64::MAX));

    let seed: Seed = from_str("seed { value = 0xFFFFFFFFFFFFFFFF }").unwrap();
    assert_eq!(seed.value, u64::MAX);

    let seed: Seed = from_str("seed { value = 0x8000000000000000 }").unwrap();
    assert_eq!(seed.value, 1 << 63);

    let err = from_str::<Seed>("seed { value = -1 }").unwrap_err();
    assert!(matches!(err, Error::NumberOutOfRange { value: -1, target: "u64", .. }), "got: {:?}", err);

    let err = from_str::<Monster>("monster { hp = 18446744073709551615 }").unwrap_err();
    assert!(matches!(err, Error::NumberOutOfRange { target: "u8", .. }), "got: {:?}", err);

    let value: serde_json::Value = from_str("seed { value = 18446744073709551615 }").unwrap();
    assert_eq!(value, json!({ "name": "", "value": u64::MAX }));
}

#[test]
fn test_invalid_char_code() {
    let err = from_str::<Monster>(r#"monster { hp = 1 glyph = 256 }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidChar { value: 256, .. }), "got: {:?}", err);
}

#[test]
fn test_wrong_struct_type() {
    let err = from_str::<Monster>("item { hp = 1 }").unwrap_err();
    match err {
        Error::UnexpectedStruct { found, expected, span } => {
            assert_eq!(found, "item");
            assert_eq!(expected, "monster");
            assert_eq!(span, Span::new(0, 4));
        }
        other => panic!("Expected UnexpectedStruct, got {:?}", other),
    }
}

#[test]
fn test_wrong_value_kind() {
    let err = from_str::<Monster>(r#"monster { hp = "ten" }"#).unwrap_err();
    match err {
        Error::UnexpectedToken { found, expected, span } => {
            assert_eq!(found, "string \"ten\"");
            assert!(expected.contains("integer"));
            assert_eq!(span, Span::new(15, 20));
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_missing_field_points_at_struct() {
    let err = from_str::<Monster>(r#"monster "orc" { }"#).unwrap_err();
    assert_eq!(err.to_string(), "missing field `hp`");
    assert_eq!(err.span(), Some(Span::new(0, 7)));
}

#[test]
fn test_deny_unknown_fields_points_at_key() {
    #[allow(dead_code)]
    #[derive(Debug, Deserialize)]
    #[serde(rename = "monster", deny_unknown_fields)]
    struct Strict {
        name: String,
        hp: i32,
    }

    let err = from_str::<Strict>("monster { hp = 1 mana = 2 }").unwrap_err();
    assert!(err.to_string().contains("unknown field `mana`"), "got: {}", err);
    assert_eq!(err.span(), Some(Span::new(17, 21)));
}

#[test]
fn test_trailing_structs_of_another_type() {
    let err = from_str::<Vec<Monster>>("monster { hp = 1 } monster { hp = 2 } item { }").unwrap_err();
    match err {
        Error::TrailingTokens { found, .. } => assert_eq!(found, "identifier 'item'"),
        other => panic!("Expected TrailingTokens, got {:?}", other),
    }
}

#[test]
fn test_dynamic_declaration_is_rejected() {
    let err = from_str::<Monster>("monster { int_t hp = 3 }").unwrap_err();
    assert!(err.to_string().contains("dynamic declarations"), "got: {}", err);
    assert_eq!(err.span(), Some(Span::new(10, 15)));
}

#[test]
fn test_lexer_errors_are_collected() {
    let err = from_str::<Monster>("monster { hp = 0x glyph = '' }").unwrap_err();
    match err {
        Error::Syntax(errors) => assert!(!errors.is_empty()),
        other => panic!("Expected Syntax, got {:?}", other),
    }
}

#[test]
fn test_missing_closing_brace() {
    let err = from_str::<Monster>("monster { hp = 1").unwrap_err();
    assert!(err.to_string().contains("end of input"), "got: {}", err);
}
