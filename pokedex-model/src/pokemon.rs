use serde::{Deserialize, Serialize};

/// List projection of a pokemon. The by-id query fetches the full record,
/// this is only what the card grid needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: String,
    pub number: String,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Full record as returned by the by-id query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id: String,
    pub number: String,
    pub name: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub resistant: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub height: Range,
    pub weight: Range,
    // Fetched but not displayed anywhere yet
    #[serde(default)]
    pub flee_rate: f64,
    // the schema capitalizes the whole acronym, rename_all would give maxCp
    #[serde(default, rename = "maxCP")]
    pub max_cp: i64,
    #[serde(default, rename = "maxHP")]
    pub max_hp: i64,
    pub image: String,
}

/// Unit-formatted display strings, straight from the server.
/// We never parse units out of these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub minimum: String,
    pub maximum: String,
}

impl Range {
    pub fn display(&self) -> String {
        format!("{} – {}", self.minimum, self.maximum)
    }
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[test]
fn test_acronym_wire_keys() {
    // maxCP/maxHP, not the maxCp/maxHp that rename_all alone would expect
    let body = r#"{"id":"1","number":"001","name":"Bulbasaur",
        "height":{"minimum":"0.61m","maximum":"0.79m"},
        "weight":{"minimum":"6.04kg","maximum":"7.76kg"},
        "maxCP":951,"maxHP":1071,"fleeRate":0.1,"image":"u1"}"#;
    let pokemon: Pokemon = serde_json::from_str(body).unwrap();
    assert_eq!(pokemon.max_cp, 951);
    assert_eq!(pokemon.max_hp, 1071);
    assert_eq!(pokemon.flee_rate, 0.1);
}

#[test]
fn test_range_display() {
    let height = Range {
        minimum: "0.61m".to_string(),
        maximum: "0.79m".to_string(),
    };
    assert_eq!(height.display(), "0.61m – 0.79m");
}

#[test]
fn test_join_tags() {
    let types = vec!["Grass".to_string(), "Poison".to_string()];
    assert_eq!(join_tags(&types), "Grass, Poison");
    assert_eq!(join_tags(&[]), "");
    assert_eq!(join_tags(&["Fire".to_string()]), "Fire");
}
