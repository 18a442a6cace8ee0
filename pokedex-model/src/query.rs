/// GraphQL query client for the pokemon catalog endpoint.

use crate::pokemon::{Pokemon, PokemonSummary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

const USER_AGENT: &str = "pokedex/0.1";

pub const POKEMONS_QUERY: &str = "\
query pokemons($first: Int!) {
  pokemons(first: $first) {
    id
    number
    name
    image
    types
  }
}";

pub const POKEMON_BY_ID_QUERY: &str = "\
query pokemon($id: String, $name: String) {
  pokemon(id: $id, name: $name) {
    id
    number
    name
    weight {
      minimum
      maximum
    }
    height {
      minimum
      maximum
    }
    classification
    types
    resistant
    weaknesses
    fleeRate
    maxCP
    maxHP
    image
  }
}";

/// The two failure kinds the UI can observe. It renders both the same way
/// and never inspects the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Transport(String),
    Server(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::Transport(msg) => write!(f, "transport error: {msg}"),
            QueryError::Server(msg) => write!(f, "server error: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Transport(err.to_string())
    }
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct PokemonsData {
    #[serde(default)]
    pokemons: Vec<PokemonSummary>,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    pokemon: Option<Pokemon>,
}

#[derive(Serialize)]
struct Request<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Serialize)]
struct PokemonsVars {
    first: u32,
}

#[derive(Serialize)]
struct PokemonByIdVars<'a> {
    id: &'a str,
    // The schema also resolves by name; we always leave it unset.
    name: Option<&'a str>,
}

/// Decode a raw GraphQL response body. Any server-reported error wins over
/// whatever partial data came with it.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, QueryError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|err| QueryError::Server(err.to_string()))?;
    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(QueryError::Server(messages.join("; ")));
    }
    envelope
        .data
        .ok_or_else(|| QueryError::Server("response carried no data".to_string()))
}

pub struct Client {
    http: reqwest::blocking::Client,
    url: String,
}

impl Client {
    pub fn new(url: &str) -> Result<Client, QueryError> {
        let http = reqwest::blocking::ClientBuilder::new().user_agent(USER_AGENT).build()?;
        Ok(Client {
            http,
            url: url.to_string(),
        })
    }

    fn execute<T: DeserializeOwned, V: Serialize>(&self, query: &str, variables: V) -> Result<T, QueryError> {
        let body = self
            .http
            .post(&self.url)
            .json(&Request { query, variables })
            .send()?
            .text()?;
        decode(&body)
    }

    /// Fetch the list projection of the first `first` pokemons.
    pub fn pokemons(&self, first: u32) -> Result<Vec<PokemonSummary>, QueryError> {
        let data: PokemonsData = self.execute(POKEMONS_QUERY, PokemonsVars { first })?;
        Ok(data.pokemons)
    }

    /// Fetch one full record. `Ok(None)` when the server resolves the id to null.
    pub fn pokemon_by_id(&self, id: &str) -> Result<Option<Pokemon>, QueryError> {
        let data: PokemonData = self.execute(POKEMON_BY_ID_QUERY, PokemonByIdVars { id, name: None })?;
        Ok(data.pokemon)
    }
}

#[test]
fn test_decode_pokemons() {
    let body = r#"{"data":{"pokemons":[
        {"id":"1","number":"001","name":"Bulbasaur","image":"u1","types":["Grass","Poison"]},
        {"id":"2","number":"002","name":"Ivysaur","image":"u2","types":["Grass","Poison"]}
    ]}}"#;
    let data: PokemonsData = decode(body).unwrap();
    assert_eq!(data.pokemons.len(), 2);
    assert_eq!(data.pokemons[0].name, "Bulbasaur");
    assert_eq!(data.pokemons[1].types, vec!["Grass", "Poison"]);
}

#[test]
fn test_decode_pokemon_by_id() {
    let body = r#"{"data":{"pokemon":{
        "id":"1","number":"001","name":"Bulbasaur",
        "weight":{"minimum":"6.04kg","maximum":"7.76kg"},
        "height":{"minimum":"0.61m","maximum":"0.79m"},
        "classification":"Seed Pokémon",
        "types":["Grass","Poison"],
        "resistant":["Water","Electric","Grass","Fighting","Fairy"],
        "weaknesses":["Fire","Ice","Flying","Psychic"],
        "fleeRate":0.1,"maxCP":951,"maxHP":1071,
        "image":"u1"
    }}}"#;
    let data: PokemonData = decode(body).unwrap();
    let pokemon = data.pokemon.unwrap();
    assert_eq!(pokemon.height.display(), "0.61m – 0.79m");
    assert_eq!(pokemon.weight.display(), "6.04kg – 7.76kg");
    assert_eq!(pokemon.max_cp, 951);
    assert_eq!(pokemon.max_hp, 1071);
    assert_eq!(pokemon.classification, "Seed Pokémon");
}

#[test]
fn test_decode_null_pokemon() {
    let data: PokemonData = decode(r#"{"data":{"pokemon":null}}"#).unwrap();
    assert!(data.pokemon.is_none());
}

#[test]
fn test_decode_server_errors() {
    let body = r#"{"data":null,"errors":[{"message":"boom"},{"message":"again"}]}"#;
    let err = decode::<PokemonsData>(body).unwrap_err();
    assert_eq!(err, QueryError::Server("boom; again".to_string()));
}

#[test]
fn test_decode_malformed_body() {
    assert!(matches!(decode::<PokemonsData>("not json"), Err(QueryError::Server(_))));
    assert!(matches!(decode::<PokemonsData>("{}"), Err(QueryError::Server(_))));
}
