pub mod detail;
pub mod list;

use crate::config::Config;
use crate::debounce::Debounced;
use crate::fetch::{self, QueryHandle, QueryState};
use crate::images::ImageCache;
use crate::route::Route;
use pokedex_model::filter::FilterCache;
use pokedex_model::pokemon::{Pokemon, PokemonSummary};
use pokedex_model::query::{Client, QueryError};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Global state, contains everything
pub struct State {
    pub route: Route,
    pub config: Config,
    pub client: Arc<Client>,

    pub pokemons: QueryHandle<Vec<PokemonSummary>>,
    pub pokemon_by_id: QueryHandle<Option<Pokemon>>,
    /// Bumped whenever list data lands, so the filter cache can key on it.
    pub list_revision: u64,

    pub search: String,
    pub debounce: Debounced,
    pub filter: FilterCache,

    pub images: ImageCache,
    pub last_instant: Instant,
}

impl State {
    pub fn new(config: Config) -> Result<State, QueryError> {
        let client = Arc::new(Client::new(&config.api_url)?);
        let pokemons = fetch::fetch_pokemons(&client, config.page_size);
        Ok(State {
            route: Route::List,
            client,
            pokemons,
            pokemon_by_id: QueryHandle::idle(),
            list_revision: 0,
            search: String::new(),
            debounce: Debounced::new(SEARCH_DEBOUNCE),
            filter: FilterCache::default(),
            images: ImageCache::new(),
            last_instant: Instant::now(),
            config,
        })
    }

    /// Entering a detail route starts its query; leaving it resets the
    /// handle so a late result has nowhere to land.
    pub fn navigate(&mut self, route: Route) {
        match route.pokemon_id() {
            Some(id) => self.pokemon_by_id = fetch::fetch_pokemon_by_id(&self.client, id),
            None => self.pokemon_by_id = QueryHandle::idle(),
        }
        self.route = route;
    }

    /// Per-frame reactive step, runs before drawing.
    pub fn poll(&mut self, now: Instant) {
        self.debounce.poll(now);
        let was_loading = matches!(self.pokemons.state(), QueryState::Loading);
        self.pokemons.poll();
        if was_loading && matches!(self.pokemons.state(), QueryState::Ready(_)) {
            self.list_revision += 1;
        }
        self.pokemon_by_id.poll();
    }
}

pub fn draw(ctx: &egui::Context, state: &mut State) {
    state.images.poll(ctx);
    list::draw(ctx, state);
    detail::draw(ctx, state);
}

#[cfg(test)]
fn test_state() -> State {
    // nothing listens locally, requests fail fast and no test touches the network
    let config = Config {
        api_url: String::from("http://127.0.0.1:9"),
        ..Config::default()
    };
    State::new(config).unwrap()
}

#[test]
fn test_navigate_detail_starts_query_list_resets_it() {
    let mut state = test_state();
    state.navigate(Route::Detail(String::from("1")));
    assert!(matches!(state.pokemon_by_id.state(), QueryState::Loading));
    state.navigate(Route::List);
    assert!(matches!(state.pokemon_by_id.state(), QueryState::Idle));
}

#[test]
fn test_list_revision_bumps_when_data_lands() {
    let mut state = test_state();
    state.pokemons = QueryHandle::spawn(|| Ok(vec![]));
    let deadline = Instant::now() + Duration::from_secs(5);
    while matches!(state.pokemons.state(), QueryState::Loading) {
        assert!(Instant::now() < deadline, "list query never settled");
        state.poll(Instant::now());
        std::thread::sleep(Duration::from_millis(2));
    }
    assert!(matches!(state.pokemons.state(), QueryState::Ready(_)));
    assert_eq!(state.list_revision, 1);
    state.poll(Instant::now());
    assert_eq!(state.list_revision, 1);
}
