/// Background query handles. Each handle runs one GraphQL operation on a
/// worker thread and funnels the result back through a channel; the frame
/// loop polls it. A handle's consumer observes `Loading` followed by exactly
/// one terminal state per logical request.

use pokedex_model::pokemon::{Pokemon, PokemonSummary};
use pokedex_model::query::{Client, QueryError};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(QueryError),
}

pub struct QueryHandle<T> {
    state: QueryState<T>,
    tx: Sender<(u64, Result<T, QueryError>)>,
    rx: Receiver<(u64, Result<T, QueryError>)>,
    generation: u64,
}

impl<T: Send + 'static> QueryHandle<T> {
    pub fn idle() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: QueryState::Idle,
            tx,
            rx,
            generation: 0,
        }
    }

    pub fn spawn(f: impl FnOnce() -> Result<T, QueryError> + Send + 'static) -> Self {
        let mut handle = Self::idle();
        handle.restart(f);
        handle
    }

    /// Issue a new request on this handle. Any still-outstanding request is
    /// superseded; its eventual result carries a stale generation tag and
    /// gets discarded in `poll`.
    pub fn restart(&mut self, f: impl FnOnce() -> Result<T, QueryError> + Send + 'static) {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send((generation, f()));
        });
        self.state = QueryState::Loading;
    }

    pub fn poll(&mut self) {
        while let Ok((generation, result)) = self.rx.try_recv() {
            if generation != self.generation {
                // superseded request
                continue;
            }
            self.state = match result {
                Ok(value) => QueryState::Ready(value),
                Err(err) => QueryState::Failed(err),
            };
        }
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }
}

pub fn fetch_pokemons(client: &Arc<Client>, first: u32) -> QueryHandle<Vec<PokemonSummary>> {
    let client = Arc::clone(client);
    QueryHandle::spawn(move || client.pokemons(first))
}

/// A detail view can mount transiently with no id (route in transition);
/// that must not issue a request, so an empty id yields an idle handle.
pub fn fetch_pokemon_by_id(client: &Arc<Client>, id: &str) -> QueryHandle<Option<Pokemon>> {
    if id.is_empty() {
        return QueryHandle::idle();
    }
    let client = Arc::clone(client);
    let id = id.to_string();
    QueryHandle::spawn(move || client.pokemon_by_id(&id))
}

#[cfg(test)]
use std::time::{Duration, Instant};

#[cfg(test)]
fn poll_until_settled<T: Send + 'static>(handle: &mut QueryHandle<T>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while matches!(handle.state(), QueryState::Loading) {
        assert!(Instant::now() < deadline, "query never settled");
        handle.poll();
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn test_spawn_reaches_ready() {
    let mut handle = QueryHandle::spawn(|| Ok(7));
    assert!(matches!(handle.state(), QueryState::Loading));
    poll_until_settled(&mut handle);
    assert!(matches!(handle.state(), QueryState::Ready(7)));
}

#[test]
fn test_spawn_reaches_failed() {
    let mut handle: QueryHandle<i32> =
        QueryHandle::spawn(|| Err(QueryError::Server(String::from("boom"))));
    poll_until_settled(&mut handle);
    assert!(matches!(handle.state(), QueryState::Failed(QueryError::Server(_))));
}

#[test]
fn test_superseded_result_is_discarded() {
    let mut handle = QueryHandle::spawn(|| {
        thread::sleep(Duration::from_millis(100));
        Ok(1)
    });
    handle.restart(|| Ok(2));
    poll_until_settled(&mut handle);
    assert!(matches!(handle.state(), QueryState::Ready(2)));
    // let the superseded worker deliver its stale result
    thread::sleep(Duration::from_millis(250));
    handle.poll();
    assert!(matches!(handle.state(), QueryState::Ready(2)));
}

#[test]
fn test_by_id_empty_id_never_loads() {
    let client = Arc::new(Client::new("http://127.0.0.1:9").unwrap());
    let mut handle = fetch_pokemon_by_id(&client, "");
    assert!(matches!(handle.state(), QueryState::Idle));
    handle.poll();
    assert!(matches!(handle.state(), QueryState::Idle));
}

#[test]
fn test_by_id_transport_failure() {
    // nothing listens on the discard port, the connection is refused
    let client = Arc::new(Client::new("http://127.0.0.1:9").unwrap());
    let mut handle = fetch_pokemon_by_id(&client, "1");
    assert!(matches!(handle.state(), QueryState::Loading));
    poll_until_settled(&mut handle);
    assert!(matches!(handle.state(), QueryState::Failed(QueryError::Transport(_))));
}
