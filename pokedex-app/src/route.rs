/// Which view(s) are mounted. The list is always there; a detail route
/// stacks the overlay on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

impl Route {
    /// `/pokemon` or `/pokemon/:id`. An empty id segment is the defined
    /// "nothing selected" state, not an error.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.strip_suffix('/').unwrap_or(path);
        if path == "/pokemon" {
            return Some(Route::List);
        }
        if let Some(id) = path.strip_prefix("/pokemon/") {
            if !id.is_empty() && !id.contains('/') {
                return Some(Route::Detail(id.to_string()));
            }
        }
        None
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::List => String::from("/pokemon"),
            Route::Detail(id) => format!("/pokemon/{id}"),
        }
    }

    /// Path parameter for the detail overlay, passed explicitly rather than
    /// read from global routing state.
    pub fn pokemon_id(&self) -> Option<&str> {
        match self {
            Route::Detail(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

#[test]
fn test_parse() {
    assert_eq!(Route::parse("/pokemon"), Some(Route::List));
    assert_eq!(Route::parse("/pokemon/"), Some(Route::List));
    assert_eq!(Route::parse("/pokemon/25"), Some(Route::Detail("25".to_string())));
    assert_eq!(Route::parse("/pokemon/25/"), Some(Route::Detail("25".to_string())));
    assert_eq!(Route::parse("/pokemon/a/b"), None);
    assert_eq!(Route::parse("/creatures"), None);
    assert_eq!(Route::parse(""), None);
}

#[test]
fn test_to_path_round_trip() {
    for route in [Route::List, Route::Detail("151".to_string())] {
        assert_eq!(Route::parse(&route.to_path()), Some(route));
    }
}

#[test]
fn test_pokemon_id() {
    assert_eq!(Route::List.pokemon_id(), None);
    assert_eq!(Route::Detail(String::new()).pokemon_id(), None);
    assert_eq!(Route::Detail("7".to_string()).pokemon_id(), Some("7"));
}
