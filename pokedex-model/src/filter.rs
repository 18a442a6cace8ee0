use crate::pokemon::PokemonSummary;

/// Case-insensitive substring filter over pokemon names. Returns indices
/// into `items`, in order. An empty search matches everything.
pub fn filter_by_name(items: &[PokemonSummary], search: &str) -> Vec<usize> {
    let needle = search.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Memoized wrapper around [`filter_by_name`]. The list view calls this
/// every frame; the scan only reruns when the search text or the list
/// revision actually changed.
#[derive(Default)]
pub struct FilterCache {
    key: Option<(u64, String)>,
    visible: Vec<usize>,
    runs: u64,
}

impl FilterCache {
    pub fn query(&mut self, items: &[PokemonSummary], revision: u64, search: &str) -> &[usize] {
        let stale = match &self.key {
            Some((rev, text)) => *rev != revision || text != search,
            None => true,
        };
        if stale {
            self.visible = filter_by_name(items, search);
            self.key = Some((revision, search.to_string()));
            self.runs += 1;
        }
        &self.visible
    }

    /// Number of actual filter passes, for tests.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
fn sample() -> Vec<PokemonSummary> {
    ["Bulbasaur", "Ivysaur", "Venusaur", "Charmander"]
        .iter()
        .enumerate()
        .map(|(i, name)| PokemonSummary {
            id: (i + 1).to_string(),
            number: format!("{:03}", i + 1),
            name: name.to_string(),
            image: format!("u{}", i + 1),
            types: vec!["Grass".to_string(), "Poison".to_string()],
        })
        .collect()
}

#[test]
fn test_filter_substring_case_insensitive() {
    let items = sample();
    assert_eq!(filter_by_name(&items, "bul"), vec![0]);
    assert_eq!(filter_by_name(&items, "BUL"), vec![0]);
    // substring, not prefix
    assert_eq!(filter_by_name(&items, "saur"), vec![0, 1, 2]);
    assert_eq!(filter_by_name(&items, "zzz"), Vec::<usize>::new());
}

#[test]
fn test_filter_empty_search_matches_all_in_order() {
    let items = sample();
    assert_eq!(filter_by_name(&items, ""), vec![0, 1, 2, 3]);
}

#[test]
fn test_filter_idempotent() {
    let items = sample();
    let once = filter_by_name(&items, "saur");
    let twice = filter_by_name(&items, "saur");
    assert_eq!(once, twice);
}

#[test]
fn test_cache_skips_redundant_passes() {
    let items = sample();
    let mut cache = FilterCache::default();
    assert_eq!(cache.query(&items, 1, "bul"), &[0]);
    assert_eq!(cache.runs(), 1);
    // same inputs, no recompute
    cache.query(&items, 1, "bul");
    cache.query(&items, 1, "bul");
    assert_eq!(cache.runs(), 1);
    // search changed
    assert_eq!(cache.query(&items, 1, ""), &[0, 1, 2, 3]);
    assert_eq!(cache.runs(), 2);
    // list revision changed
    cache.query(&items, 2, "");
    assert_eq!(cache.runs(), 3);
}
