use std::time::{Duration, Instant};

/// Single-slot debounce for the search box. Every `set` overwrites the
/// pending value and resets the quiescence deadline; `poll` commits the
/// pending value once the input has been quiet for the whole window. There
/// is never a backlog of stale propagations.
pub struct Debounced {
    window: Duration,
    committed: String,
    pending: Option<(String, Instant)>,
}

impl Debounced {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            committed: String::new(),
            pending: None,
        }
    }

    pub fn set(&mut self, value: &str, now: Instant) {
        self.pending = Some((value.to_string(), now));
    }

    /// Returns true when the committed value just changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some((_, since)) if now.duration_since(*since) >= self.window => {
                let (value, _) = self.pending.take().unwrap();
                if value != self.committed {
                    self.committed = value;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn value(&self) -> &str {
        &self.committed
    }
}

#[cfg(test)]
const WINDOW: Duration = Duration::from_millis(300);

#[test]
fn test_rapid_sets_propagate_once_with_final_value() {
    let t0 = Instant::now();
    let mut debounce = Debounced::new(WINDOW);
    debounce.set("b", t0);
    debounce.set("bu", t0 + Duration::from_millis(100));
    debounce.set("bul", t0 + Duration::from_millis(200));

    assert!(!debounce.poll(t0 + Duration::from_millis(250)));
    assert_eq!(debounce.value(), "");
    // the window is measured from the last keystroke
    assert!(!debounce.poll(t0 + Duration::from_millis(450)));
    assert!(debounce.poll(t0 + Duration::from_millis(500)));
    assert_eq!(debounce.value(), "bul");
    // slot emptied, nothing further to propagate
    assert!(!debounce.poll(t0 + Duration::from_millis(900)));
}

#[test]
fn test_unchanged_value_does_not_count_as_propagation() {
    let t0 = Instant::now();
    let mut debounce = Debounced::new(WINDOW);
    debounce.set("bul", t0);
    assert!(debounce.poll(t0 + WINDOW));
    debounce.set("bul", t0 + Duration::from_millis(400));
    assert!(!debounce.poll(t0 + Duration::from_millis(800)));
    assert_eq!(debounce.value(), "bul");
}

#[test]
fn test_set_resets_pending_slot() {
    let t0 = Instant::now();
    let mut debounce = Debounced::new(WINDOW);
    debounce.set("char", t0);
    debounce.set("", t0 + Duration::from_millis(100));
    assert!(!debounce.poll(t0 + Duration::from_millis(350)));
    assert_eq!(debounce.value(), "");
}
