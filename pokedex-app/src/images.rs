/// Remote sprite cache. The first request for a URL queues a fetch; `poll`
/// drains finished downloads, uploads them as egui textures and starts
/// queued fetches, keeping at most a handful of worker threads in flight.
/// A failed URL stays cached as failed so it isn't refetched every frame.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

const MAX_IN_FLIGHT: usize = 8;

struct DecodedImage {
    size: [usize; 2],
    rgba: Vec<u8>,
}

enum ImageState {
    Pending,
    Failed,
    Ready(egui::TextureHandle),
}

pub struct ImageCache {
    entries: FxHashMap<String, ImageState>,
    queue: VecDeque<String>,
    in_flight: usize,
    tx: Sender<(String, Result<DecodedImage, String>)>,
    rx: Receiver<(String, Result<DecodedImage, String>)>,
}

fn fetch_image(url: &str) -> Result<DecodedImage, String> {
    let bytes = reqwest::blocking::get(url)
        .and_then(|response| response.bytes())
        .map_err(|err| err.to_string())?;
    let image = image::load_from_memory(&bytes).map_err(|err| err.to_string())?.to_rgba8();
    Ok(DecodedImage {
        size: [image.width() as usize, image.height() as usize],
        rgba: image.into_raw(),
    })
}

impl ImageCache {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            entries: FxHashMap::default(),
            queue: VecDeque::new(),
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((url, result)) = self.rx.try_recv() {
            self.in_flight -= 1;
            let state = match result {
                Ok(decoded) => {
                    let bitmap = egui::ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.rgba);
                    ImageState::Ready(ctx.load_texture(url.clone(), bitmap, egui::TextureOptions::LINEAR))
                }
                Err(err) => {
                    eprintln!("Failed to load image {url}: {err}");
                    ImageState::Failed
                }
            };
            self.entries.insert(url, state);
        }

        while self.in_flight < MAX_IN_FLIGHT {
            let Some(url) = self.queue.pop_front() else { break };
            self.in_flight += 1;
            let tx = self.tx.clone();
            thread::spawn(move || {
                let result = fetch_image(&url);
                let _ = tx.send((url, result));
            });
        }
    }

    /// Texture for `url` if it has arrived; queues the fetch on the first
    /// call for a given URL.
    pub fn texture(&mut self, url: &str) -> Option<&egui::TextureHandle> {
        if !self.entries.contains_key(url) {
            self.entries.insert(url.to_string(), ImageState::Pending);
            self.queue.push_back(url.to_string());
        }
        match self.entries.get(url) {
            Some(ImageState::Ready(texture)) => Some(texture),
            _ => None,
        }
    }
}

#[test]
fn test_texture_is_none_until_fetched() {
    let mut cache = ImageCache::new();
    assert!(cache.texture("http://127.0.0.1:9/sprite.png").is_none());
    // second lookup must not queue a second fetch, and still has nothing
    assert!(cache.texture("http://127.0.0.1:9/sprite.png").is_none());
    assert_eq!(cache.queue.len(), 1);
}

#[test]
fn test_fetch_concurrency_is_capped() {
    let ctx = egui::Context::default();
    let mut cache = ImageCache::new();
    for i in 0..20 {
        assert!(cache.texture(&format!("http://127.0.0.1:9/{i}.png")).is_none());
    }
    assert_eq!(cache.in_flight, 0);
    cache.poll(&ctx);
    assert_eq!(cache.in_flight, MAX_IN_FLIGHT);
    assert_eq!(cache.queue.len(), 20 - MAX_IN_FLIGHT);
}
