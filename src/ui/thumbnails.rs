/// Image handles for thumbnails and the detail gallery
///
/// Each URL is fetched at most once per session. Until an image arrives,
/// and forever if it fails, the placeholder handle is used in its place.

use std::collections::HashMap;

use iced::widget::image::Handle;

use crate::catalog::images::{self, Thumbnail};

/// Load state of a single image URL
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Handle),
    Failed,
}

pub struct Thumbnails {
    slots: HashMap<String, ImageSlot>,
    placeholder: Handle,
}

impl Thumbnails {
    pub fn new(placeholder_size: u32) -> Self {
        Self {
            slots: HashMap::new(),
            placeholder: to_handle(images::placeholder(placeholder_size)),
        }
    }

    /// The image to draw for `url` right now
    pub fn handle(&self, url: &str) -> Handle {
        match self.slot(url) {
            Some(ImageSlot::Ready(handle)) => handle.clone(),
            _ => self.placeholder.clone(),
        }
    }

    pub fn slot(&self, url: &str) -> Option<&ImageSlot> {
        self.slots.get(url)
    }

    /// Mark unseen URLs as loading and return them for fetching
    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut pending = Vec::new();
        for url in urls {
            if url.trim().is_empty() || self.slots.contains_key(url) {
                continue;
            }
            self.slots.insert(url.to_string(), ImageSlot::Loading);
            pending.push(url.to_string());
        }
        pending
    }

    /// Record the outcome of a fetch
    pub fn resolve(&mut self, url: String, result: Result<Thumbnail, String>) {
        let slot = match result {
            Ok(thumbnail) => ImageSlot::Ready(to_handle(thumbnail)),
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "image unavailable, using placeholder");
                ImageSlot::Failed
            }
        };
        self.slots.insert(url, slot);
    }
}

fn to_handle(thumbnail: Thumbnail) -> Handle {
    Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_url_requested_once() {
        let mut thumbnails = Thumbnails::new(16);
        let first = thumbnails.request(["https://a/1.png", "https://a/2.png", "https://a/1.png"]);
        assert_eq!(first, vec!["https://a/1.png".to_string(), "https://a/2.png".to_string()]);

        let second = thumbnails.request(["https://a/2.png", "https://a/3.png", " "]);
        assert_eq!(second, vec!["https://a/3.png".to_string()]);
        assert!(matches!(thumbnails.slot("https://a/3.png"), Some(ImageSlot::Loading)));
    }

    #[test]
    fn test_resolve_outcomes() {
        let mut thumbnails = Thumbnails::new(16);
        thumbnails.request(["https://a/ok.png", "https://a/broken.png"]);

        thumbnails.resolve("https://a/ok.png".into(), Ok(images::placeholder(8)));
        thumbnails.resolve("https://a/broken.png".into(), Err("404".into()));

        assert!(matches!(thumbnails.slot("https://a/ok.png"), Some(ImageSlot::Ready(_))));
        assert!(matches!(thumbnails.slot("https://a/broken.png"), Some(ImageSlot::Failed)));
        assert!(thumbnails.slot("https://a/unknown.png").is_none());
    }
}
