/// Product image fetching and thumbnail generation
///
/// Images are downloaded through the catalog client, decoded and resized
/// off the UI thread, and handed back as raw RGBA so iced can build an
/// image handle. Anything that fails is shown as the generated placeholder.

use image::{imageops::FilterType, Rgba, RgbaImage};
use tokio::task;

use super::client::CatalogClient;

/// Background colour of the placeholder bitmap
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([222, 226, 230, 255]);
/// Border colour of the placeholder bitmap
const PLACEHOLDER_EDGE: Rgba<u8> = Rgba([173, 181, 189, 255]);

/// A decoded, resized RGBA image
#[derive(Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl From<RgbaImage> for Thumbnail {
    fn from(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }
}

/// Download `url` and shrink it to fit in a `max_size` square
pub async fn fetch_thumbnail(client: CatalogClient, url: String, max_size: u32) -> Result<Thumbnail, String> {
    let bytes = client
        .fetch_bytes(&url)
        .await
        .map_err(|e| format!("Failed to download {}: {}", url, e))?;

    // Decoding and resizing are CPU-bound
    task::spawn_blocking(move || decode_thumbnail(&bytes, max_size))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Decode image bytes and resize, keeping the aspect ratio
pub fn decode_thumbnail(bytes: &[u8], max_size: u32) -> Result<Thumbnail, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let resized = if img.width() > max_size || img.height() > max_size {
        img.resize(max_size, max_size, FilterType::Triangle)
    } else {
        img
    };
    Ok(resized.to_rgba8().into())
}

/// A flat grey square with a darker one-pixel border
pub fn placeholder(size: u32) -> Thumbnail {
    let size = size.max(2);
    let image = RgbaImage::from_fn(size, size, |x, y| {
        if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
            PLACEHOLDER_EDGE
        } else {
            PLACEHOLDER_FILL
        }
    });
    image.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_and_resize() {
        let thumb = decode_thumbnail(&png_bytes(200, 100), 64).unwrap();
        assert_eq!(thumb.width, 64);
        assert_eq!(thumb.height, 32);
        assert_eq!(thumb.pixels.len(), (64 * 32 * 4) as usize);
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let thumb = decode_thumbnail(&png_bytes(20, 10), 64).unwrap();
        assert_eq!((thumb.width, thumb.height), (20, 10));
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(decode_thumbnail(b"<html>not found</html>", 64).is_err());
    }

    #[test]
    fn test_placeholder() {
        let thumb = placeholder(60);
        assert_eq!((thumb.width, thumb.height), (60, 60));
        assert_eq!(&thumb.pixels[0..4], &PLACEHOLDER_EDGE.0);
        let center = ((30 * 60 + 30) * 4) as usize;
        assert_eq!(&thumb.pixels[center..center + 4], &PLACEHOLDER_FILL.0);
    }
}
