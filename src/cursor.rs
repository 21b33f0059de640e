use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use crate::error::ResourceLoadError;
use crate::geometry::Point;

/// Immutable cursor picture plus the pixel that marks the pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    image: Arc<RgbaImage>,
    hotspot: Point,
}

impl Cursor {
    /// Cursor whose hotspot sits at the center of the bitmap (rounded down),
    /// which is the placement used for every resource-backed cursor.
    pub fn centered(image: Arc<RgbaImage>) -> Self {
        let hotspot = Point::new((image.width() / 2) as i32, (image.height() / 2) as i32);
        Self { image, hotspot }
    }

    /// Built-in crosshair for hosts that could not load a tool's own cursor.
    pub fn crosshair() -> Self {
        const SIZE: u32 = 11;
        let mut image = RgbaImage::from_pixel(SIZE, SIZE, Rgba([0, 0, 0, 0]));
        for i in 0..SIZE {
            image.put_pixel(i, SIZE / 2, Rgba([0, 0, 0, 255]));
            image.put_pixel(SIZE / 2, i, Rgba([0, 0, 0, 255]));
        }
        Self::centered(Arc::new(image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn hotspot(&self) -> Point {
        self.hotspot
    }
}

/// Resolves cursor resource identifiers to decoded bitmaps.
///
/// Lookup order is: decoded cache, bundled in-memory assets, then each search
/// directory in turn (absolute identifiers are used as-is). Decoded bitmaps
/// are cached, so every instrument built from the same identifier shares one
/// allocation.
#[derive(Debug, Default)]
pub struct CursorProvider {
    search_dirs: Vec<PathBuf>,
    bundled: HashMap<String, Arc<[u8]>>,
    cache: Mutex<HashMap<String, Arc<RgbaImage>>>,
}

impl CursorProvider {
    pub fn new(search_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            search_dirs: search_dirs.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Register encoded image bytes (PNG etc.) under an identifier.
    pub fn register_bundled(&mut self, id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        let id = id.into();
        self.cache.lock().remove(&id);
        self.bundled.insert(id, bytes.into());
    }

    pub fn with_bundled(mut self, id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.register_bundled(id, bytes);
        self
    }

    /// Load the resource and build a centered cursor from it.
    pub fn cursor(&self, id: &str) -> Result<Cursor, ResourceLoadError> {
        self.load(id).map(Cursor::centered)
    }

    /// Decode the named resource, serving repeated requests from the cache.
    pub fn load(&self, id: &str) -> Result<Arc<RgbaImage>, ResourceLoadError> {
        if let Some(image) = self.cache.lock().get(id) {
            return Ok(Arc::clone(image));
        }

        let bytes = self.read_bytes(id)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|source| ResourceLoadError::Decode {
                id: id.to_owned(),
                source,
            })?
            .to_rgba8();
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(ResourceLoadError::Empty { id: id.to_owned() });
        }
        log::info!("Loaded cursor resource {}: {}x{}", id, decoded.width(), decoded.height());

        let image = Arc::new(decoded);
        self.cache.lock().insert(id.to_owned(), Arc::clone(&image));
        Ok(image)
    }

    /// Number of decoded resources currently cached
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    fn read_bytes(&self, id: &str) -> Result<Arc<[u8]>, ResourceLoadError> {
        if let Some(bytes) = self.bundled.get(id) {
            return Ok(Arc::clone(bytes));
        }

        let candidates: Vec<PathBuf> = if Path::new(id).is_absolute() {
            vec![PathBuf::from(id)]
        } else {
            self.search_dirs.iter().map(|dir| dir.join(id)).collect()
        };

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            log::debug!("Reading cursor resource from {}", path.display());
            return std::fs::read(&path)
                .map(Arc::from)
                .map_err(|source| ResourceLoadError::Io { path, source });
        }

        Err(ResourceLoadError::NotFound { id: id.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor as IoCursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = IoCursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_bundled_resource_is_cached() {
        let provider = CursorProvider::default().with_bundled("brush.png", png_bytes(8, 6));
        assert_eq!(provider.cache_size(), 0);

        let first = provider.load("brush.png").unwrap();
        let second = provider.load("brush.png").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.cache_size(), 1);
    }

    #[test]
    fn test_cursor_hotspot_is_centered() {
        let provider = CursorProvider::default().with_bundled("brush.png", png_bytes(8, 6));
        let cursor = provider.cursor("brush.png").unwrap();
        assert_eq!(cursor.hotspot(), Point::new(4, 3));
        assert_eq!(cursor.image().dimensions(), (8, 6));
    }

    #[test]
    fn test_missing_resource() {
        let provider = CursorProvider::new(vec![std::env::temp_dir()]);
        let err = provider.load("definitely-not-a-cursor-7f3a.png").unwrap_err();
        assert!(matches!(err, ResourceLoadError::NotFound { .. }));
    }

    #[test]
    fn test_undecodable_resource() {
        let provider = CursorProvider::default().with_bundled("junk.png", vec![1u8, 2, 3]);
        let err = provider.load("junk.png").unwrap_err();
        assert!(matches!(err, ResourceLoadError::Decode { .. }));
        assert_eq!(provider.cache_size(), 0);
    }

    #[test]
    fn test_reregistering_invalidates_cache() {
        let mut provider = CursorProvider::default().with_bundled("a.png", png_bytes(2, 2));
        provider.load("a.png").unwrap();
        provider.register_bundled("a.png", png_bytes(4, 4));
        assert_eq!(provider.cache_size(), 0);
        assert_eq!(provider.load("a.png").unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_crosshair_fallback() {
        let cursor = Cursor::crosshair();
        assert_eq!(cursor.hotspot(), Point::new(5, 5));
        assert_eq!(cursor.image().get_pixel(5, 0), &Rgba([0, 0, 0, 255]));
    }
}
