use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::foundation::error::{FramekitError, FramekitResult};

/// Decoded raster image in row-major premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, premultiplied, immutable once decoded.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build a prepared image from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, bytes: &[u8]) -> FramekitResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FramekitError::validation("image size overflow"))?;
        if bytes.len() != expected {
            return Err(FramekitError::validation(
                "image bytes must match width*height*4",
            ));
        }
        let mut premul = bytes.to_vec();
        for px in premul.chunks_exact_mut(4) {
            let a = px[3] as u16;
            px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
            px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
            px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(premul),
        })
    }
}

/// Decode a user-supplied upload into a shareable image.
///
/// Non-image payloads surface as [`FramekitError::Upload`]; callers processing
/// a batch report the failure per file and continue with the rest.
pub fn load_user_image(bytes: &[u8]) -> FramekitResult<Arc<PreparedImage>> {
    match decode_image(bytes) {
        Ok(img) => Ok(Arc::new(img)),
        Err(e) => Err(FramekitError::upload(format!(
            "selected file is not a decodable image: {e}"
        ))),
    }
}

/// Maps a device identifier to the raw bytes of its frame template image.
///
/// The mapping must be deterministic; absence is a recoverable condition that
/// the compositor handles with a placeholder.
pub trait TemplateResolver {
    /// Fetch the encoded template image for `device_id`.
    fn load(&self, device_id: &str) -> FramekitResult<Vec<u8>>;
}

/// Filesystem resolver: `{root}/{device_id}.png`.
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    /// Create a resolver rooted at a template directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateResolver for DirResolver {
    fn load(&self, device_id: &str) -> FramekitResult<Vec<u8>> {
        // Identifiers address files directly; refuse anything that could
        // escape the template root.
        if device_id.is_empty()
            || device_id.contains('/')
            || device_id.contains('\\')
            || device_id.contains("..")
        {
            return Err(FramekitError::validation(format!(
                "invalid device identifier '{device_id}'"
            )));
        }
        let path = self.root.join(format!("{device_id}.png"));
        std::fs::read(&path).map_err(|e| {
            FramekitError::asset_load(format!(
                "failed to read template '{}': {e}",
                path.display()
            ))
        })
    }
}

#[derive(Clone, Debug)]
enum TemplateEntry {
    Loaded(Arc<PreparedImage>),
    Failed,
}

/// Memoized loader for device frame templates, keyed by device identifier.
///
/// Entries are append-only for the lifetime of a session and never
/// invalidated. Failures are memoized too, so repeated renders of a device
/// with a missing template deterministically take the placeholder path
/// instead of re-issuing the load every frame.
pub struct TemplateStore {
    resolver: Box<dyn TemplateResolver>,
    entries: HashMap<String, TemplateEntry>,
}

impl TemplateStore {
    /// Create a store backed by the given resolver.
    pub fn new(resolver: impl TemplateResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            entries: HashMap::new(),
        }
    }

    /// Return the cached template for `device_id`, loading it on first use.
    ///
    /// `None` means the template is unavailable; the failure has already been
    /// logged and recorded.
    pub fn get_or_load(&mut self, device_id: &str) -> Option<Arc<PreparedImage>> {
        if let Some(entry) = self.entries.get(device_id) {
            return match entry {
                TemplateEntry::Loaded(img) => Some(Arc::clone(img)),
                TemplateEntry::Failed => None,
            };
        }

        let loaded = self
            .resolver
            .load(device_id)
            .and_then(|bytes| decode_image(&bytes));
        match loaded {
            Ok(img) => {
                let img = Arc::new(img);
                self.entries
                    .insert(device_id.to_string(), TemplateEntry::Loaded(Arc::clone(&img)));
                Some(img)
            }
            Err(e) => {
                tracing::warn!(device_id, error = %e, "template load failed; using placeholder");
                self.entries
                    .insert(device_id.to_string(), TemplateEntry::Failed);
                None
            }
        }
    }

    /// Number of cache entries (loaded and failed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
