use kurbo::Rect;
use serde::Deserialize;

use crate::foundation::error::{FramekitError, FramekitResult};
use crate::scene::model::DeviceInfo;

/// One entry of the persisted device catalog.
///
/// The catalog is external JSON; this is the only serde surface of the
/// engine. Records that fail [`CatalogDevice::validate`] are dropped by
/// [`load_catalog`] rather than aborting the load.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogDevice {
    /// Attribution for the template artwork.
    pub credits: String,
    /// Human-readable color description.
    pub color_str: String,
    /// SEO page title.
    pub meta_title: String,
    /// SEO page description.
    pub meta_description: String,
    /// Native screen resolution `[width, height]` in pixels.
    pub display_resolution: [f64; 2],
    /// Device category tag (phone, tablet, laptop, ...).
    pub device_type: String,
    /// Stable identifier; also addresses the template image.
    pub device_id: String,
    /// Display name.
    pub name: String,
    /// Optional short display name.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Per-orientation screen mapping records.
    pub orientations: Vec<Orientation>,
    /// Names of the perspective presets this device supports.
    pub available_perspectives: Vec<String>,
    /// Whether the frame artwork is composited in front of the screen image.
    #[serde(default)]
    pub is_mockup_image_at_front: bool,
    /// Legacy-catalog marker.
    #[serde(default)]
    pub is_legacy: bool,
    /// Optional body color record.
    #[serde(default)]
    pub color: Option<CatalogColor>,
}

/// Screen mapping for one device orientation.
#[derive(Clone, Debug, Deserialize)]
pub struct Orientation {
    /// Image alt text.
    pub alt: String,
    /// Orientation name (portrait, landscape, ...).
    pub name: String,
    /// Optional reference into the legacy asset set.
    #[serde(default)]
    pub legacy_file: Option<String>,
    /// Quadrilateral of screen-mapping corners in template pixel space.
    pub coordinates: [[f64; 2]; 4],
    /// Template image pixel size, when known.
    #[serde(default)]
    pub template_image_size: Option<[u32; 2]>,
}

/// Catalog body-color record.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogColor {
    /// Color identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hex code matching `^#([0-9a-fA-F]{3}){1,2}$`.
    pub hexcode: String,
}

/// True when `s` matches `^#([0-9a-fA-F]{3}){1,2}$`.
pub fn is_valid_hexcode(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl CatalogDevice {
    /// Check schema invariants serde cannot express.
    pub fn validate(&self) -> FramekitResult<()> {
        if self.device_id.is_empty() {
            return Err(FramekitError::validation("device_id must be non-empty"));
        }
        if self.name.is_empty() {
            return Err(FramekitError::validation(format!(
                "device '{}': name must be non-empty",
                self.device_id
            )));
        }
        for (i, d) in self.display_resolution.iter().enumerate() {
            if !d.is_finite() || *d <= 0.0 {
                return Err(FramekitError::validation(format!(
                    "device '{}': display_resolution[{i}] must be finite and > 0",
                    self.device_id
                )));
            }
        }
        for o in &self.orientations {
            for [x, y] in &o.coordinates {
                if !x.is_finite() || !y.is_finite() {
                    return Err(FramekitError::validation(format!(
                        "device '{}': orientation '{}' has non-finite coordinates",
                        self.device_id, o.name
                    )));
                }
            }
        }
        if let Some(color) = &self.color
            && !is_valid_hexcode(&color.hexcode)
        {
            return Err(FramekitError::validation(format!(
                "device '{}': invalid color hexcode '{}'",
                self.device_id, color.hexcode
            )));
        }
        Ok(())
    }

    /// Derive the engine-facing device description.
    ///
    /// The screen sub-rectangle is the axis-aligned bounding box of the first
    /// orientation's mapping quadrilateral; devices without orientations get
    /// no screen rect (the whole frame is artwork).
    pub fn info(&self) -> DeviceInfo {
        let screen = self.orientations.first().map(|o| {
            let xs = o.coordinates.iter().map(|c| c[0]);
            let ys = o.coordinates.iter().map(|c| c[1]);
            let x0 = xs.clone().fold(f64::INFINITY, f64::min);
            let x1 = xs.fold(f64::NEG_INFINITY, f64::max);
            let y0 = ys.clone().fold(f64::INFINITY, f64::min);
            let y1 = ys.fold(f64::NEG_INFINITY, f64::max);
            Rect::new(x0, y0, x1, y1)
        });
        DeviceInfo {
            name: self.name.clone(),
            width: self.display_resolution[0],
            height: self.display_resolution[1],
            screen,
        }
    }
}

/// Parse a catalog file, returning only the valid records.
///
/// A syntactically broken file is a [`FramekitError::Validation`]; individual
/// records that fail to deserialize or validate are logged and skipped so one
/// bad entry never takes down the rest of the catalog.
pub fn load_catalog(json: &str) -> FramekitResult<Vec<CatalogDevice>> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| FramekitError::validation(format!("catalog is not a JSON array: {e}")))?;

    let mut out = Vec::with_capacity(raw.len());
    for (i, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<CatalogDevice>(value) {
            Ok(device) => match device.validate() {
                Ok(()) => out.push(device),
                Err(e) => {
                    tracing::warn!(index = i, error = %e, "dropping invalid catalog record");
                }
            },
            Err(e) => {
                tracing::warn!(index = i, error = %e, "dropping undeserializable catalog record");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/schema.rs"]
mod tests;
