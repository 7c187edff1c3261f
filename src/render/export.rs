use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{FramekitError, FramekitResult};
use crate::render::background::Background;
use crate::render::compositor::{Compositor, RenderOptions};
use crate::scene::model::Scene;

/// Output resolution tier. Export always renders at exactly these pixel
/// dimensions, independent of the live surface size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportQuality {
    Hd,
    Fhd,
    #[default]
    Uhd4k,
    Uhd8k,
}

impl ExportQuality {
    pub fn dims(self) -> SurfaceSize {
        match self {
            Self::Hd => SurfaceSize {
                width: 1920,
                height: 1080,
            },
            Self::Fhd => SurfaceSize {
                width: 2560,
                height: 1440,
            },
            Self::Uhd4k => SurfaceSize {
                width: 3840,
                height: 2160,
            },
            Self::Uhd8k => SurfaceSize {
                width: 7680,
                height: 4320,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hd => "hd",
            Self::Fhd => "fhd",
            Self::Uhd4k => "4k",
            Self::Uhd8k => "8k",
        }
    }
}

/// Encoding of the exported surface. SVG requests rasterize to PNG; the
/// engine has no vector output path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png | Self::Svg => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }
}

/// What to export and how.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest {
    pub quality: ExportQuality,
    pub format: ExportFormat,
    /// Skip the background layer so the output carries alpha.
    pub transparent_background: bool,
    pub include_shadows: bool,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            quality: ExportQuality::default(),
            format: ExportFormat::default(),
            transparent_background: false,
            include_shadows: true,
        }
    }
}

/// An encoded export: the suggested filename plus the image bytes.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Render `scene` at the requested tier and encode it.
///
/// `live` is the interactive surface the scene was composed against; the
/// export transform scales each axis by `target / live`, so devices keep
/// their on-screen placement proportions. Annotations and selection
/// decoration are never exported.
#[tracing::instrument(skip_all, fields(quality = request.quality.label()))]
pub fn export_scene(
    compositor: &mut Compositor,
    scene: &Scene,
    background: &Background,
    live: SurfaceSize,
    request: &ExportRequest,
) -> FramekitResult<ExportedImage> {
    let target = request.quality.dims();
    let scale_x = f64::from(target.width) / f64::from(live.width);
    let scale_y = f64::from(target.height) / f64::from(live.height);

    let mut opts = RenderOptions::export(scale_x, scale_y, request.include_shadows);
    opts.include_background = !request.transparent_background;

    let w: u16 = target
        .width
        .try_into()
        .map_err(|_| FramekitError::export("export width exceeds u16"))?;
    let h: u16 = target
        .height
        .try_into()
        .map_err(|_| FramekitError::export("export height exceeds u16"))?;
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    compositor.render(scene, background, &mut pixmap, &opts)?;

    let mut straight = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_in_place(&mut straight);

    let bytes = encode(straight, target.width, target.height, request.format)?;
    let filename = format!(
        "mockup-{}-{}.{}",
        request.quality.label(),
        unix_timestamp(),
        request.format.extension()
    );

    Ok(ExportedImage {
        filename,
        width: target.width,
        height: target.height,
        bytes,
    })
}

fn encode(
    straight_rgba: Vec<u8>,
    width: u32,
    height: u32,
    format: ExportFormat,
) -> FramekitResult<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ExportFormat::Png | ExportFormat::Svg | ExportFormat::Webp => {
            let img = image::RgbaImage::from_raw(width, height, straight_rgba)
                .ok_or_else(|| FramekitError::export("rgba buffer size mismatch"))?;
            let fmt = match format {
                ExportFormat::Webp => image::ImageFormat::WebP,
                _ => image::ImageFormat::Png,
            };
            img.write_to(&mut Cursor::new(&mut out), fmt)
                .map_err(|e| FramekitError::export(format!("encode failed: {e}")))?;
        }
        ExportFormat::Jpeg => {
            // JPEG carries no alpha: flatten over white.
            let mut rgb = Vec::with_capacity((width as usize) * (height as usize) * 3);
            for px in straight_rgba.chunks_exact(4) {
                let a = u16::from(px[3]);
                for c in &px[..3] {
                    rgb.push(((u16::from(*c) * a + 255 * (255 - a)) / 255) as u8);
                }
            }
            let mut enc =
                image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), 95);
            enc.encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
                .map_err(|e| FramekitError::export(format!("jpeg encode failed: {e}")))?;
        }
    }
    Ok(out)
}

/// Straight alpha from premultiplied, in place.
pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
