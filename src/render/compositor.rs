use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Ellipse, Point, Rect, RoundedRect, Shape, Stroke, Vec2};

use crate::assets::color::Color;
use crate::assets::store::{PreparedImage, TemplateStore};
use crate::foundation::error::{FramekitError, FramekitResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::render::background::{Background, PatternKind, TileStyle, gradient_pixels};
use crate::render::blur::blur_premul_rgba8;
use crate::render::text::TextLayoutEngine;
use crate::scene::hit::annotation_bounds;
use crate::scene::model::{Annotation, Device, Scene, Viewport};
use crate::scene::transform::{device_transform, frame_rect};

/// Selection decoration accent.
const SELECTION_COLOR: Color = Color::rgb(59, 130, 246);

/// Placeholder frame fill when a template is unavailable.
const PLACEHOLDER_FILL: Color = Color::rgb(224, 224, 224);

/// Placeholder device-name text color.
const PLACEHOLDER_TEXT: Color = Color::rgb(102, 102, 102);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    start: Color,
    end: Color,
    direction: crate::render::background::GradientDirection,
    w: u32,
    h: u32,
}

/// One full scene rasterization: which layers to paint and the outer
/// transform mapping model space onto the target surface.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Outer transform applied to devices and annotations: the viewport
    /// affine for preview, the target/live scale for export.
    pub outer: Affine,
    /// Zoom used to keep selection stroke widths constant on screen.
    pub zoom: f64,
    /// Paint the background layer.
    pub include_background: bool,
    /// Paint device shadows.
    pub include_shadows: bool,
    /// Paint annotations.
    pub include_annotations: bool,
    /// Paint selection decoration.
    pub include_selection: bool,
}

impl RenderOptions {
    /// Options for the interactive preview: everything on, viewport applied.
    pub fn preview(viewport: &Viewport) -> Self {
        Self {
            outer: viewport.to_affine(),
            zoom: viewport.zoom,
            include_background: true,
            include_shadows: true,
            include_annotations: true,
            include_selection: true,
        }
    }

    /// Options for an export pass: no annotations, no selection, viewport
    /// replaced by an independent X/Y scale.
    pub fn export(scale_x: f64, scale_y: f64, include_shadows: bool) -> Self {
        Self {
            outer: Affine::scale_non_uniform(scale_x, scale_y),
            zoom: 1.0,
            include_background: true,
            include_shadows,
            include_annotations: false,
            include_selection: false,
        }
    }
}

/// Walks the scene in fixed layer order — background, devices ascending,
/// annotations ascending, selection — and rasterizes it onto a target
/// pixmap.
///
/// Each layer renders into a scratch surface which is composited onto the
/// destination with premultiplied source-over, so mid-stack CPU effects
/// (shadow blur) slot in between vello passes. A failed template load paints
/// a placeholder and never aborts the frame.
pub struct Compositor {
    templates: TemplateStore,
    text: TextLayoutEngine,
    font: Option<FontSlot>,
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
    image_cache: HashMap<usize, (Arc<PreparedImage>, vello_cpu::Image)>,
    tile_cache: HashMap<(PatternKind, Color), vello_cpu::Image>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

struct FontSlot {
    data: vello_cpu::peniko::FontData,
    bytes: Vec<u8>,
}

impl Compositor {
    /// Create a compositor over a template store. No font is configured;
    /// text annotations will paint their background plates only.
    pub fn new(templates: TemplateStore) -> Self {
        Self {
            templates,
            text: TextLayoutEngine::new(),
            font: None,
            ctx: None,
            scratch: None,
            image_cache: HashMap::new(),
            tile_cache: HashMap::new(),
            gradient_cache: HashMap::new(),
        }
    }

    /// Configure the font used for annotation text and placeholder labels.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        self.font = Some(FontSlot { data, bytes });
        self
    }

    /// Access the underlying template store.
    pub fn templates_mut(&mut self) -> &mut TemplateStore {
        &mut self.templates
    }

    /// Rasterize `scene` onto `target`.
    ///
    /// The target is cleared to transparent first; callers wanting an opaque
    /// result paint a background (the default options do).
    #[tracing::instrument(skip_all, fields(devices = scene.devices.len()))]
    pub fn render(
        &mut self,
        scene: &Scene,
        background: &Background,
        target: &mut vello_cpu::Pixmap,
        opts: &RenderOptions,
    ) -> FramekitResult<()> {
        target.data_as_u8_slice_mut().fill(0);

        if opts.include_background {
            let (w, h) = (f64::from(target.width()), f64::from(target.height()));
            self.pass(target, |this, ctx| {
                this.draw_background(ctx, background, w, h)
            })?;
        }

        for device in &scene.devices {
            let placed = device_transform(device);
            let transform = opts.outer * placed.affine;

            if opts.include_shadows && device.shadow.enabled && device.shadow.intensity > 0.0 {
                self.shadow_pass(device, opts.outer, placed.affine, target)?;
            }
            self.pass(target, |this, ctx| {
                this.draw_device(ctx, device, transform, placed.brightness)
            })?;
        }

        if opts.include_annotations && !scene.annotations.is_empty() {
            self.pass(target, |this, ctx| {
                for annotation in &scene.annotations {
                    this.draw_annotation(ctx, annotation, opts.outer)?;
                }
                Ok(())
            })?;
        }

        if opts.include_selection {
            self.selection_pass(scene, target, opts)?;
        }

        Ok(())
    }

    // ---- pass plumbing -------------------------------------------------

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> FramekitResult<R>,
    ) -> FramekitResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn take_scratch(&mut self, width: u16, height: u16) -> vello_cpu::Pixmap {
        match self.scratch.take() {
            Some(pm) if pm.width() == width && pm.height() == height => pm,
            _ => vello_cpu::Pixmap::new(width, height),
        }
    }

    /// Render one layer into the scratch surface and composite it over the
    /// target.
    fn pass(
        &mut self,
        target: &mut vello_cpu::Pixmap,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> FramekitResult<()>,
    ) -> FramekitResult<()> {
        let (w, h) = (target.width(), target.height());
        let mut scratch = self.take_scratch(w, h);
        scratch.data_as_u8_slice_mut().fill(0);

        self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            f(this, ctx)?;
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
            Ok(())
        })?;

        premul_over_in_place(target.data_as_u8_slice_mut(), scratch.data_as_u8_slice())?;
        self.scratch = Some(scratch);
        Ok(())
    }

    // ---- background ----------------------------------------------------

    fn draw_background(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        background: &Background,
        w: f64,
        h: f64,
    ) -> FramekitResult<()> {
        let full = Rect::new(0.0, 0.0, w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match background {
            Background::Solid(color) => {
                ctx.set_paint(color_to_paint(*color));
                ctx.fill_rect(&rect_to_cpu(full));
            }
            Background::Gradient {
                start,
                end,
                direction,
            } => {
                let key = GradientKey {
                    start: *start,
                    end: *end,
                    direction: *direction,
                    w: w as u32,
                    h: h as u32,
                };
                let img = match self.gradient_cache.get(&key) {
                    Some(img) => img.clone(),
                    None => {
                        let pixels = gradient_pixels(*start, *end, *direction, key.w, key.h);
                        let img = rgba_premul_to_image(&pixels, key.w, key.h)?;
                        self.gradient_cache.insert(key, img.clone());
                        img
                    }
                };
                ctx.set_paint(img);
                ctx.fill_rect(&rect_to_cpu(full));
            }
            Background::Image { image, fallback } => match image {
                Some(image) => {
                    // Cover-scaling fills the surface; overflow falls off its
                    // edges, so no clip is needed here.
                    let paint = self.image_paint(image)?;
                    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
                    ctx.set_transform(affine_to_cpu(cover_transform(full, iw, ih)));
                    ctx.set_paint(paint);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                }
                None => {
                    ctx.set_paint(color_to_paint(*fallback));
                    ctx.fill_rect(&rect_to_cpu(full));
                }
            },
            Background::Pattern {
                kind,
                foreground,
                base,
            } => {
                ctx.set_paint(color_to_paint(*base));
                ctx.fill_rect(&rect_to_cpu(full));

                let tile = self.tile_image(*kind, *foreground)?;
                let (tw, th) = kind.tile_size();
                let (tw, th) = (f64::from(tw), f64::from(th));
                let cols = (w / tw).ceil() as u32;
                let rows = (h / th).ceil() as u32;
                ctx.set_paint(tile);
                for row in 0..rows {
                    for col in 0..cols {
                        let offset =
                            Affine::translate((f64::from(col) * tw, f64::from(row) * th));
                        ctx.set_transform(affine_to_cpu(offset));
                        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, tw, th));
                    }
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            }
        }
        Ok(())
    }

    /// Rasterize a pattern tile once and cache it per (kind, color).
    fn tile_image(
        &mut self,
        kind: PatternKind,
        foreground: Color,
    ) -> FramekitResult<vello_cpu::Image> {
        if let Some(img) = self.tile_cache.get(&(kind, foreground)) {
            return Ok(img.clone());
        }

        let geometry = kind.tile_geometry();
        let mut ctx = vello_cpu::RenderContext::new(geometry.width, geometry.height);
        ctx.set_paint(color_to_paint(foreground));
        for shape in &geometry.shapes {
            match shape.style {
                TileStyle::Fill => ctx.fill_path(&bezpath_to_cpu(&shape.path)),
                TileStyle::Stroke(width) => {
                    let expanded = expand_stroke(&shape.path, &Stroke::new(width));
                    ctx.fill_path(&bezpath_to_cpu(&expanded));
                }
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(geometry.width, geometry.height);
        ctx.render_to_pixmap(&mut pixmap);

        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.tile_cache.insert((kind, foreground), img.clone());
        Ok(img)
    }

    // ---- devices -------------------------------------------------------

    /// Gaussian-blurred shadow rectangle, composited beneath the device
    /// frame.
    fn shadow_pass(
        &mut self,
        device: &Device,
        outer: Affine,
        placed: Affine,
        target: &mut vello_cpu::Pixmap,
    ) -> FramekitResult<()> {
        let (w, h) = (target.width(), target.height());
        let mut scratch = self.take_scratch(w, h);
        scratch.data_as_u8_slice_mut().fill(0);

        let shadow = device.shadow;
        // Offset in model space so exports scale it with the device.
        let offset = Affine::translate((shadow.distance, shadow.distance));
        let frame = frame_rect(&device.info);
        let fill = Color::BLACK.with_alpha(shadow.intensity.clamp(0.0, 1.0));

        self.with_ctx_mut(w, h, |_, ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_transform(affine_to_cpu(outer * offset * placed));
            ctx.set_paint(color_to_paint(fill));
            ctx.fill_rect(&rect_to_cpu(frame));
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
            Ok(())
        })?;

        let blurred = blur_premul_rgba8(
            scratch.data_as_u8_slice(),
            u32::from(w),
            u32::from(h),
            shadow.blur.max(0.0).round() as u32,
        )?;
        premul_over_in_place(target.data_as_u8_slice_mut(), &blurred)?;
        self.scratch = Some(scratch);
        Ok(())
    }

    fn draw_device(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        device: &Device,
        transform: Affine,
        brightness: f32,
    ) -> FramekitResult<()> {
        let dimmed = brightness < 1.0;
        if dimmed {
            ctx.push_opacity_layer(brightness);
        }

        let template = self.templates.get_or_load(&device.catalog_id);
        match template {
            Some(template) => {
                self.draw_frame(ctx, device, &template, transform)?;
                self.draw_screen_image(ctx, device, transform)?;
            }
            None => self.draw_placeholder(ctx, device, transform)?,
        }

        if dimmed {
            ctx.pop_layer();
        }
        Ok(())
    }

    /// Paint the frame template into the device's frame rect, with the
    /// optional tint composite: template → multiply tint fill →
    /// destination-over template, so silhouette edges stay crisp.
    fn draw_frame(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        device: &Device,
        template: &Arc<PreparedImage>,
        transform: Affine,
    ) -> FramekitResult<()> {
        use vello_cpu::peniko::{BlendMode, Compose, Mix};

        let frame = frame_rect(&device.info);
        let paint = self.image_paint(template)?;
        let (tw, th) = (f64::from(template.width), f64::from(template.height));
        let into_frame = transform
            * Affine::translate((frame.x0, frame.y0))
            * Affine::scale_non_uniform(frame.width() / tw, frame.height() / th);

        let draw_template = |ctx: &mut vello_cpu::RenderContext| {
            ctx.set_transform(affine_to_cpu(into_frame));
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, tw, th));
        };

        draw_template(ctx);

        let tint = device.frame_color.filter(|c| !c.is_identity_tint());
        if let Some(tint) = tint {
            ctx.set_blend_mode(BlendMode::new(Mix::Multiply, Compose::SrcOver));
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(color_to_paint(tint));
            ctx.fill_rect(&rect_to_cpu(frame));

            ctx.set_blend_mode(BlendMode::new(Mix::Normal, Compose::DestOver));
            draw_template(ctx);
            ctx.set_blend_mode(BlendMode::default());
        }
        Ok(())
    }

    /// Clip to the device's screen sub-rectangle and paint the user image
    /// cover-scaled and centered.
    fn draw_screen_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        device: &Device,
        transform: Affine,
    ) -> FramekitResult<()> {
        let (Some(image), Some(screen)) = (&device.screen_image, device.info.screen) else {
            return Ok(());
        };

        // Screen rect is frame-local with a top-left origin; the frame is
        // centered at the local origin.
        let frame = frame_rect(&device.info);
        let screen = Rect::new(
            screen.x0 + frame.x0,
            screen.y0 + frame.y0,
            screen.x1 + frame.x0,
            screen.y1 + frame.y0,
        );

        let paint = self.image_paint(image)?;
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));

        // Cover-scale via the paint transform and fill only the screen rect,
        // so the overflow is cropped without a clip layer.
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(affine_to_cpu(cover_transform(screen, iw, ih)));
        ctx.set_paint(paint);
        ctx.fill_rect(&rect_to_cpu(screen));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Neutral stand-in for a missing template: a filled frame rect with the
    /// device name centered (when a font is configured).
    fn draw_placeholder(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        device: &Device,
        transform: Affine,
    ) -> FramekitResult<()> {
        let frame = frame_rect(&device.info);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(color_to_paint(PLACEHOLDER_FILL));
        ctx.fill_rect(&rect_to_cpu(frame));

        let outline = expand_stroke(&frame.to_path(0.1), &Stroke::new(2.0));
        ctx.set_paint(color_to_paint(PLACEHOLDER_TEXT));
        ctx.fill_path(&bezpath_to_cpu(&outline));

        let font_size = (device.info.width / 12.0).clamp(16.0, 64.0);
        self.draw_text_run(
            ctx,
            &device.info.name,
            font_size,
            PLACEHOLDER_TEXT,
            transform,
            TextAnchor::Centered(frame.center()),
        )
    }

    // ---- annotations ---------------------------------------------------

    fn draw_annotation(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        annotation: &Annotation,
        outer: Affine,
    ) -> FramekitResult<()> {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_transform(affine_to_cpu(outer));

        match annotation {
            Annotation::Text(t) => {
                if t.background.a > 0 {
                    let plate = annotation_bounds(annotation);
                    let rounded = RoundedRect::from_rect(plate, t.corner_radius.max(0.0));
                    ctx.set_paint(color_to_paint(t.background));
                    ctx.fill_path(&bezpath_to_cpu(&rounded.to_path(0.1)));
                }
                self.draw_text_run(
                    ctx,
                    &t.text,
                    t.font_size,
                    t.color,
                    outer,
                    TextAnchor::Baseline(Point::new(t.x, t.y)),
                )?;
            }
            Annotation::Rectangle(r) => {
                let rect = Rect::new(r.x, r.y, r.x + r.width, r.y + r.height);
                let rounded = RoundedRect::from_rect(rect, r.corner_radius.max(0.0));
                let path = rounded.to_path(0.1);
                if r.fill.a > 0 {
                    ctx.set_paint(color_to_paint(r.fill));
                    ctx.fill_path(&bezpath_to_cpu(&path));
                }
                if r.stroke_width > 0.0 && r.stroke.a > 0 {
                    let outline = expand_stroke(&path, &Stroke::new(r.stroke_width));
                    ctx.set_paint(color_to_paint(r.stroke));
                    ctx.fill_path(&bezpath_to_cpu(&outline));
                }
            }
            Annotation::Circle(c) => {
                let center = Point::new(c.x + c.width / 2.0, c.y + c.height / 2.0);
                let ellipse = Ellipse::new(center, (c.width / 2.0, c.height / 2.0), 0.0);
                let path = ellipse.to_path(0.1);
                if c.fill.a > 0 {
                    ctx.set_paint(color_to_paint(c.fill));
                    ctx.fill_path(&bezpath_to_cpu(&path));
                }
                if c.stroke_width > 0.0 && c.stroke.a > 0 {
                    let outline = expand_stroke(&path, &Stroke::new(c.stroke_width));
                    ctx.set_paint(color_to_paint(c.stroke));
                    ctx.fill_path(&bezpath_to_cpu(&outline));
                }
            }
            Annotation::Arrow(a) => {
                let mut shaft = BezPath::new();
                shaft.move_to(a.start);
                shaft.line_to(a.end);
                let expanded = expand_stroke(&shaft, &Stroke::new(a.stroke_width.max(0.5)));
                ctx.set_paint(color_to_paint(a.color));
                ctx.fill_path(&bezpath_to_cpu(&expanded));
                ctx.fill_path(&bezpath_to_cpu(&arrow_head(a.start, a.end, a.head_size)));
            }
        }
        Ok(())
    }

    // ---- selection -----------------------------------------------------

    fn selection_pass(
        &mut self,
        scene: &Scene,
        target: &mut vello_cpu::Pixmap,
        opts: &RenderOptions,
    ) -> FramekitResult<()> {
        let selected = scene
            .selected_device()
            .and_then(|id| scene.device(id))
            .map(|d| (d.bounds(), true))
            .or_else(|| {
                scene
                    .selected_annotation()
                    .and_then(|id| scene.annotation(id))
                    .map(|a| (annotation_bounds(a), false))
            });
        let Some((bounds, with_handles)) = selected else {
            return Ok(());
        };

        let outer = opts.outer;
        let zoom = opts.zoom.max(f64::EPSILON);
        self.pass(target, |_, ctx| {
            ctx.set_transform(affine_to_cpu(outer));
            ctx.set_paint(color_to_paint(SELECTION_COLOR));

            // Dashes and widths divide by zoom so they render at constant
            // screen thickness.
            let dashed = Stroke::new(2.0 / zoom).with_dashes(0.0, [6.0 / zoom, 4.0 / zoom]);
            let outline = expand_stroke(&bounds.to_path(0.1), &dashed);
            ctx.fill_path(&bezpath_to_cpu(&outline));

            if with_handles {
                let handle = 8.0 / zoom;
                for corner in [
                    Point::new(bounds.x0, bounds.y0),
                    Point::new(bounds.x1, bounds.y0),
                    Point::new(bounds.x0, bounds.y1),
                    Point::new(bounds.x1, bounds.y1),
                ] {
                    let square = Rect::from_center_size(corner, (handle, handle));
                    ctx.fill_rect(&rect_to_cpu(square));
                }
            }
            Ok(())
        })
    }

    // ---- text + paints -------------------------------------------------

    fn draw_text_run(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        font_size: f64,
        color: Color,
        outer: Affine,
        anchor: TextAnchor,
    ) -> FramekitResult<()> {
        let Some(font) = &self.font else {
            // No font configured: text degrades to its surrounding shapes.
            return Ok(());
        };
        if text.is_empty() {
            return Ok(());
        }

        let layout = self
            .text
            .layout_plain(text, &font.bytes, font_size as f32, color)?;
        let origin = match anchor {
            TextAnchor::Baseline(p) => Point::new(p.x, p.y - font_size),
            TextAnchor::Centered(center) => Point::new(
                center.x - f64::from(layout.width()) / 2.0,
                center.y - f64::from(layout.height()) / 2.0,
            ),
        };
        ctx.set_transform(affine_to_cpu(outer * Affine::translate(origin.to_vec2())));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(color_to_paint(brush));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn image_paint(&mut self, image: &Arc<PreparedImage>) -> FramekitResult<vello_cpu::Image> {
        let key = Arc::as_ptr(image) as usize;
        if let Some((_, paint)) = self.image_cache.get(&key) {
            return Ok(paint.clone());
        }
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        self.image_cache
            .insert(key, (Arc::clone(image), paint.clone()));
        Ok(paint)
    }
}

enum TextAnchor {
    /// Baseline-left anchor in model space.
    Baseline(Point),
    /// Center the whole layout on a model-space point.
    Centered(Point),
}

/// The transform that cover-scales an `iw`×`ih` image onto `rect`: uniform
/// scale `max(rect.w/iw, rect.h/ih)`, centered, overflow cropped by the
/// caller's clip.
fn cover_transform(rect: Rect, iw: f64, ih: f64) -> Affine {
    let scale = (rect.width() / iw).max(rect.height() / ih);
    let offset = Vec2::new(
        rect.center().x - iw * scale / 2.0,
        rect.center().y - ih * scale / 2.0,
    );
    Affine::translate(offset) * Affine::scale(scale)
}

/// Filled arrowhead triangle at the end point, oriented along the shaft.
fn arrow_head(start: Point, end: Point, size: f64) -> BezPath {
    let dir = end - start;
    let len = dir.hypot();
    let u = if len > f64::EPSILON {
        dir / len
    } else {
        Vec2::new(1.0, 0.0)
    };
    let perp = Vec2::new(-u.y, u.x);
    let size = size.max(1.0);

    let base = end - u * size;
    let mut head = BezPath::new();
    head.move_to(end);
    head.line_to(base + perp * (size / 2.0));
    head.line_to(base - perp * (size / 2.0));
    head.close_path();
    head
}

/// Expand a stroked path into a fill path; dashing comes from the stroke
/// style.
pub(crate) fn expand_stroke(path: &BezPath, style: &Stroke) -> BezPath {
    kurbo::stroke(
        path.elements().iter().copied(),
        style,
        &kurbo::StrokeOpts::default(),
        0.1,
    )
}

fn color_to_paint(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Premultiplied source-over of `src` onto `dst`, in place.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> FramekitResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(FramekitError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3] as u16;
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = add_sat_u8(sa as u8, mul_div255_u8(d[3] as u16, inv));
        for c in 0..3 {
            let dc = mul_div255_u8(d[c] as u16, inv);
            d[c] = add_sat_u8(s[c], dc);
        }
    }
    Ok(())
}

/// Build a paint image from premultiplied RGBA8 bytes.
fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> FramekitResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramekitError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramekitError::render("pixmap height exceeds u16"))?;
    if bytes_premul.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FramekitError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes_premul.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
