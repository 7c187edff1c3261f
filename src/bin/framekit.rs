use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use framekit::{
    Background, Compositor, DirResolver, ExportFormat, ExportQuality, ExportRequest, Point, Scene,
    SurfaceSize, TemplateStore, export_scene, load_catalog, load_user_image,
};

#[derive(Parser, Debug)]
#[command(name = "framekit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a device catalog JSON file and report what loads.
    Catalog(CatalogArgs),
    /// Compose one device mockup and export it as an image.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Catalog JSON path.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Catalog JSON path.
    #[arg(long)]
    catalog: PathBuf,

    /// Device id from the catalog.
    #[arg(long)]
    device: String,

    /// Directory holding `{device_id}.png` frame templates.
    #[arg(long)]
    templates: PathBuf,

    /// Screenshot to composite into the device screen.
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Resolution tier: hd, fhd, 4k, or 8k.
    #[arg(long, default_value = "4k")]
    quality: String,

    /// Export without a background, keeping alpha.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Catalog(args) => cmd_catalog(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read catalog '{}'", args.in_path.display()))?;
    let devices = load_catalog(&json)?;
    println!("{} device(s) loaded", devices.len());
    for device in &devices {
        println!(
            "  {} — {} ({} orientation(s))",
            device.device_id,
            device.name,
            device.orientations.len()
        );
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.catalog)
        .with_context(|| format!("read catalog '{}'", args.catalog.display()))?;
    let devices = load_catalog(&json)?;
    let catalog_device = devices
        .iter()
        .find(|d| d.device_id == args.device)
        .with_context(|| format!("device '{}' not in catalog", args.device))?;

    let live = SurfaceSize::new(1280, 720)?;
    let center = Point::new(f64::from(live.width) / 2.0, f64::from(live.height) / 2.0);
    let mut scene = Scene::default();
    let id = scene.add_device(args.device.clone(), catalog_device.info(), center);
    if let Some(path) = &args.screenshot {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read screenshot '{}'", path.display()))?;
        let image = load_user_image(&bytes)?;
        if let Some(device) = scene.device_mut(id) {
            device.screen_image = Some(image);
        }
    }
    if let Some(device) = scene.device_mut(id) {
        let fit = (f64::from(live.height) * 0.8 / device.info.height).min(1.0);
        device.set_scale(fit);
        device.shadow.enabled = true;
    }

    let quality = match args.quality.as_str() {
        "hd" => ExportQuality::Hd,
        "fhd" => ExportQuality::Fhd,
        "4k" => ExportQuality::Uhd4k,
        "8k" => ExportQuality::Uhd8k,
        other => anyhow::bail!("unknown quality '{other}' (expected hd, fhd, 4k, or 8k)"),
    };
    let format = match args.out.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => ExportFormat::Jpeg,
        Some("webp") => ExportFormat::Webp,
        _ => ExportFormat::Png,
    };
    let request = ExportRequest {
        quality,
        format,
        transparent_background: args.transparent,
        include_shadows: true,
    };

    let store = TemplateStore::new(DirResolver::new(&args.templates));
    let mut compositor = Compositor::new(store);
    let exported = export_scene(
        &mut compositor,
        &scene,
        &Background::default(),
        live,
        &request,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &exported.bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        exported.width,
        exported.height
    );
    Ok(())
}
