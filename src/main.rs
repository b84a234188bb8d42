use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use smile_studio::api;
use smile_studio::assets::AssetLoader;
use smile_studio::models::{AppConfig, ViewMode};
use smile_studio::server;

#[derive(Parser)]
#[command(name = "smile-studio")]
#[command(about = "Smile design preview server with whitening and brightness adjustments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply adjustments to a photo and write a PNG
    Render {
        /// Input photo (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Start from a preset (name or slug, e.g. "hollywood-smile")
        #[arg(short, long)]
        preset: Option<String>,

        /// Teeth whitening percentage (0-100)
        #[arg(long)]
        whitening: Option<i64>,

        /// Alignment percentage (0-100)
        #[arg(long)]
        alignment: Option<i64>,

        /// Gum line percentage (0-100)
        #[arg(long)]
        gum: Option<i64>,

        /// Tooth shape percentage (0-100)
        #[arg(long)]
        tooth_shape: Option<i64>,

        /// Smile brightness percentage (0-100)
        #[arg(long)]
        brightness: Option<i64>,

        /// Frame to write: "after", "before" or "split"
        #[arg(long, default_value = "after")]
        view: String,

        /// Split position for the split view (0.0-1.0)
        #[arg(long)]
        split: Option<f32>,
    },
    /// List the configured presets
    Presets,
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smile Studio API",
        description = "Smile design preview: whitening, brightness and before/after comparison",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_presets,
        api::handle_adjustments,
        api::handle_upload,
        api::handle_delete_photo,
        api::handle_session,
        api::handle_replace_adjustments,
        api::handle_set_adjustment,
        api::handle_apply_preset,
        api::handle_reset,
        api::handle_preview,
        api::handle_download,
    ),
    components(schemas(
        api::PresetResponse,
        api::AdjustmentInfo,
        api::UploadResponse,
        api::SessionResponse,
        api::SetAdjustmentRequest,
    )),
    tags(
        (name = "Catalog", description = "Presets and adjustment sliders"),
        (name = "Photo", description = "Photo upload and disposal"),
        (name = "Session", description = "Adjustment state of an uploaded photo"),
        (name = "Rendering", description = "Preview frames and export")
    )
)]
struct ApiDoc;

/// Slider values given on the command line
struct SliderArgs {
    whitening: Option<i64>,
    alignment: Option<i64>,
    gum: Option<i64>,
    tooth_shape: Option<i64>,
    brightness: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            preset,
            whitening,
            alignment,
            gum,
            tooth_shape,
            brightness,
            view,
            split,
        }) => run_render_command(
            &input,
            &output,
            preset.as_deref(),
            SliderArgs {
                whitening,
                alignment,
                gum,
                tooth_shape,
                brightness,
            },
            &view,
            split,
        ),
        Some(Commands::Presets) => run_presets_command(),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smile_studio=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Render a photo directly to a PNG file (no server needed)
fn run_render_command(
    input: &Path,
    output: &Path,
    preset: Option<&str>,
    sliders: SliderArgs,
    view: &str,
    split: Option<f32>,
) -> anyhow::Result<()> {
    use smile_filters::AdjustmentId;
    use smile_studio::rendering::{decode_photo, encode_png, Compositor, PhotoFormat};

    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);
    let catalog = config.preset_catalog()?;

    let view = ViewMode::parse(Some(view), split).map_err(|e| anyhow::anyhow!(e))?;

    let mut params = match preset {
        Some(name) => {
            catalog
                .find(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown preset: {name}"))?
                .params
        }
        None => Default::default(),
    };
    let overrides = [
        (AdjustmentId::Whitening, sliders.whitening),
        (AdjustmentId::Alignment, sliders.alignment),
        (AdjustmentId::Gum, sliders.gum),
        (AdjustmentId::ToothShape, sliders.tooth_shape),
        (AdjustmentId::Brightness, sliders.brightness),
    ];
    for (id, value) in overrides {
        if let Some(value) = value {
            params.set(id, value)?;
        }
    }

    let format = PhotoFormat::from_path(input)?;
    let bytes = std::fs::read(input)?;
    let source = decode_photo(&bytes, format, config.upload, config.canvas)?;

    let compositor = Compositor::with_fonts(loader.get_fonts());
    let frame = compositor.render_frame(&source, &params, view, None)?;
    let png_bytes = encode_png(&frame)?;

    std::fs::write(output, &png_bytes)?;
    println!(
        "Rendered {} ({}x{}, {} view, {} bytes)",
        output.display(),
        frame.width(),
        frame.height(),
        view.name(),
        png_bytes.len()
    );

    Ok(())
}

/// Print the preset catalog
fn run_presets_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let catalog = config.preset_catalog()?;

    for preset in catalog.iter() {
        println!("{} ({})", preset.name, preset.slug);
        println!("  {}", preset.description);
        let values: Vec<String> = preset
            .params
            .iter()
            .map(|(id, value)| format!("{id}={value}"))
            .collect();
        println!("  {}", values.join(" "));
    }

    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} (exists, use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let fonts_dir = std::env::var("FONTS_DIR").ok();

    println!("Smile Studio v{VERSION}\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  FONTS_DIR   = {}",
        fonts_dir.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  smile-studio serve     Start the HTTP server");
    println!("  smile-studio render    Apply adjustments to a photo");
    println!("  smile-studio presets   List presets");
    println!("  smile-studio init      Extract config.yaml");
    println!("\nRun 'smile-studio --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smile_studio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        config = ?asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Smile Studio listening");

    axum::serve(listener, app).await?;

    Ok(())
}
