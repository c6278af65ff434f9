use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use listing_map::browser::PagePreview;
use listing_map::config::AppConfig;
use listing_map::controller::{MapController, MapEvent};
use listing_map::form::NoticeForm;
use listing_map::generator::{ListingSource, RandomSource, SnapshotSource};
use listing_map::models::Session;
use listing_map::output::{SessionWriter, PREVIEW_FILE};
use listing_map::render;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a map of random rental listings", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of listings to generate
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible listings
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Replay listings from an exported listings.json instead of generating
    #[arg(long)]
    from: Option<PathBuf>,

    /// Open the details dialog for this pin before rendering
    #[arg(short, long)]
    activate: Option<usize>,

    /// Capture a screenshot of the page with headless Chrome
    #[arg(long)]
    screenshot: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(count) = args.count {
        config.generator.count = count;
    }
    if args.seed.is_some() {
        config.generator.seed = args.seed;
    }
    if let Some(out) = args.out {
        config.output.dir = out;
    }
    config.output.screenshot |= args.screenshot;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🗺️  Listing Map");
    info!("==============");

    let source: Box<dyn ListingSource> = match args.from {
        Some(path) => Box::new(SnapshotSource::new(path)),
        None => Box::new(RandomSource::new(config.generator.clone())),
    };
    let listings = source.load().await?;
    let session = Session {
        source: source.source_name().to_string(),
        generated_at: Utc::now(),
        listings: listings.clone(),
    };

    let mut map = MapController::new(listings);
    if let Some(index) = args.activate {
        let state = map.dispatch(MapEvent::PinClick(index))?;
        info!("Pin {} activated ({:?})", index, state);
    }

    let form = NoticeForm::load()?;
    let page = render::render_page(&map, &form)?;

    info!("\n✅ {} listings on the map\n", map.listings().len());
    for (i, listing) in map.listings().iter().enumerate() {
        let offer = &listing.offer;
        println!("{}. {} ({} ₽/ночь)", i + 1, offer.title, offer.price);
        println!("   {} · {} rooms, {} guests", offer.kind.label(), offer.rooms, offer.guests);
        println!("   Address: {}", offer.address);
        println!("   Check-in {} / check-out {}", offer.checkin, offer.checkout);
        println!("   Features: {}", offer.features.join(", "));
        println!();
    }

    let writer = SessionWriter::new(&config.output.dir);
    let files = writer.write(&session, &page).await?;

    if config.output.screenshot {
        let target = writer.dir().join(PREVIEW_FILE);
        tokio::task::spawn_blocking(move || {
            let preview = PagePreview::new()?;
            preview.capture(&files.page, &target)
        })
        .await??;
    }

    Ok(())
}
