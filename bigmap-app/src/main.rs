use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bigmap::{
    constants::{DEFAULT_CENTER, DEFAULT_LAYER, DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM},
    prelude::*,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Turns a map view into a tile-grid request")]
struct Cli {
    /// Provider file (`.json` or providers CSV)
    #[arg(long, default_value = "bigmap-app/providers.csv")]
    providers: PathBuf,

    /// Latitude of the view center
    #[arg(long, default_value_t = DEFAULT_CENTER.0, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the view center
    #[arg(long, default_value_t = DEFAULT_CENTER.1, allow_hyphen_values = true)]
    lng: f64,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: u8,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_SIZE.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_SIZE.1)]
    height: f64,

    /// Additional layer to switch on in the layers control (repeatable)
    #[arg(long = "layer")]
    layers: Vec<String>,

    /// Layer that is on when the map is built
    #[arg(long, default_value = DEFAULT_LAYER)]
    default_layer: String,

    /// Switch the default layer off again before submitting
    #[arg(long, default_value_t = false)]
    hide_default: bool,

    /// Log filter, e.g. `debug` or `bigmap=trace`; falls back to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Print the submission, navigation and tile plan as one JSON document
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let specs = load_providers(&cli.providers)
        .with_context(|| format!("cannot load providers from {}", cli.providers.display()))?;
    log::debug!(
        "{} providers: {:?}",
        specs.len(),
        specs.iter().map(|spec| spec.name.as_str()).collect::<Vec<_>>()
    );

    let mut context = MapBuilder::new()
        .with_layers(specs)
        .with_center_and_zoom(LatLng::new(cli.lat, cli.lng), cli.zoom)
        .with_size(Point::new(cli.width, cli.height))
        .with_default_layer(&cli.default_layer)
        .build()
        .context("cannot initialize the map")?;

    {
        let map = context.map_mut();
        for name in &cli.layers {
            if !map.has_layer(name) {
                log::debug!("switching on layer '{}'", name);
                map.toggle_layer(name)?;
            }
        }
        if cli.hide_default && map.has_layer(&cli.default_layer) {
            log::debug!("switching off default layer '{}'", cli.default_layer);
            map.toggle_layer(&cli.default_layer)?;
        }
    }

    let mut form = FormFields::tile_request();
    context.sync_form(&mut form)?;

    let request = context
        .request_from_query(&form.to_query())
        .context("the submitted form was rejected")?;
    log::info!(
        "submitted {} at zoom {}: {} tiles",
        request.provider,
        request.zoom,
        request.range.tile_count()
    );
    let navigation = context.navigation(&request)?;
    let plan = context.plan(&request)?;

    if cli.json {
        let document = serde_json::json!({
            "form": context.snapshot(),
            "request": request,
            "navigation": navigation,
            "plan": plan,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("Form");
    for name in form.names() {
        println!("  {:<8} = {}", name, form.get(name).unwrap_or_default());
    }
    println!("  query    : {}", form.to_query());

    println!();
    println!(
        "Request: {} zoom {} x {}..{} y {}..{} scale {}",
        request.provider,
        request.zoom,
        request.range.xmin,
        request.range.xmax,
        request.range.ymin,
        request.range.ymax,
        request.scale
    );

    println!();
    println!("Navigation");
    for (label, link) in navigation.links() {
        match link {
            Some(link) => println!("  {:<15} {}", label, link.to_query()),
            None => println!("  {:<15} -", label),
        }
    }

    println!();
    println!(
        "Plan: {}x{} tiles, {}x{} px",
        plan.width_tiles,
        plan.height_tiles,
        plan.width_px(),
        plan.height_px()
    );
    for tile in &plan.tiles {
        println!("  +{}+{} {}", tile.left, tile.top, tile.url);
    }

    Ok(())
}
