//! reunite: browse and inspect lost & found listings from the terminal.

mod output;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use output::{format_count, format_duration, print_hit, print_stats, Status};
use reunite_contact::{is_valid_email, is_valid_phone, mask_email, mask_phone, Viewer};
use reunite_core::config::Config;
use reunite_core::error::exit_codes;
use reunite_geo::{haversine_distance, Coordinate};
use reunite_listings::{
    fixture_items, share_url, should_auto_archive, telegram_link, time_ago, whatsapp_link,
    BrowseEngine, CategoryKey, CategoryRegistry, FallbackSource, FilterState, Item, ItemDraft,
    JsonFileSource, ListingStats, TypeFilter,
};
use reunite_telemetry::{metrics, Timer, TelemetryConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "reunite")]
#[command(about = "Browse and inspect ReUnite lost & found listings")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./reunite.toml or the user config dir)
    #[arg(long, global = true, env = "REUNITE_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and rank listings
    Browse {
        /// JSON export of listings (sample listings when omitted or unreadable)
        #[arg(long)]
        items: Option<PathBuf>,
        /// Fuzzy search text
        #[arg(short, long)]
        query: Option<String>,
        /// Item type to show
        #[arg(long = "type", default_value = "all")]
        item_type: TypeFilter,
        /// Category key; repeat to select several
        #[arg(short, long = "category")]
        categories: Vec<CategoryKey>,
        /// Search center as LAT,LON
        #[arg(long, value_parser = parse_coordinate)]
        near: Option<Coordinate>,
        /// Search radius in km (defaults to the configured radius)
        #[arg(long, requires = "near")]
        radius: Option<f64>,
        /// View as a signed-in user who revealed contact details
        #[arg(long)]
        signed_in: bool,
        /// View as this user id; their own listings show full contact details
        #[arg(long, value_name = "USER_ID")]
        owner: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List item categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Great-circle distance between two points in km
    Distance {
        /// First latitude
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// First longitude
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        /// Second latitude
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Second longitude
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
    /// Show how contact details appear to anonymous viewers
    Mask {
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Check a "post item" form saved as JSON
    Draft {
        /// Draft file
        path: PathBuf,
    },
    /// Count listings by type and status
    Stats {
        /// JSON export of listings (sample listings when omitted or unreadable)
        #[arg(long)]
        items: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build share links for a listing
    Share {
        /// Listing id
        id: String,
        /// Listing title
        #[arg(long)]
        title: String,
        /// Public origin (defaults to the configured base URL)
        #[arg(long)]
        base: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        Status::error(&format!("{err:#}"));
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    reunite_telemetry::init_with_config(
        TelemetryConfig::from(&config.schema.logging).with_verbosity(cli.verbose),
    )?;
    if let Some(path) = &config.path {
        debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::Browse {
            items,
            query,
            item_type,
            categories,
            near,
            radius,
            signed_in,
            owner,
            json,
        } => {
            let mut filter = FilterState::new().with_type(item_type);
            if let Some(query) = query {
                filter = filter.with_query(query);
            }
            for key in categories {
                filter = filter.with_category(key);
            }
            if let Some(center) = near {
                filter = filter.near(center, radius.unwrap_or(config.schema.geo.default_radius_km));
            }

            let audience = Audience { user_id: owner, revealed: signed_in };
            browse(&config, items.as_deref(), &filter, &audience, json)?;
        }

        Commands::Categories { json } => {
            let registry = CategoryRegistry::new();
            if json {
                let entries: Vec<_> = registry.iter().collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                Status::header("Categories");
                for info in &registry {
                    println!("{:<12} {:<20} {}", info.key.as_str(), info.label, info.description);
                }
            }
        }

        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            let from = Coordinate::try_new(lat1, lon1)?;
            let to = Coordinate::try_new(lat2, lon2)?;
            println!("{:.3} km", haversine_distance(&from, &to));
        }

        Commands::Mask { phone, email } => {
            if phone.is_none() && email.is_none() {
                anyhow::bail!("Nothing to mask: pass --phone and/or --email");
            }
            if let Some(phone) = phone {
                if !is_valid_phone(&phone) {
                    Status::warning(&format!("'{phone}' is not a valid phone number"));
                }
                println!("{:<6} {}", "phone", mask_phone(&phone));
            }
            if let Some(email) = email {
                if !is_valid_email(&email) {
                    Status::warning(&format!("'{email}' is not a valid email address"));
                }
                println!("{:<6} {}", "email", mask_email(&email));
            }
        }

        Commands::Draft { path } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let draft: ItemDraft = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;

            let result = draft.validate_with(config.schema.listings.max_image_bytes);
            for warning in result.warnings() {
                Status::warning(&warning.to_string());
            }
            if !result.is_valid() {
                for error in result.errors() {
                    Status::error(&error.to_string());
                }
                return Err(reunite_core::Error::validation(format!(
                    "{} in {}",
                    format_count(result.errors().len(), "problem", "problems"),
                    path.display()
                ))
                .into());
            }
            Status::success(&format!("{} is ready to post", draft.name.trim()));
        }

        Commands::Stats { items, json } => {
            let items = load_items(items.as_deref());
            let stats = ListingStats::from_items(&items);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                Status::header("Listings");
                print_stats(&stats);
            }
        }

        Commands::Share { id, title, base } => {
            let base = base.unwrap_or_else(|| config.schema.general.base_url.clone());
            println!("{:<9} {}", "url", share_url(&base, &id));
            println!("{:<9} {}", "whatsapp", whatsapp_link(&base, &id, &title));
            println!("{:<9} {}", "telegram", telegram_link(&base, &id, &title));
        }
    }

    debug!(metrics = %metrics().export_json(), "Run complete");
    Ok(())
}

fn browse(
    config: &Config,
    items_path: Option<&Path>,
    filter: &FilterState,
    audience: &Audience,
    json: bool,
) -> anyhow::Result<()> {
    let registry = Arc::new(CategoryRegistry::new());
    let engine = BrowseEngine::from_config(Arc::clone(&registry), &config.schema.search)
        .context("Invalid search settings")?;
    let items = load_items(items_path);

    let now = Utc::now();
    let stale = items
        .iter()
        .filter(|item| should_auto_archive(item.created_at, now, config.schema.listings.auto_archive_days))
        .count();
    if stale > 0 {
        debug!(stale, days = config.schema.listings.auto_archive_days, "Listings due for auto-archive");
    }

    let timer = Timer::start("browse_ms");
    let hits = engine.browse(&items, filter)?;
    let elapsed = timer.stop();
    metrics().increment("browse_runs");
    info!(filter = %filter.label(), hits = hits.len(), elapsed = %format_duration(elapsed), "Browse complete");

    if json {
        let rows: Vec<_> = hits
            .iter()
            .map(|hit| {
                serde_json::json!({
                    "id": hit.item.id,
                    "name": hit.item.name,
                    "type": hit.item.item_type,
                    "category": registry.resolve(&hit.item.category),
                    "city": hit.item.location.city,
                    "status": hit.item.status,
                    "relevance": hit.relevance,
                    "distance_km": hit.distance_km,
                    "contact": hit.item.contact_for(audience.viewer_for(hit.item)),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if hits.is_empty() {
        Status::warning("No listings match these filters");
        return Ok(());
    }

    for hit in &hits {
        let contact = hit.item.contact_for(audience.viewer_for(hit.item));
        print_hit(hit, &registry, &contact, &time_ago(hit.item.created_at, now));
        println!();
    }
    Status::success(&format!(
        "{} of {} in {}",
        format_count(hits.len(), "listing", "listings"),
        items.len(),
        format_duration(elapsed)
    ));
    Ok(())
}

/// Who runs the command, as seen by each listing.
struct Audience {
    /// Signed-in user, if any
    user_id: Option<String>,
    /// Pressed "reveal" on listings they do not own
    revealed: bool,
}

impl Audience {
    fn viewer_for(&self, item: &Item) -> Viewer {
        match &self.user_id {
            Some(id) if item.is_owned_by(id) => Viewer::Owner,
            Some(_) => Viewer::SignedIn { revealed: self.revealed },
            None if self.revealed => Viewer::SignedIn { revealed: true },
            None => Viewer::Anonymous,
        }
    }
}

/// Listings from `path`, falling back to the sample listings.
fn load_items(path: Option<&Path>) -> Vec<Item> {
    let Some(path) = path else {
        return fixture_items();
    };

    let (items, fell_back) = FallbackSource::new(JsonFileSource::new(path)).fetch_or_fallback();
    metrics().gauge("items_loaded", items.len() as u64);
    if fell_back {
        metrics().increment("source_fallbacks");
        Status::warning(&format!("Could not read {}, showing sample listings", path.display()));
    }
    items
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{raw}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    Coordinate::try_new(lat, lon).map_err(|e| e.to_string())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    let Some(core) = err.chain().find_map(|e| e.downcast_ref::<reunite_core::Error>()) else {
        return exit_codes::FAILURE;
    };
    match core.code.code() / 1000 {
        3 => exit_codes::CONFIG_ERROR,
        5 => exit_codes::SOURCE_ERROR,
        6 => exit_codes::VALIDATION_ERROR,
        _ => exit_codes::FAILURE,
    }
}
