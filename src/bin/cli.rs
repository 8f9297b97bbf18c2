//! chargemap CLI - charger lookup and placement clustering
//!
//! Usage:
//!   chargemap-cli nearest --dataset <file> --at <lat,lng> [--k 5]
//!   chargemap-cli nearest --dataset <file> --place <name> [--offline]
//!   chargemap-cli cluster --points <file> density --epsilon-km 1.0 --min-samples 3
//!   chargemap-cli cluster --points <file> threshold --radius-km 1.0
//!   chargemap-cli generate --seed <lat,lng> --distance-meters 2000 --count 50
//!
//! The API key for the routing oracle comes from --api-key or the
//! GOOGLE_API_KEY environment variable; it is read here and passed down
//! as explicit configuration - library code never touches the
//! environment.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use serde::Deserialize;

use chargemap::cluster::{
    cluster_by_density, cluster_by_threshold, filter_groups, summarize_clusters, DensityConfig,
    NOISE,
};
use chargemap::geo_utils::haversine_distance;
use chargemap::synthetic::generate_points_within;
use chargemap::{
    find_nearest, Dataset, FinderConfig, GeocodeClient, GeocodeConfig, GeoPoint, Haversine,
    HttpRoutingOracle, MockRoutingOracle, OracleConfig, RoutingOracle,
};

#[derive(Parser)]
#[command(name = "chargemap-cli")]
#[command(about = "EV charger lookup and placement clustering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest chargers to a location
    Nearest {
        /// Station dataset file (.csv or .json)
        #[arg(long)]
        dataset: PathBuf,

        /// Query point as "lat,lng"
        #[arg(long, value_parser = parse_point, conflicts_with = "place")]
        at: Option<GeoPoint>,

        /// Free-text place name, resolved via geocoding
        #[arg(long)]
        place: Option<String>,

        /// Number of results
        #[arg(short, long, default_value = "5")]
        k: usize,

        /// Number of prefiltered candidates sent to the oracle
        #[arg(long, default_value = "20")]
        prefilter: usize,

        /// Routing API key (falls back to GOOGLE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Skip the routing API and rank by great-circle distance
        #[arg(long)]
        offline: bool,
    },

    /// Cluster user-submitted candidate points
    Cluster {
        /// Candidate points file (.csv with latitude,longitude columns)
        #[arg(long)]
        points: PathBuf,

        #[command(subcommand)]
        method: ClusterMethod,
    },

    /// Generate synthetic candidate points around seed coordinates
    Generate {
        /// Seed point as "lat,lng" (repeatable)
        #[arg(long, value_parser = parse_point, required = true)]
        seed: Vec<GeoPoint>,

        /// Maximum distance from the seed in meters
        #[arg(long, default_value = "2000")]
        distance_meters: f64,

        /// Points to generate per seed
        #[arg(long, default_value = "50")]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ClusterMethod {
    /// Density-based clustering (drives placement suggestions)
    Density {
        /// Neighborhood radius in kilometers
        #[arg(long, default_value = "1.0")]
        epsilon_km: f64,

        /// Minimum neighbors for a core point
        #[arg(long, default_value = "3")]
        min_samples: usize,
    },

    /// Naive pairwise threshold grouping (comparison only)
    Threshold {
        /// Grouping radius in kilometers
        #[arg(long, default_value = "1.0")]
        radius_km: f64,

        /// Minimum group size to report
        #[arg(long, default_value = "3")]
        min_samples: usize,
    },
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got \"{s}\""))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude \"{lat}\""))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude \"{lng}\""))?;

    let point = GeoPoint::new(latitude, longitude);
    if !point.is_valid() {
        return Err(format!("coordinates out of range: {s}"));
    }
    Ok(point)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Nearest {
            dataset,
            at,
            place,
            k,
            prefilter,
            api_key,
            offline,
        } => {
            run_nearest(
                &dataset,
                at,
                place.as_deref(),
                k,
                prefilter,
                api_key,
                offline,
            )
            .await
        }
        Commands::Cluster { points, method } => run_cluster(&points, &method),
        Commands::Generate {
            seed,
            distance_meters,
            count,
            rng_seed,
        } => run_generate(&seed, distance_meters, count, rng_seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load a station dataset, picking the format from the file extension.
fn load_dataset(path: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    let dataset = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Dataset::from_json_path(path)?,
        _ => Dataset::from_csv_path(path)?,
    };
    println!("Loaded {} stations from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Offline stand-in for the routing API: serves every station's
/// great-circle distance as if it were a routed leg.
fn offline_oracle(query: &GeoPoint, dataset: &Dataset) -> MockRoutingOracle {
    let mut oracle = MockRoutingOracle::new();
    for record in dataset.records() {
        let meters = haversine_distance(query, &record.point) * 1000.0;
        oracle = oracle.with_distance(record.point, meters);
    }
    oracle
}

async fn run_nearest(
    dataset_path: &Path,
    at: Option<GeoPoint>,
    place: Option<&str>,
    k: usize,
    prefilter: usize,
    api_key: Option<String>,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(dataset_path)?;

    let query = match (at, place) {
        (Some(point), _) => point,
        (None, Some(name)) => {
            let client = GeocodeClient::new(GeocodeConfig::default())?;
            match client.geocode(name).await? {
                Some(point) => {
                    println!("Resolved \"{name}\" to {}", point.to_query_string());
                    point
                }
                None => {
                    println!("No match for \"{name}\"");
                    return Ok(());
                }
            }
        }
        (None, None) => return Err("provide --at or --place".into()),
    };

    let config = FinderConfig {
        k,
        prefilter_count: prefilter,
    };

    let results = if offline {
        let oracle = offline_oracle(&query, &dataset);
        find_nearest(&query, &dataset, &oracle, &Haversine, &config).await?
    } else {
        let key = api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("routing API key required: pass --api-key or set GOOGLE_API_KEY (or use --offline)")?;
        let oracle = HttpRoutingOracle::new(OracleConfig::new(key))?;
        find_nearest(
            &query,
            &dataset,
            &oracle as &dyn RoutingOracle,
            &Haversine,
            &config,
        )
        .await?
    };

    println!("\n{}", "=".repeat(60));
    println!("Nearest chargers to {}", query.to_query_string());
    println!("{}", "=".repeat(60));

    if results.is_empty() {
        println!("No chargers found");
        return Ok(());
    }

    for (rank, neighbor) in results.iter().enumerate() {
        let station = dataset
            .get(&neighbor.station_id)
            .expect("result id comes from this dataset");
        println!(
            "{:2}. {} ({}) - {} away, {}",
            rank + 1,
            station.id,
            station.charger_type.name(),
            neighbor.routed_distance_text,
            neighbor.routed_duration_text,
        );
        if let Some(address) = &neighbor.resolved_address {
            println!("    {address}");
        } else if !station.address.is_empty() {
            println!(
                "    {}, {}, {}",
                station.address, station.city, station.state
            );
        }
    }

    Ok(())
}

/// Candidate row in a user-submitted points file.
#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

fn load_points(path: &Path) -> Result<Vec<GeoPoint>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();
    for row in reader.deserialize() {
        let row: CandidateRow = row?;
        if let (Some(lat), Some(lng)) = (row.latitude, row.longitude) {
            let point = GeoPoint::new(lat, lng);
            if point.is_valid() {
                points.push(point);
            }
        }
    }
    println!(
        "Loaded {} candidate points from {}",
        points.len(),
        path.display()
    );
    Ok(points)
}

fn run_cluster(
    points_path: &Path,
    method: &ClusterMethod,
) -> Result<(), Box<dyn std::error::Error>> {
    let points = load_points(points_path)?;

    match method {
        ClusterMethod::Density {
            epsilon_km,
            min_samples,
        } => {
            let config = DensityConfig {
                epsilon_km: *epsilon_km,
                min_samples: *min_samples,
            };
            let labels = cluster_by_density(&points, &config)?;
            let noise = labels.iter().filter(|&&l| l == NOISE).count();
            let summaries = summarize_clusters(&points, &labels);

            println!("\n{}", "=".repeat(60));
            println!(
                "Density clusters (epsilon {} km, min_samples {})",
                epsilon_km, min_samples
            );
            println!("{}", "=".repeat(60));
            println!(
                "{} clusters, {} noise points dropped",
                summaries.len(),
                noise
            );

            for summary in &summaries {
                println!(
                    "cluster {:3}: {:4} points, suggested site {}",
                    summary.label,
                    summary.point_count,
                    summary.center.to_query_string(),
                );
            }
        }
        ClusterMethod::Threshold {
            radius_km,
            min_samples,
        } => {
            let groups = cluster_by_threshold(&points, *radius_km)?;
            let groups = filter_groups(groups, *min_samples);

            println!("\n{}", "=".repeat(60));
            println!(
                "Threshold groups (radius {} km, min size {})",
                radius_km, min_samples
            );
            println!("(naive pairwise grouping - overlapping groups are not merged)");
            println!("{}", "=".repeat(60));
            println!("{} groups", groups.len());

            for group in &groups {
                println!(
                    "anchor {:4}: {:4} points around {}",
                    group.anchor,
                    group.len(),
                    points[group.anchor].to_query_string(),
                );
            }
        }
    }

    Ok(())
}

fn run_generate(
    seeds: &[GeoPoint],
    distance_meters: f64,
    count: usize,
    rng_seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match rng_seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_entropy(),
    };

    println!("latitude,longitude");
    for seed in seeds {
        for point in generate_points_within(seed, distance_meters, count, &mut rng) {
            println!("{:.5},{:.5}", point.latitude, point.longitude);
        }
    }

    Ok(())
}
