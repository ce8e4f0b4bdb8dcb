use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use geo::Point;
use metro_transit::legacy::{max_to_legacy, min_to_legacy};
use metro_transit::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

mod stats;

use stats::ModelStats;

#[derive(Parser, Debug)]
#[command(
    name = "metro-csv",
    author,
    version,
    about = "Import, normalize and summarize transit route and ridership CSV files",
    long_about = "Loads a route geometry file and optionally a service ridership file into \
                  the transit data model.\n\n\
                  `normalize` writes both files back out in canonical order. `summary` \
                  reports per-service minimum and maximum values for one period, the \
                  color each maximum maps to, and optionally the stops near a point."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-export route and service files in canonical order
    Normalize {
        #[command(flatten)]
        input: Input,

        /// Output route CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Output service CSV file (requires --services)
        #[arg(long)]
        services_output: Option<PathBuf>,
    },

    /// Report ridership extents for one period
    Summary {
        #[command(flatten)]
        input: Input,

        /// Data type to report (boardings, alightings, load); all when omitted
        #[arg(short, long)]
        data_type: Option<DataType>,

        /// Day code: WK, SA or SU
        #[arg(long, default_value = "WK")]
        days: String,

        /// Time code: EA, AM, BS, PM or NI
        #[arg(long, default_value = "BS")]
        time: String,

        /// Fixed color scale minimum (requires --max)
        #[arg(long, requires = "max")]
        min: Option<i32>,

        /// Fixed color scale maximum (requires --min)
        #[arg(long, requires = "min")]
        max: Option<i32>,

        /// Print extents with -1 / 2147483647 for "no data"
        #[arg(long)]
        legacy: bool,

        /// List stops near this point, given as LON,LAT
        #[arg(long, value_parser = parse_lon_lat)]
        near: Option<Point>,

        /// Search radius for --near in meters
        #[arg(long, default_value = "500")]
        radius: f64,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Input route CSV file
    #[arg(short, long)]
    routes: PathBuf,

    /// Input service CSV file
    #[arg(short, long)]
    services: Option<PathBuf>,
}

fn parse_lon_lat(s: &str) -> std::result::Result<Point, String> {
    let (lon, lat) = s.split_once(',').ok_or("expected LON,LAT")?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    Ok(Point::new(lon, lat))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Metro CSV ===");

    match cli.command {
        Command::Normalize {
            input,
            output,
            services_output,
        } => {
            if services_output.is_some() && input.services.is_none() {
                bail!("--services-output needs --services");
            }
            let (objects, stats) = load(&input)?;

            let rows = export_routes(&objects, BufWriter::new(create(&output)?))
                .context("Failed to write route CSV")?;
            log::info!("Wrote {} way points to {}", rows, output.display());

            if let Some(services_output) = &services_output {
                let rows = export_services(&objects, BufWriter::new(create(services_output)?))
                    .context("Failed to write service CSV")?;
                log::info!("Wrote {} service stop rows to {}", rows, services_output.display());
            }

            log::info!("");
            stats.log_summary();
        }
        Command::Summary {
            input,
            data_type,
            days,
            time,
            min,
            max,
            legacy,
            near,
            radius,
        } => {
            let Some(period) = Period::from_codes(&days, &time) else {
                bail!("Unknown period codes: {days}/{time}");
            };
            let scale = match (min, max) {
                (Some(min), Some(max)) => DataScale::fixed(min, max),
                _ => DataScale::relative(),
            };

            let (objects, stats) = load(&input)?;
            stats.log_summary();

            let data_types: Vec<DataType> = match data_type {
                Some(data_type) => vec![data_type],
                None => DataType::iter().collect(),
            };
            for data_type in data_types {
                log::info!("");
                summarize(&objects, &period, data_type, scale, legacy);
            }

            if let Some(point) = near {
                log::info!("");
                list_stops_near(&objects, point, radius);
            }
        }
    }

    log::info!("");
    log::info!("Done!");
    Ok(())
}

fn load(input: &Input) -> Result<(SystemObjects, ModelStats)> {
    if !input.routes.exists() {
        bail!("Input file does not exist: {}", input.routes.display());
    }

    let mut objects = SystemObjects::new();
    log::info!("Routes: {}", input.routes.display());
    let route_report = import_routes(&mut objects, open(&input.routes)?).context("Failed to import route CSV")?;

    let service_report = match &input.services {
        Some(services) => {
            log::info!("Services: {}", services.display());
            Some(import_services(&mut objects, open(services)?).context("Failed to import service CSV")?)
        }
        None => None,
    };

    let mut stats = ModelStats::collect(&objects);
    stats.add_report(&route_report);
    if let Some(report) = &service_report {
        stats.add_report(report);
    }
    Ok((objects, stats))
}

fn summarize(objects: &SystemObjects, period: &Period, data_type: DataType, scale: DataScale, legacy: bool) {
    let paths: Vec<PathKey> = objects
        .all_routes()
        .flat_map(|r| r.paths().iter().copied())
        .collect();
    let services = objects.services_with_constraint(Some(paths.as_slice()), Some(period));

    log::info!("=== {} during {} ===", data_type, period);
    if services.is_empty() {
        log::info!("No services run in this period");
        return;
    }

    let Some((scale_min, scale_max)) = scale.bounds(data_type, services.iter().copied()) else {
        log::info!("No {} recorded for {} services", data_type, services.len());
        return;
    };
    log::info!(
        "Scale: {} to {} ({})",
        scale_min,
        scale_max,
        if scale.is_fixed() { "fixed" } else { "relative" }
    );

    let colors = ColorScale::new();
    for service in services {
        let label = service_label(objects, service);
        let (min, max) = (service.min_data(data_type), service.max_data(data_type));
        let extent = if legacy {
            format!("min {} max {}", min_to_legacy(min), max_to_legacy(max))
        } else {
            match (min, max) {
                (Some(min), Some(max)) => format!("min {min} max {max}"),
                _ => "no data".to_string(),
            }
        };

        let colored = match data_type.shape() {
            DataShape::Point => colors
                .point_colors(service, data_type, scale_min, scale_max)
                .into_iter()
                .filter(|c| *c != SELECTED_STOP_COLOR)
                .count(),
            DataShape::Segment => colors
                .segment_colors(objects, service.key(), data_type, scale_min, scale_max)
                .map(|slots| slots.into_iter().flatten().count())
                .unwrap_or_default(),
        };
        let peak = max.map(|max| hex(colors.interpolate(max, scale_min, scale_max)));

        log::info!(
            "  {label}: {extent}, {colored}/{} stops colored{}",
            service.service_stops().len(),
            peak.map(|c| format!(", peak {c}")).unwrap_or_default()
        );
    }
}

fn service_label(objects: &SystemObjects, service: &Service) -> String {
    let path = objects.path(service.path());
    let route = path.and_then(|p| objects.route(p.route()));
    match (route, path) {
        (Some(route), Some(path)) => format!(
            "route {} {} service {}",
            route.route_id(),
            path.name(),
            service.service_id()
        ),
        _ => format!("service {}", service.service_id()),
    }
}

fn list_stops_near(objects: &SystemObjects, point: Point, radius: f64) {
    let index = SpatialIndex::build(objects);
    let stops = index.stops_near(point, radius);
    log::info!(
        "=== {} stops within {:.0} m of {:.5},{:.5} ===",
        stops.len(),
        radius,
        point.x(),
        point.y()
    );
    for key in stops {
        let Some(stop) = objects.waypoint(key) else {
            continue;
        };
        let route = objects
            .route_for_point(key)
            .map(|r| r.route_id().to_string())
            .unwrap_or_default();
        log::info!(
            "  {} (station {}) on route {}: {:.0} m",
            stop.name().unwrap_or_default(),
            stop.station_id().map(|id| id.to_string()).unwrap_or_default(),
            route,
            metro_transit::spatial::haversine_distance(point, stop.location())
        );
    }
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
