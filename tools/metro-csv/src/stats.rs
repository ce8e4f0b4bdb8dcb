use metro_transit::spatial::queries::polyline_length;
use metro_transit::{ImportReport, SystemObjects};

/// Counts gathered while loading and summarizing a model
#[derive(Debug, Default)]
pub struct ModelStats {
    pub route_count: usize,
    pub path_count: usize,
    pub point_count: usize,
    pub stop_count: usize,
    pub service_count: usize,
    pub network_length_m: f64,
    pub rows_skipped: usize,
}

impl ModelStats {
    pub fn collect(objects: &SystemObjects) -> Self {
        let mut stats = Self {
            route_count: objects.route_count(),
            path_count: objects.path_count(),
            point_count: objects.point_count(),
            service_count: objects.service_count(),
            ..Self::default()
        };

        for route in objects.all_routes() {
            for path in objects.paths(route.key()) {
                let points = objects.waypoints(path.key());
                stats.stop_count += points.iter().filter(|wp| wp.is_stop()).count();
                stats.network_length_m += polyline_length(points.iter().map(|wp| wp.location()));
            }
        }
        stats
    }

    pub fn add_report(&mut self, report: &ImportReport) {
        self.rows_skipped += report.skipped;
    }

    pub fn log_summary(&self) {
        log::info!("=== Model Statistics ===");
        log::info!("Routes: {}", self.route_count);
        log::info!("Paths: {}", self.path_count);
        log::info!("Way points: {} ({} stops)", self.point_count, self.stop_count);
        log::info!("Services: {}", self.service_count);
        log::info!("Network length: {:.2} km", self.network_length_m / 1_000.0);
        if self.rows_skipped > 0 {
            log::warn!("Rows skipped during import: {}", self.rows_skipped);
        }
    }
}
