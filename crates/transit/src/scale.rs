//! Mapping ridership values onto a green -> yellow -> red color ramp.

use palette::Srgb;

use crate::identifiers::ServiceKey;
use crate::models::data::{find_max_data, find_min_data, DataType};
use crate::models::service::Service;
use crate::models::types::*;
use crate::system::SystemObjects;

/// 8-bit sRGB
pub type Color = Srgb<u8>;

/// Color of a stop that has no value of the displayed type
pub const SELECTED_STOP_COLOR: Color = Srgb::new(17, 177, 255);

const CHANNEL_MAX: u8 = u8::MAX;

/// 512 colors: red ramps up at full green, then green ramps down at full red
#[derive(Clone, Debug)]
pub struct ColorScale {
    colors: Vec<Color>,
}

impl ColorScale {
    pub fn new() -> Self {
        let rising_red = (0..=CHANNEL_MAX).map(|red| Srgb::new(red, CHANNEL_MAX, 0));
        let falling_green = (0..=CHANNEL_MAX).rev().map(|green| Srgb::new(CHANNEL_MAX, green, 0));

        Self {
            colors: rising_red.chain(falling_green).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for `value` on a scale from `min` to `max`.
    ///
    /// Values below `min` get the first color and values above `max` the
    /// last. In between, the index is `(value - min) / (max - min + 1)` of
    /// the scale length, so `max` itself lands just short of the end.
    pub fn interpolate(&self, value: i32, min: i32, max: i32) -> Color {
        let last = self.colors.len() - 1;
        let index = if value < min {
            0
        } else if value > max {
            last
        } else {
            let span = i64::from(max) - i64::from(min) + 1;
            let pct = (i64::from(value) - i64::from(min)) as f64 / span as f64;
            ((pct * self.colors.len() as f64) as usize).min(last)
        };
        self.colors[index]
    }

    /// One color per service stop, in stop order
    pub fn point_colors(&self, service: &Service, data_type: DataType, min: i32, max: i32) -> Vec<Color> {
        service
            .service_stops()
            .iter()
            .map(|stop| match stop.data(data_type) {
                Some(data) => self.interpolate(data.value(), min, max),
                None => SELECTED_STOP_COLOR,
            })
            .collect()
    }

    /// One slot per way point of the service's path section.
    ///
    /// Stop positions carrying a value are colored; plain way points and
    /// stops without a value are `None`, and a renderer draws each leg in the
    /// color of the last colored slot before it.
    pub fn segment_colors(
        &self,
        objects: &SystemObjects,
        service: ServiceKey,
        data_type: DataType,
        min: i32,
        max: i32,
    ) -> Result<Vec<Option<Color>>> {
        let svc = objects
            .service(service)
            .ok_or(TransitError::ServiceNotFound(service))?;
        let points = objects.service_path(service)?;

        let mut colors = vec![None; points.len()];
        for stop in svc.service_stops() {
            let Some(data) = stop.data(data_type) else {
                continue;
            };
            if let Some(index) = points.iter().position(|wp| wp.key() == stop.stop()) {
                colors[index] = Some(self.interpolate(data.value(), min, max));
            }
        }
        Ok(colors)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the scale bounds come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataScale {
    fixed: Option<(i32, i32)>,
}

impl DataScale {
    /// Bounds follow the services being displayed
    pub fn relative() -> Self {
        Self { fixed: None }
    }

    /// Bounds overridden by the user
    pub fn fixed(min: i32, max: i32) -> Self {
        Self { fixed: Some((min, max)) }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// `(min, max)` for `data_type`; `None` when relative and none of the
    /// services carry a value of that type
    pub fn bounds<'a>(&self, data_type: DataType, services: impl IntoIterator<Item = &'a Service> + Clone) -> Option<(i32, i32)> {
        if let Some(fixed) = self.fixed {
            return Some(fixed);
        }
        let min = find_min_data(data_type, services.clone())?;
        let max = find_max_data(data_type, services)?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StationId;
    use crate::models::data::Data;
    use crate::models::period::Period;
    use geo::Point;

    #[test]
    fn test_scale_shape() {
        let scale = ColorScale::new();
        assert_eq!(scale.len(), 512);
        assert_eq!(scale.colors()[0], Srgb::new(0, 255, 0));
        assert_eq!(scale.colors()[255], Srgb::new(255, 255, 0));
        assert_eq!(scale.colors()[256], Srgb::new(255, 255, 0));
        assert_eq!(scale.colors()[511], Srgb::new(255, 0, 0));
    }

    #[test]
    fn test_interpolate() {
        let scale = ColorScale::new();
        assert_eq!(scale.interpolate(-5, 0, 100), scale.colors()[0]);
        assert_eq!(scale.interpolate(101, 0, 100), scale.colors()[511]);
        assert_eq!(scale.interpolate(0, 0, 100), scale.colors()[0]);
        // 100 / 101 * 512 = 506.9
        assert_eq!(scale.interpolate(100, 0, 100), scale.colors()[506]);
        // 50 / 101 * 512 = 253.4
        assert_eq!(scale.interpolate(50, 0, 100), scale.colors()[253]);
        // single-value scale puts its value at the start
        assert_eq!(scale.interpolate(7, 7, 7), scale.colors()[0]);
        assert_eq!(scale.interpolate(i32::MAX, i32::MIN, i32::MAX), scale.colors()[511]);
    }

    fn loaded_service() -> (SystemObjects, ServiceKey) {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(10, "Blue Line");
        let path = objects.add_path(route, "Northbound", 1).unwrap();
        let s1 = objects.add_stop(path, Point::new(0.0, 0.0), "S1", 100).unwrap();
        objects.add_waypoint(path, Point::new(0.0, 0.05)).unwrap();
        objects.add_stop(path, Point::new(0.0, 0.1), "S2", 101).unwrap();
        let s3 = objects.add_stop(path, Point::new(0.0, 0.2), "S3", 102).unwrap();
        let svc = objects.add_service(path, 1, Period::WEEKDAY_BASE, s1, s3).unwrap();

        let service = objects.service_mut(svc).unwrap();
        for (station, load) in [(100, 0), (102, 100)] {
            service
                .service_stop_mut(StationId::new(station))
                .unwrap()
                .add_data(Data::load(load));
        }
        (objects, svc)
    }

    #[test]
    fn test_point_colors_fall_back() {
        let (objects, svc) = loaded_service();
        let scale = ColorScale::new();
        let colors = scale.point_colors(objects.service(svc).unwrap(), DataType::Load, 0, 100);
        assert_eq!(colors, vec![scale.colors()[0], SELECTED_STOP_COLOR, scale.colors()[506]]);
    }

    #[test]
    fn test_segment_colors_align_to_way_points() {
        let (objects, svc) = loaded_service();
        let scale = ColorScale::new();
        let colors = scale.segment_colors(&objects, svc, DataType::Load, 0, 100).unwrap();
        assert_eq!(colors, vec![Some(scale.colors()[0]), None, None, Some(scale.colors()[506])]);

        let empty = scale.segment_colors(&objects, svc, DataType::Boardings, 0, 100).unwrap();
        assert!(empty.iter().all(Option::is_none));
    }

    #[test]
    fn test_data_scale_bounds() {
        let (objects, _) = loaded_service();
        let services = objects.all_services();

        assert_eq!(DataScale::default(), DataScale::relative());
        assert_eq!(DataScale::relative().bounds(DataType::Load, services.iter().copied()), Some((0, 100)));
        assert_eq!(DataScale::relative().bounds(DataType::Boardings, services.iter().copied()), None);

        let fixed = DataScale::fixed(10, 20);
        assert!(fixed.is_fixed());
        assert_eq!(fixed.bounds(DataType::Boardings, services.iter().copied()), Some((10, 20)));
    }
}
