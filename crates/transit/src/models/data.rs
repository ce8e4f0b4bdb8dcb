//! Ridership measurements and the min/max folds used for color scaling.

use std::fmt;

use strum::{Display, EnumIter, EnumString};

/// How a measurement is drawn on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataShape {
    /// Shown at the stop only
    Point,
    /// Also colors the line leaving the stop
    Segment,
}

/// The closed set of ridership measurements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DataType {
    Boardings,
    Alightings,
    Load,
}

impl DataType {
    pub const fn shape(self) -> DataShape {
        match self {
            DataType::Boardings | DataType::Alightings => DataShape::Point,
            DataType::Load => DataShape::Segment,
        }
    }
}

/// One measured value attached to a [`ServiceStop`](crate::models::service::ServiceStop)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Data {
    data_type: DataType,
    value: i32,
}

impl Data {
    pub const fn new(data_type: DataType, value: i32) -> Self {
        Self { data_type, value }
    }

    /// People entering the vehicle
    pub const fn boardings(value: i32) -> Self {
        Self::new(DataType::Boardings, value)
    }

    /// People leaving the vehicle
    pub const fn alightings(value: i32) -> Self {
        Self::new(DataType::Alightings, value)
    }

    /// People on board when the vehicle leaves the stop
    pub const fn load(value: i32) -> Self {
        Self::new(DataType::Load, value)
    }

    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    pub const fn value(&self) -> i32 {
        self.value
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.data_type, self.value)
    }
}

/// Something that can report the range of one measurement over its contents.
///
/// `None` means no value of that type is present; it is never folded as zero.
pub trait DataExtent {
    fn min_data(&self, data_type: DataType) -> Option<i32>;
    fn max_data(&self, data_type: DataType) -> Option<i32>;
}

/// Smallest value over `items`, skipping items with no data of that type
pub fn find_min_data<'a, T, I>(data_type: DataType, items: I) -> Option<i32>
where
    T: DataExtent + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter_map(|item| item.min_data(data_type)).min()
}

/// Largest value over `items`, skipping items with no data of that type
pub fn find_max_data<'a, T, I>(data_type: DataType, items: I) -> Option<i32>
where
    T: DataExtent + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter_map(|item| item.max_data(data_type)).max()
}
