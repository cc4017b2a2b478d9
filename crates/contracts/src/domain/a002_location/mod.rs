pub mod aggregate;

pub use aggregate::{Location, LocationDto, LocationId, LocationType};
