pub mod aggregate;

pub use aggregate::{LogisticsDetail, LogisticsDetailDto, LogisticsDetailId};
