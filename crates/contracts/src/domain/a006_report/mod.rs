pub mod aggregate;

pub use aggregate::{Report, ReportDto, ReportFrequency, ReportId};
