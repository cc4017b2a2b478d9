pub mod a001_product;
pub mod a002_location;
pub mod a003_supply_transaction;
pub mod a004_logistics_detail;
pub mod a005_notification;
pub mod a006_report;
