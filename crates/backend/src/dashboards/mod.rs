pub mod d400_supply_analytics;
