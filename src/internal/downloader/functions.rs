pub mod build_client;
pub mod plan_ranges;
pub mod resolve_destination;
pub mod select_strategy;
