pub mod accounts;
pub mod analytics;
pub mod import;
pub mod income;
pub mod positions;
pub mod trades;
pub mod wheels;
