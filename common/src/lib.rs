pub mod config;
pub mod error;
pub mod load;
pub mod metric;
pub mod plot;
