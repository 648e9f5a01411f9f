pub mod export;
pub mod tags;
pub mod types;
