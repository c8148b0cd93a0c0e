mod client;
mod config;
mod convert;

pub use client::QdrantIndex;
pub use config::QdrantConfig;
