pub mod context;
pub mod core;
pub mod dataset;
pub mod dictionary;
pub mod filter;
pub mod persistence;
pub mod segmentation;
pub mod web;

pub use context::AppContext;
pub use crate::core::{
    AppConfig,
    YomireiError,
};
