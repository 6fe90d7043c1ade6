mod client;
mod types;

pub use client::{HttpRuntimeClient, RuntimeClient, classify_status};
pub use types::*;
