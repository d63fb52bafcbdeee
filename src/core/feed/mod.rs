pub mod fetcher;
pub mod parser;
pub mod schema;
pub mod types;

pub use types::{Audio, Episode};
