//! Text extraction from fetched pages

mod extract;

pub use extract::extract_text;
