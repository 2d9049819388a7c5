//! URL handling module for Site-Digest
//!
//! This module provides URL normalization, href resolution and the
//! same-site check used to keep a crawl on its seed domain.

mod domain;
mod normalize;

pub use domain::{extract_domain, same_site, site_label};
pub use normalize::{normalize_url, resolve_href};
