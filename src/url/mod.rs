//! Address handling
//!
//! Everything the crawler schedules is a normalized `url::Url`; this module
//! owns the normalization rules and the same-origin test that bounds the
//! crawl to the seed's site.

mod normalize;
mod origin;

pub use normalize::normalize_address;
pub use origin::{origin_label, same_origin};
