//! Application module: the playlist owner.
//!
//! The `App` model lives in `app::model`. It holds the scanned songs and the
//! selection, and decides which song answers a next-track request.

mod model;

pub use model::*;
