mod item;
mod load;
mod parse;

pub use item::{Catalog, PosterRef, ScoredItem};
pub use load::load_catalog;
