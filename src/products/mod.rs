pub mod fetcher;
pub mod model;

pub use fetcher::ProductFetcher;
pub use model::{ProductAttribute, ProductComboInfo, ProductDetail};
