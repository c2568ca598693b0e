pub mod browser;
pub mod droid;
pub mod extractor;
pub mod navigator;
pub mod result_scraper;
pub mod wait;

pub use browser::*;
pub use droid::*;
pub use extractor::*;
pub use navigator::*;
pub use result_scraper::*;
