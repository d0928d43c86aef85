pub mod bot;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod markup;
pub mod suggestion;

pub use detail::{ContentKind, DetailInfo};
pub use error::{ScrapeError, ScrapeResult};
pub use listing::{IndexPicker, ListingEntry, ThreadRandom};
pub use suggestion::{Suggester, Suggestion};
