//! The view pipeline: search/category filter, sort order, derived display
//! list. Reads the full record set from the store and never owns data.

mod debounce;
mod filter;
mod pipeline;
mod size;
mod sort;
mod types;

pub use debounce::Debouncer;
pub use filter::DisplayFilter;
pub use pipeline::{RefreshTrigger, ViewPipeline};
pub use size::parse_size_to_bytes;
pub use sort::{sort_torrents, SortMode};
pub use types::{DisplayEntry, DisplayList, ViewControls};
