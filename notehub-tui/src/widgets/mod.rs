//! Reusable widget components.

pub mod detail;
pub mod filter;
pub mod input;
pub mod pagination;
pub mod status;

pub use detail::DetailPanel;
pub use filter::{FilterBar, FilterOption};
pub use input::TextInput;
pub use pagination::Pagination;
pub use status::StatusIndicator;
