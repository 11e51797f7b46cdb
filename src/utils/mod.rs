pub mod format;
pub mod table;

pub use format::{format_amount, format_percent, format_usd};
pub use table::Table;
