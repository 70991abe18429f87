pub mod dedup;
pub mod hierarchy;
pub mod slug;
pub mod transform;

pub use dedup::merge_duplicate_cities;
pub use hierarchy::build_hierarchy;
pub use slug::to_slug;
pub use transform::{filter_valid_rows, row_to_sauna};
