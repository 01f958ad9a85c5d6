mod arena;
pub mod level;
mod raw;
pub mod skiplist;
pub mod stashlist;

pub use level::{probability_table, LevelGenerator};
pub use skiplist::SkipList;
pub use stashlist::StashList;
