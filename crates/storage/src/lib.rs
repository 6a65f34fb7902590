#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    BestScoreSlot, HIGH_SCORE_KEY, InMemoryStore, KeyValueStore, RESULTS_KEY, ResultSlot,
    Storage, StorageError,
};
