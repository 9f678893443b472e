pub mod error;
pub mod search;
pub mod serde_utils;
