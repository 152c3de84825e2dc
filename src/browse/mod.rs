//! Pure helpers behind the playlist list: search filtering and pagination.

pub mod entities;
pub mod pagination;
pub mod search;

pub use pagination::PageIntent;
