pub mod docs;
pub mod summary;
