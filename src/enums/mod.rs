pub mod catalog;
pub mod common;
pub mod complaints;
pub mod orders;
pub mod summary;
