pub mod catalog;
pub mod common;
pub mod complaints;
pub mod directory;
pub mod orders;
