pub mod authorization;
pub mod catalog;
pub mod complaints;
pub mod errors;
pub mod lifecycle;
pub mod orders;
pub mod pricing;
pub mod summary;

pub use catalog::CatalogService;
pub use complaints::ComplaintService;
pub use errors::ServiceError;
pub use orders::OrderService;
pub use summary::SummaryService;
