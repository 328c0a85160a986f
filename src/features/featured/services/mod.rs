pub mod featured_service;

pub use featured_service::FeaturedService;
