pub mod featured_dto;

pub use featured_dto::*;
