pub mod cliente_dto;

pub use cliente_dto::*;
