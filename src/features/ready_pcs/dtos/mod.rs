pub mod ready_pc_dto;

pub use ready_pc_dto::*;
