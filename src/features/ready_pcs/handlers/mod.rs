pub mod ready_pc_handler;

pub use ready_pc_handler::*;
