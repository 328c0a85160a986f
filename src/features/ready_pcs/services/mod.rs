pub mod ready_pc_service;

pub use ready_pc_service::ReadyPcService;
