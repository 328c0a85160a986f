pub mod ready_pc;

pub use ready_pc::{ReadyPc, ReadyPcComponent};
