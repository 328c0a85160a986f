pub mod cliente_handler;

pub use cliente_handler::*;
