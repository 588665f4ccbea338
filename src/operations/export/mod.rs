mod export_chain;
mod export_node;

pub use export_chain::ExportChain;
pub use export_node::{handle_length, ExportNode};
