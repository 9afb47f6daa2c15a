pub mod dto;
mod http;
mod memory;
mod signer;

pub use http::*;
pub use memory::*;
pub use signer::*;
