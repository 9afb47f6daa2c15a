pub mod address;
mod account;
mod amount;
mod chain;
mod command;
mod engine;
mod error;
mod event;
mod query;
mod resource;
mod state;
mod sync;
mod wallet;

pub use account::*;
pub use amount::*;
pub use chain::*;
pub use command::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use query::*;
pub use resource::*;
pub use state::*;
pub use sync::*;
pub use wallet::*;
