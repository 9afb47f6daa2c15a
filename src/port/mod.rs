mod callback;
mod command;
mod engine;
mod event;
mod keys;
mod ledger;
mod store;

pub use callback::*;
pub use command::*;
pub use engine::*;
pub use event::*;
pub use keys::*;
pub use ledger::*;
pub use store::*;
