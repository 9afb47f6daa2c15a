mod boot;
mod monitor;
pub mod output;
mod poller;
mod router;
mod session;

pub use boot::*;
pub use monitor::*;
pub use poller::*;
pub use router::*;
pub use session::*;
