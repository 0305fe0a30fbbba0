//! Authentication adapters implementing the SessionValidator port.

mod mock;
mod session;

pub use mock::MockSessionValidator;
pub use session::DbSessionValidator;
