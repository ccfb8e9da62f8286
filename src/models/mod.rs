pub mod session;

pub use session::{SessionStatus, UserSession};
