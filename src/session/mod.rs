//! Client-side session core: the two stored authentication slots, their
//! classification, login conflict detection and resolution, and logout.

pub mod accessor;
pub mod classifier;
pub mod conflict;
pub mod logout;
pub mod resolution;
pub mod store;

pub use accessor::SessionAccessor;
pub use conflict::{ConflictCheck, LoginTarget};
pub use logout::{perform_logout, perform_logout_with, LogoutResult};
pub use resolution::{ConflictWarning, GateState, LoginGate};
pub use store::{FileStore, MemoryStore, SessionStore};
