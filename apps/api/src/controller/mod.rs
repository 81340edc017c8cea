// Application Controller: per-session workspace state and its transitions.
// Transitions are pure methods; the HTTP layer owns locking and the model call.

pub mod failure;
pub mod handlers;
pub mod sessions;
pub mod workspace;

pub use failure::FailureCategory;
pub use sessions::SessionStore;
pub use workspace::{InputUpdate, UploadTarget, Workspace};
