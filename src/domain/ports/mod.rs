/// Ports (traits) at the seams of the core: external collaborators and
/// session storage. Services depend on these, never on concrete adapters.
pub mod errors;
pub mod judge;
pub mod responder;
pub mod session_store;
pub mod summary_sink;

pub use errors::CollaboratorError;
pub use judge::{Judge, JudgeRequest};
pub use responder::{Responder, ResponderRequest};
pub use session_store::{SessionHandle, SessionStore};
pub use summary_sink::SummarySink;
