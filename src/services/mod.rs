/// Service layer: the scoring pipeline and the session controller.
pub mod aggregator;
pub mod sanitizer;
pub mod smoother;
pub mod stage_machine;
pub mod style;
pub mod turn_service;

pub use aggregator::{phase_weighted, weakest_link, ConversationPhase};
pub use sanitizer::sanitize;
pub use smoother::smooth;
pub use turn_service::{TurnError, TurnService};
