pub mod coordinator;
pub mod store;

pub use coordinator::{EmotionOutcome, StudyCoordinator};
pub use store::{SessionKey, SessionStore};
