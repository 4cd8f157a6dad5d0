//! Topic-based event bus for game notifications.
//!
//! Events are derived from each executed action's delta and published to
//! topics; consumers subscribe only to the topics they need.

mod bus;
mod extractor;
mod game_event;

pub use bus::{EventBus, Topic};
pub use extractor::extract_events;
pub use game_event::GameEvent;
