//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::game_event::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player record changes (keys, inventory, level, movement)
    Player,
    /// Battle lifecycle and hp swings
    Battle,
    /// Floor-level changes (removals, floor transitions)
    World,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Player, Topic::Battle, Topic::World];
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Cloning the bus shares
/// the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    player: broadcast::Sender<GameEvent>,
    battle: broadcast::Sender<GameEvent>,
    world: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            player: broadcast::channel(capacity).0,
            battle: broadcast::channel(capacity).0,
            world: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<GameEvent> {
        match topic {
            Topic::Player => &self.player,
            Topic::Battle => &self.battle,
            Topic::World => &self.world,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
