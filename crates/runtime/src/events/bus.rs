//! Topic-based event bus implementation.

use mystery_core::{GameEvent, Tick};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::session::GamePhase;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Room change requests and completed room changes
    Movement,
    /// Interviews, clues and accusations
    Investigation,
    /// Session phase changes
    Session,
}

/// A session moving from one phase to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEvent {
    pub from: GamePhase,
    pub to: GamePhase,
    pub clock: Tick,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Game(GameEvent),
    Phase(PhaseEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(
                GameEvent::RoomChangeRequested { .. } | GameEvent::RoomChanged { .. },
            ) => Topic::Movement,
            Event::Game(
                GameEvent::InterviewRequested { .. }
                | GameEvent::ClueReached { .. }
                | GameEvent::ClueCollected { .. }
                | GameEvent::SuspectAccused { .. },
            ) => Topic::Investigation,
            Event::Phase(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    movement: broadcast::Sender<Event>,
    investigation: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
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
            movement: broadcast::channel(capacity).0,
            investigation: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    /// Publish an event to its corresponding topic. Never blocks.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Movement => &self.movement,
            Topic::Investigation => &self.investigation,
            Topic::Session => &self.session,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mystery_core::{ClueId, EntityId, Position, RoomId};

    #[test]
    fn events_route_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut movement = bus.subscribe(Topic::Movement);
        let mut investigation = bus.subscribe(Topic::Investigation);

        bus.publish(Event::Game(GameEvent::ClueCollected { clue: ClueId(3) }));
        bus.publish(Event::Game(GameEvent::RoomChanged {
            from: RoomId(0),
            to: RoomId(1),
            position: Position::new(1, 1),
        }));

        assert_eq!(
            investigation.try_recv().unwrap(),
            Event::Game(GameEvent::ClueCollected { clue: ClueId(3) })
        );
        assert!(investigation.try_recv().is_err());
        assert!(matches!(
            movement.try_recv().unwrap(),
            Event::Game(GameEvent::RoomChanged { .. })
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Game(GameEvent::InterviewRequested {
            suspect: EntityId(1),
        }));
        let mut late = bus.clone().subscribe(Topic::Investigation);
        assert!(late.try_recv().is_err());
    }
}
