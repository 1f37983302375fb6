use crate::core::{BodyId, BodyKind};
use crate::math::Vector2;
use std::collections::VecDeque;

/// A dynamic body was stopped by a static obstacle during a slide pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The dynamic body that moved
    pub body: BodyId,

    /// The static body it hit
    pub obstacle: BodyId,

    /// Contact normal, pointing out of the obstacle
    pub normal: Vector2,

    /// Slide pass the contact happened in, starting at 1
    pub depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// Registered with the world
    Added,

    /// Moved directly instead of swept
    Teleported,
}

/// Something that happened to one body outside of collision resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEvent {
    pub event_type: BodyEventType,
    pub body: BodyId,

    /// The registry the body lives in
    pub kind: BodyKind,
}

/// Any event the world records
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    Collision(CollisionEvent),
    Body(BodyEvent),
}

impl From<CollisionEvent> for PhysicsEvent {
    fn from(event: CollisionEvent) -> Self {
        Self::Collision(event)
    }
}

impl From<BodyEvent> for PhysicsEvent {
    fn from(event: BodyEvent) -> Self {
        Self::Body(event)
    }
}

/// Events in the order they happened.
///
/// After a step the queue holds that tick's contacts together with the registrations, commands
/// and teleports made since the previous step. Those are discarded when the following step starts.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<PhysicsEvent>,

    /// Number of oldest events that belong to an already reported tick
    stale: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<PhysicsEvent>) {
        self.events.push_back(event.into());
    }

    /// Removes and returns the oldest event
    pub fn pop(&mut self) -> Option<PhysicsEvent> {
        self.stale = self.stale.saturating_sub(1);
        self.events.pop_front()
    }

    /// Removes every event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = PhysicsEvent> + '_ {
        self.stale = 0;
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.stale = 0;
        self.events.clear();
    }

    /// Marks everything queued so far as reported
    pub(crate) fn mark_stale(&mut self) {
        self.stale = self.events.len();
    }

    /// Drops the events marked by the last [`mark_stale`](Self::mark_stale), keeping newer ones
    pub(crate) fn discard_stale(&mut self) {
        self.events.drain(..self.stale);
        self.stale = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhysicsEvent> {
        self.events.iter()
    }

    /// Collision events, oldest first
    pub fn collisions(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter().filter_map(|event| match event {
            PhysicsEvent::Collision(collision) => Some(collision),
            PhysicsEvent::Body(_) => None,
        })
    }

    /// Body events of one type, oldest first
    pub fn body_events(&self, event_type: BodyEventType) -> impl Iterator<Item = &BodyEvent> {
        self.events.iter().filter_map(move |event| match event {
            PhysicsEvent::Body(body) if body.event_type == event_type => Some(body),
            _ => None,
        })
    }

    /// Contacts made by one dynamic body
    pub fn collisions_of(&self, body: BodyId) -> impl Iterator<Item = &CollisionEvent> {
        self.collisions().filter(move |e| e.body == body)
    }

    /// Contacts against one static body
    pub fn collisions_with(&self, obstacle: BodyId) -> impl Iterator<Item = &CollisionEvent> {
        self.collisions().filter(move |e| e.obstacle == obstacle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(body: i32, obstacle: i32) -> CollisionEvent {
        CollisionEvent {
            body: BodyId(body),
            obstacle: BodyId(obstacle),
            normal: Vector2::unit_y(),
            depth: 1,
        }
    }

    #[test]
    fn keeps_arrival_order_across_kinds() {
        let mut queue = EventQueue::new();
        queue.push(BodyEvent {
            event_type: BodyEventType::Teleported,
            body: BodyId(1),
            kind: BodyKind::Dynamic,
        });
        queue.push(hit(1, 7));
        queue.push(hit(2, 7));
        queue.push(hit(1, 8));

        assert_eq!(queue.len(), 4);
        assert!(matches!(queue.pop(), Some(PhysicsEvent::Body(_))));

        let obstacles: Vec<_> = queue.collisions_of(BodyId(1)).map(|e| e.obstacle).collect();
        assert_eq!(obstacles, vec![BodyId(7), BodyId(8)]);
        assert_eq!(queue.collisions_with(BodyId(7)).count(), 2);
        assert_eq!(queue.body_events(BodyEventType::Teleported).count(), 0);

        assert_eq!(queue.drain().count(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn only_reported_events_are_discarded() {
        let mut queue = EventQueue::new();
        queue.push(hit(1, 7));
        queue.mark_stale();
        queue.push(hit(2, 8));

        queue.discard_stale();
        let obstacles: Vec<_> = queue.collisions().map(|e| e.obstacle).collect();
        assert_eq!(obstacles, vec![BodyId(8)]);

        // popping a stale event shrinks what is left to discard
        queue.mark_stale();
        queue.push(hit(3, 9));
        queue.pop();
        queue.discard_stale();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.collisions().next().map(|e| e.obstacle), Some(BodyId(9)));
    }
}
