use crate::core::{
    BodyId, BodyKind, SimulationConfig, GravityType, EventQueue, BodyEvent, BodyEventType,
    CollisionEvent, BodyStorage, FrameSnapshot,
};
use crate::core::storage::Storage;
use crate::bodies::{body_flags::BodyFlags, BodyCommand, DynamicBody, StaticBody};
use crate::collision::{CollisionResolver, SlideTermination};
use crate::math::Vector2;
use crate::Result;

/// Per-tick summary returned by [`PhysicsWorld::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Number of dynamic bodies resolved
    pub bodies: usize,

    /// Number of obstacle contacts across all bodies
    pub contacts: usize,

    /// Number of bodies that ran out of slide passes
    pub depth_limited: usize,
}

/// The registry of static and dynamic bodies and the tick that advances them.
///
/// Static and dynamic bodies live in separate id spaces. Bodies are never removed.
pub struct PhysicsWorld {
    /// Immovable obstacles
    statics: BodyStorage<StaticBody>,

    /// Bodies advanced every tick
    dynamics: BodyStorage<DynamicBody>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// Number of completed ticks
    tick: u64,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self {
            statics: BodyStorage::new(),
            dynamics: BodyStorage::new(),
            config: SimulationConfig::default(),
            events: EventQueue::new(),
            tick: 0,
            time: 0.0,
        }
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::new() })
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns the number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: GravityType) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> GravityType {
        self.config.gravity
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Adds a static body under the next automatic id
    pub fn add_static(&mut self, body: StaticBody) -> Result<BodyId> {
        let id = self.statics.add(body)?;
        self.body_added(id, BodyKind::Static);
        Ok(id)
    }

    /// Adds a static body under a chosen id. Fails if the id is taken.
    pub fn insert_static(&mut self, id: BodyId, body: StaticBody) -> Result<()> {
        self.statics.insert(id, body)?;
        self.body_added(id, BodyKind::Static);
        Ok(())
    }

    /// Adds a dynamic body under the next automatic id
    pub fn add_dynamic(&mut self, body: DynamicBody) -> Result<BodyId> {
        let id = self.dynamics.add(body)?;
        self.body_added(id, BodyKind::Dynamic);
        Ok(id)
    }

    /// Adds a dynamic body under a chosen id. Fails if the id is taken.
    pub fn insert_dynamic(&mut self, id: BodyId, body: DynamicBody) -> Result<()> {
        self.dynamics.insert(id, body)?;
        self.body_added(id, BodyKind::Dynamic);
        Ok(())
    }

    fn body_added(&mut self, body: BodyId, kind: BodyKind) {
        debug!("added {:?} body {}", kind, body);
        self.events.push(BodyEvent {
            event_type: BodyEventType::Added,
            body,
            kind,
        });
    }

    /// Gets a static body by its id
    pub fn get_static(&self, id: BodyId) -> Result<&StaticBody> {
        self.statics.get_body(id)
    }

    /// Gets a dynamic body by its id
    pub fn get_dynamic(&self, id: BodyId) -> Result<&DynamicBody> {
        self.dynamics.get_body(id)
    }

    /// Gets a mutable reference to a dynamic body by its id
    pub fn get_dynamic_mut(&mut self, id: BodyId) -> Result<&mut DynamicBody> {
        self.dynamics.get_body_mut(id)
    }

    pub fn statics(&self) -> &BodyStorage<StaticBody> {
        &self.statics
    }

    pub fn dynamics(&self) -> &BodyStorage<DynamicBody> {
        &self.dynamics
    }

    /// `velocity += force * dt` on a dynamic body
    pub fn accelerate(&mut self, id: BodyId, force: Vector2, dt: f32) -> Result<()> {
        self.apply(id, BodyCommand::Accelerate { force, dt })
    }

    /// `velocity += force` on a dynamic body
    pub fn add_force(&mut self, id: BodyId, force: Vector2) -> Result<()> {
        self.apply(id, BodyCommand::AddForce(force))
    }

    /// Replaces the velocity of a dynamic body
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vector2) -> Result<()> {
        self.apply(id, BodyCommand::SetVelocity(velocity))
    }

    /// Teleports a dynamic body; the next snapshot pair is flagged as discontinuous
    pub fn set_position(&mut self, id: BodyId, position: Vector2) -> Result<()> {
        self.apply(id, BodyCommand::SetPosition(position))
    }

    /// Applies a driver command to a dynamic body
    pub fn apply(&mut self, id: BodyId, command: BodyCommand) -> Result<()> {
        self.dynamics.get_body_mut(id)?.apply(command);

        if let BodyCommand::SetPosition(_) = command {
            self.events.push(BodyEvent {
                event_type: BodyEventType::Teleported,
                body: id,
                kind: BodyKind::Dynamic,
            });
        }
        Ok(())
    }

    /// Advances every dynamic body by one tick of `dt` seconds, in ascending id order.
    ///
    /// Gravity is integrated first, then each body is resolved by collide-and-slide against all
    /// static bodies. Events reported by the previous step are discarded; events raised since
    /// then, such as teleports, stay queued alongside this tick's contacts.
    pub fn step(&mut self, dt: f32) -> TickStats {
        self.events.discard_stale();

        let resolver = CollisionResolver::from_config(&self.config);
        let gravity = self.config.gravity.acceleration();
        let mut stats = TickStats::default();

        for (id, body) in self.dynamics.iter_mut() {
            if body.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY) {
                body.accelerate(gravity, dt);
            }

            let outcome = resolver.resolve(body, &self.statics, dt);

            stats.bodies += 1;
            stats.contacts += outcome.contacts.len();
            if outcome.termination == SlideTermination::DepthLimit {
                stats.depth_limited += 1;
            }

            for contact in outcome.contacts {
                self.events.push(CollisionEvent {
                    body: id,
                    obstacle: contact.obstacle,
                    normal: contact.normal,
                    depth: contact.depth,
                });
            }
        }

        self.events.mark_stale();
        self.tick += 1;
        self.time += dt;

        trace!("tick {} resolved {:?}", self.tick, stats);
        stats
    }

    /// Captures an independent copy of every body's drawable state
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }

    /// Returns true if any dynamic body was teleported since the last call, clearing the marks
    pub fn take_discontinuity(&mut self) -> bool {
        let mut teleported = false;
        for (_, body) in self.dynamics.iter_mut() {
            teleported |= body.flags.contains(BodyFlags::TELEPORTED);
            body.flags.remove(BodyFlags::TELEPORTED);
        }
        teleported
    }

    /// Returns the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns the event queue mutably, for draining
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Returns the total number of bodies
    pub fn body_count(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::PhysicsBody;
    use crate::core::AUTO_ID_START;
    use crate::shapes::Polygon;
    use approx::assert_relative_eq;

    fn square() -> DynamicBody {
        DynamicBody::new(Polygon::rectangle(1.0, 1.0).unwrap(), Vector2::ZERO).unwrap()
    }

    #[test]
    fn id_spaces_are_separate() {
        let mut world = PhysicsWorld::new();
        let a = world.add_dynamic(square()).unwrap();
        let b = world
            .add_static(StaticBody::new(Polygon::default(), Vector2::ZERO).unwrap())
            .unwrap();
        assert_eq!(a, BodyId(AUTO_ID_START));
        assert_eq!(b, BodyId(AUTO_ID_START));
        assert_eq!(world.body_count(), 2);
        assert_eq!(world.get_events().body_events(BodyEventType::Added).count(), 2);
    }

    #[test]
    fn commands_on_unknown_bodies_fail() {
        let mut world = PhysicsWorld::new();
        assert!(world.set_velocity(BodyId(3), Vector2::one()).is_err());
    }

    #[test]
    fn gravity_integrates_before_moving() {
        let mut world = PhysicsWorld::new();
        let id = world.add_dynamic(square()).unwrap();
        world.step(0.01);

        let body = world.get_dynamic(id).unwrap();
        assert_relative_eq!(body.velocity(), Vector2::new(0.0, -6.0), epsilon = 1.0e-4);
        assert_relative_eq!(body.position(), Vector2::new(0.0, -0.06), epsilon = 1.0e-5);
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn teleports_are_reported_once() {
        let mut world = PhysicsWorld::new();
        let id = world.add_dynamic(square()).unwrap();
        assert!(!world.take_discontinuity());

        world.set_position(id, Vector2::new(0.0, 100.0)).unwrap();
        assert!(world.take_discontinuity());
        assert!(!world.take_discontinuity());
    }

    #[test]
    fn events_survive_until_the_step_after_they_are_reported() {
        let mut world = PhysicsWorld::new();
        let id = world.add_dynamic(square()).unwrap();
        world.set_position(id, Vector2::new(0.0, 100.0)).unwrap();

        world.step(0.01);
        let events = world.get_events();
        assert_eq!(events.body_events(BodyEventType::Added).count(), 1);
        assert_eq!(events.body_events(BodyEventType::Teleported).count(), 1);

        world.step(0.01);
        assert!(world.get_events().is_empty());
    }
}
