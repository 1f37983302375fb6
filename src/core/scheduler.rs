use crate::bodies::BodyCommand;
use crate::core::{
    BodyId, FrameExchange, FrameReader, PhysicsWorld, SimulationConfig, TickPredictor,
};
use crate::error::PhysicsError;
use crate::Result;

use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Hook run on the simulation thread around every tick
pub trait TickController: Send + 'static {
    /// Called before the world is stepped; drivers apply forces here
    fn before_tick(&mut self, world: &mut PhysicsWorld, dt: f32);

    /// Called after the world is stepped and before the snapshot is published. The event queue
    /// holds this tick's contacts and the body events raised since the previous tick.
    fn after_tick(&mut self, _world: &PhysicsWorld) {}
}

impl<F> TickController for F
where
    F: FnMut(&mut PhysicsWorld, f32) + Send + 'static,
{
    fn before_tick(&mut self, world: &mut PhysicsWorld, dt: f32) {
        self(world, dt)
    }
}

struct NoController;

impl TickController for NoController {
    fn before_tick(&mut self, _world: &mut PhysicsWorld, _dt: f32) {}
}

/// Shared flag asking the simulation loop to exit. Really just an `Arc<AtomicBool>`.
#[derive(Default, Debug, Clone)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Sends driver commands to the simulation thread; they apply at the start of the next tick
#[derive(Debug, Clone)]
pub struct CommandSender(Sender<(BodyId, BodyCommand)>);

impl CommandSender {
    pub fn send(&self, body: BodyId, command: BodyCommand) -> Result<()> {
        self.0
            .send((body, command))
            .map_err(|_| PhysicsError::SchedulerError("simulation has shut down".to_string()))
    }
}

/// Runs a [`PhysicsWorld`] at a fixed wall-clock interval and publishes a snapshot after every
/// tick.
pub struct FixedStepScheduler {
    world: PhysicsWorld,
    controller: Box<dyn TickController>,
    exchange: FrameExchange,
    send_command: Sender<(BodyId, BodyCommand)>,
    recv_command: Receiver<(BodyId, BodyCommand)>,
    stop: StopToken,
    next_tick: Instant,
}

impl FixedStepScheduler {
    /// Wraps a world; both snapshot buffers start out as its current state
    pub fn new(world: PhysicsWorld) -> Result<Self> {
        world.get_config().validate()?;

        let (send_command, recv_command) = crossbeam_channel::unbounded();
        let now = Instant::now();
        Ok(Self {
            exchange: FrameExchange::new(world.snapshot(), now),
            world,
            controller: Box::new(NoController),
            send_command,
            recv_command,
            stop: StopToken::new(),
            next_tick: now,
        })
    }

    pub fn with_controller(mut self, controller: impl TickController) -> Self {
        self.controller = Box::new(controller);
        self
    }

    fn config(&self) -> &SimulationConfig {
        self.world.get_config()
    }

    /// Creates a consumer for the published snapshots
    pub fn reader(&self) -> FrameReader {
        FrameReader::new(self.exchange.clone(), TickPredictor::from_config(self.config()))
    }

    pub fn command_sender(&self) -> CommandSender {
        CommandSender(self.send_command.clone())
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Runs one tick immediately: drain commands, run the controller, step, publish
    pub fn run_tick(&mut self) {
        let tick_start = Instant::now();
        let dt = self.world.get_config().time_step();

        while let Ok((body, command)) = self.recv_command.try_recv() {
            if let Err(e) = self.world.apply(body, command) {
                warn!("dropping {:?} for body {}: {}", command, body, e);
            }
        }

        self.controller.before_tick(&mut self.world, dt);
        let stats = self.world.step(dt);
        self.controller.after_tick(&self.world);

        let interpolate = !self.world.take_discontinuity();
        if !interpolate {
            debug!("tick {} is discontinuous, interpolation disabled", self.world.tick_count());
        }
        self.exchange.publish(self.world.snapshot(), tick_start, interpolate);

        trace!("tick {} took {:?} ({:?})", self.world.tick_count(), tick_start.elapsed(), stats);
    }

    /// Runs ticks until the stop token is set and hands the world back
    pub fn run(mut self) -> PhysicsWorld {
        info!("simulation running at {:?} per tick", self.config().tick_interval);
        self.next_tick = Instant::now();

        while !self.stop.is_stopped() {
            self.run_tick();
            self.schedule_next_tick();
            self.wait_for_next_tick();
        }

        info!("simulation stopped after {} ticks", self.world.tick_count());
        self.world
    }

    /// Update `next_tick`. After an overrun the next tick is due at once; missed ticks are not
    /// made up.
    fn schedule_next_tick(&mut self) {
        let interval = self.config().tick_interval;
        let now = Instant::now();
        if let Some(behind) = next_deadline(&mut self.next_tick, interval, now) {
            warn!("running too slow, tick overran by {:?}", behind);
        }
    }

    /// Sleep coarsely until close to the boundary, then in small slices until it passes.
    fn wait_for_next_tick(&self) {
        let margin = self.config().sleep_margin;
        let slice = self.config().spin_granularity;

        let now = Instant::now();
        if let Some(coarse) = self.next_tick.checked_duration_since(now).and_then(|d| d.checked_sub(margin)) {
            thread::sleep(coarse);
        }

        loop {
            let now = Instant::now();
            if now >= self.next_tick || self.stop.is_stopped() {
                break;
            }
            thread::sleep(slice.min(self.next_tick - now));
        }
    }

    /// Moves the loop onto its own thread
    pub fn spawn(self) -> Result<SchedulerHandle> {
        let stop = self.stop_token();
        let commands = self.command_sender();
        let reader = self.reader();

        let thread = thread::Builder::new()
            .name("polyslide-sim".to_string())
            .spawn(move || self.run())
            .map_err(|e| PhysicsError::SchedulerError(format!("could not spawn simulation thread: {}", e)))?;

        Ok(SchedulerHandle {
            thread: Some(thread),
            stop,
            commands,
            reader,
        })
    }
}

/// Advances `deadline` by one interval. When that is already in the past the deadline becomes
/// `now` and the overrun is returned.
fn next_deadline(deadline: &mut Instant, interval: Duration, now: Instant) -> Option<Duration> {
    *deadline += interval;
    let behind = now.checked_duration_since(*deadline).filter(|d| !d.is_zero())?;
    *deadline = now;
    Some(behind)
}

/// Handle to a running simulation thread.
#[derive(Debug)]
pub struct SchedulerHandle {
    thread: Option<JoinHandle<PhysicsWorld>>,
    stop: StopToken,
    commands: CommandSender,
    reader: FrameReader,
}

impl SchedulerHandle {
    /// New consumer for the published snapshots
    pub fn reader(&self) -> FrameReader {
        self.reader.clone()
    }

    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Queues a command for the next tick
    pub fn send(&self, body: BodyId, command: BodyCommand) -> Result<()> {
        self.commands.send(body, command)
    }

    /// Stop the simulation cleanly, wait for it to shut down and take the world back.
    pub fn stop(mut self) -> Result<PhysicsWorld> {
        self.inner_stop()
    }

    fn inner_stop(&mut self) -> Result<PhysicsWorld> {
        self.stop.stop();
        let thread = self
            .thread
            .take()
            .ok_or_else(|| PhysicsError::SchedulerError("simulation already stopped".to_string()))?;
        thread.join().map_err(|_| {
            error!("simulation thread panicked");
            PhysicsError::SchedulerError("simulation thread panicked".to_string())
        })
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            warn!("SchedulerHandle dropped without being stopped (stopping now)");
            let _ = self.inner_stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{DynamicBody, PhysicsBody};
    use crate::core::GravityType;
    use crate::math::Vector2;
    use crate::shapes::Polygon;
    use crate::core::BodyEventType;
    use parking_lot::Mutex;

    const MS: Duration = Duration::from_millis(1);

    fn world_with_body() -> (PhysicsWorld, BodyId) {
        let mut world = PhysicsWorld::new();
        world.set_gravity(GravityType::None);
        let id = world
            .add_dynamic(DynamicBody::new(Polygon::default(), Vector2::ZERO).unwrap())
            .unwrap();
        (world, id)
    }

    #[test]
    fn commands_apply_at_next_tick() {
        let (world, id) = world_with_body();
        let mut scheduler = FixedStepScheduler::new(world).unwrap();
        let commands = scheduler.command_sender();

        commands.send(id, BodyCommand::SetVelocity(Vector2::new(100.0, 0.0))).unwrap();
        commands.send(BodyId(99), BodyCommand::AddForce(Vector2::one())).unwrap();
        scheduler.run_tick();

        let body = scheduler.world().get_dynamic(id).unwrap();
        assert!((body.position().x - 1.0).abs() < 1.0e-4);
    }

    #[test]
    fn teleport_disables_interpolation_for_one_tick() {
        let (world, id) = world_with_body();
        let mut scheduler = FixedStepScheduler::new(world).unwrap();
        let mut reader = scheduler.reader();

        scheduler.run_tick();
        assert!(reader.sample().interpolate);

        scheduler.command_sender().send(id, BodyCommand::SetPosition(Vector2::new(0.0, 50.0))).unwrap();
        scheduler.run_tick();
        let sample = reader.sample();
        assert!(!sample.interpolate);
        assert_eq!(sample.alpha, 1.0);
        assert_eq!(sample.current.dynamics[&id].position, Vector2::new(0.0, 50.0));

        scheduler.run_tick();
        assert!(reader.sample().interpolate);
    }

    #[test]
    fn controller_runs_before_every_tick() {
        let (world, id) = world_with_body();
        let mut scheduler = FixedStepScheduler::new(world)
            .unwrap()
            .with_controller(move |world: &mut PhysicsWorld, dt: f32| {
                world.accelerate(id, Vector2::new(1500.0, 0.0), dt).unwrap();
            });

        scheduler.run_tick();
        scheduler.run_tick();
        let velocity = scheduler.world().get_dynamic(id).unwrap().velocity();
        assert!((velocity.x - 30.0).abs() < 1.0e-3);
    }

    #[test]
    fn on_time_ticks_keep_their_grid() {
        let start = Instant::now();
        let mut deadline = start;
        assert_eq!(next_deadline(&mut deadline, 10 * MS, start + 4 * MS), None);
        assert_eq!(deadline, start + 10 * MS);
    }

    #[test]
    fn overrun_tick_is_followed_immediately() {
        let start = Instant::now();
        let mut deadline = start;
        // the tick started at `start` took 13ms
        let now = start + 13 * MS;
        assert_eq!(next_deadline(&mut deadline, 10 * MS, now), Some(3 * MS));
        assert_eq!(deadline, now);

        // the following tick is paced from where the late one began
        assert_eq!(next_deadline(&mut deadline, 10 * MS, now + 2 * MS), None);
        assert_eq!(deadline, now + 10 * MS);
    }

    #[test]
    fn loop_does_not_idle_after_an_overrun() {
        let (world, _) = world_with_body();
        let mut scheduler = FixedStepScheduler::new(world).unwrap();
        scheduler.next_tick = Instant::now() - 13 * MS;

        let before = Instant::now();
        scheduler.schedule_next_tick();
        scheduler.wait_for_next_tick();
        assert!(before.elapsed() < 5 * MS, "waited {:?} after an overrun", before.elapsed());
    }

    struct TeleportWatcher(Arc<Mutex<Vec<BodyId>>>);

    impl TickController for TeleportWatcher {
        fn before_tick(&mut self, _world: &mut PhysicsWorld, _dt: f32) {}

        fn after_tick(&mut self, world: &PhysicsWorld) {
            self.0.lock().extend(
                world
                    .get_events()
                    .body_events(BodyEventType::Teleported)
                    .map(|e| e.body),
            );
        }
    }

    #[test]
    fn after_tick_sees_commands_of_the_same_tick() {
        let (world, id) = world_with_body();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = FixedStepScheduler::new(world)
            .unwrap()
            .with_controller(TeleportWatcher(Arc::clone(&seen)));

        scheduler.command_sender().send(id, BodyCommand::SetPosition(Vector2::new(0.0, 9.0))).unwrap();
        scheduler.run_tick();
        assert_eq!(*seen.lock(), vec![id]);

        // reported once, not again on the next tick
        scheduler.run_tick();
        assert_eq!(*seen.lock(), vec![id]);
    }
}
