use crate::bodies::{body_flags::BodyFlags, DynamicBody, StaticBody};
use crate::collision::sweep_against;
use crate::core::{BodyId, BodyStorage, SimulationConfig, Storage};
use crate::math::Vector2;

/// One obstacle contact recorded while resolving a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The static body that stopped the sweep
    pub obstacle: BodyId,

    /// Contact normal pointing out of the obstacle
    pub normal: Vector2,

    /// Slide pass the contact happened in, starting at 1
    pub depth: u32,
}

/// Why a collide-and-slide resolution stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTermination {
    /// The requested displacement was exactly zero
    NoMovement,

    /// The last sweep completed without contact
    Free,

    /// The body used up its allowed number of slide passes
    DepthLimit,

    /// No simulated time was left after the last contact
    TimeExhausted,
}

/// Result of resolving one body for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct SlideOutcome {
    /// Contacts in the order they were found
    pub contacts: Vec<Contact>,

    /// Number of sweeps performed
    pub passes: u32,

    pub termination: SlideTermination,
}

/// Collide-and-slide solver for dynamic bodies against static obstacles.
///
/// A pass sweeps the body against every obstacle, moves it by the clipped displacement and, on
/// contact, removes the velocity component along the contact normal before adding a small outward
/// bias. The remaining share of the time step is spent in the next pass, starting slightly pushed
/// out of the contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Slack on segment parameters
    pub padding: f32,

    /// Outward velocity added after every contact
    pub slide_bias: f32,

    /// Outward displacement added before every re-sweep
    pub escape_nudge: f32,
}

impl CollisionResolver {
    pub fn new(padding: f32, slide_bias: f32, escape_nudge: f32) -> Self {
        Self { padding, slide_bias, escape_nudge }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.intersection_padding, config.slide_bias, config.escape_nudge)
    }

    /// Moves `body` by `velocity * dt`, sliding along whatever obstacles it meets
    pub fn resolve(&self, body: &mut DynamicBody, obstacles: &BodyStorage<StaticBody>, dt: f32) -> SlideOutcome {
        let mut contacts = Vec::new();
        let mut displacement = body.velocity * dt;
        let mut time = dt;
        let mut depth = 1;
        let mut passes = 0;

        body.flags.remove(BodyFlags::IN_CONTACT);

        let termination = loop {
            if displacement == Vector2::ZERO {
                break SlideTermination::NoMovement;
            }

            let requested = displacement;
            let mut contact = None;
            for (id, obstacle) in obstacles.iter() {
                if let Some(hit) = sweep_against(body, obstacle, displacement, self.padding) {
                    displacement = hit.displacement;
                    contact = Some((id, hit.normal));
                }
            }

            body.position += displacement;
            passes += 1;

            let Some((obstacle, normal)) = contact else {
                break SlideTermination::Free;
            };

            body.flags.insert(BodyFlags::IN_CONTACT);
            contacts.push(Contact { obstacle, normal, depth });

            let travelled = displacement.max_abs_component() / requested.max_abs_component();
            let remaining = (1.0 - travelled) * time;

            body.velocity = body.velocity.project_on_line(&normal) + normal * self.slide_bias;

            if depth >= body.max_collision_depth() {
                trace!("slide stopped at depth {} with {:.5}s left", depth, remaining);
                break SlideTermination::DepthLimit;
            }
            if remaining <= 0.0 {
                break SlideTermination::TimeExhausted;
            }

            displacement = body.velocity * remaining + normal * self.escape_nudge;
            time = remaining;
            depth += 1;
        };

        SlideOutcome {
            contacts,
            passes,
            termination,
        }
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
