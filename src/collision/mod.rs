//! Swept polygon-versus-polygon contact and the collide-and-slide response built on it.

mod sweep;
mod slide;

pub use self::sweep::{sweep_against, SweepHit};
pub use self::slide::{CollisionResolver, Contact, SlideOutcome, SlideTermination};
