pub mod ambient;
pub mod body;
pub mod bouncer;
pub mod debris;
pub mod explosion;
pub mod fragment;
pub mod integrator;
pub mod particles;

pub use ambient::{Bob, FloatingPath, Spinner, Starfield, StarfieldParams};
pub use body::KineticBody;
pub use bouncer::{Bouncer, BouncerParams, BouncingBody};
pub use debris::{DebrisField, DebrisParams, Fragment};
pub use explosion::{
    Detonation, ExplosionMachine, ExplosionParams, ExplosionState, Theme, Transition,
};
pub use fragment::{cell_count, fragment, fragment_model, FragmentDescriptor, FragmentOptions};
pub use integrator::Integrator;
pub use particles::{Particle, ParticleEmitter, ParticleId, ParticleParams, ParticlePool};
