pub mod timer;

pub use timer::Accumulator;
