//! Domain events, event envelopes and the command abstraction.
//!
//! Everything here is aggregate-agnostic; the order domain plugs its concrete
//! event enum and command types into these traits.

pub mod command;
pub mod envelope;
pub mod event;
pub mod handler;

pub use command::Command;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
