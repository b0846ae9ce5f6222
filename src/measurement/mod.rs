//! Inter-atomic distance measurement.
//!
//! Pure distance/label helpers, the [`Measurement`] entity, and the
//! [`MeasurementSession`] state machine that turns pairs of picked atoms
//! into measurements.

mod atom;
mod model;
mod session;

pub use atom::{calculate_distance, format_atom_label, AtomSelection};
pub use model::{create_measurement, generate_measurement_id, Measurement};
pub use session::{AddAtomOutcome, MeasurementSession, SessionPhase};

#[cfg(test)]
pub(crate) use atom::fixtures;
