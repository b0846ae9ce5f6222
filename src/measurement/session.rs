//! Two-phase atom selection workflow producing distance measurements.
//!
//! ```text
//!              toggle_active              add_atom
//!   Inactive ───────────────▶ ActiveNoSelection ───────▶ ActiveOneSelected
//!      ▲                         ▲        ▲                      │
//!      └─────── toggle_active ───┘        └── add_atom (append) ─┘
//! ```
//!
//! Any toggle clears the pending atom, so a selection never survives a
//! deactivate/reactivate cycle.

use super::atom::AtomSelection;
use super::model::{create_measurement, Measurement};

/// Observable phase of a [`MeasurementSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Measurement mode is off.
    Inactive,
    /// Mode is on and no atom is pending.
    ActiveNoSelection,
    /// Mode is on and one atom awaits its partner.
    ActiveOneSelected,
}

/// Result of feeding a picked atom into the session.
#[derive(Debug, PartialEq)]
pub enum AddAtomOutcome<'a> {
    /// The session is inactive; the atom was dropped.
    Ignored,
    /// The atom is now pending.
    Pending,
    /// The atom completed a measurement, which was appended.
    Completed(&'a Measurement),
}

/// Measurement mode state: ordered measurements, active flag and at most
/// one pending atom.
#[derive(Debug, Default)]
pub struct MeasurementSession {
    measurements: Vec<Measurement>,
    active: bool,
    selected: Option<AtomSelection>,
}

impl MeasurementSession {
    /// Fresh, inactive session with no measurements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measurements in creation order.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Whether measurement mode is on.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The pending first atom, if any.
    #[must_use]
    pub fn selected_atom(&self) -> Option<&AtomSelection> {
        self.selected.as_ref()
    }

    /// Current phase derived from the mode flag and pending atom.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (self.active, self.selected.is_some()) {
            (false, _) => SessionPhase::Inactive,
            (true, false) => SessionPhase::ActiveNoSelection,
            (true, true) => SessionPhase::ActiveOneSelected,
        }
    }

    /// Flip measurement mode. Always clears the pending atom.
    pub fn toggle_active(&mut self) {
        self.active = !self.active;
        self.selected = None;
    }

    /// Feed a picked atom into the session.
    ///
    /// Ignored while inactive. The first atom becomes pending; the second
    /// completes a measurement with the pending one and clears it.
    pub fn add_atom(&mut self, atom: AtomSelection) -> AddAtomOutcome<'_> {
        if !self.active {
            return AddAtomOutcome::Ignored;
        }
        match self.selected.take() {
            None => {
                self.selected = Some(atom);
                AddAtomOutcome::Pending
            }
            Some(first) => {
                let measurement = create_measurement(first, atom);
                log::debug!(
                    "measurement {} = {:.3} Å",
                    measurement.id(),
                    measurement.distance()
                );
                self.measurements.push(measurement);
                self.measurements
                    .last()
                    .map_or(AddAtomOutcome::Pending, AddAtomOutcome::Completed)
            }
        }
    }

    /// Remove the measurement with `id`. Returns whether one was removed.
    ///
    /// Remaining measurements keep their relative order; mode and pending
    /// atom are untouched.
    pub fn remove_measurement(&mut self, id: &str) -> bool {
        let before = self.measurements.len();
        self.measurements.retain(|m| m.id() != id);
        self.measurements.len() != before
    }

    /// Drop every measurement and the pending atom. Mode is kept.
    pub fn clear_measurements(&mut self) {
        self.measurements.clear();
        self.selected = None;
    }

    /// Drop the pending atom only.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
