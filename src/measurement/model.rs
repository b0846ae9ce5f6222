use glam::DVec3;
use rand::Rng;
use serde::Serialize;
use web_time::{SystemTime, UNIX_EPOCH};

use super::atom::{calculate_distance, AtomSelection};

const ID_PREFIX: &str = "measurement-";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One completed distance measurement between two picked atoms.
///
/// The distance is computed once at construction; fields are only readable
/// so it can never drift from the atoms it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    id: String,
    atom1: AtomSelection,
    atom2: AtomSelection,
    distance: f64,
}

impl Measurement {
    /// Session-unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// First picked atom.
    #[must_use]
    pub fn atom1(&self) -> &AtomSelection {
        &self.atom1
    }

    /// Second picked atom.
    #[must_use]
    pub fn atom2(&self) -> &AtomSelection {
        &self.atom2
    }

    /// Distance in Ångströms.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Label anchor halfway between the two atoms.
    #[must_use]
    pub fn midpoint(&self) -> DVec3 {
        (self.atom1.position + self.atom2.position) * 0.5
    }

    /// Distance text shown on the renderer, e.g. `"5.00 Å"`.
    #[must_use]
    pub fn label_text(&self) -> String {
        format!("{:.2} Å", self.distance)
    }
}

/// Generate a new measurement id: `measurement-{millis}-{9 base-36 chars}`.
#[must_use]
pub fn generate_measurement_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{ID_PREFIX}{millis}-{suffix}")
}

/// Build a measurement between two atoms with a fresh id.
#[must_use]
pub fn create_measurement(
    atom1: AtomSelection,
    atom2: AtomSelection,
) -> Measurement {
    let distance = calculate_distance(&atom1, &atom2);
    Measurement {
        id: generate_measurement_id(),
        atom1,
        atom2,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::measurement::atom::fixtures::{
        atom_at, origin, three_four_zero, unit_diagonal,
    };

    #[test]
    fn distance_matches_calculation() {
        let pairs = [
            (origin(), three_four_zero()),
            (origin(), unit_diagonal()),
            (atom_at(5, -1.0, 2.0, -3.0), atom_at(6, 4.0, 0.5, 9.0)),
        ];
        for (a, b) in pairs {
            let expected = calculate_distance(&a, &b);
            let m = create_measurement(a.clone(), b.clone());
            assert_eq!(m.distance(), expected);
            assert_eq!(m.atom1(), &a);
            assert_eq!(m.atom2(), &b);
        }
    }

    #[test]
    fn ids_are_prefixed_and_distinct() {
        let ids: HashSet<String> = (0..200)
            .map(|_| create_measurement(origin(), unit_diagonal()).id)
            .collect();
        assert_eq!(ids.len(), 200);
        assert!(ids.iter().all(|id| id.starts_with("measurement-")));
    }

    #[test]
    fn id_suffix_is_base36() {
        let id = generate_measurement_id();
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn label_and_midpoint() {
        let m = create_measurement(origin(), three_four_zero());
        assert_eq!(m.label_text(), "5.00 Å");
        assert_eq!(m.midpoint(), DVec3::new(1.5, 2.0, 0.0));
    }
}
