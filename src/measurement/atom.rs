use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Snapshot of one atom at the moment it was picked.
///
/// Produced by the renderer's pick query and consumed by the measurement
/// session. Value type: copied around, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomSelection {
    /// Atom serial number, unique within a structure.
    pub serial: u32,
    /// Element symbol (e.g. `"C"`).
    pub elem: String,
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub resi: i32,
    /// Residue name (e.g. `"ALA"`).
    pub resn: String,
    /// Cartesian coordinates in Ångströms.
    pub position: DVec3,
}

impl AtomSelection {
    /// Build a selection from its parts.
    #[must_use]
    pub fn new(
        serial: u32,
        elem: impl Into<String>,
        chain: impl Into<String>,
        resi: i32,
        resn: impl Into<String>,
        position: DVec3,
    ) -> Self {
        Self {
            serial,
            elem: elem.into(),
            chain: chain.into(),
            resi,
            resn: resn.into(),
            position,
        }
    }
}

/// Euclidean distance between two atoms in Ångströms.
///
/// Symmetric, and zero whenever the coordinates coincide regardless of atom
/// identity.
#[must_use]
pub fn calculate_distance(a: &AtomSelection, b: &AtomSelection) -> f64 {
    let d = a.position - b.position;
    (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
}

/// Display label, e.g. `"ALA10 C (Chain A)"`.
#[must_use]
pub fn format_atom_label(atom: &AtomSelection) -> String {
    format!(
        "{}{} {} (Chain {})",
        atom.resn, atom.resi, atom.elem, atom.chain
    )
}


#[cfg(test)]
mod tests {
    use super::fixtures::{atom_at, origin, three_four_zero, unit_diagonal};
    use super::*;

    #[test]
    fn three_four_five_triangle() {
        assert_eq!(calculate_distance(&origin(), &three_four_zero()), 5.0);
    }

    #[test]
    fn unit_cube_diagonal() {
        let d = calculate_distance(&origin(), &unit_diagonal());
        assert!((d - 1.732_050_807_568_877).abs() < 1e-12);
    }

    #[test]
    fn small_gap_far_from_origin_keeps_precision() {
        let a = atom_at(1, 9_999.125, -8_765.5, 4_321.25);
        let b = atom_at(2, 9_999.126, -8_765.5, 4_321.25);
        let d = calculate_distance(&a, &b);
        assert!((d - 0.001).abs() < 1e-9, "{d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = atom_at(1, -2.5, 7.25, 0.125);
        let b = atom_at(2, 11.0, -3.0, 4.5);
        assert_eq!(calculate_distance(&a, &b), calculate_distance(&b, &a));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = atom_at(7, 12.3, -4.5, 6.7);
        assert_eq!(calculate_distance(&a, &a), 0.0);
    }

    #[test]
    fn distinct_atoms_at_same_point_are_zero_apart() {
        let a = atom_at(1, 2.0, 2.0, 2.0);
        let mut b = atom_at(99, 2.0, 2.0, 2.0);
        b.elem = "O".into();
        assert_eq!(calculate_distance(&a, &b), 0.0);
    }

    #[test]
    fn label_format() {
        assert_eq!(format_atom_label(&origin()), "ALA10 C (Chain A)");
        let atom =
            AtomSelection::new(42, "N", "B", 117, "GLY", glam::DVec3::ZERO);
        assert_eq!(format_atom_label(&atom), "GLY117 N (Chain B)");
    }
}
