//! Distance, bond angle, and dihedral primitives over Cartesian points.

use super::error::Error;

pub type Point = [f64; 3];

/// Bond vectors shorter than this (Å) are treated as coincident atoms, and
/// plane normals shorter than this as collinear atoms.
pub const DEGENERATE_TOLERANCE: f64 = 1e-6;

#[inline]
fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: Point, b: Point) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: Point, b: Point) -> Point {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn norm(a: Point) -> f64 {
    dot(a, a).sqrt()
}

fn checked_norm(v: Point, label: &str) -> Result<f64, Error> {
    let n = norm(v);
    if n < DEGENERATE_TOLERANCE {
        Err(Error::degenerate(format!(
            "{label} bond vector has near-zero length ({n:.3e} Å)"
        )))
    } else {
        Ok(n)
    }
}

/// Euclidean distance in Å.
pub fn distance(a: Point, b: Point) -> f64 {
    norm(sub(a, b))
}

/// Angle A-B-C at `b`, in degrees within [0, 180].
pub fn bond_angle(a: Point, b: Point, c: Point) -> Result<f64, Error> {
    let ba = sub(a, b);
    let bc = sub(c, b);
    let denom = checked_norm(ba, "first")? * checked_norm(bc, "second")?;
    let cos = (dot(ba, bc) / denom).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// Signed torsion A-B-C-D in degrees within (-180, 180].
///
/// The sign follows the IUPAC convention: positive when, looking along B→C,
/// the A-B bond must rotate clockwise to eclipse C-D. Collinear A-B-C or
/// B-C-D is degenerate.
pub fn dihedral(a: Point, b: Point, c: Point, d: Point) -> Result<f64, Error> {
    let b1 = sub(b, a);
    let b2 = sub(c, b);
    let b3 = sub(d, c);
    checked_norm(b1, "first")?;
    let b2_len = checked_norm(b2, "central")?;
    checked_norm(b3, "third")?;

    let n1 = cross(b1, b2);
    let n2 = cross(b2, b3);
    for (normal, atoms) in [(n1, "first three"), (n2, "last three")] {
        if norm(normal) < DEGENERATE_TOLERANCE {
            return Err(Error::degenerate(format!("{atoms} atoms are collinear")));
        }
    }
    let b2_unit = [b2[0] / b2_len, b2[1] / b2_len, b2[2] / b2_len];

    let cos = dot(n1, n2);
    let sin = dot(cross(n1, n2), b2_unit);
    Ok(normalize_degrees(sin.atan2(cos).to_degrees()))
}

/// Maps an angle in [-180, 180] onto (-180, 180].
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    if angle <= -180.0 { angle + 360.0 } else { angle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn distance_of_3_4_5_triangle() {
        assert!((distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]) - 5.0).abs() < TOL);
        assert_eq!(distance([1.0, 2.0, 3.0], [1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn bond_angle_right_straight_and_zero() {
        let o = [0.0, 0.0, 0.0];
        let right = bond_angle([1.0, 0.0, 0.0], o, [0.0, 1.0, 0.0]).unwrap();
        assert!((right - 90.0).abs() < TOL);
        let straight = bond_angle([1.0, 0.0, 0.0], o, [-2.0, 0.0, 0.0]).unwrap();
        assert!((straight - 180.0).abs() < TOL);
        let folded = bond_angle([1.0, 0.0, 0.0], o, [3.0, 0.0, 0.0]).unwrap();
        assert!(folded.abs() < TOL);
    }

    #[test]
    fn bond_angle_tetrahedral() {
        let angle = bond_angle([1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, 1.0]).unwrap();
        assert!((angle - 109.471_220_634).abs() < 1e-6);
    }

    #[test]
    fn dihedral_sign_convention() {
        let angle = dihedral(
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        )
        .unwrap();
        assert!((angle - 90.0).abs() < TOL);

        let mirrored = dihedral(
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, -1.0, 1.0],
        )
        .unwrap();
        assert!((mirrored + 90.0).abs() < TOL);
    }

    #[test]
    fn trans_planar_arrangement_is_plus_180() {
        let omega = dihedral(
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, -1.0, 0.0],
        )
        .unwrap();
        assert!((omega - 180.0).abs() < TOL, "omega = {omega}");
    }

    #[test]
    fn cis_planar_arrangement_is_zero() {
        let omega = dihedral(
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
        )
        .unwrap();
        assert!(omega.abs() < TOL);
    }

    #[test]
    fn dihedral_is_invariant_under_translation() {
        let shift = |p: Point| [p[0] + 12.5, p[1] - 7.0, p[2] + 3.25];
        let pts = [
            [1.2, 0.3, -0.4],
            [0.0, 0.0, 0.0],
            [0.1, 1.4, 0.2],
            [1.0, 2.1, 1.3],
        ];
        let a = dihedral(pts[0], pts[1], pts[2], pts[3]).unwrap();
        let b = dihedral(shift(pts[0]), shift(pts[1]), shift(pts[2]), shift(pts[3])).unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn coincident_atoms_are_degenerate() {
        let p = [1.0, 1.0, 1.0];
        assert!(matches!(
            bond_angle(p, p, [0.0, 0.0, 0.0]),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            dihedral([0.0, 0.0, 0.0], p, p, [2.0, 0.0, 0.0]),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn collinear_atoms_leave_dihedral_undefined() {
        let straight = dihedral(
            [0.0, 0.0, 0.0],
            [1.5, 0.0, 0.0],
            [3.0, 0.0, 0.0],
            [3.0, 1.5, 0.0],
        );
        assert!(matches!(straight, Err(Error::DegenerateGeometry(ref m)) if m.contains("first three")));

        let straight_tail = dihedral(
            [0.0, 1.5, 0.0],
            [0.0, 0.0, 0.0],
            [1.5, 0.0, 0.0],
            [4.0, 0.0, 0.0],
        );
        assert!(matches!(straight_tail, Err(Error::DegenerateGeometry(ref m)) if m.contains("last three")));
    }

    #[test]
    fn normalize_maps_minus_180() {
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-179.5), -179.5);
    }

    fn point() -> impl Strategy<Value = Point> {
        [-5.0..5.0f64, -5.0..5.0f64, -5.0..5.0f64]
    }

    proptest! {
        #[test]
        fn dihedral_stays_in_range_and_flips_under_reflection(
            a in point(), b in point(), c in point(), d in point()
        ) {
            let Ok(angle) = dihedral(a, b, c, d) else {
                return Ok(());
            };
            prop_assert!(angle > -180.0 && angle <= 180.0);

            let mirror = |p: Point| [p[0], p[1], -p[2]];
            let reflected = dihedral(mirror(a), mirror(b), mirror(c), mirror(d)).unwrap();
            prop_assume!(angle.abs() < 179.0);
            prop_assert!((reflected + angle).abs() < 1e-6);
        }
    }
}
