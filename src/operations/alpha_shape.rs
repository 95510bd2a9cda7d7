use std::collections::{BTreeMap, HashSet};

use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::geometry::{MultiPolygon, Polygon, Ring};
use crate::math::circumcircle::circumradius;
use crate::math::polygon_2d::{point_in_ring, rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;

/// Outcome of one concave-hull attempt.
#[derive(Debug, Clone)]
pub enum HullOutcome {
    /// A non-empty polygon or multipolygon was produced.
    Accepted(MultiPolygon),
    /// The hull degenerated (empty or non-areal) at this tightness.
    Rejected,
    /// The point configuration does not admit the computation: fewer than
    /// three distinct points, a collinear cloud, non-finite coordinates,
    /// or a zero-area triangle with an undefined circumcircle.
    NumericalFailure,
}

/// Computes the concave hull ("alpha shape") of a point cloud.
///
/// A triangle of the Delaunay triangulation survives when its circumradius
/// is below `1 / alpha`: larger alpha hugs the cloud more tightly, alpha
/// approaching zero degenerates to the convex hull. The union of surviving
/// triangles is returned in normalized multipolygon form.
///
/// Pure with respect to its inputs; no state is retained between calls.
pub struct AlphaShape<'a> {
    coordinates: &'a [[f64; 2]],
    alpha: f64,
}

impl<'a> AlphaShape<'a> {
    /// Creates a new `AlphaShape` computation.
    #[must_use]
    pub fn new(coordinates: &'a [[f64; 2]], alpha: f64) -> Self {
        Self { coordinates, alpha }
    }

    /// Executes the hull computation.
    #[must_use]
    pub fn execute(&self) -> HullOutcome {
        let mut triangulation = DelaunayTriangulation::<SpadePoint2<f64>>::new();
        for c in self.coordinates {
            if triangulation.insert(SpadePoint2::new(c[0], c[1])).is_err() {
                return HullOutcome::NumericalFailure;
            }
        }

        let radius_limit = if self.alpha > 0.0 {
            1.0 / self.alpha
        } else {
            f64::INFINITY
        };

        // Filter triangles by circumradius.
        let mut kept: HashSet<usize> = HashSet::new();
        let mut triangulated = false;
        for face in triangulation.inner_faces() {
            triangulated = true;
            let verts = face.vertices();
            let a = to_point(verts[0].position());
            let b = to_point(verts[1].position());
            let c = to_point(verts[2].position());
            match circumradius(&a, &b, &c) {
                Some(radius) if radius < radius_limit => {
                    kept.insert(face.fix().index());
                }
                Some(_) => {}
                None => return HullOutcome::NumericalFailure,
            }
        }

        // Duplicate, collinear, or too-few points never triangulate.
        if !triangulated {
            return HullOutcome::NumericalFailure;
        }
        if kept.is_empty() {
            return HullOutcome::Rejected;
        }

        let rings = trace_boundary_rings(&triangulation, &kept);
        let multi = assemble_rings(rings);
        if multi.is_empty() {
            HullOutcome::Rejected
        } else {
            HullOutcome::Accepted(multi)
        }
    }
}

fn to_point(p: SpadePoint2<f64>) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Extracts the boundary rings of the kept-triangle region.
///
/// A directed edge is a boundary edge when its face is kept and the face
/// across it is not. Edges are stitched head-to-tail into closed rings;
/// since faces wind counter-clockwise, exterior rings come out
/// counter-clockwise and hole rings clockwise.
fn trace_boundary_rings(
    triangulation: &DelaunayTriangulation<SpadePoint2<f64>>,
    kept: &HashSet<usize>,
) -> Vec<Vec<Point2>> {
    // Outgoing boundary edges keyed by source vertex (BTreeMap keeps the
    // stitching order deterministic).
    let mut outgoing: BTreeMap<usize, Vec<(usize, Point2)>> = BTreeMap::new();
    for face in triangulation.inner_faces() {
        if !kept.contains(&face.fix().index()) {
            continue;
        }
        for edge in face.adjacent_edges() {
            let neighbor_kept = edge
                .rev()
                .face()
                .as_inner()
                .is_some_and(|f| kept.contains(&f.fix().index()));
            if neighbor_kept {
                continue;
            }
            let from = edge.from();
            outgoing
                .entry(from.fix().index())
                .or_default()
                .push((edge.to().fix().index(), to_point(from.position())));
        }
    }

    let mut rings = Vec::new();
    loop {
        let Some(start) = outgoing
            .iter()
            .find(|(_, edges)| !edges.is_empty())
            .map(|(&v, _)| v)
        else {
            break;
        };

        let mut ring = Vec::new();
        let mut current = start;
        loop {
            let Some((next, position)) = outgoing.get_mut(&current).and_then(Vec::pop) else {
                break;
            };
            ring.push(position);
            current = next;
            if current == start {
                break;
            }
        }
        if ring.len() >= 3 {
            rings.push(rotate_to_canonical_start(&ring));
        }
    }
    rings
}

/// Groups boundary rings into polygons: counter-clockwise rings are
/// shells, clockwise rings are holes assigned to the smallest shell that
/// contains them.
fn assemble_rings(rings: Vec<Vec<Point2>>) -> MultiPolygon {
    let mut shells: Vec<(Vec<Point2>, f64)> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();
    for ring in rings {
        let area = signed_area_2d(&ring);
        if area > 0.0 {
            shells.push((ring, area));
        } else if area < 0.0 {
            holes.push(ring);
        }
    }

    let mut assigned: Vec<Vec<Ring>> = vec![Vec::new(); shells.len()];
    for hole in holes {
        let probe = hole[0];
        let mut best: Option<(usize, f64)> = None;
        for (i, (shell, area)) in shells.iter().enumerate() {
            if point_in_ring(&probe, shell) && best.is_none_or(|(_, a)| *area < a) {
                best = Some((i, *area));
            }
        }
        if let Some((i, _)) = best {
            assigned[i].push(Ring::new(hole));
        }
    }

    let polygons = shells
        .into_iter()
        .zip(assigned)
        .map(|((shell, _), shell_holes)| Polygon::new(Ring::new(shell), shell_holes))
        .collect();
    MultiPolygon::new(polygons)
}
