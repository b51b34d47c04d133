//! Static collision sphere.

use crate::float::Float;
use crate::forces::DEGENERATE_EPSILON;
use crate::vec::Vec3;

/// A fixed sphere the cloth drapes over.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

/// Outcome of testing one node against the sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Contact<F: Float> {
    /// The node is outside; nothing changed.
    Separated,
    /// The node was pushed back onto the surface.
    Resolved { pos: Vec3<F>, vel: Vec3<F> },
    /// The node sits on the center, so there is no contact normal.
    Degenerate,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, radius }
    }

    /// Whether `pos` is inside or on the surface.
    pub fn contains(&self, pos: Vec3<F>) -> bool {
        (pos - self.center).length() <= self.radius
    }

    /// Project a node inside (or on) the sphere back onto its surface, so
    /// that afterwards `|pos - center| >= radius` holds as measured.
    ///
    /// The inward normal velocity is removed and tangential velocity is kept;
    /// a node moving outward keeps its velocity untouched.
    pub fn resolve(&self, pos: Vec3<F>, vel: Vec3<F>) -> Contact<F> {
        let offset = pos - self.center;
        if offset.length() > self.radius {
            return Contact::Separated;
        }
        let Some(normal) = offset.try_normalize(F::from_f32(DEGENERATE_EPSILON)) else {
            return Contact::Degenerate;
        };

        let vel = vel - normal.scale(vel.dot(normal).min(F::zero()));
        Contact::Resolved { pos: self.surface_point(normal), vel }
    }

    /// The point on the surface along `normal`, pushed out by a few ulps if
    /// rounding would otherwise leave it measurably inside.
    fn surface_point(&self, normal: Vec3<F>) -> Vec3<F> {
        let mut pos = self.center + normal.scale(self.radius);
        let mut reach = self.radius;
        let mut step = self.radius * F::epsilon();
        for _ in 0..MAX_SURFACE_NUDGES {
            if (pos - self.center).length() >= self.radius {
                break;
            }
            reach = reach + step;
            step = step + step;
            pos = self.center + normal.scale(reach);
        }
        pos
    }
}

/// Doubling nudges give up to `2^MAX_SURFACE_NUDGES` ulps of the radius.
const MAX_SURFACE_NUDGES: usize = 24;
