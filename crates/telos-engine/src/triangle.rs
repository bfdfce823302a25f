//! Triangle positioning
//!
//! Maps score percentages to barycentric weights over a fixed reference
//! triangle whose corners stand for stability, liquidity and return.

use crate::error::ConfigError;
use crate::types::{Category, ScorePercentages};
use serde::{Deserialize, Serialize};

/// Default containment tolerance in barycentric units
pub const DEFAULT_TOLERANCE: f64 = 0.02;

/// Largest distance of the weight sum from 1 that independent rounding of
/// three percentages produces
pub const MAX_WEIGHT_DRIFT: f64 = 0.01;

/// Cartesian point on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downward, like a canvas)
    pub y: f64,
}

impl Point {
    /// Create a point
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Barycentric weights over the stability, liquidity and return corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarycentricWeights {
    /// Stability corner weight
    pub stability: f64,
    /// Liquidity corner weight
    pub liquidity: f64,
    /// Return corner weight
    #[serde(rename = "return")]
    pub return_weight: f64,
}

impl BarycentricWeights {
    /// Weight for one corner
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Stability => self.stability,
            Category::Liquidity => self.liquidity,
            Category::Return => self.return_weight,
        }
    }

    /// Sum of the three weights
    #[inline]
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.stability + self.liquidity + self.return_weight
    }

    /// Smallest of the three weights
    #[inline]
    #[must_use]
    pub fn min(&self) -> f64 {
        self.stability.min(self.liquidity).min(self.return_weight)
    }
}

/// Where an assessment lands inside the triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrianglePosition {
    /// Percentages divided by 100, not renormalized
    pub weights: BarycentricWeights,
    /// Vertex-weighted Cartesian point
    pub point: Point,
}

#[derive(Deserialize)]
#[serde(default)]
struct ReferenceTriangleDef {
    stability: Point,
    liquidity: Point,
    #[serde(rename = "return")]
    return_vertex: Point,
    tolerance: f64,
}

impl Default for ReferenceTriangleDef {
    fn default() -> Self {
        let t = ReferenceTriangle::default();
        Self {
            stability: t.stability,
            liquidity: t.liquidity,
            return_vertex: t.return_vertex,
            tolerance: t.tolerance,
        }
    }
}

impl TryFrom<ReferenceTriangleDef> for ReferenceTriangle {
    type Error = ConfigError;

    fn try_from(def: ReferenceTriangleDef) -> Result<Self, Self::Error> {
        ReferenceTriangle::new(def.stability, def.liquidity, def.return_vertex)?
            .with_tolerance(def.tolerance)
    }
}

/// Fixed triangle the position is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReferenceTriangleDef")]
pub struct ReferenceTriangle {
    stability: Point,
    liquidity: Point,
    #[serde(rename = "return")]
    return_vertex: Point,
    tolerance: f64,
}

impl Default for ReferenceTriangle {
    /// Stability at the top, liquidity bottom-left, return bottom-right on a
    /// 400x350 surface
    fn default() -> Self {
        Self {
            stability: Point::new(200.0, 30.0),
            liquidity: Point::new(30.0, 320.0),
            return_vertex: Point::new(370.0, 320.0),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ReferenceTriangle {
    /// Create a triangle from its three corners
    ///
    /// # Errors
    /// Returns [`ConfigError::DegenerateTriangle`] if the corners are
    /// collinear or not finite.
    pub fn new(stability: Point, liquidity: Point, return_vertex: Point) -> Result<Self, ConfigError> {
        let triangle = Self {
            stability,
            liquidity,
            return_vertex,
            tolerance: DEFAULT_TOLERANCE,
        };
        let area = triangle.signed_area();
        if !area.is_finite() || area.abs() < f64::EPSILON {
            return Err(ConfigError::DegenerateTriangle { area });
        }
        Ok(triangle)
    }

    /// Replace the containment tolerance
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTolerance`] for a negative or non-finite value.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Corner for a category
    #[must_use]
    pub const fn vertex(&self, category: Category) -> Point {
        match category {
            Category::Stability => self.stability,
            Category::Liquidity => self.liquidity,
            Category::Return => self.return_vertex,
        }
    }

    /// Containment tolerance in barycentric units
    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn signed_area(&self) -> f64 {
        let (a, b, c) = (self.stability, self.liquidity, self.return_vertex);
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
    }

    /// Combine corner coordinates with the given weights
    #[must_use]
    pub fn point_at(&self, weights: &BarycentricWeights) -> Point {
        Category::ALL.into_iter().fold(Point::default(), |acc, c| {
            let v = self.vertex(c);
            let w = weights.get(c);
            Point::new(acc.x + w * v.x, acc.y + w * v.y)
        })
    }

    /// Barycentric weights of a Cartesian point (inverse of [`Self::point_at`]
    /// for weights summing to 1)
    #[must_use]
    pub fn barycentric_of(&self, point: Point) -> BarycentricWeights {
        let (a, b, c) = (self.stability, self.liquidity, self.return_vertex);
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        let stability = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / det;
        let liquidity = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / det;
        BarycentricWeights {
            stability,
            liquidity,
            return_weight: 1.0 - stability - liquidity,
        }
    }

    /// Whether a point lies inside, allowing the configured tolerance
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.contains_within(point, self.tolerance)
    }

    /// Whether a point lies inside, allowing each weight to dip to `-tolerance`
    #[must_use]
    pub fn contains_within(&self, point: Point, tolerance: f64) -> bool {
        self.barycentric_of(point).min() >= -tolerance
    }

    /// Whether a computed position lies inside, allowing rounding drift
    ///
    /// Weights summing to `s != 1` scale the point about the origin, so the
    /// point is divided by `s` before the containment test. The sum itself
    /// must stay within [`MAX_WEIGHT_DRIFT`] of 1.
    #[must_use]
    pub fn contains_position(&self, position: &TrianglePosition) -> bool {
        let total = position.weights.sum();
        if !total.is_finite() || (total - 1.0).abs() > MAX_WEIGHT_DRIFT + 1e-9 {
            return false;
        }
        let p = position.point;
        self.contains(Point::new(p.x / total, p.y / total))
    }
}

/// Place score percentages inside the reference triangle
///
/// Weights are the raw percentages over 100. They may sum to 0.99..=1.01 and
/// are used as-is, so the point can sit a hair off the strict interior.
#[must_use]
pub fn compute_triangle_position(pct: &ScorePercentages, triangle: &ReferenceTriangle) -> TrianglePosition {
    let weights = BarycentricWeights {
        stability: f64::from(pct.stability_pct()) / 100.0,
        liquidity: f64::from(pct.liquidity_pct()) / 100.0,
        return_weight: f64::from(pct.return_pct()) / 100.0,
    };
    TrianglePosition {
        weights,
        point: triangle.point_at(&weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn corners_map_to_unit_weights() {
        let t = ReferenceTriangle::default();
        let w = t.barycentric_of(t.vertex(Category::Liquidity));
        assert!(close(w.stability, 0.0));
        assert!(close(w.liquidity, 1.0));
        assert!(close(w.return_weight, 0.0));
    }

    #[test]
    fn point_at_inverts_barycentric_of() {
        let t = ReferenceTriangle::default();
        let weights = BarycentricWeights {
            stability: 0.5,
            liquidity: 0.2,
            return_weight: 0.3,
        };
        let back = t.barycentric_of(t.point_at(&weights));
        assert!(close(back.stability, 0.5));
        assert!(close(back.liquidity, 0.2));
        assert!(close(back.return_weight, 0.3));
    }

    #[test]
    fn weights_are_not_renormalized() {
        let pct = ScorePercentages::new(33, 33, 33).unwrap();
        let pos = compute_triangle_position(&pct, &ReferenceTriangle::default());
        assert!(close(pos.weights.sum(), 0.99));
        assert!(ReferenceTriangle::default().contains(pos.point));
    }

    #[test]
    fn outside_point_is_rejected() {
        let t = ReferenceTriangle::default();
        assert!(!t.contains(Point::new(0.0, 0.0)));
        assert!(t.contains_within(Point::new(200.0, 200.0), 0.0));
    }

    #[test]
    fn drift_far_from_origin_stays_inside() {
        let t = ReferenceTriangle::new(
            Point::new(10_000.0, 10_000.0),
            Point::new(9_990.0, 10_020.0),
            Point::new(10_010.0, 10_020.0),
        )
        .unwrap();
        for (s, l, r) in [(33, 33, 33), (34, 34, 33), (0, 0, 100), (100, 0, 0)] {
            let pct = ScorePercentages::new(s, l, r).unwrap();
            let pos = compute_triangle_position(&pct, &t);
            assert!(t.contains_position(&pos), "{s}/{l}/{r} at {:?}", pos.point);
        }
        // Raw point of a 99% sum is scaled toward the origin by ~100 units
        let pos = compute_triangle_position(&ScorePercentages::new(33, 33, 33).unwrap(), &t);
        assert!(!t.contains(pos.point));
    }

    #[test]
    fn position_with_excess_drift_is_rejected() {
        let t = ReferenceTriangle::default();
        let weights = BarycentricWeights {
            stability: 0.3,
            liquidity: 0.3,
            return_weight: 0.3,
        };
        let pos = TrianglePosition {
            weights,
            point: t.point_at(&weights),
        };
        assert!(!t.contains_position(&pos));
    }

    #[test]
    fn position_point_must_match_weights() {
        let t = ReferenceTriangle::default();
        let pct = ScorePercentages::new(50, 25, 25).unwrap();
        let mut pos = compute_triangle_position(&pct, &t);
        assert!(t.contains_position(&pos));
        pos.point = Point::new(0.0, 0.0);
        assert!(!t.contains_position(&pos));
    }

    #[test]
    fn collinear_corners_are_degenerate() {
        let err = ReferenceTriangle::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        assert!(matches!(err, Err(ConfigError::DegenerateTriangle { .. })));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = ReferenceTriangle::default().with_tolerance(-0.1);
        assert!(matches!(err, Err(ConfigError::InvalidTolerance(_))));
    }
}
