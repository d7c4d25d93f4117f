//! Bounding volume hierarchy over triangle bounding boxes.
//!
//! The hierarchy holds triangle *ids* only; exact triangle data stays in the
//! caller-owned slice indexed by the same ids. Builds are deterministic for
//! a given triangle order, so repeated builds from the same mesh produce the
//! same tree.

// Triangle ids are u32; meshes beyond 4B faces are unsupported by design.
#![allow(clippy::cast_possible_truncation)]

use gauge_types::{Aabb, Point3, Triangle};
use smallvec::SmallVec;
use tracing::debug;

use crate::query::closest_point_on_triangle;

/// Default maximum number of triangles per leaf.
const DEFAULT_LEAF_SIZE: usize = 8;

/// Result of a closest-point query against a [`Bvh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestHit {
    /// Id of the triangle containing the closest point.
    pub triangle: u32,
    /// Squared distance from the query point to that closest point.
    pub distance_squared: f32,
}

/// BVH node containing either leaf triangles or child nodes.
#[derive(Debug)]
enum BvhNode {
    /// Leaf node containing triangle ids.
    Leaf {
        bounds: Aabb,
        triangles: SmallVec<[u32; 8]>,
    },
    /// Internal node with two children.
    Internal {
        bounds: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn bounds(&self) -> &Aabb {
        match self {
            Self::Leaf { bounds, .. } | Self::Internal { bounds, .. } => bounds,
        }
    }
}

/// Bounding volume hierarchy for closest-point queries over a triangle set.
///
/// # Example
///
/// ```
/// use gauge_types::{Triangle, Point3};
/// use gauge_spatial::Bvh;
///
/// let triangles = vec![Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// )];
///
/// let bvh = Bvh::build(&triangles);
/// assert_eq!(bvh.triangle_count(), 1);
/// ```
#[derive(Debug)]
pub struct Bvh {
    /// Root node (`None` for an empty triangle set).
    root: Option<BvhNode>,
    /// Total number of triangles indexed.
    triangle_count: usize,
}

impl Bvh {
    /// Build a BVH over the given triangles with the default leaf size.
    ///
    /// An empty slice produces an empty index: every query against it
    /// returns `None` instead of panicking.
    #[must_use]
    pub fn build(triangles: &[Triangle]) -> Self {
        Self::build_with_leaf_size(triangles, DEFAULT_LEAF_SIZE)
    }

    /// Build a BVH with an explicit maximum leaf size.
    ///
    /// `max_leaf_size` is clamped to at least 1.
    #[must_use]
    pub fn build_with_leaf_size(triangles: &[Triangle], max_leaf_size: usize) -> Self {
        if triangles.is_empty() {
            return Self {
                root: None,
                triangle_count: 0,
            };
        }

        let boxes: Vec<Aabb> = triangles.iter().map(Triangle::bounds).collect();
        let centers: Vec<Point3<f32>> = triangles.iter().map(Triangle::centroid).collect();
        let mut ids: Vec<u32> = (0..triangles.len() as u32).collect();

        let max_leaf = max_leaf_size.max(1);
        let root = Self::build_recursive(&boxes, &centers, &mut ids, max_leaf);

        let bvh = Self {
            root: Some(root),
            triangle_count: triangles.len(),
        };
        debug!(
            triangles = triangles.len(),
            max_depth = bvh.stats().max_depth,
            "built spatial index"
        );
        bvh
    }

    fn build_recursive(
        boxes: &[Aabb],
        centers: &[Point3<f32>],
        ids: &mut [u32],
        max_leaf_size: usize,
    ) -> BvhNode {
        let mut bounds = Aabb::empty();
        for &id in ids.iter() {
            bounds.expand_to_include(&boxes[id as usize]);
        }

        if ids.len() <= max_leaf_size {
            return BvhNode::Leaf {
                bounds,
                triangles: ids.iter().copied().collect(),
            };
        }

        // Median split along the longest axis, ordered by triangle centroid.
        let axis = bounds.longest_axis();
        ids.sort_by(|&a, &b| {
            let ca = centers[a as usize][axis];
            let cb = centers[b as usize][axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = ids.len() / 2;
        let (left_ids, right_ids) = ids.split_at_mut(mid);

        let left = Self::build_recursive(boxes, centers, left_ids, max_leaf_size);
        let right = Self::build_recursive(boxes, centers, right_ids, max_leaf_size);

        BvhNode::Internal {
            bounds,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Find the triangle closest to `point` and its squared distance.
    ///
    /// `triangles` must be the same slice (same ids, same order) the index
    /// was built from. Returns `None` only for an empty index.
    ///
    /// The result is exact: it equals the minimum over all triangles of the
    /// squared distance to the exact closest point on that triangle.
    #[must_use]
    pub fn closest(&self, triangles: &[Triangle], point: Point3<f32>) -> Option<ClosestHit> {
        let root = self.root.as_ref()?;

        let mut best_d2 = f32::INFINITY;
        let mut best_id = None;
        Self::closest_recursive(root, triangles, &point, &mut best_d2, &mut best_id);

        best_id.map(|triangle| ClosestHit {
            triangle,
            distance_squared: best_d2,
        })
    }

    fn closest_recursive(
        node: &BvhNode,
        triangles: &[Triangle],
        point: &Point3<f32>,
        best_d2: &mut f32,
        best_id: &mut Option<u32>,
    ) {
        match node {
            BvhNode::Leaf {
                triangles: ids, ..
            } => {
                for &id in ids {
                    let tri = &triangles[id as usize];
                    let cp = closest_point_on_triangle(*point, tri.v0, tri.v1, tri.v2);
                    let d2 = (cp - point).norm_squared();
                    if d2 < *best_d2 {
                        *best_d2 = d2;
                        *best_id = Some(id);
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                let d_left = left.bounds().distance_squared_to(point);
                let d_right = right.bounds().distance_squared_to(point);

                // Nearer child first tightens the bound before the far
                // child is considered.
                let (near, near_d2, far, far_d2) = if d_left <= d_right {
                    (left, d_left, right, d_right)
                } else {
                    (right, d_right, left, d_left)
                };

                if near_d2 < *best_d2 {
                    Self::closest_recursive(near, triangles, point, best_d2, best_id);
                }
                if far_d2 < *best_d2 {
                    Self::closest_recursive(far, triangles, point, best_d2, best_id);
                }
            }
        }
    }

    /// Get the total number of triangles in the index.
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Check if the index is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the root bounding box, if any.
    #[must_use]
    pub fn root_bounds(&self) -> Option<&Aabb> {
        self.root.as_ref().map(BvhNode::bounds)
    }

    /// Get statistics about the tree structure.
    #[must_use]
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        if let Some(ref root) = self.root {
            Self::collect_stats(root, 0, &mut stats);
        }
        stats
    }

    fn collect_stats(node: &BvhNode, depth: usize, stats: &mut BvhStats) {
        stats.max_depth = stats.max_depth.max(depth);

        match node {
            BvhNode::Leaf { triangles, .. } => {
                stats.leaf_count += 1;
                stats.leaf_triangles += triangles.len();
                stats.max_leaf_size = stats.max_leaf_size.max(triangles.len());
            }
            BvhNode::Internal { left, right, .. } => {
                stats.internal_count += 1;
                Self::collect_stats(left, depth + 1, stats);
                Self::collect_stats(right, depth + 1, stats);
            }
        }
    }

    /// Collect every triangle id stored in the leaves, in traversal order.
    ///
    /// Used by tests to check the exactly-once coverage invariant.
    #[must_use]
    pub fn leaf_triangle_ids(&self) -> Vec<u32> {
        let mut ids = Vec::with_capacity(self.triangle_count);
        if let Some(ref root) = self.root {
            Self::collect_ids(root, &mut ids);
        }
        ids
    }

    fn collect_ids(node: &BvhNode, out: &mut Vec<u32>) {
        match node {
            BvhNode::Leaf { triangles, .. } => out.extend(triangles.iter().copied()),
            BvhNode::Internal { left, right, .. } => {
                Self::collect_ids(left, out);
                Self::collect_ids(right, out);
            }
        }
    }
}

/// Statistics about BVH structure.
#[derive(Debug, Default, Clone)]
pub struct BvhStats {
    /// Number of internal (branch) nodes.
    pub internal_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Maximum number of triangles in any leaf.
    pub max_leaf_size: usize,
    /// Total triangles stored across all leaves.
    pub leaf_triangles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_types::{unit_cube, MeshTopology};

    fn cube_triangles() -> Vec<Triangle> {
        unit_cube().triangles().collect()
    }

    /// Reference answer: exact closest point against every triangle.
    fn brute_force(triangles: &[Triangle], point: Point3<f32>) -> Option<f32> {
        triangles
            .iter()
            .map(|tri| {
                let cp = closest_point_on_triangle(point, tri.v0, tri.v1, tri.v2);
                (cp - point).norm_squared()
            })
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    #[test]
    fn build_empty() {
        let bvh = Bvh::build(&[]);
        assert!(bvh.is_empty());
        assert_eq!(bvh.triangle_count(), 0);
        assert!(bvh.closest(&[], Point3::origin()).is_none());
    }

    #[test]
    fn build_single_triangle() {
        let triangles = vec![Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        )];
        let bvh = Bvh::build(&triangles);

        assert!(!bvh.is_empty());
        assert_eq!(bvh.triangle_count(), 1);

        let hit = bvh.closest(&triangles, Point3::new(0.5, 0.5, 2.0));
        assert!(hit.is_some());
        if let Some(hit) = hit {
            assert_eq!(hit.triangle, 0);
            assert!((hit.distance_squared - 4.0).abs() < 1e-5);
        }
    }

    #[test]
    fn every_triangle_in_exactly_one_leaf() {
        let triangles = cube_triangles();
        for leaf_size in [1, 2, 4, 8] {
            let bvh = Bvh::build_with_leaf_size(&triangles, leaf_size);
            let mut ids = bvh.leaf_triangle_ids();
            ids.sort_unstable();
            let expected: Vec<u32> = (0..triangles.len() as u32).collect();
            assert_eq!(ids, expected, "leaf_size={leaf_size}");
        }
    }

    #[test]
    fn internal_boxes_contain_children() {
        let triangles = cube_triangles();
        let bvh = Bvh::build_with_leaf_size(&triangles, 2);
        let stats = bvh.stats();
        assert!(stats.leaf_count > 1);
        assert_eq!(stats.leaf_triangles, 12);

        let root = bvh.root_bounds();
        assert!(root.is_some());
        if let Some(root) = root {
            for tri in &triangles {
                let b = tri.bounds();
                assert!(root.contains(&b.min));
                assert!(root.contains(&b.max));
            }
        }
    }

    #[test]
    fn matches_brute_force() {
        let triangles = cube_triangles();
        let bvh = Bvh::build_with_leaf_size(&triangles, 2);

        let queries = [
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(0.5, 0.5, 1.5),
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(2.0, 0.5, 0.5),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.3, 1.7, -0.4),
            Point3::new(0.25, 0.75, 0.5),
        ];

        for q in queries {
            let hit = bvh.closest(&triangles, q);
            let expected = brute_force(&triangles, q);
            assert!(hit.is_some());
            if let (Some(hit), Some(expected)) = (hit, expected) {
                assert!(
                    (hit.distance_squared - expected).abs() < 1e-6,
                    "query {q:?}: bvh {} vs brute {expected}",
                    hit.distance_squared
                );
            }
        }
    }

    #[test]
    fn deterministic_rebuild() {
        let triangles = cube_triangles();
        let a = Bvh::build(&triangles);
        let b = Bvh::build(&triangles);
        assert_eq!(a.leaf_triangle_ids(), b.leaf_triangle_ids());
    }

    #[test]
    fn point_on_surface_has_zero_distance() {
        let triangles = cube_triangles();
        let bvh = Bvh::build(&triangles);

        let hit = bvh.closest(&triangles, Point3::new(0.5, 0.5, 1.0));
        assert!(hit.is_some());
        if let Some(hit) = hit {
            assert!(hit.distance_squared < 1e-10);
        }
    }
}
