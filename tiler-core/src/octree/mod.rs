use crate::pointcloud::loader::PointLoader;
use crate::pointcloud::point::{BoundingBox, Point};
use crate::tiler::TilerOptions;

/// Index of the root node in the arena.
pub const ROOT: usize = 0;

/// One cell of the octree.
///
/// Children and the parent back-reference are arena indices; the parent link
/// is a pure back-edge used for the geometric-error computation and never an
/// ownership path.
pub struct OctNode {
    pub bounding_box: BoundingBox,
    pub children: [Option<usize>; 8],
    pub parent: Option<usize>,
    /// Points physically stored at this node. For internal nodes this is the
    /// retained coarse-LOD sample.
    pub items: Vec<Point>,
    /// Number of items stored here (`items.len()`).
    pub local_count: usize,
    /// Number of points in the subtree rooted here, this node included.
    pub global_count: usize,
    pub is_leaf: bool,
    pub depth: usize,
}

impl OctNode {
    fn new(bounding_box: BoundingBox, parent: Option<usize>, depth: usize) -> Self {
        Self {
            bounding_box,
            children: [None; 8],
            parent,
            items: Vec::new(),
            local_count: 0,
            global_count: 0,
            is_leaf: true,
            depth,
        }
    }
}

/// Bounded-depth 8-way partition of the cloud, rooted on the cube covering
/// the loader's global bounds.
///
/// Overflow policy: when a leaf at capacity must accept another point it
/// becomes internal but keeps its items as the coarse-LOD sample for that
/// cell; the new point descends into the matching octant child. Insertion
/// order is randomized by the loader, so the retained items are a uniform
/// sample of everything that passed through the node.
pub struct Octree {
    nodes: Vec<OctNode>,
    max_points_per_node: usize,
    max_depth: usize,
}

impl Octree {
    /// Consumes the initialized loader and builds the tree.
    pub fn build(mut loader: PointLoader, options: &TilerOptions) -> Self {
        let [min_x, max_x, min_y, max_y, min_z, max_z] = loader.bounds();
        let root_box = BoundingBox::new(min_x, max_x, min_y, max_y, min_z, max_z).to_cube();
        let mut tree = Self {
            nodes: vec![OctNode::new(root_box, None, 0)],
            max_points_per_node: options.max_points_per_node.max(1),
            max_depth: options.max_tree_depth,
        };
        while let Some(point) = loader.next_point() {
            tree.insert(point);
        }
        tree
    }

    pub fn node(&self, index: usize) -> &OctNode {
        &self.nodes[index]
    }

    pub fn root(&self) -> &OctNode {
        &self.nodes[ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, point: Point) {
        let mut index = ROOT;
        loop {
            self.nodes[index].global_count += 1;
            if self.nodes[index].is_leaf {
                let at_capacity =
                    self.nodes[index].items.len() >= self.max_points_per_node;
                if !at_capacity || self.nodes[index].depth >= self.max_depth {
                    let node = &mut self.nodes[index];
                    node.items.push(point);
                    node.local_count += 1;
                    return;
                }
                // Full leaf: subdivide, keeping the stored items as this
                // cell's LOD sample.
                self.nodes[index].is_leaf = false;
            }
            let octant = self.nodes[index].bounding_box.octant_of(&point);
            index = match self.nodes[index].children[octant] {
                Some(child) => child,
                None => self.allocate_child(index, octant),
            };
        }
    }

    fn allocate_child(&mut self, parent: usize, octant: usize) -> usize {
        let bounding_box = self.nodes[parent].bounding_box.octant(octant);
        let depth = self.nodes[parent].depth + 1;
        let index = self.nodes.len();
        self.nodes
            .push(OctNode::new(bounding_box, Some(parent), depth));
        self.nodes[parent].children[octant] = Some(index);
        index
    }

    /// Refinement metric for the node: the mean inter-point spacing this
    /// node alone would present, minus the spacing if the whole subtree were
    /// rendered.
    ///
    /// Rendered points are the node's own items plus any ancestor items whose
    /// position falls inside the node's box (ancestors keep LOD samples that
    /// a renderer draws alongside this tile).
    pub fn geometric_error(&self, index: usize) -> f64 {
        let node = &self.nodes[index];
        let volume = node.bounding_box.volume();
        let mut rendered = node.local_count;
        let mut ancestor = node.parent;
        while let Some(parent_index) = ancestor {
            let parent = &self.nodes[parent_index];
            rendered += parent
                .items
                .iter()
                .filter(|item| node.bounding_box.contains(item))
                .count();
            ancestor = parent.parent;
        }
        if rendered == 0 {
            return 0.0;
        }
        let subtree = rendered + node.global_count - node.local_count;
        let density_only_this_tile = (volume / rendered as f64).cbrt();
        let density_all_points = (volume / subtree as f64).cbrt();
        density_only_this_tile - density_all_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_point(x: f64, y: f64, z: f64) -> Point {
        Point {
            x,
            y,
            z,
            r: 0,
            g: 0,
            b: 0,
            intensity: 0,
            classification: 0,
        }
    }

    fn options(max_points_per_node: usize, max_tree_depth: usize) -> TilerOptions {
        TilerOptions {
            max_points_per_node,
            max_tree_depth,
            shuffle_seed: Some(11),
            ..TilerOptions::default()
        }
    }

    fn build_tree(points: Vec<Point>, opts: &TilerOptions) -> Octree {
        let mut loader = PointLoader::with_seed(opts.shuffle_seed);
        for point in points {
            loader.add(point);
        }
        loader.initialize();
        Octree::build(loader, opts)
    }

    fn random_cloud(count: usize) -> Vec<Point> {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(99);
        (0..count)
            .map(|_| {
                make_point(
                    rng.gen_range(0.0..100.0),
                    rng.gen_range(0.0..100.0),
                    rng.gen_range(0.0..100.0),
                )
            })
            .collect()
    }

    fn check_counts(tree: &Octree, index: usize) -> usize {
        let node = tree.node(index);
        assert_eq!(node.local_count, node.items.len());
        assert_eq!(node.is_leaf, node.children.iter().all(Option::is_none));
        let child_total: usize = node
            .children
            .iter()
            .flatten()
            .map(|&child| check_counts(tree, child))
            .sum();
        assert_eq!(node.global_count, node.local_count + child_total);
        node.global_count
    }

    #[test]
    fn four_corner_points_stay_in_a_single_leaf() {
        let points = vec![
            make_point(0.0, 0.0, 0.0),
            make_point(1.0, 0.0, 0.0),
            make_point(0.0, 1.0, 0.0),
            make_point(0.0, 0.0, 1.0),
        ];
        let tree = build_tree(points, &options(4, 10));
        assert_eq!(tree.len(), 1);
        let root = tree.root();
        assert!(root.is_leaf);
        assert_eq!(root.local_count, 4);
        assert_eq!(root.global_count, 4);
        assert_eq!(tree.geometric_error(ROOT), 0.0);
    }

    #[test]
    fn cluster_overflows_into_its_octant() {
        // Nine points near the high corner plus one at the origin pinning the
        // root cube; capacity 4 forces the cluster's overflow into slot 7.
        // The origin point either stays in the root sample or lands in slot
        // 0, so every other slot must stay empty.
        let mut points = vec![make_point(0.0, 0.0, 0.0)];
        for i in 0..9 {
            let v = 0.9 + 0.01 * i as f64;
            points.push(make_point(v, v, v));
        }
        let tree = build_tree(points, &options(4, 10));
        let root = tree.root();
        assert!(!root.is_leaf);
        assert_eq!(root.local_count, 4);
        assert_eq!(root.global_count, 10);
        assert!(root.children[7].is_some());
        for slot in 1..7 {
            assert!(
                root.children[slot].is_none(),
                "unexpected child in slot {slot}"
            );
        }
        let descended: usize = root
            .children
            .iter()
            .flatten()
            .map(|&child| tree.node(child).global_count)
            .sum();
        assert_eq!(descended, 6);
        assert!(tree.geometric_error(ROOT) > 0.0);
    }

    #[test]
    fn counts_are_consistent_over_a_random_cloud() {
        let tree = build_tree(random_cloud(1000), &options(100, 10));
        let total = check_counts(&tree, ROOT);
        assert_eq!(total, 1000);
        assert!(!tree.root().is_leaf);
    }

    #[test]
    fn every_item_lies_within_its_node() {
        let tree = build_tree(random_cloud(500), &options(50, 10));
        for index in 0..tree.len() {
            let node = tree.node(index);
            for item in &node.items {
                assert!(node.bounding_box.contains(item));
            }
        }
    }

    #[test]
    fn depth_cap_accumulates_coincident_points() {
        let points = (0..20).map(|_| make_point(0.5, 0.5, 0.5)).collect();
        let tree = build_tree(points, &options(4, 2));
        let mut deepest = ROOT;
        let mut depth = 0;
        for index in 0..tree.len() {
            let node = tree.node(index);
            assert!(node.depth <= 2);
            if node.depth > depth {
                depth = node.depth;
                deepest = index;
            }
        }
        assert_eq!(depth, 2);
        let node = tree.node(deepest);
        assert!(node.is_leaf);
        // 4 retained at depth 0 and 1, the remaining 12 pile up at the cap.
        assert_eq!(node.local_count, 12);
    }

    #[test]
    fn uniform_cloud_reaches_depth_two() {
        let tree = build_tree(random_cloud(1000), &options(100, 10));
        let max_depth = (0..tree.len()).map(|i| tree.node(i).depth).max().unwrap();
        assert!(max_depth >= 2, "expected depth >= 2, got {max_depth}");
    }

    #[test]
    fn geometric_error_shrinks_with_depth() {
        let tree = build_tree(random_cloud(2000), &options(100, 10));
        let root_error = tree.geometric_error(ROOT);
        assert!(root_error > 0.0);
        for &child in tree.root().children.iter().flatten() {
            assert!(tree.geometric_error(child) <= root_error);
        }
    }
}
