use crate::grid::GridGeometry;
use crate::math::Real;
use crate::LvoxError;
use na::{Point3, Vector3};
use std::collections::{HashSet, VecDeque};

const NEIGHBORS: [[isize; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

/// A voxel reached by a propagation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PropagationContext {
    /// The linear index of the seed voxel of the propagation.
    pub seed: usize,
    /// The linear index of the reached voxel.
    pub index: usize,
    /// The integer coordinates of the reached voxel.
    pub coords: Point3<usize>,
    /// The distance between the centers of the seed and of the reached voxel.
    pub distance: Real,
}

/// Trait implemented by visitors called during a propagation.
pub trait PropagationVisitor {
    /// Called once before the propagation starts. `seed` describes the seed voxel.
    fn start(&mut self, seed: &PropagationContext) {
        let _ = seed;
    }

    /// Called once for each voxel reached by the propagation, the seed excluded.
    fn visit(&mut self, context: &PropagationContext);

    /// Called once after every voxel has been visited.
    fn finish(&mut self, seed: &PropagationContext) {
        let _ = seed;
    }
}

/// A breadth-first flood of the voxels around a seed.
///
/// Starting from the seed, the propagation moves to the 6 face-neighbors of
/// each reached voxel, as long as the distance between the neighbor center and
/// the seed center does not exceed the radius. Each voxel is reached at most
/// once per propagation.
#[derive(Copy, Clone, Debug)]
pub struct PropagationAlgorithm {
    geometry: GridGeometry,
    radius: Real,
}

impl PropagationAlgorithm {
    /// A propagation through the voxels of `geometry`, bounded by `radius`.
    ///
    /// Fails with [`LvoxError::InvalidParameter`] if the radius is negative
    /// or not finite.
    pub fn new(geometry: &GridGeometry, radius: Real) -> Result<Self, LvoxError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(LvoxError::InvalidParameter(
                "the propagation radius must be finite and positive",
            ));
        }

        Ok(Self {
            geometry: *geometry,
            radius,
        })
    }

    /// The radius bounding the propagation.
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Propagates from the voxel with linear index `seed`.
    ///
    /// Returns the number of visited voxels (the seed excluded).
    pub fn start_from_cell(
        &self,
        seed: usize,
        visitors: &mut [&mut dyn PropagationVisitor],
    ) -> Result<usize, LvoxError> {
        if seed >= self.geometry.num_cells() {
            return Err(LvoxError::InvalidParameter(
                "the propagation seed is outside of the grid",
            ));
        }

        let seed_coords = self.geometry.coords(seed);
        let seed_center = self.geometry.voxel_center(&seed_coords);
        let seed_context = PropagationContext {
            seed,
            index: seed,
            coords: seed_coords,
            distance: 0.0,
        };

        for visitor in visitors.iter_mut() {
            visitor.start(&seed_context);
        }

        let mut reached = HashSet::new();
        let mut queue = VecDeque::new();
        let mut num_visited = 0;
        let _ = reached.insert(seed);
        queue.push_back(seed_coords);

        while let Some(coords) = queue.pop_front() {
            for shift in &NEIGHBORS {
                let neighbor = coords.map(|c| c as isize) + Vector3::from(*shift);

                if !self.geometry.contains_coords(&neighbor) {
                    continue;
                }

                let neighbor = neighbor.map(|c| c as usize);
                let index = self.geometry.linear_index(&neighbor);

                if reached.contains(&index) {
                    continue;
                }

                let distance = na::distance(&seed_center, &self.geometry.voxel_center(&neighbor));

                if distance > self.radius {
                    continue;
                }

                let _ = reached.insert(index);
                queue.push_back(neighbor);

                let context = PropagationContext {
                    seed,
                    index,
                    coords: neighbor,
                    distance,
                };

                for visitor in visitors.iter_mut() {
                    visitor.visit(&context);
                }

                num_visited += 1;
            }
        }

        for visitor in visitors.iter_mut() {
            visitor.finish(&seed_context);
        }

        Ok(num_visited)
    }
}

#[cfg(test)]
mod test {
    use super::{PropagationAlgorithm, PropagationContext, PropagationVisitor};
    use crate::grid::GridGeometry;
    use crate::LvoxError;
    use na::{Point3, Vector3};

    #[derive(Default)]
    struct Recorder {
        started: usize,
        finished: usize,
        visited: Vec<(usize, f64)>,
    }

    impl PropagationVisitor for Recorder {
        fn start(&mut self, _: &PropagationContext) {
            self.started += 1;
        }

        fn visit(&mut self, context: &PropagationContext) {
            self.visited.push((context.index, context.distance as f64));
        }

        fn finish(&mut self, _: &PropagationContext) {
            self.finished += 1;
        }
    }

    fn unit_grid(n: usize) -> GridGeometry {
        GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::repeat(n)).unwrap()
    }

    #[test]
    fn radius_one_reaches_the_face_neighbors() {
        let geometry = unit_grid(3);
        let algorithm = PropagationAlgorithm::new(&geometry, 1.0).unwrap();
        let seed = geometry.linear_index(&Point3::new(1, 1, 1));
        let mut recorder = Recorder::default();

        let num_visited = algorithm
            .start_from_cell(seed, &mut [&mut recorder])
            .unwrap();

        assert_eq!(num_visited, 6);
        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.finished, 1);
        assert!(recorder.visited.iter().all(|(i, d)| *i != seed && *d == 1.0));
    }

    #[test]
    fn the_radius_is_inclusive() {
        let geometry = unit_grid(5);
        let seed = geometry.linear_index(&Point3::new(2, 2, 2));

        // Cells at distance 1, sqrt(2) and sqrt(3) are within a radius of 1.8,
        // cells at distance 2 are not.
        let mut recorder = Recorder::default();
        let algorithm = PropagationAlgorithm::new(&geometry, 1.8).unwrap();
        let num_visited = algorithm
            .start_from_cell(seed, &mut [&mut recorder])
            .unwrap();
        assert_eq!(num_visited, 26);

        // Adds the 6 cells at distance exactly 2.
        let mut recorder = Recorder::default();
        let algorithm = PropagationAlgorithm::new(&geometry, 2.0).unwrap();
        let num_visited = algorithm
            .start_from_cell(seed, &mut [&mut recorder])
            .unwrap();
        assert_eq!(num_visited, 32);
    }

    #[test]
    fn propagation_stops_at_the_grid_boundary() {
        let geometry = unit_grid(3);
        let algorithm = PropagationAlgorithm::new(&geometry, 1.0).unwrap();
        let mut recorder = Recorder::default();

        assert_eq!(algorithm.start_from_cell(0, &mut [&mut recorder]), Ok(3));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let geometry = unit_grid(3);

        assert!(matches!(
            PropagationAlgorithm::new(&geometry, -1.0),
            Err(LvoxError::InvalidParameter(_))
        ));

        let algorithm = PropagationAlgorithm::new(&geometry, 1.0).unwrap();
        assert!(matches!(
            algorithm.start_from_cell(27, &mut []),
            Err(LvoxError::InvalidParameter(_))
        ));
    }
}
