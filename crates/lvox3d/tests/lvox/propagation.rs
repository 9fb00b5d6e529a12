use lvox3d::grid::{DensityCode, DensityGrid, GridGeometry};
use lvox3d::propagation::{
    interpolate_distance, propagate, DistanceInterpolationVisitor, PropagationAlgorithm,
    PropagationReport,
};
use na::{Point3, Vector3};

fn untouched_grid(n: usize) -> DensityGrid {
    let geometry =
        GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::repeat(n)).unwrap();
    DensityGrid::untouched(geometry)
}

fn set(grid: &mut DensityGrid, x: usize, y: usize, z: usize, value: lvox3d::math::Real) -> usize {
    let index = grid.geometry().linear_index(&Point3::new(x, y, z));
    grid.set_value(index, value);
    index
}

#[test]
fn seed_takes_the_weighted_average_of_its_neighbors() {
    let mut source = untouched_grid(5);
    let seed = set(&mut source, 2, 2, 2, DensityCode::InsufficientSamples.value());
    let _ = set(&mut source, 3, 2, 2, 0.2);
    let _ = set(&mut source, 2, 2, 4, 0.8);

    let (out, report) = interpolate_distance(&source, 2.0, 1).unwrap();

    assert!(relative_eq!(out.value(seed), 0.4, epsilon = 1.0e-6));
    assert_eq!(
        report,
        PropagationReport {
            seeds: 1,
            interpolated: 1,
            unreachable: 0
        }
    );
}

#[test]
fn seeds_do_not_influence_each_other() {
    let mut source = untouched_grid(6);
    let insufficient = DensityCode::InsufficientSamples.value();
    let a = set(&mut source, 1, 1, 1, insufficient);
    let _ = set(&mut source, 1, 1, 2, 0.3);
    let _ = set(&mut source, 2, 2, 2, 0.9);
    let _ = set(&mut source, 4, 4, 4, 0.1);

    let mut alone = source.clone();
    let (expected, _) = interpolate_distance(&alone, 1.5, 2).unwrap();

    // Adding seeds around `a` does not change its value.
    let _ = set(&mut source, 1, 2, 1, insufficient);
    let _ = set(&mut source, 2, 1, 1, insufficient);
    let (out, report) = interpolate_distance(&source, 1.5, 2).unwrap();

    assert_eq!(out.value(a), expected.value(a));
    assert_eq!(report.seeds, 3);

    // Propagating into a separate output leaves the non-seed voxels alone.
    let report = propagate(&source, &mut alone, 1.5, 2).unwrap();
    assert_eq!(report.seeds, 3);
    assert_eq!(alone.value(a), expected.value(a));
    assert_eq!(
        alone.count_code(DensityCode::Untouched),
        source.count_code(DensityCode::Untouched)
    );
}

#[test]
fn interpolated_values_are_densities() {
    let source = random_grid(4, 7);

    let (out, report) = interpolate_distance(&source, 2.0, 2).unwrap();

    assert_eq!(report.interpolated + report.unreachable, report.seeds);
    assert_eq!(
        out.count_code(DensityCode::InsufficientSamples),
        report.unreachable
    );
    assert!(out
        .values()
        .iter()
        .all(|v| (*v >= 0.0 && *v <= 1.0) || DensityCode::from_value(*v).is_some()));
}

fn random_grid(n: usize, seed: u64) -> DensityGrid {
    let mut grid = untouched_grid(n);
    let mut rng = oorandom::Rand32::new(seed);

    for i in 0..grid.num_cells() {
        let value = match rng.rand_range(0..3) {
            0 => DensityCode::InsufficientSamples.value(),
            1 => DensityCode::Untouched.value(),
            _ => rng.rand_float() as lvox3d::math::Real,
        };
        grid.set_value(i, value);
    }

    grid
}

#[test]
fn seed_order_does_not_change_the_interpolated_values() {
    let source = random_grid(5, 3);
    let algorithm = PropagationAlgorithm::new(source.geometry(), 1.5).unwrap();
    let mut seeds = source.indices_where(|v| DensityCode::InsufficientSamples.matches(v));
    assert!(seeds.len() > 1);

    let interpolate_all = |seeds: &[usize]| {
        let mut visitor = DistanceInterpolationVisitor::new(&source, 2);
        let mut values: Vec<_> = seeds
            .iter()
            .map(|seed| {
                let _ = algorithm
                    .start_from_cell(*seed, &mut [&mut visitor])
                    .unwrap();
                (*seed, visitor.result())
            })
            .collect();
        values.sort_by_key(|(seed, _)| *seed);
        values
    };

    let forward = interpolate_all(&seeds);
    seeds.reverse();
    let backward = interpolate_all(&seeds);

    let mut rng = oorandom::Rand32::new(11);
    for i in (1..seeds.len()).rev() {
        let j = rng.rand_range(0..(i as u32 + 1)) as usize;
        seeds.swap(i, j);
    }
    let shuffled = interpolate_all(&seeds);

    assert_eq!(forward, backward);
    assert_eq!(forward, shuffled);

    // `propagate` writes the same values.
    let (out, report) = interpolate_distance(&source, 1.5, 2).unwrap();
    assert_eq!(report.seeds, forward.len());

    for (seed, value) in forward {
        let expected = value.unwrap_or(DensityCode::InsufficientSamples.value());
        assert_eq!(out.value(seed), expected);
    }
}
