use lvox3d::grid::{DensityCode, GridGeometry};
use lvox3d::math::{Point, Real, Vector};
use lvox3d::query::Ray;
use lvox3d::scanner::{Echo, ParallelShootingPattern, ShootingPattern};
use lvox3d::worker::{
    compute_density, merge_inputs, DensityConfig, InterpolateDistance, LvoxGrids, Worker,
    WorkersManager,
};
use lvox3d::LvoxError;
use na::{Point3, Vector3};

/// `n` identical shots going up from below the grid.
struct Column {
    origin: Point<Real>,
    n: usize,
}

impl ShootingPattern for Column {
    fn num_shots(&self) -> usize {
        self.n
    }

    fn shot_at(&self, _: usize) -> Ray {
        Ray::new(self.origin, Vector::z())
    }

    fn center(&self) -> Point<Real> {
        self.origin
    }
}

fn unit_grid() -> GridGeometry {
    GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::repeat(10)).unwrap()
}

fn config() -> DensityConfig {
    DensityConfig {
        effective_ray_threshold: 1.0,
        ..DensityConfig::default()
    }
}

fn column_index(geometry: &GridGeometry, z: usize) -> usize {
    geometry.linear_index(&Point3::new(2, 2, z))
}

#[test]
fn density_of_a_partially_hit_voxel() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 5,
    };
    let echoes = [Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0); 2];

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();
    let voxel = column_index(&geometry, 4);

    assert_eq!(grids.hits.value(voxel), 2);
    assert_eq!(grids.theoretical.value(voxel), 5);
    assert_eq!(grids.before.value(voxel), 0);
    assert!(relative_eq!(grids.density.value(voxel), 0.4));

    // Below the echoes: crossed by every shot, never hit.
    assert_eq!(grids.density.value(column_index(&geometry, 0)), 0.0);
    // Above the echoes: 3 effective rays, no hit.
    assert_eq!(grids.density.value(column_index(&geometry, 7)), 0.0);
    // Away from the column.
    assert_eq!(grids.density.value(0), DensityCode::Untouched.value());
    assert_eq!(grids.report.untouched, 990);
    assert_eq!(grids.report.insufficient_samples, 0);
}

#[test]
fn effective_rays_are_theoreticals_minus_before() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 5,
    };
    let echoes = [Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0); 2];

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();
    let column = |grid: &lvox3d::grid::CountGrid| -> Vec<u32> {
        (0..10).map(|z| grid.value(column_index(&geometry, z))).collect()
    };

    assert_eq!(column(&grids.theoretical), vec![5; 10]);
    assert_eq!(column(&grids.before), vec![0, 0, 0, 0, 0, 2, 2, 2, 2, 2]);
    assert_eq!(column(&grids.hits), vec![0, 0, 0, 0, 2, 0, 0, 0, 0, 0]);
}

#[test]
fn fully_occluded_voxels_have_insufficient_samples() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 5,
    };
    let echoes = [Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0); 5];

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();

    assert_eq!(grids.density.value(column_index(&geometry, 4)), 1.0);

    for z in 5..10 {
        assert_eq!(
            grids.density.value(column_index(&geometry, z)),
            DensityCode::InsufficientSamples.value()
        );
    }

    assert_eq!(grids.report.insufficient_samples, 5);
    assert!(grids
        .density
        .values()
        .iter()
        .all(|v| (*v >= 0.0 && *v <= 1.0) || DensityCode::from_value(*v).is_some()));
}

#[test]
fn weak_echoes_are_filtered() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 5,
    };
    let echoes = [
        Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0),
        Echo::new(Point3::new(2.5, 2.5, 4.5), 5.0),
        Echo::new(Point3::new(20.0, 2.5, 4.5), 20.0),
    ];

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();

    assert_eq!(grids.hits.value(column_index(&geometry, 4)), 1);
    assert_eq!(grids.report.filtered_echoes, 1);
    assert_eq!(grids.report.echoes_outside, 1);

    let inverted = DensityConfig {
        greater_than_threshold: false,
        ..config()
    };
    let grids = compute_density(&pattern, &echoes, &geometry, &inverted).unwrap();

    assert_eq!(grids.hits.value(column_index(&geometry, 4)), 1);
    assert_eq!(grids.report.filtered_echoes, 2);
}

#[test]
fn degenerate_shots_are_skipped() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 3,
    };
    // The shot reaching an echo located on the scanner has no direction.
    let echoes = [Echo::new(Point3::new(2.5, 2.5, -1.0), 20.0)];

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();

    assert_eq!(grids.report.skipped_echo_rays, 1);
    assert_eq!(grids.report.echoes_outside, 1);
    assert_eq!(grids.before.total(), 0);
}

#[test]
fn parallel_shots_from_above() {
    let geometry =
        GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(2, 1, 4)).unwrap();
    let echoes = [
        Echo::new(Point3::new(0.5, 0.5, 1.5), 20.0),
        Echo::new(Point3::new(1.5, 0.5, 2.5), 20.0),
    ];
    let pattern =
        ParallelShootingPattern::from_echoes(Point3::new(0.0, 0.0, 10.0), -Vector3::z(), &echoes)
            .unwrap();

    let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();
    let at = |x, z| geometry.linear_index(&Point3::new(x, 0, z));

    assert_eq!(grids.theoretical.values(), &[1; 8]);
    assert_eq!(grids.density.value(at(0, 1)), 1.0);
    assert_eq!(grids.density.value(at(0, 2)), 0.0);
    assert_eq!(
        grids.density.value(at(0, 0)),
        DensityCode::InsufficientSamples.value()
    );
    assert_eq!(grids.density.value(at(1, 2)), 1.0);
    assert_eq!(grids.before.value(at(1, 0)), 1);
    assert_eq!(grids.before.value(at(1, 1)), 1);
}

#[test]
fn echoes_on_a_voxel_boundary_occlude_the_voxels_behind_them() {
    let geometry =
        GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(1, 1, 10)).unwrap();
    let column = |grid: &lvox3d::grid::CountGrid| grid.values().to_vec();
    let insufficient = DensityCode::InsufficientSamples.value();

    for z in [5.0, 5.25] {
        let echoes = [Echo::new(Point3::new(0.5, 0.5, z), 20.0)];
        let pattern = ParallelShootingPattern::from_echoes(
            Point3::new(0.0, 0.0, 20.0),
            -Vector3::z(),
            &echoes,
        )
        .unwrap();

        let grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();

        assert_eq!(column(&grids.theoretical), vec![1; 10]);
        assert_eq!(column(&grids.hits), vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(column(&grids.before), vec![1, 1, 1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!(
            grids.density.values(),
            &[
                insufficient,
                insufficient,
                insufficient,
                insufficient,
                insufficient,
                1.0,
                0.0,
                0.0,
                0.0,
                0.0
            ]
        );
    }
}

#[test]
fn merged_scans_sum_their_counters() {
    let geometry = unit_grid();
    let echoes = [Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0); 2];
    let scan = |x: Real| {
        let pattern = Column {
            origin: Point3::new(x, 2.5, -1.0),
            n: 5,
        };
        compute_density(&pattern, &echoes, &geometry, &config()).unwrap()
    };

    let first = scan(2.5);
    let second = scan(7.5);
    let merged = merge_inputs(&[first.clone(), second], 1.0).unwrap();
    let voxel = column_index(&geometry, 4);

    assert_eq!(merged.theoretical.value(voxel), 5);
    assert_eq!(merged.hits.value(voxel), 4);
    // The second scanner only crosses voxels at x = 7.
    assert_eq!(
        merged.theoretical.value(geometry.linear_index(&Point3::new(7, 2, 0))),
        5
    );
    assert_eq!(merged.density.value(voxel), 0.8);

    assert!(matches!(
        merge_inputs(&[], 1.0),
        Err(LvoxError::InvalidParameter(_))
    ));

    let other = LvoxGrids::new(
        GridGeometry::with_resolution(Point3::origin(), 2.0, Vector3::repeat(5)).unwrap(),
    );
    assert_eq!(
        merge_inputs(&[first, other], 1.0).map(|_| ()),
        Err(LvoxError::IncompatibleGrids)
    );
}

#[test]
fn under_sampled_voxels_are_interpolated() {
    let geometry = unit_grid();
    let pattern = Column {
        origin: Point3::new(2.5, 2.5, -1.0),
        n: 5,
    };
    let echoes = [Echo::new(Point3::new(2.5, 2.5, 4.5), 20.0); 5];
    let mut grids = compute_density(&pattern, &echoes, &geometry, &config()).unwrap();

    let mut manager: WorkersManager<LvoxGrids> = WorkersManager::new();
    manager.add_worker(0, Box::new(InterpolateDistance::new(1.0, 1)));
    manager.compute(&mut grids).unwrap();

    let report = grids.report.propagation.unwrap();
    assert_eq!(report.seeds, 5);
    assert_eq!(report.interpolated, 1);
    assert_eq!(report.unreachable, 4);
    assert_eq!(grids.density.value(column_index(&geometry, 5)), 1.0);
    assert_eq!(
        grids.density.value(column_index(&geometry, 6)),
        DensityCode::InsufficientSamples.value()
    );

    let mut failing = InterpolateDistance::new(-1.0, 1);
    assert!(matches!(
        failing.compute(&mut grids),
        Err(LvoxError::InvalidParameter(_))
    ));
}
