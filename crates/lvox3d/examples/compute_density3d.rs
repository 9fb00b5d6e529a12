extern crate nalgebra as na;

use lvox3d::bounding_volume::Aabb;
use lvox3d::math::Real;
use lvox3d::scanner::{Echo, ScannerConfig, ThetaPhiShootingPattern};
use lvox3d::worker::{
    compute_density, DensityConfig, InterpolateDistance, LvoxGrids, WorkersManager,
};
use na::{Point3, Vector3};

/*
 * A scanner in the middle of a sparse "canopy": a slab of echoes
 * between 3m and 4m of height.
 */
fn main() {
    let scanner = ScannerConfig {
        position: Point3::new(0.0, 0.0, 1.5),
        h_res: 2.0,
        v_res: 2.0,
        ..ScannerConfig::default()
    };
    let pattern = ThetaPhiShootingPattern::new(&scanner).unwrap();

    let mut rng = oorandom::Rand32::new(42);
    let echoes: Vec<_> = (0..2000)
        .map(|_| {
            let position = Point3::new(
                rng.rand_float() as Real * 8.0 - 4.0,
                rng.rand_float() as Real * 8.0 - 4.0,
                rng.rand_float() as Real + 3.0,
            );
            Echo::new(position, rng.rand_float() as Real * 40.0)
        })
        .collect();

    let config = DensityConfig {
        resolution: 0.5,
        effective_ray_threshold: 5.0,
        ..DensityConfig::default()
    };
    let area = Aabb::from_half_extents(Point3::new(0.0, 0.0, 2.5), Vector3::new(4.0, 4.0, 2.5));
    let geometry = config.grid_for(&area).unwrap();

    let mut grids = compute_density(&pattern, &echoes, &geometry, &config).unwrap();

    let mut manager: WorkersManager<LvoxGrids> = WorkersManager::new();
    manager.add_worker(0, Box::new(InterpolateDistance::new(1.0, 2)));
    manager.compute(&mut grids).unwrap();

    println!(
        "{} shots, {} voxels, {} hits",
        pattern.n_h() * pattern.n_v(),
        geometry.num_cells(),
        grids.hits.total()
    );
    println!("{:#?}", grids.report);
}
