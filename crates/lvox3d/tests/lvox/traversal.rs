use lvox3d::grid::{CountGrid, GridGeometry};
use lvox3d::math::Real;
use lvox3d::query::Ray;
use lvox3d::traversal::{traverse, CountVisitor, RayVisitor, SkipFirst, WooTraversal};
use na::{Point3, Vector3};
use std::collections::HashSet;

fn random_vector(rng: &mut oorandom::Rand32, scale: Real) -> Vector3<Real> {
    Vector3::from_fn(|_, _| (rng.rand_float() as Real * 2.0 - 1.0) * scale)
}

#[test]
fn random_rays_visit_each_voxel_once_in_order() {
    let geometry = GridGeometry::with_resolution(
        Point3::new(-2.0, -1.0, 0.0),
        0.5,
        Vector3::new(8, 6, 10),
    )
    .unwrap();
    let aabb = geometry.aabb();
    let mut rng = oorandom::Rand32::new(42);
    let mut num_hitting_rays = 0;

    for _ in 0..1000 {
        let origin = Point3::from(random_vector(&mut rng, 6.0));
        let dir = random_vector(&mut rng, 1.0);
        let ray = Ray::new(origin, dir);
        let unit_ray = ray.normalized().unwrap();
        let crossings: Vec<_> = WooTraversal::new(&geometry, &ray).unwrap().collect();

        assert_eq!(
            crossings.is_empty(),
            aabb.clip_ray_parameters(&ray).is_none(),
            "ray {:?}",
            ray
        );

        if !crossings.is_empty() {
            num_hitting_rays += 1;
        }

        let mut visited = HashSet::new();

        for crossing in &crossings {
            assert!(visited.insert(crossing.index), "voxel visited twice by {:?}", ray);
            assert!(crossing.length() >= 0.0);

            let mid = unit_ray.point_at((crossing.t_enter + crossing.t_exit) * 0.5);
            let center = geometry.voxel_center(&crossing.coords);
            let half = geometry.cell_size() * 0.5;
            assert!(
                (mid - center).abs().iter().zip(half.iter()).all(|(d, h)| *d <= *h + 1.0e-3),
                "ray {:?} does not cross voxel {:?}",
                ray,
                crossing.coords
            );
        }

        for pair in crossings.windows(2) {
            assert!(pair[0].t_enter <= pair[1].t_enter);
            assert!(relative_eq!(pair[0].t_exit, pair[1].t_enter));

            // Consecutive voxels share a face.
            let dist: usize = (0..3)
                .map(|i| pair[0].coords[i].abs_diff(pair[1].coords[i]))
                .sum();
            assert_eq!(dist, 1);
        }
    }

    assert!(num_hitting_rays > 0);
}

#[test]
fn skip_first_must_be_reset_between_rays() {
    let geometry =
        GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(1, 1, 5)).unwrap();
    let ray = Ray::new(Point3::new(0.5, 0.5, -1.0), Vector3::z());
    let mut grid = CountGrid::zeros(geometry);

    {
        let mut visitor = SkipFirst::new(CountVisitor::new(&mut grid));

        for _ in 0..2 {
            visitor.reset();
            assert_eq!(traverse(&geometry, &ray, &mut [&mut visitor]), Ok(5));
        }
    }

    assert_eq!(grid.values(), &[0, 2, 2, 2, 2]);
}
