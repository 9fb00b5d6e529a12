extern crate nalgebra as na;

use lvox3d::grid::GridGeometry;
use lvox3d::query::Ray;
use lvox3d::traversal::WooTraversal;
use na::{Point3, Vector3};

fn main() {
    let geometry =
        GridGeometry::with_resolution(Point3::new(-2.0, -2.0, 0.0), 0.5, Vector3::new(8, 8, 6))
            .unwrap();
    let ray = Ray::new(Point3::new(-3.0, -1.2, 0.4), Vector3::new(1.0, 0.35, 0.2));

    for crossing in WooTraversal::new(&geometry, &ray).unwrap() {
        println!(
            "voxel {:>3} {:?}: [{:.3}, {:.3}]",
            crossing.index,
            crossing.coords.coords.as_slice(),
            crossing.t_enter,
            crossing.t_exit
        );
    }
}
