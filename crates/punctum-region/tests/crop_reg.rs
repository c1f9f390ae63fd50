//! Object cropping regression test
//!
//! Region properties, expanded crops near the volume border and the
//! local/expanded/global frame round trip.

use punctum_core::{Bounds3, Zyx};
use punctum_region::{expanded_object_slice, region_props, to_local_coords};
use punctum_test::{RegParams, SyntheticCube, cube_labels};

#[test]
fn crop_reg() {
    let mut rp = RegParams::new("crop");

    let shape = Zyx::new(10, 50, 50);
    let labels = cube_labels(
        shape,
        &[
            SyntheticCube::new(1, Zyx::new(0, 20, 20), 10),
            SyntheticCube::new(3, Zyx::new(5, 0, 40), 5),
        ],
    )
    .expect("build labels");

    // --- Test 1: region properties ---
    let objects = region_props(&labels);
    rp.compare_values(2.0, objects.len() as f64, 0.0);
    rp.compare_values(1.0, objects[0].label as f64, 0.0);
    rp.compare_values(3.0, objects[1].label as f64, 0.0);
    rp.compare_values(1000.0, objects[0].voxel_count as f64, 0.0);
    rp.compare_values(125.0, objects[1].voxel_count as f64, 0.0);
    rp.compare_values(4.5, objects[0].centroid.0, 1e-9);
    rp.compare_values(24.5, objects[0].centroid.1, 1e-9);

    // --- Test 2: expanded crop clipped at the volume border ---
    let tolerance = Zyx::new(3, 3, 3);
    let corner = expanded_object_slice(&objects[1], tolerance, &labels).expect("crop");
    rp.compare_true(corner.offset() == Zyx::new(2, 0, 37), "clipped offset");
    rp.compare_true(corner.slice.stop == Zyx::new(10, 8, 48), "clipped stop");
    rp.compare_values(125.0, corner.mask.count() as f64, 0.0);

    // --- Test 3: offset + local == global for every crop coordinate ---
    let crop = expanded_object_slice(&objects[0], tolerance, &labels).expect("crop");
    let mut round_trip = true;
    for local in Bounds3::full(crop.mask.shape()).iter() {
        let global = crop.to_global(local);
        round_trip &= global == crop.offset().offset_by(local);
        round_trip &= crop.mask.get_unchecked(local) == (labels.get_unchecked(global) == 1);
    }
    rp.compare_true(round_trip, "crop round trip");

    // --- Test 4: spot assignment keeps input order and drops outsiders ---
    let spots = [
        Zyx::new(5, 25, 25),
        Zyx::new(7, 2, 42),
        Zyx::new(0, 20, 29),
        Zyx::new(5, 25, 30),
    ];
    let local = to_local_coords(&objects[0], &labels, &spots);
    rp.compare_values(2.0, local.len() as f64, 0.0);
    rp.compare_true(local[0] == Zyx::new(5, 5, 5), "first local coordinate");
    rp.compare_true(local[1] == Zyx::new(0, 0, 9), "second local coordinate");
    let expanded = crop.to_crop(objects[0].bounds.to_global(local[0]));
    rp.compare_true(expanded == Some(Zyx::new(5, 8, 8)), "expanded frame coordinate");

    assert!(rp.cleanup(), "crop regression test failed");
}
