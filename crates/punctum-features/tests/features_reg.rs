//! Feature extraction regression test
//!
//! End-to-end extraction on synthetic label volumes and images: a single
//! bright spot in one cube, several objects with spots given out of order,
//! degenerate backgrounds, parallel processing and configuration parsing.

use punctum_core::{Image, LabelVolume, Zyx};
use punctum_features::{
    DistanceWeighting, FeatureError, FeatureTable, SpotFeatureConfig, compute_spots_features,
};
use punctum_filter::PreprocessOptions;
use punctum_morph::SpotRadii;
use punctum_test::{RegParams, SyntheticCube, add_gaussian_spot, cube_labels, noisy_image};

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn same_tables(a: &FeatureTable, b: &FeatureTable) -> bool {
    a.len() == b.len()
        && a.rows().iter().zip(b.rows()).all(|(r, s)| {
            r.cell_id == s.cell_id
                && r.spot_id == s.spot_id
                && r.local == s.local
                && r.local_expanded == s.local_expanded
                && r.global == s.global
                && r.values.iter().zip(&s.values).all(|(&x, &y)| same_value(x, y))
        })
}

#[test]
fn features_reg_single_spot() {
    let mut rp = RegParams::new("features_single_spot");

    let shape = Zyx::new(10, 50, 50);
    let labels = cube_labels(shape, &[SyntheticCube::new(1, Zyx::new(0, 20, 20), 10)]).expect("labels");
    let mut raw = noisy_image(shape, 100.0, 10.0, 1).expect("noise");
    let center = Zyx::new(5, 25, 25);
    add_gaussian_spot(&mut raw, center, (1.0, 1.5, 1.5), 500.0);

    let config = SpotFeatureConfig::new(SpotRadii::new(1.0, 1.0, 1.0));
    let table = compute_spots_features(&raw, &[center], Some(&labels), None, &config).expect("extract");

    // --- Test 1: exactly one row keyed (1, 0) ---
    rp.compare_values(1.0, table.len() as f64, 0.0);
    let row = table.row(1, 0);
    rp.compare_true(row.is_some(), "row (1, 0) present");
    if let Some(row) = row {
        rp.compare_true(row.local == Zyx::new(5, 5, 5), "local frame");
        rp.compare_true(row.local_expanded == Zyx::new(5, 7, 7), "expanded frame");
        rp.compare_true(row.global == center, "global frame");
    }

    // --- Test 2: center intensities come from the right channels ---
    let raw_center = f64::from(raw.get_unchecked(center));
    let value = |name: &str| table.value(1, 0, name).unwrap_or(f64::NAN);
    rp.compare_values(raw_center, value("spot_raw_intensity_at_center"), 0.0);
    rp.compare_values(raw_center, value("spot_sharp_intensity_at_center"), 0.0);
    rp.compare_values(raw_center, value("spot_preproc_intensity_at_center"), 0.0);
    rp.compare_values(raw_center, value("spot_raw_max_in_spot_minimumsize_vol"), 0.0);

    // --- Test 3: spot stands out from the background ---
    rp.compare_true(value("background_mean").is_finite(), "background measured");
    rp.compare_true(value("spot_raw_mean_in_spot_minimumsize_vol") > value("background_mean"), "spot brighter");
    rp.compare_true(value("spot_vs_backgr_ttest_tstat") > 0.0, "positive t statistic");
    rp.compare_true(value("spot_vs_backgr_ttest_pvalue") < 0.05, "significant spot");
    for effect in ["cohen", "hedge", "glass"] {
        let v = value(&format!("spot_vs_backgr_effect_size_{}", effect));
        rp.compare_true(v > 0.0, effect);
    }

    // --- Test 4: weighting only changes the spot-vs-background columns ---
    let unweighted = compute_spots_features(
        &raw,
        &[center],
        Some(&labels),
        None,
        &config.clone().with_distance_weighting(DistanceWeighting::None),
    )
    .expect("unweighted");
    let other = |name: &str| unweighted.value(1, 0, name).unwrap_or(f64::NAN);
    rp.compare_values(value("spot_raw_mean_in_spot_minimumsize_vol"), other("spot_raw_mean_in_spot_minimumsize_vol"), 0.0);
    rp.compare_values(value("background_median"), other("background_median"), 0.0);
    rp.compare_true(
        value("spot_vs_backgr_ttest_tstat") != other("spot_vs_backgr_ttest_tstat"),
        "weighting changes the test",
    );

    // --- Test 5: preprocessing and sharpening feed their own columns ---
    let processed = compute_spots_features(
        &raw,
        &[center],
        Some(&labels),
        None,
        &config
            .clone()
            .with_preprocess(PreprocessOptions::default().with_gaussian_sigma(1.0))
            .with_sharpen_with_dog(true),
    )
    .expect("processed");
    let processed_value = |name: &str| processed.value(1, 0, name).unwrap_or(f64::NAN);
    rp.compare_values(raw_center, processed_value("spot_raw_intensity_at_center"), 0.0);
    rp.compare_true(processed_value("spot_preproc_intensity_at_center") < raw_center, "blur lowers the peak");
    rp.compare_true(processed_value("spot_sharp_intensity_at_center") != raw_center, "dog channel used");

    assert!(rp.cleanup(), "features_single_spot regression test failed");
}

#[test]
fn features_reg_objects() {
    let mut rp = RegParams::new("features_objects");

    let shape = Zyx::new(10, 50, 50);
    let labels = cube_labels(
        shape,
        &[
            SyntheticCube::new(1, Zyx::new(0, 2, 2), 8),
            SyntheticCube::new(2, Zyx::new(1, 15, 15), 8),
            SyntheticCube::new(3, Zyx::new(2, 30, 30), 8),
        ],
    )
    .expect("labels");
    let raw = noisy_image(shape, 50.0, 30.0, 11).expect("noise");
    let spots = [
        Zyx::new(5, 35, 35),
        Zyx::new(3, 5, 5),
        Zyx::new(0, 0, 0),
        Zyx::new(6, 33, 37),
        Zyx::new(4, 6, 3),
        Zyx::new(2, 3, 8),
    ];
    let config = SpotFeatureConfig::new(SpotRadii::new(1.0, 1.5, 1.5));
    let table = compute_spots_features(&raw, &spots, Some(&labels), None, &config).expect("extract");

    // --- Test 1: one row per assigned spot, empty object skipped ---
    rp.compare_values(5.0, table.len() as f64, 0.0);
    rp.compare_true(table.cell_ids() == vec![1, 3], "cells in label order");
    rp.compare_values(0.0, table.cell_rows(2).count() as f64, 0.0);

    // --- Test 2: ids strictly increasing and contiguous per cell ---
    let ids: Vec<usize> = table.rows().iter().map(|r| r.spot_id).collect();
    rp.compare_true(ids == vec![0, 1, 2, 3, 4], "running spot ids");
    let cell_one: Vec<Zyx> = table.cell_rows(1).map(|r| r.global).collect();
    rp.compare_true(
        cell_one == vec![Zyx::new(3, 5, 5), Zyx::new(4, 6, 3), Zyx::new(2, 3, 8)],
        "input order within a cell",
    );
    let cell_three: Vec<usize> = table.cell_rows(3).map(|r| r.spot_id).collect();
    rp.compare_true(cell_three == vec![3, 4], "second cell continues the count");

    // --- Test 3: frames agree for every row ---
    let mut frames_ok = true;
    for row in table.rows() {
        let props = punctum_region::object_props(&labels, row.cell_id).expect("props");
        frames_ok &= props.bounds.to_global(row.local) == row.global;
        frames_ok &= labels.get_unchecked(row.global) == row.cell_id;
    }
    rp.compare_true(frames_ok, "local + origin == global");

    // --- Test 4: parallel run gives the same table ---
    let parallel = compute_spots_features(&raw, &spots, Some(&labels), None, &config.clone().with_parallel(true))
        .expect("parallel");
    rp.compare_true(same_tables(&table, &parallel), "parallel matches serial");

    // --- Test 5: no objects, no rows ---
    let empty_labels = LabelVolume::new(shape).expect("empty labels");
    let empty = compute_spots_features(&raw, &spots, Some(&empty_labels), None, &config).expect("empty");
    rp.compare_true(empty.is_empty(), "empty table");
    rp.compare_values(table.columns().len() as f64, empty.columns().len() as f64, 0.0);

    assert!(rp.cleanup(), "features_objects regression test failed");
}

#[test]
fn features_reg_degenerate() {
    let mut rp = RegParams::new("features_degenerate");

    // --- Test 1: single background voxel gives NaN statistics ---
    let shape = Zyx::new(3, 9, 9);
    let labels = LabelVolume::from_fn(shape, |p| if p.z == 1 && p.y == 4 && (2..5).contains(&p.x) { 7 } else { 0 })
        .expect("labels");
    let raw = Image::from_fn(shape, |p| 10.0 + p.x as f32).expect("raw");
    let table = compute_spots_features(&raw, &[Zyx::new(1, 4, 2)], Some(&labels), None, &SpotFeatureConfig::default())
        .expect("extract");
    rp.compare_values(1.0, table.len() as f64, 0.0);
    let value = |name: &str| table.value(7, 0, name).unwrap_or(0.0);
    rp.compare_values(14.0, value("background_mean"), 0.0);
    rp.compare_nan(value("background_std"));
    rp.compare_nan(value("spot_vs_backgr_ttest_pvalue"));
    rp.compare_nan(value("spot_vs_backgr_ttest_tstat"));
    rp.compare_nan(value("spot_vs_backgr_effect_size_cohen"));
    rp.compare_nan(value("spot_vs_backgr_effect_size_glass"));
    rp.compare_values(12.0, value("spot_raw_intensity_at_center"), 0.0);

    // --- Test 2: invalid radii are rejected before any work ---
    let bad = SpotFeatureConfig::new(SpotRadii::new(1.0, 0.0, 1.0));
    let err = compute_spots_features(&raw, &[], Some(&labels), None, &bad);
    rp.compare_true(matches!(err, Err(FeatureError::InvalidRadii { .. })), "invalid radii");
    let huge = SpotFeatureConfig::new(SpotRadii::new(1e30, 1.0, 1.0));
    let err = compute_spots_features(&raw, &[Zyx::new(1, 4, 2)], Some(&labels), None, &huge);
    rp.compare_true(matches!(err, Err(FeatureError::InvalidRadii { .. })), "oversized radii");

    // --- Test 3: mismatched channel shapes are rejected ---
    let small = Image::new(Zyx::new(3, 9, 8)).expect("small");
    let err = compute_spots_features(&small, &[], Some(&labels), None, &SpotFeatureConfig::default());
    rp.compare_true(matches!(err, Err(FeatureError::ShapeMismatch { channel: "raw", .. })), "raw shape");

    // --- Test 4: configuration parses with defaults ---
    let json = r#"{"radii": {"z": 1.0, "y": 2.0, "x": 2.0}, "distance_weighting": "simple"}"#;
    let config: SpotFeatureConfig = serde_json::from_str(json).expect("parse");
    rp.compare_values(2.0, config.radii.y, 0.0);
    rp.compare_true(config.distance_weighting == DistanceWeighting::Simple, "weighting parsed");
    rp.compare_true(config.preprocess == PreprocessOptions::default(), "preprocess default");
    rp.compare_true(!config.parallel && !config.sharpen_with_dog, "flags default");
    let config: SpotFeatureConfig = serde_json::from_str("{}").expect("parse empty");
    rp.compare_true(config == SpotFeatureConfig::default(), "empty config is default");

    assert!(rp.cleanup(), "features_degenerate regression test failed");
}
