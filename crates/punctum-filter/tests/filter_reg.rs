//! Filter regression test
//!
//! Preprocessing of a noisy synthetic channel holding one spot: hot-pixel
//! removal, Gaussian smoothing, difference-of-Gaussians enhancement and the
//! serialized option format.

use punctum_core::{Image, Zyx};
use punctum_filter::{
    PreprocessOptions, dog_sharpen_spots, dog_sharpen_spots_parallel, gaussian_filter, preprocess,
    remove_hot_pixels,
};
use punctum_morph::SpotRadii;
use punctum_test::{RegParams, add_gaussian_spot, noisy_image};

fn variance(image: &Image) -> f64 {
    let n = image.len() as f64;
    let mean = image.data().iter().map(|&v| v as f64).sum::<f64>() / n;
    image.data().iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n
}

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    let shape = Zyx::new(9, 32, 32);
    let center = Zyx::new(4, 16, 16);
    let mut image = noisy_image(shape, 100.0, 20.0, 7).expect("noise");
    add_gaussian_spot(&mut image, center, (1.5, 2.0, 2.0), 400.0);

    // --- Test 1: hot pixels vanish, the spot stays ---
    let mut hot = image.clone();
    hot.set(Zyx::new(2, 5, 5), 5000.0).expect("set");
    let cleaned = remove_hot_pixels(&hot).expect("hot pixels");
    rp.compare_true(cleaned.get_unchecked(Zyx::new(2, 5, 5)) < 200.0, "hot pixel removed");
    rp.compare_true(cleaned.get_unchecked(center) > 300.0, "spot kept");

    // --- Test 2: Gaussian smoothing reduces variance and keeps the mean ---
    let smooth = gaussian_filter(&image, (1.0, 1.0, 1.0)).expect("gaussian");
    rp.compare_true(variance(&smooth) < variance(&image), "variance reduced");
    let mean_in = image.data().iter().map(|&v| v as f64).sum::<f64>() / image.len() as f64;
    let mean_out = smooth.data().iter().map(|&v| v as f64).sum::<f64>() / smooth.len() as f64;
    rp.compare_values(mean_in, mean_out, 1.0);

    // --- Test 3: preprocess equals the filters applied in order ---
    let opts = PreprocessOptions::default()
        .with_remove_hot_pixels(true)
        .with_gaussian_sigma(1.0);
    let pre = preprocess(&hot, &opts).expect("preprocess");
    let manual = gaussian_filter(&cleaned, (1.0, 1.0, 1.0)).expect("manual");
    rp.compare_volumes(&manual, &pre);
    let pre_par = preprocess(&hot, &opts.clone().with_accelerated_backend(true)).expect("parallel");
    rp.compare_volumes(&pre, &pre_par);

    // --- Test 4: DoG peaks at the spot and removes the offset ---
    let radii = SpotRadii::new(2.0, 2.5, 2.5);
    let dog = dog_sharpen_spots(&image, radii).expect("dog");
    let peak = dog.data().iter().copied().fold(f32::MIN, f32::max);
    let at_center = dog.get_unchecked(center);
    rp.compare_true(at_center > 0.8 * peak, "dog peak at spot");
    rp.compare_true(dog.get_unchecked(Zyx::new(4, 2, 2)).abs() < 20.0, "dog removes offset");
    let dog_par = dog_sharpen_spots_parallel(&image, radii).expect("dog parallel");
    rp.compare_volumes(&dog, &dog_par);

    // --- Test 5: options parse with defaults for missing fields ---
    let parsed: PreprocessOptions = serde_json::from_str(r#"{"gaussian_sigma": 0.75}"#).expect("parse");
    rp.compare_values(0.75, parsed.gaussian_sigma, 0.0);
    rp.compare_true(!parsed.remove_hot_pixels && !parsed.use_accelerated_backend, "defaults filled");
    let json = serde_json::to_string(&opts).expect("serialize");
    let back: PreprocessOptions = serde_json::from_str(&json).expect("reparse");
    rp.compare_true(back == opts, "options survive serialization");

    assert!(rp.cleanup(), "filter regression test failed");
}
