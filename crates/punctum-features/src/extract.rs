//! Per-spot feature extraction
//!
//! For every labeled object, in ascending label order:
//!
//! 1. Spots whose voxel carries the object's label are assigned to it.
//! 2. The object's bounding box is dilated by the spot tolerance and the
//!    preprocessed, sharp and raw channels are cropped to it.
//! 3. A spheroid is placed at every spot; object voxels outside all of them
//!    form the background.
//! 4. Each spot is measured against its own full spheroid and against the
//!    background on its z-plane.
//!
//! Inside a crop every position is expressed in the crop ("expanded")
//! frame.

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

use punctum_core::{Bounds3, Image, LabelVolume, Mask, Volume, Zyx};
use punctum_filter::{dog_sharpen_spots, dog_sharpen_spots_parallel, preprocess};
use punctum_morph::{
    expand_tolerance, local_spheroid_mask, normalized_distance_transform, slice_local_into_global,
    spheroid_and_background_masks,
};
use punctum_region::{ObjectProps, expanded_object_slice, region_props, single_object_labels, to_local_coords};
use punctum_stats::{DistributionMetric, EffectSizeMetric, welch_ttest};
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::config::{DistanceWeighting, SpotFeatureConfig};
use crate::error::{FeatureError, FeatureResult};
use crate::normalize::apply_distance_weighting;
use crate::table::{FeatureRow, FeatureTable};

/// Measure every spot in `spots` against its object.
///
/// # Arguments
///
/// * `raw` - Raw intensity channel
/// * `spots` - Candidate spot centers in the global frame
/// * `labels` - Object label volume; `None` treats the whole image as one
///   object with label 1
/// * `sharp` - Spot-enhanced channel; `None` uses the raw channel, or a
///   difference of Gaussians of it when `sharpen_with_dog` is set
/// * `config` - Extraction configuration
///
/// # Returns
///
/// One row per spot assigned to an object. Objects without spots add no
/// rows; an image without objects gives an empty table.
///
/// # Errors
///
/// Returns `FeatureError::InvalidRadii` for invalid radii and
/// `FeatureError::ShapeMismatch` when a channel doesn't match the label
/// volume. Both are checked before any work is done.
pub fn compute_spots_features(
    raw: &Image,
    spots: &[Zyx],
    labels: Option<&LabelVolume>,
    sharp: Option<&Image>,
    config: &SpotFeatureConfig,
) -> FeatureResult<FeatureTable> {
    compute_spots_features_with_progress(raw, spots, labels, sharp, config, |_, _| {})
}

/// Same as [`compute_spots_features`], reporting `(objects_done,
/// objects_total)` after every object.
///
/// With `config.parallel` the callback is invoked from worker threads, in
/// completion order.
pub fn compute_spots_features_with_progress<F>(
    raw: &Image,
    spots: &[Zyx],
    labels: Option<&LabelVolume>,
    sharp: Option<&Image>,
    config: &SpotFeatureConfig,
    progress: F,
) -> FeatureResult<FeatureTable>
where
    F: Fn(usize, usize) + Sync,
{
    config.validate()?;

    let labels: Cow<'_, LabelVolume> = match labels {
        Some(l) => Cow::Borrowed(l),
        None => Cow::Owned(single_object_labels(raw.shape())?),
    };
    check_channel("raw", &labels, raw)?;
    if let Some(s) = sharp {
        check_channel("sharp", &labels, s)?;
    }

    let spheroid = local_spheroid_mask(config.radii)?;
    let tolerance = expand_tolerance(config.radii)?;
    let weights = match config.distance_weighting {
        DistanceWeighting::None => None,
        _ => Some(normalized_distance_transform(&spheroid)?),
    };

    let objects = region_props(&labels);
    info!(
        objects = objects.len(),
        spots = spots.len(),
        parallel = config.parallel,
        "computing spot features"
    );
    if objects.is_empty() {
        return Ok(FeatureTable::new());
    }

    let preproc: Cow<'_, Image> = if config.preprocess.is_identity() {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(preprocess(raw, &config.preprocess)?)
    };
    let sharp: Cow<'_, Image> = match sharp {
        Some(s) => {
            if config.sharpen_with_dog {
                warn!("sharp image supplied, sharpen_with_dog ignored");
            }
            Cow::Borrowed(s)
        }
        None if config.sharpen_with_dog => {
            let sharpened = if config.preprocess.use_accelerated_backend {
                dog_sharpen_spots_parallel(raw, config.radii)?
            } else {
                dog_sharpen_spots(raw, config.radii)?
            };
            Cow::Owned(sharpened)
        }
        None => Cow::Borrowed(raw),
    };

    let ctx = ObjectContext {
        labels: &labels,
        preproc: &preproc,
        sharp: &sharp,
        raw,
        spots,
        spheroid: &spheroid,
        weights: weights.as_ref(),
        weighting: config.distance_weighting,
        tolerance,
    };

    let total = objects.len();
    let done = AtomicUsize::new(0);
    progress(0, total);
    let measure = |object: &ObjectProps| {
        let rows = ctx.object_rows(object);
        progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
        rows
    };
    let per_object: Vec<Vec<FeatureRow>> = if config.parallel {
        objects.par_iter().map(measure).collect::<FeatureResult<_>>()?
    } else {
        objects.iter().map(measure).collect::<FeatureResult<_>>()?
    };

    // Ids follow table order, never completion order
    let mut rows: Vec<FeatureRow> = per_object.into_iter().flatten().collect();
    for (spot_id, row) in rows.iter_mut().enumerate() {
        row.spot_id = spot_id;
    }

    info!(rows = rows.len(), "spot features computed");
    Ok(FeatureTable::from_rows(rows))
}

fn check_channel(channel: &'static str, labels: &LabelVolume, image: &Image) -> FeatureResult<()> {
    if labels.shape() != image.shape() {
        return Err(FeatureError::ShapeMismatch {
            channel,
            expected: labels.shape().as_tuple(),
            actual: image.shape().as_tuple(),
        });
    }
    Ok(())
}

fn to_f64(values: Vec<f32>) -> Vec<f64> {
    values.into_iter().map(f64::from).collect()
}

fn push_metrics(values: &mut Vec<f64>, sample: &[f64]) {
    values.extend(DistributionMetric::ALL.iter().map(|m| m.compute(sample)));
}

/// Read-only state shared by every object
struct ObjectContext<'a> {
    labels: &'a LabelVolume,
    preproc: &'a Image,
    sharp: &'a Image,
    raw: &'a Image,
    spots: &'a [Zyx],
    spheroid: &'a Mask,
    weights: Option<&'a Volume<f64>>,
    weighting: DistanceWeighting,
    tolerance: Zyx,
}

/// One object's channels cropped to its expanded slice
struct ObjectCrop {
    preproc: Image,
    sharp: Image,
    raw: Image,
    background: Mask,
}

impl ObjectContext<'_> {
    /// Rows of one object, with spot ids still unassigned
    fn object_rows(&self, object: &ObjectProps) -> FeatureResult<Vec<FeatureRow>> {
        let local = to_local_coords(object, self.labels, self.spots);
        if local.is_empty() {
            debug!(label = object.label, "no spots, object skipped");
            return Ok(Vec::new());
        }

        let slice = expanded_object_slice(object, self.tolerance, self.labels)?;
        let placed: Vec<(Zyx, Zyx, Zyx)> = local
            .iter()
            .map(|&l| (l, object.bounds.to_global(l)))
            .filter_map(|(l, g)| slice.to_crop(g).map(|e| (l, e, g)))
            .collect();
        let centers: Vec<Zyx> = placed.iter().map(|&(_, e, _)| e).collect();

        let masks = spheroid_and_background_masks(&centers, &slice.mask, self.spheroid)?;
        let crop = ObjectCrop {
            preproc: self.preproc.crop(&slice.slice)?,
            sharp: self.sharp.crop(&slice.slice)?,
            raw: self.raw.crop(&slice.slice)?,
            background: masks.background,
        };

        let background = to_f64(crop.background.select(&crop.sharp)?);
        let mut background_metrics = Vec::with_capacity(DistributionMetric::ALL.len());
        push_metrics(&mut background_metrics, &background);
        debug!(
            label = object.label,
            spots = placed.len(),
            crop = ?slice.slice.shape().as_tuple(),
            background_voxels = background.len(),
            "measuring object"
        );

        placed
            .into_iter()
            .map(|(local, expanded, global)| {
                let values = self.spot_values(&crop, expanded, &background_metrics)?;
                trace!(label = object.label, spot = ?global.as_tuple(), "spot measured");
                Ok(FeatureRow {
                    cell_id: object.label,
                    spot_id: 0,
                    local,
                    local_expanded: expanded,
                    global,
                    values,
                })
            })
            .collect()
    }

    /// Feature values of the spot centered at `center` (crop frame)
    fn spot_values(&self, crop: &ObjectCrop, center: Zyx, background_metrics: &[f64]) -> FeatureResult<Vec<f64>> {
        let shape = crop.background.shape();
        let (outer, inner) = slice_local_into_global(center, shape, self.spheroid.shape())?;
        let spot_mask = self.spheroid.crop(&inner)?;

        let mut values = background_metrics.to_vec();
        for channel in [&crop.preproc, &crop.sharp, &crop.raw] {
            values.push(f64::from(channel.get_unchecked(center)));
            let sample = to_f64(spot_mask.select(&channel.crop(&outer)?)?);
            push_metrics(&mut values, &sample);
        }

        // Spot versus background on the spot's own z-plane
        let plane = Bounds3::new_unchecked(Zyx::new(center.z, 0, 0), Zyx::new(center.z + 1, shape.y, shape.x));
        let background_z = to_f64(crop.background.crop(&plane)?.select(&crop.sharp.crop(&plane)?)?);
        let outer_z = Bounds3::new_unchecked(
            Zyx::new(center.z, outer.start.y, outer.start.x),
            Zyx::new(center.z + 1, outer.stop.y, outer.stop.x),
        );
        let sharp_z = to_f64(crop.sharp.values_in(&outer_z)?);
        let sharp_z = match self.weights {
            Some(w) => {
                let w = w.crop(&inner)?.max_project_z();
                apply_distance_weighting(&sharp_z, w.data(), &background_z, self.weighting)
            }
            None => sharp_z,
        };
        let footprint = spot_mask.max_project_z();
        let spot_z: Vec<f64> = sharp_z
            .iter()
            .zip(footprint.data())
            .filter_map(|(&v, &inside)| inside.then_some(v))
            .collect();

        let ttest = welch_ttest(&spot_z, &background_z);
        values.push(ttest.statistic);
        values.push(ttest.pvalue);
        values.extend(EffectSizeMetric::ALL.iter().map(|m| m.compute(&spot_z, &background_z)));
        Ok(values)
    }
}
