use ndarray::{Array2, Array3, ArrayView2, Axis, Zip};
use tracing::{debug, trace};

use crate::image_pipeline::composite::colormap::Inferno;
use crate::image_pipeline::composite::role::ChannelRole;
use crate::image_pipeline::composite::types::{ChannelSelection, PreviewBuffer};
use crate::image_pipeline::raster::Raster;

/// Guard added to every channel's range so uniform channels normalize to zero.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Composites `selection` of `raster` into an RGB preview.
///
/// An empty selection, or one whose indices all lie past the raster's
/// channel count, yields an all-zero buffer of the raster's size.
pub fn composite(raster: &Raster, selection: &ChannelSelection) -> PreviewBuffer {
    composite_with_epsilon(raster, selection, DEFAULT_EPSILON)
}

pub fn composite_with_epsilon(
    raster: &Raster,
    selection: &ChannelSelection,
    epsilon: f64,
) -> PreviewBuffer {
    let (height, width) = (raster.height(), raster.width());
    let mut canvas = Array3::<f32>::zeros((height, width, 3));

    for index in selection.in_range(raster.channel_count()) {
        let Some(plane) = raster.channel(index) else {
            continue;
        };
        let normalized = normalize(plane, epsilon);
        let role = ChannelRole::of(index);
        trace!("Channel {} -> {:?}", index, role);

        match role.slot() {
            Some(slot) => {
                let mut target = canvas.index_axis_mut(Axis(2), slot);
                target += &normalized;
            }
            None => overlay(&mut canvas, &normalized),
        }
    }

    debug!(
        "Composited {}x{} preview from {} of {} selected channel(s)",
        width,
        height,
        selection.in_range(raster.channel_count()).count(),
        selection.len()
    );

    PreviewBuffer::new(canvas.mapv(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
}

/// Min-max rescale of one plane to `[0, 1]`, using only finite samples for
/// the range. A plane without finite samples normalizes to zeros.
///
/// The range is taken in `f64` so wide integer samples keep their low bits;
/// only the normalized result is narrowed for the canvas.
fn normalize(plane: ArrayView2<'_, f64>, epsilon: f64) -> Array2<f32> {
    let range = plane
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match range {
        Some((min, max)) => {
            let scale = max - min + epsilon;
            plane.mapv(|v| ((v - min) / scale) as f32)
        }
        None => Array2::zeros(plane.raw_dim()),
    }
}

fn overlay(canvas: &mut Array3<f32>, normalized: &Array2<f32>) {
    Zip::from(canvas.lanes_mut(Axis(2)))
        .and(normalized)
        .for_each(|mut pixel, &t| {
            let color = Inferno.sample(t);
            for (component, mapped) in pixel.iter_mut().zip(color) {
                *component = component.max(mapped);
            }
        });
}
