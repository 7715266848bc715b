#[cfg(test)]
mod tests {
    use ndarray::{Array2, Array3, Axis, array, s};

    use crate::image_pipeline::composite::colormap::Inferno;
    use crate::image_pipeline::composite::compositor::{composite, composite_with_epsilon};
    use crate::image_pipeline::composite::role::ChannelRole;
    use crate::image_pipeline::composite::types::{ChannelSelection, PreviewBuffer};
    use crate::image_pipeline::raster::{Raster, RasterReader, TiffRasterReader};
    use crate::image_pipeline::test_support;

    /// Raster whose channel `c` holds `c * 17 + y * width + x`, giving
    /// every channel a distinct non-uniform ramp.
    fn ramp_raster(height: usize, width: usize, channels: usize) -> Raster {
        let data = Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
            (c * 17 + y * width + x) as f64
        });
        Raster::new(data).unwrap()
    }

    fn component(preview: &PreviewBuffer, c: usize) -> Array2<u8> {
        preview.data().index_axis(Axis(2), c).to_owned()
    }

    #[test]
    fn test_single_channel_renders_as_red() {
        let raster = Raster::from_plane(array![[0.0, 255.0], [128.0, 64.0]]).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0]));

        assert_eq!(component(&preview, 0), array![[0u8, 255], [128, 64]]);
        assert!(component(&preview, 1).iter().all(|&v| v == 0));
        assert!(component(&preview, 2).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_output_shape_matches_raster() {
        for channels in [1, 2, 3, 5, 9] {
            let raster = ramp_raster(3, 5, channels);
            for selection in [
                ChannelSelection::new(),
                ChannelSelection::from([0]),
                ChannelSelection::from([1, 2, 4]),
                (0..12).collect(),
            ] {
                let preview = composite(&raster, &selection);
                assert_eq!(preview.data().dim(), (3, 5, 3));
                assert_eq!(preview.height(), 3);
                assert_eq!(preview.width(), 5);
            }
        }
    }

    #[test]
    fn test_uniform_channel_normalizes_to_zero() {
        let raster = Raster::from_plane(Array2::from_elem((3, 3), 42.0)).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0]));

        assert!(preview.is_blank());
    }

    #[test]
    fn test_uniform_channels_scenario() {
        let mut data = Array3::<f64>::zeros((4, 4, 4));
        for (c, value) in [100.0, 50.0, 0.0, 200.0].into_iter().enumerate() {
            data.index_axis_mut(Axis(2), c).fill(value);
        }
        let raster = Raster::new(data).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0, 1, 2, 3]));

        // The overlay maps zero to the dark end of the colour map, which rounds to black.
        assert_eq!(preview.data().dim(), (4, 4, 3));
        assert!(preview.is_blank(), "{:?}", preview.data());
    }

    #[test]
    fn test_raising_a_sample_never_darkens_it() {
        let base = array![[0.0, 10.0, 20.0], [30.0, 40.0, 100.0]];
        let before = composite(&Raster::from_plane(base.clone()).unwrap(), &ChannelSelection::from([0]));

        let mut raised = base;
        raised[[0, 1]] = 35.0;
        let after = composite(&Raster::from_plane(raised).unwrap(), &ChannelSelection::from([0]));

        assert!(after.data()[[0, 1, 0]] > before.data()[[0, 1, 0]]);
        assert_eq!(after.data()[[1, 0, 0]], before.data()[[1, 0, 0]]);
    }

    #[test]
    fn test_overlays_commute() {
        let diagonal = |y: usize, x: usize| (y * x) as f64;
        let falling = |y: usize, x: usize| (3 - x) as f64 + 2.0 * y as f64;

        let forward = Array3::from_shape_fn((4, 4, 5), |(y, x, c)| match c {
            3 => diagonal(y, x),
            4 => falling(y, x),
            _ => 0.0,
        });
        let backward = Array3::from_shape_fn((4, 4, 5), |(y, x, c)| match c {
            3 => falling(y, x),
            4 => diagonal(y, x),
            _ => 0.0,
        });

        let selection = ChannelSelection::from([3, 4]);
        assert_eq!(
            composite(&Raster::new(forward).unwrap(), &selection),
            composite(&Raster::new(backward).unwrap(), &selection)
        );
    }

    #[test]
    fn test_overlay_never_darkens_rgb() {
        let raster = ramp_raster(4, 4, 4);
        let rgb = composite(&raster, &ChannelSelection::from([0, 1, 2]));
        let with_overlay = composite(&raster, &ChannelSelection::from([0, 1, 2, 3]));

        ndarray::Zip::from(rgb.data())
            .and(with_overlay.data())
            .for_each(|&before, &after| assert!(after >= before));
    }

    #[test]
    fn test_overlay_uses_colormap() {
        let data = Array3::from_shape_fn((1, 2, 4), |(_, x, c)| if c == 3 { x as f64 } else { 0.0 });
        let raster = Raster::new(data).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([3]));

        let high = Inferno.sample(1.0);
        let expected: Vec<u8> = high.iter().map(|v| (v * 255.0).round() as u8).collect();
        assert_eq!(preview.data().slice(s![0, 1, ..]).to_vec(), expected);
        // Rounded to u8 the dark end of the map is black
        assert_eq!(preview.data().slice(s![0, 0, ..]).to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let raster = ramp_raster(3, 3, 2);
        assert_eq!(
            composite(&raster, &ChannelSelection::from([0, 5])),
            composite(&raster, &ChannelSelection::from([0]))
        );
        assert!(composite(&raster, &ChannelSelection::from([2, 9])).is_blank());
    }

    #[test]
    fn test_empty_selection_is_blank() {
        let raster = ramp_raster(2, 3, 4);
        let preview = composite(&raster, &ChannelSelection::new());

        assert_eq!(preview.data().dim(), (2, 3, 3));
        assert!(preview.is_blank());
    }

    #[test]
    fn test_channels_normalize_independently() {
        // Same shape, wildly different ranges: both reach full scale.
        let data = Array3::from_shape_fn((1, 2, 2), |(_, x, c)| {
            let scale = if c == 0 { 1.0 } else { 10_000.0 };
            x as f64 * scale
        });
        let preview = composite(&Raster::new(data).unwrap(), &ChannelSelection::from([0, 1]));

        assert_eq!(preview.data().slice(s![0, 1, ..]).to_vec(), vec![255, 255, 0]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raster = ramp_raster(3, 3, 5);
        let copy = raster.clone();
        let _ = composite(&raster, &(0..5).collect());
        assert_eq!(raster, copy);
    }

    #[test]
    fn test_non_finite_samples_do_not_poison_range() {
        let raster = Raster::from_plane(array![[0.0, f64::NAN], [f64::INFINITY, 100.0]]).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0]));

        assert_eq!(preview.data()[[0, 0, 0]], 0);
        assert_eq!(preview.data()[[1, 1, 0]], 255);
    }

    #[test]
    fn test_larger_epsilon_dims_output() {
        let raster = Raster::from_plane(array![[0.0, 1.0]]).unwrap();
        let preview = composite_with_epsilon(&raster, &ChannelSelection::from([0]), 1.0);

        assert_eq!(preview.data()[[0, 1, 0]], 128);
    }

    #[test]
    fn test_wide_integer_samples_keep_precision() {
        // Adjacent values just above 2^24 are indistinguishable in f32.
        let bytes = test_support::gray32(2, 1, &[16_777_216, 16_777_217]);
        let raster = TiffRasterReader.read_raster(&bytes).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0]));

        assert_eq!(component(&preview, 0), array![[0u8, 255]]);
    }

    #[test]
    fn test_large_offsets_do_not_flatten_a_channel() {
        let raster = Raster::from_plane(array![[1e12, 1e12 + 3.0, 1e12 + 4.0]]).unwrap();
        let preview = composite(&raster, &ChannelSelection::from([0]));

        assert_eq!(component(&preview, 0), array![[0u8, 191, 255]]);
    }

    #[test]
    fn test_selection_is_an_ordered_set() {
        let selection: ChannelSelection = [4, 0, 4, 2].into_iter().collect();

        assert_eq!(selection.len(), 3);
        assert!(selection.contains(4));
        assert!(!selection.contains(1));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(selection.in_range(3).collect::<Vec<_>>(), vec![0, 2]);
        assert!(!selection.is_empty());
        assert!(ChannelSelection::new().is_empty());
    }

    #[test]
    fn test_role_dispatch() {
        assert_eq!(ChannelRole::of(0), ChannelRole::Red);
        assert_eq!(ChannelRole::of(1), ChannelRole::Green);
        assert_eq!(ChannelRole::of(2), ChannelRole::Blue);
        assert_eq!(ChannelRole::of(3), ChannelRole::Overlay);
        assert_eq!(ChannelRole::of(250), ChannelRole::Overlay);
        assert_eq!(ChannelRole::of(250).slot(), None);
        assert_eq!(ChannelRole::of(2).slot(), Some(2));
    }

    fn luminance([r, g, b]: [f32; 3]) -> f32 {
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    #[test]
    fn test_colormap_endpoints() {
        let low = Inferno.sample(0.0);
        assert!(low.iter().all(|&c| c < 0.02), "{low:?}");

        let high = Inferno.sample(1.0);
        assert!(high[0] > 0.95 && high[1] > 0.95, "{high:?}");
        assert!(high[2] > 0.55 && high[2] < 0.75, "{high:?}");
    }

    #[test]
    fn test_colormap_clamps_out_of_range_input() {
        assert_eq!(Inferno.sample(-3.0), Inferno.sample(0.0));
        assert_eq!(Inferno.sample(7.0), Inferno.sample(1.0));
        assert_eq!(Inferno.sample(f32::NAN), Inferno.sample(0.0));
    }

    #[test]
    fn test_colormap_brightness_increases() {
        let samples: Vec<f32> = (0..=10)
            .map(|i| luminance(Inferno.sample(i as f32 / 10.0)))
            .collect();
        assert!(samples.windows(2).all(|w| w[1] > w[0]), "{samples:?}");
    }
}
