//! Tests for window layouts and multi-level neighborhood sampling

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use texsynth::analysis::neighborhood::{Neighborhood, Sampling, WindowConfig, window_offsets};
    use texsynth::spatial::buffer::PixelBuffer;
    use texsynth::spatial::pyramid::Pyramid;

    fn noise_pyramid(size: usize, levels: usize) -> Pyramid {
        let source = PixelBuffer::noise(size, size, &mut StdRng::seed_from_u64(3)).unwrap();
        Pyramid::new(source, Some(levels), false).unwrap()
    }

    // Tests causal windows stop right before the center in raster order
    // Verified by including the center pixel
    #[test]
    fn test_causal_window_offsets() {
        assert_eq!(
            window_offsets(3, Sampling::Causal, true),
            vec![[-1, -1], [0, -1], [1, -1], [-1, 0]]
        );
        assert_eq!(window_offsets(3, Sampling::Full, true).len(), 9);
        // Coarser levels ignore the causal request
        assert_eq!(window_offsets(3, Sampling::Causal, false).len(), 9);
    }

    // Tests diameter one samples the predecessor pixel
    // Verified by sampling only the center for the full window
    #[test]
    fn test_unit_diameter_windows() {
        assert_eq!(window_offsets(1, Sampling::Causal, true), vec![[-1, 0]]);
        assert_eq!(window_offsets(1, Sampling::Full, true), vec![[-1, 0], [0, 0]]);
        assert_eq!(window_offsets(1, Sampling::Full, false), vec![[0, 0]]);
    }

    // Tests per-level diameters shrink by half and stay odd
    // Verified by rounding down instead of up
    #[test]
    fn test_level_diameter() {
        let config = WindowConfig {
            diameter: 9,
            multiresolution: true,
        };
        let diameters: Vec<_> = (0..5).map(|depth| config.level_diameter(depth)).collect();
        assert_eq!(diameters, vec![9, 5, 3, 3, 1]);
    }

    // Tests single-level neighborhood lengths match the window formulas
    // Verified by rounding the causal half up
    #[test]
    fn test_single_level_lengths() {
        let pyramid = noise_pyramid(8, 1);
        for diameter in [1_usize, 3, 5, 9] {
            let config = WindowConfig {
                diameter,
                multiresolution: false,
            };
            let full = Neighborhood::build(&pyramid, 0, 4, 4, &config, Sampling::Full);
            let causal = Neighborhood::build(&pyramid, 0, 4, 4, &config, Sampling::Causal);

            let (expected_full, expected_causal) = if diameter == 1 {
                (2, 1)
            } else {
                (diameter * diameter, (diameter * diameter - 1) / 2)
            };
            assert_eq!(full.len(), expected_full, "diameter {diameter}");
            assert_eq!(causal.len(), expected_causal, "diameter {diameter}");
            assert_eq!(config.segment_len(0, Sampling::Full), expected_full);
            assert_eq!(config.segment_len(0, Sampling::Causal), expected_causal);
        }
    }

    // Tests coarser levels contribute full windows ahead of the target level
    // Verified by sampling coarse levels causally
    #[test]
    fn test_multiresolution_lengths() {
        let pyramid = noise_pyramid(16, 3);
        let config = WindowConfig {
            diameter: 5,
            multiresolution: true,
        };

        let full = Neighborhood::build(&pyramid, 0, 7, 9, &config, Sampling::Full);
        let causal = Neighborhood::build(&pyramid, 0, 7, 9, &config, Sampling::Causal);
        assert_eq!(full.len(), 25 + 9 + 9);
        assert_eq!(causal.len(), 12 + 9 + 9);

        // Level 1 only has one coarser level above it
        let upper = Neighborhood::build(&pyramid, 1, 3, 4, &config, Sampling::Full);
        assert_eq!(upper.len(), 25 + 9);
    }

    // Tests a causal neighborhood is a prefix of the full one at the same pixel
    // Verified by appending coarse levels after the target level
    #[test]
    fn test_causal_is_prefix_of_full() {
        let pyramid = noise_pyramid(16, 3);
        for multiresolution in [false, true] {
            for diameter in [1, 3, 7] {
                let config = WindowConfig {
                    diameter,
                    multiresolution,
                };
                let full = Neighborhood::build(&pyramid, 0, 5, 11, &config, Sampling::Full);
                let causal = Neighborhood::build(&pyramid, 0, 5, 11, &config, Sampling::Causal);
                assert_eq!(
                    causal.samples(),
                    full.samples().get(..causal.len()).unwrap(),
                    "diameter {diameter}, multiresolution {multiresolution}"
                );
            }
        }
    }

    // Tests windows near the border wrap to the opposite edge
    // Verified by clamping sample coordinates
    #[test]
    fn test_sampling_wraps() {
        let pyramid = noise_pyramid(4, 1);
        let level = pyramid.level(0);
        let config = WindowConfig {
            diameter: 3,
            multiresolution: false,
        };

        let hood = Neighborhood::build(&pyramid, 0, 0, 0, &config, Sampling::Full);
        assert_eq!(hood.samples().first(), Some(&level.get(3, 3)));
        assert_eq!(hood.samples().get(4), Some(&level.get(0, 0)));
        assert_eq!(hood.samples().last(), Some(&level.get(1, 1)));
    }

    // Tests coarse windows are centered on the shifted coordinates
    // Verified by sampling coarse levels at unshifted coordinates
    #[test]
    fn test_coarse_window_center() {
        let pyramid = noise_pyramid(8, 2);
        let config = WindowConfig {
            diameter: 1,
            multiresolution: true,
        };

        let hood = Neighborhood::build(&pyramid, 0, 5, 6, &config, Sampling::Full);
        let expected = vec![
            pyramid.level(1).get(2, 3),
            pyramid.level(0).get(4, 6),
            pyramid.level(0).get(5, 6),
        ];
        assert_eq!(hood.samples(), expected.as_slice());
    }

    // Tests pyramids deeper than the coordinate width sample the origin on far levels
    // Verified by shifting coordinates without a width check
    #[test]
    fn test_very_deep_pyramid_samples_origin() {
        let source = PixelBuffer::noise(4, 4, &mut StdRng::seed_from_u64(3)).unwrap();
        let pyramid = Pyramid::new(source, Some(70), false).unwrap();
        let config = WindowConfig {
            diameter: 3,
            multiresolution: true,
        };

        let hood = Neighborhood::build(&pyramid, 0, 3, 3, &config, Sampling::Full);
        // Depth 1 keeps a 3x3 window, the 68 deeper levels shrink to one sample
        assert_eq!(hood.len(), 68 + 9 + 9);
        assert_eq!(hood.samples().first(), Some(&pyramid.level(69).get(0, 0)));
    }

    // Tests a level past the coarsest one is clamped
    // Verified by returning an empty neighborhood
    #[test_log::test]
    fn test_out_of_range_level_clamps() {
        let pyramid = noise_pyramid(8, 2);
        let config = WindowConfig {
            diameter: 3,
            multiresolution: true,
        };

        let clamped = Neighborhood::build(&pyramid, 9, 1, 1, &config, Sampling::Full);
        let coarsest = Neighborhood::build(&pyramid, 1, 1, 1, &config, Sampling::Full);
        assert_eq!(clamped, coarsest);
        assert!(!clamped.is_empty());
    }
}
