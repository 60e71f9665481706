//! Tests for debug dumps of pyramids and neighborhoods

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use tempfile::TempDir;
    use texsynth::analysis::field::NeighborhoodField;
    use texsynth::analysis::neighborhood::{Neighborhood, WindowConfig};
    use texsynth::io::dump::{dump_all, dump_field, dump_pyramid, neighborhood_strip};
    use texsynth::io::image::load_exemplar;
    use texsynth::spatial::buffer::{PixelBuffer, pack_rgb};
    use texsynth::spatial::pyramid::Pyramid;

    fn pyramid() -> Pyramid {
        let source = PixelBuffer::noise(4, 4, &mut StdRng::seed_from_u64(1)).unwrap();
        Pyramid::new(source, Some(2), false).unwrap()
    }

    fn field(pyramid: &Pyramid) -> NeighborhoodField {
        NeighborhoodField::build(
            pyramid,
            WindowConfig {
                diameter: 3,
                multiresolution: true,
            },
        )
    }

    // Tests one image per pyramid level with the level's size
    // Verified by writing only level 0
    #[test]
    fn test_dump_pyramid_levels() {
        let dir = TempDir::new().unwrap();
        let pyramid = pyramid();

        let written = dump_pyramid(&pyramid, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("pyr-0.png"));

        let coarse = load_exemplar(dir.path().join("pyr-1.png")).unwrap();
        assert_eq!(&coarse, pyramid.level(1));
    }

    // Tests strips lay samples out left to right
    // Verified by writing samples in reverse order
    #[test]
    fn test_neighborhood_strip() {
        let hood = Neighborhood::from_samples(vec![pack_rgb(1, 0, 0), pack_rgb(0, 2, 0)]);
        let strip = neighborhood_strip(&hood).unwrap();

        assert_eq!(strip.dimensions(), (2, 1));
        assert_eq!(strip.get(1, 0), pack_rgb(0, 2, 0));
        assert!(neighborhood_strip(&Neighborhood::default()).is_none());
    }

    // Tests the neighborhood limit caps the number of files
    // Verified by ignoring the limit
    #[test]
    fn test_dump_field_respects_limit() {
        let dir = TempDir::new().unwrap();
        let pyramid = pyramid();
        let field = field(&pyramid);

        assert_eq!(dump_field(&field, dir.path(), 3).unwrap(), 3);
        assert!(dir.path().join("hood-0-2,0.png").exists());
        assert!(!dir.path().join("hood-0-3,0.png").exists());

        // 16 level 0 pixels plus 4 level 1 pixels
        assert_eq!(dump_field(&field, dir.path(), 100).unwrap(), 20);
        assert!(dir.path().join("hood-1-1,1.png").exists());
    }

    // Tests a full dump writes pyramid and neighborhood files
    // Verified by skipping the pyramid dump
    #[test]
    fn test_dump_all() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("debug");
        let pyramid = pyramid();
        let field = field(&pyramid);

        dump_all(&pyramid, &field, &target).unwrap();
        assert!(target.join("pyr-0.png").exists());
        assert!(target.join("pyr-1.png").exists());
        assert!(target.join("hood-0-0,0.png").exists());
    }
}
