//! Tests for pyramid construction and level access

#[cfg(test)]
mod tests {
    use texsynth::spatial::buffer::{PixelBuffer, pack_rgb};
    use texsynth::spatial::pyramid::Pyramid;

    // Tests automatic level count halves the smaller side down to one pixel
    // Verified by using the larger side
    #[test]
    fn test_automatic_level_count() {
        assert_eq!(Pyramid::automatic_level_count(8, 8), 3);
        assert_eq!(Pyramid::automatic_level_count(4, 4), 2);
        assert_eq!(Pyramid::automatic_level_count(64, 5), 2);
        assert_eq!(Pyramid::automatic_level_count(1, 1), 1);
        assert_eq!(Pyramid::automatic_level_count(1, 100), 1);
    }

    // Tests each level halves the previous one
    // Verified by skipping the halving for odd sizes
    #[test]
    fn test_levels_halve() {
        let source = PixelBuffer::new(8, 6).unwrap();
        let pyramid = Pyramid::new(source, Some(4), false).unwrap();

        let dims: Vec<_> = pyramid.iter().map(PixelBuffer::dimensions).collect();
        assert_eq!(dims, vec![(8, 6), (4, 3), (2, 1), (1, 1)]);
        assert_eq!(pyramid.level_count(), 4);
    }

    // Tests automatic and explicit level counts are honored
    // Verified by ignoring the explicit count
    #[test]
    fn test_level_count_selection() {
        let source = PixelBuffer::new(16, 16).unwrap();
        let automatic = Pyramid::new(source.clone(), None, false).unwrap();
        let explicit = Pyramid::new(source.clone(), Some(2), false).unwrap();
        let clamped = Pyramid::new(source, Some(0), false).unwrap();

        assert_eq!(automatic.level_count(), 4);
        assert_eq!(explicit.level_count(), 2);
        assert_eq!(clamped.level_count(), 1);
    }

    // Tests level 0 is the untouched source
    // Verified by blurring level 0 as well
    #[test]
    fn test_finest_level_is_source() {
        let mut source = PixelBuffer::new(4, 4).unwrap();
        source.put(1, 2, pack_rgb(255, 255, 255));
        let pyramid = Pyramid::new(source.clone(), Some(3), true).unwrap();

        assert_eq!(pyramid.finest(), &source);
        assert_eq!(pyramid.level(0), &source);
        assert_eq!(pyramid.into_finest(), source);
    }

    // Tests solid colors survive downsampling and blurring
    // Verified by dropping the alpha channel during resize
    #[test]
    fn test_solid_color_preserved() {
        let red = pack_rgb(255, 0, 0);
        let source = PixelBuffer::filled(8, 8, red).unwrap();
        let pyramid = Pyramid::new(source, None, true).unwrap();

        for level in pyramid.iter() {
            assert!(level.pixels().iter().all(|&p| p == red));
        }
    }

    // Tests out-of-range level requests clamp to the coarsest level
    // Verified by returning level 0 instead
    #[test_log::test]
    fn test_level_request_clamps() {
        let source = PixelBuffer::new(8, 8).unwrap();
        let mut pyramid = Pyramid::new(source, Some(3), false).unwrap();

        assert_eq!(pyramid.level(10).dimensions(), (2, 2));
        pyramid.level_mut(10).put(0, 0, pack_rgb(1, 2, 3));
        assert_eq!(pyramid.level(2).get(0, 0), pack_rgb(1, 2, 3));
    }
}
