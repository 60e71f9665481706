//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::{Path, PathBuf};
    use texsynth::SynthesisError;
    use texsynth::io::error::{invalid_parameter, invalid_target};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SynthesisError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read"));
    }

    // Tests interruption messages name the level and next pixel
    // Verified by swapping x and y in the message
    #[test]
    fn test_interrupted_error() {
        let error = SynthesisError::Interrupted {
            level: 2,
            x: 5,
            y: 7,
        };

        assert_eq!(
            error.to_string(),
            "Synthesis interrupted at level 2 before (5, 7)"
        );
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("diameter", &0, &"must be at least 1");

        let message = error.to_string();
        assert!(message.contains("diameter"));
        assert!(message.contains('0'));
        assert!(message.contains("must be at least 1"));
    }

    // Tests target errors carry the offending path
    // Verified by dropping the path from the value
    #[test]
    fn test_invalid_target_error() {
        let error = invalid_target(Path::new("textures/notes.txt"), "must be an image");

        match error {
            SynthesisError::InvalidParameter {
                parameter, value, ..
            } => {
                assert_eq!(parameter, "target");
                assert!(value.contains("notes.txt"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = SynthesisError::ImageExport {
            path: PathBuf::from("/restricted/output.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/output.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions from library errors keep the source
    // Verified by converting into InvalidSourceData
    #[test]
    fn test_from_conversions() {
        let io: SynthesisError = std::io::Error::other("disk gone").into();
        assert!(matches!(io, SynthesisError::FileSystem { .. }));
        assert!(io.source().is_some());

        let img: SynthesisError = image::ImageError::IoError(std::io::Error::other("bad")).into();
        assert!(matches!(img, SynthesisError::ImageLoad { .. }));
    }
}
