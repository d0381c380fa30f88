//! Flattened export of the session.

use log::info;

use crate::composite::{composite_covers, ArtworkSet};
use crate::decode::DecodedImage;
use crate::encode::encode_image;
use crate::error::EditorError;

use super::{Phase, Session};

impl Session {
    /// Draw every cover over the full-resolution `source`.
    ///
    /// Cover coordinates are scaled from
    /// the working resolution to its size.
    pub fn composite(
        &self,
        source: &DecodedImage,
        artworks: &ArtworkSet,
    ) -> Result<DecodedImage, EditorError> {
        let working = self.image_size.ok_or(EditorError::NoImage)?;
        let covers = self.covers.iter().map(|e| &e.cover);
        Ok(composite_covers(source, covers, working, artworks)?)
    }

    /// Composite and encode the export as JPEG.
    ///
    /// Holds the busy gate for the duration; the session is `Ready` again
    /// afterwards whether or not the export succeeded.
    pub fn export(
        &mut self,
        source: &DecodedImage,
        artworks: &ArtworkSet,
    ) -> Result<Vec<u8>, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if self.image_size.is_none() {
            return Err(EditorError::NoImage);
        }

        let quality = self.config.export_quality;
        self.gesture = None;
        self.phase = Phase::Exporting;
        let result = self
            .composite(source, artworks)
            .and_then(|image| encode_image(&image, quality).map_err(EditorError::from));
        self.phase = Phase::Ready;

        if let Ok(bytes) = &result {
            info!(
                "exported {}x{} with {} covers ({} bytes)",
                source.width,
                source.height,
                self.covers.len(),
                bytes.len()
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::CoverKind;
    use crate::decode::{decode_image, Artwork};
    use crate::editor::tests::ready_session;

    fn artworks() -> ArtworkSet {
        let mut set = ArtworkSet::new();
        set.insert(CoverKind::Doremi, Artwork::new(1, 1, vec![0, 0, 0, 255]));
        set
    }

    #[test]
    fn test_export_encodes_full_resolution() {
        let mut session = ready_session(50, 25);
        session.add_cover().unwrap();
        let source = DecodedImage::new(100, 50, vec![255; 100 * 50 * 3]);

        let bytes = session.export(&source, &artworks()).unwrap();
        assert_eq!(session.phase(), Phase::Ready);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 50));
        // Cover at the center is black, the corner keeps the photo
        let center = ((25 * 100 + 50) * 3) as usize;
        assert!(decoded.pixels[center] < 40);
        assert!(decoded.pixels[0] > 215);
    }

    #[test]
    fn test_composite_scales_cover() {
        let mut session = ready_session(10, 10);
        session.add_cover().unwrap();
        // Cover is 2x2 around (5, 5) at working size, 4x4 around (10, 10) here
        let source = DecodedImage::new(20, 20, vec![200; 20 * 20 * 3]);
        let out = session.composite(&source, &artworks()).unwrap();
        let at = |x: usize, y: usize| out.pixels[(y * 20 + x) * 3];
        assert_eq!(at(8, 8), 0);
        assert_eq!(at(11, 11), 0);
        assert_eq!(at(7, 10), 200);
        assert_eq!(at(12, 10), 200);
    }

    #[test]
    fn test_export_without_image() {
        let mut session = Session::default();
        let source = DecodedImage::new(1, 1, vec![0; 3]);
        assert_eq!(
            session.export(&source, &artworks()),
            Err(EditorError::NoImage)
        );
    }

    #[test]
    fn test_export_rejected_while_loading() {
        let mut session = ready_session(10, 10);
        session.begin_load();
        let source = DecodedImage::new(10, 10, vec![0; 300]);
        assert_eq!(session.export(&source, &artworks()), Err(EditorError::Busy));
        assert!(session.is_busy());
    }

    #[test]
    fn test_export_failure_restores_ready() {
        let mut session = ready_session(10, 10);
        let bad = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 7],
        };
        let err = session.export(&bad, &artworks()).unwrap_err();
        assert_eq!(err.code(), "EXPORT_FAILED");
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.add_cover().is_some());
    }
}
