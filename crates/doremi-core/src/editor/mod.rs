//! Interactive editing session.
//!
//! A [`Session`] owns the live cover list of one image, the current
//! selection, the display mapping and the busy phase. Everything that
//! mutates covers goes through it:
//!
//! - pointer gestures (select, move, resize, rotate) in [`gesture`]
//! - image loads with generation tickets in [`load`]
//! - flattened export in [`export`]
//! - add / delete / import here
//!
//! # Busy Gate
//!
//! While a load or an export is in flight the session rejects gestures,
//! add, delete and import. Rejected calls are silent no-ops (logged at warn
//! level), never queued.

mod export;
mod gesture;
mod load;

pub use gesture::{Corner, Drag, Gesture, PointerTarget};
pub use load::{LoadOutcome, LoadTicket};

use log::{debug, warn};

use crate::config::EditorConfig;
use crate::cover::{Cover, CoverEntry, CoverId};
use crate::data::{CoverRecord, SessionData};
use crate::derive::CoverDeriver;
use crate::detect::Detection;
use crate::error::EditorError;
use crate::geometry::Point;
use crate::transform::DisplayMapping;

use gesture::ActiveGesture;

/// What the session is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No image loaded
    #[default]
    Idle,
    /// Waiting for the image source and detector of load `generation`
    Loading { generation: u64 },
    /// Editable
    Ready,
    /// Compositing the export
    Exporting,
}

/// Editing state of one image.
#[derive(Debug, Default)]
pub struct Session {
    config: EditorConfig,
    id: u64,
    phase: Phase,
    generation: u64,
    image_size: Option<(u32, u32)>,
    display_size: (f64, f64),
    covers: Vec<CoverEntry>,
    next_id: u64,
    selected: Option<CoverId>,
    gesture: Option<ActiveGesture>,
    detection: Detection,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a ready session from exchanged data.
    ///
    /// Orientation of each cover is recovered from its transform text.
    pub fn from_data(data: SessionData, config: EditorConfig) -> Result<Self, EditorError> {
        let mut session = Self::new(config);
        session.import_data(data)?;
        Ok(session)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a load or export is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. } | Phase::Exporting)
    }

    /// Working-resolution size of the loaded image.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn display_size(&self) -> (f64, f64) {
        self.display_size
    }

    /// Record the rendered size of the editor container.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display_size = (width, height);
    }

    /// Mapping between display and image space, if both are known.
    pub fn mapping(&self) -> Option<DisplayMapping> {
        let (iw, ih) = self.image_size?;
        let mapping = DisplayMapping::new(
            iw as f64,
            ih as f64,
            self.display_size.0,
            self.display_size.1,
        );
        mapping.is_valid().then_some(mapping)
    }

    /// Raw detector output of the current image.
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Covers in z-order.
    pub fn covers(&self) -> &[CoverEntry] {
        &self.covers
    }

    pub fn cover(&self, id: CoverId) -> Option<&Cover> {
        self.covers.iter().find(|e| e.id == id).map(|e| &e.cover)
    }

    fn cover_mut(&mut self, id: CoverId) -> Option<&mut Cover> {
        self.covers
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.cover)
    }

    /// The selected cover id, if it still refers to a live cover.
    pub fn selected(&self) -> Option<CoverId> {
        self.selected.filter(|id| self.cover(*id).is_some())
    }

    pub fn selected_cover(&self) -> Option<&Cover> {
        self.selected().and_then(|id| self.cover(id))
    }

    /// Select a cover. Returns false when busy or the id is unknown.
    pub fn select(&mut self, id: CoverId) -> bool {
        if self.is_busy() || self.cover(id).is_none() {
            return false;
        }
        if self.selected != Some(id) {
            self.gesture = None;
            self.selected = Some(id);
            debug!("selected cover {}", id.0);
        }
        true
    }

    /// Clear the selection and end any gesture in progress.
    pub fn deselect(&mut self) {
        self.gesture = None;
        self.selected = None;
    }

    /// Add a centered square cover and select it.
    ///
    /// No-op (returns `None`) while busy, without an image, or when the
    /// cover cap is reached.
    pub fn add_cover(&mut self) -> Option<CoverId> {
        if self.is_busy() {
            warn!("add_cover ignored: editor busy");
            return None;
        }
        let (width, height) = self.image_size?;
        if self.covers.len() >= self.config.max_covers {
            debug!("add_cover ignored: {} covers already", self.covers.len());
            return None;
        }

        let (width, height) = (width as f64, height as f64);
        let half_size = self.config.new_cover_scale * width.max(height);
        let cover = Cover::square(
            self.config.default_kind,
            Point::new(width / 2.0, height / 2.0),
            half_size,
        );
        let id = self.push_cover(cover);
        self.gesture = None;
        self.selected = Some(id);
        Some(id)
    }

    /// Remove the selected cover. Returns whether a cover was removed.
    pub fn delete_cover(&mut self) -> bool {
        if self.is_busy() {
            warn!("delete_cover ignored: editor busy");
            return false;
        }
        let Some(id) = self.selected() else {
            return false;
        };
        self.covers.retain(|e| e.id != id);
        self.deselect();
        debug!("deleted cover {}", id.0);
        true
    }

    /// Replace the session contents with exchanged data.
    ///
    /// Covers with non-finite or non-positive geometry are dropped.
    pub fn import_data(&mut self, data: SessionData) -> Result<(), EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if !(data.width.is_finite() && data.height.is_finite())
            || data.width < 1.0
            || data.height < 1.0
        {
            return Err(EditorError::InvalidData(format!(
                "image size {}x{}",
                data.width, data.height
            )));
        }

        let total = data.covers.len();
        let covers: Vec<Cover> = data
            .covers
            .iter()
            .filter(|r| r.is_valid())
            .map(CoverRecord::to_cover)
            .collect();
        if covers.len() < total {
            warn!("dropped {} malformed covers on import", total - covers.len());
        }

        self.id = data.id;
        self.image_size = Some((data.width.round() as u32, data.height.round() as u32));
        self.detection = Detection::new(
            data.faces.unwrap_or_default(),
            data.eyes.unwrap_or_default(),
        );
        self.replace_covers(covers);
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Snapshot the session as exchange data.
    pub fn to_data(&self) -> SessionData {
        let (width, height) = self.image_size.unwrap_or((0, 0));
        SessionData {
            id: self.id,
            width: width as f64,
            height: height as f64,
            covers: self.covers.iter().map(|e| CoverRecord::from(&e.cover)).collect(),
            eyes: Some(self.detection.eyes.clone()),
            faces: Some(self.detection.faces.clone()),
        }
    }

    fn deriver(&self) -> CoverDeriver {
        CoverDeriver::new(self.config.default_kind)
    }

    fn push_cover(&mut self, cover: Cover) -> CoverId {
        let id = CoverId(self.next_id);
        self.next_id += 1;
        self.covers.push(CoverEntry { id, cover });
        id
    }

    fn replace_covers(&mut self, covers: Vec<Cover>) {
        self.deselect();
        self.covers.clear();
        for cover in covers {
            self.push_cover(cover);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::CoverKind;

    pub(crate) fn ready_session(width: u32, height: u32) -> Session {
        let mut session = Session::new(EditorConfig::default());
        let ticket = session.begin_load();
        // An empty detection still leaves the session editable
        let _ = session.finish_load(ticket, width, height, Detection::default());
        session.set_display_size(width as f64, height as f64);
        session
    }

    #[test]
    fn test_add_cover_centered_square() {
        let mut session = ready_session(200, 100);
        let id = session.add_cover().unwrap();
        let cover = session.cover(id).unwrap();
        assert_eq!(cover.center(), Point::new(100.0, 50.0));
        assert_eq!(cover.width, 40.0);
        assert_eq!(cover.height, 40.0);
        assert_eq!(cover.rotation(), 0.0);
        assert!(!cover.mirrored());
        assert_eq!(session.selected(), Some(id));
    }

    #[test]
    fn test_add_cover_cap() {
        let mut session = ready_session(100, 100);
        for _ in 0..21 {
            session.add_cover();
        }
        assert_eq!(session.covers().len(), 20);
    }

    #[test]
    fn test_add_cover_without_image() {
        let mut session = Session::default();
        assert_eq!(session.add_cover(), None);
        assert!(session.covers().is_empty());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut session = ready_session(100, 100);
        session.add_cover();
        session.add_cover();
        session.deselect();
        let before = session.covers().to_vec();
        assert!(!session.delete_cover());
        assert_eq!(session.covers(), before.as_slice());
    }

    #[test]
    fn test_delete_selected() {
        let mut session = ready_session(100, 100);
        let first = session.add_cover().unwrap();
        let second = session.add_cover().unwrap();
        assert!(session.delete_cover());
        assert_eq!(session.covers().len(), 1);
        assert_eq!(session.covers()[0].id, first);
        assert_eq!(session.selected(), None);
        assert!(session.cover(second).is_none());
        // Nothing selected any more
        assert!(!session.delete_cover());
    }

    #[test]
    fn test_stale_selection_resolves_to_none() {
        let mut session = ready_session(100, 100);
        let id = session.add_cover().unwrap();
        session.covers.clear();
        assert_eq!(session.selected(), None);
        assert!(!session.select(id));
    }

    #[test]
    fn test_select_switches_selection() {
        let mut session = ready_session(100, 100);
        let a = session.add_cover().unwrap();
        let b = session.add_cover().unwrap();
        assert_eq!(session.selected(), Some(b));
        assert!(session.select(a));
        assert_eq!(session.selected(), Some(a));
        session.deselect();
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_import_and_export_data() {
        let json = r#"{
            "id": 9, "width": 320, "height": 240,
            "covers": [
                {"type": "koishi", "transform": "rotate(1rad) scaleX(-1)",
                 "left": 1, "top": 2, "width": 30, "height": 30},
                {"type": "doremi", "transform": "none",
                 "left": 0, "top": 0, "width": 0, "height": 10}
            ],
            "faces": [{"x": 1, "y": 2, "width": 30, "height": 30}]
        }"#;
        let data: SessionData = serde_json::from_str(json).unwrap();
        let session = Session::from_data(data, EditorConfig::default()).unwrap();

        assert_eq!(session.id(), 9);
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.image_size(), Some((320, 240)));
        // Zero-width cover dropped
        assert_eq!(session.covers().len(), 1);
        let cover = &session.covers()[0].cover;
        assert_eq!(cover.kind, CoverKind::Koishi);
        assert_eq!(cover.rotation(), 1.0);
        assert!(cover.mirrored());
        assert_eq!(session.detection().faces.len(), 1);

        let out = session.to_data();
        assert_eq!(out.covers.len(), 1);
        assert_eq!(out.covers[0].transform, "rotate(1rad) scaleX(-1)");
        assert_eq!(out.covers[0].rotate, Some(1.0));
        assert_eq!(out.covers[0].flip, Some(true));
    }

    #[test]
    fn test_import_rejects_bad_size() {
        let data = SessionData {
            width: 0.0,
            height: 10.0,
            ..SessionData::default()
        };
        assert!(matches!(
            Session::from_data(data, EditorConfig::default()),
            Err(EditorError::InvalidData(_))
        ));
    }

    #[test]
    fn test_mapping_requires_display_size() {
        let mut session = ready_session(100, 100);
        session.set_display_size(0.0, 0.0);
        assert!(session.mapping().is_none());
        session.set_display_size(50.0, 50.0);
        assert_eq!(session.mapping().unwrap().scale(), Some((0.5, 0.5)));
    }
}
