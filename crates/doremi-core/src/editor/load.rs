//! Image loads.
//!
//! Decoding and detection are asynchronous on the host, so a load is split
//! in two halves bracketed by a [`LoadTicket`]. Each `begin_load` bumps the
//! session generation. A ticket is honored once, while its load is in
//! flight; a ticket from an older generation, or one already finished or
//! failed, is stale and its result is dropped without touching the session.

use log::{info, warn};

use crate::decode::DecodedImage;
use crate::detect::{Detection, Detector};
use crate::error::EditorError;

use super::{Phase, Session};

/// Handle for one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Rebuild a ticket from a generation handed across a host boundary.
    pub fn from_generation(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Result of finishing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The session is editable with this many derived covers.
    Ready { covers: usize },
    /// The load was superseded or already settled; nothing changed.
    Stale,
}

impl Session {
    /// Start loading a new image.
    ///
    /// Clears the covers, selection and detections of the previous image and
    /// closes the busy gate until the returned ticket is finished or failed.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.covers.clear();
        self.deselect();
        self.detection = Detection::default();
        self.image_size = None;
        self.phase = Phase::Loading {
            generation: self.generation,
        };
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the load in flight.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.phase
            == Phase::Loading {
                generation: ticket.generation,
            }
    }

    /// Complete a load with the working-resolution size and detector output.
    ///
    /// The session becomes `Ready` even when no cover could be derived; that
    /// case still reports [`EditorError::FaceNotFound`] so the host can tell
    /// the user, who may then add covers by hand.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        width: u32,
        height: u32,
        detection: Detection,
    ) -> Result<LoadOutcome, EditorError> {
        if !self.is_current(ticket) {
            warn!(
                "discarding detection of load {} (current {}, {:?})",
                ticket.generation, self.generation, self.phase
            );
            return Ok(LoadOutcome::Stale);
        }
        if width == 0 || height == 0 {
            self.phase = Phase::Idle;
            return Err(EditorError::ImageUnreadable(format!(
                "empty image {}x{}",
                width, height
            )));
        }

        let covers = self.deriver().derive(
            &detection.faces,
            &detection.eyes,
            width as f64,
            height as f64,
        );
        let count = covers.len();

        self.image_size = Some((width, height));
        self.detection = detection;
        self.replace_covers(covers);
        self.phase = Phase::Ready;

        info!(
            "load {} ready: {}x{}, {} faces, {} eyes, {} covers",
            ticket.generation,
            width,
            height,
            self.detection.faces.len(),
            self.detection.eyes.len(),
            count
        );

        if count == 0 {
            return Err(EditorError::FaceNotFound);
        }
        Ok(LoadOutcome::Ready { covers: count })
    }

    /// Abort a load. Returns the error for surfacing, or `None` when the
    /// ticket is stale.
    pub fn fail_load(&mut self, ticket: LoadTicket, error: EditorError) -> Option<EditorError> {
        if !self.is_current(ticket) {
            warn!("ignoring failure of stale load {}: {}", ticket.generation, error);
            return None;
        }
        warn!("load {} failed: {}", ticket.generation, error);
        self.phase = Phase::Idle;
        Some(error)
    }

    /// Run a whole load synchronously against a detector.
    pub fn load_with<D: Detector + ?Sized>(
        &mut self,
        detector: &D,
        image: &DecodedImage,
    ) -> Result<LoadOutcome, EditorError> {
        let ticket = self.begin_load();
        match detector.detect(&image.pixels, image.width, image.height) {
            Ok(detection) => self.finish_load(ticket, image.width, image.height, detection),
            Err(e) => Err(self
                .fail_load(ticket, e.into())
                .unwrap_or(EditorError::Busy)),
        }
    }
}
