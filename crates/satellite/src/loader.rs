//! Satellite frame requests and decoding.
//!
//! Fetching is left to the host. Every request carries a [`Ticket`]; only
//! the completion holding the newest ticket may draw, so a slow fetch for
//! an old query time can never overwrite a newer frame.

use image::RgbaImage;
use tracing::{debug, trace};

use crate::error::{SatelliteError, SatelliteResult};
use crate::slot::SatelliteSlot;

/// Generation number of a satellite request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A frame the host should fetch and hand back with its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteRequest {
    pub ticket: Ticket,
    pub slot: SatelliteSlot,
}

impl SatelliteRequest {
    pub fn url(&self) -> &str {
        &self.slot.url
    }
}

/// Issues request generations and recognizes stale completions.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    pending: Option<Ticket>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding any pending one.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        if let Some(old) = self.pending.replace(ticket) {
            trace!(old = old.0, new = ticket.0, "Superseded pending satellite request");
        }
        ticket
    }

    /// Drop the pending request; its completion will be ignored.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending == Some(ticket)
    }

    /// Accept a completion. Returns `false` for stale or cancelled tickets.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            debug!(
                ticket = ticket.0,
                pending = ?self.pending.map(|t| t.0),
                "Discarding stale satellite completion"
            );
            false
        }
    }
}

/// Decode fetched frame bytes (PNG, JPEG or GIF) to RGBA.
pub fn decode_frame(bytes: &[u8]) -> SatelliteResult<RgbaImage> {
    if bytes.is_empty() {
        return Err(SatelliteError::EmptyFrame);
    }

    let img = image::load_from_memory(bytes)?.to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(SatelliteError::EmptyFrame);
    }

    trace!(width = img.width(), height = img.height(), "Decoded satellite frame");
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();
        assert!(b > a);
        assert_eq!(tracker.pending(), Some(b));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_frame(&[]), Err(SatelliteError::EmptyFrame)));
        assert!(matches!(
            decode_frame(b"not an image"),
            Err(SatelliteError::Decode(_))
        ));
    }
}
