use async_trait::async_trait;

use super::error::MediaAccessError;

/// A live camera stream owned by the recording controller while active.
pub trait StreamHandle {
    /// Stop every underlying media track. Must be safe to call twice.
    fn release(&mut self);
}

/// Host capability that asks for a video-capable camera stream.
///
/// The call may stay pending for as long as the host permission prompt is
/// open.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    type Stream: StreamHandle + Send;

    async fn request_camera(&self) -> Result<Self::Stream, MediaAccessError>;
}

/// Identifies one request cycle so a completion can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Read-only view of the recording phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Requesting,
    Active,
    Failed,
}

enum Phase<H> {
    Idle,
    Requesting(RequestTicket),
    Active(H),
    Failed(MediaAccessError),
}

/// Camera recording state machine.
///
/// ```text
/// Idle   --request--> Requesting --granted--> Active --stop--> Idle
/// Failed --request--> Requesting --denied---> Failed
/// ```
///
/// A stream handle is held only while `Active` and is released on every
/// path out of it, including drop.
pub struct RecordingController<H: StreamHandle> {
    phase: Phase<H>,
    next_ticket: u64,
}

impl<H: StreamHandle> RecordingController<H> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> RecordingState {
        match self.phase {
            Phase::Idle => RecordingState::Idle,
            Phase::Requesting(_) => RecordingState::Requesting,
            Phase::Active(_) => RecordingState::Active,
            Phase::Failed(_) => RecordingState::Failed,
        }
    }

    /// Error descriptor, present only in `Failed`.
    pub fn error(&self) -> Option<&MediaAccessError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Attached stream, present only in `Active`.
    pub fn stream(&self) -> Option<&H> {
        match &self.phase {
            Phase::Active(stream) => Some(stream),
            _ => None,
        }
    }

    /// Start a permission request cycle.
    ///
    /// Returns the ticket the eventual completion must carry, or `None` when
    /// a request is already pending or a stream is already active.
    pub fn request(&mut self) -> Option<RequestTicket> {
        match self.phase {
            Phase::Idle | Phase::Failed(_) => {
                self.next_ticket += 1;
                let ticket = RequestTicket(self.next_ticket);
                self.phase = Phase::Requesting(ticket);
                log::info!("Camera request {} started", ticket.0);
                Some(ticket)
            }
            Phase::Requesting(_) | Phase::Active(_) => {
                log::debug!("Ignoring camera request while {:?}", self.state());
                None
            }
        }
    }

    /// Apply the host's answer to a request cycle.
    ///
    /// Only the currently pending ticket is accepted; anything else is
    /// ignored and a stream it carries is released on the spot. Returns
    /// whether the state changed.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<H, MediaAccessError>,
    ) -> bool {
        let pending = matches!(self.phase, Phase::Requesting(current) if current == ticket);
        if !pending {
            log::debug!("Dropping stale camera resolution {}", ticket.0);
            if let Ok(mut stream) = result {
                stream.release();
            }
            return false;
        }

        match result {
            Ok(stream) => {
                log::info!("Camera request {} granted", ticket.0);
                self.phase = Phase::Active(stream);
            }
            Err(err) => {
                log::warn!("Camera request {} failed: {err}", ticket.0);
                self.phase = Phase::Failed(err);
            }
        }
        true
    }

    /// Release the active stream and return to `Idle`. No-op elsewhere.
    pub fn stop(&mut self) -> bool {
        if !matches!(self.phase, Phase::Active(_)) {
            return false;
        }
        if let Phase::Active(mut stream) = std::mem::replace(&mut self.phase, Phase::Idle) {
            stream.release();
        }
        log::info!("Camera stopped");
        true
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Requesting(_))
    }

    /// Label for the record button.
    pub fn button_label(&self) -> &'static str {
        match self.state() {
            RecordingState::Idle | RecordingState::Failed => "Record",
            RecordingState::Requesting => "Requesting\u{2026}",
            RecordingState::Active => "Recording\u{2026}",
        }
    }
}

impl<H: StreamHandle> Default for RecordingController<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: StreamHandle> Drop for RecordingController<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
