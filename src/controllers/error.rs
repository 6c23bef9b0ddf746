use std::io;

/// Failure to obtain a camera stream from the host.
///
/// Every variant is retryable: the user can fix permissions or plug a device
/// in and request again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaAccessError {
    /// The host refused access to the camera.
    #[error("camera access denied: {0}")]
    Denied(String),

    /// No video capture device is present.
    #[error("no camera device found")]
    NoDevice,

    /// Any other host failure (device busy, driver error, ...).
    #[error("camera unavailable: {0}")]
    Host(String),
}

impl MediaAccessError {
    /// Classify an io error raised while opening a capture device.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => MediaAccessError::NoDevice,
            io::ErrorKind::PermissionDenied => MediaAccessError::Denied(err.to_string()),
            _ => MediaAccessError::Host(err.to_string()),
        }
    }

    /// Short heading for the recording panel.
    pub fn title(&self) -> &str {
        match self {
            MediaAccessError::Denied(_) => "Camera Permission Denied",
            MediaAccessError::NoDevice => "No Camera Found",
            MediaAccessError::Host(_) => "Camera Unavailable",
        }
    }

    pub fn suggested_action(&self) -> &str {
        match self {
            MediaAccessError::Denied(_) => {
                "Allow camera access (e.g. join the video group) and press Record again"
            }
            MediaAccessError::NoDevice => "Connect a camera and press Record again",
            MediaAccessError::Host(_) => "Close other apps using the camera and press Record again",
        }
    }
}

impl From<io::Error> for MediaAccessError {
    fn from(err: io::Error) -> Self {
        Self::from_io(&err)
    }
}
