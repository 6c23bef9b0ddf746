use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::controllers::{MediaAccessError, MediaCapture, StreamHandle};

const DEV_DIR: &str = "/dev";

/// Requested capture size; the driver may pick the closest it supports.
const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;
const BUFFER_COUNT: u32 = 4;
/// Frames waiting for the UI. Older frames are dropped when it falls behind.
const FRAME_QUEUE: usize = 2;

/// One decoded camera frame, packed 8-bit RGB.
#[derive(Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

type Ready = oneshot::Sender<Result<(u32, u32), MediaAccessError>>;

/// A running capture on a Video4Linux node.
///
/// Frames arrive on [`CameraStream::frames`]. Releasing (or dropping) the
/// stream stops the capture thread, which turns streaming off and closes the
/// device.
#[derive(Debug)]
pub struct CameraStream {
    device: PathBuf,
    width: u32,
    height: u32,
    frames: async_channel::Receiver<Frame>,
    running: Arc<AtomicBool>,
}

impl CameraStream {
    pub fn device(&self) -> &Path {
        &self.device
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_live(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn frames(&self) -> async_channel::Receiver<Frame> {
        self.frames.clone()
    }
}

impl StreamHandle for CameraStream {
    fn release(&mut self) {
        if self.running.swap(false, Ordering::AcqRel) {
            self.frames.close();
            log::info!("Released camera {}", self.device.display());
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.release();
    }
}

/// Camera capture backed by `/dev/video*` device nodes.
///
/// Opening the node is the permission check: udev grants access to members
/// of the `video` group (or to the seat owner), everyone else gets EACCES.
#[derive(Debug, Clone)]
pub struct V4l2Camera {
    device: Option<PathBuf>,
    dev_dir: PathBuf,
}

impl V4l2Camera {
    /// Use `device` if given, otherwise the first `/dev/video*` node.
    pub fn new(device: Option<PathBuf>) -> Self {
        Self {
            device,
            dev_dir: PathBuf::from(DEV_DIR),
        }
    }

    #[cfg(test)]
    fn with_dev_dir(dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            device: None,
            dev_dir: dev_dir.into(),
        }
    }

    async fn find_device(&self) -> Result<PathBuf, MediaAccessError> {
        if let Some(ref device) = self.device {
            return Ok(device.clone());
        }

        let mut entries = tokio::fs::read_dir(&self.dev_dir).await?;
        let mut nodes = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(index) = name.strip_prefix("video") {
                if let Ok(index) = index.parse::<u32>() {
                    nodes.push((index, entry.path()));
                }
            }
        }
        nodes.sort();
        nodes
            .into_iter()
            .next()
            .map(|(_, path)| path)
            .ok_or(MediaAccessError::NoDevice)
    }
}

#[async_trait]
impl MediaCapture for V4l2Camera {
    type Stream = CameraStream;

    async fn request_camera(&self) -> Result<CameraStream, MediaAccessError> {
        let device = self.find_device().await?;
        log::info!("Opening camera {}", device.display());

        let (ready_tx, ready_rx) = oneshot::channel();
        let (frame_tx, frame_rx) = async_channel::bounded(FRAME_QUEUE);
        let running = Arc::new(AtomicBool::new(true));

        let worker_device = device.clone();
        let worker_running = running.clone();
        std::thread::Builder::new()
            .name("camera-capture".into())
            .spawn(move || capture_loop(&worker_device, ready_tx, frame_tx, &worker_running))
            .map_err(|e| MediaAccessError::Host(format!("failed to start capture thread: {e}")))?;

        let (width, height) = ready_rx.await.unwrap_or_else(|_| {
            Err(MediaAccessError::Host("capture thread exited".into()))
        })?;
        log::info!("Camera {} streaming {width}x{height}", device.display());

        Ok(CameraStream {
            device,
            width,
            height,
            frames: frame_rx,
            running,
        })
    }
}

#[cfg(target_os = "linux")]
fn capture_loop(
    device: &Path,
    ready: Ready,
    frames: async_channel::Sender<Frame>,
    running: &AtomicBool,
) {
    use v4l::buffer::Type;
    use v4l::io::mmap::Stream;
    use v4l::io::traits::CaptureStream;

    let (dev, format) = match open_capture(device) {
        Ok(opened) => opened,
        Err(e) => {
            log::warn!("Camera {} rejected: {e}", device.display());
            let _ = ready.send(Err(e));
            return;
        }
    };

    let mut stream = match Stream::with_buffers(&dev, Type::VideoCapture, BUFFER_COUNT) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready.send(Err(MediaAccessError::from_io(&e)));
            return;
        }
    };

    if ready.send(Ok((format.width, format.height))).is_err() {
        log::debug!("Camera request abandoned before streaming");
        return;
    }

    while running.load(Ordering::Acquire) {
        let buf = match stream.next() {
            Ok((buf, _meta)) => buf,
            Err(e) => {
                log::error!("Camera stream error: {e}");
                break;
            }
        };
        let Some(rgb) = yuyv_to_rgb(buf, format.width, format.height, format.stride) else {
            log::debug!("Skipping short frame ({} bytes)", buf.len());
            continue;
        };
        let frame = Frame {
            width: format.width,
            height: format.height,
            rgb,
        };
        match frames.try_send(frame) {
            Ok(()) | Err(async_channel::TrySendError::Full(_)) => {}
            Err(async_channel::TrySendError::Closed(_)) => break,
        }
    }

    running.store(false, Ordering::Release);
    frames.close();
    log::info!("Capture on {} stopped", device.display());
}

#[cfg(not(target_os = "linux"))]
fn capture_loop(
    _device: &Path,
    ready: Ready,
    _frames: async_channel::Sender<Frame>,
    _running: &AtomicBool,
) {
    let _ = ready.send(Err(MediaAccessError::Host(
        "camera capture requires Video4Linux".into(),
    )));
}

/// Open `path` and negotiate a YUYV capture format.
#[cfg(target_os = "linux")]
fn open_capture(path: &Path) -> Result<(v4l::Device, v4l::Format), MediaAccessError> {
    use v4l::video::Capture;
    use v4l::FourCC;

    let dev = v4l::Device::with_path(path).map_err(|e| MediaAccessError::from_io(&e))?;
    let caps = dev.query_caps().map_err(|e| {
        MediaAccessError::Host(format!("{} is not a V4L2 device: {e}", path.display()))
    })?;
    ensure_video_capture(path, caps.capabilities)?;

    let wanted = v4l::Format::new(FRAME_WIDTH, FRAME_HEIGHT, FourCC::new(b"YUYV"));
    let format = dev
        .set_format(&wanted)
        .map_err(|e| MediaAccessError::Host(format!("{}: {e}", path.display())))?;
    if format.fourcc != wanted.fourcc {
        return Err(MediaAccessError::Host(format!(
            "{} does not offer YUYV frames",
            path.display()
        )));
    }
    Ok((dev, format))
}

/// Codec, metadata and output nodes also live under `/dev/video*`.
#[cfg(target_os = "linux")]
fn ensure_video_capture(
    path: &Path,
    flags: v4l::capability::Flags,
) -> Result<(), MediaAccessError> {
    use v4l::capability::Flags;

    if flags.contains(Flags::VIDEO_CAPTURE | Flags::STREAMING) {
        Ok(())
    } else {
        Err(MediaAccessError::Host(format!(
            "{} cannot stream video",
            path.display()
        )))
    }
}

/// Convert packed YUYV 4:2:2 (BT.601 limited range) to RGB.
///
/// `stride` is the byte length of one source row; 0 means tightly packed.
/// Returns `None` if `src` is shorter than a full frame.
pub fn yuyv_to_rgb(src: &[u8], width: u32, height: u32, stride: u32) -> Option<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let row_bytes = w * 2;
    let stride = if stride == 0 { row_bytes } else { stride as usize };
    if w % 2 != 0 || stride < row_bytes || src.len() < stride * h {
        return None;
    }

    let mut rgb = Vec::with_capacity(w * h * 3);
    for row in src.chunks(stride).take(h) {
        for px in row[..row_bytes].chunks_exact(4) {
            let (y0, u, y1, v) = (px[0], px[1], px[2], px[3]);
            rgb.extend_from_slice(&yuv_pixel(y0, u, v));
            rgb.extend_from_slice(&yuv_pixel(y1, u, v));
        }
    }
    Some(rgb)
}

fn yuv_pixel(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = 298 * (i32::from(y) - 16);
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;
    let clamp = |x: i32| ((x + 128) >> 8).clamp(0, 255) as u8;
    [
        clamp(c + 409 * e),
        clamp(c - 100 * d - 208 * e),
        clamp(c + 516 * d),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_device_nodes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("null"), b"").unwrap();
        let camera = V4l2Camera::with_dev_dir(dir.path());
        let err = camera.request_camera().await.unwrap_err();
        assert_eq!(err, MediaAccessError::NoDevice);
    }

    #[tokio::test]
    async fn test_picks_lowest_video_node() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["video2", "video0", "videocodec", "audio0"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let camera = V4l2Camera::with_dev_dir(dir.path());
        let device = camera.find_device().await.unwrap();
        assert_eq!(device, dir.path().join("video0"));
    }

    #[tokio::test]
    async fn test_plain_file_is_not_a_camera() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("video0"), b"not a camera").unwrap();
        let camera = V4l2Camera::with_dev_dir(dir.path());
        let err = camera.request_camera().await.unwrap_err();
        assert!(matches!(err, MediaAccessError::Host(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_configured_device_missing() {
        let dir = tempfile::tempdir().unwrap();
        let camera = V4l2Camera::new(Some(dir.path().join("video7")));
        let err = camera.request_camera().await.unwrap_err();
        assert_eq!(err, MediaAccessError::NoDevice);
    }

    #[tokio::test]
    async fn test_missing_dev_dir_is_no_device() {
        let dir = tempfile::tempdir().unwrap();
        let camera = V4l2Camera::with_dev_dir(dir.path().join("absent"));
        let err = camera.request_camera().await.unwrap_err();
        assert_eq!(err, MediaAccessError::NoDevice);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_capture_capability_required() {
        use v4l::capability::Flags;

        let path = Path::new("/dev/video0");
        assert!(ensure_video_capture(path, Flags::VIDEO_CAPTURE | Flags::STREAMING).is_ok());
        assert!(ensure_video_capture(path, Flags::VIDEO_CAPTURE).is_err());
        assert!(ensure_video_capture(path, Flags::VIDEO_OUTPUT | Flags::STREAMING).is_err());
    }

    #[test]
    fn test_release_stops_stream() {
        let (tx, rx) = async_channel::bounded(FRAME_QUEUE);
        let mut stream = CameraStream {
            device: PathBuf::from("/dev/video0"),
            width: 2,
            height: 1,
            frames: rx,
            running: Arc::new(AtomicBool::new(true)),
        };
        let frames = stream.frames();
        assert!(stream.is_live());

        stream.release();
        assert!(!stream.is_live());
        assert!(frames.is_closed());
        assert!(tx
            .try_send(Frame {
                width: 2,
                height: 1,
                rgb: vec![0; 6],
            })
            .is_err());
        stream.release();
    }

    #[test]
    fn test_yuyv_black_and_white() {
        // Two pixels per 4-byte group: black then white.
        let rgb = yuyv_to_rgb(&[16, 128, 235, 128], 2, 1, 0).unwrap();
        assert_eq!(rgb, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_yuyv_honours_stride() {
        // Rows padded to 8 bytes; padding must be skipped.
        let src = [16, 128, 16, 128, 9, 9, 9, 9, 235, 128, 235, 128, 9, 9, 9, 9];
        let rgb = yuyv_to_rgb(&src, 2, 2, 8).unwrap();
        assert_eq!(rgb.len(), 2 * 2 * 3);
        assert_eq!(&rgb[..6], &[0; 6]);
        assert_eq!(&rgb[6..], &[255; 6]);
    }

    #[test]
    fn test_yuyv_short_buffer() {
        assert!(yuyv_to_rgb(&[16, 128, 235], 2, 1, 0).is_none());
        assert!(yuyv_to_rgb(&[16, 128, 235, 128], 2, 2, 0).is_none());
    }
}
