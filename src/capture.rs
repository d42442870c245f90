// Capture pipeline - camera/file image acquisition and analysis staging
//
// State machine: Idle -> Streaming -> (captured) -> Analyzing -> Staged ->
// committed or discarded. The camera itself is an external collaborator
// behind the CameraSource trait; the bundled sources are an external
// frame-grabber command and a no-device fallback. A user-named file is
// the alternative entry that skips streaming entirely.
//
// Invariant: the camera stream is torn down (zero active tracks) on every
// exit path - capture success, cancellation, and failure alike.

use crate::api::models::{AnalysisResult, NewFood};
use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Device-access and local I/O failures of the capture pipeline
#[derive(Debug)]
pub enum CaptureError {
    /// Camera unavailable: no device configured, permission denied,
    /// grabber command failed
    Device(String),
    /// Local file read failed (upload path)
    Io(String),
    /// Operation not valid in the current pipeline state
    Busy,
}

impl CaptureError {
    /// Message for the toast notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Device(_) => "Could not access camera".to_string(),
            Self::Io(_) => "Could not read image file".to_string(),
            Self::Busy => "A capture is already in progress".to_string(),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(msg) => write!(f, "Camera error: {}", msg),
            Self::Io(msg) => write!(f, "Image read error: {}", msg),
            Self::Busy => write!(f, "Capture already in progress"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Camera abstraction. `start` opens the stream (one track), a frame grab
/// yields encoded image bytes, `stop` releases all tracks.
pub trait CameraSource: Send {
    fn start(&mut self) -> Result<(), CaptureError>;
    fn capture_frame(&mut self) -> Result<Vec<u8>, CaptureError>;
    fn stop(&mut self);
    fn active_tracks(&self) -> usize;
}

/// Fallback when no grabber command is configured: starting the stream
/// reports a device-access error and the pipeline stays Idle.
pub struct NoCamera;

impl CameraSource for NoCamera {
    fn start(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Device("no camera device configured".into()))
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>, CaptureError> {
        Err(CaptureError::Device("no camera device configured".into()))
    }

    fn stop(&mut self) {}

    fn active_tracks(&self) -> usize {
        0
    }
}

/// Camera backed by an external frame-grabber command that writes one
/// encoded image to stdout (e.g. `fswebcam -` or an ffmpeg one-liner).
pub struct CommandCamera {
    command: String,
    tracks: usize,
}

impl CommandCamera {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            tracks: 0,
        }
    }
}

impl CameraSource for CommandCamera {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.command.trim().is_empty() {
            return Err(CaptureError::Device("empty capture command".into()));
        }
        self.tracks = 1;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>, CaptureError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|e| CaptureError::Device(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Device(format!(
                "grabber exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(CaptureError::Device("grabber produced no image".into()));
        }
        Ok(output.stdout)
    }

    fn stop(&mut self) {
        self.tracks = 0;
    }

    fn active_tracks(&self) -> usize {
        self.tracks
    }
}

/// Build the camera source from the configured grabber command
pub fn create_source(capture_command: Option<&str>) -> Box<dyn CameraSource> {
    match capture_command {
        Some(cmd) if !cmd.trim().is_empty() => Box::new(CommandCamera::new(cmd)),
        _ => Box::new(NoCamera),
    }
}

/// Pipeline state. Captured/Uploaded are transient moments inside the
/// transition into Analyzing and never observable between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Streaming,
    Analyzing,
    Staged,
}

/// Owns the camera source, the pipeline state, and the staged analysis.
/// At most one capture/analysis cycle is in flight; staging a new result
/// overwrites the previous one.
pub struct CapturePipeline {
    source: Box<dyn CameraSource>,
    state: CaptureState,
    staged: Option<AnalysisResult>,
}

impl CapturePipeline {
    pub fn new(source: Box<dyn CameraSource>) -> Self {
        Self {
            source,
            state: CaptureState::Idle,
            staged: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn staged(&self) -> Option<&AnalysisResult> {
        self.staged.as_ref()
    }

    pub fn active_tracks(&self) -> usize {
        self.source.active_tracks()
    }

    /// Idle/Staged -> Streaming. A start failure leaves the state where it
    /// was with no tracks open.
    pub fn start_stream(&mut self) -> Result<(), CaptureError> {
        match self.state {
            CaptureState::Streaming | CaptureState::Analyzing => return Err(CaptureError::Busy),
            CaptureState::Idle | CaptureState::Staged => {}
        }
        self.source.start()?;
        self.state = CaptureState::Streaming;
        Ok(())
    }

    /// Streaming -> Analyzing. Grabs one frame and tears the stream down
    /// before analysis begins; a grab failure also releases the stream.
    pub fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        if self.state != CaptureState::Streaming {
            return Err(CaptureError::Busy);
        }
        let frame = self.source.capture_frame();
        self.source.stop();
        match frame {
            Ok(bytes) => {
                self.state = CaptureState::Analyzing;
                Ok(bytes)
            }
            Err(e) => {
                self.state = self.fallback_state();
                Err(e)
            }
        }
    }

    /// Streaming -> Idle/Staged without capturing; stream released
    pub fn cancel_stream(&mut self) {
        self.source.stop();
        if self.state == CaptureState::Streaming {
            self.state = self.fallback_state();
        }
    }

    /// Alternative entry: a user-named file substitutes for a captured
    /// frame and skips streaming.
    pub fn load_upload(&mut self, path: &Path) -> Result<Vec<u8>, CaptureError> {
        match self.state {
            CaptureState::Streaming | CaptureState::Analyzing => return Err(CaptureError::Busy),
            CaptureState::Idle | CaptureState::Staged => {}
        }
        let bytes = fs::read(path).map_err(|e| CaptureError::Io(e.to_string()))?;
        self.state = CaptureState::Analyzing;
        Ok(bytes)
    }

    /// Analyzing -> Staged. A new analysis overwrites a prior staged one.
    pub fn stage(&mut self, analysis: AnalysisResult) {
        self.staged = Some(analysis);
        self.state = CaptureState::Staged;
    }

    /// The analyze call failed; report and fall back to the prior state
    pub fn analysis_failed(&mut self) {
        self.state = self.fallback_state();
    }

    /// Staged -> Committed: convert the staged result into a food payload
    /// with the confirmed quantity. Clears the staged result.
    pub fn commit(&mut self, quantity: f64) -> Option<NewFood> {
        let analysis = self.staged.take()?;
        self.state = CaptureState::Idle;
        Some(NewFood {
            name: analysis.food_name,
            calories: analysis.calories,
            proteins: analysis.proteins,
            carbs: analysis.carbs,
            fats: analysis.fats,
            quantity,
        })
    }

    /// Staged -> Discarded: clear without submitting anything
    pub fn discard(&mut self) {
        self.staged = None;
        if self.state == CaptureState::Staged {
            self.state = CaptureState::Idle;
        }
    }

    fn fallback_state(&self) -> CaptureState {
        if self.staged.is_some() {
            CaptureState::Staged
        } else {
            CaptureState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Camera test double with scripted frames and a track counter
    struct MockCamera {
        tracks: usize,
        frame: Result<Vec<u8>, ()>,
        fail_start: bool,
    }

    impl MockCamera {
        fn ok(frame: Vec<u8>) -> Self {
            Self {
                tracks: 0,
                frame: Ok(frame),
                fail_start: false,
            }
        }

        fn failing_grab() -> Self {
            Self {
                tracks: 0,
                frame: Err(()),
                fail_start: false,
            }
        }
    }

    impl CameraSource for MockCamera {
        fn start(&mut self) -> Result<(), CaptureError> {
            if self.fail_start {
                return Err(CaptureError::Device("permission denied".into()));
            }
            self.tracks = 1;
            Ok(())
        }

        fn capture_frame(&mut self) -> Result<Vec<u8>, CaptureError> {
            self.frame
                .clone()
                .map_err(|_| CaptureError::Device("frame grab failed".into()))
        }

        fn stop(&mut self) {
            self.tracks = 0;
        }

        fn active_tracks(&self) -> usize {
            self.tracks
        }
    }

    fn analysis(name: &str) -> AnalysisResult {
        AnalysisResult {
            food_name: name.to_string(),
            calories: 450.0,
            proteins: 25.0,
            carbs: 40.0,
            fats: 20.0,
        }
    }

    #[test]
    fn start_failure_stays_idle_with_no_tracks() {
        let mut pipeline = CapturePipeline::new(Box::new(MockCamera {
            tracks: 0,
            frame: Ok(vec![]),
            fail_start: true,
        }));
        assert!(pipeline.start_stream().is_err());
        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert_eq!(pipeline.active_tracks(), 0);
    }

    #[test]
    fn capture_releases_stream_before_analysis() {
        let mut pipeline = CapturePipeline::new(Box::new(MockCamera::ok(vec![1, 2, 3])));
        pipeline.start_stream().unwrap();
        assert_eq!(pipeline.state(), CaptureState::Streaming);
        assert_eq!(pipeline.active_tracks(), 1);

        let frame = pipeline.capture().unwrap();
        assert_eq!(frame, vec![1, 2, 3]);
        assert_eq!(pipeline.state(), CaptureState::Analyzing);
        assert_eq!(pipeline.active_tracks(), 0);
    }

    #[test]
    fn failed_grab_releases_stream_and_returns_to_idle() {
        let mut pipeline = CapturePipeline::new(Box::new(MockCamera::failing_grab()));
        pipeline.start_stream().unwrap();
        assert!(pipeline.capture().is_err());
        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert_eq!(pipeline.active_tracks(), 0);
    }

    #[test]
    fn cancel_releases_stream() {
        let mut pipeline = CapturePipeline::new(Box::new(MockCamera::ok(vec![9])));
        pipeline.start_stream().unwrap();
        pipeline.cancel_stream();
        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert_eq!(pipeline.active_tracks(), 0);
    }

    #[test]
    fn staging_a_new_result_overwrites_the_prior_one() {
        let mut pipeline = CapturePipeline::new(Box::new(NoCamera));
        pipeline.stage(analysis("Feijoada"));
        pipeline.stage(analysis("Salada"));
        assert_eq!(pipeline.staged().unwrap().food_name, "Salada");
        assert_eq!(pipeline.state(), CaptureState::Staged);
    }

    #[test]
    fn commit_converts_staged_result_with_quantity_and_clears_it() {
        let mut pipeline = CapturePipeline::new(Box::new(NoCamera));
        pipeline.stage(analysis("Feijoada"));

        let food = pipeline.commit(1.5).unwrap();
        assert_eq!(food.name, "Feijoada");
        assert_eq!(food.quantity, 1.5);
        assert_eq!(food.calories, 450.0);
        assert!(pipeline.staged().is_none());
        assert_eq!(pipeline.state(), CaptureState::Idle);
    }

    #[test]
    fn discard_clears_without_payload() {
        let mut pipeline = CapturePipeline::new(Box::new(NoCamera));
        pipeline.stage(analysis("Feijoada"));
        pipeline.discard();
        assert!(pipeline.staged().is_none());
        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert!(pipeline.commit(1.0).is_none());
    }

    #[test]
    fn only_one_cycle_in_flight() {
        let mut pipeline = CapturePipeline::new(Box::new(MockCamera::ok(vec![1])));
        pipeline.start_stream().unwrap();
        assert!(matches!(pipeline.start_stream(), Err(CaptureError::Busy)));
        let _ = pipeline.capture().unwrap();
        // Analyzing: neither stream nor upload may start
        assert!(matches!(pipeline.start_stream(), Err(CaptureError::Busy)));
        assert!(matches!(
            pipeline.load_upload(Path::new("/nonexistent")),
            Err(CaptureError::Busy)
        ));
    }

    #[test]
    fn no_camera_reports_device_error() {
        let mut pipeline = CapturePipeline::new(create_source(None));
        let err = pipeline.start_stream().unwrap_err();
        assert!(matches!(err, CaptureError::Device(_)));
        assert_eq!(err.user_message(), "Could not access camera");
    }
}
