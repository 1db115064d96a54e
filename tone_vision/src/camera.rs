// THEORY:
// The `camera` module models the capture lifecycle as an explicit context object
// instead of ambient UI state. A `CameraSession` owns everything that used to be
// scattered across a screen component: which lens is active, whether the torch
// or the simulated front flash is on, and the screen brightness to restore
// afterwards.
//
// Key architectural principles:
// 1.  **Backend trait**: The session never talks to hardware. A `CameraBackend`
//     implementation (a mobile plugin bridge, a desktop webcam, a test double)
//     does the actual work; the session only sequences calls and tracks state.
// 2.  **Scoped lifecycle**: `open` checks permission and starts the preview,
//     captures happen in between, `close` stops the preview and restores the
//     screen brightness. The session is consumed by `close`, so a session
//     value always stands for a started preview.
// 3.  **Uniform failures**: Every backend failure is reported as a `CameraError`
//     carrying the operation name and a readable message, and logged.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::decode::decode_data_url_async;
use crate::error::{CameraError, Result, VisionError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// JPEG quality requested from the backend for every capture.
pub const CAPTURE_QUALITY: u8 = 100;
/// How long the screen stays at full brightness before a front-flash capture.
pub const DEFAULT_FLASH_SETTLE: Duration = Duration::from_millis(100);
/// Screen brightness used as the simulated front flash.
const FRONT_FLASH_BRIGHTNESS: f32 = 1.0;

pub type BackendError = Box<dyn std::error::Error + Send + Sync>;
pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraPosition {
    #[default]
    Rear,
    Front,
}

impl CameraPosition {
    pub fn flipped(self) -> Self {
        match self {
            CameraPosition::Rear => CameraPosition::Front,
            CameraPosition::Front => CameraPosition::Rear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

/// The device-facing half of a camera session.
pub trait CameraBackend {
    fn check_permission(&mut self) -> impl Future<Output = BackendResult<PermissionState>> + Send;
    fn request_permission(&mut self) -> impl Future<Output = BackendResult<PermissionState>> + Send;
    fn start(&mut self, position: CameraPosition) -> impl Future<Output = BackendResult<()>> + Send;
    fn stop(&mut self) -> impl Future<Output = BackendResult<()>> + Send;
    /// Captures a still and returns it as a `data:image/...;base64,` URL.
    fn capture(&mut self, quality: u8) -> impl Future<Output = BackendResult<String>> + Send;
    fn flip(&mut self) -> impl Future<Output = BackendResult<()>> + Send;
    fn set_torch(&mut self, on: bool) -> impl Future<Output = BackendResult<()>> + Send;
    /// Current screen brightness in 0.0..=1.0.
    fn brightness(&mut self) -> impl Future<Output = BackendResult<f32>> + Send;
    fn set_brightness(&mut self, level: f32) -> impl Future<Output = BackendResult<()>> + Send;
}

fn camera_failure(operation: &'static str, cause: impl Display) -> VisionError {
    let failure = CameraError::new(operation, cause.to_string());
    error!(operation, message = %failure.message, "camera operation failed");
    VisionError::Camera(failure)
}

/// A running camera preview and the state that goes with it.
pub struct CameraSession<B: CameraBackend> {
    backend: B,
    position: CameraPosition,
    torch_on: bool,
    simulated_flash_on: bool,
    saved_brightness: Option<f32>,
    flash_settle: Duration,
}

impl<B: CameraBackend> CameraSession<B> {
    /// Checks (and if needed requests) camera permission, remembers the screen
    /// brightness, then starts the preview on `position`.
    pub async fn open(backend: B, position: CameraPosition) -> Result<Self> {
        let mut session = Self {
            backend,
            position,
            torch_on: false,
            simulated_flash_on: false,
            saved_brightness: None,
            flash_settle: DEFAULT_FLASH_SETTLE,
        };

        session.ensure_permission().await?;

        session.saved_brightness = match session.backend.brightness().await {
            Ok(level) => Some(level),
            Err(e) => {
                warn!(error = %e, "could not read screen brightness");
                None
            }
        };

        session
            .backend
            .start(position)
            .await
            .map_err(|e| camera_failure("start_camera", e))?;
        info!(?position, "camera started");
        Ok(session)
    }

    pub fn with_flash_settle(mut self, flash_settle: Duration) -> Self {
        self.flash_settle = flash_settle;
        self
    }

    async fn ensure_permission(&mut self) -> Result<()> {
        let current = self
            .backend
            .check_permission()
            .await
            .map_err(|e| camera_failure("check_permissions", e))?;
        if current == PermissionState::Granted {
            return Ok(());
        }

        let requested = self
            .backend
            .request_permission()
            .await
            .map_err(|e| camera_failure("check_permissions", e))?;
        match requested {
            PermissionState::Granted => Ok(()),
            _ => Err(camera_failure("check_permissions", "Camera permission denied")),
        }
    }

    pub fn position(&self) -> CameraPosition {
        self.position
    }

    /// Whether the flash for the active lens is armed: the torch on the rear
    /// camera, the simulated screen flash on the front one.
    pub fn is_flash_on(&self) -> bool {
        match self.position {
            CameraPosition::Rear => self.torch_on,
            CameraPosition::Front => self.simulated_flash_on,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Captures a still as a data URL. On the front lens with the simulated flash
    /// armed, the screen is pushed to full brightness for the shot and restored
    /// afterwards. Brightness failures are logged and the still is taken anyway.
    pub async fn capture(&mut self) -> Result<String> {
        if self.position == CameraPosition::Front && self.simulated_flash_on {
            let previous = match self.backend.brightness().await {
                Ok(level) => Some(level),
                Err(e) => {
                    warn!(error = %e, "could not read screen brightness before front flash");
                    None
                }
            };
            match self.backend.set_brightness(FRONT_FLASH_BRIGHTNESS).await {
                Ok(()) => tokio::time::sleep(self.flash_settle).await,
                Err(e) => warn!(error = %e, "could not raise screen brightness for front flash"),
            }

            let captured = self.backend.capture(CAPTURE_QUALITY).await;
            if let Some(level) = previous {
                if let Err(e) = self.backend.set_brightness(level).await {
                    warn!(error = %e, "could not restore screen brightness after front flash");
                }
            }
            return captured.map_err(|e| camera_failure("capture_photo", e));
        }

        self.backend
            .capture(CAPTURE_QUALITY)
            .await
            .map_err(|e| camera_failure("capture_photo", e))
    }

    /// Captures a still and decodes it, ready for analysis.
    pub async fn capture_buffer(&mut self) -> Result<PixelBuffer> {
        let url = self.capture().await?;
        decode_data_url_async(url).await
    }

    /// Switches lenses. Any flash is turned off first.
    pub async fn swap(&mut self) -> Result<CameraPosition> {
        self.turn_off_flash().await?;
        self.backend
            .flip()
            .await
            .map_err(|e| camera_failure("swap_camera", e))?;
        self.position = self.position.flipped();
        info!(position = ?self.position, "camera swapped");
        Ok(self.position)
    }

    /// Toggles the flash for the active lens and returns the new state.
    pub async fn toggle_flash(&mut self) -> Result<bool> {
        if self.position == CameraPosition::Front {
            self.simulated_flash_on = !self.simulated_flash_on;
            return Ok(self.simulated_flash_on);
        }

        if self.torch_on {
            self.turn_off_flash().await?;
        } else {
            self.backend
                .set_torch(true)
                .await
                .map_err(|e| camera_failure("toggle_flash", e))?;
            self.torch_on = true;
        }
        Ok(self.torch_on)
    }

    async fn turn_off_flash(&mut self) -> Result<()> {
        if self.position == CameraPosition::Front {
            self.simulated_flash_on = false;
            self.torch_on = false;
            return Ok(());
        }
        self.backend
            .set_torch(false)
            .await
            .map_err(|e| camera_failure("turn_off_flash", e))?;
        self.torch_on = false;
        Ok(())
    }

    /// Stops the preview and restores the screen brightness seen at `open`.
    /// The restore is attempted even when stopping fails; the stop failure is
    /// still returned. Returns the backend so it can be reused.
    pub async fn close(mut self) -> Result<B> {
        let stopped = self.backend.stop().await;
        if let Some(level) = self.saved_brightness {
            if let Err(e) = self.backend.set_brightness(level).await {
                warn!(error = %e, "could not restore screen brightness");
            }
        }
        stopped.map_err(|e| camera_failure("stop_camera", e))?;
        info!("camera stopped");
        Ok(self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    struct MockCamera {
        permission: PermissionState,
        grant_on_request: bool,
        brightness: f32,
        brightness_at_capture: Option<f32>,
        torch: bool,
        fail_capture: bool,
        fail_stop: bool,
        fail_brightness: bool,
        brightness_writes: Arc<Mutex<Vec<f32>>>,
        calls: Vec<&'static str>,
    }

    impl MockCamera {
        fn granted() -> Self {
            Self {
                permission: PermissionState::Granted,
                grant_on_request: true,
                brightness: 0.3,
                brightness_at_capture: None,
                torch: false,
                fail_capture: false,
                fail_stop: false,
                fail_brightness: false,
                brightness_writes: Arc::default(),
                calls: Vec::new(),
            }
        }
    }

    fn png_data_url() -> String {
        let image = RgbaImage::from_pixel(4, 4, Rgba([220, 190, 160, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    impl CameraBackend for MockCamera {
        async fn check_permission(&mut self) -> BackendResult<PermissionState> {
            self.calls.push("check_permission");
            Ok(self.permission)
        }

        async fn request_permission(&mut self) -> BackendResult<PermissionState> {
            self.calls.push("request_permission");
            if self.grant_on_request {
                self.permission = PermissionState::Granted;
            }
            Ok(self.permission)
        }

        async fn start(&mut self, _position: CameraPosition) -> BackendResult<()> {
            self.calls.push("start");
            Ok(())
        }

        async fn stop(&mut self) -> BackendResult<()> {
            self.calls.push("stop");
            if self.fail_stop {
                return Err("stop failed".into());
            }
            Ok(())
        }

        async fn capture(&mut self, quality: u8) -> BackendResult<String> {
            assert_eq!(quality, CAPTURE_QUALITY);
            self.calls.push("capture");
            self.brightness_at_capture = Some(self.brightness);
            if self.fail_capture {
                return Err("sensor busy".into());
            }
            Ok(png_data_url())
        }

        async fn flip(&mut self) -> BackendResult<()> {
            self.calls.push("flip");
            Ok(())
        }

        async fn set_torch(&mut self, on: bool) -> BackendResult<()> {
            self.calls.push(if on { "torch_on" } else { "torch_off" });
            self.torch = on;
            Ok(())
        }

        async fn brightness(&mut self) -> BackendResult<f32> {
            if self.fail_brightness {
                return Err("no brightness api".into());
            }
            Ok(self.brightness)
        }

        async fn set_brightness(&mut self, level: f32) -> BackendResult<()> {
            if self.fail_brightness {
                return Err("no brightness api".into());
            }
            self.calls.push("set_brightness");
            self.brightness_writes.lock().unwrap().push(level);
            self.brightness = level;
            Ok(())
        }
    }

    #[tokio::test]
    async fn open_requests_missing_permission_then_starts() {
        let mut camera = MockCamera::granted();
        camera.permission = PermissionState::Prompt;

        let session = CameraSession::open(camera, CameraPosition::Rear).await.unwrap();
        assert_eq!(
            session.backend().calls,
            vec!["check_permission", "request_permission", "start"]
        );
    }

    #[tokio::test]
    async fn denied_permission_fails_in_check_permissions() {
        let mut camera = MockCamera::granted();
        camera.permission = PermissionState::Denied;
        camera.grant_on_request = false;

        let error = CameraSession::open(camera, CameraPosition::Rear)
            .await
            .err()
            .expect("permission must be refused");
        match error {
            VisionError::Camera(failure) => {
                assert_eq!(failure.operation, "check_permissions");
                assert_eq!(failure.message, "Camera permission denied");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn capture_returns_a_decodable_still() {
        let mut session = CameraSession::open(MockCamera::granted(), CameraPosition::Rear)
            .await
            .unwrap();
        let buffer = session.capture_buffer().await.unwrap();
        assert_eq!((buffer.width(), buffer.height()), (4, 4));
    }

    #[tokio::test]
    async fn capture_failure_names_the_operation() {
        let mut camera = MockCamera::granted();
        camera.fail_capture = true;
        let mut session = CameraSession::open(camera, CameraPosition::Rear).await.unwrap();

        match session.capture().await {
            Err(VisionError::Camera(failure)) => {
                assert_eq!(failure.operation, "capture_photo");
                assert_eq!(failure.message, "sensor busy");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rear_flash_drives_the_torch() {
        let mut session = CameraSession::open(MockCamera::granted(), CameraPosition::Rear)
            .await
            .unwrap();

        assert!(session.toggle_flash().await.unwrap());
        assert!(session.backend().torch);
        assert!(!session.toggle_flash().await.unwrap());
        assert!(!session.backend().torch);
    }

    #[tokio::test]
    async fn front_flash_brightens_the_screen_for_the_shot() {
        let mut session = CameraSession::open(MockCamera::granted(), CameraPosition::Front)
            .await
            .unwrap()
            .with_flash_settle(Duration::ZERO);

        assert!(session.toggle_flash().await.unwrap());
        assert!(session.is_flash_on());
        assert!(!session.backend().torch);

        session.capture().await.unwrap();
        assert_eq!(session.backend().brightness_at_capture, Some(1.0));
        assert_eq!(session.backend().brightness, 0.3);
    }

    #[tokio::test]
    async fn swap_turns_the_flash_off_and_flips() {
        let mut session = CameraSession::open(MockCamera::granted(), CameraPosition::Rear)
            .await
            .unwrap();
        session.toggle_flash().await.unwrap();

        assert_eq!(session.swap().await.unwrap(), CameraPosition::Front);
        assert!(!session.is_flash_on());
        assert!(!session.backend().torch);
        assert!(session.backend().calls.ends_with(&["torch_on", "torch_off", "flip"]));
    }

    #[tokio::test]
    async fn close_stops_and_restores_brightness() {
        let mut session = CameraSession::open(MockCamera::granted(), CameraPosition::Front)
            .await
            .unwrap()
            .with_flash_settle(Duration::ZERO);
        session.toggle_flash().await.unwrap();
        session.capture().await.unwrap();

        let camera = session.close().await.unwrap();
        assert!(camera.calls.ends_with(&["stop", "set_brightness"]));
        assert_eq!(camera.brightness, 0.3);
    }

    #[tokio::test]
    async fn failed_stop_still_restores_brightness() {
        let mut camera = MockCamera::granted();
        camera.fail_stop = true;
        let writes = Arc::clone(&camera.brightness_writes);
        let mut session = CameraSession::open(camera, CameraPosition::Rear).await.unwrap();
        session.backend.brightness = 0.9;

        match session.close().await {
            Err(VisionError::Camera(failure)) => {
                assert_eq!(failure.operation, "stop_camera");
                assert_eq!(failure.message, "stop failed");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert_eq!(*writes.lock().unwrap(), vec![0.3]);
    }

    #[tokio::test]
    async fn front_flash_capture_survives_missing_brightness_control() {
        let mut camera = MockCamera::granted();
        camera.fail_brightness = true;
        let mut session = CameraSession::open(camera, CameraPosition::Front)
            .await
            .unwrap()
            .with_flash_settle(Duration::ZERO);
        assert!(session.toggle_flash().await.unwrap());

        let url = session.capture().await.unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(session.backend().calls.ends_with(&["capture"]));
        assert_eq!(session.backend().brightness_at_capture, Some(0.3));
    }
}
