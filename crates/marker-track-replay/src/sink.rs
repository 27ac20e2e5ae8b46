//! Renderer stand-in: marker updates as log lines and optional JSON lines

use marker_track_lib::{CameraTarget, MarkerSink, MarkerState};
use serde::Serialize;
use std::io::Write;

/// One line of `--json` output
#[derive(Serialize, Debug)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent {
    Marker(MarkerState),
    Camera(CameraTarget),
}

/// Sink printing marker and camera updates
pub struct LogSink<W: Write> {
    json_out: Option<W>,
    frames: u64,
    camera_moves: u64,
    write_errors: u64,
}

impl LogSink<std::io::Stdout> {
    /// Log only, or log and print JSON lines on stdout
    pub fn stdout(json: bool) -> Self {
        Self::new(json.then(std::io::stdout))
    }
}

impl<W: Write> LogSink<W> {
    pub fn new(json_out: Option<W>) -> Self {
        Self {
            json_out,
            frames: 0,
            camera_moves: 0,
            write_errors: 0,
        }
    }

    /// Number of marker updates received
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn camera_moves(&self) -> u64 {
        self.camera_moves
    }

    pub fn into_writer(self) -> Option<W> {
        self.json_out
    }

    fn emit(&mut self, event: &JsonEvent) {
        let Some(out) = self.json_out.as_mut() else {
            return;
        };
        let result = serde_json::to_writer(&mut *out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if let Err(e) = result {
            // Only report the first failure, a closed pipe would flood the log otherwise
            if self.write_errors == 0 {
                tracing::warn!("Failed to write JSON event: {e}");
            }
            self.write_errors += 1;
        }
    }
}

impl<W: Write> MarkerSink for LogSink<W> {
    fn on_marker_state_changed(&mut self, state: MarkerState) {
        self.frames += 1;
        tracing::trace!(
            "Marker at {} heading {:.1}°",
            state.position,
            state.rotation
        );
        self.emit(&JsonEvent::Marker(state));
    }

    fn on_camera_target_changed(&mut self, target: CameraTarget) {
        self.camera_moves += 1;
        tracing::info!("Camera -> {} (zoom {})", target.position, target.zoom);
        self.emit(&JsonEvent::Camera(target));
    }
}
