//! Outbound side of the pipeline: where marker and camera updates go

use crate::GeoPoint;
use tokio::sync::watch;

/// Marker pose published on every animation frame and on initial placement
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerState {
    pub position: GeoPoint,
    /// Heading in degrees
    pub rotation: f32,
}

/// Camera recenter request emitted whenever a new target is accepted
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraTarget {
    pub position: GeoPoint,
    pub zoom: f32,
}

/// Receiver of marker and camera updates (the renderer).
///
/// Calls are made synchronously from the animation timeline and must be cheap.
/// There is no acknowledgment and no back-pressure.
pub trait MarkerSink {
    fn on_marker_state_changed(&mut self, state: MarkerState);

    fn on_camera_target_changed(&mut self, target: CameraTarget);
}

/// Publishes the latest marker and camera state through `tokio::sync::watch` channels.
///
/// Readers only ever observe the most recent value, which is what a renderer
/// polling once per display frame wants.
#[derive(Debug)]
pub struct WatchSink {
    marker: watch::Sender<Option<MarkerState>>,
    camera: watch::Sender<Option<CameraTarget>>,
}

impl WatchSink {
    pub fn channel() -> (
        Self,
        watch::Receiver<Option<MarkerState>>,
        watch::Receiver<Option<CameraTarget>>,
    ) {
        let (marker, marker_rx) = watch::channel(None);
        let (camera, camera_rx) = watch::channel(None);
        (Self { marker, camera }, marker_rx, camera_rx)
    }
}

impl MarkerSink for WatchSink {
    fn on_marker_state_changed(&mut self, state: MarkerState) {
        // send_replace keeps the value even when no receiver is listening yet
        self.marker.send_replace(Some(state));
    }

    fn on_camera_target_changed(&mut self, target: CameraTarget) {
        self.camera.send_replace(Some(target));
    }
}

/// A single recorded sink call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SinkEvent {
    Marker(MarkerState),
    Camera(CameraTarget),
}

/// Sink that keeps every event in call order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_states(&self) -> impl Iterator<Item = &MarkerState> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Marker(state) => Some(state),
            SinkEvent::Camera(_) => None,
        })
    }

    pub fn camera_targets(&self) -> impl Iterator<Item = &CameraTarget> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Camera(target) => Some(target),
            SinkEvent::Marker(_) => None,
        })
    }

    pub fn last_marker_state(&self) -> Option<MarkerState> {
        self.marker_states().last().copied()
    }
}

impl MarkerSink for RecordingSink {
    fn on_marker_state_changed(&mut self, state: MarkerState) {
        self.events.push(SinkEvent::Marker(state));
    }

    fn on_camera_target_changed(&mut self, target: CameraTarget) {
        self.events.push(SinkEvent::Camera(target));
    }
}
