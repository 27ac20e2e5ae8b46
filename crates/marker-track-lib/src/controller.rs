//! Marker animation state machine
//!
//! The controller has two states. **Idle**: no animation, [`is_running`] is false.
//! **Animating**: exactly one live [`Animation`]. [`animate_to`] moves Idle to
//! Animating (or, for the very first point, places the marker and stays Idle), and
//! [`on_frame`] moves back to Idle once both timelines have completed.
//!
//! The controller trusts its caller not to start an animation while one is running;
//! the [`Scheduler`](crate::Scheduler) guarantees this.
//!
//! [`is_running`]: AnimationController::is_running
//! [`animate_to`]: AnimationController::animate_to
//! [`on_frame`]: AnimationController::on_frame

use crate::{
    Animation, CameraTarget, GeoPoint, MarkerSink, MarkerState, RotationMode, RotationTarget,
    TrackerConfig, bearing,
};
use std::time::Duration;
use tokio::time::Instant;

/// How a target point was accepted
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Accepted {
    /// First point ever: the marker was placed without animating
    Placed,
    /// An animation toward the point started
    Animating(RotationTarget),
}

/// Owner of the marker state and of the (at most one) running animation
#[derive(Debug)]
pub struct AnimationController {
    marker: Option<MarkerState>,
    animation: Option<Animation>,
    translation_duration: Duration,
    rotation_duration: Duration,
    rotation_mode: RotationMode,
    camera_zoom: f32,
}

impl AnimationController {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            marker: None,
            animation: None,
            translation_duration: config.translation_duration,
            rotation_duration: config.rotation_duration,
            rotation_mode: config.rotation_mode,
            camera_zoom: config.camera_zoom,
        }
    }

    /// Whether an animation is in flight
    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Current marker pose, `None` until the first point has been placed
    pub fn marker_state(&self) -> Option<MarkerState> {
        self.marker
    }

    pub fn current_animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Accept a new target point.
    ///
    /// The first point is placed immediately. Later points start an animation from
    /// the current pose. Either way the camera is asked to follow the target.
    pub fn animate_to<S: MarkerSink + ?Sized>(
        &mut self,
        target: GeoPoint,
        now: Instant,
        sink: &mut S,
    ) -> Accepted {
        debug_assert!(
            !self.is_running(),
            "animate_to called while an animation is running"
        );

        let accepted = match self.marker {
            None => {
                let state = MarkerState {
                    position: target,
                    rotation: 0.0,
                };
                self.marker = Some(state);
                tracing::debug!("Placed initial marker at {target}");
                sink.on_marker_state_changed(state);
                Accepted::Placed
            }
            Some(current) => {
                let rotation = RotationTarget::from_bearing(bearing(current.position, target));
                if rotation == RotationTarget::Hold {
                    tracing::debug!("Target {target} equals current position, keeping rotation");
                }
                let animation = Animation::new(
                    current,
                    target,
                    rotation,
                    now,
                    self.translation_duration,
                    self.rotation_duration,
                    self.rotation_mode,
                );
                tracing::debug!(
                    "Animating {} -> {target}, rotation {:.1} -> {:.1}",
                    current.position,
                    animation.start_rotation(),
                    animation.end_rotation()
                );
                self.animation = Some(animation);
                Accepted::Animating(rotation)
            }
        };

        sink.on_camera_target_changed(CameraTarget {
            position: target,
            zoom: self.camera_zoom,
        });

        accepted
    }

    /// Advance the running animation to `now` and publish the sampled pose.
    ///
    /// Returns whether an animation is still running afterwards. Does nothing when idle.
    pub fn on_frame<S: MarkerSink + ?Sized>(&mut self, now: Instant, sink: &mut S) -> bool {
        profiling::scope!("AnimationController::on_frame");

        let Some(animation) = &self.animation else {
            return false;
        };

        let state = animation.sample(now);
        let finished = animation.is_finished(now);

        self.marker = Some(state);
        sink.on_marker_state_changed(state);

        if finished {
            tracing::debug!(
                "Animation finished at {} (rotation {:.1})",
                state.position,
                state.rotation
            );
            self.animation = None;
        } else {
            tracing::trace!("Frame at {} (rotation {:.1})", state.position, state.rotation);
        }

        !finished
    }
}
