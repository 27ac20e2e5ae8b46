//! GPX track replayed as a location source

use crate::{ReplayError, Result};
use marker_track_lib::{GeoPoint, PositionFeed};
use std::path::Path;
use std::time::Duration;

/// Ordered track points loaded from a GPX file
#[derive(Debug, Clone)]
pub struct GpxSource {
    points: Vec<GeoPoint>,
}

impl GpxSource {
    /// Read all track points of a GPX file, in file order
    pub fn open(path: &Path) -> Result<Self> {
        profiling::scope!("GpxSource::open");
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let gpx = gpx::read(reader)?;
        Self::from_gpx(&gpx)
    }

    pub fn from_gpx(gpx: &gpx::Gpx) -> Result<Self> {
        let points: Vec<GeoPoint> = gpx
            .tracks
            .iter()
            .flat_map(|track| track.segments.iter())
            .flat_map(|segment| segment.points.iter())
            .map(|waypoint| GeoPoint::from(waypoint.point()))
            .collect();

        if points.is_empty() {
            return Err(ReplayError::EmptyTrack);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Send the points into `feed` in bursts of `burst` fixes, sleeping `interval`
    /// between bursts. Returns the number of fixes sent.
    pub async fn replay(self, feed: PositionFeed, burst: usize, interval: Duration) -> Result<usize> {
        let burst = burst.max(1);
        let mut sent = 0;

        for (i, chunk) in self.points.chunks(burst).enumerate() {
            if i > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            for point in chunk {
                feed.send(*point)?;
                sent += 1;
            }
            tracing::debug!("Sent {sent}/{} fixes", self.points.len());
        }

        Ok(sent)
    }
}
