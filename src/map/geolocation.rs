//! Position lookup.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::workouts::Coordinates;

/// Source of the user's current position.
pub trait GeolocationProvider: Send + Sync {
    /// Resolve the current position once.
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// Look up the current position, giving up after `timeout`.
pub async fn acquire_position<P: GeolocationProvider>(
    provider: &P,
    timeout: Duration,
) -> Result<Coordinates, GeolocationError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::TimedOut(timeout)),
    }
}

/// Provider reporting a fixed, preconfigured position.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition {
    position: Option<Coordinates>,
}

impl FixedPosition {
    /// `None` behaves like a device without location services.
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unavailable)
    }
}

/// Position lookup errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("Location services are unavailable")]
    Unavailable,

    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position lookup failed: {0}")]
    PositionUnavailable(String),

    #[error("Position lookup timed out after {0:?}")]
    TimedOut(Duration),
}
