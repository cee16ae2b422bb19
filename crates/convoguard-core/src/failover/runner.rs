//! Drive a model call across profiles with same-profile timeout retries.
//!
//! The controller only advises; this loop owns the waiting. Retry delays are
//! slept with tokio and abandoned as soon as the session's cancellation token
//! fires.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::controller::FailoverDecision;
use super::session::FailoverSession;
use crate::error::FailoverError;

/// Execute `call` with automatic retry and failover.
///
/// Profiles are tried in order. A failure is fed to `session`; a retry
/// decision sleeps and calls the same profile again, a rotate decision moves
/// to the next profile. Returns the first success together with the profile
/// that produced it, or the last error once every profile has been rotated
/// away from.
pub async fn run_with_failover<T, E, F, Fut>(
    profiles: &[String],
    session: &mut FailoverSession,
    cancel: &CancellationToken,
    mut call: F,
) -> Result<(T, String), FailoverError<E>>
where
    E: Display,
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;

    for profile in profiles {
        loop {
            if cancel.is_cancelled() {
                return Err(FailoverError::Cancelled {
                    profile: profile.clone(),
                });
            }

            debug!(profile = %profile, "Attempting model call");

            let err = match call(profile.as_str()).await {
                Ok(value) => {
                    session.on_success(profile);
                    return Ok((value, profile.clone()));
                }
                Err(err) => err,
            };

            let error_text = err.to_string();
            warn!(profile = %profile, error = %error_text, "Model call failed");

            match session.on_error(&error_text, Some(profile.as_str())) {
                FailoverDecision::Retry { delay_ms } => {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            return Err(FailoverError::Cancelled {
                                profile: profile.clone(),
                            });
                        }
                        _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {}
                    }
                }
                FailoverDecision::Rotate => {
                    last_error = Some(err);
                    break;
                }
            }
        }

        info!(profile = %profile, "Rotating away from profile");
    }

    match last_error {
        Some(last_error) => Err(FailoverError::Exhausted {
            attempted: profiles.len(),
            last_error,
        }),
        None => Err(FailoverError::NoProfiles),
    }
}
