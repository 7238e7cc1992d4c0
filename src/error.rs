use std::panic::Location;

use nix::errno::Errno;
use thiserror::Error;

/// A parent-side failure that makes further dispatching pointless.
///
/// Carries the failing operation and where it was attempted. Everything here
/// terminates the shell: a dispatcher that cannot fork or wait has nothing
/// left to offer. Child-side failures never surface through this type; they
/// are reported on the child's own stderr and exit status.
#[derive(Debug, Error)]
#[error("{operation} failed at {location}: {source}")]
pub struct DispatchError {
    operation: &'static str,
    location: &'static Location<'static>,
    #[source]
    source: Errno,
}

impl DispatchError {
    #[track_caller]
    pub(crate) fn new(operation: &'static str, source: Errno) -> Self {
        DispatchError {
            operation,
            location: Location::caller(),
            source,
        }
    }
}
