//! Runtime setup and teardown for the `todo` binary.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

/// Upper bound on how long teardown waits for blocking requests that a
/// cancel abandoned mid-flight.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub fn build() -> std::io::Result<Runtime> {
    Builder::new_multi_thread().enable_all().build()
}

/// Drives `future` to completion on `rt`, then shuts the runtime down
/// without waiting past [`SHUTDOWN_GRACE`] on blocking threads still stuck
/// in I/O.
pub fn run_to_completion<F: Future>(rt: Runtime, future: F) -> F::Output {
    let output = rt.block_on(future);
    rt.shutdown_timeout(SHUTDOWN_GRACE);
    output
}
