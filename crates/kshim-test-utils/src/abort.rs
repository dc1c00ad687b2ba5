//! Checking that a code path aborts the process instead of unwinding.
//!
//! An abort cannot be observed from inside the test that triggers it, so
//! [`assert_aborts`] re-runs the current test binary filtered down to one
//! test. The child runs the body; the parent asserts the child was killed
//! by `SIGABRT` rather than exiting through a panic or returning normally.

use std::env;
use std::process::{Command, ExitStatus};

/// Environment variable naming the test the child process should run the
/// aborting body for.
pub const ABORT_CASE_VAR: &str = "KSHIM_ABORT_CASE";

/// `SIGABRT` on every Unix the workspace targets.
#[cfg(unix)]
const SIGABRT: i32 = 6;

/// Assert that `body` aborts the process.
///
/// `test_name` is the calling test's path inside its test binary, e.g.
/// `"spinlock::tests::release_of_unheld_lock_aborts"`. In the child process
/// `body` runs and, if it returns, the child exits successfully so the
/// parent assertion fails. In the parent `body` never runs.
pub fn assert_aborts(test_name: &str, body: impl FnOnce()) {
    if env::var(ABORT_CASE_VAR).as_deref() == Ok(test_name) {
        body();
        std::process::exit(0);
    }

    let exe = env::current_exe().expect("current test binary path");
    let status = Command::new(exe)
        .args([test_name, "--exact", "--test-threads=1", "--nocapture"])
        .env(ABORT_CASE_VAR, test_name)
        .status()
        .expect("spawn child test process");

    assert!(
        !status.success(),
        "{test_name}: child exited normally instead of aborting"
    );
    assert_killed_by_abort(test_name, status);
}

#[cfg(unix)]
fn assert_killed_by_abort(test_name: &str, status: ExitStatus) {
    use std::os::unix::process::ExitStatusExt;
    assert_eq!(
        status.signal(),
        Some(SIGABRT),
        "{test_name}: child did not die on SIGABRT (status {status})"
    );
}

#[cfg(not(unix))]
fn assert_killed_by_abort(test_name: &str, status: ExitStatus) {
    // A panic inside the child surfaces as the harness failure code.
    assert_ne!(
        status.code(),
        Some(101),
        "{test_name}: child unwound instead of aborting"
    );
}
