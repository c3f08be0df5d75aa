//! One-child subprocess supervision.
//!
//! The selector's preview and the randomiser both rotate through child
//! effect processes: at most one child is alive at a time, and replacing
//! it is SIGTERM, a bounded wait, then SIGKILL, then a reap.

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// How long a child gets to exit after SIGTERM before escalation
const TERM_GRACE: Duration = Duration::from_millis(1500);

pub struct Supervisor {
    child: Option<Child>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self { child: None }
    }

    /// Spawn a child, replacing (and reaping) any current one
    pub fn launch(&mut self, program: &str, args: &[String], env: &[(&str, &str)]) -> Result<()> {
        self.shutdown();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        for (k, v) in env {
            cmd.env(k, v);
        }

        let child = cmd
            .spawn()
            .map_err(|e| Error::Subprocess(format!("{}: {}", program, e)))?;
        self.child = Some(child);
        Ok(())
    }

    /// True while the current child is still running
    pub fn is_alive(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Terminate the current child: SIGTERM, bounded wait, SIGKILL, reap.
    pub fn shutdown(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        if matches!(child.try_wait(), Ok(Some(_))) {
            return; // already exited and reaped
        }

        #[cfg(unix)]
        unsafe {
            libc::kill(child.id() as libc::pid_t, libc::SIGTERM);
        }

        let deadline = Instant::now() + TERM_GRACE;
        while Instant::now() < deadline {
            if matches!(child.try_wait(), Ok(Some(_))) {
                return;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        let _ = child.kill();
        let _ = child.wait();
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_child_is_not_alive() {
        let mut sup = Supervisor::new();
        assert!(!sup.is_alive());
        sup.shutdown(); // no-op
    }

    #[test]
    fn test_launch_and_reap() {
        let mut sup = Supervisor::new();
        sup.launch("sleep", &["5".to_string()], &[]).unwrap();
        assert!(sup.is_alive());
        sup.shutdown();
        assert!(!sup.is_alive());
    }

    #[test]
    fn test_replace_reaps_previous() {
        let mut sup = Supervisor::new();
        sup.launch("sleep", &["5".to_string()], &[]).unwrap();
        sup.launch("sleep", &["5".to_string()], &[]).unwrap();
        assert!(sup.is_alive());
        sup.shutdown();
    }
}
