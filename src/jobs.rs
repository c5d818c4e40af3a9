//! Background job tracking.
//!
//! The shell keeps a small bounded table of background children. There
//! is no idle-time reaper: finished jobs are only discovered on the next
//! reap pass, which the shell runs each time a new background command is
//! spawned.

use std::fmt;
use std::process::Child;

use crate::errors::{Error, Result};

/// Fixed number of background jobs the shell tracks at once.
pub const JOB_TABLE_CAPACITY: usize = 10;

/// A bounded table of live background children.
pub struct JobTable {
    jobs: Vec<Child>,
    capacity: usize,
}

impl JobTable {
    /// Creates an empty table with the default capacity.
    pub fn new() -> JobTable {
        JobTable::with_capacity(JOB_TABLE_CAPACITY)
    }

    /// Creates an empty table bounded at `capacity` entries.
    pub fn with_capacity(capacity: usize) -> JobTable {
        JobTable {
            jobs: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns `true` if the table has live entries.
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Returns `true` if no further job can be inserted.
    pub fn is_full(&self) -> bool {
        self.jobs.len() >= self.capacity
    }

    /// Adds a background child to the table.
    ///
    /// Insertion past capacity is rejected with an error; the child keeps
    /// running but is no longer tracked or reaped by the shell.
    pub fn insert(&mut self, child: Child) -> Result<()> {
        if self.is_full() {
            return Err(Error::job_table_full(child.id()));
        }

        self.jobs.push(child);
        Ok(())
    }

    /// Performs one non-blocking pass over every live entry, reporting
    /// and removing children that have finished. Children that are still
    /// running are left untouched.
    pub fn reap_all(&mut self) {
        self.jobs.retain_mut(|job| {
            match job.try_wait() {
                Ok(Some(status)) => {
                    match status.code() {
                        Some(code) => {
                            println!("background pid {} is done: exit value {}", job.id(), code)
                        }
                        None => {
                            // no exit code means the child was signaled
                            use std::os::unix::process::ExitStatusExt;
                            println!(
                                "terminated by signal {}",
                                status.signal().unwrap_or_default()
                            );
                        }
                    }
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    log::error!("try_wait failed for pid {}: {}", job.id(), e);
                    true
                }
            }
        });
    }
}

impl Default for JobTable {
    fn default() -> JobTable {
        JobTable::new()
    }
}

impl fmt::Debug for JobTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}/{} jobs", self.jobs.len(), self.capacity)?;
        for job in &self.jobs {
            writeln!(f, "pid: {}", job.id())?;
        }

        Ok(())
    }
}
