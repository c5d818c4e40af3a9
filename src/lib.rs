//! Msh - a miniature interactive command shell.
//!
//! The shell reads one command per line, expands the `$$` marker to its
//! own process id, and dispatches to a builtin (`exit`, `cd`, `status`)
//! or an external program with optional `<`/`>` redirection and `&`
//! backgrounding. Background children are tracked in a bounded
//! [`JobTable`](jobs::JobTable) and reaped on subsequent background
//! spawns. SIGTSTP toggles foreground-only mode; SIGINT never kills the
//! shell itself.

macro_rules! log_if_err {
    ($result:expr, $($arg:tt)*) => {{
        if let Err(ref e) = $result {
            log::error!("{}: {}", format!($($arg)*), e);
        }
    }};
}

mod builtins;
pub mod errors;
mod execute_command;
mod expansion;
pub mod jobs;
pub mod parse;
pub mod signals;
mod shell;
mod util;

pub use crate::shell::{Shell, ShellConfig};
pub use crate::util::MshExitStatusExt;
