//! Msh builtins
//!
//! This module includes the implementations of the commands the shell
//! runs in-process instead of spawning: `cd`, `exit`, and `status`.

use crate::errors::Result;
use crate::shell::Shell;

use self::dirs::Cd;
use self::exit::Exit;
use self::status::Status;

mod dirs;
mod exit;
mod status;

/// Represents an msh builtin command such as cd or status.
pub trait BuiltinCommand {
    /// The name the user types to invoke the command.
    const NAME: &'static str;
    /// Runs the command with the given arguments in the `shell` environment.
    fn run(shell: &mut Shell, args: &[String]) -> Result<()>;
}

/// Returns `true` if `name` is a builtin, matched by exact string
/// equality.
pub fn is_builtin(name: &str) -> bool {
    [Cd::NAME, Exit::NAME, Status::NAME].contains(&name)
}

/// precondition: `name` is a builtin.
pub fn run(shell: &mut Shell, name: &str, args: &[String]) -> Result<()> {
    assert!(is_builtin(name));
    match name {
        Cd::NAME => Cd::run(shell, args),
        Exit::NAME => Exit::run(shell, args),
        Status::NAME => Status::run(shell, args),
        _ => unreachable!(),
    }
}
