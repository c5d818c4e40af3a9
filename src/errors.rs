//! Error module. See the [failure](https://crates.io/crates/failure) crate for details.

use std::fmt;
use std::result;

use failure::{Backtrace, Context, Fail};

/// Convenient alias for a `Result` with this crate's `Error`.
pub type Result<T> = result::Result<T, Error>;

/// The error type for shell operations, wrapping an [`ErrorKind`].
#[derive(Debug)]
pub struct Error {
    ctx: Context<ErrorKind>,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.ctx.get_context()
    }

    pub(crate) fn syntax<T: AsRef<str>>(line: T) -> Error {
        Error::from(ErrorKind::Syntax(line.as_ref().to_string()))
    }

    pub(crate) fn builtin_command<T: AsRef<str>>(message: T) -> Error {
        Error::from(ErrorKind::BuiltinCommand(message.as_ref().to_string()))
    }

    pub(crate) fn command_not_found<T: AsRef<str>>(command: T) -> Error {
        Error::from(ErrorKind::CommandNotFound(command.as_ref().to_string()))
    }

    pub(crate) fn redirect_input<T: AsRef<str>>(path: T) -> Error {
        Error::from(ErrorKind::RedirectInput(path.as_ref().to_string()))
    }

    pub(crate) fn redirect_output<T: AsRef<str>>(path: T) -> Error {
        Error::from(ErrorKind::RedirectOutput(path.as_ref().to_string()))
    }

    pub(crate) fn job_table_full(pid: u32) -> Error {
        Error::from(ErrorKind::JobTableFull(pid))
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.ctx.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.ctx.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ctx.fmt(f)
    }
}

/// The kinds of errors that can occur while running the shell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A malformed command line, e.g. a trailing redirection token.
    Syntax(String),
    /// A builtin command failed; carries the message reported to the user.
    BuiltinCommand(String),
    /// The program image could not be found.
    CommandNotFound(String),
    /// An input redirection file could not be opened.
    RedirectInput(String),
    /// An output redirection file could not be opened.
    RedirectOutput(String),
    /// The background job table is at capacity; the pid is untracked.
    JobTableFull(u32),
    Io,
    Nix,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::Syntax(ref line) => write!(f, "syntax error: '{}'", line),
            ErrorKind::BuiltinCommand(ref message) => write!(f, "{}", message),
            ErrorKind::CommandNotFound(ref name) => {
                write!(f, "{}: no such file or directory", name)
            }
            ErrorKind::RedirectInput(ref path) => write!(f, "cannot open {} for input", path),
            ErrorKind::RedirectOutput(ref path) => write!(f, "cannot open {} for output", path),
            ErrorKind::JobTableFull(pid) => {
                write!(f, "job table is full: background pid {} is not tracked", pid)
            }
            ErrorKind::Io => write!(f, "I/O error occurred"),
            ErrorKind::Nix => write!(f, "Nix error occurred"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(Context::new(kind))
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(ctx: Context<ErrorKind>) -> Error {
        Error { ctx }
    }
}
