//! External command execution.
//!
//! Redirections are resolved to open files up front; child-side signal
//! dispositions are configured in a `pre_exec` hook between fork and
//! exec. Every child ignores SIGTSTP so a stop keystroke never suspends
//! it; only foreground children get default SIGINT handling back, so an
//! interrupt can terminate them but never a background child.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{self, Child, Stdio};

use failure::Fail;
use nix::sys::signal::{self, SigHandler, Signal};

use crate::errors::{Error, ErrorKind, Result};
use crate::parse::Command;

#[derive(Debug)]
enum Input {
    Inherit,
    File(File),
}

#[derive(Debug)]
enum Output {
    Inherit,
    File(File),
}

impl Input {
    fn new(redirect: Option<&str>) -> Result<Self> {
        match redirect {
            Some(path) => File::open(path)
                .map(Input::File)
                .map_err(|_| Error::redirect_input(path)),
            None => Ok(Input::Inherit),
        }
    }
}

impl Output {
    fn new(redirect: Option<&str>) -> Result<Self> {
        match redirect {
            Some(path) => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .map(Output::File)
                .map_err(|_| Error::redirect_output(path)),
            None => Ok(Output::Inherit),
        }
    }
}

impl From<Input> for Stdio {
    fn from(input: Input) -> Self {
        match input {
            Input::Inherit => Self::inherit(),
            Input::File(file) => file.into(),
        }
    }
}

impl From<Output> for Stdio {
    fn from(output: Output) -> Self {
        match output {
            Output::Inherit => Self::inherit(),
            Output::File(file) => file.into(),
        }
    }
}

/// Spawns a child process for `command`, with redirections applied and
/// child-side signal dispositions configured.
///
/// A missing program image is reported as `ErrorKind::CommandNotFound`
/// and a failed redirection open as `ErrorKind::RedirectInput`/
/// `ErrorKind::RedirectOutput`; all three leave the shell running. Any
/// other spawn failure means the OS could not create a process at all
/// and is fatal to the caller.
pub fn spawn_process(command: &Command) -> Result<Child> {
    let stdin = Input::new(command.input.as_deref())?;
    let stdout = Output::new(command.output.as_deref())?;

    let mut child = process::Command::new(&command.name);
    child.args(&command.args);
    child.stdin(stdin);
    child.stdout(stdout);

    let background = command.background;
    unsafe {
        child.pre_exec(move || {
            // Between fork and exec: only async-signal-safe calls.
            signal::signal(Signal::SIGTSTP, SigHandler::SigIgn).map_err(nix_to_io)?;
            if !background {
                signal::signal(Signal::SIGINT, SigHandler::SigDfl).map_err(nix_to_io)?;
            }
            Ok(())
        });
    }

    log::debug!("spawning '{}' (background: {})", command.name, background);
    match child.spawn() {
        Ok(child) => Ok(child),
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
            Err(Error::command_not_found(&command.name))
        }
        Err(e) => Err(e.context(ErrorKind::Io).into()),
    }
}

fn nix_to_io(errno: nix::errno::Errno) -> io::Error {
    io::Error::from_raw_os_error(errno as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parse::Command as ParsedCommand;

    fn command(name: &str, args: &[&str]) -> ParsedCommand {
        ParsedCommand {
            name: String::from(name),
            args: args.iter().map(|s| String::from(*s)).collect(),
            input: None,
            output: None,
            background: false,
        }
    }

    #[test]
    fn spawn_and_wait_succeeds() {
        let mut child = spawn_process(&command("true", &[])).unwrap();
        let status = child.wait().unwrap();
        assert!(status.success());
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let err = spawn_process(&command("definitely-not-a-command", &[])).unwrap_err();
        assert_eq!(
            *err.kind(),
            ErrorKind::CommandNotFound(String::from("definitely-not-a-command"))
        );
        assert_eq!(
            err.to_string(),
            "definitely-not-a-command: no such file or directory"
        );
    }

    #[test]
    fn missing_input_file_is_reported() {
        let mut cmd = command("cat", &[]);
        cmd.input = Some(String::from("no-such-input-file"));
        let err = spawn_process(&cmd).unwrap_err();
        assert_eq!(err.to_string(), "cannot open no-such-input-file for input");
    }

    #[test]
    fn unwritable_output_file_is_reported() {
        let mut cmd = command("echo", &["hi"]);
        cmd.output = Some(String::from("/no-such-dir/out.txt"));
        let err = spawn_process(&cmd).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot open /no-such-dir/out.txt for output"
        );
    }
}
