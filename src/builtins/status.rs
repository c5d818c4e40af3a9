use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use crate::builtins::BuiltinCommand;
use crate::errors::Result;
use crate::shell::Shell;

pub struct Status;

impl BuiltinCommand for Status {
    const NAME: &'static str = "status";

    fn run(shell: &mut Shell, _args: &[String]) -> Result<()> {
        println!("{}", status_message(shell.last_exit_status()));
        Ok(())
    }
}

fn status_message(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => format!("terminated by signal {}", status.signal().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::util::MshExitStatusExt;

    #[test]
    fn normal_exit_message() {
        assert_eq!(status_message(ExitStatus::from_success()), "exit status 0");
        assert_eq!(status_message(ExitStatus::from_status(1)), "exit status 1");
        assert_eq!(status_message(ExitStatus::from_status(85)), "exit status 85");
    }

    #[test]
    fn signal_termination_message() {
        // wait(2) encoding: low byte is the terminating signal
        let status = ExitStatus::from_raw(2);
        assert_eq!(status_message(status), "terminated by signal 2");
    }
}
