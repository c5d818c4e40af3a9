use std::process::ExitStatus;

use crate::builtins::BuiltinCommand;
use crate::errors::Result;
use crate::shell::Shell;
use crate::util::MshExitStatusExt;

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = "exit";

    fn run(shell: &mut Shell, _args: &[String]) -> Result<()> {
        shell.exit(Some(ExitStatus::from_success()));
    }
}
