use std::env;
use std::path::PathBuf;

use crate::builtins::BuiltinCommand;
use crate::errors::{Error, Result};
use crate::shell::Shell;

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = "cd";

    fn run(_shell: &mut Shell, args: &[String]) -> Result<()> {
        let dir = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => env::var("HOME")
                .map(PathBuf::from)
                .map_err(|_| Error::builtin_command("cd: HOME not set"))?,
        };

        env::set_current_dir(&dir)
            .map_err(|e| Error::builtin_command(format!("cd: {}: {}", dir.display(), e)))
    }
}
