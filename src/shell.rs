//! Msh - Shell Module
//!
//! The Shell owns the prompt loop and the dispatch of parsed commands to
//! builtins or external processes, tracks the last foreground exit
//! status, and manages the background job table.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{self, ExitStatus};

use failure::ResultExt;
use log::{debug, info};

use crate::builtins;
use crate::errors::{ErrorKind, Result};
use crate::execute_command::spawn_process;
use crate::expansion;
use crate::jobs::JobTable;
use crate::parse::Command;
use crate::signals;
use crate::util::MshExitStatusExt;

const SYNTAX_ERROR_EXIT_STATUS: i32 = 2;

/// Msh Shell
pub struct Shell {
    job_table: JobTable,
    /// Exit status of the last foreground command executed. Defined as
    /// a normal exit with code 0 before any command has run.
    last_exit_status: ExitStatus,
}

impl Shell {
    /// Constructs a new Shell to manage running jobs and signal-driven
    /// mode switching.
    pub fn new(config: ShellConfig) -> Result<Shell> {
        if config.install_signal_handlers {
            signals::install()?;
        }

        info!("msh started up");
        Ok(Shell {
            job_table: JobTable::new(),
            last_exit_status: ExitStatus::from_success(),
        })
    }

    pub(crate) fn last_exit_status(&self) -> ExitStatus {
        self.last_exit_status
    }

    /// Writes the prompt and reads one line of input.
    /// Returns `None` when end of file is reached.
    pub fn prompt(&mut self) -> Result<Option<String>> {
        print!(": ");
        io::stdout().flush().context(ErrorKind::Io)?;

        let mut line = String::new();
        let bytes_read = io::stdin().read_line(&mut line).context(ErrorKind::Io)?;
        if bytes_read == 0 {
            return Ok(None);
        }

        Ok(Some(line))
    }

    /// Runs a single command string: pid-marker expansion, parsing, and
    /// dispatch to a builtin or an external process.
    ///
    /// Recoverable failures (syntax errors, redirection failures, a
    /// missing program image, a failed `cd`) are reported here and leave
    /// the shell running; an `Err` return means the shell cannot
    /// meaningfully continue.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let line = expansion::expand(input);
        let command = match Command::parse(&line, signals::foreground_only()) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                if let ErrorKind::Syntax(ref line) = *e.kind() {
                    eprintln!("msh: syntax error near: {}", line);
                    self.last_exit_status = ExitStatus::from_status(SYNTAX_ERROR_EXIT_STATUS);
                    return Ok(());
                }

                return Err(e);
            }
        };
        debug!("parsed command: {:?}", command);

        if builtins::is_builtin(&command.name) {
            let result = builtins::run(self, &command.name, &command.args);
            if let Err(e) = result {
                eprintln!("msh: {}", e);
            }
            Ok(())
        } else {
            self.execute_external(&command)
        }
    }

    /// Runs commands from a file, one per line.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        use std::io::Read;
        let mut f = File::open(path).context(ErrorKind::Io)?;
        let mut buffer = String::new();
        f.read_to_string(&mut buffer).context(ErrorKind::Io)?;

        for line in buffer.split('\n') {
            self.execute_command_string(line)?
        }

        Ok(())
    }

    /// Runs commands from stdin until EOF is received or the `exit`
    /// builtin fires.
    pub fn execute_from_stdin(&mut self) {
        loop {
            let input = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            if let Err(e) = self.execute_command_string(input.trim_end()) {
                // process creation failed outright; nothing sane is left
                eprintln!("msh: {}", e);
                self.exit(Some(ExitStatus::from_failure()));
            }
        }
    }

    fn execute_external(&mut self, command: &Command) -> Result<()> {
        let child = match spawn_process(command) {
            Ok(child) => child,
            Err(e) => {
                return match *e.kind() {
                    ErrorKind::CommandNotFound(_)
                    | ErrorKind::RedirectInput(_)
                    | ErrorKind::RedirectOutput(_) => {
                        println!("{}", e);
                        self.last_exit_status = ExitStatus::from_failure();
                        Ok(())
                    }
                    _ => Err(e),
                };
            }
        };

        if command.background {
            println!("background pid is {}", child.id());
            if let Err(e) = self.job_table.insert(child) {
                eprintln!("msh: {}", e);
            }
            // One opportunistic pass over the whole table; this is the
            // only place previously finished background jobs get reaped.
            self.job_table.reap_all();
        } else {
            let mut child = child;
            self.last_exit_status = child.wait().context(ErrorKind::Io)?;
            debug!("foreground command finished: {:?}", self.last_exit_status);
        }

        Ok(())
    }

    /// Exit the shell.
    ///
    /// Valid exit codes are between 0 and 255. Like bash and its
    /// descendents, positive n becomes n % 256 and negative n becomes
    /// (256 + n) % 256.
    ///
    /// Exits with a status of `n`; if `n` is `None`, the exit status is
    /// that of the last foreground command executed.
    pub fn exit(&mut self, n: Option<ExitStatus>) -> ! {
        let status = n.unwrap_or(self.last_exit_status);
        let code = status
            .code()
            .unwrap_or_else(|| 128 + status.signal().unwrap_or_default());
        let code_like_u8 = if code < 0 {
            (256 + code) % 256
        } else {
            code % 256
        };

        info!("msh has shut down");
        process::exit(code_like_u8);
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?}last foreground status: {:?}",
            self.job_table, self.last_exit_status
        )
    }
}

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone, Default)]
pub struct ShellConfig {
    /// Determines if the interactive signal dispositions are installed
    /// (SIGINT ignored, SIGTSTP toggling foreground-only mode).
    install_signal_handlers: bool,
}

impl ShellConfig {
    /// Creates an interactive shell: signal handlers installed.
    pub fn interactive() -> Self {
        Self {
            install_signal_handlers: true,
        }
    }

    /// Creates a noninteractive shell, e.g. for `-c` strings and script
    /// files: default signal dispositions.
    pub fn noninteractive() -> Self {
        Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new(ShellConfig::noninteractive()).unwrap()
    }

    #[test]
    fn last_status_defaults_to_success() {
        let shell = shell();
        assert_eq!(shell.last_exit_status().code(), Some(0));
    }

    #[test]
    fn blank_and_comment_lines_are_noops() {
        let mut shell = shell();
        shell.execute_command_string("").unwrap();
        shell.execute_command_string("   ").unwrap();
        shell.execute_command_string("# ls -al").unwrap();
        assert_eq!(shell.last_exit_status().code(), Some(0));
    }

    #[test]
    fn foreground_status_is_recorded() {
        let mut shell = shell();
        shell.execute_command_string("false").unwrap();
        assert_eq!(shell.last_exit_status().code(), Some(1));
        shell.execute_command_string("true").unwrap();
        assert_eq!(shell.last_exit_status().code(), Some(0));
    }

    #[test]
    fn command_not_found_is_recoverable() {
        let mut shell = shell();
        shell
            .execute_command_string("definitely-not-a-command")
            .unwrap();
        assert_eq!(shell.last_exit_status().code(), Some(1));
    }

    #[test]
    fn trailing_redirection_is_recoverable() {
        let mut shell = shell();
        shell.execute_command_string("cat <").unwrap();
        assert_eq!(
            shell.last_exit_status().code(),
            Some(SYNTAX_ERROR_EXIT_STATUS)
        );
    }

    #[test]
    fn background_spawn_does_not_touch_last_status() {
        // built directly rather than parsed, so the test does not depend
        // on the process-wide foreground-only flag
        let command = Command {
            name: String::from("sleep"),
            args: vec![String::from("1")],
            input: Some(String::from(crate::parse::NULL_DEVICE)),
            output: Some(String::from(crate::parse::NULL_DEVICE)),
            background: true,
        };

        let mut shell = shell();
        shell.execute_command_string("false").unwrap();
        shell.execute_external(&command).unwrap();
        assert_eq!(shell.last_exit_status().code(), Some(1));
        assert!(shell.job_table.has_jobs());
    }
}
