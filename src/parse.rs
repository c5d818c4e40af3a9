//! Msh command parser.
//!
//! The grammar is a single command per line:
//! `name [arg ...] [< infile] [> outfile] [&]`, whitespace-delimited,
//! with no quoting or globbing. Comment lines start with `#`.

use crate::errors::{Error, Result};

/// Path commands are redirected to and from when backgrounded without
/// explicit redirections.
pub const NULL_DEVICE: &str = "/dev/null";

/// A single parsed command, created fresh per input line.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// The program or builtin to run; the first token of the line.
    pub name: String,
    /// The arguments to the program, in command-line order.
    pub args: Vec<String>,
    /// The input redirection path, if any.
    pub input: Option<String>,
    /// The output redirection path, if any.
    pub output: Option<String>,
    /// Run the command in the background, defaults to false.
    pub background: bool,
}

impl Command {
    /// Parses one input line into a `Command`.
    ///
    /// Returns `Ok(None)` for blank lines and comment lines (first token
    /// starts with `#`). Tokens after the name are classified left to
    /// right: `<` consumes the next token as the input path, `>` consumes
    /// the next token as the output path, `&` requests background
    /// execution, and everything else is an argument. The last `<` or `>`
    /// wins if repeated. A trailing `<` or `>` with no path is a syntax
    /// error.
    ///
    /// When `foreground_only` is set, `&` is parsed but has no effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use msh::parse::Command;
    ///
    /// let command = Command::parse("wc -l < in.txt", false).unwrap().unwrap();
    /// assert_eq!(command.name, "wc");
    /// assert_eq!(command.args, vec!["-l"]);
    /// assert_eq!(command.input.as_deref(), Some("in.txt"));
    /// assert!(command.output.is_none());
    /// assert!(!command.background);
    /// ```
    pub fn parse(input: &str, foreground_only: bool) -> Result<Option<Command>> {
        let argv: Vec<&str> = input.split_whitespace().collect();
        match argv.first() {
            None => return Ok(None),
            Some(first) if first.starts_with('#') => return Ok(None),
            _ => {}
        }

        let mut builder = CommandBuilder::new(argv[0]);
        let mut tokens = argv[1..].iter();
        while let Some(&token) = tokens.next() {
            match token {
                "<" => {
                    let path = tokens.next().ok_or_else(|| Error::syntax(input.trim()))?;
                    builder.input(path);
                }
                ">" => {
                    let path = tokens.next().ok_or_else(|| Error::syntax(input.trim()))?;
                    builder.output(path);
                }
                "&" => {
                    builder.background(!foreground_only);
                }
                arg => {
                    builder.arg(arg);
                }
            }
        }

        Ok(Some(builder.build()))
    }
}

/// Builds `Command`s.
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    name: String,
    args: Vec<String>,
    input: Option<String>,
    output: Option<String>,
    background: bool,
}

impl CommandBuilder {
    /// Initializes a new builder for the given program with no arguments,
    /// no redirections, and foreground execution.
    pub fn new(name: &str) -> CommandBuilder {
        CommandBuilder {
            name: String::from(name),
            args: Vec::new(),
            input: None,
            output: None,
            background: false,
        }
    }

    /// Add an argument to pass to the program.
    pub fn arg(&mut self, arg: &str) -> &mut CommandBuilder {
        self.args.push(String::from(arg));
        self
    }

    /// Add input redirection from the specified filename.
    pub fn input(&mut self, filename: &str) -> &mut CommandBuilder {
        self.input = Some(String::from(filename));
        self
    }

    /// Add output redirection to the specified filename.
    pub fn output(&mut self, filename: &str) -> &mut CommandBuilder {
        self.output = Some(String::from(filename));
        self
    }

    /// Configure the command to run in the background.
    pub fn background(&mut self, background: bool) -> &mut CommandBuilder {
        self.background = background;
        self
    }

    /// Builds the final command, binding unset redirections of a
    /// background command to the null device. A built background command
    /// always has both `input` and `output` set.
    pub fn build(self) -> Command {
        let (input, output) = if self.background {
            (
                self.input.or_else(|| Some(String::from(NULL_DEVICE))),
                self.output.or_else(|| Some(String::from(NULL_DEVICE))),
            )
        } else {
            (self.input, self.output)
        };

        Command {
            name: self.name,
            args: self.args,
            input,
            output,
            background: self.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::ErrorKind;

    #[test]
    fn empty() {
        assert!(Command::parse("", false).unwrap().is_none());
        assert!(Command::parse("   \t ", false).unwrap().is_none());
    }

    #[test]
    fn comment() {
        assert!(Command::parse("# a comment", false).unwrap().is_none());
        assert!(Command::parse("#cmd arg", false).unwrap().is_none());
    }

    #[test]
    fn single_cmd() {
        let command = Command::parse("cmd", false).unwrap().unwrap();
        assert_eq!(command, CommandBuilder::new("cmd").build());
    }

    #[test]
    fn single_cmd_with_args() {
        let command = Command::parse("cmd var1 var2 var3", false).unwrap().unwrap();
        let mut expected = CommandBuilder::new("cmd");
        expected.arg("var1").arg("var2").arg("var3");
        assert_eq!(command, expected.build());
    }

    #[test]
    fn infile_valid() {
        let command = Command::parse("cmd < infile", false).unwrap().unwrap();
        assert_eq!(command.input.as_deref(), Some("infile"));
        assert!(command.args.is_empty());
    }

    #[test]
    fn infile_trailing_is_syntax_error() {
        let err = Command::parse("cmd <", false).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::Syntax(String::from("cmd <")));
    }

    #[test]
    fn outfile_valid() {
        let command = Command::parse("cmd > outfile", false).unwrap().unwrap();
        assert_eq!(command.output.as_deref(), Some("outfile"));
        assert!(command.args.is_empty());
    }

    #[test]
    fn outfile_trailing_is_syntax_error() {
        assert!(Command::parse("cmd arg >", false).is_err());
    }

    #[test]
    fn last_redirection_wins() {
        let command = Command::parse("cmd < one < two > three > four", false)
            .unwrap()
            .unwrap();
        assert_eq!(command.input.as_deref(), Some("two"));
        assert_eq!(command.output.as_deref(), Some("four"));
    }

    #[test]
    fn redirections_in_any_order() {
        let command = Command::parse("sort > out.txt < in.txt extra", false)
            .unwrap()
            .unwrap();
        assert_eq!(command.input.as_deref(), Some("in.txt"));
        assert_eq!(command.output.as_deref(), Some("out.txt"));
        assert_eq!(command.args, vec!["extra"]);
    }

    #[test]
    fn background_defaults_to_null_device() {
        let command = Command::parse("sleep 5 &", false).unwrap().unwrap();
        assert!(command.background);
        assert_eq!(command.input.as_deref(), Some(NULL_DEVICE));
        assert_eq!(command.output.as_deref(), Some(NULL_DEVICE));
    }

    #[test]
    fn background_keeps_explicit_redirections() {
        let command = Command::parse("cmd < in.txt &", false).unwrap().unwrap();
        assert!(command.background);
        assert_eq!(command.input.as_deref(), Some("in.txt"));
        assert_eq!(command.output.as_deref(), Some(NULL_DEVICE));
    }

    #[test]
    fn background_ignored_in_foreground_only_mode() {
        let command = Command::parse("sleep 5 &", true).unwrap().unwrap();
        assert!(!command.background);
        assert!(command.input.is_none());
        assert!(command.output.is_none());
    }

    #[test]
    fn ampersand_is_not_an_argument() {
        let command = Command::parse("cmd a & b", false).unwrap().unwrap();
        assert!(command.background);
        assert_eq!(command.args, vec!["a", "b"]);
    }
}
