//! Token expansion run on the raw input line before parsing.

use std::process;

/// The marker replaced by the shell's own process id.
const PID_MARKER: &str = "$$";

/// Replaces every non-overlapping occurrence of `$$` in `line` with the
/// decimal process id of this shell. Lines without the marker are
/// returned unchanged. This is literal text substitution; it is not
/// quoting-aware.
pub fn expand(line: &str) -> String {
    expand_pid(line, process::id())
}

fn expand_pid(line: &str, pid: u32) -> String {
    if !line.contains(PID_MARKER) {
        return line.to_string();
    }

    line.replace(PID_MARKER, &pid.to_string())
}
