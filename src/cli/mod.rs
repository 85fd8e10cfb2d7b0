//! Command-line interface.
//!
//! ```ignore
//! use retrochat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{help_text, version_line, VERSION};

/// Print the output of the informational commands.
///
/// Returns `true` when the command was handled and the process should exit;
/// `Mock` and `RunTui` are left to the caller.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            true
        }
        CliCommand::Help => {
            print!("{}", help_text());
            true
        }
        CliCommand::Mock | CliCommand::RunTui => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_is_not_handled() {
        assert!(!run_cli_command(&CliCommand::RunTui));
        assert!(!run_cli_command(&CliCommand::Mock));
    }
}
