//! Command-line argument parsing.

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print the version and exit
    Version,
    /// Print usage and exit
    Help,
    /// Serve only the mock chat endpoint, without the TUI
    Mock,
    /// Run the chat TUI (default)
    RunTui,
}

/// Parse command-line arguments; the first recognised flag wins.
///
/// ```
/// use retrochat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["retrochat".to_string(), "--mock".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Mock);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--mock" => return CliCommand::Mock,
            _ => {}
        }
    }
    CliCommand::RunTui
}
