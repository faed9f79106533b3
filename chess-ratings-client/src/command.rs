use thiserror::Error;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Previous,
    Page(usize),
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// Lines starting with `:` are navigation commands, anything else replaces the
/// search text verbatim.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };
    match command.trim() {
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" | "previous" => Ok(Command::Previous),
        "q" | "quit" => Ok(Command::Quit),
        other => other
            .parse::<usize>()
            .map(Command::Page)
            .map_err(|_| CommandError::Unknown(line.to_string())),
    }
}
