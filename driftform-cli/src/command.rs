//! Line commands typed by the user.

use driftform_lib::model::Field;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a field's value.
    Set(Field, String),
    /// Submit the form.
    Submit,
    /// Print the form.
    Show,
    /// Print the rules in force.
    Rules,
    /// Print usage.
    Help,
    /// Leave.
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line held nothing.
    #[error("empty command")]
    Empty,
    /// The first word is neither a field nor a command.
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  email <value>    set the email address (no value clears it)
  amount <value>   set the transfer amount (no value clears it)
  submit           submit the form
  show             print the form
  rules            print the rules in force
  help             print this help
  quit             exit";

/// Parses one input line.
///
/// Everything after the first space of a field command is the value,
/// kept verbatim.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };

    if word.is_empty() {
        return Err(CommandError::Empty);
    }

    if let Ok(field) = word.parse::<Field>() {
        return Ok(Command::Set(field, rest.to_string()));
    }

    match word {
        "submit" => Ok(Command::Submit),
        "show" => Ok(Command::Show),
        "rules" => Ok(Command::Rules),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_commands() {
        assert_eq!(
            parse("email a@ok.com"),
            Ok(Command::Set(Field::Email, "a@ok.com".to_string()))
        );
        assert_eq!(
            parse("amount 12.5\n"),
            Ok(Command::Set(Field::Amount, "12.5".to_string()))
        );
    }

    #[test]
    fn test_value_is_verbatim() {
        assert_eq!(
            parse("email  a b "),
            Ok(Command::Set(Field::Email, " a b ".to_string()))
        );
    }

    #[test]
    fn test_bare_field_clears() {
        assert_eq!(parse("amount"), Ok(Command::Set(Field::Amount, String::new())));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse("submit"), Ok(Command::Submit));
        assert_eq!(parse("  show"), Ok(Command::Show));
        assert_eq!(parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(
            parse("iban DE00"),
            Err(CommandError::Unknown("iban".to_string()))
        );
    }
}
