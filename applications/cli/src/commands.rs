/// Interactive command parsing
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  list              show the current view
  refresh           reload all users
  name <text>       set the form name
  email <text>      set the form email
  submit            add, or update when editing
  edit <id>         load a listed user into the form
  delete <id>       delete a listed user
  search <text>     set the ID to look up
  get               look up the searched ID
  help              show this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Refresh,
    Name(String),
    Email(String),
    Submit,
    Edit(String),
    Delete(String),
    Search(String),
    Get,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {} <{}>", word, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "list" | "ls" => Ok(Command::List),
            "refresh" => Ok(Command::Refresh),
            // Empty values are allowed so a field can be cleared
            "name" => Ok(Command::Name(rest.to_string())),
            "email" => Ok(Command::Email(rest.to_string())),
            "submit" => Ok(Command::Submit),
            "edit" => require("id").map(Command::Edit),
            "delete" | "rm" => require("id").map(Command::Delete),
            "search" => Ok(Command::Search(rest.to_string())),
            "get" => Ok(Command::Get),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}
