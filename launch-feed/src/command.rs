use std::path::PathBuf;

/// Command prefix types understood by the terminal driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandType {
    Search,     // \search - change the search term
    Scroll,     // \scroll - report a scroll position
    Toggle,     // \toggle - flip a card's detail panel
    Html,       // \html - export the current view
    Help,       // \help
    Quit,       // \quit
    Unknown,
}

impl CommandType {
    /// Parse command type from prefix
    pub fn from_prefix(prefix: &str) -> Self {
        let name = prefix.trim_start_matches(['\\', '/']).to_lowercase();
        match name.as_str() {
            "search" | "s" => CommandType::Search,
            "scroll" | "more" => CommandType::Scroll,
            "toggle" | "t" => CommandType::Toggle,
            "html" => CommandType::Html,
            "help" | "h" => CommandType::Help,
            "quit" | "q" | "exit" => CommandType::Quit,
            _ => CommandType::Unknown,
        }
    }
}

/// A fully interpreted line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    Search(String),
    /// Scroll offset in pixels; `None` means the bottom of the document
    Scroll(Option<u32>),
    /// 1-based card number as printed in the text view
    Toggle(usize),
    Html(PathBuf),
    Help,
    Quit,
    Invalid(String),
}

impl FeedCommand {
    /// Parse one input line.
    ///
    /// Lines without a command prefix are taken as a new search term, the
    /// same way typing into a search box would be.
    ///
    /// # Examples
    /// ```
    /// use launch_feed::command::FeedCommand;
    ///
    /// assert_eq!(FeedCommand::parse("/search falcon"), FeedCommand::Search("falcon".into()));
    /// assert_eq!(FeedCommand::parse("\\toggle 2"), FeedCommand::Toggle(2));
    /// ```
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        let Some((prefix, rest)) = Self::extract_prefix(trimmed) else {
            return FeedCommand::Search(trimmed.to_string());
        };
        let arguments = rest.trim();

        match CommandType::from_prefix(prefix) {
            CommandType::Search => FeedCommand::Search(arguments.to_string()),
            CommandType::Scroll => {
                if arguments.is_empty() {
                    FeedCommand::Scroll(None)
                } else {
                    match arguments.parse::<u32>() {
                        Ok(offset) => FeedCommand::Scroll(Some(offset)),
                        Err(_) => FeedCommand::Invalid(format!("invalid scroll offset: {}", arguments)),
                    }
                }
            }
            CommandType::Toggle => match arguments.parse::<usize>() {
                Ok(n) if n > 0 => FeedCommand::Toggle(n),
                _ => FeedCommand::Invalid(format!("invalid card number: {}", arguments)),
            },
            CommandType::Html => {
                if arguments.is_empty() {
                    FeedCommand::Invalid("missing output path".to_string())
                } else {
                    FeedCommand::Html(PathBuf::from(arguments))
                }
            }
            CommandType::Help => FeedCommand::Help,
            CommandType::Quit => FeedCommand::Quit,
            CommandType::Unknown => FeedCommand::Invalid(format!("unknown command: {}", prefix)),
        }
    }

    /// Extract prefix and rest of the line
    fn extract_prefix(text: &str) -> Option<(&str, &str)> {
        if !text.starts_with('\\') && !text.starts_with('/') {
            return None;
        }

        match text.find(char::is_whitespace) {
            Some(space_pos) => Some((&text[..space_pos], &text[space_pos..])),
            None => Some((text, "")),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  /search <term>   search by mission name (empty term clears the filter)
  /scroll [offset] scroll to an offset in pixels, or to the bottom
  /toggle <n>      show or hide details of card n
  /html <path>     export the current view as an HTML page
  /help            show this help
  /quit            exit
Any other line is used as the search term.";
