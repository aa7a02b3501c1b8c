/// A command token recognized by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Question,
    Answer,
    Contacts,
    AddContact,
    FindContact(String),
    Events,
    AddEvent,
    Digest,
    AddDigest,
    Cancel,
    /// A slash command we don't recognize; kept so the dispatcher can
    /// point the user at /help instead of treating it as dialog input.
    Unknown(String),
}

impl Command {
    /// Parse a message that starts with '/'. Returns None for plain text.
    ///
    /// Handles the "/cmd@botname" form Telegram uses in group chats and the
    /// single argument of /find_contact.
    pub fn parse(text: &str) -> Option<Command> {
        let trimmed = text.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let mut parts = trimmed.splitn(2, ' ');
        let token = parts.next().unwrap_or("");
        let arg = parts.next().map(|s| s.trim()).unwrap_or("");

        // "/events@my_team_bot" -> "/events"
        let token = token.split('@').next().unwrap_or(token);

        let command = match token {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/question" => Command::Question,
            "/answer" => Command::Answer,
            "/contacts" => Command::Contacts,
            "/add_contact" => Command::AddContact,
            "/find_contact" => Command::FindContact(arg.to_string()),
            "/events" => Command::Events,
            "/add_event" => Command::AddEvent,
            "/digest" => Command::Digest,
            "/add_digest" => Command::AddDigest,
            "/cancel" => Command::Cancel,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// An incoming message as the core sees it, already stripped of any
/// transport specifics. `command` is set when the transport recognized
/// the text as a command invocation.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub chat_id: i64,
    pub text: String,
    pub command: Option<Command>,
}

impl Incoming {
    pub fn from_text(chat_id: i64, text: &str) -> Self {
        Self {
            chat_id,
            text: text.to_string(),
            command: Command::parse(text),
        }
    }
}
