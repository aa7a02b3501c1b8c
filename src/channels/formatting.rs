/// Help/start reply listing every command, grouped by topic.
pub(crate) fn build_help_text() -> String {
    "Hi! I'm the team assistant bot.\n\
     \n\
     Company & project Q&A:\n\
     /question - Ask a question\n\
     /answer - Teach me a question and its answer\n\
     \n\
     Contacts:\n\
     /contacts - List all contacts\n\
     /add_contact - Add a colleague\n\
     /find_contact <name> - Find a contact by name\n\
     \n\
     Events:\n\
     /events - Upcoming events\n\
     /add_event - Add an event or reminder\n\
     \n\
     Digests:\n\
     /digest - Recent digests\n\
     /add_digest - Add a digest\n\
     \n\
     /cancel - Abort the current dialog\n\
     /help - This message"
        .to_string()
}

/// Split a message into chunks no longer than `max_len` characters,
/// preferring line boundaries.
pub(crate) fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        // A single oversized line is hard-split.
        if line_len > max_len {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut piece = String::new();
            let mut piece_len = 0usize;
            for ch in line.chars() {
                if piece_len == max_len {
                    chunks.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
                piece.push(ch);
                piece_len += 1;
            }
            if !piece.is_empty() {
                current = piece;
                current_len = piece_len;
            }
            continue;
        }

        let sep = usize::from(!current.is_empty());
        if current_len + sep + line_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_one_chunk() {
        let chunks = split_message("hello", 4096);
        assert_eq!(chunks, vec!["hello".to_string()]);
    }

    #[test]
    fn splits_on_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = split_message(text, 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn hard_splits_oversized_line() {
        let text = "abcdefghij";
        let chunks = split_message(text, 4);
        assert_eq!(
            chunks,
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn no_chunk_exceeds_limit() {
        let text = "line one\nline two that is longer\nshort\n".repeat(50);
        for chunk in split_message(&text, 40) {
            assert!(chunk.chars().count() <= 40, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn help_text_mentions_every_command() {
        let help = build_help_text();
        for command in [
            "/question",
            "/answer",
            "/contacts",
            "/add_contact",
            "/find_contact",
            "/events",
            "/add_event",
            "/digest",
            "/add_digest",
            "/cancel",
            "/help",
        ] {
            assert!(help.contains(command), "help is missing {}", command);
        }
    }
}
