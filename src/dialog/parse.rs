//! Parsing of free-text dialog input: the combined question/answer
//! submission and the fixed event date format.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

/// The one date format the add-event flow accepts.
pub const EVENT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

static ANSWER_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)answer:\s*").unwrap());
static QUESTION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^.*?question:\s*").unwrap());

/// Parse a combined "Question: ... Answer: ..." submission.
///
/// The text must contain both label words (case-insensitive). It is split at
/// the first "answer:" label; everything before it, minus the leading text up
/// through "question:", is the question. Both halves are trimmed and must be
/// non-empty.
pub fn parse_qa_submission(text: &str) -> Result<(String, String), ParseError> {
    let lower = text.to_lowercase();
    if !(lower.contains("question") && lower.contains("answer")) {
        return Err(ParseError::MissingLabels);
    }

    let mut parts = ANSWER_SPLIT.splitn(text, 2);
    let head = parts.next().unwrap_or("");
    let Some(tail) = parts.next() else {
        // Label word present but never followed by its separator.
        return Err(ParseError::MissingLabels);
    };

    let question = QUESTION_PREFIX.replace(head, "").trim().to_string();
    let answer = tail.trim().to_string();

    if question.is_empty() || answer.is_empty() {
        return Err(ParseError::EmptyField);
    }
    Ok((question, answer))
}

/// Parse an event date in `DD.MM.YYYY HH:MM` form.
pub fn parse_event_date(text: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), EVENT_DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate)
}
