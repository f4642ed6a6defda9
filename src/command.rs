/// A chat message, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Latest,
    Random,
    /// A specific comic, already checked against the latest known number
    Numbered(u32),
    Help,
    Unknown(String),
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a message. Matching is exact and case-sensitive.
///
/// A digit string only becomes `Numbered` when `0 < n < latest_number`.
/// The latest comic itself is not reachable by number; `latest` covers it.
pub fn classify(text: &str, latest_number: u32) -> Command {
    match text {
        "latest" => Command::Latest,
        "random" => Command::Random,
        "help" => Command::Help,
        t if is_decimal(t) => match t.parse::<u32>() {
            Ok(n) if n > 0 && n < latest_number => Command::Numbered(n),
            _ => Command::Unknown(text.to_string()),
        },
        _ => Command::Unknown(text.to_string()),
    }
}

/// Whether classifying `text` depends on the latest comic number.
/// `help` and free text never do, so they need no upstream call.
pub fn needs_latest(text: &str) -> bool {
    matches!(text, "latest" | "random") || is_decimal(text)
}
