use std::io::{self, BufRead, Write};

pub const TOPIC_PROMPT: &str = "Enter topic for debate: ";

/// Result of asking for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicInput {
    Topic(String),
    /// Input closed before a line was entered.
    Aborted,
}

/// Prompt on `output` and read one line from `input`.
///
/// End of input counts as a user abort. Surrounding whitespace is trimmed;
/// an empty line is still a topic.
pub fn read_topic(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<TopicInput> {
    write!(output, "{}", TOPIC_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(TopicInput::Aborted);
    }
    Ok(TopicInput::Topic(line.trim().to_string()))
}
