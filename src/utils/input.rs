//! Cleanup applied to text before it enters the input box or the transcript.

/// Make pasted text safe to insert into the input box.
///
/// CRLF and lone CR become LF, tabs become four spaces, and every other
/// control character is dropped so it cannot corrupt the terminal.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                sanitized.push('\n');
            }
            '\t' => sanitized.push_str("    "),
            '\n' => sanitized.push('\n'),
            _ if c.is_control() => {}
            _ => sanitized.push(c),
        }
    }

    sanitized
}

/// The message to send for a submitted input, or `None` when it is blank.
pub fn prepare_message(input: &str) -> Option<String> {
    let trimmed = input.trim_end();
    let trimmed = trimmed.trim_start_matches(['\n', '\r']);
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_endings_are_normalized() {
        assert_eq!(sanitize_text_input("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn tabs_expand_and_controls_drop() {
        assert_eq!(sanitize_text_input("\x1b[31mred\tok\x07"), "[31mred    ok");
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(sanitize_text_input("héllo 🚀"), "héllo 🚀");
    }

    #[test]
    fn blank_input_is_not_a_message() {
        assert_eq!(prepare_message(""), None);
        assert_eq!(prepare_message("  \n\t "), None);
    }

    #[test]
    fn message_keeps_inner_layout() {
        assert_eq!(
            prepare_message("\n  indented\n\nsecond  \n").as_deref(),
            Some("  indented\n\nsecond")
        );
    }
}
