//! Email body normalisation applied before masking

/// Strip a leading header block and collapse whitespace
///
/// When the text contains a `Subject:` header line, everything up to the
/// first blank line is dropped. Runs of whitespace become a single space and
/// the result is trimmed.
pub fn preprocess_email_text(email_text: &str) -> String {
    let body = if email_text.contains("\nSubject:") {
        email_text
            .split_once("\n\n")
            .map_or(email_text, |(_, body)| body)
    } else {
        email_text
    };

    body.split_whitespace().collect::<Vec<_>>().join(" ")
}
