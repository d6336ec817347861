//! Line wrapping for the transcript.

/// Display lines for `msg`: explicit newlines are kept (blank lines included)
/// and each line is wrapped to `width` columns. A zero width disables wrapping.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    msg.split('\n')
        .flat_map(|line| -> Vec<String> {
            if line.is_empty() || width == 0 {
                vec![line.to_string()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.into_owned())
                    .collect()
            }
        })
        .collect()
}
