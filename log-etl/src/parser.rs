/// Zero-based index of the first user agent field.
/// The fields before it are the other record attributes (IP, timestamp, method, path, status, etc).
pub const USER_AGENT_FIELD: usize = 11;

/// Returns the non-empty lines of the log.
/// Lines end with `\n` or `\r\n`.
pub fn log_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.is_empty())
}

/// Extracts the user agent from a space-delimited log line: everything from the 12th field onward.
/// Returns `None` if the line has fewer than 12 fields.
pub fn user_agent(line: &str) -> Option<&str> {
    // the last item of splitn keeps the remaining separators, same as rejoining the fields with spaces
    line.splitn(USER_AGENT_FIELD + 1, ' ').nth(USER_AGENT_FIELD)
}
