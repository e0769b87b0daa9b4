use std::fmt;
use std::error::Error;


// Formats an error that may have a message and/or a source error
pub fn format_error(fmt: &mut fmt::Formatter<'_>, title: &str, message: Option<&str>, source: Option<&dyn Error>) -> fmt::Result {
    // empty messages are formatted the same as no message
    let message =
        if let Some("") = message { None }
        else { message };
    
    match (message, source) {
        (None, None) => fmt.write_str(title),
        (None, Some(error)) => write!(fmt, "{}: {}", title, error),
        (Some(message), None) => write!(fmt, "{}: {}", title, message),
        (Some(message), Some(error)) => write!(fmt, "{}: {}: {}", title, message, error),
    }
}

// useful for writing values in listings, to ensure that a gigantic number doesnt swamp the output
pub fn trim_str(target: &str, maxlen: usize) -> TrimStr<'_> {
    TrimStr {
        target,
        maxlen,
    }
}

// captures the arguments to trim_str(), to implement trimming in fmt() without requiring an extra string buffer
pub struct TrimStr<'s> {
    target: &'s str,
    maxlen: usize,
}

impl fmt::Display for TrimStr<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target.chars().count() <= self.maxlen {
            return fmt.write_str(self.target);
        }
        
        let keep = self.maxlen.saturating_sub(3);
        let end = self.target.char_indices()
            .nth(keep)
            .map_or(self.target.len(), |(idx, _)| idx);
        
        write!(fmt, "{}...", &self.target[..end])
    }
}
