use std::io::{self, Write};

/// One-line progress status written to stderr.
///
/// Write-only: each `set` overwrites the previous line, `finish` leaves
/// the last message in place. A disabled reporter is a no-op.
pub struct StatusLine {
    enabled: bool,
}

impl StatusLine {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn set(&self, text: &str) {
        if !self.enabled {
            return;
        }
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\r\x1b[2K{}", text);
        let _ = stderr.flush();
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let _ = writeln!(io::stderr());
    }
}
