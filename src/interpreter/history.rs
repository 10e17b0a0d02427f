/// Submitted command lines plus an up/down navigation cursor.
///
/// The cursor ranges over `0..=len`; `len` is the fresh empty line below the
/// newest entry. Entries are never dropped.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and park the cursor on the empty line.
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
    }

    /// Step back (Up). `None` at the oldest entry or with no history.
    pub fn prev(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward (Down). Past the newest entry this returns the empty
    /// line and stays there.
    pub fn next(&mut self) -> &str {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            &self.entries[self.cursor]
        } else {
            self.cursor = self.entries.len();
            ""
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> History {
        let mut h = History::new();
        for line in lines {
            h.push(line);
        }
        h
    }

    #[test]
    fn walks_back_then_forward_to_empty_line() {
        let mut h = history(&["a", "b", "c"]);
        assert_eq!(h.cursor(), 3);

        assert_eq!(h.prev(), Some("c"));
        assert_eq!(h.prev(), Some("b"));
        assert_eq!(h.prev(), Some("a"));
        assert_eq!(h.prev(), None);
        assert_eq!(h.cursor(), 0);

        assert_eq!(h.next(), "b");
        assert_eq!(h.next(), "c");
        assert_eq!(h.next(), "");
        assert_eq!(h.cursor(), 3);
        assert_eq!(h.next(), "");
        assert_eq!(h.cursor(), 3);
    }

    #[test]
    fn empty_history_is_inert() {
        let mut h = History::new();
        assert_eq!(h.prev(), None);
        assert_eq!(h.next(), "");
        assert_eq!(h.cursor(), 0);
        assert!(h.is_empty());
    }

    #[test]
    fn push_resets_cursor_to_end() {
        let mut h = history(&["a", "b"]);
        h.prev();
        h.prev();
        h.push("c");
        assert_eq!(h.cursor(), 3);
        assert_eq!(h.prev(), Some("c"));
    }

    #[test]
    fn duplicates_are_kept() {
        let h = history(&["help", "help"]);
        assert_eq!(h.entries(), ["help", "help"]);
        assert_eq!(h.len(), 2);
    }
}
