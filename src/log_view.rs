use chrono::Local;

const MAX_ENTRIES: usize = 200;

/// Bounded in-app diagnostic transcript, drawn in the right-hand pane.
#[derive(Debug)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry.into());
        self.entries.push(stamped);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}
