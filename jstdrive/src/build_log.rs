use std::sync::Mutex;

/// The invoking build tool's live log. Passed explicitly into every stage so
/// the pipeline stays testable; there is no process-global logger binding.
pub trait BuildLog: Send + Sync {
    /// A line of child-process output, forwarded as it arrives.
    fn line(&self, text: &str);

    fn info(&self, text: &str);

    fn warn(&self, text: &str);
}

/// Forwards to stdout/stderr. A single write lock keeps concurrently
/// arriving chunks from interleaving mid-line.
#[derive(Debug, Default)]
pub struct StdoutLog {
    write_lock: Mutex<()>,
}

impl StdoutLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildLog for StdoutLog {
    fn line(&self, text: &str) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        println!("{text}");
    }

    fn info(&self, text: &str) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        println!("jstdrive: {text}");
    }

    fn warn(&self, text: &str) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        eprintln!("jstdrive: warning: {text}");
    }
}

/// In-memory sink for tests: records forwarded lines and log calls in
/// arrival order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Line(String),
    Info(String),
    Warn(String),
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Forwarded child output only, in arrival order.
    pub fn forwarded_lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Line(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Warn(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Info(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(entry);
    }
}

impl BuildLog for MemoryLog {
    fn line(&self, text: &str) {
        self.push(LogEntry::Line(text.to_string()));
    }

    fn info(&self, text: &str) {
        self.push(LogEntry::Info(text.to_string()));
    }

    fn warn(&self, text: &str) {
        self.push(LogEntry::Warn(text.to_string()));
    }
}
