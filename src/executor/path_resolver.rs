use std::fmt;

pub const DEFAULT_SEARCH_PATH: &str = "bin";
/// Capacity of the stored path, terminator included.
pub const SEARCH_PATH_CAPACITY: usize = 128;

/// Colon-separated prefixes tried, in order, for a program name without a `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath(String);

impl SearchPath {
    pub fn new(value: &str) -> Self {
        let mut path = SearchPath(String::new());
        path.set(value);
        path
    }

    /// An empty value restores the default; longer values are cut to fit the capacity.
    pub fn set(&mut self, value: &str) {
        let value = if value.is_empty() {
            DEFAULT_SEARCH_PATH
        } else {
            value
        };
        self.0 = truncate(value, SEARCH_PATH_CAPACITY - 1).to_string();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Paths to try for `program`, in order. A program containing `/` is only tried
    /// literally; otherwise every prefix is tried and the bare name comes last.
    pub fn candidates(&self, program: &str) -> Vec<String> {
        if program.contains('/') {
            return vec![program.to_string()];
        }
        let mut candidates: Vec<String> = self
            .0
            .split(':')
            .map(|prefix| join(prefix, program))
            .collect();
        candidates.push(program.to_string());
        candidates
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        SearchPath::new(DEFAULT_SEARCH_PATH)
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn join(prefix: &str, program: &str) -> String {
    if prefix.is_empty() {
        program.to_string()
    } else if prefix.ends_with('/') {
        format!("{prefix}{program}")
    } else {
        format!("{prefix}/{program}")
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
