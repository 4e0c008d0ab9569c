use crate::executor::SearchPath;

/// State owned by the long-lived interpreter process. Workers get a copy at spawn time
/// and never write it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub search_path: SearchPath,
    pub json: bool,
}

impl Session {
    pub fn new(search_path: SearchPath, json: bool) -> Self {
        Session { search_path, json }
    }
}
