mod executor;
mod path_resolver;
mod sys;

pub use executor::{ExecError, ExecStatus, Executor, STATUS_NOT_FOUND};
pub use path_resolver::{DEFAULT_SEARCH_PATH, SEARCH_PATH_CAPACITY, SearchPath};
pub use sys::{NixSys, Sys};
