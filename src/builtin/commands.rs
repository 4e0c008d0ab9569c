use std::env;
use std::io::Write;

use crate::builtin::BuiltinError;
use crate::builtin::manager::{BuiltinCommand, split_first_word};
use crate::flags;
use crate::record::RecordWriter;
use crate::session::Session;

const TOOL: &str = "hello";
const HELP_SUMMARY: &str = "Built-ins: cd <dir>, path [set <paths>], help, version";

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(
        &self,
        rest: &str,
        _session: &mut Session,
        _out: &mut dyn Write,
    ) -> Result<(), BuiltinError> {
        if rest.is_empty() {
            return Err(BuiltinError::CdMissingPath);
        }
        env::set_current_dir(rest).map_err(|source| BuiltinError::CdFailed {
            path: rest.to_string(),
            source,
        })
    }
}

pub struct HelpCommand;

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn run(
        &self,
        rest: &str,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<(), BuiltinError> {
        if !rest.is_empty() {
            return Err(BuiltinError::Usage("help"));
        }
        if session.json {
            let mut w = RecordWriter::begin(out)?;
            w.field_str("command", TOOL)?.field_str("help", HELP_SUMMARY)?;
            w.end()?;
            return Ok(());
        }
        writeln!(out, "Hello Shell commands:")?;
        writeln!(out, "  cd <dir>        change directory")?;
        writeln!(out, "  path            show command search path")?;
        writeln!(out, "  path set X      set path (colon separated)")?;
        writeln!(out, "  help            show this message")?;
        writeln!(out, "  version         show version info")?;
        Ok(())
    }
}

/// Registered twice, as `version` and `--version`.
pub struct VersionCommand {
    pub name: &'static str,
}

impl BuiltinCommand for VersionCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(
        &self,
        rest: &str,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<(), BuiltinError> {
        if !rest.is_empty() {
            return Err(BuiltinError::Usage("version"));
        }
        flags::print_version(TOOL, session.json, out)?;
        Ok(())
    }
}

pub struct PathCommand;

impl BuiltinCommand for PathCommand {
    fn name(&self) -> &'static str {
        "path"
    }

    fn run(
        &self,
        rest: &str,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<(), BuiltinError> {
        if rest.is_empty() {
            return print_path(session, out);
        }
        match split_first_word(rest) {
            ("set", value) => {
                session.search_path.set(value);
                flags::emit_status(
                    TOOL,
                    "path",
                    Some(session.search_path.as_str()),
                    "ok",
                    session.json,
                    out,
                )?;
                Ok(())
            }
            _ => Err(BuiltinError::Usage("path [set <paths>]")),
        }
    }
}

fn print_path(session: &Session, out: &mut dyn Write) -> Result<(), BuiltinError> {
    if session.json {
        let mut w = RecordWriter::begin(out)?;
        w.field_str("command", TOOL)?
            .field_str("path", session.search_path.as_str())?;
        w.end()?;
    } else {
        writeln!(out, "PATH={}", session.search_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{BuiltinManager, BuiltinStatus};

    fn dispatch(
        line: &str,
        session: &mut Session,
    ) -> (Result<BuiltinStatus, BuiltinError>, String) {
        let mut out = Vec::new();
        let result = BuiltinManager::new().dispatch(line, session, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_path_set_then_show() {
        let mut session = Session::default();
        let (result, out) = dispatch("path set a:b:c", &mut session);
        assert_eq!(result.unwrap(), BuiltinStatus::Handled);
        assert_eq!(out, "hello: path a:b:c ok\n");

        let (_, out) = dispatch("path", &mut session);
        assert_eq!(out, "PATH=a:b:c\n");
    }

    #[test]
    fn test_path_set_empty_resets() {
        let mut session = Session::default();
        dispatch("path set /opt/bin", &mut session);
        dispatch("path set", &mut session);
        assert_eq!(session.search_path.as_str(), "bin");
        dispatch("path set /opt/bin", &mut session);
        dispatch("  path   set   ", &mut session);
        assert_eq!(session.search_path.as_str(), "bin");
    }

    #[test]
    fn test_path_json() {
        let mut session = Session::default();
        session.json = true;
        let (_, out) = dispatch("path set x:y", &mut session);
        assert_eq!(
            out,
            "{\"command\":\"hello\",\"event\":\"path\",\"target\":\"x:y\",\"status\":\"ok\"}\n"
        );
        let (_, out) = dispatch("path", &mut session);
        assert_eq!(out, "{\"command\":\"hello\",\"path\":\"x:y\"}\n");
    }

    #[test]
    fn test_path_usage_error() {
        let mut session = Session::default();
        let (result, out) = dispatch("path add x", &mut session);
        assert!(matches!(result, Err(BuiltinError::Usage(_))));
        assert_eq!(result.unwrap_err().to_string(), "usage path [set <paths>]");
        assert!(out.is_empty());
        assert_eq!(session.search_path.as_str(), "bin");

        let (result, _) = dispatch("path settle", &mut session);
        assert!(matches!(result, Err(BuiltinError::Usage(_))));
    }

    #[test]
    fn test_cd_missing_path() {
        let mut session = Session::default();
        let (result, _) = dispatch("cd", &mut session);
        assert!(matches!(result, Err(BuiltinError::CdMissingPath)));
        assert_eq!(
            BuiltinError::CdMissingPath.to_string(),
            "cd requires a path"
        );
    }

    #[test]
    fn test_cd_nonexistent_keeps_directory() {
        let before = env::current_dir().unwrap();
        let mut session = Session::default();
        let (result, _) = dispatch("cd /nonexistent/hello-shell-dir", &mut session);
        match result {
            Err(e @ BuiltinError::CdFailed { .. }) => {
                assert_eq!(e.to_string(), "cannot cd /nonexistent/hello-shell-dir")
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_help_plain_and_json() {
        let mut session = Session::default();
        let (_, out) = dispatch("help", &mut session);
        assert!(out.starts_with("Hello Shell commands:\n"));
        assert!(out.contains("path set X"));

        session.json = true;
        let (_, out) = dispatch("help", &mut session);
        assert_eq!(
            out,
            "{\"command\":\"hello\",\"help\":\"Built-ins: cd <dir>, path [set <paths>], help, version\"}\n"
        );
    }

    #[test]
    fn test_help_with_argument_is_usage_error() {
        let mut session = Session::default();
        let (result, _) = dispatch("help me", &mut session);
        assert!(matches!(result, Err(BuiltinError::Usage("help"))));
    }

    #[test]
    fn test_version_forms() {
        let mut session = Session::default();
        let (_, plain) = dispatch("version", &mut session);
        let (_, dashed) = dispatch("--version", &mut session);
        assert_eq!(plain, "hello (c) diam Systems Ltd 2026\n");
        assert_eq!(plain, dashed);
    }
}
