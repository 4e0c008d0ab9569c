use std::fs;
use std::io::Write;
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("hello-shell-{}-{}", std::process::id(), n));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn hello(args: &[&str], dir: &PathBuf, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hello"))
        .args(args)
        .current_dir(dir)
        .env_remove("HELLO_CONFIG")
        .env_remove("HELLO_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_version_flag() {
    let dir = scratch_dir();
    let output = hello(&["--version"], &dir, "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "hello (c) diam Systems Ltd 2026\n");

    let output = hello(&["-J", "--version"], &dir, "");
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(record["command"], "hello");
    assert_eq!(record["year"], 2026);
}

#[test]
fn test_path_builtin() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "path\npath set a:b:c\npath\n");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "PATH=bin\nhello: path a:b:c ok\nPATH=a:b:c\n"
    );
    assert_eq!(stderr(&output), "hello$ hello$ hello$ hello$ ");
}

#[test]
fn test_json_prompt_records() {
    let dir = scratch_dir();
    let output = hello(&["-J"], &dir, "path\n");
    assert_eq!(
        stdout(&output),
        "{\"prompt\":\"hello\"}\n{\"command\":\"hello\",\"path\":\"bin\"}\n{\"prompt\":\"hello\"}\n"
    );
}

#[test]
fn test_pipeline_into_file() {
    let dir = scratch_dir();
    let output = hello(
        &[],
        &dir,
        "path set /bin:/usr/bin\necho hi | tr h H > out\n",
    );
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(dir.join("out")).unwrap(), "Hi\n");
}

#[test]
fn test_input_and_output_redirection() {
    let dir = scratch_dir();
    fs::write(dir.join("in"), "payload\n").unwrap();
    hello(&[], &dir, "path set /bin:/usr/bin\ncat < in > out\n");
    assert_eq!(fs::read_to_string(dir.join("out")).unwrap(), "payload\n");
}

#[test]
fn test_list_runs_in_order() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "path set /bin:/usr/bin\necho a ; echo b\n");
    assert_eq!(stdout(&output), "hello: path /bin:/usr/bin ok\na\nb\n");
}

#[test]
fn test_syntax_error_keeps_session() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "(ls\npath\n");
    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("syntax - missing )\n"));
    assert!(!err.contains("hello: syntax"));
    assert_eq!(stdout(&output), "PATH=bin\n");
}

#[test]
fn test_unknown_command_reported() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "no-such-program-hello\npath\n");
    assert!(stderr(&output).contains("hello: exec no-such-program-hello failed"));
    assert_eq!(stdout(&output), "PATH=bin\n");
}

#[test]
fn test_cd_failure_keeps_session() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "cd does-not-exist\npath\n");
    assert!(output.status.success());
    assert!(stderr(&output).contains("hello: cannot cd does-not-exist"));
    assert_eq!(stdout(&output), "PATH=bin\n");
}

#[test]
fn test_cd_changes_directory_for_later_commands() {
    let dir = scratch_dir();
    fs::create_dir(dir.join("sub")).unwrap();
    hello(&[], &dir, "path set /bin:/usr/bin\ncd sub\necho here > marker\n");
    assert!(dir.join("sub").join("marker").exists());
}

#[test]
fn test_leftovers_and_open_failure_are_unprefixed() {
    let dir = scratch_dir();
    let output = hello(&[], &dir, "ls )\ncat < missing-input\n");
    let err = stderr(&output);
    assert!(err.contains("leftovers: )\nsyntax\n"));
    assert!(err.contains("open missing-input failed\n"));
    assert!(!err.contains("hello: open"));
}

#[test]
fn test_output_redirect_does_not_truncate() {
    let dir = scratch_dir();
    fs::write(dir.join("plain"), "xyz").unwrap();
    fs::write(dir.join("append"), "xyz").unwrap();
    hello(
        &[],
        &dir,
        "path set /bin:/usr/bin\nprintf a > plain\nprintf a >> append\n",
    );
    assert_eq!(fs::read_to_string(dir.join("plain")).unwrap(), "ayz");
    assert_eq!(fs::read_to_string(dir.join("append")).unwrap(), "ayz");
}

#[test]
fn test_background_returns_to_prompt() {
    let dir = scratch_dir();
    // The sleeper keeps the shell's output open, so capture into a file rather than
    // a pipe that would only reach end of file once it exits.
    let log = dir.join("stdout");
    let started = Instant::now();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hello"))
        .current_dir(&dir)
        .env_remove("HELLO_CONFIG")
        .env_remove("HELLO_LOG")
        .stdin(Stdio::piped())
        .stdout(File::create(&log).unwrap())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"path set /bin:/usr/bin\nsleep 5 &\npath\n")
        .unwrap();
    assert!(child.wait().unwrap().success());
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "hello: path /bin:/usr/bin ok\nPATH=/bin:/usr/bin\n"
    );
}
