mod common;

use std::fs;
use std::process::Command;

use common::sample;

fn runvol_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_runvol"))
}

#[test]
fn help_is_available() {
    let out = runvol_cmd().arg("--help").output().expect("run runvol --help");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("LOG"));
}

#[test]
fn extracts_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let archive = sample().write_to(&dir.path().join("DATA.VOL"));
    let out = dir.path().join("out");

    let status = runvol_cmd()
        .arg("-q")
        .arg("-d")
        .arg(&out)
        .arg(&archive)
        .status()
        .expect("run runvol");
    assert!(status.success());
    assert_eq!(fs::read(out.join("intro.txt")).unwrap(), b"Buckle up.\r\n");
}

#[test]
fn log_argument_reports_without_extracting() {
    let dir = tempfile::tempdir().unwrap();
    let archive = sample().write_to(&dir.path().join("DATA.VOL"));
    let log = dir.path().join("log.txt");

    let status = runvol_cmd()
        .current_dir(dir.path())
        .arg(&archive)
        .arg(&log)
        .status()
        .expect("run runvol");
    assert!(status.success());

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.starts_with("offset:      0x"));
    assert!(text.contains("count:       0x00000006"));
    assert!(text.contains("name:        \"art\\signs\\stop.bmp\""));
    assert!(!dir.path().join("art").exists());
    assert!(!dir.path().join("intro.txt").exists());
}

#[test]
fn list_flag_reports_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let archive = sample().write_to(&dir.path().join("DATA.VOL"));

    let out = runvol_cmd()
        .current_dir(dir.path())
        .arg("-l")
        .arg(&archive)
        .output()
        .expect("run runvol");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("kind:        0x00000010 (dir)"));
    assert!(stdout.contains("name:        \"intro.txt\""));
    assert!(!dir.path().join("intro.txt").exists());
}

#[test]
fn pvol_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("P.VOL");
    fs::write(&archive, b"PVOL\0\0\0\0").unwrap();

    let out = runvol_cmd().arg(&archive).output().expect("run runvol");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("PVOL"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = runvol_cmd()
        .arg(dir.path().join("nope.vol"))
        .output()
        .expect("run runvol");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("file can't be opened"));
}
