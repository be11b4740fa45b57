// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const JULIA: &[&str] = &[
    "--func",
    "z^2 + Complex(-0.8, 0.156)",
    "--vary",
    "z",
    "--amin",
    "-1.5",
    "--amax",
    "1.5",
    "--bmin",
    "-1",
    "--bmax",
    "1",
    "--maxiterations",
    "60",
    "--escaperadius",
    "2",
    "--width",
    "30",
    "--height",
    "20",
    "--filename",
    "julia",
];

fn zfractals(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zfractals").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn dimensions(path: &Path) -> (u32, u32) {
    let image = image::open(path).unwrap().to_rgba();
    (image.width(), image.height())
}

#[test]
fn renders_from_the_command_line_alone() {
    let dir = TempDir::new().unwrap();
    zfractals(dir.path())
        .args(JULIA)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));
    assert_eq!(dimensions(&dir.path().join("julia.png")), (30, 20));
}

#[test]
fn renders_from_a_config_file_with_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{
            "func": "return z.square().add(c);",
            "vary": "c",
            "amin": -2.5, "amax": 1.5, "bmin": -1.5, "bmax": 1.5,
            "maxiterations": 50, "escaperadius": 2,
            "width": 40, "height": 30,
            "filename": "mandelbrot.png"
        }"#,
    )
    .unwrap();
    zfractals(dir.path())
        .args(&["--width", "16", "--threads", "1"])
        .assert()
        .success();
    assert_eq!(dimensions(&dir.path().join("mandelbrot.png")), (16, 30));
}

#[test]
fn existing_output_gets_a_numbered_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("julia.png"), b"taken").unwrap();
    zfractals(dir.path()).args(JULIA).assert().success();
    assert_eq!(dimensions(&dir.path().join("julia (1).png")), (30, 20));
    assert_eq!(fs::read(dir.path().join("julia.png")).unwrap(), b"taken");
}

#[test]
fn gives_up_when_every_name_is_taken() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("julia.png"), b"").unwrap();
    for n in 1..=9 {
        fs::write(dir.path().join(format!("julia ({}).png", n)), b"").unwrap();
    }
    zfractals(dir.path())
        .args(JULIA)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exist"));
}

#[test]
fn missing_options_are_reported_by_name() {
    let dir = TempDir::new().unwrap();
    zfractals(dir.path())
        .args(&JULIA[..JULIA.len() - 2])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"filename\" is not defined"));
}

#[test]
fn a_named_config_file_must_exist() {
    let dir = TempDir::new().unwrap();
    zfractals(dir.path())
        .args(&["--config", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn bad_functions_fail_before_writing() {
    let dir = TempDir::new().unwrap();
    let mut args = JULIA.to_vec();
    args[1] = "z^2 + w";
    zfractals(dir.path())
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variable w"));
    assert!(!dir.path().join("julia.png").exists());
}

#[test]
fn only_z_and_c_can_vary() {
    let dir = TempDir::new().unwrap();
    let mut args = JULIA.to_vec();
    args[3] = "q";
    zfractals(dir.path()).args(&args).assert().failure();
}
