//! CLI integration tests

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn pcb_wizard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pcb-wizard").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SKiDL"));
}

#[test]
fn test_options_table() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("powersource"))
        .stdout(predicate::str::contains("Wemos D1 Mini"));
}

#[test]
fn test_options_json_for_one_key() {
    let temp = TempDir::new().unwrap();
    let output = pcb_wizard(&temp)
        .args(["options", "usb_uart", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "usb_uart");
    assert_eq!(entries[0]["labels"][0], "No USB");
    assert!(entries[0]["labels"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("CP2104")));
}

#[test]
fn test_options_unknown_key() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .args(["options", "flux_capacitor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option key 'flux_capacitor'"));
}

#[test]
fn test_generate_to_stdout() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .args(["generate", "--stdout", "--set", "mcu=ESP-12E", "--set", "led=yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("U1 = Part('RF_Module', 'ESP-12E'"))
        .stdout(predicate::str::ends_with("generate_netlist()\n"));

    temp.child("board.py").assert(predicate::path::missing());
}

#[test]
fn test_generate_writes_output() {
    let temp = TempDir::new().unwrap();
    temp.child("settings.yml")
        .write_str("mcu: ATmega328P-PU\nicsp: true\n")
        .unwrap();

    pcb_wizard(&temp)
        .args(["generate", "-o", "out/atmega.py"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote out/atmega.py"));

    temp.child("out/atmega.py")
        .assert(predicate::str::contains("ICSP_CONN = Part("))
        .assert(predicate::str::contains("generate_netlist()"));
}

#[test]
fn test_generate_save_settings() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .args(["generate", "--save", "--set", "mcu=ESP-07", "--set", "Reset button=true"])
        .assert()
        .success();

    temp.child("settings.yml")
        .assert(predicate::str::contains("mcu: ESP-07"))
        .assert(predicate::str::contains("Reset button: true"));
    temp.child("board.py").assert(predicate::path::exists());
}

#[test]
fn test_generate_unknown_label() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .args(["generate", "--set", "powersource=9V - PP3 clip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("unknown option value for 'powersource'"));

    temp.child("board.py").assert(predicate::path::missing());
}

#[test]
fn test_generate_unknown_field() {
    let temp = TempDir::new().unwrap();
    pcb_wizard(&temp)
        .args(["generate", "--stdout", "--set", "warp_drive=true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'warp_drive'"));
}

#[test]
fn test_generate_failed_write_keeps_settings() {
    let temp = TempDir::new().unwrap();
    temp.child("board.py").create_dir_all().unwrap();

    pcb_wizard(&temp)
        .args(["generate", "--save", "--set", "mcu=ESP-07"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write output file"));

    temp.child("settings.yml").assert(predicate::path::missing());
}
