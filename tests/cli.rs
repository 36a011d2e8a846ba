use std::fs;
use std::process::Command;

use qrassets::{PLACEHOLDER_URL, QrDecoder};

fn qrassets() -> Command {
    Command::new(env!("CARGO_BIN_EXE_qrassets"))
}

#[test]
fn bare_run_ignores_stray_config_and_environment() {
    let scratch = tempfile::tempdir().expect("tempdir");
    fs::write(
        scratch.path().join("qrassets.toml"),
        "url = \"https://stray.example\"\noutput_dir = \"elsewhere\"\n",
    )
    .expect("write stray config");

    let output = qrassets()
        .current_dir(scratch.path())
        .env("QRASSETS_URL", "https://from-env.example")
        .env("QRASSETS_OUTPUT_DIR", "from-env")
        .output()
        .expect("run qrassets");

    assert!(output.status.success(), "{output:?}");
    assert!(!scratch.path().join("elsewhere").exists());
    assert!(!scratch.path().join("from-env").exists());

    let assets = scratch.path().join("assets");
    for file in ["qr-code.png", "qr-code-white.png", "qr-code.svg"] {
        assert!(assets.join(file).is_file(), "missing {file}");
    }

    let png = fs::read(assets.join("qr-code-white.png")).expect("read png");
    let decoded = QrDecoder::new().decode_bytes(&png).expect("decode");
    assert_eq!(decoded.as_str(), PLACEHOLDER_URL);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("QR code generated").count(), 3, "{stdout}");
}

#[test]
fn config_error_is_logged_and_fails() {
    let scratch = tempfile::tempdir().expect("tempdir");

    let output = qrassets()
        .current_dir(scratch.path())
        .arg("--config")
        .arg(scratch.path().join("missing.toml"))
        .output()
        .expect("run qrassets");

    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR"), "error not logged: {stdout}");
    assert!(stdout.contains("missing.toml"), "{stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Configuration error"), "{stderr}");
    assert!(!scratch.path().join("assets").exists());
}
