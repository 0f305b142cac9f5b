#![cfg(not(target_arch = "wasm32"))]

use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("pssl-translate").unwrap();
    for var in [
        "PSSL_TRANSLATE_VERTEX",
        "PSSL_TRANSLATE_FRAGMENT",
        "PSSL_TRANSLATE_PRESET",
        "PSSL_TRANSLATE_NAME",
        "PSSL_TRANSLATE_OUT_DIR",
        "PSSL_TRANSLATE_STRICT_TYPES",
        "PSSL_TRANSLATE_STRICT_ASCII",
        "PSSL_TRANSLATE_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

const VERT: &str = "\
uniform mat4 Projection;
in vec3 Position;
out vec4 vPosition;
void main()
{
    vPosition = Projection * vec4(Position, 1.0);
}
";

const FRAG: &str = "\
uniform vec4 Tint;
out vec4 FragColor;
void main()
{
    FragColor = Tint;
}
";

#[test]
fn preset_writes_all_four_artifacts() {
    let tmp = tempdir().unwrap();
    let output = cli()
        .args(["--preset", "toon", "--out-dir"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    for file in [
        "ToonShaderConstants.h",
        "ToonVSOutput.hs",
        "Toon_vv.pssl",
        "Toon_p.pssl",
    ] {
        assert!(tmp.path().join(file).is_file(), "missing {file}");
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Toon_p.pssl"));
    assert!(stdout.contains("mul(matrix, vector)"));
}

#[test]
fn file_inputs_use_the_given_name() {
    let tmp = tempdir().unwrap();
    let vert = tmp.path().join("flat.vert");
    let frag = tmp.path().join("flat.frag");
    fs::write(&vert, VERT).unwrap();
    fs::write(&frag, FRAG).unwrap();
    let out_dir = tmp.path().join("out");

    cli()
        .arg("--vertex")
        .arg(&vert)
        .arg("--fragment")
        .arg(&frag)
        .args(["--name", "Flat", "--out-dir"])
        .arg(&out_dir)
        .assert()
        .success();

    let vertex = fs::read_to_string(out_dir.join("Flat_vv.pssl")).unwrap();
    assert!(vertex.contains("FlatVSOutput main(ptVSInput _input)"));
    assert!(vertex.contains("l_output.vPosition = l_Projection * float4(_input.Position, 1.0);"));
    let pixel = fs::read_to_string(out_dir.join("Flat_p.pssl")).unwrap();
    assert!(pixel.contains("return l_Tint;"));
}

#[test]
fn missing_main_fails_without_writing() {
    let tmp = tempdir().unwrap();
    let vert = tmp.path().join("a.vert");
    let frag = tmp.path().join("a.frag");
    fs::write(&vert, VERT).unwrap();
    fs::write(&frag, "uniform vec4 Tint;\n").unwrap();
    let out_dir = tmp.path().join("out");

    let output = cli()
        .arg("--vertex")
        .arg(&vert)
        .arg("--fragment")
        .arg(&frag)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no `void main()` entry point"),
        "stderr:\n{stderr}"
    );
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn unreadable_input_reports_the_path() {
    let tmp = tempdir().unwrap();
    let output = cli()
        .args([
            "--vertex",
            "does-not-exist.vert",
            "--fragment",
            "does-not-exist.frag",
        ])
        .arg("--out-dir")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.vert"));
}

#[test]
fn invalid_shader_name_is_rejected() {
    let tmp = tempdir().unwrap();
    cli()
        .args(["--preset", "color", "--name", "My Shader", "--out-dir"])
        .arg(tmp.path())
        .assert()
        .failure();
}
