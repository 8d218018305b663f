use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

const LISTING: &str = "0000000000000000 <_ZN8SimpleSSD3FTL3FTL4readERNS_7RequestERm>:
   0:\tf9400000 \tldr\tx0, [x0]
   4:\t91000400 \tadd\tx0, x0, #0x1
0000000000000010 <_ZN8SimpleSSD3FTL3FTL5writeERNS_7RequestERm>:
  10:\tf9000000 \tstr\tx0, [x0]
  14:\td65f03c0 \tret
";

const CATALOG: &str = r#"{
  "functions": [
    {"source_file": "ftl/ftl.cc", "function": "read", "namespace_code": 0, "function_code": 0},
    {"source_file": "ftl/ftl.cc", "function": "write", "namespace_code": 0, "function_code": 1}
  ]
}"#;

#[test]
fn missing_subcommand_prints_usage_and_fails() {
    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn classify_prints_category_and_cost() {
    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .args(["classify", "ldr", "fcmppe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ldr: load cost=4"))
        .stdout(predicate::str::contains("fcmppe: other cost=1 (unknown)"));
}

#[test]
fn classify_json_is_parseable() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .args(["classify", "--json", "SDIV"])
        .output()
        .expect("run instcount");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value[0]["category"], "arithmetic");
    assert_eq!(value[0]["cost"], 20);
    assert_eq!(value[0]["matched"], true);
}

#[test]
fn analyse_prints_cost_vector() {
    let temp = tempdir().unwrap();
    let listing = temp.path().join("ftl_ftl.asm");
    fs::write(&listing, LISTING).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("analyse")
        .arg("--listing")
        .arg(&listing)
        .args(["--function", "read", "--function", "trim"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "read: other=0 branch=0 load=4 store=0 arithmetic=1 floating_point=0 (total=5, instructions=2)",
        ))
        .stdout(predicate::str::contains("trim: other=0 branch=0"));
}

#[test]
fn decode_lists_mnemonics() {
    let temp = tempdir().unwrap();
    let listing = temp.path().join("ftl_ftl.asm");
    fs::write(&listing, LISTING).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("decode")
        .arg("--listing")
        .arg(&listing)
        .assert()
        .success()
        .stdout("ldr\nadd\nstr\nret\n");
}

#[test]
fn generate_renders_cycle_table_from_listings() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("ftl")).unwrap();
    fs::write(root.join("ftl/ftl.cc"), "// ftl").unwrap();
    fs::create_dir_all(root.join("listings")).unwrap();
    fs::write(root.join("listings/ftl_ftl.asm"), LISTING).unwrap();
    fs::write(root.join("catalog.json"), CATALOG).unwrap();
    let output = root.join("cpi.inc");

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("generate")
        .arg("--root")
        .arg(root)
        .arg("--catalog")
        .arg(root.join("catalog.json"))
        .arg("--listings")
        .arg(root.join("listings"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 2 entries (0 skipped, 0 failures)"));

    let body = fs::read_to_string(&output).unwrap();
    assert_eq!(
        body,
        "cpi.find(0)->second.insert(\n    {0, InstStat(0, 4, 0, 1, 0, 0, clockPeriod)});\n\
         cpi.find(0)->second.insert(\n    {1, InstStat(1, 0, 1, 0, 0, 0, clockPeriod)});\n"
    );
}

#[test]
fn generate_json_includes_metadata_and_skips() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("listings")).unwrap();
    fs::write(root.join("catalog.json"), CATALOG).unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("generate")
        .arg("--json")
        .arg("--root")
        .arg(root)
        .arg("--catalog")
        .arg(root.join("catalog.json"))
        .arg("--listings")
        .arg(root.join("listings"))
        .output()
        .expect("run instcount");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["reports"].as_array().unwrap().len(), 0);
    assert_eq!(value["skipped"].as_array().unwrap().len(), 2);
    assert!(value["metadata"]["toolchain"].is_null());
    assert_eq!(value["metadata"]["sources"][0]["source_file"], "ftl/ftl.cc");
    assert!(value["metadata"]["sources"][0]["sha256"].is_null());
}

#[test]
fn list_functions_and_patterns_use_builtins() {
    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("list-functions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Functions (82 in 12 source files):"))
        .stdout(predicate::str::contains("read (ftl/ftl.cc) -> FTL::read [0, 0]"));

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("list-patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("Patterns (124):"));
}

#[test]
fn find_root_walks_up_to_marker_directories() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("simplessd");
    fs::create_dir_all(root.join("cpu/generator")).unwrap();
    fs::create_dir_all(root.join("hil")).unwrap();

    let expected = root.canonicalize().unwrap();
    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("find-root")
        .arg("--start")
        .arg(root.join("cpu/generator"))
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn find_root_fails_without_markers() {
    let temp = tempdir().unwrap();
    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("find-root")
        .arg("--start")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to locate project root"));
}

#[test]
fn init_config_writes_json_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("instcount.json");

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["toolchain"]["cxx"], "aarch64-linux-gnu-g++");

    assert_cmd::cargo::cargo_bin_cmd!("instcount")
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
