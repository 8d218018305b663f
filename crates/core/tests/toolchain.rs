use std::ffi::OsString;
use std::path::Path;

use instcount_core::toolchain::{GnuToolchain, ToolchainConfig, CXX_ENV, OBJDUMP_ENV};

#[test]
fn compile_args_follow_configured_flags() {
    let toolchain = GnuToolchain::new(ToolchainConfig::default());
    let root = Path::new("/src/simplessd");
    let args = toolchain.compile_args(
        &root.join("ftl/ftl.cc"),
        Path::new("/tmp/build/ftl_ftl.o"),
        root,
    );
    let expected: Vec<OsString> = [
        "-std=c++11",
        "-O2",
        "-g",
        "-I/src/simplessd",
        "-I/src/simplessd/../../../../ext/drampower/src",
        "-I/src/simplessd/../lib/drampower/src",
        "-c",
        "/src/simplessd/ftl/ftl.cc",
        "-o",
        "/tmp/build/ftl_ftl.o",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    assert_eq!(args, expected);
}

#[test]
fn compile_args_honor_debug_info_and_extra_flags() {
    let config = ToolchainConfig {
        debug_info: false,
        include_dirs: vec![],
        extra_flags: vec!["-DNDEBUG".into(), "-fno-inline".into()],
        opt_level: "s".into(),
        ..ToolchainConfig::default()
    };
    let toolchain = GnuToolchain::new(config);
    let args = toolchain.compile_args(Path::new("a.cc"), Path::new("a.o"), Path::new("/r"));
    assert!(!args.contains(&OsString::from("-g")));
    assert!(args.contains(&OsString::from("-Os")));
    assert!(args.contains(&OsString::from("-DNDEBUG")));
    assert!(args.contains(&OsString::from("-fno-inline")));
}

#[test]
fn disassemble_args_request_source_interleaving() {
    let toolchain = GnuToolchain::new(ToolchainConfig::default());
    let args = toolchain.disassemble_args(Path::new("x.o"));
    assert_eq!(args, vec![OsString::from("-S"), OsString::from("-d"), OsString::from("x.o")]);
}

#[test]
fn env_overrides_replace_tool_binaries() {
    std::env::set_var(CXX_ENV, "clang++-17");
    std::env::set_var(OBJDUMP_ENV, "llvm-objdump");
    let config = ToolchainConfig::default().with_env_overrides();
    std::env::remove_var(CXX_ENV);
    std::env::remove_var(OBJDUMP_ENV);

    assert_eq!(config.cxx, "clang++-17");
    assert_eq!(config.objdump, "llvm-objdump");
}

#[cfg(unix)]
#[test]
fn gnu_toolchain_runs_external_tools() {
    use instcount_core::toolchain::{Toolchain, ToolchainError};
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    let temp = tempfile::tempdir().unwrap();
    let fixture = temp.path().join("fixture.asm");
    std::fs::write(&fixture, "0000000000000000 <_ZN3FTL4readEv>:\n   0:\td65f03c0 \tret\n")
        .unwrap();
    let cxx = write_script(
        temp.path(),
        "fake-cxx",
        "out=\"\"\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-o\" ]; then out=\"$2\"; fi\n  shift\ndone\nprintf obj > \"$out\"\n",
    );
    let objdump =
        write_script(temp.path(), "fake-objdump", &format!("cat '{}'\n", fixture.display()));
    let broken = write_script(temp.path(), "broken-cxx", "echo 'error: boom' >&2\nexit 1\n");

    let toolchain = GnuToolchain::new(ToolchainConfig {
        cxx: cxx.display().to_string(),
        objdump: objdump.display().to_string(),
        ..ToolchainConfig::default()
    });
    let source = temp.path().join("ftl.cc");
    std::fs::write(&source, "int x;").unwrap();
    let object = temp.path().join("ftl.o");
    let listing = temp.path().join("ftl.asm");

    toolchain.compile(&source, &object, temp.path()).expect("fake compile");
    assert_eq!(std::fs::read_to_string(&object).unwrap(), "obj");
    toolchain.disassemble(&object, &listing).expect("fake disassemble");
    assert!(std::fs::read_to_string(&listing).unwrap().contains("<_ZN3FTL4readEv>"));

    let failing = GnuToolchain::new(ToolchainConfig {
        cxx: broken.display().to_string(),
        ..ToolchainConfig::default()
    });
    let err = failing.compile(&source, &object, temp.path()).unwrap_err();
    assert!(matches!(err, ToolchainError::Failed { .. }));
    assert!(err.output().unwrap_or_default().contains("error: boom"));

    let missing = GnuToolchain::new(ToolchainConfig {
        cxx: temp.path().join("no-such-compiler").display().to_string(),
        ..ToolchainConfig::default()
    });
    let err = missing.compile(&source, &object, temp.path()).unwrap_err();
    assert!(matches!(err, ToolchainError::Spawn { .. }));
}
