use instcount_core::listing::{
    decode, mangled_label, match_function_boundary, Boundary, Extractor, ExtractorState, LineKind,
};

#[test]
fn decode_returns_bare_mnemonic() {
    assert_eq!(decode("  400a10:\t1e601000\tFMOV\tD0, D1"), "FMOV");
    assert_eq!(decode("  4c:\t54000061 \tb.ne\t58 <_ZN3FTL4readEv+0x58>  // b.any"), "b.ne");
    assert_eq!(decode("   0:\td65f03c0 \tret"), "ret");
}

#[test]
fn decode_ignores_non_instruction_lines() {
    assert_eq!(decode(""), "");
    assert_eq!(decode("  400a10:\t1e601000"), "");
    assert_eq!(decode("0000000000400a00 <4read>:"), "");
    assert_eq!(decode("Disassembly of section .text:"), "");
    assert_eq!(decode("    uint64_t lpn = req.lpn;"), "");
}

#[test]
fn mangled_label_prefixes_byte_length() {
    assert_eq!(mangled_label("read"), "4read");
    assert_eq!(mangled_label("doGarbageCollection"), "19doGarbageCollection");
    assert_eq!(mangled_label("_readDMASetup"), "13_readDMASetup");
}

#[test]
fn boundary_matching_distinguishes_target_other_and_non_headers() {
    let label = mangled_label("read");
    assert_eq!(
        match_function_boundary("0000000000400a00 <4read>:", &label),
        Boundary::EnterOrContinue
    );
    assert_eq!(
        match_function_boundary(
            "0000000000000120 <_ZN8SimpleSSD3FTL3FTL4readERNS0_7RequestERm>:",
            &label
        ),
        Boundary::EnterOrContinue
    );
    assert_eq!(
        match_function_boundary("0000000000000200 <_ZN8SimpleSSD3FTL3FTL5writeEv>:", &label),
        Boundary::Exit
    );
    assert_eq!(
        match_function_boundary("  400a10:\t1e601000\tFMOV\tD0, D1", &label),
        Boundary::NotBoundary
    );
    // Short addresses are not headers.
    assert_eq!(match_function_boundary("00400a00 <4read>:", &label), Boundary::NotBoundary);
}

#[test]
fn extractor_walks_outside_inside_outside() {
    let mut ex = Extractor::new("read");
    assert_eq!(ex.state(), ExtractorState::Outside);

    assert_eq!(ex.feed("   0:\t91000400 \tadd\tx0, x0, #0x1"), LineKind::Skipped);
    assert_eq!(ex.feed("0000000000400a00 <4read>:"), LineKind::Header);
    assert_eq!(ex.state(), ExtractorState::Inside);

    assert_eq!(ex.feed("  400a00:\tf9400000 \tldr\tx0, [x0]"), LineKind::Instruction("ldr"));
    assert_eq!(ex.feed("    return value;"), LineKind::Skipped);
    assert_eq!(ex.feed(""), LineKind::Skipped);
    // A repeated header for the same label keeps collecting.
    assert_eq!(ex.feed("0000000000400a00 <4read>:"), LineKind::Header);
    assert_eq!(ex.state(), ExtractorState::Inside);

    assert_eq!(ex.feed("0000000000400b00 <5write>:"), LineKind::Header);
    assert_eq!(ex.state(), ExtractorState::Outside);
    assert_eq!(ex.feed("  400b00:\t91000400 \tadd\tx0, x0, #0x1"), LineKind::Skipped);
}

#[test]
fn extractor_re_enters_on_later_matching_header() {
    let mut ex = Extractor::new("read");
    ex.feed("0000000000000000 <_ZN3FTL4readEv>:");
    ex.feed("0000000000000040 <_ZN3FTL5writeEv>:");
    assert_eq!(ex.state(), ExtractorState::Outside);
    ex.feed("0000000000000080 <_ZN3FTL4readEv.part.0>:");
    assert_eq!(ex.state(), ExtractorState::Inside);
    assert_eq!(ex.label(), "4read");
}
