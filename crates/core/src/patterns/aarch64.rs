use crate::model::Category::{self, Arithmetic, Branch, FloatingPoint, Load, Other, Store};

/// AArch64 mnemonic rules as `(pattern, cost, category)`.
///
/// Evaluated first-match: a rule shadows every later rule that would also
/// match the whole mnemonic, so more specific patterns go first.
pub const AARCH64_RULES: &[(&str, u32, Category)] = &[
    ("NOP", 1, Other),
    ("CAS[B|H|P|]", 1, Other),
    ("SWP[B|H|]", 1, Other),
    // Branch
    (r"B\.(EQ|NE|CS|HS|CC|LO|MI|PL|VS|VC|HI|LS|GE|LT|GT|LE|AL|NV)", 1, Branch),
    ("CBN?Z", 1, Branch),
    ("TBN?Z", 1, Branch),
    ("B", 1, Branch),
    ("BL", 1, Branch),
    ("BLR", 2, Branch),
    ("BR", 1, Branch),
    ("RET", 1, Branch),
    // Load
    ("LDR(B|SB|H|SH|SW|)", 4, Load),
    ("LDUR(B|SB|H|SH|SW|)", 4, Load),
    ("LDP(SW|)", 4, Load),
    ("LDNP", 4, Load),
    ("LDTR(B|SB|H|SH|SW|)", 4, Load),
    ("LDXR(B|H|)", 4, Load),
    ("LDXP", 4, Load),
    ("LDAPR(B|H|)", 4, Load),
    ("LDAR(B|H|)", 4, Load),
    ("LDAXR(B|H|)", 4, Load),
    ("LDAXP", 4, Load),
    ("LDLAR(B|H|)", 4, Load),
    // Store
    ("STR(B|H|)", 1, Store),
    ("STUR(B|H|)", 1, Store),
    ("STP", 2, Store),
    ("STNP", 2, Store),
    ("STTR(B|H|)", 1, Store),
    ("STXR(B|H|)", 1, Store),
    ("STXP", 1, Store),
    ("STLR(B|H|)", 1, Store),
    ("STLXR(B|H|)", 1, Store),
    ("STLXP", 1, Store),
    ("STLLR(B|H|)", 1, Store),
    // Arithmetic
    ("ADD(S|)", 1, Arithmetic),
    ("SUB(S|)", 1, Arithmetic),
    ("CMP", 1, Arithmetic),
    ("CMN", 1, Arithmetic),
    ("AND(S|)", 1, Arithmetic),
    ("EOR", 1, Arithmetic),
    ("ORR", 1, Arithmetic),
    ("TST", 1, Arithmetic),
    ("MOV(Z|N|K|)", 1, Arithmetic),
    ("ADR(P|)", 1, Arithmetic),
    ("BFM", 2, Arithmetic),
    ("SBFM", 2, Arithmetic),
    ("UBFM", 2, Arithmetic),
    ("BFC", 2, Arithmetic),
    ("BFI", 2, Arithmetic),
    ("BFXIL", 1, Arithmetic),
    ("SBFIZ", 2, Arithmetic),
    ("SBFX", 1, Arithmetic),
    ("UBFIZ", 2, Arithmetic),
    ("UBFX", 1, Arithmetic),
    ("EXTR", 1, Arithmetic),
    ("ASR(V|)", 1, Arithmetic),
    ("LSL(V|)", 1, Arithmetic),
    ("LSR(V|)", 1, Arithmetic),
    ("ROR(V|)", 1, Arithmetic),
    ("SXT(B|H|W|)", 2, Arithmetic),
    ("UXT(B|H|)", 2, Arithmetic),
    ("NEG(S|)", 1, Arithmetic),
    ("ADC(S|)", 1, Arithmetic),
    ("SBC(S|)", 1, Arithmetic),
    ("NGC(S|)", 1, Arithmetic),
    ("BIC(S|)", 1, Arithmetic),
    ("EON", 1, Arithmetic),
    ("MNV", 1, Arithmetic),
    ("ORN", 1, Arithmetic),
    // Multiply and divide
    ("MADD", 3, Arithmetic),
    ("MSUB", 3, Arithmetic),
    ("MNEG", 3, Arithmetic),
    ("MUL", 3, Arithmetic),
    ("SMADDL", 3, Arithmetic),
    ("SMSUBL", 3, Arithmetic),
    ("SMNEGL", 3, Arithmetic),
    ("SMULL", 3, Arithmetic),
    ("SMULH", 6, Arithmetic),
    ("UMADDL", 3, Arithmetic),
    ("UMSUBL", 3, Arithmetic),
    ("UMNEGL", 3, Arithmetic),
    ("UMULL", 3, Arithmetic),
    ("UMULH", 6, Arithmetic),
    ("SDIV", 20, Arithmetic),
    ("UDIV", 20, Arithmetic),
    // Bit operations
    ("CLS", 1, Arithmetic),
    ("CLZ", 1, Arithmetic),
    ("RBIT", 1, Arithmetic),
    ("REV(16|32|64|)", 1, Arithmetic),
    // Conditional select
    ("CSEL", 1, Arithmetic),
    ("CSINC", 1, Arithmetic),
    ("CSINV", 1, Arithmetic),
    ("CSNEG", 1, Arithmetic),
    ("CSET(M|)", 1, Arithmetic),
    ("CINC", 1, Arithmetic),
    ("CINV", 1, Arithmetic),
    ("CNEG", 1, Arithmetic),
    // Conditional comparison
    ("CCMN", 1, Arithmetic),
    ("CCMP", 1, Arithmetic),
    // Floating point
    ("FMOV", 5, FloatingPoint),
    ("FCVT(XN|)", 5, FloatingPoint),
    ("FCVT(AS|AU|MS|MU|NS|NU|PS|PU|ZS|ZU)", 10, FloatingPoint),
    ("FJCVTZS", 1, FloatingPoint),
    ("SCVTF", 10, FloatingPoint),
    ("UCVTF", 10, FloatingPoint),
    ("FRINT(A|I|M|N|P|X|Z|)", 5, FloatingPoint),
    ("FMADD", 9, FloatingPoint),
    ("FMSUB", 9, FloatingPoint),
    ("FNMADD", 9, FloatingPoint),
    ("FNMSUB", 9, FloatingPoint),
    ("FABS", 3, FloatingPoint),
    ("FNEG", 3, FloatingPoint),
    ("FSQRT", 20, FloatingPoint),
    ("FADD", 5, FloatingPoint),
    ("FDIV", 20, FloatingPoint),
    ("FMUL", 6, FloatingPoint),
    ("FNMUL", 6, FloatingPoint),
    ("FSUB", 5, FloatingPoint),
    ("FMAX", 5, FloatingPoint),
    ("FMAXNM", 5, FloatingPoint),
    ("FMIN", 5, FloatingPoint),
    ("FMINNM", 5, FloatingPoint),
    ("FCMP(E|P|PE|)", 3, FloatingPoint),
    ("FCSEL", 3, FloatingPoint),
];
