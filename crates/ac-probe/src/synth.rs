//! Source synthesis for the two kinds the dispatcher composes itself
//! (§4.G): `Function` and `Lib` probe whether a symbol links, using the
//! classic extern-declaration-plus-`main` trampoline rather than any
//! caller-supplied body. `name` doubles as the C symbol to declare and
//! call — the data model carries no separate "function name" field, and a
//! per-check cache name is already required to be a valid, unique
//! identifier (§3), so it is safe to reuse directly here.

use ac_toolchain::CompilerFamily;

/// The extern-declaration-plus-`main` trampoline for `Function`/`Lib`
/// checks. The MSVC variant pulls in `legacy_stdio_definitions.lib` (MSVC
/// dropped several C89 symbols from its default import libraries) and
/// declares an `int`-returning prototype; everything else declares a
/// `char`-returning prototype, the traditional trick to test for a
/// symbol's existence without needing its real signature.
#[must_use]
pub fn function_probe_source(symbol: &str, family: CompilerFamily) -> String {
    match family {
        CompilerFamily::Msvc => format!(
            "#pragma comment(lib, \"legacy_stdio_definitions.lib\")\n\
             #ifdef __cplusplus\n\
             extern \"C\"\n\
             #endif\n\
             extern int {symbol}(void);\n\
             int main(void) {{ return {symbol}(); }}\n"
        ),
        CompilerFamily::Posix => format!(
            "#ifdef __cplusplus\n\
             extern \"C\"\n\
             #endif\n\
             extern char {symbol}(void);\n\
             int main(void) {{ return {symbol}(); }}\n"
        ),
    }
}
