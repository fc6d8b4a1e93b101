//! Per-compiler-family command construction (§4.F, "Per-compiler-family
//! mapping"). The two families are assembled from the same
//! [`ToolchainConfig`] fields but disagree on flag spelling: MSVC takes
//! `/c`/`/Fo`/`/OUT:`/`/Fe` and bare `<lib>.lib`; everything else
//! (gcc/clang-style, the `Posix` family) takes `-c … -o`/`-o`/`-l<lib>`.

use ac_toolchain::{CompilerFamily, ToolchainConfig};
use ac_utils::process::CommandSpec;
use camino::Utf8Path;

fn compiler_and_flags(toolchain: &ToolchainConfig, is_cpp: bool) -> (&str, Vec<String>) {
    if is_cpp {
        (toolchain.cpp_compiler.as_str(), toolchain.cpp_flags_filtered())
    } else {
        (toolchain.c_compiler.as_str(), toolchain.c_flags_filtered())
    }
}

fn link_flags(toolchain: &ToolchainConfig, is_cpp: bool) -> Vec<String> {
    if is_cpp {
        toolchain.cpp_link_flags_filtered()
    } else {
        toolchain.c_link_flags_filtered()
    }
}

/// Compile `src` to an object file at `obj`. Never links.
#[must_use]
pub fn compile_only(
    toolchain: &ToolchainConfig,
    family: CompilerFamily,
    is_cpp: bool,
    src: &Utf8Path,
    obj: &Utf8Path,
) -> CommandSpec {
    let (compiler, flags) = compiler_and_flags(toolchain, is_cpp);
    match family {
        CompilerFamily::Msvc => CommandSpec::new(compiler)
            .arg("/c")
            .arg(src.as_str())
            .args(flags)
            .arg(format!("/Fo{obj}")),
        CompilerFamily::Posix => CommandSpec::new(compiler)
            .args(flags)
            .arg("-c")
            .arg(src.as_str())
            .arg("-o")
            .arg(obj.as_str()),
    }
}

/// Link an object file at `obj` into an executable at `exe` via the
/// configured linker, appending the library argument for `Lib` probes.
#[must_use]
pub fn link_only(
    toolchain: &ToolchainConfig,
    family: CompilerFamily,
    is_cpp: bool,
    obj: &Utf8Path,
    exe: &Utf8Path,
    library: Option<&str>,
) -> CommandSpec {
    let flags = link_flags(toolchain, is_cpp);
    match family {
        CompilerFamily::Msvc => {
            let mut cmd = CommandSpec::new(&toolchain.linker)
                .arg(obj.as_str())
                .arg(format!("/OUT:{exe}"))
                .args(flags);
            if let Some(lib) = library {
                cmd = cmd.arg(format!("{lib}.lib"));
            }
            cmd
        }
        CompilerFamily::Posix => {
            let mut cmd = CommandSpec::new(&toolchain.linker)
                .arg(obj.as_str())
                .arg("-o")
                .arg(exe.as_str())
                .args(flags);
            if let Some(lib) = library {
                cmd = cmd.arg(format!("-l{lib}"));
            }
            cmd
        }
    }
}

/// Render a [`CommandSpec`] as a shell-quoted diagnostic string: any
/// argument containing whitespace is quoted, and on the Windows family the
/// program token is rewritten to its 8.3 short form (§4.F, "Command
/// quoting"). For logging only — actual execution never goes through a
/// shell.
#[must_use]
pub fn render_for_log(cmd: &CommandSpec, family: CompilerFamily) -> String {
    let program = cmd.program.to_string_lossy().into_owned();
    let program = match family {
        CompilerFamily::Msvc => crate::windows_path::short_path(&program),
        CompilerFamily::Posix => program,
    };
    let mut tokens = vec![program];
    tokens.extend(cmd.args.iter().map(|a| a.to_string_lossy().into_owned()));
    shell_words::join(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain(compiler_type: &str) -> ToolchainConfig {
        ToolchainConfig {
            c_compiler: "cc".into(),
            cpp_compiler: "c++".into(),
            linker: "cc".into(),
            c_flags: vec!["-O2".into()],
            cpp_flags: vec![],
            c_link_flags: vec!["-lm".into()],
            cpp_link_flags: vec![],
            compiler_type: compiler_type.into(),
        }
    }

    #[test]
    fn posix_compile_only_uses_dash_c_dash_o() {
        let tc = toolchain("gcc");
        let cmd = compile_only(
            &tc,
            CompilerFamily::Posix,
            false,
            Utf8Path::new("/tmp/x.c"),
            Utf8Path::new("/tmp/x.o"),
        );
        let rendered = render_for_log(&cmd, CompilerFamily::Posix);
        assert_eq!(rendered, "cc -O2 -c /tmp/x.c -o /tmp/x.o");
    }

    #[test]
    fn msvc_compile_only_uses_slash_c_slash_fo() {
        let tc = toolchain("msvc-19");
        let cmd = compile_only(
            &tc,
            CompilerFamily::Msvc,
            false,
            Utf8Path::new("x.c"),
            Utf8Path::new("x.obj"),
        );
        assert_eq!(
            cmd.args,
            vec!["/c", "x.c", "-O2", "/Fox.obj"]
                .into_iter()
                .map(std::ffi::OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn posix_link_appends_dash_l_for_lib_probes() {
        let tc = toolchain("clang");
        let cmd = link_only(
            &tc,
            CompilerFamily::Posix,
            false,
            Utf8Path::new("x.o"),
            Utf8Path::new("x"),
            Some("pthread"),
        );
        let rendered = render_for_log(&cmd, CompilerFamily::Posix);
        assert!(rendered.ends_with("-lm -lpthread"));
    }

    #[test]
    fn msvc_link_appends_dot_lib_and_slash_out() {
        let tc = toolchain("msvc-19");
        let cmd = link_only(
            &tc,
            CompilerFamily::Msvc,
            false,
            Utf8Path::new("x.obj"),
            Utf8Path::new("x.exe"),
            Some("ws2_32"),
        );
        assert!(cmd.args.contains(&std::ffi::OsString::from("/OUT:x.exe")));
        assert!(cmd.args.contains(&std::ffi::OsString::from("ws2_32.lib")));
    }
}
