//! 8.3 short-path rendering for diagnostic command-line logging (§4.F,
//! "Command quoting"). Only the compiler/linker path (the first token of
//! the assembled shell string) is converted, to avoid a space in an
//! install path being mis-parsed by a shell that later pastes the logged
//! line back in. This never touches the real invocation — `ac_utils`
//! spawns via argv, not a shell string.

#[cfg(windows)]
pub fn short_path(path: &str) -> String {
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::GetShortPathNameW;

    let wide: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
    let mut buf = vec![0u16; 260];
    // SAFETY: `wide` is NUL-terminated and `buf` is sized for the call;
    // the Win32 API writes at most `buf.len()` UTF-16 units into it.
    let len = unsafe { GetShortPathNameW(PCWSTR(wide.as_ptr()), Some(&mut buf)) };
    if len == 0 || len as usize > buf.len() {
        return path.to_string();
    }
    String::from_utf16_lossy(&buf[..len as usize])
}

#[cfg(not(windows))]
pub fn short_path(path: &str) -> String {
    path.to_string()
}
