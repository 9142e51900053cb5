//! Terminal mode detection.
//!
//! Detection is split in two: [`EnvProbe::from_env`] gathers the raw signals
//! (the only part that touches the process environment) and [`detect_mode`]
//! is a pure function over that snapshot. Any ambiguity resolves to
//! [`TerminalMode::DegradedAscii`].

use terminal_toys_types::{Platform, TerminalMode};

/// Environment variable that forces a mode (`ascii`/`degraded` or `ansi`/`native`).
pub const MODE_OVERRIDE_VAR: &str = "TERMINAL_TOYS_MODE";

/// Kernel-release marker of WSL, whose console mishandles cursor addressing.
const WSL_MARKER: &str = "microsoft";

/// Snapshot of the signals mode detection looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProbe {
    pub platform: Platform,
    /// Kernel version/release string, when readable.
    pub kernel: Option<String>,
    /// Value of `TERM`.
    pub term: Option<String>,
    /// Value of [`MODE_OVERRIDE_VAR`].
    pub mode_override: Option<String>,
}

impl EnvProbe {
    pub fn from_env() -> Self {
        Self {
            platform: Platform::current(),
            kernel: read_kernel_release(),
            term: std::env::var("TERM").ok(),
            mode_override: std::env::var(MODE_OVERRIDE_VAR).ok(),
        }
    }

    /// Whether the kernel string carries the WSL compatibility marker.
    pub fn is_wsl(&self) -> bool {
        self.kernel
            .as_deref()
            .map(|k| k.to_lowercase().contains(WSL_MARKER))
            .unwrap_or(false)
    }
}

fn read_kernel_release() -> Option<String> {
    if cfg!(windows) {
        return None;
    }
    ["/proc/version", "/proc/sys/kernel/osrelease"]
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())
}

/// Decide the rendering mode. First matching rule wins:
///
/// 1. a recognised override value;
/// 2. `TERM=dumb` forces degraded;
/// 3. the WSL marker forces degraded;
/// 4. Windows consoles are driven natively;
/// 5. POSIX with a non-empty `TERM` is native;
/// 6. otherwise degraded.
pub fn detect_mode(probe: &EnvProbe) -> TerminalMode {
    if let Some(mode) = probe
        .mode_override
        .as_deref()
        .and_then(TerminalMode::from_str)
    {
        return mode;
    }

    let term = probe.term.as_deref().map(str::trim).unwrap_or("");
    if term.eq_ignore_ascii_case("dumb") {
        return TerminalMode::DegradedAscii;
    }

    if probe.is_wsl() {
        return TerminalMode::DegradedAscii;
    }

    match probe.platform {
        Platform::Windows => TerminalMode::NativeAnsi,
        Platform::Posix if !term.is_empty() => TerminalMode::NativeAnsi,
        Platform::Posix => TerminalMode::DegradedAscii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn probe(platform: Platform, kernel: Option<&str>, term: Option<&str>) -> EnvProbe {
        EnvProbe {
            platform,
            kernel: kernel.map(str::to_string),
            term: term.map(str::to_string),
            mode_override: None,
        }
    }

    const LINUX: &str = "Linux version 6.5.0-generic (gcc 12.3.0)";
    const WSL: &str = "Linux version 5.15.90.1-microsoft-standard-WSL2";

    #[test]
    fn native_on_plain_posix_terminal() {
        let p = probe(Platform::Posix, Some(LINUX), Some("xterm-256color"));
        assert_eq!(detect_mode(&p), TerminalMode::NativeAnsi);
    }

    #[test]
    fn wsl_kernel_degrades() {
        let p = probe(Platform::Posix, Some(WSL), Some("xterm-256color"));
        assert!(p.is_wsl());
        assert_eq!(detect_mode(&p), TerminalMode::DegradedAscii);
    }

    #[test]
    fn dumb_or_missing_term_degrades() {
        let dumb = probe(Platform::Posix, Some(LINUX), Some("dumb"));
        assert_eq!(detect_mode(&dumb), TerminalMode::DegradedAscii);

        let missing = probe(Platform::Posix, None, None);
        assert_eq!(detect_mode(&missing), TerminalMode::DegradedAscii);

        let blank = probe(Platform::Posix, Some(LINUX), Some("  "));
        assert_eq!(detect_mode(&blank), TerminalMode::DegradedAscii);
    }

    #[test]
    fn windows_console_is_native_without_term() {
        let p = probe(Platform::Windows, None, None);
        assert_eq!(detect_mode(&p), TerminalMode::NativeAnsi);
    }

    #[test]
    fn override_wins_in_both_directions() {
        let mut p = probe(Platform::Posix, Some(WSL), None);
        p.mode_override = Some("native".into());
        assert_eq!(detect_mode(&p), TerminalMode::NativeAnsi);

        let mut p = probe(Platform::Posix, Some(LINUX), Some("xterm"));
        p.mode_override = Some("ASCII".into());
        assert_eq!(detect_mode(&p), TerminalMode::DegradedAscii);
    }

    #[test]
    fn unrecognised_override_is_ignored() {
        let mut p = probe(Platform::Posix, Some(LINUX), Some("xterm"));
        p.mode_override = Some("sixel".into());
        assert_eq!(detect_mode(&p), TerminalMode::NativeAnsi);
    }

    #[test]
    fn from_env_does_not_panic() {
        let p = EnvProbe::from_env();
        let mode = detect_mode(&p);
        assert!(matches!(
            mode,
            TerminalMode::NativeAnsi | TerminalMode::DegradedAscii
        ));
    }

    proptest! {
        #[test]
        fn detection_is_total_and_deterministic(
            windows in any::<bool>(),
            kernel in proptest::option::of(".{0,40}"),
            term in proptest::option::of(".{0,16}"),
            mode_override in proptest::option::of(".{0,10}"),
        ) {
            let p = EnvProbe {
                platform: if windows { Platform::Windows } else { Platform::Posix },
                kernel,
                term,
                mode_override,
            };
            let first = detect_mode(&p);
            prop_assert_eq!(first, detect_mode(&p));
        }
    }
}
