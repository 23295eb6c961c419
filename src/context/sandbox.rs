//! Sandbox flag sets.
//!
//! A context's sandbox is fixed when the context is created. A set flag means
//! the corresponding capability is *restricted*.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A single sandbox restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxFlag {
    Navigation,
    AuxiliaryNavigation,
    TopLevelNavigation,
    Plugins,
    Origin,
    Forms,
    PointerLock,
    Scripts,
    AutomaticFeatures,
    Fullscreen,
    DocumentDomain,
    Presentation,
    Modals,
    /// Auxiliary contexts may not escape the sandbox; restrictions propagate.
    PopupsEscape,
}

impl SandboxFlag {
    pub const ALL: [SandboxFlag; 14] = [
        SandboxFlag::Navigation,
        SandboxFlag::AuxiliaryNavigation,
        SandboxFlag::TopLevelNavigation,
        SandboxFlag::Plugins,
        SandboxFlag::Origin,
        SandboxFlag::Forms,
        SandboxFlag::PointerLock,
        SandboxFlag::Scripts,
        SandboxFlag::AutomaticFeatures,
        SandboxFlag::Fullscreen,
        SandboxFlag::DocumentDomain,
        SandboxFlag::Presentation,
        SandboxFlag::Modals,
        SandboxFlag::PopupsEscape,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SandboxFlag::Navigation => "navigation",
            SandboxFlag::AuxiliaryNavigation => "auxiliary-navigation",
            SandboxFlag::TopLevelNavigation => "top-level-navigation",
            SandboxFlag::Plugins => "plugins",
            SandboxFlag::Origin => "origin",
            SandboxFlag::Forms => "forms",
            SandboxFlag::PointerLock => "pointer-lock",
            SandboxFlag::Scripts => "scripts",
            SandboxFlag::AutomaticFeatures => "automatic-features",
            SandboxFlag::Fullscreen => "fullscreen",
            SandboxFlag::DocumentDomain => "document-domain",
            SandboxFlag::Presentation => "presentation",
            SandboxFlag::Modals => "modals",
            SandboxFlag::PopupsEscape => "popups-escape",
        }
    }
}

impl fmt::Display for SandboxFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SandboxFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SandboxFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sandbox flag: {}", s))
    }
}

/// Set of sandbox restrictions. `Sandbox::NONE` is an unsandboxed context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sandbox(u16);

impl Sandbox {
    pub const NONE: Sandbox = Sandbox(0);

    /// Every restriction set at once (an `<iframe sandbox>` with no tokens).
    pub fn all() -> Self {
        SandboxFlag::ALL.iter().copied().collect()
    }

    pub fn contains(self, flag: SandboxFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn with(self, flag: SandboxFlag) -> Self {
        Sandbox(self.0 | flag.bit())
    }

    pub fn without(self, flag: SandboxFlag) -> Self {
        Sandbox(self.0 & !flag.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn flags(self) -> impl Iterator<Item = SandboxFlag> {
        SandboxFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl From<SandboxFlag> for Sandbox {
    fn from(flag: SandboxFlag) -> Self {
        Sandbox(flag.bit())
    }
}

impl FromIterator<SandboxFlag> for Sandbox {
    fn from_iter<I: IntoIterator<Item = SandboxFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Sandbox::NONE, Sandbox::with)
    }
}

impl BitOr for Sandbox {
    type Output = Sandbox;

    fn bitor(self, rhs: Sandbox) -> Sandbox {
        Sandbox(self.0 | rhs.0)
    }
}

impl BitOr<SandboxFlag> for Sandbox {
    type Output = Sandbox;

    fn bitor(self, rhs: SandboxFlag) -> Sandbox {
        self.with(rhs)
    }
}

impl BitOrAssign<SandboxFlag> for Sandbox {
    fn bitor_assign(&mut self, rhs: SandboxFlag) {
        *self = self.with(rhs);
    }
}

impl fmt::Display for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.flags().map(SandboxFlag::as_str).collect();
        f.write_str(&names.join(" "))
    }
}

impl FromStr for Sandbox {
    type Err = String;

    /// Parses a whitespace- or comma-separated list of flag names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(Sandbox::NONE);
        }
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(SandboxFlag::from_str)
            .collect()
    }
}
