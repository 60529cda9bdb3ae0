//! Check configuration.

use bitflags::bitflags;

use crate::exclusions::Exclusions;

bitflags! {
    /// Optional diagnostics.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CheckFlags: u8 {
        /// Report failure values assigned to `_`.
        const BLANK = 1 << 0;
        /// Report type assertions whose `ok` result is not read.
        const ASSERTS = 1 << 1;
    }
}

/// Everything that shapes one check run.
#[derive(Clone, Debug, Default)]
pub struct CheckConfig {
    pub flags: CheckFlags,
    pub exclusions: Exclusions,
}

impl CheckConfig {
    pub fn new(flags: CheckFlags, exclusions: Exclusions) -> Self {
        CheckConfig { flags, exclusions }
    }

    pub fn blank(&self) -> bool {
        self.flags.contains(CheckFlags::BLANK)
    }

    pub fn asserts(&self) -> bool {
        self.flags.contains(CheckFlags::ASSERTS)
    }
}
