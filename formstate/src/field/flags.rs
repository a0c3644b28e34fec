//! Status flags shared by fields and the form aggregate.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Key under which a host finds the ordered field list. Reserved.
pub const FIELD_LIST_KEY: &str = "$fields";

/// One of the seven status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Invalid,
    Valid,
    Untouched,
    Touched,
    Pristine,
    Dirty,
    Modified,
}

impl Flag {
    pub const ALL: [Flag; 7] = [
        Flag::Invalid,
        Flag::Valid,
        Flag::Untouched,
        Flag::Touched,
        Flag::Pristine,
        Flag::Dirty,
        Flag::Modified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Invalid => "invalid",
            Flag::Valid => "valid",
            Flag::Untouched => "untouched",
            Flag::Touched => "touched",
            Flag::Pristine => "pristine",
            Flag::Dirty => "dirty",
            Flag::Modified => "modified",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::ALL.into_iter().find(|flag| flag.as_str() == s).ok_or(())
    }
}

/// Whether a name belongs to the reserved vocabulary (field list key or a flag).
pub fn is_reserved(name: &str) -> bool {
    name == FIELD_LIST_KEY || name.parse::<Flag>().is_ok()
}

/// The seven status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusFlags {
    pub invalid: bool,
    pub valid: bool,
    pub untouched: bool,
    pub touched: bool,
    pub pristine: bool,
    pub dirty: bool,
    pub modified: bool,
}

impl StatusFlags {
    /// State of a freshly registered field.
    pub const INITIAL: StatusFlags = StatusFlags {
        invalid: false,
        valid: true,
        untouched: true,
        touched: false,
        pristine: true,
        dirty: false,
        modified: false,
    };

    /// Starting point of the aggregate fold. `touched` starts set because
    /// the fold only ever clears it.
    pub const AGGREGATE_BASELINE: StatusFlags = StatusFlags {
        touched: true,
        ..StatusFlags::INITIAL
    };

    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Invalid => self.invalid,
            Flag::Valid => self.valid,
            Flag::Untouched => self.untouched,
            Flag::Touched => self.touched,
            Flag::Pristine => self.pristine,
            Flag::Dirty => self.dirty,
            Flag::Modified => self.modified,
        }
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self::INITIAL
    }
}
