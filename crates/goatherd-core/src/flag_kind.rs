//! Supported flag kinds and their handler table.
//!
//! The set is closed: a parameter whose Go type has no entry here cannot be
//! turned into a flag. Emitters pick the CLI flag type and the getter from
//! the handler instead of inspecting types at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    Bool,
    Int,
    OptionalInt,
    Float64,
    OptionalFloat64,
    String,
    OptionalString,
    StringSlice,
}

/// How one flag kind is declared and read by the generated CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagHandler {
    pub kind: FlagKind,
    /// Go type the kind is selected for.
    pub go_type: &'static str,
    /// Flag constructor in the CLI runtime.
    pub cli_flag: &'static str,
    /// Context getter returning the parsed value.
    pub getter: &'static str,
    /// Omitting the flag is valid even without a default.
    pub optional: bool,
}

const HANDLERS: [FlagHandler; 8] = [
    FlagHandler {
        kind: FlagKind::Bool,
        go_type: "bool",
        cli_flag: "BoolFlag",
        getter: "Bool",
        optional: true,
    },
    FlagHandler {
        kind: FlagKind::Int,
        go_type: "int",
        cli_flag: "IntFlag",
        getter: "Int",
        optional: false,
    },
    FlagHandler {
        kind: FlagKind::OptionalInt,
        go_type: "*int",
        cli_flag: "IntFlag",
        getter: "Int",
        optional: true,
    },
    FlagHandler {
        kind: FlagKind::Float64,
        go_type: "float64",
        cli_flag: "Float64Flag",
        getter: "Float64",
        optional: false,
    },
    FlagHandler {
        kind: FlagKind::OptionalFloat64,
        go_type: "*float64",
        cli_flag: "Float64Flag",
        getter: "Float64",
        optional: true,
    },
    FlagHandler {
        kind: FlagKind::String,
        go_type: "string",
        cli_flag: "StringFlag",
        getter: "String",
        optional: false,
    },
    FlagHandler {
        kind: FlagKind::OptionalString,
        go_type: "*string",
        cli_flag: "StringFlag",
        getter: "String",
        optional: true,
    },
    FlagHandler {
        kind: FlagKind::StringSlice,
        go_type: "[]string",
        cli_flag: "StringSliceFlag",
        getter: "StringSlice",
        optional: false,
    },
];

impl FlagKind {
    pub const ALL: [FlagKind; 8] = [
        FlagKind::Bool,
        FlagKind::Int,
        FlagKind::OptionalInt,
        FlagKind::Float64,
        FlagKind::OptionalFloat64,
        FlagKind::String,
        FlagKind::OptionalString,
        FlagKind::StringSlice,
    ];

    /// Select the kind for a printed Go type.
    pub fn from_go_type(ty: &str) -> Option<Self> {
        HANDLERS.iter().find(|h| h.go_type == ty).map(|h| h.kind)
    }

    pub fn handler(self) -> &'static FlagHandler {
        &HANDLERS[self as usize]
    }

    pub fn go_type(self) -> &'static str {
        self.handler().go_type
    }

    /// Go types that have a handler, for "did you mean" style hints.
    pub fn supported_types() -> impl Iterator<Item = &'static str> {
        HANDLERS.iter().map(|h| h.go_type)
    }
}
