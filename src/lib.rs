// lib.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Root level module that imports the feature modules.

pub mod firmware;
