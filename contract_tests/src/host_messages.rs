//! Host to guest contract tests
//!
//! These tests define the stable frames the guest accepts.

// ===== Command Tags =====
#[allow(dead_code)]
const COMMAND_FILE_SELECTED: &str = "fileSelected";
#[allow(dead_code)]
const COMMAND_EXPORT_PROGRESS: &str = "exportProgress";
#[allow(dead_code)]
const COMMAND_EXPORT_COMPLETE: &str = "exportComplete";
#[allow(dead_code)]
const COMMAND_ERROR: &str = "error";

// ===== Contract Tests =====
