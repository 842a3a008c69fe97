//! Built-in scenario defaults. A YAML scenario file overrides any of these.

/// Endpoint the built-in scenario posts to.
pub const DEFAULT_TARGET_URL: &str = "http://localhost:8000/discord/article";
/// Status code the default check asserts.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

pub const DEFAULT_VUS: u32 = 12;
pub const DEFAULT_DURATION_SECS: u64 = 60;
/// End-of-iteration pause, in seconds.
pub const DEFAULT_PACING_SECS: f64 = 1.0;

pub const DEFAULT_PAYLOAD_USER: &str = "test";
pub const DEFAULT_PAYLOAD_FILE: &str = "sample.txt";

/// Where the read-only status API binds.
pub const STATUS_API_ADDR: &str = "127.0.0.1:6565";
