//! # System info probe
//!
//! Populates the START record's `system` object (hostname, platform,
//! cpu_count, engine identity). Grounded in the same `sysinfo` crate the
//! grounding codebase uses for hardware telemetry, trimmed down to the
//! handful of fields the logging contract needs.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub cpu_count: usize,
    pub engine: String,
}

impl SystemInfo {
    pub fn probe() -> Self {
        SystemInfo {
            hostname: sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            cpu_count: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            engine: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_returns_nonempty_fields() {
        let info = SystemInfo::probe();
        assert!(!info.hostname.is_empty());
        assert!(!info.platform.is_empty());
        assert!(info.cpu_count >= 1);
        assert!(info.engine.contains('/'));
    }
}
