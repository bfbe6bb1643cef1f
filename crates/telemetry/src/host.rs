//! Host identity and memory counters shared by every provider.
//!
//! Thin wrappers over `sysinfo` and `hostname`. Each call takes a fresh
//! sample; nothing is cached between queries.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Raw memory and swap counters in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemoryCounters {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

impl MemoryCounters {
    /// Swap pair, or `None` when no swap is configured.
    pub(crate) fn swap_if_configured(&self) -> Option<(u64, u64)> {
        (self.swap_total > 0).then_some((self.swap_total, self.swap_used))
    }

    pub(crate) fn swap(&self) -> Option<(u64, u64)> {
        Some((self.swap_total, self.swap_used))
    }
}

/// Samples physical memory and swap.
pub(crate) fn memory() -> MemoryCounters {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
    );
    MemoryCounters {
        total: sys.total_memory(),
        available: sys.available_memory(),
        used: sys.used_memory(),
        swap_total: sys.total_swap(),
        swap_used: sys.used_swap(),
    }
}

/// Network host name, empty when unavailable.
pub(crate) fn hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::debug!("hostname unavailable: {e}");
            String::new()
        }
    }
}

/// CPU architecture the binary was built for (`x86_64`, `aarch64`, ...).
pub(crate) fn architecture() -> String {
    std::env::consts::ARCH.to_string()
}

/// CPU model string of the first core, empty when unknown.
pub(crate) fn processor() -> String {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
    );
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

/// OS release version (`11`, `14.4.1`, `22.04`).
pub(crate) fn os_version() -> Option<String> {
    System::os_version()
}

/// Kernel release string (`6.8.0-45-generic`).
pub(crate) fn kernel_version() -> Option<String> {
    System::kernel_version()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_counters_are_sane() {
        let m = memory();
        assert!(m.total > 0);
        assert!(m.available <= m.total);
        assert!(m.swap_used <= m.swap_total || m.swap_total == 0);
    }

    #[test]
    fn swap_nullability() {
        let none = MemoryCounters {
            total: 8,
            available: 4,
            used: 4,
            swap_total: 0,
            swap_used: 0,
        };
        assert_eq!(none.swap_if_configured(), None);
        assert_eq!(none.swap(), Some((0, 0)));

        let some = MemoryCounters {
            swap_total: 2048,
            swap_used: 512,
            ..none
        };
        assert_eq!(some.swap_if_configured(), Some((2048, 512)));
    }

    #[test]
    fn architecture_is_known() {
        assert!(!architecture().is_empty());
    }

    #[test]
    fn identity_does_not_panic() {
        let _ = hostname();
        let _ = processor();
        let _ = os_version();
        let _ = kernel_version();
    }
}
