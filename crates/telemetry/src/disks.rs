//! Mounted filesystem enumeration.

use std::path::Path;

use devicemcp_protocol::StorageInfo;
use sysinfo::Disks;

/// One mounted filesystem as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MountEntry {
    pub mount_point: String,
    /// Lowercased filesystem type; empty when the OS does not report one.
    pub fs_type: String,
    pub total: u64,
    /// Every free byte, including blocks reserved for the superuser.
    pub free: u64,
    /// Free bytes writable by an unprivileged user.
    pub available: u64,
}

/// Capacity counters of one filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Usage {
    pub total: u64,
    pub free: u64,
    pub available: u64,
}

/// Lists every mounted filesystem in OS order.
pub(crate) fn mounts() -> Vec<MountEntry> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .map(|disk| {
            let mount = disk.mount_point();
            // sysinfo only reports space available to the caller.
            let usage = usage(mount).unwrap_or(Usage {
                total: disk.total_space(),
                free: disk.available_space(),
                available: disk.available_space(),
            });
            MountEntry {
                mount_point: mount.to_string_lossy().into_owned(),
                fs_type: disk.file_system().to_string_lossy().to_lowercase(),
                total: usage.total,
                free: usage.free,
                available: usage.available,
            }
        })
        .collect()
}

/// Reads capacity counters for the filesystem holding `path`.
#[cfg(unix)]
#[allow(clippy::unnecessary_cast, clippy::useless_conversion)]
pub(crate) fn usage(path: &Path) -> Option<Usage> {
    let stats = match nix::sys::statvfs::statvfs(path) {
        Ok(stats) => stats,
        Err(e) => {
            tracing::debug!(mount = %path.display(), "statvfs failed: {e}");
            return None;
        }
    };
    // Block counts are in units of the fragment size.
    let unit = stats.fragment_size() as u64;
    Some(Usage {
        total: (stats.blocks() as u64).saturating_mul(unit),
        free: (stats.blocks_free() as u64).saturating_mul(unit),
        available: (stats.blocks_available() as u64).saturating_mul(unit),
    })
}

/// Reads capacity counters for the volume holding `path`.
#[cfg(windows)]
pub(crate) fn usage(path: &Path) -> Option<Usage> {
    use std::os::windows::ffi::OsStrExt;

    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let (mut available, mut total, mut free) = (0u64, 0u64, 0u64);
    // SAFETY: `wide` is NUL-terminated and outlives the call; the out
    // pointers refer to live locals.
    let ok = unsafe { GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut free) };
    if ok == 0 {
        tracing::debug!(mount = %path.display(), "GetDiskFreeSpaceExW failed");
        return None;
    }
    Some(Usage {
        total,
        free,
        available,
    })
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn usage(_path: &Path) -> Option<Usage> {
    None
}

/// Converts mount entries into storage records.
///
/// Entries rejected by `excluded` and entries with zero capacity are
/// skipped; neither aborts the listing.
pub(crate) fn collect_storage(
    entries: Vec<MountEntry>,
    excluded: impl Fn(&MountEntry) -> bool,
) -> Vec<StorageInfo> {
    entries
        .into_iter()
        .filter_map(|entry| {
            if excluded(&entry) {
                tracing::trace!(mount = %entry.mount_point, fs = %entry.fs_type, "skipping excluded filesystem");
                return None;
            }
            if entry.total == 0 {
                tracing::debug!(mount = %entry.mount_point, "skipping mount with no capacity");
                return None;
            }
            Some(StorageInfo::from_usage(
                entry.mount_point,
                entry.total,
                entry.free,
                entry.available,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(mount: &str, fs: &str, total: u64, available: u64) -> MountEntry {
        MountEntry {
            mount_point: mount.into(),
            fs_type: fs.into(),
            total,
            free: available,
            available,
        }
    }

    #[test]
    fn keeps_order_and_computes_usage() {
        let out = collect_storage(
            vec![entry("/", "ext4", 1000, 400), entry("/home", "btrfs", 200, 50)],
            |_| false,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].mount_point, "/");
        assert_eq!(out[0].used_bytes, 600);
        assert_eq!(out[0].usage_percent, 60.0);
        assert_eq!(out[1].mount_point, "/home");
        assert_eq!(out[1].usage_percent, 75.0);
    }

    #[test]
    fn reserved_blocks_stay_out_of_used_and_free() {
        let ext4 = MountEntry {
            free: 500,
            ..entry("/", "ext4", 10_000, 0)
        };
        let out = collect_storage(vec![ext4], |_| false);
        assert_eq!(out[0].used_bytes, 9_500);
        assert_eq!(out[0].free_bytes, 0);
        assert_eq!(out[0].usage_percent, 100.0);
    }

    #[test]
    fn skips_excluded_and_empty() {
        let out = collect_storage(
            vec![
                entry("/", "ext4", 1000, 400),
                entry("/dev/shm", "tmpfs", 1000, 1000),
                entry("/mnt/cdrom", "iso9660", 0, 0),
            ],
            |e| e.fs_type == "tmpfs",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].mount_point, "/");
    }

    #[test]
    fn empty_listing() {
        assert!(collect_storage(Vec::new(), |_| false).is_empty());
    }

    #[test]
    fn live_mounts_are_consistent() {
        for s in collect_storage(mounts(), |_| false) {
            assert!(s.total_bytes > 0);
            assert!(s.used_bytes + s.free_bytes <= s.total_bytes);
            assert!((0.0..=100.0).contains(&s.usage_percent));
            assert!(!s.mount_point.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn root_usage_splits_reserved_space() {
        let u = usage(Path::new("/")).unwrap();
        assert!(u.total > 0);
        assert!(u.available <= u.free);
        assert!(u.free <= u.total);
    }

    #[test]
    fn missing_path_has_no_usage() {
        assert!(usage(Path::new("/definitely/not/a/mount/devicemcp")).is_none());
    }
}
