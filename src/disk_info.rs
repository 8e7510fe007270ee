use serde::Serialize;
use sysinfo::Disks;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfo {
    pub name: String,
    pub mount_point: String,
    pub file_system: String,
    pub total_space: u64,
    pub available_space: u64,
    pub removable: bool,
}

/// Mounted filesystems, sorted by mount point and without duplicates.
pub fn list_drives() -> Vec<DiskInfo> {
    let disks = Disks::new_with_refreshed_list();
    let mut drives: Vec<DiskInfo> = disks
        .list()
        .iter()
        .map(|disk| DiskInfo {
            name: disk.name().to_string_lossy().into_owned(),
            mount_point: disk.mount_point().display().to_string(),
            file_system: disk.file_system().to_string_lossy().into_owned(),
            total_space: disk.total_space(),
            available_space: disk.available_space(),
            removable: disk.is_removable(),
        })
        .collect();

    drives.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    drives.dedup_by(|a, b| a.mount_point == b.mount_point);
    drives
}

/// Mount points only; the filesystem root when nothing is reported.
pub fn drive_roots(drives: &[DiskInfo]) -> Vec<String> {
    if drives.is_empty() {
        return vec![std::path::MAIN_SEPARATOR.to_string()];
    }
    drives.iter().map(|d| d.mount_point.clone()).collect()
}
