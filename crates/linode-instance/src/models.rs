//! Instance config models.
//!
//! A config profile describes how a Linode instance boots: which disks and
//! volumes map to which block devices, the kernel, and the helper scripts the
//! platform runs at boot.

use chrono::{DateTime, Utc};
use linode_core::id::{InstanceConfigId, LinodeId};
use linode_core::resource::ResourceFamily;
use linode_core::timestamp::{parse_timestamp, Record};
use serde::{Deserialize, Serialize};

/// Runlevel the instance boots into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunLevel {
    /// Normal multi-user boot.
    #[default]
    Default,
    /// Single-user mode.
    Single,
    /// Boot straight into `/bin/bash`.
    #[serde(rename = "binbash")]
    BinBash,
}

/// Virtualization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VirtMode {
    /// Paravirtualized devices.
    #[default]
    Paravirt,
    /// Fully virtualized devices.
    Fullvirt,
}

/// A disk or volume attached to a block device slot.
///
/// Exactly one of the two ids is expected to be set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceConfigDevice {
    /// Disk id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_id: Option<u64>,
    /// Block storage volume id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<u64>,
}

impl InstanceConfigDevice {
    /// Device backed by a disk.
    #[must_use]
    pub fn disk(id: u64) -> Self {
        Self {
            disk_id: Some(id),
            volume_id: None,
        }
    }

    /// Device backed by a volume.
    #[must_use]
    pub fn volume(id: u64) -> Self {
        Self {
            disk_id: None,
            volume_id: Some(id),
        }
    }
}

/// Block device slots `sda` through `sdh`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceConfigDeviceMap {
    /// `/dev/sda`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sda: Option<InstanceConfigDevice>,
    /// `/dev/sdb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdb: Option<InstanceConfigDevice>,
    /// `/dev/sdc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdc: Option<InstanceConfigDevice>,
    /// `/dev/sdd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdd: Option<InstanceConfigDevice>,
    /// `/dev/sde`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sde: Option<InstanceConfigDevice>,
    /// `/dev/sdf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdf: Option<InstanceConfigDevice>,
    /// `/dev/sdg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdg: Option<InstanceConfigDevice>,
    /// `/dev/sdh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdh: Option<InstanceConfigDevice>,
}

impl InstanceConfigDeviceMap {
    /// Iterate over occupied slots as `(name, device)` pairs, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, InstanceConfigDevice)> {
        [
            ("sda", self.sda),
            ("sdb", self.sdb),
            ("sdc", self.sdc),
            ("sdd", self.sdd),
            ("sde", self.sde),
            ("sdf", self.sdf),
            ("sdg", self.sdg),
            ("sdh", self.sdh),
        ]
        .into_iter()
        .filter_map(|(name, device)| device.map(|d| (name, d)))
    }
}

/// Boot helpers run by the platform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceConfigHelpers {
    /// Disable the `updatedb` cron job.
    #[serde(default)]
    pub updatedb_disabled: bool,
    /// Apply distro-specific fixups.
    #[serde(default)]
    pub distro: bool,
    /// Generate `modules.dep` for the booted kernel.
    #[serde(default)]
    pub modules_dep: bool,
    /// Configure networking automatically.
    #[serde(default)]
    pub network: bool,
    /// Mount devtmpfs at boot.
    #[serde(default)]
    pub devtmpfs_automount: bool,
}

/// An instance config profile as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceConfig {
    /// Config id.
    pub id: InstanceConfigId,
    /// Label.
    #[serde(default)]
    pub label: String,
    /// Free-form notes.
    #[serde(default)]
    pub comments: String,
    /// Device mapping.
    #[serde(default)]
    pub devices: InstanceConfigDeviceMap,
    /// Boot helpers.
    #[serde(default)]
    pub helpers: InstanceConfigHelpers,
    /// Memory limit in MB; 0 means no limit.
    #[serde(default)]
    pub memory_limit: u32,
    /// Kernel id, e.g. `linode/latest-64bit`.
    #[serde(default)]
    pub kernel: String,
    /// Initrd disk id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_rd: Option<u64>,
    /// Root device path.
    #[serde(default)]
    pub root_device: String,
    /// Runlevel.
    #[serde(default)]
    pub run_level: RunLevel,
    /// Virtualization mode.
    #[serde(default)]
    pub virt_mode: VirtMode,
    /// Raw creation timestamp.
    #[serde(rename = "created", default, skip_serializing_if = "Option::is_none")]
    pub created_str: Option<String>,
    /// Raw last-update timestamp.
    #[serde(rename = "updated", default, skip_serializing_if = "Option::is_none")]
    pub updated_str: Option<String>,
    /// Parsed creation time.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    /// Parsed last-update time.
    #[serde(skip)]
    pub updated: Option<DateTime<Utc>>,
}

impl InstanceConfig {
    /// Create options reproducing this config.
    #[must_use]
    pub fn create_options(&self) -> InstanceConfigCreateOptions {
        InstanceConfigCreateOptions {
            label: Some(self.label.clone()),
            comments: Some(self.comments.clone()),
            devices: Some(self.devices),
            helpers: Some(self.helpers),
            memory_limit: Some(self.memory_limit),
            kernel: Some(self.kernel.clone()),
            init_rd: self.init_rd,
            root_device: Some(self.root_device.clone()),
            run_level: Some(self.run_level),
            virt_mode: Some(self.virt_mode),
        }
    }

    /// Update options carrying every mutable field.
    #[must_use]
    pub fn update_options(&self) -> InstanceConfigUpdateOptions {
        self.create_options()
    }
}

impl Record for InstanceConfig {
    fn fix_dates(&mut self) {
        self.created = parse_timestamp(self.created_str.as_deref());
        self.updated = parse_timestamp(self.updated_str.as_deref());
    }
}

/// Payload for creating an instance config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InstanceConfigCreateOptions {
    /// Label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Device mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<InstanceConfigDeviceMap>,
    /// Boot helpers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<InstanceConfigHelpers>,
    /// Memory limit in MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<u32>,
    /// Kernel id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    /// Initrd disk id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_rd: Option<u64>,
    /// Root device path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_device: Option<String>,
    /// Runlevel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_level: Option<RunLevel>,
    /// Virtualization mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virt_mode: Option<VirtMode>,
}

/// Payload for updating an instance config. Same writable fields as create.
pub type InstanceConfigUpdateOptions = InstanceConfigCreateOptions;

/// Configs nested under a Linode instance.
#[derive(Debug)]
pub struct InstanceConfigs;

impl ResourceFamily for InstanceConfigs {
    const NAME: &'static str = "instance config";
    const ENDPOINT: &'static str = "linode/instances/{id}/configs";
    type Parent = LinodeId;
    type Id = InstanceConfigId;
    type Record = InstanceConfig;
    type CreateOptions = InstanceConfigCreateOptions;
    type UpdateOptions = InstanceConfigUpdateOptions;
}
