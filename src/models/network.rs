// Network interface models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub index: u32,
    pub name: String,
    pub mtu: u64,
    /// Decoded link-flag tokens ("up", "broadcast", ...), stable bit order.
    pub flags: Vec<String>,
    pub mac_address: String,
    /// Assigned addresses in `addr/prefix` string form.
    pub addresses: Vec<String>,
}
