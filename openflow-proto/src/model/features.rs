/// Maximum length of a port's human-readable `name` field, including the
/// trailing NUL (spec §4.3, matching OpenFlow 1.0's `OFP_MAX_PORT_NAME_LEN`).
pub const MAX_PORT_NAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhyPort {
    pub port_no: u16,
    pub hw_addr: [u8; 6],
    pub name: String,
    pub config: u32,
    pub state: u32,
    pub curr: u32,
    pub advertised: u32,
    pub supported: u32,
    pub peer: u32,
}

/// A switch's self-description, sent in reply to `FeaturesRequest`
/// (spec §3, §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchFeatures {
    pub datapath_id: u64,
    pub n_buffers: u32,
    pub n_tables: u8,
    pub capabilities: u32,
    pub actions: u32,
    pub ports: Vec<PhyPort>,
}
