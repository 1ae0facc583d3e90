/// Default buffer size for one request/response exchange.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Address used by a master (PC, gateway client) on the bus.
pub const DEFAULT_SOURCE_ADDRESS: u32 = 1;

/// Settings shared by the code that drives the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Source address written into every request.
    pub source_address: u32,
    /// Size of the buffer allocated for one exchange.
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            source_address: DEFAULT_SOURCE_ADDRESS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
