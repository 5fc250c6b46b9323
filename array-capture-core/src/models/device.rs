/// An input device visible to a capture backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    /// Backend device identifier.
    pub id: String,

    /// Human-readable device name.
    pub name: String,

    /// Whether this is the system default input.
    pub is_default: bool,

    /// Largest channel count the device reports supporting.
    pub max_channels: u16,
}
