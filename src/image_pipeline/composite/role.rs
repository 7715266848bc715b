/// How a selected channel contributes to the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Red,
    Green,
    Blue,
    /// Colour-mapped and combined by per-component maximum.
    Overlay,
}

impl ChannelRole {
    pub fn of(index: usize) -> Self {
        match index {
            0 => ChannelRole::Red,
            1 => ChannelRole::Green,
            2 => ChannelRole::Blue,
            _ => ChannelRole::Overlay,
        }
    }

    /// Canvas component fed additively by this role, `None` for overlays.
    pub fn slot(self) -> Option<usize> {
        match self {
            ChannelRole::Red => Some(0),
            ChannelRole::Green => Some(1),
            ChannelRole::Blue => Some(2),
            ChannelRole::Overlay => None,
        }
    }
}
