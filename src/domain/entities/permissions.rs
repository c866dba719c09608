use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Channel permission bits relevant to external emoji and stickers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Permissions: u64 {
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const USE_EXTERNAL_STICKERS = 1 << 37;
    }
}

/// Premium subscription of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum PremiumType {
    #[default]
    None = 0,
    NitroClassic = 1,
    Nitro = 2,
    NitroBasic = 3,
}

impl From<u8> for PremiumType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::NitroClassic,
            2 => Self::Nitro,
            3 => Self::NitroBasic,
            _ => Self::None,
        }
    }
}

impl From<PremiumType> for u8 {
    fn from(value: PremiumType) -> Self {
        value as Self
    }
}

impl PremiumType {
    /// Any paid tier unlocks custom emoji everywhere.
    #[must_use]
    pub const fn can_use_emotes(self) -> bool {
        self as u8 > 0
    }

    /// Tiers above classic unlock custom stickers everywhere.
    #[must_use]
    pub const fn can_use_stickers(self) -> bool {
        self as u8 > 1
    }
}
