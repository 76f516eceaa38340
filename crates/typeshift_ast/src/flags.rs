//! Modifier flag sets for declaration members.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags::bitflags! {
    /// Modifier flags for class and interface members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u32 {
        const NONE     = 0;
        const STATIC   = 1 << 0;
        const OVERRIDE = 1 << 1;
        const OPERATOR = 1 << 2;
        const GETTER   = 1 << 3;
        const SETTER   = 1 << 4;
    }
}

impl Default for MemberFlags {
    fn default() -> Self {
        MemberFlags::NONE
    }
}

impl Serialize for MemberFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for MemberFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(MemberFlags::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_composition() {
        let flags = MemberFlags::GETTER | MemberFlags::OVERRIDE;
        assert!(flags.contains(MemberFlags::GETTER));
        assert!(!flags.contains(MemberFlags::SETTER));
    }
}
