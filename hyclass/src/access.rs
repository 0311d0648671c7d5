use bitflags::bitflags;

bitflags! {
    /// Access and property flags of classes, members, parameters and module entries.
    ///
    /// Several names share a bit: the meaning of the bit depends on the entity
    /// carrying it (e.g. `SUPER` on a class is `SYNCHRONIZED` on a method).
    /// Bits without a name are retained as-is, so any value coming from a
    /// reader survives a replay unchanged.
    #[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const SYNCHRONIZED = 0x0020;
        const OPEN = 0x0020;
        const TRANSITIVE = 0x0020;
        const VOLATILE = 0x0040;
        const BRIDGE = 0x0040;
        const STATIC_PHASE = 0x0040;
        const VARARGS = 0x0080;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MANDATED = 0x8000;
        const MODULE = 0x8000;

        /// Pseudo flag marking a class as a record. Not stored in the access
        /// field of the binary format.
        const RECORD = 0x1_0000;

        /// Pseudo flag standing for the `Deprecated` attribute.
        const DEPRECATED = 0x2_0000;

        const _ = !0;
    }
}

impl From<u32> for AccessFlags {
    fn from(bits: u32) -> Self {
        AccessFlags::from_bits_retain(bits)
    }
}

impl From<AccessFlags> for u32 {
    fn from(flags: AccessFlags) -> Self {
        flags.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_are_retained() {
        let flags = AccessFlags::from(0x8000_0001);
        assert!(flags.contains(AccessFlags::PUBLIC));
        assert_eq!(u32::from(flags), 0x8000_0001);
    }

    #[test]
    fn shared_bits_alias() {
        assert_eq!(AccessFlags::SUPER, AccessFlags::SYNCHRONIZED);
        assert!(AccessFlags::from(0x1_0011).contains(AccessFlags::RECORD | AccessFlags::FINAL));
    }
}
