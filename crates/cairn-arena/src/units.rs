//! Byte-size helpers.
//!
//! Units are powers of 1024.

/// Alignment used by [`align16`].
pub const ALIGNMENT: u64 = 16;

/// `count` KiB in bytes.
pub const fn kilo_bytes(count: u64) -> u64 {
    1024 * count
}

/// `count` MiB in bytes.
pub const fn mega_bytes(count: u64) -> u64 {
    1024 * kilo_bytes(count)
}

/// `count` GiB in bytes.
pub const fn giga_bytes(count: u64) -> u64 {
    1024 * mega_bytes(count)
}

/// `count` TiB in bytes.
pub const fn tera_bytes(count: u64) -> u64 {
    1024 * giga_bytes(count)
}

/// Round `value` up to the next multiple of 16.
pub const fn align16(value: u64) -> u64 {
    (value + (ALIGNMENT - 1)) & !(ALIGNMENT - 1)
}
