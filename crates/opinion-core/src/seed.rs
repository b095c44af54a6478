//! Seeded Phrase Picking
//!
//! Replies are varied but stable: the same input always yields the same
//! phrases. The seed is a 32-bit FNV-1a hash over the UTF-16 code units of the
//! normalized input, and each phrase slot reads the seed shifted by its own
//! offset so different pools do not move in lockstep.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over UTF-16 code units
pub fn hash32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Selection seed derived from a message and instrument code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Seed for a `(message, code)` pair, normalized to lowercase
    pub fn for_input(message: &str, code: &str) -> Self {
        let normalized = format!("{}|{}", message.trim(), code.trim()).to_lowercase();
        Self(hash32(&normalized))
    }

    /// The seed shifted right by `bits`, used for the n-th phrase slot
    pub fn shifted(self, bits: u32) -> Self {
        Self(self.0.checked_shr(bits).unwrap_or(0))
    }

    /// Pick an entry from a pool; `None` when the pool is empty
    pub fn pick<'a>(self, pool: &[&'a str]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        pool.get(self.0 as usize % pool.len()).copied()
    }
}
