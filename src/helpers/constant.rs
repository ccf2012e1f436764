/// Bytes reserved at the head of every account this program writes.
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Upper bound on mutations a single instruction may stage.
pub const MAX_STAGED_MUTATIONS: usize = 4;

/// First seed of the favorites PDA; the second is the owner's address.
pub const FAVORITES_SEED: &[u8] = b"favorites";
