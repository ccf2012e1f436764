use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use shank::ShankAccount;

use crate::error::{to_program_error, FavoritesError};
use crate::helpers::constant::DISCRIMINATOR_SIZE;

/// Domain payload persisted in a favorites account.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ShankAccount)]
pub struct Favorites {
    /// Authority that created the account. Never rewritten after `initialize`.
    pub owner: Pubkey,
    /// The favorite value itself.
    pub value: u64,
}

impl Favorites {
    /// Serialized account size: discriminator + owner + value.
    pub const LEN: usize = DISCRIMINATOR_SIZE + 32 + 8;

    pub const DISCRIMINATOR: [u8; DISCRIMINATOR_SIZE] = *b"favorite";

    const OWNER_OFFSET: usize = DISCRIMINATOR_SIZE;
    const VALUE_OFFSET: usize = Self::OWNER_OFFSET + 32;

    pub fn new(owner: Pubkey) -> Self {
        Self { owner, value: 0 }
    }

    #[inline]
    pub fn is_owner(&self, pubkey: &Pubkey) -> bool {
        self.owner == *pubkey
    }
}

/// Lifecycle of a favorites address as seen by this program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoritesState {
    Uninitialized,
    Active(Favorites),
    Closed,
}

impl FavoritesState {
    pub const UNINITIALIZED_DISCRIMINATOR: [u8; DISCRIMINATOR_SIZE] = [0; DISCRIMINATOR_SIZE];
    pub const CLOSED_DISCRIMINATOR: [u8; DISCRIMINATOR_SIZE] = [0xff; DISCRIMINATOR_SIZE];

    /// Decode program-owned account data. The length must be exactly `Favorites::LEN`.
    pub fn deserialize(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() != Favorites::LEN {
            return Err(to_program_error(FavoritesError::InvalidAccountData));
        }

        let mut discriminator = [0u8; DISCRIMINATOR_SIZE];
        discriminator.copy_from_slice(&data[..DISCRIMINATOR_SIZE]);

        match discriminator {
            Self::UNINITIALIZED_DISCRIMINATOR => {
                // a zeroed prefix with trailing bytes is not something we wrote
                if data[DISCRIMINATOR_SIZE..].iter().any(|b| *b != 0) {
                    return Err(to_program_error(FavoritesError::InvalidAccountData));
                }
                Ok(FavoritesState::Uninitialized)
            }
            Favorites::DISCRIMINATOR => {
                let mut owner = [0u8; 32];
                owner.copy_from_slice(&data[Favorites::OWNER_OFFSET..Favorites::VALUE_OFFSET]);
                let mut value = [0u8; 8];
                value.copy_from_slice(&data[Favorites::VALUE_OFFSET..Favorites::LEN]);
                Ok(FavoritesState::Active(Favorites {
                    owner,
                    value: u64::from_le_bytes(value),
                }))
            }
            Self::CLOSED_DISCRIMINATOR => Ok(FavoritesState::Closed),
            _ => Err(to_program_error(FavoritesError::InvalidAccountData)),
        }
    }

    pub fn to_bytes(&self) -> [u8; Favorites::LEN] {
        let mut out = [0u8; Favorites::LEN];
        match self {
            FavoritesState::Uninitialized => {}
            FavoritesState::Active(favorites) => {
                out[..DISCRIMINATOR_SIZE].copy_from_slice(&Favorites::DISCRIMINATOR);
                out[Favorites::OWNER_OFFSET..Favorites::VALUE_OFFSET]
                    .copy_from_slice(&favorites.owner);
                out[Favorites::VALUE_OFFSET..].copy_from_slice(&favorites.value.to_le_bytes());
            }
            // tombstone: owner and value are wiped
            FavoritesState::Closed => {
                out[..DISCRIMINATOR_SIZE].copy_from_slice(&Self::CLOSED_DISCRIMINATOR);
            }
        }
        out
    }

    pub fn active(&self) -> Option<&Favorites> {
        match self {
            FavoritesState::Active(favorites) => Some(favorites),
            _ => None,
        }
    }
}
