use pinocchio::program_error::ProgramError;
use shank::ShankInstruction;

use crate::context::AccountSpec;
use crate::error::{to_program_error, FavoritesError};

pub mod close;
pub mod initialize;
pub mod set_value;

pub use close::*;
pub use initialize::*;
pub use set_value::*;

/// Position of the favorites account in every instruction.
pub const FAVORITES_INDEX: usize = 0;
/// Position of the authority (payer on `Initialize`, owner otherwise).
pub const AUTHORITY_INDEX: usize = 1;
/// Position of the system program on `Initialize`.
pub const SYSTEM_PROGRAM_INDEX: usize = 2;

const INITIALIZE_ACCOUNTS: [AccountSpec; 3] = [
    AccountSpec::writable("favorites"),
    AccountSpec::writable_signer("authority"),
    AccountSpec::readonly("system_program"),
];

const SET_VALUE_ACCOUNTS: [AccountSpec; 2] = [
    AccountSpec::writable("favorites"),
    AccountSpec::signer("owner"),
];

const CLOSE_ACCOUNTS: [AccountSpec; 2] = [
    AccountSpec::writable("favorites"),
    AccountSpec::writable_signer("owner"),
];

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ShankInstruction)]
pub enum FavoritesInstruction {
    /// Create the favorites account for `authority` with value 0.
    #[account(0, writable, name = "favorites", desc = "PDA of [\"favorites\", authority]")]
    #[account(1, writable, signer, name = "authority", desc = "Owner of the new account, pays rent")]
    #[account(2, name = "system_program", desc = "System program")]
    Initialize,

    /// Replace the stored value. Payload: `u64` little-endian.
    #[account(0, writable, name = "favorites", desc = "Favorites account")]
    #[account(1, signer, name = "owner", desc = "Stored owner")]
    SetValue,

    /// Tombstone the account and return everything above its rent reserve to
    /// the owner.
    #[account(0, writable, name = "favorites", desc = "Favorites account")]
    #[account(1, writable, signer, name = "owner", desc = "Stored owner, receives the excess lamports")]
    Close,
}

impl TryFrom<&u8> for FavoritesInstruction {
    type Error = ProgramError;

    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match *value {
            0 => Ok(FavoritesInstruction::Initialize),
            1 => Ok(FavoritesInstruction::SetValue),
            2 => Ok(FavoritesInstruction::Close),
            _ => Err(to_program_error(FavoritesError::MalformedInstruction)),
        }
    }
}

impl FavoritesInstruction {
    /// Split `data` into discriminant and payload. The payload length must be
    /// exactly what the instruction declares.
    pub fn unpack(data: &[u8]) -> Result<(Self, &[u8]), ProgramError> {
        let (disc, payload) = data
            .split_first()
            .ok_or(to_program_error(FavoritesError::MalformedInstruction))?;
        let instruction = Self::try_from(disc)?;
        if payload.len() != instruction.payload_len() {
            return Err(to_program_error(FavoritesError::MalformedInstruction));
        }
        Ok((instruction, payload))
    }

    #[inline]
    pub const fn discriminant(&self) -> u8 {
        *self as u8
    }

    pub const fn payload_len(&self) -> usize {
        match self {
            FavoritesInstruction::Initialize | FavoritesInstruction::Close => 0,
            FavoritesInstruction::SetValue => SetValueArgs::LEN,
        }
    }

    /// Declared account shape, checked before the handler runs.
    pub fn accounts(&self) -> &'static [AccountSpec] {
        match self {
            FavoritesInstruction::Initialize => &INITIALIZE_ACCOUNTS,
            FavoritesInstruction::SetValue => &SET_VALUE_ACCOUNTS,
            FavoritesInstruction::Close => &CLOSE_ACCOUNTS,
        }
    }
}
