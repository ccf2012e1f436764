use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::{try_find_program_address, Pubkey},
    ProgramResult,
};

use crate::context::AccountRef;
use crate::helpers::constant::FAVORITES_SEED;

/// True when two entries of the sequence name the same address.
pub fn has_duplicate_keys<A: AccountRef>(accounts: &[A]) -> bool {
    accounts
        .iter()
        .enumerate()
        .any(|(i, a)| accounts[i + 1..].iter().any(|b| b.key() == a.key()))
}

/// Canonical favorites address of `owner` and its bump.
///
/// Derivation goes through the runtime syscall, so off-chain callers must use
/// their own SDK's `find_program_address` with the same seeds.
pub fn favorites_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), ProgramError> {
    try_find_program_address(&[FAVORITES_SEED, owner.as_ref()], program_id)
        .ok_or(ProgramError::InvalidSeeds)
}

// Move lamports between two accounts (checked). The source must be owned by
// this program; the runtime rejects debits of foreign accounts.
pub fn relocate_lamports(
    source_account_info: &AccountInfo,
    destination_account_info: &AccountInfo,
    lamports: u64,
) -> ProgramResult {
    {
        let mut source_lamports = source_account_info.try_borrow_mut_lamports()?;
        *source_lamports = source_lamports
            .checked_sub(lamports)
            .ok_or(ProgramError::InsufficientFunds)?;
    }
    {
        let mut destination_lamports = destination_account_info.try_borrow_mut_lamports()?;
        *destination_lamports = destination_lamports
            .checked_add(lamports)
            .ok_or(ProgramError::ArithmeticOverflow)?;
    }
    Ok(())
}

#[inline]
pub(crate) fn checked_add(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_add(b).ok_or(ProgramError::ArithmeticOverflow)
}
