use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use pinocchio_log::log;

use crate::error::{to_program_error, FavoritesError};
use crate::helpers::{favorites_address, has_duplicate_keys};
use crate::instruction::{FavoritesInstruction, AUTHORITY_INDEX};
use crate::state::FavoritesState;

/// Read-only view of one entry of the invocation's account sequence.
pub trait AccountRef {
    fn key(&self) -> &Pubkey;
    fn is_signer(&self) -> bool;
    fn is_writable(&self) -> bool;
    fn is_owned_by(&self, program: &Pubkey) -> bool;
    fn lamports(&self) -> u64;
    fn data_len(&self) -> usize;

    /// Run `f` over the account data while it is borrowed.
    fn with_data<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, ProgramError>;

    fn data_is_empty(&self) -> bool {
        self.data_len() == 0
    }
}

/// Declared access mode of one account position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountSpec {
    pub name: &'static str,
    pub writable: bool,
    pub signer: bool,
}

impl AccountSpec {
    pub const fn readonly(name: &'static str) -> Self {
        Self { name, writable: false, signer: false }
    }

    pub const fn writable(name: &'static str) -> Self {
        Self { name, writable: true, signer: false }
    }

    pub const fn signer(name: &'static str) -> Self {
        Self { name, writable: false, signer: true }
    }

    pub const fn writable_signer(name: &'static str) -> Self {
        Self { name, writable: true, signer: true }
    }
}

/// Everything one invocation may see: the decoded instruction, the accounts
/// it listed and the rent figures the handlers check funds against.
pub struct ExecutionContext<'a, A: AccountRef> {
    pub program_id: &'a Pubkey,
    pub instruction: FavoritesInstruction,
    pub payload: &'a [u8],
    pub accounts: &'a [A],
    /// Rent-exempt minimum of a favorites account.
    pub rent_exempt_minimum: u64,
    /// Rent-exempt minimum of the payer at its current size. A payer may be
    /// drained to zero or left above this, nothing in between.
    pub payer_rent_exempt_minimum: u64,
}

impl<'a, A: AccountRef> ExecutionContext<'a, A> {
    /// Bind the instruction to its accounts, rejecting any sequence that does
    /// not match the instruction's declared shape.
    pub fn new(
        program_id: &'a Pubkey,
        instruction: FavoritesInstruction,
        payload: &'a [u8],
        accounts: &'a [A],
        rent_exempt_minimum: u64,
        payer_rent_exempt_minimum: u64,
    ) -> Result<Self, ProgramError> {
        validate_shape(instruction.accounts(), accounts)?;
        Ok(Self {
            program_id,
            instruction,
            payload,
            accounts,
            rent_exempt_minimum,
            payer_rent_exempt_minimum,
        })
    }

    /// Account at `index`; shape validation guarantees it exists.
    pub fn account(&self, index: usize) -> Result<&'a A, ProgramError> {
        self.accounts
            .get(index)
            .ok_or(to_program_error(FavoritesError::MalformedInstruction))
    }

    /// The fee/authority payer. Every instruction lists it second.
    pub fn payer(&self) -> Result<&'a A, ProgramError> {
        self.account(AUTHORITY_INDEX)
    }

    /// State of a favorites account from this program's point of view.
    /// Accounts owned by anyone else hold no favorites data.
    pub fn load_state(&self, account: &A) -> Result<FavoritesState, ProgramError> {
        if !account.is_owned_by(self.program_id) {
            return Ok(FavoritesState::Uninitialized);
        }
        account.with_data(FavoritesState::deserialize)?
    }

    /// Check that `favorites` sits at `owner`'s PDA and return the bump.
    pub fn favorites_bump(&self, favorites: &A, owner: &Pubkey) -> Result<u8, ProgramError> {
        let (expected, bump) = favorites_address(owner, self.program_id)?;
        if favorites.key() != &expected {
            log!("favorites: account is not the owner's favorites address");
            return Err(to_program_error(FavoritesError::MalformedInstruction));
        }
        Ok(bump)
    }
}

/// Strict arity/flag check, run before any handler logic.
pub fn validate_shape<A: AccountRef>(
    specs: &[AccountSpec],
    accounts: &[A],
) -> Result<(), ProgramError> {
    if accounts.len() != specs.len() {
        log!("favorites: expected {} accounts, got {}", specs.len(), accounts.len());
        return Err(to_program_error(FavoritesError::MalformedInstruction));
    }
    for (spec, account) in specs.iter().zip(accounts) {
        if spec.writable && !account.is_writable() {
            log!("favorites: {} must be writable", spec.name);
            return Err(to_program_error(FavoritesError::MalformedInstruction));
        }
    }
    if has_duplicate_keys(accounts) {
        return Err(to_program_error(FavoritesError::MalformedInstruction));
    }
    for (spec, account) in specs.iter().zip(accounts) {
        if spec.signer && !account.is_signer() {
            log!("favorites: {} must sign", spec.name);
            return Err(to_program_error(FavoritesError::MissingSignature));
        }
    }
    Ok(())
}
