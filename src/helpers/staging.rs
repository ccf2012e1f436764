//! Validate-then-commit staging.
//!
//! Handlers never touch account storage. They describe what should happen as
//! a [`Staged`] buffer, and [`commit`] replays it onto a [`Ledger`] only after
//! the handler returned `Ok`. Accounts are addressed by their index in the
//! invocation's account sequence.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey, ProgramResult};

use crate::helpers::constant::MAX_STAGED_MUTATIONS;
use crate::state::{Favorites, FavoritesState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Make the favorites PDA at `account` a program-owned account of `space`
    /// bytes. `payer` is the PDA's owner seed and contributes `lamports`.
    /// `prefunded` accounts already hold lamports and cannot go through
    /// `CreateAccount`.
    Allocate {
        account: usize,
        payer: usize,
        lamports: u64,
        space: usize,
        prefunded: bool,
        bump: u8,
    },
    /// System transfer from `payer` into an account this program already owns.
    Fund {
        payer: usize,
        account: usize,
        lamports: u64,
    },
    /// Overwrite the account data with the encoded state.
    Write { account: usize, state: FavoritesState },
    /// Debit a program-owned account directly.
    Drain { from: usize, to: usize, lamports: u64 },
}

/// Structured log entries emitted on commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoritesEvent {
    Initialized { account: Pubkey, owner: Pubkey },
    ValueSet { account: Pubkey, value: u64 },
    Closed { account: Pubkey, owner: Pubkey, lamports: u64 },
}

/// Fixed-capacity buffer of pending mutations for one invocation.
#[derive(Clone, Debug, Default)]
pub struct Staged {
    mutations: [Option<Mutation>; MAX_STAGED_MUTATIONS],
    len: usize,
    event: Option<FavoritesEvent>,
}

impl Staged {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) -> Result<&mut Self, ProgramError> {
        let slot = self
            .mutations
            .get_mut(self.len)
            .ok_or(ProgramError::InvalidArgument)?;
        *slot = Some(mutation);
        self.len += 1;
        Ok(self)
    }

    pub fn emit(&mut self, event: FavoritesEvent) -> &mut Self {
        self.event = Some(event);
        self
    }

    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.mutations[..self.len].iter().flatten()
    }

    pub fn event(&self) -> Option<&FavoritesEvent> {
        self.event.as_ref()
    }
}

/// Durable storage the staged mutations are applied to.
///
/// `ChainLedger` binds this to the runtime's `AccountInfo`s.
pub trait Ledger {
    /// Rent-exempt minimum for an account of `data_len` bytes.
    fn minimum_balance(&self, data_len: usize) -> Result<u64, ProgramError>;

    fn allocate(
        &mut self,
        account: usize,
        payer: usize,
        lamports: u64,
        space: usize,
        prefunded: bool,
        bump: u8,
    ) -> ProgramResult;

    fn fund(&mut self, payer: usize, account: usize, lamports: u64) -> ProgramResult;

    fn write_data(&mut self, account: usize, data: &[u8]) -> ProgramResult;

    fn drain(&mut self, from: usize, to: usize, lamports: u64) -> ProgramResult;

    fn emit(&mut self, event: &FavoritesEvent);
}

/// Apply every staged mutation in order, then emit the event.
pub fn commit<L: Ledger>(staged: &Staged, ledger: &mut L) -> ProgramResult {
    for mutation in staged.mutations() {
        match *mutation {
            Mutation::Allocate {
                account,
                payer,
                lamports,
                space,
                prefunded,
                bump,
            } => ledger.allocate(account, payer, lamports, space, prefunded, bump)?,
            Mutation::Fund {
                payer,
                account,
                lamports,
            } => ledger.fund(payer, account, lamports)?,
            Mutation::Write { account, state } => {
                let bytes: [u8; Favorites::LEN] = state.to_bytes();
                ledger.write_data(account, &bytes)?
            }
            Mutation::Drain { from, to, lamports } => ledger.drain(from, to, lamports)?,
        }
    }
    if let Some(event) = staged.event() {
        ledger.emit(event);
    }
    Ok(())
}
