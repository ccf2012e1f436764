//! Binding of the dispatcher to the Solana runtime.

use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    msg,
    program_error::ProgramError,
    pubkey::{self, Pubkey},
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_log::log;
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};

use crate::{
    context::AccountRef,
    helpers::{relocate_lamports, FavoritesEvent, Ledger, FAVORITES_SEED},
};

impl AccountRef for AccountInfo {
    #[inline(always)]
    fn key(&self) -> &Pubkey {
        AccountInfo::key(self)
    }

    #[inline(always)]
    fn is_signer(&self) -> bool {
        AccountInfo::is_signer(self)
    }

    #[inline(always)]
    fn is_writable(&self) -> bool {
        AccountInfo::is_writable(self)
    }

    #[inline(always)]
    fn is_owned_by(&self, program: &Pubkey) -> bool {
        AccountInfo::is_owned_by(self, program)
    }

    #[inline(always)]
    fn lamports(&self) -> u64 {
        AccountInfo::lamports(self)
    }

    #[inline(always)]
    fn data_len(&self) -> usize {
        AccountInfo::data_len(self)
    }

    fn with_data<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, ProgramError> {
        let data = self.try_borrow_data()?;
        Ok(f(&data))
    }
}

/// Applies staged mutations to the runtime's accounts. Allocation and
/// funding go through the system program; program-owned data and lamports
/// are written in place.
pub struct ChainLedger<'a> {
    accounts: &'a [AccountInfo],
}

impl<'a> ChainLedger<'a> {
    pub fn new(accounts: &'a [AccountInfo]) -> Self {
        Self { accounts }
    }

    fn get(&self, index: usize) -> Result<&'a AccountInfo, ProgramError> {
        self.accounts
            .get(index)
            .ok_or(ProgramError::NotEnoughAccountKeys)
    }
}

impl Ledger for ChainLedger<'_> {
    fn minimum_balance(&self, data_len: usize) -> Result<u64, ProgramError> {
        Ok(Rent::get()?.minimum_balance(data_len))
    }

    fn allocate(
        &mut self,
        account: usize,
        payer: usize,
        lamports: u64,
        space: usize,
        prefunded: bool,
        bump: u8,
    ) -> ProgramResult {
        let to = self.get(account)?;
        let from = self.get(payer)?;

        // The favorites account is the payer's PDA; it signs through its seeds.
        let bump_seed = [bump];
        let seeds = [
            Seed::from(FAVORITES_SEED),
            Seed::from(from.key()),
            Seed::from(&bump_seed[..]),
        ];
        let signer = Signer::from(&seeds[..]);

        if !prefunded {
            return CreateAccount {
                from,
                to,
                lamports,
                space: space as u64,
                owner: &crate::ID,
            }
            .invoke_signed(&[signer]);
        }

        // CreateAccount refuses accounts that already hold lamports.
        if lamports > 0 {
            Transfer { from, to, lamports }.invoke()?;
        }
        Allocate {
            account: to,
            space: space as u64,
        }
        .invoke_signed(&[signer.clone()])?;
        Assign {
            account: to,
            owner: &crate::ID,
        }
        .invoke_signed(&[signer])
    }

    fn fund(&mut self, payer: usize, account: usize, lamports: u64) -> ProgramResult {
        Transfer {
            from: self.get(payer)?,
            to: self.get(account)?,
            lamports,
        }
        .invoke()
    }

    fn write_data(&mut self, account: usize, bytes: &[u8]) -> ProgramResult {
        let info = self.get(account)?;
        let mut data = info.try_borrow_mut_data()?;
        if data.len() != bytes.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        data.copy_from_slice(bytes);
        Ok(())
    }

    fn drain(&mut self, from: usize, to: usize, lamports: u64) -> ProgramResult {
        relocate_lamports(self.get(from)?, self.get(to)?, lamports)
    }

    fn emit(&mut self, event: &FavoritesEvent) {
        match event {
            FavoritesEvent::Initialized { account, owner } => {
                msg!("Event: Initialized");
                pubkey::log(account);
                pubkey::log(owner);
            }
            FavoritesEvent::ValueSet { account, value } => {
                log!("Event: ValueSet {}", *value);
                pubkey::log(account);
            }
            FavoritesEvent::Closed {
                account,
                owner,
                lamports,
            } => {
                log!("Event: Closed {}", *lamports);
                pubkey::log(account);
                pubkey::log(owner);
            }
        }
    }
}
