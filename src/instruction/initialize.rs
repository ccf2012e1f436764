use pinocchio::{msg, program_error::ProgramError, pubkey};
use pinocchio_log::log;

use crate::{
    context::{AccountRef, ExecutionContext},
    error::{to_program_error, FavoritesError},
    helpers::{FavoritesEvent, Mutation, Staged},
    instruction::{AUTHORITY_INDEX, FAVORITES_INDEX, SYSTEM_PROGRAM_INDEX},
    state::{Favorites, FavoritesState},
};

pub fn process_initialize<A: AccountRef>(ctx: &ExecutionContext<A>) -> Result<Staged, ProgramError> {
    msg!("Greetings from:");
    pubkey::log(ctx.program_id);

    let favorites_info = ctx.account(FAVORITES_INDEX)?;
    let authority_info = ctx.payer()?;
    let system_program_info = ctx.account(SYSTEM_PROGRAM_INDEX)?;

    if system_program_info.key() != &pinocchio_system::ID {
        return Err(to_program_error(FavoritesError::MalformedInstruction));
    }
    let bump = ctx.favorites_bump(favorites_info, authority_info.key())?;

    let reserve = ctx.rent_exempt_minimum;
    let deficit = reserve.saturating_sub(favorites_info.lamports());
    let mut staged = Staged::new();

    if favorites_info.is_owned_by(ctx.program_id) {
        // Allocated earlier but never written: adopt it.
        match ctx.load_state(favorites_info)? {
            FavoritesState::Uninitialized => {
                ensure_funds(ctx, authority_info, deficit)?;
                if deficit > 0 {
                    staged.push(Mutation::Fund {
                        payer: AUTHORITY_INDEX,
                        account: FAVORITES_INDEX,
                        lamports: deficit,
                    })?;
                }
            }
            FavoritesState::Active(_) | FavoritesState::Closed => {
                return Err(to_program_error(FavoritesError::AlreadyInitialized));
            }
        }
    } else if favorites_info.is_owned_by(&pinocchio_system::ID) && favorites_info.data_is_empty() {
        ensure_funds(ctx, authority_info, deficit)?;
        staged.push(Mutation::Allocate {
            account: FAVORITES_INDEX,
            payer: AUTHORITY_INDEX,
            lamports: deficit,
            space: Favorites::LEN,
            prefunded: favorites_info.lamports() > 0,
            bump,
        })?;
    } else {
        // owned by another program, or system-owned but carrying data
        return Err(to_program_error(FavoritesError::AlreadyInitialized));
    }

    let favorites = Favorites::new(*authority_info.key());
    staged.push(Mutation::Write {
        account: FAVORITES_INDEX,
        state: FavoritesState::Active(favorites),
    })?;
    staged.emit(FavoritesEvent::Initialized {
        account: *favorites_info.key(),
        owner: favorites.owner,
    });

    log!("favorites: initialized, rent reserve {}", reserve);
    Ok(staged)
}

// The runtime rejects a debit that leaves the payer alive below its own rent
// reserve, so that case is reported here as a funds error.
fn ensure_funds<A: AccountRef>(
    ctx: &ExecutionContext<A>,
    payer: &A,
    lamports: u64,
) -> Result<(), ProgramError> {
    if lamports == 0 {
        return Ok(());
    }
    let remaining = payer
        .lamports()
        .checked_sub(lamports)
        .ok_or(to_program_error(FavoritesError::InsufficientFunds))?;
    if remaining != 0 && remaining < ctx.payer_rent_exempt_minimum {
        return Err(to_program_error(FavoritesError::InsufficientFunds));
    }
    Ok(())
}
