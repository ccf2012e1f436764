use pinocchio::program_error::ProgramError;
use pinocchio_log::log;

use crate::{
    context::{AccountRef, ExecutionContext},
    error::{to_program_error, FavoritesError},
    helpers::{checked_add, FavoritesEvent, Mutation, Staged},
    instruction::{AUTHORITY_INDEX, FAVORITES_INDEX},
    state::FavoritesState,
};

pub fn process_close<A: AccountRef>(ctx: &ExecutionContext<A>) -> Result<Staged, ProgramError> {
    let favorites_info = ctx.account(FAVORITES_INDEX)?;
    let owner_info = ctx.account(AUTHORITY_INDEX)?;

    let favorites = match ctx.load_state(favorites_info)? {
        FavoritesState::Active(favorites) => favorites,
        FavoritesState::Uninitialized | FavoritesState::Closed => {
            return Err(to_program_error(FavoritesError::NotInitialized));
        }
    };

    if !favorites.is_owner(owner_info.key()) {
        return Err(to_program_error(FavoritesError::Unauthorized));
    }
    ctx.favorites_bump(favorites_info, owner_info.key())?;

    // The tombstone keeps its rent reserve so the runtime never reclaims the
    // address and a later initialize still sees Closed.
    let refund = favorites_info.lamports().saturating_sub(ctx.rent_exempt_minimum);
    checked_add(owner_info.lamports(), refund)?;

    let mut staged = Staged::new();
    staged.push(Mutation::Write {
        account: FAVORITES_INDEX,
        state: FavoritesState::Closed,
    })?;
    if refund > 0 {
        staged.push(Mutation::Drain {
            from: FAVORITES_INDEX,
            to: AUTHORITY_INDEX,
            lamports: refund,
        })?;
    }
    staged.emit(FavoritesEvent::Closed {
        account: *favorites_info.key(),
        owner: favorites.owner,
        lamports: refund,
    });

    log!("favorites: closed, returned {} lamports", refund);
    Ok(staged)
}
