use pinocchio::program_error::ProgramError;
use pinocchio_log::log;

use crate::{
    context::{AccountRef, ExecutionContext},
    error::{to_program_error, FavoritesError},
    helpers::{FavoritesEvent, Mutation, Staged},
    instruction::{AUTHORITY_INDEX, FAVORITES_INDEX},
    state::FavoritesState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetValueArgs {
    pub value: u64,
}

impl SetValueArgs {
    pub const LEN: usize = 8;

    pub fn parse(payload: &[u8]) -> Result<Self, ProgramError> {
        let bytes: [u8; Self::LEN] = payload
            .try_into()
            .map_err(|_| to_program_error(FavoritesError::MalformedInstruction))?;
        Ok(Self {
            value: u64::from_le_bytes(bytes),
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        self.value.to_le_bytes()
    }
}

pub fn process_set_value<A: AccountRef>(
    ctx: &ExecutionContext<A>,
    args: SetValueArgs,
) -> Result<Staged, ProgramError> {
    let favorites_info = ctx.account(FAVORITES_INDEX)?;
    let owner_info = ctx.account(AUTHORITY_INDEX)?;

    let mut favorites = match ctx.load_state(favorites_info)? {
        FavoritesState::Active(favorites) => favorites,
        FavoritesState::Uninitialized | FavoritesState::Closed => {
            return Err(to_program_error(FavoritesError::NotInitialized));
        }
    };

    if !favorites.is_owner(owner_info.key()) {
        return Err(to_program_error(FavoritesError::Unauthorized));
    }
    ctx.favorites_bump(favorites_info, owner_info.key())?;

    favorites.value = args.value;

    let mut staged = Staged::new();
    staged.push(Mutation::Write {
        account: FAVORITES_INDEX,
        state: FavoritesState::Active(favorites),
    })?;
    staged.emit(FavoritesEvent::ValueSet {
        account: *favorites_info.key(),
        value: args.value,
    });

    log!("favorites: value set to {}", args.value);
    Ok(staged)
}
