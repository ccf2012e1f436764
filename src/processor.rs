use pinocchio::{msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult};

use crate::{
    context::{AccountRef, ExecutionContext},
    helpers::{commit, Ledger, Staged},
    instruction::{self, FavoritesInstruction, SetValueArgs, AUTHORITY_INDEX},
    state::Favorites,
};

/// Decode, validate, dispatch and, only if all of that succeeded, commit.
pub fn process_instruction<A: AccountRef, L: Ledger>(
    program_id: &Pubkey,
    accounts: &[A],
    instruction_data: &[u8],
    ledger: &mut L,
) -> ProgramResult {
    if program_id != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    let (instruction, payload) = FavoritesInstruction::unpack(instruction_data)?;
    let rent_exempt_minimum = ledger.minimum_balance(Favorites::LEN)?;
    let payer_len = accounts.get(AUTHORITY_INDEX).map_or(0, |a| a.data_len());
    let payer_rent_exempt_minimum = ledger.minimum_balance(payer_len)?;
    let ctx = ExecutionContext::new(
        program_id,
        instruction,
        payload,
        accounts,
        rent_exempt_minimum,
        payer_rent_exempt_minimum,
    )?;

    let staged = dispatch(&ctx)?;
    commit(&staged, ledger)
}

/// Route to the handler for the context's instruction. Handlers only stage.
pub fn dispatch<A: AccountRef>(ctx: &ExecutionContext<A>) -> Result<Staged, ProgramError> {
    match ctx.instruction {
        FavoritesInstruction::Initialize => {
            msg!("Instruction: Initialize");
            instruction::initialize::process_initialize(ctx)
        }
        FavoritesInstruction::SetValue => {
            msg!("Instruction: SetValue");
            let args = SetValueArgs::parse(ctx.payload)?;
            instruction::set_value::process_set_value(ctx, args)
        }
        FavoritesInstruction::Close => {
            msg!("Instruction: Close");
            instruction::close::process_close(ctx)
        }
    }
}
