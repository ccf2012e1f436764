use pinocchio::{
    account_info::AccountInfo, msg, program_entrypoint, pubkey::Pubkey, ProgramResult,
};

use crate::{chain::ChainLedger, error::from_program_error, processor};

// Entrypoint macro
program_entrypoint!(process_instruction);

#[inline(always)]
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let mut ledger = ChainLedger::new(accounts);
    match processor::process_instruction(program_id, accounts, instruction_data, &mut ledger) {
        Ok(()) => Ok(()),
        Err(e) => {
            // catch the error so we can print it
            if let Some(err) = from_program_error(&e) {
                msg!(err.as_str());
            }
            Err(e)
        }
    }
}
