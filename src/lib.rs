// Only go no_std when building for SBF.
#![cfg_attr(feature = "sbf", no_std)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;

pub mod chain;
pub mod context;
pub mod error;
pub mod helpers;
pub mod instruction;
pub mod processor;
pub mod state;

pinocchio_pubkey::declare_id!("9bLJCC7xD9oyF4CozMBN3zgPhydqE5BzwqPxVaBZ1AEv");

// ---- SBF-only runtime shims (no_std builds) ----
#[cfg(feature = "sbf")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    // On-chain panic: spin forever (abort semantics)
    loop {}
}

#[cfg(feature = "sbf")]
pinocchio::no_allocator!();
