#![allow(dead_code)]

use favorites_program::{
    error::FavoritesError,
    helpers::FAVORITES_SEED,
    instruction::{FavoritesInstruction, SetValueArgs},
    state::{Favorites, FavoritesState},
};
use solana_program_test::{ProgramTest, ProgramTestBanksClientExt, ProgramTestContext};
use std::{env, path::Path};

pub use solana_program_test::BanksClientError;
pub use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction, InstructionError},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signature, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};

pub const FUNDED: u64 = 10 * LAMPORTS_PER_SOL;

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array(favorites_program::ID)
}

pub fn program_test() -> ProgramTest {
    program_test_at(&program_id())
}

/// Load the built program under `id`. Any id other than `program_id()` gives
/// a deployment the program itself refuses to serve.
pub fn program_test_at(id: &Pubkey) -> ProgramTest {
    let deploy_dir = format!("{}/target/deploy", env!("CARGO_MANIFEST_DIR"));
    env::set_var("BPF_OUT_DIR", &deploy_dir);
    let so_path = Path::new(&deploy_dir).join("favorites_program.so");
    assert!(
        so_path.exists(),
        "SBF artifact not found at {}.\nBuild first: `cargo-build-sbf --no-default-features --features sbf`",
        so_path.display()
    );

    let mut pt = ProgramTest::default();
    pt.prefer_bpf(true);
    pt.add_upgradeable_program_to_genesis("favorites_program", id);
    pt
}

pub async fn refresh_blockhash(ctx: &mut ProgramTestContext) {
    ctx.last_blockhash = ctx
        .banks_client
        .get_new_latest_blockhash(&ctx.last_blockhash)
        .await
        .unwrap();
}

pub async fn transfer(ctx: &mut ProgramTestContext, recipient: &Pubkey, amount: u64) {
    let tx = Transaction::new_signed_with_payer(
        &[system_instruction::transfer(&ctx.payer.pubkey(), recipient, amount)],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer],
        ctx.last_blockhash,
    );
    ctx.banks_client.process_transaction(tx).await.unwrap();
}

/// The one favorites address `owner` may hold.
pub fn favorites_address(owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[FAVORITES_SEED, owner.as_ref()], &program_id()).0
}

pub fn initialize_ix(favorites: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(*favorites, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: vec![FavoritesInstruction::Initialize.discriminant()],
    }
}

pub fn set_value_ix(favorites: &Pubkey, owner: &Pubkey, value: u64) -> Instruction {
    let mut data = vec![FavoritesInstruction::SetValue.discriminant()];
    data.extend_from_slice(&SetValueArgs { value }.to_bytes());
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(*favorites, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data,
    }
}

pub fn close_ix(favorites: &Pubkey, owner: &Pubkey) -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(*favorites, false),
            AccountMeta::new(*owner, true),
        ],
        data: vec![FavoritesInstruction::Close.discriminant()],
    }
}

pub fn favorites_error(err: &TransactionError) -> Option<FavoritesError> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            FavoritesError::try_from(*code).ok()
        }
        _ => None,
    }
}

pub fn assert_favorites_error(result: Result<(), TransactionError>, expected: FavoritesError) {
    let err = result.unwrap_err();
    assert_eq!(favorites_error(&err), Some(expected), "unexpected error: {:?}", err);
}

/// A running bank with one authority (not the fee payer, so its balance
/// moves only by what the program does) and that authority's favorites PDA.
pub struct TestEnv {
    pub ctx: ProgramTestContext,
    pub authority: Keypair,
    pub favorites: Pubkey,
    pub rent: Rent,
    pub last_logs: Vec<String>,
    sent: Vec<Signature>,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self::start(FUNDED, None).await
    }

    pub async fn with_funds(lamports: u64) -> Self {
        Self::start(lamports, None).await
    }

    /// Seed the favorites PDA with `account` before the bank starts.
    pub async fn with_favorites_account(account: Account) -> Self {
        Self::start(FUNDED, Some(account)).await
    }

    pub async fn start(authority_lamports: u64, favorites_account: Option<Account>) -> Self {
        let mut pt = program_test();
        let authority = Keypair::new();
        let favorites = favorites_address(&authority.pubkey());
        if authority_lamports > 0 {
            pt.add_account(
                authority.pubkey(),
                Account::new(authority_lamports, 0, &system_program::id()),
            );
        }
        if let Some(account) = favorites_account {
            pt.add_account(favorites, account);
        }

        let mut ctx = pt.start_with_context().await;
        let rent = ctx.banks_client.get_rent().await.unwrap();
        Self {
            ctx,
            authority,
            favorites,
            rent,
            last_logs: Vec::new(),
            sent: Vec::new(),
        }
    }

    pub fn rent_exempt_minimum(&self) -> u64 {
        self.rent.minimum_balance(Favorites::LEN)
    }

    /// A second wallet, funded by the fee payer.
    pub async fn funded_wallet(&mut self) -> Keypair {
        let wallet = Keypair::new();
        transfer(&mut self.ctx, &wallet.pubkey(), FUNDED).await;
        wallet
    }

    fn sign(&self, ix: &Instruction, signers: &[&Keypair]) -> Transaction {
        let mut all: Vec<&Keypair> = vec![&self.ctx.payer];
        all.extend_from_slice(signers);
        Transaction::new_signed_with_payer(
            &[ix.clone()],
            Some(&self.ctx.payer.pubkey()),
            all.as_slice(),
            self.ctx.last_blockhash,
        )
    }

    /// Submit `ix` signed by the fee payer plus `signers`. Repeating an
    /// identical transaction waits for a fresh blockhash first.
    pub async fn send(
        &mut self,
        ix: Instruction,
        signers: &[&Keypair],
    ) -> Result<(), TransactionError> {
        let mut tx = self.sign(&ix, signers);
        if self.sent.contains(&tx.signatures[0]) {
            refresh_blockhash(&mut self.ctx).await;
            tx = self.sign(&ix, signers);
        }
        self.sent.push(tx.signatures[0]);

        let outcome = self
            .ctx
            .banks_client
            .process_transaction_with_metadata(tx)
            .await
            .unwrap();
        self.last_logs = outcome
            .metadata
            .map(|meta| meta.log_messages)
            .unwrap_or_default();
        outcome.result
    }

    pub async fn initialize(&mut self) -> Result<(), TransactionError> {
        let authority = self.authority.insecure_clone();
        let ix = initialize_ix(&self.favorites, &authority.pubkey());
        self.send(ix, &[&authority]).await
    }

    pub async fn set_value_as(&mut self, signer: &Keypair, value: u64) -> Result<(), TransactionError> {
        let ix = set_value_ix(&self.favorites, &signer.pubkey(), value);
        self.send(ix, &[signer]).await
    }

    pub async fn set_value(&mut self, value: u64) -> Result<(), TransactionError> {
        let authority = self.authority.insecure_clone();
        self.set_value_as(&authority, value).await
    }

    pub async fn close_as(&mut self, signer: &Keypair) -> Result<(), TransactionError> {
        let ix = close_ix(&self.favorites, &signer.pubkey());
        self.send(ix, &[signer]).await
    }

    pub async fn close(&mut self) -> Result<(), TransactionError> {
        let authority = self.authority.insecure_clone();
        self.close_as(&authority).await
    }

    pub async fn account(&mut self, key: &Pubkey) -> Option<Account> {
        self.ctx.banks_client.get_account(*key).await.unwrap()
    }

    /// Zero for accounts the runtime does not hold.
    pub async fn lamports(&mut self, key: &Pubkey) -> u64 {
        self.account(key).await.map_or(0, |a| a.lamports)
    }

    /// Favorites state at the PDA, `None` when the program does not own it.
    pub async fn state(&mut self) -> Option<FavoritesState> {
        let favorites = self.favorites;
        let account = self.account(&favorites).await?;
        if account.owner != program_id() {
            return None;
        }
        Some(FavoritesState::deserialize(&account.data).unwrap())
    }

    pub async fn active(&mut self) -> Favorites {
        match self.state().await {
            Some(FavoritesState::Active(favorites)) => favorites,
            other => panic!("expected an active favorites account, got {:?}", other),
        }
    }

    pub fn authority_bytes(&self) -> [u8; 32] {
        self.authority.pubkey().to_bytes()
    }

    /// Favorites and authority accounts as the bank holds them now.
    pub async fn snapshot(&mut self) -> (Option<Account>, Option<Account>) {
        let (favorites, authority) = (self.favorites, self.authority.pubkey());
        (self.account(&favorites).await, self.account(&authority).await)
    }

    /// Send `ix`, which must fail with `expected` and leave both accounts as
    /// they were.
    pub async fn assert_rejected(
        &mut self,
        ix: Instruction,
        signers: &[&Keypair],
        expected: FavoritesError,
    ) {
        let before = self.snapshot().await;
        assert_favorites_error(self.send(ix, signers).await, expected);
        assert_eq!(self.snapshot().await, before, "rejected invocation changed storage");
        assert!(
            !self.last_logs.iter().any(|l| l.contains("Event:")),
            "rejected invocation emitted an event"
        );
    }

    pub fn logged(&self, needle: &str) -> bool {
        self.last_logs.iter().any(|l| l.contains(needle))
    }
}

/// Environment whose favorites PDA was already initialized by `authority`.
pub async fn initialized_env() -> TestEnv {
    let mut env = TestEnv::new().await;
    env.initialize().await.unwrap();
    env
}

/// A zeroed `Favorites::LEN` account owned by the program, as an earlier
/// allocation without a write would leave it.
pub fn preallocated(lamports: u64) -> Account {
    Account::new(lamports, Favorites::LEN, &program_id())
}
