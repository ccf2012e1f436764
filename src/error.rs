use pinocchio::program_error::ProgramError;

/// Errors surfaced by the favorites program as `ProgramError::Custom(code)`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoritesError {
    /// The target address already holds (or held) a favorites account.
    AlreadyInitialized = 0,
    /// The account is not an active favorites account.
    NotInitialized = 1,
    /// A required signer did not sign.
    MissingSignature = 2,
    /// The signer is not the stored owner.
    Unauthorized = 3,
    /// The payer cannot cover the rent-exempt minimum.
    InsufficientFunds = 4,
    /// Unknown discriminant, bad payload or bad account shape.
    MalformedInstruction = 5,
    /// A program-owned account whose bytes are not a favorites layout.
    InvalidAccountData = 6,
}

impl FavoritesError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FavoritesError::AlreadyInitialized => "AlreadyInitialized",
            FavoritesError::NotInitialized => "NotInitialized",
            FavoritesError::MissingSignature => "MissingSignature",
            FavoritesError::Unauthorized => "Unauthorized",
            FavoritesError::InsufficientFunds => "InsufficientFunds",
            FavoritesError::MalformedInstruction => "MalformedInstruction",
            FavoritesError::InvalidAccountData => "InvalidAccountData",
        }
    }
}

impl From<FavoritesError> for ProgramError {
    fn from(e: FavoritesError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl TryFrom<u32> for FavoritesError {
    type Error = ProgramError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FavoritesError::AlreadyInitialized),
            1 => Ok(FavoritesError::NotInitialized),
            2 => Ok(FavoritesError::MissingSignature),
            3 => Ok(FavoritesError::Unauthorized),
            4 => Ok(FavoritesError::InsufficientFunds),
            5 => Ok(FavoritesError::MalformedInstruction),
            6 => Ok(FavoritesError::InvalidAccountData),
            _ => Err(ProgramError::InvalidArgument),
        }
    }
}

impl core::fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// map internal errors to standard program error
pub fn to_program_error(err: FavoritesError) -> ProgramError {
    err.into()
}

/// Recover the favorites error carried by a `ProgramError`, if any.
pub fn from_program_error(err: &ProgramError) -> Option<FavoritesError> {
    match err {
        ProgramError::Custom(code) => FavoritesError::try_from(*code).ok(),
        _ => None,
    }
}
