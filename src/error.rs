use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    // Lottery creation
    #[error("Sum of rewards and fees must equal 10000")]
    InvalidRewardsBreakdown {},

    #[error("Outside of limits")]
    InvalidCost {},

    #[error("Lottery length outside of range")]
    InvalidTimestamp {},

    #[error("Discount divisor too low")]
    InvalidDivisor {},

    #[error("Charity fee too high")]
    InvalidCharity {},

    #[error("Treasury fee too high")]
    InvalidTreasury {},

    #[error("Burn fee too high")]
    InvalidBurn {},

    #[error("Not time to start lottery")]
    PreviousLotteryNotFinished {},

    // Lifecycle
    #[error("Lottery is not open")]
    LotteryNotOpen {},

    #[error("Lottery is over")]
    LotteryOver {},

    #[error("Lottery not open")]
    AlreadyClosed {},

    #[error("Lottery not over")]
    NotYetEnded {},

    #[error("Lottery not close")]
    NotClosed {},

    #[error("Lottery not claimable")]
    LotteryNotClaimable {},

    // Tickets
    #[error("Outside range")]
    OutsideRange { number: u32 },

    #[error("Too many tickets")]
    TooManyTickets {},

    #[error("No ticket specified")]
    NoTicketsSpecified {},

    #[error("Not same length")]
    LengthMismatch {},

    #[error("Ticket not in this lottery")]
    WrongLottery { ticket_id: u64 },

    #[error("Not the owner")]
    NotOwner { ticket_id: u64 },

    #[error("Ticket already claimed")]
    AlreadyClaimed { ticket_id: u64 },

    #[error("No prize for this bracket")]
    NoPrizeForBracket { ticket_id: u64, bracket: u32 },

    // Randomness
    #[error("Randomness not yet available")]
    RandomnessNotReady { request_id: u64 },

    #[error("Unknown randomness request")]
    UnknownRandomnessRequest { request_id: u64 },

    #[error("Randomness already fulfilled")]
    RandomnessAlreadyFulfilled { request_id: u64 },

    // Token
    #[error("Insufficient allowance")]
    InsufficientAllowance {
        required: Uint128,
        allowance: Uint128,
    },

    #[error("Transfer failed: insufficient balance")]
    TransferFailed { required: Uint128, balance: Uint128 },

    #[error("Cannot be lottery token")]
    InvalidRecoverToken {},

    // Admin
    #[error("minPrice must be < maxPrice")]
    InvalidPriceBounds {},

    #[error("Lottery size outside of range")]
    InvalidLotterySize {},

    #[error("Must be > 0")]
    InvalidMaxTickets {},

    #[error("Value is unchanged")]
    NoOpUpdate {},
}
