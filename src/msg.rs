use crate::state::{Config, Lottery, Ticket};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    /// CW20 token used for tickets and prizes.
    pub token: String,
    pub randomness_provider: String,
    pub operator: Option<String>,
    pub treasury: Option<String>,
    pub charity: Option<String>,
    pub injector: Option<String>,
    pub min_price_ticket: Option<Uint128>,
    pub max_price_ticket: Option<Uint128>,
    pub max_number_tickets_per_buy_or_claim: Option<u32>,
    pub lottery_size: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    StartLottery {
        end_time: u64,
        price_ticket: Uint128,
        discount_divisor: u64,
        rewards_breakdown: Vec<u32>,
        burn_fee: u32,
        treasury_fee: u32,
        charity_fee: u32,
    },
    CloseLottery {
        lottery_id: u64,
    },
    DrawFinalNumberAndMakeClaimable {
        lottery_id: u64,
        inject_funds: bool,
    },
    /// Oracle callback answering the request emitted by `CloseLottery`.
    FulfillRandomness {
        request_id: u64,
        random_value: Uint256,
    },
    BuyTickets {
        lottery_id: u64,
        numbers: Vec<u32>,
    },
    ClaimTickets {
        lottery_id: u64,
        ticket_ids: Vec<u64>,
        brackets: Vec<u32>,
    },
    InjectFunds {
        lottery_id: u64,
        amount: Uint128,
    },
    SetMinAndMaxTicketPrice {
        min_price_ticket: Uint128,
        max_price_ticket: Uint128,
    },
    SetMaxNumberTicketsPerBuy {
        max_number_tickets_per_buy_or_claim: u32,
    },
    SetLotterySize {
        size: u32,
    },
    SetLotteryLimits {
        min_discount_divisor: Option<u64>,
        max_treasury_fee: Option<u32>,
        max_charity_fee: Option<u32>,
        max_burn_fee: Option<u32>,
        min_length_lottery: Option<u64>,
        max_length_lottery: Option<u64>,
    },
    SetOperatorAndTreasuryAndCharityAndInjectorAddresses {
        operator: String,
        treasury: String,
        charity: String,
        injector: String,
    },
    SetRandomnessProvider {
        randomness_provider: String,
    },
    TransferOwnership {
        new_owner: String,
    },
    RecoverWrongTokens {
        token: String,
        amount: Uint128,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    QueryConfig {},
    #[returns(Lottery)]
    QueryLottery { lottery_id: u64 },
    #[returns(CurrentLotteryIdResponse)]
    QueryCurrentLotteryId {},
    #[returns(Ticket)]
    QueryTicket { ticket_id: u64 },
    #[returns(UserInfoResponse)]
    QueryUserInfoForLottery {
        user: String,
        lottery_id: u64,
        cursor: Option<u64>,
        size: Option<u32>,
    },
    #[returns(TotalPriceResponse)]
    QueryTotalPriceForBulkTickets {
        discount_divisor: u64,
        price_ticket: Uint128,
        number_tickets: u64,
    },
    #[returns(RewardsResponse)]
    QueryRewardsForTicket {
        lottery_id: u64,
        ticket_id: u64,
        bracket: u32,
    },
    #[returns(LatestRequestIdResponse)]
    QueryLatestRequestId {},
    #[returns(RandomResultResponse)]
    QueryRandomResult { request_id: Option<u64> },
}

#[cw_serde]
pub struct CurrentLotteryIdResponse {
    pub lottery_id: u64,
}

#[cw_serde]
pub struct UserInfoResponse {
    pub ticket_ids: Vec<u64>,
    pub numbers: Vec<u32>,
    pub claimed: Vec<bool>,
    /// Last ticket id of this page, passed back as `cursor` for the next one.
    /// `None` once there is nothing left to page through.
    pub cursor: Option<u64>,
}

#[cw_serde]
pub struct TotalPriceResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct RewardsResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct LatestRequestIdResponse {
    pub request_id: u64,
}

#[cw_serde]
pub struct RandomResultResponse {
    pub request_id: u64,
    pub lottery_id: u64,
    pub random_value: Option<Uint256>,
}
