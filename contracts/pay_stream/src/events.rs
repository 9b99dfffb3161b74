use soroban_sdk::{contractevent, Address, Env, String};

/// Event: treasury funded
#[contractevent]
#[derive(Clone, Debug)]
pub struct Deposited {
    pub from: Address,
    pub amount: i128,
    pub treasury: i128,
}

/// Event: salary stream registered
#[contractevent]
#[derive(Clone, Debug)]
pub struct StreamCreated {
    pub employee: Address,
    pub rate_per_second: i128,
    pub tax_percent: u32,
    pub start_time: u64,
}

/// Event: accrual frozen. `accrued` is the entitlement retained at the
/// freeze point so observers can track outstanding obligations.
#[contractevent]
#[derive(Clone, Debug)]
pub struct StreamPaused {
    pub employee: Address,
    pub paused_at: u64,
    pub accrued: i128,
}

/// Event: accrual resumed
#[contractevent]
#[derive(Clone, Debug)]
pub struct StreamResumed {
    pub employee: Address,
    pub resumed_at: u64,
}

/// Event: stream terminated. `net`/`tax` record the final settlement
/// split; both zero when nothing was outstanding.
#[contractevent]
#[derive(Clone, Debug)]
pub struct StreamCancelled {
    pub employee: Address,
    pub net: i128,
    pub tax: i128,
}

/// Event: entitlement paid out. Carries the full split so history can be
/// reconstructed from the log alone.
#[contractevent]
#[derive(Clone, Debug)]
pub struct Withdrawn {
    pub employee: Address,
    pub gross: i128,
    pub net: i128,
    pub tax: i128,
}

/// Event: one-time bonus paid from treasury
#[contractevent]
#[derive(Clone, Debug)]
pub struct BonusPaid {
    pub employee: Address,
    pub amount: i128,
    pub reason: String,
    pub total_bonuses: i128,
}

/// Event: tax vault swept to owner
#[contractevent]
#[derive(Clone, Debug)]
pub struct TaxWithdrawn {
    pub owner: Address,
    pub amount: i128,
}

/// Event: admin role reassigned
#[contractevent]
#[derive(Clone, Debug)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn emit_deposited(e: &Env, event: Deposited) {
    event.publish(e);
}

pub fn emit_stream_created(e: &Env, event: StreamCreated) {
    event.publish(e);
}

pub fn emit_stream_paused(e: &Env, event: StreamPaused) {
    event.publish(e);
}

pub fn emit_stream_resumed(e: &Env, event: StreamResumed) {
    event.publish(e);
}

pub fn emit_stream_cancelled(e: &Env, event: StreamCancelled) {
    event.publish(e);
}

pub fn emit_withdrawn(e: &Env, event: Withdrawn) {
    event.publish(e);
}

pub fn emit_bonus_paid(e: &Env, event: BonusPaid) {
    event.publish(e);
}

pub fn emit_tax_withdrawn(e: &Env, event: TaxWithdrawn) {
    event.publish(e);
}

pub fn emit_ownership_transferred(e: &Env, event: OwnershipTransferred) {
    event.publish(e);
}
