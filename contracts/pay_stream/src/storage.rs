use soroban_sdk::{contracttype, Address, Env, Vec};

/// Lifecycle states for a salary stream
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StreamState {
    /// Stream is accruing entitlement with wall-clock time
    Active,
    /// Accrual frozen; already-earned entitlement is retained
    Paused,
    /// Terminal; record kept as a sentinel, no entitlement remains
    Cancelled,
}

/// Per-employee salary stream record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stream {
    pub employee: Address,
    /// Token base units owed per second while Active
    pub rate_per_second: i128,
    /// Withholding percentage, 0..=100, applied at payout time
    pub tax_percent: u32,
    pub state: StreamState,
    pub start_time: u64,
    /// Accrual anchor; entitlement is earned from this point forward
    pub last_withdraw_time: u64,
    /// Freeze point; meaningful only while Paused
    pub paused_at: u64,
}

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Token,
    Initialized,
    /// Deposited funds not yet paid out
    Treasury,
    /// Withheld tax awaiting owner withdrawal
    TaxVault,
    /// Running total of bonuses paid, for reporting
    TotalBonuses,
    /// Stream keyed by employee address
    Stream(Address),
    /// Insertion-ordered list of every address that ever had a stream
    Employees,
    /// Reentrancy flag, transaction-scoped
    Busy,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
}

pub fn read_owner(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Owner)
        .expect("Contract not initialized")
}

pub fn write_owner(env: &Env, owner: &Address) {
    env.storage().persistent().set(&DataKey::Owner, owner);
}

pub fn read_token(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Token)
        .expect("Contract not initialized")
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&DataKey::Token, token);
}

pub fn read_treasury(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Treasury)
        .unwrap_or(0)
}

pub fn write_treasury(env: &Env, amount: i128) {
    env.storage().persistent().set(&DataKey::Treasury, &amount);
}

pub fn read_tax_vault(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TaxVault)
        .unwrap_or(0)
}

pub fn write_tax_vault(env: &Env, amount: i128) {
    env.storage().persistent().set(&DataKey::TaxVault, &amount);
}

pub fn read_total_bonuses(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalBonuses)
        .unwrap_or(0)
}

pub fn write_total_bonuses(env: &Env, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalBonuses, &amount);
}

pub fn read_stream(env: &Env, employee: &Address) -> Option<Stream> {
    env.storage()
        .persistent()
        .get(&DataKey::Stream(employee.clone()))
}

pub fn write_stream(env: &Env, stream: &Stream) {
    env.storage()
        .persistent()
        .set(&DataKey::Stream(stream.employee.clone()), stream);
}

pub fn read_employees(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Employees)
        .unwrap_or(Vec::new(env))
}

pub fn push_employee(env: &Env, employee: &Address) {
    let mut employees = read_employees(env);
    employees.push_back(employee.clone());
    env.storage().persistent().set(&DataKey::Employees, &employees);
}
