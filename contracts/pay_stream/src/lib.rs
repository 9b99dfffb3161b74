#![no_std]

mod events;
pub mod storage;


use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Vec};

use events::{
    BonusPaid, Deposited, OwnershipTransferred, StreamCancelled, StreamCreated, StreamPaused,
    StreamResumed, TaxWithdrawn, Withdrawn,
};
use storage::{DataKey, Stream, StreamState};

/// PayStream settlement ledger.
///
/// One instance per organization. Holds custody of a single payment token
/// and tracks three internal balances: the treasury (deposits not yet paid
/// out), the tax vault (withheld amounts awaiting the owner), and a running
/// bonus total. Employee entitlement is never stored; it is recomputed
/// lazily as elapsed active time times the stream rate.
///
/// Stream creation performs no solvency check against future payroll: the
/// obligation is a forward promise the employer keeps funded, not an
/// escrowed debit. Individual payouts that the treasury cannot cover fail
/// whole.
#[contract]
pub struct PayStreamContract;

fn require_initialized(env: &Env) {
    assert!(storage::is_initialized(env), "Contract not initialized");
}

/// Authenticates the stored owner and returns it.
fn require_owner(env: &Env) -> Address {
    let owner = storage::read_owner(env);
    owner.require_auth();
    owner
}

// Transaction-scoped busy flag. Every mutating entry point takes the flag
// for its duration; a reentrant mutating call finds it set and aborts.
fn lock(env: &Env) {
    let busy = env
        .storage()
        .temporary()
        .get::<_, bool>(&DataKey::Busy)
        .unwrap_or(false);
    assert!(!busy, "Reentrant call");
    env.storage().temporary().set(&DataKey::Busy, &true);
}

fn unlock(env: &Env) {
    env.storage().temporary().remove(&DataKey::Busy);
}

fn accrued_between(rate_per_second: i128, from: u64, until: u64) -> i128 {
    if until <= from {
        return 0;
    }
    rate_per_second
        .checked_mul(i128::from(until - from))
        .expect("Accrual overflow")
}

/// End of the accrual window for a stream at ledger time `now`.
fn accrual_until(stream: &Stream, now: u64) -> u64 {
    match stream.state {
        StreamState::Active => now,
        StreamState::Paused => stream.paused_at,
        StreamState::Cancelled => stream.last_withdraw_time,
    }
}

/// Splits a gross amount into (net, tax). Integer division truncates the
/// tax downward, so the remainder stays with net; net + tax == gross holds
/// exactly.
fn split_tax(gross: i128, tax_percent: u32) -> (i128, i128) {
    let tax = gross
        .checked_mul(i128::from(tax_percent))
        .expect("Tax overflow")
        / 100;
    (gross - tax, tax)
}

/// Settles the outstanding entitlement of `stream`: debits the treasury by
/// the gross amount, credits the tax vault, resets the accrual anchor, and
/// transfers the net amount to the employee. All storage mutation happens
/// before the token transfer.
///
/// Returns (gross, net, tax). Panics if the treasury cannot cover the
/// gross amount.
fn settle_accrued(env: &Env, stream: &mut Stream, now: u64) -> (i128, i128, i128) {
    let until = accrual_until(stream, now);
    let gross = accrued_between(stream.rate_per_second, stream.last_withdraw_time, until);
    if gross == 0 {
        return (0, 0, 0);
    }

    let treasury = storage::read_treasury(env);
    assert!(gross <= treasury, "Insufficient treasury");

    let (net, tax) = split_tax(gross, stream.tax_percent);

    storage::write_treasury(env, treasury - gross);
    let vault = storage::read_tax_vault(env)
        .checked_add(tax)
        .expect("Tax vault overflow");
    storage::write_tax_vault(env, vault);
    stream.last_withdraw_time = until;
    storage::write_stream(env, stream);

    let token = storage::read_token(env);
    token::Client::new(env, &token).transfer(
        &env.current_contract_address(),
        &stream.employee,
        &net,
    );

    (gross, net, tax)
}

#[contractimpl]
impl PayStreamContract {
    /// Initializes the ledger with its owner (the employer/admin) and the
    /// payment token. Can only be executed once.
    pub fn initialize(env: Env, owner: Address, token: Address) {
        assert!(!storage::is_initialized(&env), "Contract already initialized");

        storage::write_owner(&env, &owner);
        storage::write_token(&env, &token);
        storage::write_treasury(&env, 0);
        storage::write_tax_vault(&env, 0);
        storage::write_total_bonuses(&env, 0);
        storage::set_initialized(&env);
    }

    /// Funds the treasury. Open to any caller; `from` must authenticate
    /// and have approved the token transfer.
    pub fn deposit(env: Env, from: Address, amount: i128) {
        require_initialized(&env);
        from.require_auth();
        lock(&env);
        assert!(amount > 0, "Amount must be positive");

        let treasury = storage::read_treasury(&env)
            .checked_add(amount)
            .expect("Treasury overflow");
        storage::write_treasury(&env, treasury);

        let token = storage::read_token(&env);
        token::Client::new(&env, &token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_deposited(
            &env,
            Deposited {
                from,
                amount,
                treasury,
            },
        );
        unlock(&env);
    }

    /// Registers a salary stream for `employee`. Owner only.
    ///
    /// Rejected while a live (active or paused) stream exists for the
    /// address; re-creation after cancellation resets the record in place.
    /// First-time employees are appended to the registry.
    pub fn create_stream(env: Env, employee: Address, rate_per_second: i128, tax_percent: u32) {
        require_initialized(&env);
        require_owner(&env);
        lock(&env);
        assert!(rate_per_second > 0, "Rate must be positive");
        assert!(tax_percent <= 100, "Tax percent out of range");

        let existing = storage::read_stream(&env, &employee);
        if let Some(stream) = &existing {
            assert!(
                stream.state == StreamState::Cancelled,
                "Stream already exists"
            );
        }

        let now = env.ledger().timestamp();
        let stream = Stream {
            employee: employee.clone(),
            rate_per_second,
            tax_percent,
            state: StreamState::Active,
            start_time: now,
            last_withdraw_time: now,
            paused_at: 0,
        };
        storage::write_stream(&env, &stream);

        if existing.is_none() {
            storage::push_employee(&env, &employee);
        }

        events::emit_stream_created(
            &env,
            StreamCreated {
                employee,
                rate_per_second,
                tax_percent,
                start_time: now,
            },
        );
        unlock(&env);
    }

    /// Freezes accrual for `employee`'s stream. Owner only.
    ///
    /// The accrual anchor is left untouched; the record gains a freeze
    /// point so already-earned entitlement is retained and readable.
    pub fn pause_stream(env: Env, employee: Address) {
        require_initialized(&env);
        require_owner(&env);
        lock(&env);

        let mut stream = storage::read_stream(&env, &employee).expect("Stream not found");
        assert!(stream.state == StreamState::Active, "Stream is not active");

        let now = env.ledger().timestamp();
        stream.state = StreamState::Paused;
        stream.paused_at = now;
        storage::write_stream(&env, &stream);

        let accrued = accrued_between(stream.rate_per_second, stream.last_withdraw_time, now);
        events::emit_stream_paused(
            &env,
            StreamPaused {
                employee,
                paused_at: now,
                accrued,
            },
        );
        unlock(&env);
    }

    /// Resumes accrual for `employee`'s stream. Owner only.
    ///
    /// The anchor is shifted forward by the paused duration so the paused
    /// interval contributes nothing; accrual continues from where it left
    /// off regardless of how many pause/resume cycles occurred.
    pub fn resume_stream(env: Env, employee: Address) {
        require_initialized(&env);
        require_owner(&env);
        lock(&env);

        let mut stream = storage::read_stream(&env, &employee).expect("Stream not found");
        assert!(stream.state == StreamState::Paused, "Stream is not paused");

        let now = env.ledger().timestamp();
        stream.last_withdraw_time += now - stream.paused_at;
        stream.state = StreamState::Active;
        stream.paused_at = 0;
        storage::write_stream(&env, &stream);

        events::emit_stream_resumed(
            &env,
            StreamResumed {
                employee,
                resumed_at: now,
            },
        );
        unlock(&env);
    }

    /// Terminates `employee`'s stream. Owner only.
    ///
    /// Outstanding entitlement is settled to the employee through the same
    /// tax-split path as `withdraw` before the stream is marked cancelled;
    /// the cancellation fails whole if the treasury cannot cover it. The
    /// registry entry is kept for stable enumeration.
    pub fn cancel_stream(env: Env, employee: Address) {
        require_initialized(&env);
        require_owner(&env);
        lock(&env);

        let mut stream = storage::read_stream(&env, &employee).expect("Stream not found");
        assert!(stream.state != StreamState::Cancelled, "Stream already cancelled");

        let now = env.ledger().timestamp();
        let (_, net, tax) = settle_accrued(&env, &mut stream, now);

        stream.state = StreamState::Cancelled;
        stream.paused_at = 0;
        storage::write_stream(&env, &stream);

        events::emit_stream_cancelled(&env, StreamCancelled { employee, net, tax });
        unlock(&env);
    }

    /// Pays out the caller's accrued entitlement. Employee only.
    ///
    /// Ordering: compute gross, split tax, debit treasury, credit tax
    /// vault, reset the accrual anchor, then transfer net to the employee.
    /// A zero entitlement is rejected rather than silently ignored.
    ///
    /// Returns the net amount transferred.
    pub fn withdraw(env: Env, employee: Address) -> i128 {
        require_initialized(&env);
        employee.require_auth();
        lock(&env);

        let mut stream = storage::read_stream(&env, &employee).expect("Stream not found");
        assert!(stream.state != StreamState::Cancelled, "Stream is cancelled");

        let now = env.ledger().timestamp();
        let (gross, net, tax) = settle_accrued(&env, &mut stream, now);
        assert!(gross > 0, "Nothing accrued");

        events::emit_withdrawn(
            &env,
            Withdrawn {
                employee,
                gross,
                net,
                tax,
            },
        );
        unlock(&env);
        net
    }

    /// Pays a one-time bonus from the treasury. Owner only. Independent of
    /// any stream state; no tax is withheld on bonuses.
    pub fn send_bonus(env: Env, employee: Address, amount: i128, reason: String) {
        require_initialized(&env);
        require_owner(&env);
        lock(&env);
        assert!(amount > 0, "Amount must be positive");

        let treasury = storage::read_treasury(&env);
        assert!(amount <= treasury, "Insufficient treasury");

        storage::write_treasury(&env, treasury - amount);
        let total_bonuses = storage::read_total_bonuses(&env)
            .checked_add(amount)
            .expect("Bonus total overflow");
        storage::write_total_bonuses(&env, total_bonuses);

        let token = storage::read_token(&env);
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &employee,
            &amount,
        );

        events::emit_bonus_paid(
            &env,
            BonusPaid {
                employee,
                amount,
                reason,
                total_bonuses,
            },
        );
        unlock(&env);
    }

    /// Sweeps the full tax vault to the owner. Owner only. An empty vault
    /// is an explicit rejection.
    ///
    /// Returns the amount swept.
    pub fn withdraw_tax(env: Env) -> i128 {
        require_initialized(&env);
        let owner = require_owner(&env);
        lock(&env);

        let amount = storage::read_tax_vault(&env);
        assert!(amount > 0, "No withheld tax");

        storage::write_tax_vault(&env, 0);

        let token = storage::read_token(&env);
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &owner,
            &amount,
        );

        events::emit_tax_withdrawn(&env, TaxWithdrawn { owner, amount });
        unlock(&env);
        amount
    }

    /// Reassigns the admin role. Owner only.
    pub fn transfer_ownership(env: Env, new_owner: Address) {
        require_initialized(&env);
        let previous_owner = require_owner(&env);
        lock(&env);

        storage::write_owner(&env, &new_owner);

        events::emit_ownership_transferred(
            &env,
            OwnershipTransferred {
                previous_owner,
                new_owner,
            },
        );
        unlock(&env);
    }

    /// Current entitlement for `employee` at the ledger timestamp: grows
    /// per second while active, constant while paused, zero when cancelled
    /// or never created.
    pub fn get_accrued(env: Env, employee: Address) -> i128 {
        let stream = match storage::read_stream(&env, &employee) {
            Some(stream) => stream,
            None => return 0,
        };
        let until = accrual_until(&stream, env.ledger().timestamp());
        accrued_between(stream.rate_per_second, stream.last_withdraw_time, until)
    }

    /// Reads a stream record. None if never created.
    pub fn get_stream(env: Env, employee: Address) -> Option<Stream> {
        storage::read_stream(&env, &employee)
    }

    /// Every address that ever had a stream, in insertion order. Cancelled
    /// employees are not pruned.
    pub fn get_all_employees(env: Env) -> Vec<Address> {
        storage::read_employees(&env)
    }

    pub fn treasury_balance(env: Env) -> i128 {
        storage::read_treasury(&env)
    }

    pub fn tax_vault_balance(env: Env) -> i128 {
        storage::read_tax_vault(&env)
    }

    pub fn total_bonuses_paid(env: Env) -> i128 {
        storage::read_total_bonuses(&env)
    }

    pub fn get_owner(env: Env) -> Address {
        storage::read_owner(&env)
    }
}
