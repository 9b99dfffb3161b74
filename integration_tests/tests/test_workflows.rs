//! End-to-end workflow tests for the PayStream settlement ledger.
//!
//! ## Coverage
//!
//! 1. **Payroll lifecycle** — treasury funding, stream creation, lazy
//!    accrual, withdrawal with withholding, tax sweep.
//! 2. **Pause/resume accounting** — frozen entitlement across cycles and
//!    withdrawals interleaved with pauses.
//! 3. **Cancellation settlement** — final payout through the tax-split
//!    path and terminal-state behavior.
//! 4. **Bonus flow** — one-time transfers independent of stream state.
//! 5. **Solvency behavior** — optimistic stream creation, clean failure
//!    of payouts the treasury cannot cover.
//! 6. **Factory bookkeeping** — per-organization deployer state.

#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};

use pay_stream::storage::StreamState;
use pay_stream::{PayStreamContract, PayStreamContractClient};
use pay_stream_factory::{PayStreamFactory, PayStreamFactoryClient};

// ============================================================================
// CONSTANTS
// ============================================================================

const ONE_HOUR: u64 = 3_600;
const ONE_DAY: u64 = 86_400;

// ============================================================================
// HELPERS
// ============================================================================

/// Creates a test environment with all auths mocked.
fn env() -> Env {
    let e = Env::default();
    e.mock_all_auths();
    e
}

/// Generates a fresh test address.
fn addr(env: &Env) -> Address {
    Address::generate(env)
}

/// Deploys a Stellar Asset Contract and returns its address.
fn token(env: &Env) -> Address {
    let admin = addr(env);
    env.register_stellar_asset_contract_v2(admin).address()
}

/// Mints `amount` tokens to `to`.
fn mint(env: &Env, tok: &Address, to: &Address, amount: i128) {
    StellarAssetClient::new(env, tok).mint(to, &amount);
}

/// Returns the token balance of `who`.
fn balance(env: &Env, tok: &Address, who: &Address) -> i128 {
    TokenClient::new(env, tok).balance(who)
}

/// Advances the ledger timestamp by `seconds`.
fn advance(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

/// Deploys and initializes a ledger; returns (contract_addr, client, owner).
fn deploy_ledger<'a>(
    env: &'a Env,
    tok: &Address,
) -> (Address, PayStreamContractClient<'a>, Address) {
    let id = env.register(PayStreamContract, ());
    let client = PayStreamContractClient::new(env, &id);
    let owner = addr(env);
    client.initialize(&owner, tok);
    (id, client, owner)
}

// ============================================================================
// SECTION 1: COMPLETE PAYROLL LIFECYCLE
// ============================================================================

/// Deposit -> create stream -> accrue -> withdraw -> sweep tax, with
/// 100 deposited, a 1/sec stream at 10% withholding, and 10 seconds elapsed.
#[test]
fn test_payroll_full_lifecycle() {
    let env = env();
    let tok = token(&env);
    let (cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    // Fund the treasury with 100 units
    mint(&env, &tok, &owner, 100);
    client.deposit(&owner, &100);
    assert_eq!(client.treasury_balance(), 100);

    // Stream: 1 unit/sec, 10% withholding
    client.create_stream(&employee, &1, &10);

    // 10 seconds of accrual
    advance(&env, 10);
    assert_eq!(client.get_accrued(&employee), 10);

    // Withdraw: 9 net to the employee, 1 withheld
    let net = client.withdraw(&employee);
    assert_eq!(net, 9);
    assert_eq!(balance(&env, &tok, &employee), 9);
    assert_eq!(client.tax_vault_balance(), 1);
    assert_eq!(client.treasury_balance(), 90);

    // Custody invariant: the contract holds treasury + vault
    assert_eq!(balance(&env, &tok, &cid), 91);

    // Owner sweeps the vault
    let swept = client.withdraw_tax();
    assert_eq!(swept, 1);
    assert_eq!(client.tax_vault_balance(), 0);
    assert_eq!(balance(&env, &tok, &cid), 90);
}

/// Several employees on one ledger with different rates and tax profiles.
#[test]
fn test_payroll_multiple_employees() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let emp1 = addr(&env);
    let emp2 = addr(&env);
    let emp3 = addr(&env);

    mint(&env, &tok, &owner, 100_000);
    client.deposit(&owner, &100_000);

    client.create_stream(&emp1, &10, &0);
    client.create_stream(&emp2, &20, &10);
    client.create_stream(&emp3, &30, &25);

    let employees = client.get_all_employees();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees.get(0).unwrap(), emp1);
    assert_eq!(employees.get(2).unwrap(), emp3);

    advance(&env, 100);

    assert_eq!(client.withdraw(&emp1), 1_000); // 1000 gross, no tax
    assert_eq!(client.withdraw(&emp2), 1_800); // 2000 gross, 200 withheld
    assert_eq!(client.withdraw(&emp3), 2_250); // 3000 gross, 750 withheld

    assert_eq!(client.tax_vault_balance(), 950);
    assert_eq!(client.treasury_balance(), 100_000 - 6_000);
}

/// Independent ledgers do not share treasury, registry, or tax state.
#[test]
fn test_ledger_instances_are_isolated() {
    let env = env();
    let tok = token(&env);
    let (_c1, org1, owner1) = deploy_ledger(&env, &tok);
    let (_c2, org2, _owner2) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    mint(&env, &tok, &owner1, 500);
    org1.deposit(&owner1, &500);
    org1.create_stream(&employee, &5, &0);

    assert_eq!(org1.treasury_balance(), 500);
    assert_eq!(org2.treasury_balance(), 0);
    assert_eq!(org1.get_all_employees().len(), 1);
    assert_eq!(org2.get_all_employees().len(), 0);
    assert!(org2.get_stream(&employee).is_none());
}

/// Accrued reads are side-effect free: polling does not disturb state.
#[test]
fn test_reads_are_idempotent() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, _owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    client.create_stream(&employee, &7, &15);
    advance(&env, 12);

    let first = client.get_accrued(&employee);
    for _ in 0..5 {
        assert_eq!(client.get_accrued(&employee), first);
        client.get_all_employees();
        client.treasury_balance();
    }
    assert_eq!(first, 84);
}

// ============================================================================
// SECTION 2: PAUSE / RESUME ACCOUNTING
// ============================================================================

/// 5 seconds at rate R followed by a 100-second paused gap leaves the
/// entitlement at exactly 5 * R.
#[test]
fn test_pause_freezes_entitlement_through_long_gap() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, _owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    let rate = 40i128;
    client.create_stream(&employee, &rate, &0);
    advance(&env, 5);
    client.pause_stream(&employee);
    advance(&env, 100);

    assert_eq!(client.get_accrued(&employee), 5 * rate);
    assert_eq!(
        client.get_stream(&employee).unwrap().state,
        StreamState::Paused
    );
}

/// Withdrawals interleaved with pause cycles pay out exactly the active
/// seconds, never the paused gaps.
#[test]
fn test_withdraw_across_pause_cycles() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    mint(&env, &tok, &owner, 10_000);
    client.deposit(&owner, &10_000);
    client.create_stream(&employee, &10, &0);

    advance(&env, ONE_HOUR / 600); // 6 seconds
    client.pause_stream(&employee);
    advance(&env, ONE_DAY);

    // Withdraw the frozen 60 while paused
    assert_eq!(client.withdraw(&employee), 60);

    client.resume_stream(&employee);
    advance(&env, 4);
    assert_eq!(client.get_accrued(&employee), 40);
    assert_eq!(client.withdraw(&employee), 40);

    assert_eq!(balance(&env, &tok, &employee), 100);
    assert_eq!(client.treasury_balance(), 9_900);
}

// ============================================================================
// SECTION 3: CANCELLATION SETTLEMENT
// ============================================================================

/// Cancellation pays the outstanding entitlement through the tax-split
/// path and leaves a terminal record with no further claim.
#[test]
fn test_cancel_settles_and_terminates() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    mint(&env, &tok, &owner, 1_000);
    client.deposit(&owner, &1_000);
    client.create_stream(&employee, &10, &10);
    advance(&env, 30);

    client.cancel_stream(&employee);

    // 300 gross: 270 net, 30 withheld
    assert_eq!(balance(&env, &tok, &employee), 270);
    assert_eq!(client.tax_vault_balance(), 30);
    assert_eq!(client.treasury_balance(), 700);

    // No double payment afterward
    advance(&env, ONE_DAY);
    assert_eq!(client.get_accrued(&employee), 0);
    assert!(client.try_withdraw(&employee).is_err());

    // Cancelled employees stay enumerable
    assert_eq!(client.get_all_employees().len(), 1);
}

/// A cancelled employee can be re-hired on fresh terms.
#[test]
fn test_rehire_after_cancellation() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    mint(&env, &tok, &owner, 1_000);
    client.deposit(&owner, &1_000);

    client.create_stream(&employee, &10, &0);
    advance(&env, 10);
    client.cancel_stream(&employee);
    assert_eq!(balance(&env, &tok, &employee), 100);

    client.create_stream(&employee, &20, &50);
    advance(&env, 10);
    assert_eq!(client.withdraw(&employee), 100); // 200 gross, half withheld

    assert_eq!(client.get_all_employees().len(), 1);
    assert_eq!(client.tax_vault_balance(), 100);
}

// ============================================================================
// SECTION 4: BONUS FLOW
// ============================================================================

/// A 5-unit spot bonus moves treasury to the employee without touching
/// their stream accrual.
#[test]
fn test_bonus_alongside_stream() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    mint(&env, &tok, &owner, 100);
    client.deposit(&owner, &100);
    client.create_stream(&employee, &1, &0);
    advance(&env, 20);

    client.send_bonus(&employee, &5, &String::from_str(&env, "spot bonus"));

    assert_eq!(client.treasury_balance(), 95);
    assert_eq!(client.total_bonuses_paid(), 5);
    assert_eq!(balance(&env, &tok, &employee), 5);
    assert_eq!(client.get_accrued(&employee), 20);
}

// ============================================================================
// SECTION 5: SOLVENCY BEHAVIOR
// ============================================================================

/// Stream creation is optimistic: it succeeds against an empty treasury,
/// and the entitlement becomes payable once funds arrive.
#[test]
fn test_optimistic_creation_without_funding() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let employee = addr(&env);

    client.create_stream(&employee, &100, &0);
    advance(&env, 10);

    assert_eq!(client.get_accrued(&employee), 1_000);
    assert!(client.try_withdraw(&employee).is_err());

    mint(&env, &tok, &owner, 1_000);
    client.deposit(&owner, &1_000);
    assert_eq!(client.withdraw(&employee), 1_000);
}

/// A payout that exceeds the treasury fails whole; a smaller claim from
/// another stream still succeeds afterward.
#[test]
fn test_partial_insolvency_isolates_streams() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let big = addr(&env);
    let small = addr(&env);

    mint(&env, &tok, &owner, 500);
    client.deposit(&owner, &500);
    client.create_stream(&big, &100, &0);
    client.create_stream(&small, &10, &0);
    advance(&env, 10);

    // 1000 accrued for `big` against a 500 treasury
    assert!(client.try_withdraw(&big).is_err());
    assert_eq!(client.treasury_balance(), 500);

    // `small` can still settle its 100
    assert_eq!(client.withdraw(&small), 100);
    assert_eq!(client.treasury_balance(), 400);
}

// ============================================================================
// SECTION 6: FACTORY BOOKKEEPING
// ============================================================================

/// Factory initialization and deployment-list bookkeeping. On-network
/// deployment from wasm is exercised via the CLI; here the factory's own
/// state machine is covered.
#[test]
fn test_factory_state() {
    let env = env();
    let factory_id = env.register(PayStreamFactory, ());
    let factory = PayStreamFactoryClient::new(&env, &factory_id);

    let admin = addr(&env);
    factory.initialize(&admin);

    assert_eq!(factory.get_admin().unwrap(), admin);
    assert_eq!(factory.get_deployed().len(), 0);

    let r = factory.try_initialize(&admin);
    assert!(r.is_err());
}

// ============================================================================
// SECTION 7: OWNERSHIP
// ============================================================================

/// Ownership transfer hands the full admin surface to the new owner.
#[test]
fn test_ownership_transfer_workflow() {
    let env = env();
    let tok = token(&env);
    let (_cid, client, owner) = deploy_ledger(&env, &tok);
    let successor = addr(&env);
    let employee = addr(&env);

    mint(&env, &tok, &owner, 1_000);
    client.deposit(&owner, &1_000);
    client.create_stream(&employee, &10, &50);
    advance(&env, 10);
    client.withdraw(&employee);

    client.transfer_ownership(&successor);
    assert_eq!(client.get_owner(), successor);

    // The successor sweeps the vault and keeps administering streams
    let swept = client.withdraw_tax();
    assert_eq!(swept, 50);
    assert_eq!(balance(&env, &tok, &successor), 50);

    client.pause_stream(&employee);
    assert_eq!(
        client.get_stream(&employee).unwrap().state,
        StreamState::Paused
    );
}
