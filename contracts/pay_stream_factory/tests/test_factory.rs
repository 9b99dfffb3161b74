#![cfg(test)]

use pay_stream_factory::{PayStreamFactory, PayStreamFactoryClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, BytesN, Env};

fn setup<'a>() -> (Env, PayStreamFactoryClient<'a>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(PayStreamFactory, ());
    let client = PayStreamFactoryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);
    (env, client, admin)
}

#[test]
fn test_initialize_stores_admin() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_admin().unwrap(), admin);
}

#[test]
#[should_panic(expected = "Factory already initialized")]
fn test_double_initialize_rejected() {
    let (env, client, _) = setup();
    let other = Address::generate(&env);
    client.initialize(&other);
}

#[test]
fn test_deployed_list_starts_empty() {
    let (_env, client, _) = setup();
    assert_eq!(client.get_deployed().len(), 0);
}

#[test]
#[should_panic(expected = "Factory not initialized")]
fn test_deploy_before_initialize_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(PayStreamFactory, ());
    let client = PayStreamFactoryClient::new(&env, &contract_id);

    let deployer = Address::generate(&env);
    let owner = Address::generate(&env);
    let token = Address::generate(&env);
    let wasm_hash = BytesN::from_array(&env, &[0u8; 32]);
    let salt = BytesN::from_array(&env, &[1u8; 32]);

    client.deploy_ledger(&deployer, &wasm_hash, &salt, &owner, &token);
}
