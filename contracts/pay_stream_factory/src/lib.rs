#![no_std]

use soroban_sdk::{
    contract, contractevent, contractimpl, contracttype, vec, Address, BytesN, Env, IntoVal,
    Symbol, Vec,
};

/// Deploys one PayStream ledger per organization from an uploaded wasm.
///
/// The factory holds no funds and keeps no handle on a ledger after
/// deployment; instances are fully independent of each other and of the
/// factory itself.
#[contract]
pub struct PayStreamFactory;

#[contracttype]
#[derive(Clone)]
enum StorageKey {
    Initialized,
    Admin,
    /// Insertion-ordered list of deployed ledger addresses
    Deployed,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct LedgerDeployed {
    pub ledger: Address,
    pub owner: Address,
    pub token: Address,
}

fn require_initialized(env: &Env) {
    let initialized = env
        .storage()
        .persistent()
        .get::<_, bool>(&StorageKey::Initialized)
        .unwrap_or(false);
    assert!(initialized, "Factory not initialized");
}

#[contractimpl]
impl PayStreamFactory {
    /// Initializes the factory. Can only be executed once.
    pub fn initialize(env: Env, admin: Address) {
        admin.require_auth();

        let initialized = env
            .storage()
            .persistent()
            .get::<_, bool>(&StorageKey::Initialized)
            .unwrap_or(false);
        assert!(!initialized, "Factory already initialized");

        env.storage().persistent().set(&StorageKey::Admin, &admin);
        env.storage()
            .persistent()
            .set(&StorageKey::Initialized, &true);
    }

    /// Deploys a new ledger instance from `wasm_hash` and initializes it
    /// with its own owner and payment token.
    ///
    /// `deployer` authenticates and, together with `salt`, determines the
    /// deployed address. Returns the new ledger address.
    pub fn deploy_ledger(
        env: Env,
        deployer: Address,
        wasm_hash: BytesN<32>,
        salt: BytesN<32>,
        owner: Address,
        token: Address,
    ) -> Address {
        require_initialized(&env);
        deployer.require_auth();

        let ledger = env
            .deployer()
            .with_address(deployer, salt)
            .deploy_v2(wasm_hash, ());

        env.invoke_contract::<()>(
            &ledger,
            &Symbol::new(&env, "initialize"),
            vec![&env, owner.into_val(&env), token.into_val(&env)],
        );

        let mut deployed: Vec<Address> = env
            .storage()
            .persistent()
            .get(&StorageKey::Deployed)
            .unwrap_or(Vec::new(&env));
        deployed.push_back(ledger.clone());
        env.storage()
            .persistent()
            .set(&StorageKey::Deployed, &deployed);

        LedgerDeployed {
            ledger: ledger.clone(),
            owner,
            token,
        }
        .publish(&env);

        ledger
    }

    /// Every ledger deployed through this factory, in deployment order.
    pub fn get_deployed(env: Env) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&StorageKey::Deployed)
            .unwrap_or(Vec::new(&env))
    }

    /// Returns the factory admin.
    pub fn get_admin(env: Env) -> Option<Address> {
        env.storage().persistent().get(&StorageKey::Admin)
    }
}
