//! Upgraded genesis export integration tests

use std::fs;
use std::path::{Path, PathBuf};

use genutils_core::{
    Address, AuthGenesis, BankGenesis, CoreError, DistributionGenesis, Int, PubKey,
    StakingGenesis, BONDED_POOL_NAME, NOT_BONDED_POOL_NAME,
};
use genutils_ops::{
    export_upgraded_genesis, ChainParams, OpsError, UpgradeConstants, UpgradeParams,
};
use genutils_state::{GenesisDoc, StateError};
use serde_json::{json, Value};
use tempfile::tempdir;

const OWNER_KEY: &str = "5Fujs6ObfVSQPZUXlu/DkO0Lv5yjunyoGjmJzi8Sf8k=";
const SECOND_KEY: &str = "GASvzNjkrSyY0SzDH048/qCB2lv/7seH5qFMlmyh8BY=";

fn pubkey(key: &str) -> PubKey {
    PubKey::from_json(&json!({"@type": "/cosmos.crypto.ed25519.PubKey", "key": key}).to_string())
        .unwrap()
}

fn address(byte: u8, hrp: &str) -> String {
    Address::from_bytes(&[byte; 20]).unwrap().to_bech32(hrp).unwrap()
}

fn module_address(name: &str) -> String {
    Address::module(name).to_bech32("bitsong").unwrap()
}

/// A small exported mainnet-like genesis with one old validator
fn exported_genesis() -> Value {
    let holder = address(5, "bitsong");
    let old_operator = address(6, "bitsongvaloper");
    json!({
        "genesis_time": "2021-06-01T00:00:00Z",
        "chain_id": "bigbang-1",
        "initial_height": "12345",
        "consensus_params": {"block": {"max_bytes": "22020096", "max_gas": "-1"}},
        "app_hash": "",
        "app_state": {
            "auth": {
                "params": {"max_memo_characters": "256"},
                "accounts": [
                    {
                        "@type": "/cosmos.auth.v1beta1.BaseAccount",
                        "address": holder,
                        "pub_key": null,
                        "account_number": "4",
                        "sequence": "12"
                    },
                    {
                        "@type": "/cosmos.auth.v1beta1.ModuleAccount",
                        "base_account": {
                            "address": module_address(BONDED_POOL_NAME),
                            "pub_key": null,
                            "account_number": "1",
                            "sequence": "0"
                        },
                        "name": BONDED_POOL_NAME,
                        "permissions": ["burner", "staking"]
                    }
                ]
            },
            "bank": {
                "params": {"default_send_enabled": true},
                "balances": [
                    {"address": holder, "coins": [{"denom": "ubtsg", "amount": "1000"}]},
                    {
                        "address": module_address(BONDED_POOL_NAME),
                        "coins": [{"denom": "ubtsg", "amount": "250000"}]
                    },
                    {
                        "address": module_address(NOT_BONDED_POOL_NAME),
                        "coins": [{"denom": "ubtsg", "amount": "7000"}]
                    }
                ],
                "supply": [{"denom": "ubtsg", "amount": "258000"}],
                "denom_metadata": []
            },
            "staking": {
                "params": {"bond_denom": "ubtsg", "max_validators": 100},
                "last_total_power": "250",
                "last_validator_powers": [{"address": old_operator, "power": "250"}],
                "validators": [{
                    "operator_address": old_operator,
                    "consensus_pubkey": {
                        "@type": "/cosmos.crypto.ed25519.PubKey",
                        "key": SECOND_KEY
                    },
                    "jailed": false,
                    "status": "BOND_STATUS_BONDED",
                    "tokens": "250000",
                    "delegator_shares": "250000.000000000000000000",
                    "description": {
                        "moniker": "old",
                        "identity": "",
                        "website": "",
                        "security_contact": "",
                        "details": ""
                    },
                    "unbonding_height": "0",
                    "unbonding_time": "1970-01-01T00:00:00Z",
                    "commission": {
                        "commission_rates": {
                            "rate": "0.050000000000000000",
                            "max_rate": "0.200000000000000000",
                            "max_change_rate": "0.010000000000000000"
                        },
                        "update_time": "2021-06-01T00:00:00Z"
                    },
                    "min_self_delegation": "1"
                }],
                "delegations": [{
                    "delegator_address": holder,
                    "validator_address": old_operator,
                    "shares": "250000.000000000000000000"
                }],
                "unbonding_delegations": [],
                "redelegations": [],
                "exported": true
            },
            "distribution": {
                "params": {"community_tax": "0.020000000000000000"},
                "fee_pool": {"community_pool": []},
                "previous_proposer": "bitsongvalcons1old",
                "outstanding_rewards": [{"validator_address": old_operator, "outstanding_rewards": []}],
                "delegator_starting_infos": [{
                    "delegator_address": holder,
                    "validator_address": old_operator,
                    "starting_info": {"previous_period": "3", "stake": "250000.000000000000000000", "height": "100"}
                }]
            },
            "gov": {"starting_proposal_id": "7"}
        }
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn params(unbonded: bool) -> UpgradeParams {
    UpgradeParams {
        owner: address(1, "bitsong"),
        operator: address(1, "bitsongvaloper"),
        consensus_pubkey: pubkey(OWNER_KEY),
        unbonded_pubkey: unbonded.then(|| pubkey(SECOND_KEY)),
    }
}

fn run(dir: &Path, params: &UpgradeParams) -> (Result<genutils_ops::UpgradeReport, OpsError>, PathBuf) {
    let input = write_json(dir, "genesis.json", &exported_genesis());
    let output = dir.join("new_genesis.json");
    let result = export_upgraded_genesis(
        &input,
        &output,
        params,
        &ChainParams::default(),
        &UpgradeConstants::default(),
    );
    (result, output)
}

#[test]
fn test_upgrade_end_to_end() {
    let dir = tempdir().unwrap();
    let params = params(true);
    let (result, output) = run(dir.path(), &params);
    let report = result.unwrap();

    assert_eq!(report.bonded_tokens, Int::new(250_000));
    assert_eq!(report.not_bonded_tokens, Int::new(7_000));
    assert_eq!(report.discarded_validators, 1);
    assert_eq!(report.discarded_delegations, 1);
    assert!(!report.default_bonded_tokens_used);

    let doc = GenesisDoc::load(&output).unwrap();
    assert_eq!(doc.chain_id, "bigbang-1");
    assert_eq!(doc.initial_height, Some(json!("12345")));
    let gov: Value = serde_json::from_str(doc.app_state.raw("gov").unwrap()).unwrap();
    assert_eq!(gov, json!({"starting_proposal_id": "7"}));

    let auth: AuthGenesis = doc.app_state.decode().unwrap();
    let accounts = auth.unpack_accounts().unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0].account_number(), 1);
    assert_eq!(accounts[2].address(), params.owner);

    let bank: BankGenesis = doc.app_state.decode().unwrap();
    assert!(bank.check_supply().is_ok());
    assert_eq!(bank.supply.amount_of("ubtsg"), Int::new(1_000_258_000));

    let staking: StakingGenesis = doc.app_state.decode().unwrap();
    assert_eq!(staking.validators.len(), 2);
    assert_eq!(staking.delegations.len(), 1);
    assert_eq!(staking.delegations[0].delegator_address, params.owner);
    assert_eq!(staking.last_total_power, Int::zero());
    assert!(!staking.exported);
    assert_eq!(staking.extra["params"]["max_validators"], json!(100));

    let distribution: DistributionGenesis = doc.app_state.decode().unwrap();
    assert!(distribution.outstanding_rewards.is_empty());
    assert_eq!(distribution.delegator_starting_infos.len(), 1);
    assert!(distribution.previous_proposer.starts_with("bitsongvalcons1"));
    assert!(distribution.extra.contains_key("fee_pool"));
}

#[test]
fn test_output_keys_are_sorted() {
    let dir = tempdir().unwrap();
    let (result, output) = run(dir.path(), &params(false));
    result.unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let app_hash = text.find("\"app_hash\"").unwrap();
    let app_state = text.find("\"app_state\"").unwrap();
    let chain_id = text.find("\"chain_id\"").unwrap();
    assert!(app_hash < app_state && app_state < chain_id);
}

#[test]
fn test_supply_only_changes_by_funding() {
    let dir = tempdir().unwrap();
    let params = params(false);
    let (result, output) = run(dir.path(), &params);
    result.unwrap();

    let before: BankGenesis =
        serde_json::from_value(exported_genesis()["app_state"]["bank"].clone()).unwrap();
    let after: BankGenesis = GenesisDoc::load(&output).unwrap().app_state.decode().unwrap();

    assert_eq!(after.balances.len(), before.balances.len() + 1);
    for balance in &before.balances {
        assert_eq!(after.balance_of(&balance.address), Some(balance));
    }
    assert_eq!(
        after.balance_of(&params.owner).unwrap().coins.amount_of("ubtsg"),
        Int::new(1_000_000_000)
    );
}

#[test]
fn test_invalid_operator_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut params = params(false);
    params.operator = address(1, "bitsongvalcons");
    let (result, output) = run(dir.path(), &params);

    assert!(matches!(
        result,
        Err(OpsError::Core(CoreError::InvalidAddress { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_distribution_module_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut genesis = exported_genesis();
    genesis["app_state"]
        .as_object_mut()
        .unwrap()
        .remove("distribution");
    let input = write_json(dir.path(), "genesis.json", &genesis);
    let output = dir.path().join("new_genesis.json");

    let result = export_upgraded_genesis(
        &input,
        &output,
        &params(false),
        &ChainParams::default(),
        &UpgradeConstants::default(),
    );

    assert!(matches!(
        result,
        Err(OpsError::State(StateError::MissingModule(module))) if module == "distribution"
    ));
    assert!(!output.exists());
}

#[test]
fn test_unchanged_modules_roundtrip() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "genesis.json", &exported_genesis());
    let output = dir.path().join("copy.json");

    let mut doc = GenesisDoc::load(&input).unwrap();
    let staking: StakingGenesis = doc.app_state.decode().unwrap();
    doc.app_state.encode(&staking).unwrap();
    doc.write(&output).unwrap();

    let again: StakingGenesis = GenesisDoc::load(&output).unwrap().app_state.decode().unwrap();
    assert_eq!(staking, again);
    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, exported_genesis());
}
