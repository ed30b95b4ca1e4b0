use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use genutils_core::{
    sanitize_accounts, Address, AuthGenesis, BankGenesis, BaseAccount, BondStatus, Coin, Coins,
    CommissionRates, Dec, Delegation, DelegatorStartingInfoRecord, DistributionGenesis,
    GenesisAccount, Int, NewValidator, PubKey, StakingGenesis, Validator, BONDED_POOL_NAME,
    NOT_BONDED_POOL_NAME,
};
use genutils_state::AppState;

use crate::chain::ChainParams;
use crate::error::OpsError;

/// Who receives the new validator
#[derive(Debug, Clone)]
pub struct UpgradeParams {
    /// Account that owns the bonded validator and receives the funding
    pub owner: String,
    /// Operator address of the bonded validator
    pub operator: String,
    pub consensus_pubkey: PubKey,
    /// Consensus key of an optional second, unbonded validator
    pub unbonded_pubkey: Option<PubKey>,
}

/// Fixed amounts and settings applied by the upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConstants {
    /// Bond-denom amount minted to the owner
    pub funding_amount: Int,
    /// Bonded validator tokens when the bonded pool is empty
    pub default_bonded_tokens: Int,
    pub commission_rates: CommissionRates,
    pub min_self_delegation: Int,
    pub bonded_moniker: String,
    pub unbonded_moniker: String,
}

impl Default for UpgradeConstants {
    fn default() -> Self {
        UpgradeConstants {
            funding_amount: Int::new(1_000_000_000),
            default_bonded_tokens: Int::new(100_000_000),
            commission_rates: CommissionRates {
                rate: Dec::from_bps(100),
                max_rate: Dec::from_bps(1_000),
                max_change_rate: Dec::from_bps(100),
            },
            min_self_delegation: Int::new(1),
            bonded_moniker: "moniker1".to_string(),
            unbonded_moniker: "moniker2".to_string(),
        }
    }
}

/// The module states the upgrade reads and rewrites
#[derive(Debug, Clone)]
pub struct UpgradeModules {
    pub auth: AuthGenesis,
    pub bank: BankGenesis,
    pub staking: StakingGenesis,
    pub distribution: DistributionGenesis,
}

impl UpgradeModules {
    pub fn decode(app_state: &AppState) -> Result<Self, OpsError> {
        Ok(UpgradeModules {
            auth: app_state.decode()?,
            bank: app_state.decode()?,
            staking: app_state.decode()?,
            distribution: app_state.decode()?,
        })
    }

    pub fn encode(&self, app_state: &mut AppState) -> Result<(), OpsError> {
        app_state.encode(&self.auth)?;
        app_state.encode(&self.bank)?;
        app_state.encode(&self.staking)?;
        app_state.encode(&self.distribution)?;
        Ok(())
    }
}

/// What the upgrade did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeReport {
    pub owner: String,
    pub operator: String,
    pub unbonded_operator: Option<String>,
    pub bonded_tokens: Int,
    pub not_bonded_tokens: Int,
    /// The bonded pool was empty, so the validator's tokens do not match
    /// the pool balance
    pub default_bonded_tokens_used: bool,
    pub discarded_validators: usize,
    pub discarded_delegations: usize,
}

/// The second validator, resolved from its consensus key
struct UnbondedValidator<'a> {
    pubkey: &'a PubKey,
    operator: String,
}

impl<'a> UnbondedValidator<'a> {
    fn resolve(pubkey: &'a PubKey, chain: &ChainParams) -> Result<Self, OpsError> {
        let address = pubkey.consensus_address()?;
        Ok(UnbondedValidator {
            pubkey,
            operator: address.to_bech32(&chain.prefixes.validator)?,
        })
    }
}

/// Bond-denom balance of a module account, zero if it has none
fn pool_amount(bank: &BankGenesis, name: &str, chain: &ChainParams) -> Result<Int, OpsError> {
    let address = Address::module(name).to_bech32(&chain.prefixes.account)?;
    match bank.balance_of(&address) {
        Some(balance) => Ok(balance.coins.amount_of(&chain.bond_denom)),
        None => {
            warn!(pool = name, address = %address, "Pool account has no balance, using zero");
            Ok(Int::zero())
        }
    }
}

fn upgrade_accounts(auth: &mut AuthGenesis, owner: &str) -> Result<(), OpsError> {
    let mut accounts = auth.unpack_accounts()?;
    sanitize_accounts(&mut accounts);

    if accounts.iter().any(|account| account.address() == owner) {
        debug!(owner, "Owner account already exists");
    } else {
        accounts.push(GenesisAccount::Base(BaseAccount::new(owner, None, 0, 0)));
        debug!(owner, "Added owner account");
    }

    auth.pack_accounts(&accounts)?;
    Ok(())
}

fn fund_owner(
    bank: &mut BankGenesis,
    owner: &str,
    chain: &ChainParams,
    constants: &UpgradeConstants,
) {
    let supply_was_consistent = bank.check_supply().is_ok();
    let funding = Coins::from(Coin::from_int(&chain.bond_denom, constants.funding_amount.clone()));
    bank.mint(owner, &funding);

    if let Err(e) = bank.check_supply() {
        if supply_was_consistent {
            warn!(error = %e, "Supply no longer matches balances after funding");
        } else {
            warn!(error = %e, "Supply did not match balances before funding");
        }
    }
    info!(owner, funding = %funding, "Funded owner");
}

/// Replace the validator set, delegations and reward bookkeeping of a
/// genesis state with a single bonded validator owned by `params.owner`,
/// plus an optional unbonded one.
///
/// Addresses and keys are checked before anything is modified.
pub fn synthesize_upgrade(
    mut modules: UpgradeModules,
    params: &UpgradeParams,
    chain: &ChainParams,
    constants: &UpgradeConstants,
) -> Result<(UpgradeModules, UpgradeReport), OpsError> {
    Address::from_bech32(&params.owner, &chain.prefixes.account)?;
    Address::from_bech32(&params.operator, &chain.prefixes.validator)?;
    let proposer = params
        .consensus_pubkey
        .consensus_address()?
        .to_bech32(&chain.prefixes.consensus)?;
    let unbonded = params
        .unbonded_pubkey
        .as_ref()
        .map(|pubkey| UnbondedValidator::resolve(pubkey, chain))
        .transpose()?;

    upgrade_accounts(&mut modules.auth, &params.owner)?;
    fund_owner(&mut modules.bank, &params.owner, chain, constants);

    let bonded_pool = pool_amount(&modules.bank, BONDED_POOL_NAME, chain)?;
    let not_bonded_tokens = pool_amount(&modules.bank, NOT_BONDED_POOL_NAME, chain)?;
    let default_bonded_tokens_used = bonded_pool.is_zero();
    let bonded_tokens = if default_bonded_tokens_used {
        warn!(
            tokens = %constants.default_bonded_tokens,
            "Bonded pool is empty, validator tokens will not match the pool balance"
        );
        constants.default_bonded_tokens.clone()
    } else {
        bonded_pool
    };

    let unbonded = match unbonded {
        Some(unbonded) if not_bonded_tokens.is_zero() => {
            warn!(
                operator = %unbonded.operator,
                "Not-bonded pool is empty, skipping unbonded validator"
            );
            None
        }
        other => other,
    };

    let staking = &mut modules.staking;
    let discarded_validators = staking.validators.len();
    let discarded_delegations = staking.delegations.len();
    if discarded_validators > 0 || discarded_delegations > 0 {
        warn!(
            validators = discarded_validators,
            delegations = discarded_delegations,
            "Discarding existing validators and delegations"
        );
    }

    staking.validators = vec![Validator::new_genesis(NewValidator {
        operator_address: &params.operator,
        consensus_pubkey: &params.consensus_pubkey,
        status: BondStatus::Bonded,
        tokens: bonded_tokens.clone(),
        moniker: &constants.bonded_moniker,
        commission_rates: constants.commission_rates.clone(),
        min_self_delegation: constants.min_self_delegation.clone(),
    })];
    staking.delegations = vec![Delegation::new(
        &params.owner,
        &params.operator,
        bonded_tokens.to_dec(),
    )];

    if let Some(unbonded) = &unbonded {
        staking.validators.push(Validator::new_genesis(NewValidator {
            operator_address: &unbonded.operator,
            consensus_pubkey: unbonded.pubkey,
            status: BondStatus::Unbonded,
            tokens: not_bonded_tokens.clone(),
            moniker: &constants.unbonded_moniker,
            commission_rates: constants.commission_rates.clone(),
            min_self_delegation: constants.min_self_delegation.clone(),
        }));
        info!(operator = %unbonded.operator, tokens = %not_bonded_tokens, "Added unbonded validator");
    }

    staking.unbonding_delegations.clear();
    staking.redelegations.clear();
    staking.last_validator_powers.clear();
    staking.last_total_power = Int::zero();
    staking.exported = false;
    info!(operator = %params.operator, tokens = %bonded_tokens, "Replaced validator set");

    let distribution = &mut modules.distribution;
    distribution.clear_reward_records();
    distribution.delegator_starting_infos = vec![DelegatorStartingInfoRecord::at_genesis(
        &params.owner,
        &params.operator,
        bonded_tokens.to_dec(),
    )];
    distribution.previous_proposer = proposer;
    info!(previous_proposer = %distribution.previous_proposer, "Reset distribution state");

    let report = UpgradeReport {
        owner: params.owner.clone(),
        operator: params.operator.clone(),
        unbonded_operator: unbonded.map(|unbonded| unbonded.operator),
        bonded_tokens,
        not_bonded_tokens,
        default_bonded_tokens_used,
        discarded_validators,
        discarded_delegations,
    };
    Ok((modules, report))
}
