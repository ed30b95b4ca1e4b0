use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use tracing::debug;

use genutils_core::serialize;

use crate::codec::ModuleGenesis;
use crate::error::StateError;

/// Module name to raw module state. Modules stay undecoded until asked for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppState(BTreeMap<String, Box<RawValue>>);

impl AppState {
    pub fn new() -> Self {
        AppState(BTreeMap::new())
    }

    pub fn contains(&self, module: &str) -> bool {
        self.0.contains_key(module)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw JSON text of a module
    pub fn raw(&self, module: &str) -> Option<&str> {
        self.0.get(module).map(|raw| raw.get())
    }

    /// Decode a module into its typed state
    pub fn decode<T: ModuleGenesis>(&self) -> Result<T, StateError> {
        let raw = self
            .0
            .get(T::MODULE)
            .ok_or_else(|| StateError::MissingModule(T::MODULE.to_string()))?;

        debug!(module = T::MODULE, bytes = raw.get().len(), "Decoding module state");
        serde_json::from_str(raw.get())
            .map_err(|e| StateError::Format(format!("{} module: {}", T::MODULE, e)))
    }

    /// Replace a module with the canonical encoding of `state`
    pub fn encode<T: ModuleGenesis>(&mut self, state: &T) -> Result<(), StateError> {
        let value = serialize::to_value(state)?;
        let raw = serde_json::value::to_raw_value(&value)
            .map_err(|e| StateError::Format(format!("{} module: {}", T::MODULE, e)))?;
        self.0.insert(T::MODULE.to_string(), raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genutils_core::{BankGenesis, StakingGenesis};
    use serde_json::json;

    fn app_state() -> AppState {
        let value = json!({
            "bank": {
                "params": {"default_send_enabled": true},
                "balances": [
                    {"address": "bitsong1a", "coins": [{"denom": "ubtsg", "amount": "10"}]}
                ],
                "supply": [{"denom": "ubtsg", "amount": "10"}],
                "denom_metadata": []
            },
            "gov": {"starting_proposal_id": "1"}
        });
        serde_json::from_str(&value.to_string()).unwrap()
    }

    #[test]
    fn test_decode_encode_decode() {
        let mut state = app_state();
        let bank: BankGenesis = state.decode().unwrap();
        state.encode(&bank).unwrap();
        let again: BankGenesis = state.decode().unwrap();
        assert_eq!(bank, again);
        assert!(again.extra.contains_key("denom_metadata"));
    }

    #[test]
    fn test_untouched_modules_survive() {
        let mut state = app_state();
        let bank: BankGenesis = state.decode().unwrap();
        state.encode(&bank).unwrap();
        assert_eq!(state.raw("gov"), Some(r#"{"starting_proposal_id":"1"}"#));
        assert_eq!(state.module_names().collect::<Vec<_>>(), vec!["bank", "gov"]);
    }

    #[test]
    fn test_missing_module() {
        let state = app_state();
        assert!(matches!(
            state.decode::<StakingGenesis>(),
            Err(StateError::MissingModule(module)) if module == "staking"
        ));
    }

    #[test]
    fn test_malformed_module_is_format_error() {
        let state: AppState =
            serde_json::from_str(r#"{"bank": {"balances": "nope"}}"#).unwrap();
        assert!(matches!(
            state.decode::<BankGenesis>(),
            Err(StateError::Format(_))
        ));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<AppState>("[1, 2]").is_err());
    }
}
