use serde::{Deserialize, Serialize};

/// Configuration for the user_accounts module (`modules.user_accounts`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAccountsConfig {
    /// Upper bound on rows returned by the list endpoints.
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
    #[serde(default)]
    pub rehash_password_on_update: bool,
}

impl Default for UserAccountsConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            rehash_password_on_update: false,
        }
    }
}

fn default_list_limit() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let cfg: UserAccountsConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.list_limit, 1000);
        assert!(!cfg.rehash_password_on_update);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<UserAccountsConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 5 }));
        assert!(res.is_err());
    }
}
