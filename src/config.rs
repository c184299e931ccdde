use chrono::NaiveDate;

use crate::errors::AppError;

/// Session settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides "today" for the seed orders.
    pub seed_date: Option<NaiveDate>,
    /// Makes status assignment reproducible.
    pub status_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let seed_date = get("SEED_DATE")
            .map(|v| {
                NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|e| {
                    AppError::Config(format!("SEED_DATE '{}' is not a YYYY-MM-DD date: {}", v, e))
                })
            })
            .transpose()?;

        let status_seed = get("STATUS_SEED")
            .map(|v| {
                v.trim().parse::<u64>().map_err(|e| {
                    AppError::Config(format!("STATUS_SEED '{}' is not a u64: {}", v, e))
                })
            })
            .transpose()?;

        Ok(Self {
            seed_date,
            status_seed,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.seed_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("valid config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_seed_date_and_status_seed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SEED_DATE", "2024-03-21"),
            ("STATUS_SEED", "99"),
        ]))
        .expect("valid config");

        assert_eq!(config.seed_date, NaiveDate::from_ymd_opt(2024, 3, 21));
        assert_eq!(config.status_seed, Some(99));
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 3, 21).expect("valid date"));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("SEED_DATE", "  "), ("STATUS_SEED", "")]))
            .expect("valid config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_malformed_seed_date() {
        let err = AppConfig::from_lookup(lookup(&[("SEED_DATE", "21/03/2024")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("SEED_DATE")));
    }

    #[test]
    fn rejects_negative_status_seed() {
        let err = AppConfig::from_lookup(lookup(&[("STATUS_SEED", "-1")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("STATUS_SEED")));
    }
}
