//! Generator configuration from environment.

use std::env;
use std::str::FromStr;

use uplan_core::{BufferRules, DEFAULT_STRIDE};

#[derive(Debug, Clone)]
pub struct Config {
    pub rules: BufferRules,
    pub stride: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = BufferRules::default();
        Self {
            rules: BufferRules {
                tse_h_m: env_or("UPLAN_TSE_H", defaults.tse_h_m),
                tse_v_m: env_or("UPLAN_TSE_V", defaults.tse_v_m),
                alpha_h: env_or("UPLAN_ALPHA_H", defaults.alpha_h),
                alpha_v: env_or("UPLAN_ALPHA_V", defaults.alpha_v),
                time_buffer_s: env_or("UPLAN_TIME_BUFFER", defaults.time_buffer_s),
            },
            stride: env_or("UPLAN_STRIDE", DEFAULT_STRIDE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: BufferRules::default(),
            stride: DEFAULT_STRIDE,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_invalid_values_fall_back_to_defaults() {
        assert_eq!(env_or("UPLAN_TEST_SURELY_UNSET", 7.5), 7.5);

        env::set_var("UPLAN_TEST_BAD_STRIDE", "many");
        assert_eq!(env_or("UPLAN_TEST_BAD_STRIDE", DEFAULT_STRIDE), DEFAULT_STRIDE);

        env::set_var("UPLAN_TEST_GOOD_STRIDE", " 5 ");
        assert_eq!(env_or("UPLAN_TEST_GOOD_STRIDE", DEFAULT_STRIDE), 5);
    }
}
