use crate::types::Config;
use anyhow::{bail, Context, Result};
use std::fs;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let funnel = &self.funnel;
        if funnel.min_rectangle_count == 0 {
            bail!("funnel.min_rectangle_count must be at least 1");
        }
        if funnel.max_rectangle_count < funnel.min_rectangle_count {
            bail!(
                "funnel.max_rectangle_count ({}) is below min_rectangle_count ({})",
                funnel.max_rectangle_count,
                funnel.min_rectangle_count
            );
        }
        if funnel.matching_threshold < 0.0 || funnel.result_matching_threshold < 0.0 {
            bail!("funnel thresholds must be non-negative");
        }
        if self.display.width <= 0.0 || self.display.height <= 0.0 {
            bail!(
                "display area must be positive, got {}x{}",
                self.display.width,
                self.display.height
            );
        }
        Ok(())
    }
}
