use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the transcription provider configuration is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.stt.model.trim().is_empty() {
            anyhow::bail!("stt.model must not be empty");
        }

        if self.stt.language.trim().is_empty() {
            anyhow::bail!("stt.language must not be empty (use \"auto\" for detection)");
        }

        if let Some(ref base_url) = self.stt.base_url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            anyhow::bail!("stt.base_url must be an http(s) URL, got `{base_url}`");
        }

        Ok(())
    }
}
