use anyhow::Context;
use parking_lot::RwLock;
use tracing::{info, instrument};
use vista_core::config::Config;
use vista_gui_shared::FrontendConfigDto;

pub struct AppState {
    config: RwLock<Config>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::load(None).context("failed to load vista config")?;
        Ok(Self {
            config: RwLock::new(config),
        })
    }

    #[instrument(skip(self))]
    pub fn frontend_config(&self) -> anyhow::Result<FrontendConfigDto> {
        self.config.read().frontend_dto()
    }

    /// Re-reads the config file; the previous config stays active on failure.
    #[instrument(skip(self))]
    pub fn reload(&self) -> anyhow::Result<FrontendConfigDto> {
        let path = self.config.read().loaded_from.clone();
        let fresh = Config::load(path.as_deref()).context("failed to reload vista config")?;
        let dto = fresh.frontend_dto()?;
        info!(
            config = ?fresh.loaded_from,
            has_information = dto.information.is_some(),
            "reloaded config"
        );
        *self.config.write() = fresh;
        Ok(dto)
    }
}
