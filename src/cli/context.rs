use chrono::NaiveDate;
use finz_config::{Config, ConfigManager};
use finz_core::{Clock, FixedClock, SystemClock};
use finz_domain::{MonthlyTransactionRecord, SavingsGoal};
use tracing::debug;

use crate::cli::args::GlobalOptions;
use crate::currency::LocaleCurrencyFormatter;
use crate::errors::CliError;
use crate::fixtures;

/// Everything a command needs: configuration, the current date and data.
pub struct CliContext {
    pub options: GlobalOptions,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatter: LocaleCurrencyFormatter,
    clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(options: GlobalOptions) -> Result<Self, CliError> {
        let config_manager = match &options.config {
            Some(path) => ConfigManager::new(path.clone()),
            None => ConfigManager::from_env()?,
        };
        let config = config_manager.load()?;
        debug!(path = %config_manager.config_path().display(), "loaded configuration");

        let clock: Box<dyn Clock> = match options.today {
            Some(date) => Box::new(FixedClock::new(date)),
            None => Box::new(SystemClock),
        };
        let formatter = LocaleCurrencyFormatter::from_config(&config);

        Ok(Self {
            options,
            config_manager,
            config,
            formatter,
            clock,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Records from `--records`, `--transactions`, or the embedded sample.
    pub fn records(&self) -> Result<Vec<MonthlyTransactionRecord>, CliError> {
        let records = if let Some(path) = &self.options.records {
            fixtures::load_records(path)?
        } else if let Some(path) = &self.options.transactions {
            fixtures::load_transactions(path)?
        } else {
            fixtures::sample_records()?
        };
        Ok(records)
    }

    pub fn goals(&self) -> Result<Vec<SavingsGoal>, CliError> {
        let goals = match &self.options.goals {
            Some(path) => fixtures::load_goals(path)?,
            None => fixtures::sample_goals()?,
        };
        Ok(goals)
    }
}
