pub mod catalog;

pub use catalog::CatalogConfig;

#[cfg(feature = "cli")]
use crate::core::selection::SelectionStrategy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ad-selector")]
#[command(about = "Select a targeted advertisement from a catalog")]
pub struct CliConfig {
    #[arg(long, default_value = "./catalog.toml")]
    pub catalog: String,

    #[arg(long, help = "Marketplace to render in; empty or missing yields no ad")]
    pub marketplace_id: Option<String>,

    #[arg(long)]
    pub customer_id: Option<String>,

    #[arg(long, value_enum, help = "Overrides [selection] strategy from the catalog")]
    pub strategy: Option<SelectionStrategy>,

    #[arg(long, help = "Seed the random source for reproducible picks")]
    pub seed: Option<u64>,

    #[arg(long, default_value = "1", help = "Run selection n times and print a histogram")]
    pub draws: usize,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("catalog", &self.catalog)?;
        validate_positive_number("draws", self.draws, 1)?;
        Ok(())
    }
}
