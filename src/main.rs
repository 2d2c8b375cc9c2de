use ad_selector::utils::{logger, validation::Validate};
use ad_selector::{CatalogConfig, CliConfig, SelectionEngine};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ad-selector CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證參數
    config.validate().context("invalid command line arguments")?;

    let catalog = CatalogConfig::from_file(&config.catalog)
        .with_context(|| format!("failed to load catalog {}", config.catalog))?;
    catalog
        .validate()
        .with_context(|| format!("catalog {} is invalid", config.catalog))?;

    let content_dao = catalog.content_dao();
    let targeting_group_dao = catalog.targeting_group_dao();
    tracing::info!(
        "Loaded {} contents and {} targeting groups",
        content_dao.len(),
        targeting_group_dao.len()
    );

    let strategy = config
        .strategy
        .or_else(|| catalog.strategy())
        .unwrap_or_default();
    let engine = SelectionEngine::new(content_dao, targeting_group_dao).with_strategy(strategy);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let customer_id = config.customer_id.as_deref();
    let marketplace_id = config.marketplace_id.as_deref();

    if config.draws == 1 {
        let ad = engine.select_advertisement_with_rng(customer_id, marketplace_id, &mut rng)?;
        println!("{}", ad.to_json()?);
        return Ok(());
    }

    // 多次抽選，輸出各 content 被選中的次數
    let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..config.draws {
        let ad = engine.select_advertisement_with_rng(customer_id, marketplace_id, &mut rng)?;
        let key = ad
            .content()
            .map(|c| c.content_id.clone())
            .unwrap_or_else(|| "<empty>".to_string());
        *histogram.entry(key).or_default() += 1;
    }

    println!("{}", serde_json::to_string_pretty(&histogram)?);
    tracing::info!("Completed {} draws using {:?}", config.draws, strategy);

    Ok(())
}
