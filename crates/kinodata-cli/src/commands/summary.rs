use crate::cli::SummaryArgs;
use crate::error::Result;
use kinodata::datasets::config::ProviderConfig;
use kinodata::datasets::provider::{EagerDatasetProvider, LazyDatasetProvider};
use tracing::info;

pub fn run(args: SummaryArgs) -> Result<()> {
    let config = ProviderConfig::load(&args.config)?;
    info!(
        data_sheet = %config.data_sheet.display(),
        reference_sheet = %config.reference_sheet.display(),
        "Loaded provider configuration"
    );

    if args.eager {
        run_eager(&config)
    } else {
        run_lazy(&config)
    }
}

fn run_eager(config: &ProviderConfig) -> Result<()> {
    let provider = EagerDatasetProvider::from_config(config)?;

    println!("Dataset summary (eager):");
    println!("  kinases:      {}", provider.kinases().len());
    println!("  ligands:      {}", provider.ligands().len());
    println!("  measurements: {}", provider.measurements().len());
    println!("  assay pH:     {}", provider.conditions().ph());

    if let Some(measurement) = provider.measurements().first() {
        println!("  sample:       {}", measurement);
    }
    Ok(())
}

fn run_lazy(config: &ProviderConfig) -> Result<()> {
    let provider = LazyDatasetProvider::from_config(config)?;

    println!("Dataset summary (lazy):");
    println!("  available kinases: {}", provider.available_kinases().len());
    println!("  available ligands: {}", provider.available_ligands().len());
    println!("  assay pH:          {}", provider.conditions().ph());

    // Materialize a single pair to show what a lookup yields.
    if let (Some(name), Some(smiles)) = (
        provider.available_kinases().first().cloned(),
        provider.available_ligands().first().cloned(),
    ) {
        let measurement = provider.measurement(&name, &smiles)?;
        println!("  sample:            {}", measurement);
        println!(
            "  materialized:      {} kinases, {} ligands, {} measurements",
            provider.materialized_kinases(),
            provider.materialized_ligands(),
            provider.materialized_measurements()
        );
    }
    Ok(())
}
