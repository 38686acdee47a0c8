use valuta_config::Config;

/// Strategy for printing the persisted conversion log.
#[derive(Debug, Clone, Copy)]
pub struct HistoryStrategy;

impl super::CommandStrategy for HistoryStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let log = super::open_conversion_log(&config)?;
        let records = log.load().await?;

        if records.is_empty() {
            println!("No conversions recorded in {}", log.path().display());
            return Ok(());
        }

        println!("Last {} conversions ({}):", records.len(), log.path().display());
        for (i, record) in records.iter().enumerate() {
            println!("  {:>2}. {record}", i + 1);
        }
        Ok(())
    }
}
