use valuta_config::Config;

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else if token.is_empty() {
        "(not set)".to_string()
    } else {
        "***".to_string()
    }
}

/// Strategy for displaying configuration information.
///
/// Prints the Telegram settings (token masked), the rate endpoint and the
/// conversion log location.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== valuta Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask_token(&config.telegram.token));
        if config.telegram.allow_from.is_empty() {
            println!("  Allowed chats: everyone");
        } else {
            println!("  Allowed chats: {}", config.telegram.allow_from.join(", "));
        }
        println!();

        println!("Rates:");
        println!("  Endpoint: {}/<CODE>", config.rates.base_url);
        match config.rates.timeout_secs {
            Some(secs) => println!("  Timeout: {secs}s"),
            None => println!("  Timeout: client default"),
        }
        println!();

        println!("History:");
        let log = super::open_conversion_log(&config)?;
        println!("  File: {}", log.path().display());
        println!("  Records: {}", log.load().await?.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_token;

    #[test]
    fn masks_long_tokens() {
        assert_eq!(mask_token("123456:ABCDEFGHIJ"), "1234...GHIJ");
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token(""), "(not set)");
    }
}
