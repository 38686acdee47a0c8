use teloxide::types::BotCommand;
use valuta_core::Command;

/// Commands advertised in the Telegram client menu.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|(command, description)| BotCommand::new(*command, *description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_advertised_command_parses() {
        let commands = bot_commands();
        assert_eq!(commands.len(), Command::ALL.len());
        for command in commands {
            assert!(
                Command::parse_from_text(&format!("/{}", command.command)).is_some(),
                "/{} is advertised but not understood",
                command.command
            );
        }
    }
}
