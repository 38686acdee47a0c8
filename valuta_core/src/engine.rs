//! Runs transitions for one chat and carries out their effects.

use async_trait::async_trait;
use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

use crate::menu::Reply;
use crate::session::{ChatId, SessionStore};
use crate::state_machine::{Effect, Event, Transition, transition};
use crate::{ConversionLog, Error, RateProvider, Result};

/// Outgoing side of the chat transport.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> anyhow::Result<()>;

    /// Remove the options attached to `message_id`.
    async fn disable_choices(&self, chat_id: ChatId, message_id: i32) -> anyhow::Result<()>;
}

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incoming {
    pub chat_id: ChatId,
    /// Message carrying the pressed button, if any.
    pub origin: Option<i32>,
}

impl Incoming {
    #[must_use]
    pub const fn message(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            origin: None,
        }
    }

    #[must_use]
    pub const fn button(chat_id: ChatId, message_id: i32) -> Self {
        Self {
            chat_id,
            origin: Some(message_id),
        }
    }
}

pub struct ConversationEngine<R, L, S> {
    rates: R,
    log: L,
    sessions: S,
}

impl<R, L, S> ConversationEngine<R, L, S>
where
    R: RateProvider,
    L: ConversionLog,
    S: SessionStore,
{
    pub const fn new(rates: R, log: L, sessions: S) -> Self {
        Self {
            rates,
            log,
            sessions,
        }
    }

    pub const fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Handle one event for `incoming.chat_id`, including any follow-up
    /// events produced by rate lookups.
    pub async fn handle<T>(&self, transport: &T, incoming: Incoming, event: Event) -> Result<()>
    where
        T: ChatTransport + ?Sized,
    {
        let chat_id = incoming.chat_id;
        let mut state = self.sessions.get(chat_id).await;
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let Transition {
                state: next,
                effects,
            } = transition(&state, event);

            if next != state {
                debug!(chat_id, from = ?state, to = ?next, "Conversation state changed");
            }
            self.sessions.put(chat_id, next).await;
            state = next;

            for effect in effects {
                if let Some(follow_up) = self.apply(transport, incoming, effect).await? {
                    pending.push_back(follow_up);
                }
            }
        }

        Ok(())
    }

    async fn apply<T>(
        &self,
        transport: &T,
        incoming: Incoming,
        effect: Effect,
    ) -> Result<Option<Event>>
    where
        T: ChatTransport + ?Sized,
    {
        let chat_id = incoming.chat_id;
        match effect {
            Effect::DisableChoices => {
                if let Some(message_id) = incoming.origin {
                    if let Err(e) = transport.disable_choices(chat_id, message_id).await {
                        warn!(chat_id, message_id, "Failed to disable choices: {e}");
                    }
                }
            }
            Effect::Reply(reply) => {
                transport
                    .send(chat_id, &reply)
                    .await
                    .map_err(Error::Transport)?;
            }
            Effect::FetchRate { base, target } => {
                let outcome = self
                    .rates
                    .latest_rates(base)
                    .await
                    .and_then(|table| table.rate_for(target));
                return Ok(Some(match outcome {
                    Ok(rate) => {
                        info!("Rate {base}->{target}: {rate}");
                        Event::RateResolved { target, rate }
                    }
                    Err(e) => {
                        warn!("Rate lookup {base}->{target} failed: {e}");
                        Event::RateUnavailable { target }
                    }
                }));
            }
            Effect::AppendRecord(record) => {
                info!("Conversion in chat {chat_id}: {record}");
                if let Err(e) = self.log.append(record).await {
                    error!("Failed to record conversion: {e:#}");
                }
            }
            Effect::ShowHistory => {
                let records = self.log.recent().await.unwrap_or_else(|e| {
                    warn!("Failed to read conversion history: {e:#}");
                    Vec::new()
                });
                transport
                    .send(chat_id, &Reply::history(&records))
                    .await
                    .map_err(Error::Transport)?;
            }
        }
        Ok(None)
    }
}
