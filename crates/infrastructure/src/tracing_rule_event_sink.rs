//! Rule event sink for development. Writes events to tracing output.

use async_trait::async_trait;
use cohortrole_application::RuleEventSink;
use cohortrole_core::AppResult;
use cohortrole_domain::RuleEvent;
use tracing::info;

/// Development event sink that logs every rule event.
#[derive(Clone)]
pub struct TracingRuleEventSink;

impl TracingRuleEventSink {
    /// Creates a new tracing event sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingRuleEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleEventSink for TracingRuleEventSink {
    async fn publish(&self, event: RuleEvent) -> AppResult<()> {
        info!(
            event_id = %event.event_id,
            event = event.kind.as_str(),
            rule_id = event.rule.id,
            actor_id = event.actor_id,
            "{}",
            event.description()
        );

        Ok(())
    }
}
