use std::sync::Arc;
use std::time::Instant;

use floatchat_core::{
    respond, ConversationHistory, ConversationTurn, QueryContext, Reply, VariantPicker,
    RUNTIME_FALLBACK,
};
use floatchat_observability::AppMetrics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, warn};

pub const EXIT_COMMANDS: &[&str] = &["quit", "exit", "bye", "goodbye"];

pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim().to_lowercase();
    EXIT_COMMANDS.contains(&trimmed.as_str())
}

struct RngPicker<'a>(&'a mut StdRng);

impl VariantPicker for RngPicker<'_> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0.gen_range(0..len)
        }
    }
}

pub struct ChatAgent {
    history: ConversationHistory,
    rng: StdRng,
    metrics: Arc<AppMetrics>,
}

impl ChatAgent {
    pub fn new(metrics: Arc<AppMetrics>) -> Self {
        Self::from_rng(StdRng::from_entropy(), metrics)
    }

    pub fn with_seed(seed: u64, metrics: Arc<AppMetrics>) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), metrics)
    }

    fn from_rng(rng: StdRng, metrics: Arc<AppMetrics>) -> Self {
        Self {
            history: ConversationHistory::new(),
            rng,
            metrics,
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    #[instrument(skip(self, text), fields(turns = self.history.len()))]
    pub fn reply(&mut self, text: &str) -> Reply {
        let started = Instant::now();
        self.metrics.inc_request();

        self.history.push(ConversationTurn::user(text));
        let ctx = QueryContext::analyze(text, self.history.previous_user_text());
        let rule = floatchat_core::responder::route(&ctx);
        debug!(
            intent = ctx.intent.as_code(),
            region = ctx.region.map(|key| key.as_key()),
            rule = rule.name,
            "query analyzed"
        );
        if rule.name == "help" {
            self.metrics.inc_default_reply();
        }

        let reply = match respond(&ctx, &mut RngPicker(&mut self.rng)) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "reply generation failed");
                self.metrics.inc_fallback();
                Reply {
                    text: RUNTIME_FALLBACK.to_string(),
                    intent: ctx.intent,
                    region: ctx.region,
                    sentiment: ctx.sentiment,
                }
            }
        };

        self.history.push(ConversationTurn::assistant(reply.text.clone()));
        self.metrics.observe_latency(started.elapsed());
        reply
    }
}
