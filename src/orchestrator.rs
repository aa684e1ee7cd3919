use crate::cli::Args;
use crate::error::{ ConfigError, GatewayError };
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::models::chat::{ ChatResult, ConversationState, Role };

use log::{ debug, info };
use std::sync::Arc;

/// Named steps of a conversation run, walked strictly in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Chat,
    End,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Start => Stage::Chat,
            Stage::Chat | Stage::End => Stage::End,
        }
    }
}

/// Runs one query through the model. Holds nothing but the injected chat
/// client, so one instance serves every request.
#[derive(Clone)]
pub struct Orchestrator {
    chat_client: Arc<dyn ChatClient>,
}

impl Orchestrator {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let chat_config = args.chat_config()?;
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={}",
            chat_config.llm_type,
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );
        Ok(Self::new(chat_client))
    }

    pub async fn run(&self, query: &str) -> Result<ConversationState, GatewayError> {
        let mut state = ConversationState::new(query);
        let mut stage = Stage::Start;

        while stage != Stage::End {
            debug!("Entering stage {:?}", stage);
            if stage == Stage::Chat {
                self.chat_node(&mut state).await?;
            }
            stage = stage.next();
        }

        Ok(state)
    }

    pub async fn chat(&self, query: &str) -> Result<ChatResult, GatewayError> {
        self.run(query)
            .await?
            .into_result()
            .ok_or_else(|| GatewayError::Malformed("conversation finished without a reply".into()))
    }

    async fn chat_node(&self, state: &mut ConversationState) -> Result<(), GatewayError> {
        let reply = self.chat_client.generate(state.transcript()).await?;
        if reply.role() != Role::Assistant {
            return Err(
                GatewayError::Malformed(format!("expected an assistant turn, got {:?}", reply.role()))
            );
        }
        state.push_reply(reply);
        Ok(())
    }
}
