use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a transcript. Fields are private so a message cannot change
/// after it has been created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Per-request conversation. Seeded with the user's query and only ever
/// appended to.
#[derive(Clone, Debug)]
pub struct ConversationState {
    user_query: String,
    llm_result: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn new(query: impl Into<String>) -> Self {
        let user_query = query.into();
        let transcript = vec![ChatMessage::user(user_query.clone())];
        Self { user_query, llm_result: None, transcript }
    }

    pub fn user_query(&self) -> &str {
        &self.user_query
    }

    pub fn llm_result(&self) -> Option<&str> {
        self.llm_result.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Appends the model's turn and records it as the result.
    pub fn push_reply(&mut self, reply: ChatMessage) {
        self.llm_result = Some(reply.content().to_string());
        self.transcript.push(reply);
    }

    /// Returns `None` while no reply has been recorded.
    pub fn into_result(self) -> Option<ChatResult> {
        let result = self.llm_result?;
        Some(ChatResult { query: self.user_query, result })
    }
}

/// Body of a successful `/api/chat` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub query: String,
    pub result: String,
}
