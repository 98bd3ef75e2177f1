//! Chat relay for an Ollama-compatible agent
//!
//! The relay forwards a single user message together with a system prompt
//! that tells the agent which todo tools exist. Sessions are lightweight
//! in-memory handles that group messages by id.

use anyhow::Result;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    Ollama,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a todo assistant. You manage the user's todo list \
through five tools: create_todo, list_todos, update_todo, delete_todo, and mark_todo_complete. \
Answer concisely and confirm every change you make.";

/// Client for a single Ollama-compatible agent endpoint
pub struct ChatRelay {
    client: Ollama,
    base_url: url::Url,
    model: String,
    system_prompt: String,
}

impl ChatRelay {
    /// Create a relay for the agent at `url`, falling back to the
    /// default Ollama address when the URL does not parse
    pub fn new(url: &str, model: &str, system_prompt: Option<String>) -> Self {
        let base_url = url::Url::parse(url)
            .unwrap_or_else(|_| url::Url::parse("http://localhost:11434").unwrap());

        let host = base_url.host_str().unwrap_or("localhost").to_string();
        let port = base_url.port().unwrap_or(11434);

        Self {
            client: Ollama::new(format!("http://{}", host), port),
            base_url,
            model: model.to_string(),
            system_prompt: system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Send one message and return the agent's reply
    pub async fn send(&self, message: &str) -> Result<String> {
        let request = ChatMessageRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(message.to_string()),
            ],
        );

        let response = self.client.send_chat_messages(request).await?;

        Ok(response.message.content)
    }

    /// Probe the agent's tags endpoint to see whether it is up
    pub async fn reachable(&self) -> bool {
        let api_url = format!("{}api/tags", self.base_url);

        match reqwest::Client::new().get(&api_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn agent_url(&self) -> &str {
        self.base_url.as_str()
    }
}

/// A chat session handle
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub session_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub messages: u32,
}

/// In-memory registry of chat sessions
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ChatSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its handle
    pub fn create(&self) -> ChatSession {
        let session = ChatSession {
            session_id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now(),
            messages: 0,
        };

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(session.session_id.clone(), session.clone());

        session
    }

    /// Bump the message count for a session, if it exists
    pub fn record_message(&self, session_id: &str) -> Option<ChatSession> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(session_id)?;
        session.messages += 1;

        Some(session.clone())
    }
}
