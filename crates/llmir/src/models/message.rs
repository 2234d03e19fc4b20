use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chunk::{Chunk, ToolCallChunk};
use super::role::Role;

/// A message to or from an LLM.
///
/// Chunk order is meaningful and preserved by projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

impl Message {
    pub fn new(role: Role) -> Self {
        Message {
            role,
            chunks: Vec::new(),
        }
    }

    /// Create a new system message
    pub fn system() -> Self {
        Self::new(Role::System)
    }

    /// Create a new user message
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Create a new assistant message
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Add any chunk to the message
    pub fn with_chunk(mut self, chunk: Chunk) -> Self {
        self.chunks.push(chunk);
        self
    }

    /// Add a text chunk to the message
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_chunk(Chunk::text(text))
    }

    /// Add a file chunk to the message
    pub fn with_file<N: Into<String>, M: Into<String>>(
        self,
        name: N,
        mimetype: M,
        bytes: Vec<u8>,
    ) -> Self {
        self.with_chunk(Chunk::file(name, mimetype, bytes))
    }

    /// Add an image reference chunk to the message
    pub fn with_image_url<S: Into<String>>(self, url: S) -> Self {
        self.with_chunk(Chunk::image_url(url))
    }

    /// Add a tool call chunk to the message
    pub fn with_tool_call<I: Into<String>, N: Into<String>>(
        self,
        id: I,
        name: N,
        arguments: Value,
    ) -> Self {
        self.with_chunk(Chunk::tool_call(id, name, arguments))
    }

    /// Text of all text chunks, joined with newlines
    pub fn text(&self) -> String {
        self.chunks
            .iter()
            .filter_map(Chunk::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All tool call chunks, in insertion order
    pub fn tool_calls(&self) -> Vec<&ToolCallChunk> {
        self.chunks.iter().filter_map(Chunk::as_tool_call).collect()
    }
}

/// A tool's reply to a specific tool call.
///
/// This is a separate type rather than a `Message` with a defaulted role, so
/// the tool role is structural and cannot be overridden by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponseMessage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

impl ToolResponseMessage {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        ToolResponseMessage {
            id: id.into(),
            name: name.into(),
            chunks: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        Role::Tool
    }

    pub fn with_chunk(mut self, chunk: Chunk) -> Self {
        self.chunks.push(chunk);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_chunk(Chunk::text(text))
    }

    pub fn with_file<N: Into<String>, M: Into<String>>(
        self,
        name: N,
        mimetype: M,
        bytes: Vec<u8>,
    ) -> Self {
        self.with_chunk(Chunk::file(name, mimetype, bytes))
    }

    pub fn with_image_url<S: Into<String>>(self, url: S) -> Self {
        self.with_chunk(Chunk::image_url(url))
    }
}

/// Any entry of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatMessage {
    ToolResponse(ToolResponseMessage),
    Standard(Message),
}

impl ChatMessage {
    pub fn role(&self) -> Role {
        match self {
            ChatMessage::ToolResponse(response) => response.role(),
            ChatMessage::Standard(message) => message.role,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        match self {
            ChatMessage::ToolResponse(response) => &response.chunks,
            ChatMessage::Standard(message) => &message.chunks,
        }
    }
}

impl From<Message> for ChatMessage {
    fn from(message: Message) -> Self {
        ChatMessage::Standard(message)
    }
}

impl From<ToolResponseMessage> for ChatMessage {
    fn from(response: ToolResponseMessage) -> Self {
        ChatMessage::ToolResponse(response)
    }
}
