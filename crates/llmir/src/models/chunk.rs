use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChunk {
    pub name: String,
    pub mimetype: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrlChunk {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallChunk {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// One atomic piece of message content.
///
/// Tool responses are not a chunk; they are carried at the message level by
/// `ToolResponseMessage`, which pins both the role and the call id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chunk {
    Text(TextChunk),
    File(FileChunk),
    ImageUrl(ImageUrlChunk),
    ToolCall(ToolCallChunk),
}

impl Chunk {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Chunk::Text(TextChunk { text: text.into() })
    }

    pub fn file<N: Into<String>, M: Into<String>>(name: N, mimetype: M, bytes: Vec<u8>) -> Self {
        Chunk::File(FileChunk {
            name: name.into(),
            mimetype: mimetype.into(),
            bytes,
        })
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        Chunk::ImageUrl(ImageUrlChunk { url: url.into() })
    }

    pub fn tool_call<I: Into<String>, N: Into<String>>(id: I, name: N, arguments: Value) -> Self {
        Chunk::ToolCall(ToolCallChunk {
            id: id.into(),
            name: name.into(),
            arguments,
        })
    }

    /// Get the text if this is a Text chunk
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Chunk::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Get the tool call if this is a ToolCall chunk
    pub fn as_tool_call(&self) -> Option<&ToolCallChunk> {
        match self {
            Chunk::ToolCall(tool_call) => Some(tool_call),
            _ => None,
        }
    }

    /// Variant name as it appears on the wire, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Chunk::Text(_) => "text",
            Chunk::File(_) => "file",
            Chunk::ImageUrl(_) => "image_url",
            Chunk::ToolCall(_) => "tool_call",
        }
    }
}
