use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ProjectionError, ProjectionResult};
use crate::models::chunk::{Chunk, FileChunk, ToolCallChunk};
use crate::models::message::{ChatMessage, Message, ToolResponseMessage};
use crate::models::role::Role;
use crate::models::tool::Tool;

/// One entry of a chat message `content` array.
///
/// Key names in the serialized form are a compatibility contract with the
/// chat completions schema and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenAiImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    pub name: String,
    /// JSON-encoded arguments object
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    pub id: String,
    /// Always `"function"`
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: OpenAiFunctionCall,
}

/// A system, user or assistant message. At least one of `content` and
/// `tool_calls` is set on every emitted message; unset fields are omitted
/// from the serialized form rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiChatMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<OpenAiContentPart>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
}

/// A tool result message. The schema restricts these to plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolMessage {
    pub role: Role,
    pub tool_call_id: String,
    pub content: String,
}

/// A single entry in the `messages` array of a chat completions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiMessage {
    Tool(OpenAiToolMessage),
    Chat(OpenAiChatMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiTool {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OpenAiFunction,
}

/// Convert internal messages to the chat completions message array.
///
/// Output preserves input message order. A single input message can expand
/// into two entries: media attached to a non-user message is relocated into
/// a synthetic user message (the schema only accepts rich content under the
/// user role), and media inside a tool response trails the tool message the
/// same way. Input is never mutated; the first failing message aborts the
/// whole batch.
pub fn messages_to_openai_spec(messages: &[ChatMessage]) -> ProjectionResult<Vec<OpenAiMessage>> {
    let mut spec = Vec::new();

    for message in messages {
        match message {
            ChatMessage::ToolResponse(response) => project_tool_response(response, &mut spec)?,
            ChatMessage::Standard(message) => project_message(message, &mut spec)?,
        }
    }

    Ok(spec)
}

fn project_tool_response(
    response: &ToolResponseMessage,
    spec: &mut Vec<OpenAiMessage>,
) -> ProjectionResult<()> {
    let mut text = String::new();
    let mut media = Vec::new();

    for chunk in &response.chunks {
        match chunk {
            Chunk::Text(chunk) => text.push_str(&chunk.text),
            Chunk::File(_) | Chunk::ImageUrl(_) => media.push(chunk),
            Chunk::ToolCall(_) => {
                return Err(ProjectionError::UnsupportedChunk {
                    context: "tool response",
                    kind: chunk.kind(),
                })
            }
        }
    }

    spec.push(OpenAiMessage::Tool(OpenAiToolMessage {
        role: Role::Tool,
        tool_call_id: response.id.clone(),
        content: text,
    }));

    // Tool messages must be plain text, so attachments ride along in a
    // synthetic user message directly after the tool result.
    if !media.is_empty() {
        spec.push(OpenAiMessage::Chat(OpenAiChatMessage {
            role: Role::User,
            content: Some(convert_content_chunks(&media)?),
            tool_calls: None,
        }));
    }

    Ok(())
}

fn project_message(message: &Message, spec: &mut Vec<OpenAiMessage>) -> ProjectionResult<()> {
    if message.role == Role::Tool {
        return Err(ProjectionError::ToolRoleWithoutId);
    }

    // Three ordered passes over the same chunk list; relative order within
    // each bucket matches insertion order.
    let tool_calls: Vec<&ToolCallChunk> = message
        .chunks
        .iter()
        .filter_map(Chunk::as_tool_call)
        .collect();

    let media: Vec<&Chunk> = message
        .chunks
        .iter()
        .filter(|chunk| {
            !matches!(chunk, Chunk::ToolCall(_) | Chunk::Text(_)) && message.role != Role::User
        })
        .collect();

    let content: Vec<&Chunk> = message
        .chunks
        .iter()
        .filter(|chunk| {
            !matches!(chunk, Chunk::ToolCall(_))
                && (message.role == Role::User || matches!(chunk, Chunk::Text(_)))
        })
        .collect();

    // The schema only accepts rich media under the user role. Relocating it
    // into a synthetic user message just ahead of the originating message
    // keeps the attachment without violating the schema.
    if !media.is_empty() {
        spec.push(OpenAiMessage::Chat(OpenAiChatMessage {
            role: Role::User,
            content: Some(convert_content_chunks(&media)?),
            tool_calls: None,
        }));
    }

    if !content.is_empty() || !tool_calls.is_empty() {
        let converted_calls = tool_calls
            .into_iter()
            .map(tool_call_chunk_to_openai)
            .collect::<ProjectionResult<Vec<_>>>()?;

        spec.push(OpenAiMessage::Chat(OpenAiChatMessage {
            role: message.role,
            content: if content.is_empty() {
                None
            } else {
                Some(convert_content_chunks(&content)?)
            },
            tool_calls: if converted_calls.is_empty() {
                None
            } else {
                Some(converted_calls)
            },
        }));
    }

    Ok(())
}

fn convert_content_chunks(chunks: &[&Chunk]) -> ProjectionResult<Vec<OpenAiContentPart>> {
    chunks
        .iter()
        .map(|chunk| content_chunk_to_openai(chunk))
        .collect()
}

fn content_chunk_to_openai(chunk: &Chunk) -> ProjectionResult<OpenAiContentPart> {
    match chunk {
        Chunk::Text(text) => Ok(OpenAiContentPart::Text {
            text: text.text.clone(),
        }),
        Chunk::ImageUrl(image) => Ok(OpenAiContentPart::ImageUrl {
            image_url: OpenAiImageUrl {
                url: image.url.clone(),
            },
        }),
        Chunk::File(file) => file_chunk_to_openai(file),
        Chunk::ToolCall(_) => Err(ProjectionError::UnsupportedChunk {
            context: "message content",
            kind: chunk.kind(),
        }),
    }
}

fn file_chunk_to_openai(file: &FileChunk) -> ProjectionResult<OpenAiContentPart> {
    if file.mimetype.starts_with("image/") {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        Ok(OpenAiContentPart::ImageUrl {
            image_url: OpenAiImageUrl {
                url: format!("data:{};base64,{}", file.mimetype, encoded),
            },
        })
    } else if file.mimetype == "text/plain" {
        let text = std::str::from_utf8(&file.bytes)
            .map_err(|e| ProjectionError::Decode(format!("{}: {}", file.name, e)))?;
        Ok(OpenAiContentPart::Text {
            text: text.to_string(),
        })
    } else {
        // Lossy fallback; one unreadable attachment should not abort the
        // whole conversation.
        Ok(OpenAiContentPart::Text {
            text: format!(
                "[Unsupported file type: {}, size: {} bytes, name: {}]",
                file.mimetype,
                file.bytes.len(),
                file.name
            ),
        })
    }
}

fn tool_call_chunk_to_openai(chunk: &ToolCallChunk) -> ProjectionResult<OpenAiToolCall> {
    Ok(OpenAiToolCall {
        id: chunk.id.clone(),
        call_type: "function".to_string(),
        function: OpenAiFunctionCall {
            name: chunk.name.clone(),
            arguments: serde_json::to_string(&chunk.arguments)?,
        },
    })
}

/// Convert internal tools to the chat completions tool array.
pub fn tools_to_openai_spec(tools: &[Tool]) -> ProjectionResult<Vec<OpenAiTool>> {
    let mut tool_names = std::collections::HashSet::new();
    let mut spec = Vec::new();

    for tool in tools {
        if !tool_names.insert(tool.name.as_str()) {
            return Err(ProjectionError::DuplicateTool(tool.name.clone()));
        }

        spec.push(OpenAiTool {
            tool_type: "function".to_string(),
            function: OpenAiFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        });
    }

    Ok(spec)
}
