// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface for type-agnostic message processing.
//!
//! ## Architecture
//!
//! - **Typed trait** ([`MessageCodec`]) - decode/encode one concrete type
//! - **Dynamic trait** ([`DynCodec`]) - the same, over type-erased messages,
//!   so codecs for different types can live in one registry
//! - **Adapter** ([`TypedCodec`]) - implements both for any [`Message`]

use std::marker::PhantomData;

use crate::core::{Format, HarnessError, Result};
use crate::schema::{AnyMessage, DynMessage, Message};

use super::json::{JsonCodec, JsonLayout};

// =============================================================================
// Message Codec Trait
// =============================================================================

/// Codec for one concrete message type.
pub trait MessageCodec<M: Message>: Send + Sync {
    /// Decode payload text into a message.
    fn decode(&self, text: &str) -> Result<M>;

    /// Encode a message into payload text.
    fn encode(&self, message: &M) -> Result<String>;

    /// Payload format this codec handles.
    fn format(&self) -> Format;
}

// =============================================================================
// Dynamic Codec Trait
// =============================================================================

/// Dynamic version of [`MessageCodec`] for use in trait objects.
pub trait DynCodec: Send + Sync {
    /// Schema name of the messages this codec handles.
    fn type_name(&self) -> &'static str;

    /// Decode payload text into a type-erased message.
    fn decode_dynamic(&self, text: &str) -> Result<AnyMessage>;

    /// Encode a type-erased message.
    ///
    /// Fails with an encode error when the message is of another type.
    fn encode_dynamic(&self, message: &dyn DynMessage) -> Result<String>;

    /// Payload format this codec handles.
    fn format(&self) -> Format;
}

// =============================================================================
// Typed Codec
// =============================================================================

/// JSON codec bound to one message type.
pub struct TypedCodec<M> {
    json: JsonCodec,
    _marker: PhantomData<fn() -> M>,
}

impl<M: Message> TypedCodec<M> {
    /// Create a codec with the given output layout.
    pub fn new(layout: JsonLayout) -> Self {
        Self {
            json: JsonCodec::new(layout),
            _marker: PhantomData,
        }
    }
}

impl<M: Message> Default for TypedCodec<M> {
    fn default() -> Self {
        Self::new(JsonLayout::default())
    }
}

impl<M: Message> MessageCodec<M> for TypedCodec<M> {
    fn decode(&self, text: &str) -> Result<M> {
        self.json.decode(text)
    }

    fn encode(&self, message: &M) -> Result<String> {
        self.json.encode(message)
    }

    fn format(&self) -> Format {
        Format::Json
    }
}

impl<M: Message> DynCodec for TypedCodec<M> {
    fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn decode_dynamic(&self, text: &str) -> Result<AnyMessage> {
        let message: M = self.json.decode(text)?;
        Ok(Box::new(message))
    }

    fn encode_dynamic(&self, message: &dyn DynMessage) -> Result<String> {
        let typed = message.as_any().downcast_ref::<M>().ok_or_else(|| {
            HarnessError::encode(
                M::TYPE_NAME,
                format!("codec cannot encode a '{}' message", message.type_name()),
            )
        })?;
        self.json.encode(typed)
    }

    fn format(&self) -> Format {
        Format::Json
    }
}

// =============================================================================
// Tests
// =============================================================================
