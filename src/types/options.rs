//! Chat completion request options and their validation.

use super::message::ChatMessage;
use super::model::Model;
use serde::{Deserialize, Serialize};

/// Most stop sequences the API accepts.
const MAX_STOP_SEQUENCES: usize = 4;

/// The outbound chat completion request.
///
/// Unset optional fields are omitted from the JSON body. An explicit zero is
/// treated the same as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionOptions {
    /// ID of the model to use.
    pub model: Model,
    /// The messages to generate chat completions for, in order.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature, between 0 and 2.
    #[serde(default, skip_serializing_if = "is_unset_f32")]
    pub temperature: Option<f32>,
    /// Nucleus sampling probability mass, between 0 and 1.
    #[serde(default, skip_serializing_if = "is_unset_f32")]
    pub top_p: Option<f32>,
    /// How many completions to generate for each prompt.
    #[serde(default, skip_serializing_if = "is_unset_u32")]
    pub n: Option<u32>,
    /// Up to 4 sequences where generation stops.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    /// Token limit for the completion. Unset means [`crate::DEFAULT_MAX_TOKENS`].
    #[serde(default, skip_serializing_if = "is_unset_u32")]
    pub max_tokens: Option<u32>,
    /// Between -2.0 and 2.0.
    #[serde(default, skip_serializing_if = "is_unset_f32")]
    pub presence_penalty: Option<f32>,
    /// Between -2.0 and 2.0.
    #[serde(default, skip_serializing_if = "is_unset_f32")]
    pub frequency_penalty: Option<f32>,
}

fn is_unset_f32(v: &Option<f32>) -> bool {
    match v {
        None => true,
        Some(x) => *x == 0.0,
    }
}

fn is_unset_u32(v: &Option<u32>) -> bool {
    matches!(v, None | Some(0))
}

impl ChatCompletionOptions {
    pub fn new(model: impl Into<Model>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            top_p: None,
            n: None,
            stop: Vec::new(),
            max_tokens: None,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Check the options against the request contract.
    ///
    /// Returns the names of every missing or out-of-range field; an empty
    /// list means the options may be sent.
    pub fn validate(&self) -> Vec<String> {
        let mut invalid = Vec::new();

        if self.model.is_empty() {
            invalid.push("model".to_string());
        }
        if self.messages.is_empty() {
            invalid.push("messages".to_string());
        }
        for (i, msg) in self.messages.iter().enumerate() {
            if msg.role.trim().is_empty() {
                invalid.push(format!("messages[{}].role", i));
            }
        }

        check_range(&mut invalid, "temperature", self.temperature, 0.0, 2.0);
        check_range(&mut invalid, "top_p", self.top_p, 0.0, 1.0);
        check_range(&mut invalid, "presence_penalty", self.presence_penalty, -2.0, 2.0);
        check_range(&mut invalid, "frequency_penalty", self.frequency_penalty, -2.0, 2.0);

        if self.stop.len() > MAX_STOP_SEQUENCES {
            invalid.push("stop".to_string());
        }

        invalid
    }

    /// A request-scoped copy with the token limit filled in when unset.
    ///
    /// `self` is left untouched.
    pub fn with_default_max_tokens(&self, default: u32) -> Self {
        let mut out = self.clone();
        if is_unset_u32(&out.max_tokens) {
            out.max_tokens = Some(default);
        }
        out
    }
}

fn check_range(invalid: &mut Vec<String>, field: &str, value: Option<f32>, min: f32, max: f32) {
    if let Some(v) = value {
        // NaN fails the range check too.
        if !(min..=max).contains(&v) {
            invalid.push(field.to_string());
        }
    }
}
