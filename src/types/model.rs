use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of the backend model, e.g. `gpt-3.5-turbo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(Cow<'static, str>);

impl Model {
    pub const GPT_3_5_TURBO: Model = Model(Cow::Borrowed("gpt-3.5-turbo"));
    pub const GPT_3_5_TURBO_0301: Model = Model(Cow::Borrowed("gpt-3.5-turbo-0301"));
    pub const GPT_4: Model = Model(Cow::Borrowed("gpt-4"));
    pub const GPT_4_32K: Model = Model(Cow::Borrowed("gpt-4-32k"));
    pub const GPT_4O: Model = Model(Cow::Borrowed("gpt-4o"));
    pub const GPT_4O_MINI: Model = Model(Cow::Borrowed("gpt-4o-mini"));

    pub fn new(id: impl Into<String>) -> Self {
        Model(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no usable identifier is set.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::new(s)
    }
}
