//! ResultRecord - カウンタの計測結果
//!
//! Wire names follow the producer's payload (`ValorAtual`, `Producer`, ...).
//! The decoder folds incoming keys to lowercase before deserializing, so the
//! serde names below are the lowercase forms.

use serde::{Deserialize, Serialize};

/// One counter reading to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Current counter value. Required.
    #[serde(rename = "valoratual")]
    pub current_value: i64,

    /// Name of the application that produced the reading.
    #[serde(default)]
    pub producer: Option<String>,

    #[serde(default)]
    pub kernel: Option<String>,

    #[serde(default)]
    pub framework: Option<String>,

    /// Free-form text sent along with the reading.
    #[serde(default, rename = "mensagem")]
    pub message: Option<String>,
}

impl ResultRecord {
    pub fn new(current_value: i64) -> Self {
        Self {
            current_value,
            producer: None,
            kernel: None,
            framework: None,
            message: None,
        }
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
