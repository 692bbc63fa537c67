//! RawMessage - キューから受信したままのメッセージ

/// A message as handed out by the queue transport.
///
/// `receipt` is the opaque handle the transport needs to delete the message.
/// The loop owns a `RawMessage` only for the iteration that received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub id: String,
    pub receipt: String,
    pub body: String,
}

impl RawMessage {
    pub fn new(
        id: impl Into<String>,
        receipt: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            receipt: receipt.into(),
            body: body.into(),
        }
    }
}
