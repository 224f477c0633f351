use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::components::species::{Species, UnknownSpecies};

/// Lightweight reference to the other side of a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPeer {
    pub address: String,
    /// Species tag as sent upstream; may name a creature not rendered here.
    #[serde(rename = "type", default)]
    pub species: String,
    #[serde(default)]
    pub ada: f64,
}

impl TransferPeer {
    pub fn species(&self) -> Option<Species> {
        Species::from_tag(&self.species)
    }
}

/// One creature as described by block data. Immutable once a creature exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureDescriptor {
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub species: String,
    /// Token balance.
    #[serde(default)]
    pub ada: f64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount_transferred: Option<f64>,
    /// Recipients of this address's transfers.
    #[serde(default)]
    pub sent_to_info: Vec<TransferPeer>,
    /// Senders of transfers to this address.
    #[serde(default)]
    pub received_from_info: Vec<TransferPeer>,
}

/// Why a descriptor was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("descriptor has an empty address")]
    EmptyAddress,
    #[error("balance {0} is not a finite, non-negative number")]
    InvalidBalance(f64),
    #[error(transparent)]
    UnknownSpecies(#[from] UnknownSpecies),
}

impl CreatureDescriptor {
    /// Minimal descriptor, mostly for tests and demos.
    pub fn new(address: impl Into<String>, species: Species, ada: f64) -> Self {
        Self {
            address: address.into(),
            species: species.tag().to_string(),
            ada,
            role: None,
            transaction_id: None,
            amount_transferred: None,
            sent_to_info: Vec::new(),
            received_from_info: Vec::new(),
        }
    }

    /// Check the descriptor can become a creature and resolve its species.
    pub fn validate(&self) -> Result<Species, DescriptorError> {
        if self.address.trim().is_empty() {
            return Err(DescriptorError::EmptyAddress);
        }
        if !self.ada.is_finite() || self.ada < 0.0 {
            return Err(DescriptorError::InvalidBalance(self.ada));
        }
        Ok(self.species.parse::<Species>()?)
    }
}

/// Why a block payload could not be read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("block payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("upstream reported an error: {0}")]
    Upstream(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    List(Vec<Value>),
    Block {
        #[serde(default)]
        height: Option<u64>,
        #[serde(default)]
        creatures: Vec<Value>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// A block's creature list, parsed leniently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockData {
    pub height: Option<u64>,
    /// Descriptors in block order.
    pub creatures: Vec<CreatureDescriptor>,
    /// Entries that were not even shaped like a descriptor.
    pub malformed: usize,
}

impl BlockData {
    /// Parse `{"height": n, "creatures": [...]}` or a bare descriptor array.
    ///
    /// Individual entries that fail to deserialize are counted in
    /// `malformed` and dropped; only an unreadable payload is an error.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let (height, items) = match serde_json::from_str::<Payload>(json)? {
            Payload::List(items) => (None, items),
            Payload::Block { error: Some(message), .. } => {
                return Err(LoadError::Upstream(message));
            }
            Payload::Block { height, creatures, .. } => (height, creatures),
        };

        let mut block = BlockData {
            height,
            creatures: Vec::with_capacity(items.len()),
            malformed: 0,
        };
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<CreatureDescriptor>(item) {
                Ok(descriptor) => block.creatures.push(descriptor),
                Err(err) => {
                    log::warn!("block entry {index} is malformed: {err}");
                    block.malformed += 1;
                }
            }
        }
        Ok(block)
    }
}
