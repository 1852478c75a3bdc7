//! # Chain Simulator
//!
//! Drives an [`AssetProtocolService`] the way the host-chain scanner does:
//! strictly increasing transaction indexes, one height per block, and
//! transaction hashes derived deterministically from the index.

use asset_protocol::codec::{
    encode_envelope, IssuanceLayout, IssuanceMessage, MessageType, SendMessage,
};
use asset_protocol::{
    AssetLedger, AssetProtocolApi, AssetProtocolService, ComposedTransaction, FixedChainContext,
    InMemoryAssetRegistry, InMemoryLedger, IssuanceRecord, ParseOutcome, ProtocolConfig,
    SendRecord,
};
use sha2::{Digest, Sha256};
use shared_types::{Address, BlockHeight, Network, TransactionRecord, TxHash};
use tracing_subscriber::EnvFilter;

/// Service wired to the in-memory adapters.
pub type InMemoryService =
    AssetProtocolService<InMemoryLedger, InMemoryAssetRegistry, FixedChainContext>;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Hash of the `tx_index`-th simulated transaction.
pub fn tx_hash(tx_index: u64) -> TxHash {
    let digest = Sha256::digest(tx_index.to_be_bytes());
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    TxHash::new(hash)
}

/// Sequential transaction feed over one in-memory service.
pub struct ChainSimulator {
    service: InMemoryService,
    config: ProtocolConfig,
    height: BlockHeight,
    next_tx_index: u64,
}

impl ChainSimulator {
    pub fn new(network: Network, height: BlockHeight) -> Self {
        init_tracing();
        let config = ProtocolConfig {
            network,
            ..ProtocolConfig::default()
        };
        let service = AssetProtocolService::new(
            config.clone(),
            InMemoryLedger::new(),
            InMemoryAssetRegistry::new(),
            FixedChainContext::new(height, network),
        );
        Self {
            service,
            config,
            height,
            next_tx_index: 1,
        }
    }

    pub fn mainnet(height: BlockHeight) -> Self {
        Self::new(Network::Mainnet, height)
    }

    /// Seeds a genesis balance.
    pub fn fund(mut self, address: &Address, asset: &str, quantity: u64) -> Self {
        let ledger = std::mem::take(self.service.ledger_mut());
        *self.service.ledger_mut() = ledger.with_balance(address.clone(), asset, quantity);
        self
    }

    /// Maps an asset id to a name in the registry.
    pub fn register(mut self, id: u64, name: &str) -> Self {
        if let Err(e) = self.service.registry_mut().register(id, name) {
            panic!("fixture registration failed: {}", e);
        }
        self
    }

    pub fn service(&self) -> &InMemoryService {
        &self.service
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        self.service.ledger()
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn balance(&self, address: &Address, asset: &str) -> u64 {
        self.ledger().balance(address, asset).unwrap_or_default()
    }

    /// Closes the current block.
    pub fn mine_block(&mut self) {
        self.height += 1;
        self.service.chain_mut().advance_to(self.height);
    }

    /// Skips ahead to `height`; never moves backwards.
    pub fn jump_to(&mut self, height: BlockHeight) {
        self.height = self.height.max(height);
        self.service.chain_mut().advance_to(self.height);
    }

    /// Confirms `data` in the current block.
    pub fn submit(
        &mut self,
        source: &Address,
        destination: Option<&Address>,
        data: Vec<u8>,
    ) -> ParseOutcome {
        let tx_index = self.next_tx_index;
        self.next_tx_index += 1;
        let tx = TransactionRecord {
            tx_index,
            tx_hash: tx_hash(tx_index),
            block_index: self.height,
            source: source.clone(),
            destination: destination.cloned(),
            data,
        };
        match self.service.parse_transaction(&tx) {
            Ok(outcome) => outcome,
            Err(e) => panic!("ledger fault at tx {}: {}", tx_index, e),
        }
    }

    /// Confirms a composed transaction; its first output is the destination.
    pub fn submit_composed(&mut self, composed: ComposedTransaction) -> ParseOutcome {
        let destination = composed.outputs.first().map(|(address, _)| address.clone());
        let data = composed.data.unwrap_or_default();
        self.submit(&composed.source, destination.as_ref(), data)
    }

    pub fn issue(&mut self, source: &Address, message: &IssuanceMessage) -> IssuanceRecord {
        self.issue_to(source, None, message)
    }

    pub fn issue_to(
        &mut self,
        source: &Address,
        destination: Option<&Address>,
        message: &IssuanceMessage,
    ) -> IssuanceRecord {
        let layout = if message.description.is_empty() && !message.card_image {
            IssuanceLayout::Short
        } else {
            IssuanceLayout::Long
        };
        let body = match message.encode(layout) {
            Ok(body) => body,
            Err(e) => panic!("fixture issuance does not encode: {}", e),
        };
        let data = self.envelope(MessageType::Issuance, &body);
        match self.submit(source, destination, data) {
            ParseOutcome::Issuance(record) => record,
            other => panic!("expected issuance record, got {:?}", other),
        }
    }

    pub fn send(
        &mut self,
        source: &Address,
        destination: &Address,
        asset_id: u64,
        quantity: u64,
    ) -> SendRecord {
        let body = SendMessage {
            asset_id,
            quantity,
            published_balance: None,
        }
        .encode();
        let data = self.envelope(MessageType::Send, &body);
        match self.submit(source, Some(destination), data) {
            ParseOutcome::Send(record) => record,
            other => panic!("expected send record, got {:?}", other),
        }
    }

    fn envelope(&self, message_type: MessageType, body: &[u8]) -> Vec<u8> {
        match encode_envelope(&self.config.prefix, message_type, body, usize::MAX) {
            Ok(data) => data,
            Err(e) => panic!("fixture envelope does not encode: {}", e),
        }
    }
}

/// Plain divisible issuance without card fields.
pub fn plain_issuance(asset_id: u64, quantity: u64) -> IssuanceMessage {
    IssuanceMessage {
        asset_id,
        quantity,
        divisible: true,
        card_image: false,
        card_series: 0,
        card_number: 0.0,
        description: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_is_deterministic() {
        assert_eq!(tx_hash(7), tx_hash(7));
        assert_ne!(tx_hash(7), tx_hash(8));
    }

    #[test]
    fn test_simulator_advances() {
        let mut sim = ChainSimulator::mainnet(100);
        sim.mine_block();
        assert_eq!(sim.height(), 101);
        let outcome = sim.submit(&Address::from("a"), None, b"not a message".to_vec());
        assert_eq!(outcome, ParseOutcome::Unrecognized);
    }
}
