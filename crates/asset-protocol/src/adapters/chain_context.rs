//! # Fixed Chain Context
//!
//! [`ChainContext`] with a caller-controlled height, for tests and for
//! builders that track the tip themselves.

use shared_types::{BlockHeight, Network};

use crate::ports::ChainContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChainContext {
    pub height: BlockHeight,
    pub network: Network,
}

impl FixedChainContext {
    pub fn new(height: BlockHeight, network: Network) -> Self {
        Self { height, network }
    }

    pub fn mainnet(height: BlockHeight) -> Self {
        Self::new(height, Network::Mainnet)
    }

    /// Moves the tip, e.g. after the scanner confirms a block.
    pub fn advance_to(&mut self, height: BlockHeight) {
        self.height = height;
    }
}

impl ChainContext for FixedChainContext {
    fn current_height(&self) -> BlockHeight {
        self.height
    }

    fn network(&self) -> Network {
        self.network
    }
}
