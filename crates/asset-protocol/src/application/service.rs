//! # Asset Protocol Service
//!
//! Transaction processor and message composer.
//!
//! Parsing runs decode → validate → apply → append for one transaction at a
//! time. Composing runs the same validators against the chain tip and
//! returns the envelope for an external transaction builder.

use shared_types::TransactionRecord;
use tracing::{debug, info, warn};

use crate::codec::{
    decode_envelope, encode_envelope, IssuanceLayout, IssuanceMessage, MessageType, SendMessage,
    SHORT_ISSUANCE_LEN,
};
use crate::config::ProtocolConfig;
use crate::domain::{
    is_lock_description, rule_variant, ClientNumber, ComposeError, ComposedTransaction,
    IssuanceProblem, IssuanceRecord, IssuanceRequest, LedgerRecord, ParseOutcome, ProtocolError,
    RuleVariant, SendProblem, SendRecord, SendRequest, Status, BTC, MAX_INT, XCP,
};
use crate::ports::{AssetLedger, AssetProtocolApi, AssetRegistry, ChainContext};
use crate::validation::{validate_issuance, validate_send, IssuanceDraft, SendDraft};

/// Status reason for an issuance whose asset id has no name.
const BAD_ASSET_NAME: &str = "bad asset name";

/// Asset Protocol Service - owns the ledger handle and applies messages.
pub struct AssetProtocolService<L, R, C> {
    /// Configuration.
    config: ProtocolConfig,
    /// Balances and message history.
    ledger: L,
    /// Asset id/name mapping.
    registry: R,
    /// Chain tip for compose.
    chain: C,
}

impl<L, R, C> AssetProtocolService<L, R, C>
where
    L: AssetLedger,
    R: AssetRegistry,
    C: ChainContext,
{
    /// Create a new service.
    pub fn new(config: ProtocolConfig, ledger: L, registry: R, chain: C) -> Self {
        if config.network != chain.network() {
            warn!(
                configured = %config.network,
                chain = %chain.network(),
                "Chain context network differs from configured network"
            );
        }
        Self {
            config,
            ledger,
            registry,
            chain,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access for genesis seeding and store maintenance.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn chain_mut(&mut self) -> &mut C {
        &mut self.chain
    }

    /// Consumes the service, returning the ledger.
    pub fn into_ledger(self) -> L {
        self.ledger
    }

    fn parse_variant(&self, tx: &TransactionRecord) -> &'static RuleVariant {
        rule_variant(tx.block_index, self.config.network)
    }

    fn compose_variant(&self) -> &'static RuleVariant {
        rule_variant(self.chain.current_height(), self.chain.network())
    }

    fn unpack_failed_issuance(tx: &TransactionRecord) -> IssuanceRecord {
        let (issuer, transfer) = match &tx.destination {
            Some(destination) => (destination.clone(), true),
            None => (tx.source.clone(), false),
        };
        IssuanceRecord {
            tx_index: tx.tx_index,
            tx_hash: tx.tx_hash,
            block_index: tx.block_index,
            asset: None,
            quantity: None,
            divisible: None,
            source: tx.source.clone(),
            issuer,
            transfer,
            card_image: None,
            card_series: None,
            card_number: None,
            description: None,
            fee_paid: 0,
            locked: false,
            status: Status::could_not_unpack(),
        }
    }

    fn append_unpack_failed_send(
        &mut self,
        tx: &TransactionRecord,
        error: &dyn std::error::Error,
    ) -> Result<SendRecord, ProtocolError> {
        warn!(tx_index = tx.tx_index, %error, "Send could not be unpacked");
        let record = SendRecord {
            tx_index: tx.tx_index,
            tx_hash: tx.tx_hash,
            block_index: tx.block_index,
            source: tx.source.clone(),
            destination: tx.destination.clone(),
            asset: None,
            quantity: None,
            status: Status::could_not_unpack(),
        };
        self.ledger.append(LedgerRecord::Send(record.clone()))?;
        Ok(record)
    }

    /// Validates and applies a decoded issuance, returning its record.
    fn apply_issuance(
        &mut self,
        tx: &TransactionRecord,
        variant: &RuleVariant,
        message: IssuanceMessage,
        asset: String,
    ) -> Result<IssuanceRecord, ProtocolError> {
        let draft = IssuanceDraft {
            source: &tx.source,
            destination: tx.destination.as_ref(),
            asset: &asset,
            quantity: ClientNumber::from(message.quantity),
            divisible: message.divisible,
            card_image: message.card_image,
            card_series: Some(ClientNumber::from(message.card_series)),
            card_number: Some(ClientNumber::from(message.card_number)),
            description: &message.description,
        };
        let validation = validate_issuance(&self.ledger, variant, &draft)?;
        let status = Status::from_problems(&validation.problems);
        debug!(
            tx_index = tx.tx_index,
            %asset,
            problems = validation.problems.len(),
            fee = validation.fee,
            "Issuance validated"
        );

        let mut quantity = message.quantity;
        if validation.has_problem(IssuanceProblem::TotalQuantityOverflow) {
            quantity = 0;
        }
        let (issuer, transfer) = match &tx.destination {
            Some(destination) => {
                quantity = 0;
                (destination.clone(), true)
            }
            None => (tx.source.clone(), false),
        };

        let mut fee_paid = 0;
        let mut locked = false;
        let mut description = message.description;
        if status.is_valid() {
            fee_paid = validation.fee;
            if is_lock_description(&description) {
                locked = true;
                if let Some(last) = validation.prior.last() {
                    description = last.description.clone().unwrap_or_default();
                }
            }
            locked |= validation.asset_locked();
        }

        let record = IssuanceRecord {
            tx_index: tx.tx_index,
            tx_hash: tx.tx_hash,
            block_index: tx.block_index,
            asset: Some(asset.clone()),
            quantity: Some(quantity),
            divisible: Some(message.divisible),
            source: tx.source.clone(),
            issuer,
            transfer,
            card_image: Some(message.card_image),
            card_series: Some(validation.card_series),
            card_number: Some(validation.card_number),
            description: Some(description),
            fee_paid,
            locked,
            status,
        };
        let entry = LedgerRecord::Issuance(record.clone());
        self.ledger.check_append(&entry)?;

        if fee_paid > 0 {
            self.ledger
                .debit(tx.block_index, &tx.source, XCP, fee_paid, tx.tx_hash)?;
        }
        self.ledger.append(entry)?;
        if record.status.is_valid() && quantity > 0 {
            self.ledger
                .credit(tx.block_index, &tx.source, &asset, quantity, tx.tx_hash)?;
        }
        Ok(record)
    }
}

impl<L, R, C> AssetProtocolApi for AssetProtocolService<L, R, C>
where
    L: AssetLedger,
    R: AssetRegistry,
    C: ChainContext,
{
    fn parse_transaction(&mut self, tx: &TransactionRecord) -> Result<ParseOutcome, ProtocolError> {
        let (type_id, body) = match decode_envelope(&self.config.prefix, &tx.data) {
            Ok(parts) => parts,
            Err(e) => {
                debug!(tx_index = tx.tx_index, error = %e, "Not a protocol message");
                return Ok(ParseOutcome::Unrecognized);
            }
        };

        match MessageType::from_id(type_id) {
            Some(MessageType::Issuance) => self.parse_issuance(tx, body).map(ParseOutcome::Issuance),
            Some(MessageType::Send) => self.parse_send(tx, body).map(ParseOutcome::Send),
            None => {
                warn!(tx_index = tx.tx_index, type_id, "Unsupported message type");
                Ok(ParseOutcome::Unrecognized)
            }
        }
    }

    fn parse_issuance(
        &mut self,
        tx: &TransactionRecord,
        body: &[u8],
    ) -> Result<IssuanceRecord, ProtocolError> {
        let variant = self.parse_variant(tx);

        let message = match IssuanceMessage::decode(body, variant.long_issuance_layout) {
            Ok(message) => message,
            Err(e) => {
                warn!(tx_index = tx.tx_index, error = %e, "Issuance could not be unpacked");
                let record = Self::unpack_failed_issuance(tx);
                self.ledger.append(LedgerRecord::Issuance(record.clone()))?;
                return Ok(record);
            }
        };
        debug!(
            tx_index = tx.tx_index,
            asset_id = message.asset_id,
            quantity = message.quantity,
            long_layout = body.len() > SHORT_ISSUANCE_LEN,
            "Issuance decoded"
        );

        let record = match self.registry.asset_name(message.asset_id) {
            Ok(asset) => self.apply_issuance(tx, variant, message, asset)?,
            Err(e) => {
                debug!(tx_index = tx.tx_index, error = %e, "Issuance names no asset");
                let mut record = Self::unpack_failed_issuance(tx);
                record.quantity = Some(if record.transfer { 0 } else { message.quantity });
                record.divisible = Some(message.divisible);
                record.card_image = Some(message.card_image);
                record.card_series = Some(u64::from(message.card_series));
                record.card_number = Some(message.card_number);
                record.description = Some(message.description);
                record.status = Status::Invalid(BAD_ASSET_NAME.to_string());
                self.ledger.append(LedgerRecord::Issuance(record.clone()))?;
                record
            }
        };

        if record.status.is_valid() {
            info!(
                tx_index = tx.tx_index,
                asset = record.asset.as_deref().unwrap_or_default(),
                quantity = record.quantity.unwrap_or_default(),
                issuer = %record.issuer,
                transfer = record.transfer,
                locked = record.locked,
                fee_paid = record.fee_paid,
                "Issuance accepted"
            );
        } else {
            warn!(tx_index = tx.tx_index, status = %record.status, "Issuance rejected");
        }
        Ok(record)
    }

    fn parse_send(&mut self, tx: &TransactionRecord, body: &[u8]) -> Result<SendRecord, ProtocolError> {
        let message = match SendMessage::decode(body) {
            Ok(message) => message,
            Err(e) => return self.append_unpack_failed_send(tx, &e),
        };
        let asset = match self.registry.asset_name(message.asset_id) {
            Ok(asset) => asset,
            Err(e) => return self.append_unpack_failed_send(tx, &e),
        };

        let quantity = message.quantity.min(MAX_INT);
        let draft = SendDraft {
            source: &tx.source,
            destination: tx.destination.as_ref(),
            asset: &asset,
            quantity: ClientNumber::from(quantity),
            published_balance: message.published_balance,
        };
        let problems = validate_send(&self.ledger, &draft)?;
        let status = Status::from_problems(&problems);

        let record = SendRecord {
            tx_index: tx.tx_index,
            tx_hash: tx.tx_hash,
            block_index: tx.block_index,
            source: tx.source.clone(),
            destination: tx.destination.clone(),
            asset: Some(asset.clone()),
            quantity: Some(quantity),
            status,
        };
        let entry = LedgerRecord::Send(record.clone());
        self.ledger.check_append(&entry)?;

        if let (true, Some(destination)) = (record.status.is_valid(), tx.destination.as_ref()) {
            self.ledger.transfer(
                tx.block_index,
                &tx.source,
                destination,
                &asset,
                quantity,
                tx.tx_hash,
            )?;
        }
        self.ledger.append(entry)?;

        if record.status.is_valid() {
            info!(
                tx_index = tx.tx_index,
                asset = record.asset.as_deref().unwrap_or_default(),
                quantity,
                source = %tx.source,
                "Send accepted"
            );
        } else {
            warn!(tx_index = tx.tx_index, status = %record.status, "Send rejected");
        }
        Ok(record)
    }

    fn compose_issuance(&self, request: &IssuanceRequest) -> Result<ComposedTransaction, ComposeError> {
        let variant = self.compose_variant();
        let draft = IssuanceDraft {
            source: &request.source,
            destination: request.transfer_destination.as_ref(),
            asset: &request.asset,
            quantity: request.quantity,
            divisible: request.divisible,
            card_image: request.card_image,
            card_series: request.card_series,
            card_number: request.card_number,
            description: &request.description,
        };
        let validation = validate_issuance(&self.ledger, variant, &draft)?;
        if !validation.is_valid() {
            debug!(asset = %request.asset, problems = ?validation.problems, "Issuance not composed");
            return Err(ComposeError::Issuance(validation.problems));
        }

        let asset_id = self.registry.asset_id(&request.asset)?;
        let quantity = u64::try_from(validation.quantity)
            .map_err(|_| ComposeError::FieldOutOfRange { field: "quantity" })?;
        let card_series = u32::try_from(validation.card_series)
            .map_err(|_| ComposeError::FieldOutOfRange { field: "card_series" })?;
        if !(validation.card_number as f32).is_finite() {
            return Err(ComposeError::FieldOutOfRange { field: "card_number" });
        }

        let message = IssuanceMessage {
            asset_id,
            quantity,
            divisible: request.divisible,
            card_image: request.card_image,
            card_series,
            card_number: validation.card_number,
            description: request.description.clone(),
        };
        let layout = if variant.long_issuance_layout {
            IssuanceLayout::Long
        } else if let Some(field) = short_layout_field(&message) {
            return Err(ComposeError::UnsupportedField { field });
        } else {
            IssuanceLayout::Short
        };
        let body = message.encode(layout)?;
        let data = encode_envelope(
            &self.config.prefix,
            MessageType::Issuance,
            &body,
            self.config.max_payload_size,
        )?;

        let outputs = request
            .transfer_destination
            .iter()
            .map(|destination| (destination.clone(), None))
            .collect();
        debug!(asset = %request.asset, asset_id, ?layout, bytes = data.len(), "Issuance composed");
        Ok(ComposedTransaction {
            source: request.source.clone(),
            outputs,
            data: Some(data),
        })
    }

    fn compose_send(&self, request: &SendRequest) -> Result<ComposedTransaction, ComposeError> {
        if request.asset == BTC {
            let quantity = host_quantity(request.quantity)?;
            return Ok(ComposedTransaction {
                source: request.source.clone(),
                outputs: vec![(request.destination.clone(), Some(quantity))],
                data: None,
            });
        }

        let draft = SendDraft {
            source: &request.source,
            destination: Some(&request.destination),
            asset: &request.asset,
            quantity: request.quantity,
            published_balance: request.published_balance,
        };
        let problems = validate_send(&self.ledger, &draft)?;
        if !problems.is_empty() {
            debug!(asset = %request.asset, ?problems, "Send not composed");
            return Err(ComposeError::Send(problems));
        }

        let asset_id = self.registry.asset_id(&request.asset)?;
        let quantity = request
            .quantity
            .as_integer()
            .and_then(|value| u64::try_from(value).ok())
            .ok_or(ComposeError::FieldOutOfRange { field: "quantity" })?;
        let message = SendMessage {
            asset_id,
            quantity,
            published_balance: request.published_balance,
        };
        let data = encode_envelope(
            &self.config.prefix,
            MessageType::Send,
            &message.encode(),
            self.config.max_payload_size,
        )?;

        debug!(asset = %request.asset, asset_id, quantity, "Send composed");
        Ok(ComposedTransaction {
            source: request.source.clone(),
            outputs: vec![(request.destination.clone(), None)],
            data: Some(data),
        })
    }
}

/// First field the short issuance layout would silently drop.
fn short_layout_field(message: &IssuanceMessage) -> Option<&'static str> {
    if message.card_image {
        Some("card_image")
    } else if message.card_series != 0 {
        Some("card_series")
    } else if message.card_number != 0.0 {
        Some("card_number")
    } else if !message.description.is_empty() {
        Some("description")
    } else {
        None
    }
}

/// Quantity of a plain host-chain transfer.
fn host_quantity(quantity: ClientNumber) -> Result<u64, ComposeError> {
    let value = quantity
        .as_integer()
        .ok_or_else(|| ComposeError::Send(vec![SendProblem::QuantityNotInteger]))?;
    u64::try_from(value).map_err(|_| ComposeError::Send(vec![SendProblem::NegativeQuantity]))
}
