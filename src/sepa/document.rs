//! Typed tree for the consumed subset of pain.001.001.03
//!
//! The tree is filled by a single pass over the quick-xml event stream.
//! Elements are matched by local name, so namespace prefixes on the source
//! document do not matter. Any element the tree has no slot for is skipped,
//! and any slot the document never mentions keeps its empty default.

use super::error::{ParseError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Root of a customer credit transfer initiation (`Document/CstmrCdtTrfInitn`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub group_header: GroupHeader,
    pub payment_info: PaymentInfo,
    /// Number of `PmtInf` blocks present in the source
    pub payment_info_count: usize,
    /// Number of `CdtTrfTxInf` blocks present in the source, across all `PmtInf`
    pub transaction_count: usize,
}

/// `GrpHdr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupHeader {
    pub message_id: String,
    pub creation_date_time: String,
    pub number_of_txs: String,
    pub control_sum: String,
    pub initiating_party: PartyInfo,
}

/// `PmtInf`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentInfo {
    pub payment_info_id: String,
    pub payment_method: String,
    pub batch_booking: String,
    pub number_of_txs: String,
    pub control_sum: String,
    pub payment_type_info: PaymentTypeInfo,
    pub requested_execution_date: String,
    pub debtor: PartyInfo,
    pub debtor_account: Account,
    pub debtor_agent: FinancialInstitution,
    pub charge_bearer: String,
    pub transaction: CreditTransferTxInfo,
}

/// `PmtTpInf`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentTypeInfo {
    /// `SvcLvl/Cd`
    pub service_level: String,
    /// `CtgyPurp/Cd`
    pub category_purpose: String,
}

/// Any party block carrying a `Nm`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyInfo {
    pub name: String,
}

/// `DbtrAcct` / `CdtrAcct`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// `Id/IBAN`
    pub iban: String,
    pub currency: String,
}

/// `DbtrAgt` / `CdtrAgt`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinancialInstitution {
    /// `FinInstnId/BIC`
    pub bic: String,
}

/// `CdtTrfTxInf`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditTransferTxInfo {
    /// `PmtId/EndToEndId`
    pub end_to_end_id: String,
    /// `Amt/InstdAmt`
    pub amount: InstructedAmount,
    pub creditor_agent: FinancialInstitution,
    pub creditor: PartyInfo,
    pub creditor_account: Account,
    pub remittance: CreditorReference,
}

/// `InstdAmt` text plus its `Ccy` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructedAmount {
    pub currency: String,
    pub value: String,
}

/// `RmtInf/Strd/CdtrRefInf`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditorReference {
    /// `Tp/CdOrPrtry/Cd`
    pub reference_type: String,
    /// `Tp/Issr`
    pub issuer: String,
    /// `Ref`
    pub reference: String,
}

const ROOT: &str = "Document";
const INITIATION: &str = "CstmrCdtTrfInitn";
const PAYMENT_INFO: &str = "PmtInf";
const TRANSACTION: &str = "CdtTrfTxInf";

impl Document {
    /// Decode a document from raw XML bytes
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the XML is malformed, truncated, has no root
    /// element, or the root element is not `Document`.
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut walker = TreeWalker::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => walker.open(&e)?,
                Event::Empty(e) => {
                    walker.open(&e)?;
                    walker.close();
                }
                Event::End(_) => walker.close(),
                Event::Text(t) => walker.text(&t.unescape()?),
                Event::CData(c) => walker.text(&String::from_utf8_lossy(&c)),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        walker.finish()
    }

    /// Mutable slot for a leaf element, addressed by its local-name path
    /// below `CstmrCdtTrfInitn`
    fn leaf_mut(&mut self, path: &[&str]) -> Option<&mut String> {
        let hdr = &mut self.group_header;
        let pmt = &mut self.payment_info;
        let tx = &mut pmt.transaction;

        let slot = match path {
            ["GrpHdr", "MsgId"] => &mut hdr.message_id,
            ["GrpHdr", "CreDtTm"] => &mut hdr.creation_date_time,
            ["GrpHdr", "NbOfTxs"] => &mut hdr.number_of_txs,
            ["GrpHdr", "CtrlSum"] => &mut hdr.control_sum,
            ["GrpHdr", "InitgPty", "Nm"] => &mut hdr.initiating_party.name,

            ["PmtInf", "PmtInfId"] => &mut pmt.payment_info_id,
            ["PmtInf", "PmtMtd"] => &mut pmt.payment_method,
            ["PmtInf", "BtchBookg"] => &mut pmt.batch_booking,
            ["PmtInf", "NbOfTxs"] => &mut pmt.number_of_txs,
            ["PmtInf", "CtrlSum"] => &mut pmt.control_sum,
            ["PmtInf", "PmtTpInf", "SvcLvl", "Cd"] => &mut pmt.payment_type_info.service_level,
            ["PmtInf", "PmtTpInf", "CtgyPurp", "Cd"] => {
                &mut pmt.payment_type_info.category_purpose
            }
            ["PmtInf", "ReqdExctnDt"] => &mut pmt.requested_execution_date,
            ["PmtInf", "Dbtr", "Nm"] => &mut pmt.debtor.name,
            ["PmtInf", "DbtrAcct", "Id", "IBAN"] => &mut pmt.debtor_account.iban,
            ["PmtInf", "DbtrAcct", "Ccy"] => &mut pmt.debtor_account.currency,
            ["PmtInf", "DbtrAgt", "FinInstnId", "BIC"] => &mut pmt.debtor_agent.bic,
            ["PmtInf", "ChrgBr"] => &mut pmt.charge_bearer,

            ["PmtInf", "CdtTrfTxInf", rest @ ..] => match rest {
                ["PmtId", "EndToEndId"] => &mut tx.end_to_end_id,
                ["Amt", "InstdAmt"] => &mut tx.amount.value,
                ["CdtrAgt", "FinInstnId", "BIC"] => &mut tx.creditor_agent.bic,
                ["Cdtr", "Nm"] => &mut tx.creditor.name,
                ["CdtrAcct", "Id", "IBAN"] => &mut tx.creditor_account.iban,
                ["RmtInf", "Strd", "CdtrRefInf", "Tp", "CdOrPrtry", "Cd"] => {
                    &mut tx.remittance.reference_type
                }
                ["RmtInf", "Strd", "CdtrRefInf", "Tp", "Issr"] => &mut tx.remittance.issuer,
                ["RmtInf", "Strd", "CdtrRefInf", "Ref"] => &mut tx.remittance.reference,
                _ => return None,
            },
            _ => return None,
        };

        Some(slot)
    }
}

/// Event-driven builder that tracks the open element path and routes text
/// into the matching `Document` slot
#[derive(Debug, Default)]
struct TreeWalker {
    doc: Document,
    /// Local names of the currently open elements, root first
    stack: Vec<String>,
    /// Text collected for the innermost open element
    text: String,
    /// Stack depth of a repeated block whose content is ignored
    skip_from: Option<usize>,
    saw_root: bool,
}

impl TreeWalker {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        if self.stack.is_empty() {
            if self.saw_root {
                // Trailing sibling of the root; nothing in it is consumed.
                self.skip_from.get_or_insert(1);
            } else if name != ROOT {
                return Err(ParseError::UnexpectedRoot(name));
            }
            self.saw_root = true;
        }

        self.stack.push(name);
        self.text.clear();

        let depth = self.stack.len();
        let path = local_path(&self.stack);
        let is_payment = matches!(path.as_slice(), [PAYMENT_INFO]);
        let is_transaction = matches!(path.as_slice(), [PAYMENT_INFO, TRANSACTION]);
        let is_amount = matches!(
            path.as_slice(),
            [PAYMENT_INFO, TRANSACTION, "Amt", "InstdAmt"]
        );

        // Repeated blocks are counted even when they sit inside a skipped one.
        if is_payment {
            self.doc.payment_info_count += 1;
            if self.doc.payment_info_count > 1 {
                self.skip_from.get_or_insert(depth);
            }
        }
        if is_transaction {
            self.doc.transaction_count += 1;
            if self.doc.transaction_count > 1 {
                self.skip_from.get_or_insert(depth);
            }
        }

        if is_amount && self.skip_from.is_none() {
            let currency = &mut self.doc.payment_info.transaction.amount.currency;
            if currency.is_empty() {
                for attr in start.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    if attr.key.local_name().as_ref() == b"Ccy" {
                        *currency = attr.unescape_value()?.into_owned();
                    }
                }
            }
        }

        Ok(())
    }

    fn text(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    fn close(&mut self) {
        let depth = self.stack.len();
        let text = std::mem::take(&mut self.text);

        if self.skip_from.is_none() && !text.is_empty() {
            let path = local_path(&self.stack);
            // First non-empty occurrence of a leaf wins.
            if let Some(slot) = self.doc.leaf_mut(&path)
                && slot.is_empty()
            {
                *slot = text;
            }
        }

        if self.skip_from == Some(depth) {
            self.skip_from = None;
        }
        self.stack.pop();
    }

    fn finish(self) -> Result<Document> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::UnexpectedEof(open.clone()));
        }
        if !self.saw_root {
            return Err(ParseError::MissingRoot);
        }
        Ok(self.doc)
    }
}

/// Element path below `Document/CstmrCdtTrfInitn`, empty when the stack is
/// outside that subtree
fn local_path(stack: &[String]) -> Vec<&str> {
    match stack {
        [root, initiation, rest @ ..] if root == ROOT && initiation == INITIATION => {
            rest.iter().map(String::as_str).collect()
        }
        _ => Vec::new(),
    }
}
