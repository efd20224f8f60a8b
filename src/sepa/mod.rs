//! SEPA credit-transfer document mapping
//!
//! Turns a pain.001.001.03 XML document into the flat, ordered field list the
//! viewer displays. Decoding goes through the typed [`Document`] tree; the
//! flattening step is total, so every document that decodes yields the same
//! rows in the same order, with empty values for anything the source left out.
//!
//! # Examples
//!
//! ```
//! use sepa_view::sepa::{self, Category};
//!
//! let xml = br#"<Document><CstmrCdtTrfInitn>
//!     <GrpHdr><MsgId>MSG-1</MsgId></GrpHdr>
//! </CstmrCdtTrfInitn></Document>"#;
//!
//! let data = sepa::parse_bytes(xml)?;
//! assert_eq!(data.fields.len(), sepa::FIELD_COUNT);
//! assert_eq!(data.fields[0].category, Category::GroupHeader);
//! assert_eq!(data.fields[0].value, "MSG-1");
//! # Ok::<(), sepa_view::sepa::ParseError>(())
//! ```

pub mod document;
pub mod error;

pub use document::Document;
pub use error::{ParseError, Result};

use chrono::NaiveDateTime;
use std::fmt;
use std::path::Path;

/// Number of rows every decoded document flattens to
pub const FIELD_COUNT: usize = 26;

const SOURCE_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Section a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    GroupHeader,
    PaymentInfo,
    Debtor,
    Transaction,
    Creditor,
    Remittance,
}

impl Category {
    /// Display label of the category
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GroupHeader => "Group Header",
            Self::PaymentInfo => "Payment Info",
            Self::Debtor => "Debtor",
            Self::Transaction => "Transaction",
            Self::Creditor => "Creditor",
            Self::Remittance => "Remittance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled row of the flattened document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub category: Category,
    pub name: String,
    pub value: String,
}

impl Field {
    /// Create a new field
    #[must_use]
    pub fn new(category: Category, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Flattened document ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SepaData {
    /// Rows in display order
    pub fields: Vec<Field>,
    /// `PmtInf` blocks present in the source (only the first is shown)
    pub payment_info_count: usize,
    /// `CdtTrfTxInf` blocks present in the source (only the first is shown)
    pub transaction_count: usize,
}

impl SepaData {
    /// Short note about blocks that were left out of the projection, if any
    #[must_use]
    pub fn coverage_note(&self) -> Option<String> {
        match (self.payment_info_count > 1, self.transaction_count > 1) {
            (false, false) => None,
            (true, false) => Some(format!(
                "showing first of {} payment blocks",
                self.payment_info_count
            )),
            (false, true) => Some(format!(
                "showing first of {} transactions",
                self.transaction_count
            )),
            (true, true) => Some(format!(
                "showing first of {} payment blocks, {} transactions",
                self.payment_info_count, self.transaction_count
            )),
        }
    }
}

impl From<&Document> for SepaData {
    fn from(doc: &Document) -> Self {
        Self {
            fields: flatten(doc),
            payment_info_count: doc.payment_info_count,
            transaction_count: doc.transaction_count,
        }
    }
}

/// Read and parse a SEPA XML file
///
/// # Errors
///
/// Returns `ParseError::Read` if the file cannot be read, or any decoding
/// error from [`parse_bytes`].
pub fn parse_file(path: &Path) -> Result<SepaData> {
    tracing::info!(path = %path.display(), "reading SEPA document");
    let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes)
}

/// Parse SEPA XML bytes into the flat field list
///
/// # Errors
///
/// Returns `ParseError` if the bytes are not a well-formed XML document
/// rooted at `Document`.
pub fn parse_bytes(bytes: &[u8]) -> Result<SepaData> {
    let doc = Document::from_xml(bytes).inspect_err(|e| {
        tracing::warn!(error = %e, "SEPA document failed to decode");
    })?;

    let data = SepaData::from(&doc);
    if let Some(note) = data.coverage_note() {
        tracing::warn!(
            payment_blocks = doc.payment_info_count,
            transactions = doc.transaction_count,
            "{note}"
        );
    }
    tracing::debug!(fields = data.fields.len(), "SEPA document flattened");
    Ok(data)
}

/// Project the decoded tree onto the fixed display rows
#[must_use]
pub fn flatten(doc: &Document) -> Vec<Field> {
    use Category::{Creditor, Debtor, GroupHeader, PaymentInfo, Remittance, Transaction};

    let hdr = &doc.group_header;
    let pmt = &doc.payment_info;
    let tx = &pmt.transaction;
    let reference = &tx.remittance;

    vec![
        Field::new(GroupHeader, "Message ID", &hdr.message_id),
        Field::new(
            GroupHeader,
            "Creation Date Time",
            format_date_time(&hdr.creation_date_time),
        ),
        Field::new(GroupHeader, "Number of Transactions", &hdr.number_of_txs),
        Field::new(GroupHeader, "Control Sum", &hdr.control_sum),
        Field::new(GroupHeader, "Initiating Party", &hdr.initiating_party.name),
        Field::new(PaymentInfo, "Payment Info ID", &pmt.payment_info_id),
        Field::new(PaymentInfo, "Payment Method", &pmt.payment_method),
        Field::new(PaymentInfo, "Batch Booking", &pmt.batch_booking),
        Field::new(PaymentInfo, "Number of Transactions", &pmt.number_of_txs),
        Field::new(PaymentInfo, "Control Sum", &pmt.control_sum),
        Field::new(PaymentInfo, "Service Level", &pmt.payment_type_info.service_level),
        Field::new(
            PaymentInfo,
            "Category Purpose",
            &pmt.payment_type_info.category_purpose,
        ),
        Field::new(
            PaymentInfo,
            "Requested Execution Date",
            &pmt.requested_execution_date,
        ),
        Field::new(PaymentInfo, "Charge Bearer", &pmt.charge_bearer),
        Field::new(Debtor, "Name", &pmt.debtor.name),
        Field::new(Debtor, "IBAN", &pmt.debtor_account.iban),
        Field::new(Debtor, "Currency", &pmt.debtor_account.currency),
        Field::new(Debtor, "BIC", &pmt.debtor_agent.bic),
        Field::new(Transaction, "End to End ID", &tx.end_to_end_id),
        Field::new(
            Transaction,
            format!("Amount ({})", tx.amount.currency),
            &tx.amount.value,
        ),
        Field::new(Creditor, "Name", &tx.creditor.name),
        Field::new(Creditor, "IBAN", &tx.creditor_account.iban),
        Field::new(Creditor, "BIC", &tx.creditor_agent.bic),
        Field::new(Remittance, "Reference Type", &reference.reference_type),
        Field::new(Remittance, "Issuer", &reference.issuer),
        Field::new(Remittance, "Reference", &reference.reference),
    ]
}

/// Reformat an ISO `YYYY-MM-DDTHH:MM:SS` timestamp as `YYYY-MM-DD HH:MM:SS`
///
/// Anything that does not parse is returned unchanged.
#[must_use]
pub fn format_date_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, SOURCE_DATE_TIME)
        .map_or_else(|_| raw.to_string(), |dt| dt.format(DISPLAY_DATE_TIME).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.001.001.03">
  <CstmrCdtTrfInitn>
    <GrpHdr>
      <MsgId>MSG-2024-001</MsgId>
      <CreDtTm>2024-03-15T10:30:00</CreDtTm>
      <NbOfTxs>1</NbOfTxs>
      <CtrlSum>1500.00</CtrlSum>
      <InitgPty><Nm>ACME Corp</Nm></InitgPty>
    </GrpHdr>
    <PmtInf>
      <PmtInfId>PMT-001</PmtInfId>
      <PmtMtd>TRF</PmtMtd>
      <BtchBookg>true</BtchBookg>
      <NbOfTxs>2</NbOfTxs>
      <CtrlSum>1499.99</CtrlSum>
      <PmtTpInf>
        <SvcLvl><Cd>SEPA</Cd></SvcLvl>
        <CtgyPurp><Cd>SUPP</Cd></CtgyPurp>
      </PmtTpInf>
      <ReqdExctnDt>2024-03-18</ReqdExctnDt>
      <Dbtr><Nm>ACME Corp</Nm></Dbtr>
      <DbtrAcct><Id><IBAN>DE89370400440532013000</IBAN></Id><Ccy>EUR</Ccy></DbtrAcct>
      <DbtrAgt><FinInstnId><BIC>COBADEFFXXX</BIC></FinInstnId></DbtrAgt>
      <ChrgBr>SLEV</ChrgBr>
      <CdtTrfTxInf>
        <PmtId><EndToEndId>E2E-42</EndToEndId></PmtId>
        <Amt><InstdAmt Ccy="EUR">1500.00</InstdAmt></Amt>
        <CdtrAgt><FinInstnId><BIC>BNPAFRPPXXX</BIC></FinInstnId></CdtrAgt>
        <Cdtr><Nm>Supplier &amp; Sons</Nm></Cdtr>
        <CdtrAcct><Id><IBAN>FR1420041010050500013M02606</IBAN></Id></CdtrAcct>
        <RmtInf>
          <Strd>
            <CdtrRefInf>
              <Tp><CdOrPrtry><Cd>SCOR</Cd></CdOrPrtry><Issr>ISO</Issr></Tp>
              <Ref>RF18539007547034</Ref>
            </CdtrRefInf>
          </Strd>
        </RmtInf>
      </CdtTrfTxInf>
    </PmtInf>
  </CstmrCdtTrfInitn>
</Document>"#;

    fn rows(data: &SepaData) -> Vec<(&str, &str, &str)> {
        data.fields
            .iter()
            .map(|f| (f.category.label(), f.name.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_full_document_order_and_values() {
        let data = parse_bytes(FULL.as_bytes()).unwrap();
        assert_eq!(
            rows(&data),
            vec![
                ("Group Header", "Message ID", "MSG-2024-001"),
                ("Group Header", "Creation Date Time", "2024-03-15 10:30:00"),
                ("Group Header", "Number of Transactions", "1"),
                ("Group Header", "Control Sum", "1500.00"),
                ("Group Header", "Initiating Party", "ACME Corp"),
                ("Payment Info", "Payment Info ID", "PMT-001"),
                ("Payment Info", "Payment Method", "TRF"),
                ("Payment Info", "Batch Booking", "true"),
                ("Payment Info", "Number of Transactions", "2"),
                ("Payment Info", "Control Sum", "1499.99"),
                ("Payment Info", "Service Level", "SEPA"),
                ("Payment Info", "Category Purpose", "SUPP"),
                ("Payment Info", "Requested Execution Date", "2024-03-18"),
                ("Payment Info", "Charge Bearer", "SLEV"),
                ("Debtor", "Name", "ACME Corp"),
                ("Debtor", "IBAN", "DE89370400440532013000"),
                ("Debtor", "Currency", "EUR"),
                ("Debtor", "BIC", "COBADEFFXXX"),
                ("Transaction", "End to End ID", "E2E-42"),
                ("Transaction", "Amount (EUR)", "1500.00"),
                ("Creditor", "Name", "Supplier & Sons"),
                ("Creditor", "IBAN", "FR1420041010050500013M02606"),
                ("Creditor", "BIC", "BNPAFRPPXXX"),
                ("Remittance", "Reference Type", "SCOR"),
                ("Remittance", "Issuer", "ISO"),
                ("Remittance", "Reference", "RF18539007547034"),
            ]
        );
        assert_eq!(data.coverage_note(), None);
    }

    #[test]
    fn test_missing_elements_yield_empty_values() {
        let xml = "<Document><CstmrCdtTrfInitn><GrpHdr><MsgId>X</MsgId></GrpHdr></CstmrCdtTrfInitn></Document>";
        let data = parse_bytes(xml.as_bytes()).unwrap();

        assert_eq!(data.fields.len(), FIELD_COUNT);
        assert_eq!(data.fields[0].value, "X");
        assert!(data.fields[1..].iter().all(|f| f.value.is_empty()));
        assert_eq!(data.fields[19].name, "Amount ()");
    }

    #[test]
    fn test_empty_root_still_flattens() {
        let data = parse_bytes(b"<Document/>").unwrap();
        assert_eq!(data.fields.len(), FIELD_COUNT);
        assert!(data.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_namespace_prefixes_are_ignored() {
        let xml = r#"<p:Document xmlns:p="urn:iso:std:iso:20022:tech:xsd:pain.001.001.03">
            <p:CstmrCdtTrfInitn><p:PmtInf><p:CdtTrfTxInf>
                <p:Amt><p:InstdAmt Ccy="CHF">12.50</p:InstdAmt></p:Amt>
            </p:CdtTrfTxInf></p:PmtInf></p:CstmrCdtTrfInitn>
        </p:Document>"#;
        let data = parse_bytes(xml.as_bytes()).unwrap();
        assert_eq!(data.fields[19].name, "Amount (CHF)");
        assert_eq!(data.fields[19].value, "12.50");
    }

    #[test]
    fn test_first_payment_block_and_transaction_win() {
        let xml = r#"<Document><CstmrCdtTrfInitn>
            <PmtInf>
              <PmtInfId>FIRST</PmtInfId>
              <CdtTrfTxInf><PmtId><EndToEndId>TX-1</EndToEndId></PmtId></CdtTrfTxInf>
              <CdtTrfTxInf><PmtId><EndToEndId>TX-2</EndToEndId></PmtId></CdtTrfTxInf>
            </PmtInf>
            <PmtInf>
              <PmtInfId>SECOND</PmtInfId>
              <CdtTrfTxInf><PmtId><EndToEndId>TX-3</EndToEndId></PmtId></CdtTrfTxInf>
            </PmtInf>
        </CstmrCdtTrfInitn></Document>"#;
        let data = parse_bytes(xml.as_bytes()).unwrap();

        assert_eq!(data.fields[5].value, "FIRST");
        assert_eq!(data.fields[18].value, "TX-1");
        assert_eq!(data.payment_info_count, 2);
        assert_eq!(data.transaction_count, 3);
        assert_eq!(
            data.coverage_note().as_deref(),
            Some("showing first of 2 payment blocks, 3 transactions")
        );
    }

    #[test]
    fn test_elements_outside_known_paths_are_ignored() {
        let xml = "<Document><MsgId>stray</MsgId><CstmrCdtTrfInitn><MsgId>also stray</MsgId></CstmrCdtTrfInitn></Document>";
        let data = parse_bytes(xml.as_bytes()).unwrap();
        assert!(data.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_cdata_value() {
        let xml = "<Document><CstmrCdtTrfInitn><GrpHdr><MsgId><![CDATA[A<B]]></MsgId></GrpHdr></CstmrCdtTrfInitn></Document>";
        let data = parse_bytes(xml.as_bytes()).unwrap();
        assert_eq!(data.fields[0].value, "A<B");
    }

    #[test]
    fn test_wrong_root_is_error() {
        let err = parse_bytes(b"<Invoice><Id>1</Id></Invoice>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot(ref name) if name == "Invoice"));
    }

    #[test]
    fn test_truncated_document_is_error() {
        let err = parse_bytes(b"<Document><CstmrCdtTrfInitn><GrpHdr>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedEof(_) | ParseError::Xml(_)
        ));
    }

    #[test]
    fn test_mismatched_tags_are_error() {
        let err = parse_bytes(b"<Document><GrpHdr></MsgId></Document>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn test_no_root_is_error() {
        assert!(matches!(
            parse_bytes(b"").unwrap_err(),
            ParseError::MissingRoot
        ));
        assert!(matches!(
            parse_bytes(b"just some text").unwrap_err(),
            ParseError::MissingRoot
        ));
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2024-03-15T10:30:00"), "2024-03-15 10:30:00");
        assert_eq!(format_date_time("2024-03-15T10:30:00.123"), "2024-03-15 10:30:00");
        assert_eq!(format_date_time("not-a-date"), "not-a-date");
        assert_eq!(format_date_time("2024-03-15T10:30:00+01:00"), "2024-03-15T10:30:00+01:00");
        assert_eq!(format_date_time(""), "");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/sepa.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read file"));
    }
}
