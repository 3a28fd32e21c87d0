//! Dispute resource implementation.
//!
//! Disputes are payment chargebacks. They are opened by the card network, so
//! there is no create or delete; the merchant supplies evidence with
//! [`Dispute::update_evidence`] and then either [`Dispute::submit`]s it or
//! [`Dispute::accept`]s the chargeback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{ListParams, QueryBuilder, RestResource};

/// A payment dispute.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Dispute {
    /// The unique identifier of the dispute.
    pub id: String,
    /// The disputed order.
    pub order_id: String,
    /// The disputed payment.
    pub payment_id: String,
    /// Disputed amount as a decimal string.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// e.g. `needs_response`, `under_review`, `won`, `lost`.
    pub status: String,
    /// e.g. `fraudulent`, `product_not_received`.
    pub reason: String,
    /// Card network reason code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_reason_code: String,
    /// Evidence submitted so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<DisputeEvidence>,
    /// Deadline for submitting evidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_due_by: Option<DateTime<Utc>>,
    /// When the dispute was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the dispute was opened.
    pub created_at: Option<DateTime<Utc>>,
    /// When the dispute was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Dispute {
    /// Returns `true` once the dispute has a resolution.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// Evidence supporting the merchant's side of a dispute.
///
/// Also used as the body of [`Dispute::update_evidence`]; empty fields are
/// not sent and leave the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DisputeEvidence {
    /// Customer's name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_name: String,
    /// Customer's email address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_email: String,
    /// IP address the purchase was made from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_purchase_ip: String,
    /// What was sold.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_description: String,
    /// Shipping carrier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipping_carrier: String,
    /// Tracking number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipping_tracking_number: String,
    /// Ship date.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipping_date: String,
    /// Refund policy shown at checkout.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refund_policy: String,
    /// Anything else.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uncategorized_text: String,
}

/// Filters for [`RestResource::all`] on disputes.
#[derive(Debug, Clone, Default)]
pub struct DisputeListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Dispute status.
    pub status: String,
    /// Dispute reason.
    pub reason: String,
}

impl ListParams for DisputeListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("status", &self.status)
            .string("reason", &self.reason)
    }
}

impl RestResource for Dispute {
    const NAME: &'static str = "dispute";
    const PLURAL: &'static str = "disputes";
    type ListOptions = DisputeListOptions;
}

impl Dispute {
    /// Saves evidence on a dispute.
    ///
    /// Sends `PUT /disputes/{id}/evidence`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update_evidence(
        client: &RestClient,
        id: &str,
        evidence: &DisputeEvidence,
    ) -> Result<Self, HttpError> {
        let path = format!("{}/evidence", Self::member_path(id)?);
        client.put(&path, evidence).await
    }

    /// Submits the saved evidence for review.
    ///
    /// Sends `POST /disputes/{id}/submit`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn submit(client: &RestClient, id: &str) -> Result<Self, HttpError> {
        let path = format!("{}/submit", Self::member_path(id)?);
        client.post(&path, &()).await
    }

    /// Accepts the chargeback without contesting it.
    ///
    /// Sends `POST /disputes/{id}/accept`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn accept(client: &RestClient, id: &str) -> Result<Self, HttpError> {
        let path = format!("{}/accept", Self::member_path(id)?);
        client.post(&path, &()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispute_deserialization() {
        let dispute: Dispute = serde_json::from_value(json!({
            "id": "dsp_1",
            "order_id": "ord_1",
            "amount": "49.90",
            "currency": "TWD",
            "status": "needs_response",
            "reason": "fraudulent",
            "evidence": {"customer_name": "Jane Doe"},
            "evidence_due_by": "2024-03-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(dispute.status, "needs_response");
        assert_eq!(dispute.evidence.as_ref().unwrap().customer_name, "Jane Doe");
        assert!(dispute.evidence_due_by.is_some());
        assert!(!dispute.is_resolved());
    }

    #[test]
    fn test_evidence_serializes_only_provided_fields() {
        let evidence = DisputeEvidence {
            shipping_carrier: "SF Express".to_string(),
            shipping_tracking_number: "SF123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&evidence).unwrap(),
            json!({"shipping_carrier": "SF Express", "shipping_tracking_number": "SF123"})
        );
    }

    #[test]
    fn test_list_options_query() {
        let options = DisputeListOptions {
            reason: "fraudulent".to_string(),
            page: 1,
            ..Default::default()
        };
        assert_eq!(options.to_query().build(), "?page=1&reason=fraudulent");
    }
}
