//! Checkout against the external guest-checkout API. The shop does not own
//! booking persistence or payment; this module only builds the wire request
//! from the finished selection, performs the single POST, and reports the
//! outcome back into the wizard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::{BookingSelection, Wizard};

pub const PAYMENT_METHOD_CASH: &str = "Cash";
pub const ERR_CHECKOUT_FAILED: &str = "Checkout failed";
pub const ERR_CHECKOUT_UNEXPECTED: &str = "An error occurred during checkout";

const CHECKOUT_PATH: &str = "/api/guest/checkout";

/// Body of `POST /api/guest/checkout`. The backend keys the guest's display
/// name under `guest_email`; the field here is named for what it carries and
/// only the wire name keeps the legacy key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    #[serde(rename = "guest_email")]
    pub guest_name: String,
    pub guest_phone: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub service_id: String,
    pub barber_id: String,
    pub amount_paid: f64,
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CheckoutReceipt>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutReceipt {
    pub guest_transaction_id: String,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout endpoint unreachable: {0}")]
    Transport(reqwest::Error),
    #[error("checkout response unreadable: {0}")]
    Malformed(reqwest::Error),
}

#[derive(Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    base_url: String,
}

impl CheckoutClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        CheckoutClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// One POST, no retry. Server-side rejections come back as a decoded
    /// response with `success == false`, not as an `Err`.
    pub async fn submit(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, CheckoutError> {
        let url = format!("{}{CHECKOUT_PATH}", self.base_url);
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(CheckoutError::Transport)?;
        response
            .json::<CheckoutResponse>()
            .await
            .map_err(CheckoutError::Malformed)
    }
}

/// Where a finished booking sends the guest: the receipt page, keyed by the
/// transaction id the API returned. The query key for the guest's name stays
/// `email` to match the receipt page's existing contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLocation {
    pub transaction_id: String,
    pub guest_name: String,
}

impl ReceiptLocation {
    pub fn path(&self) -> String {
        let query = serde_urlencoded::to_string([
            ("transaction_id", self.transaction_id.as_str()),
            ("email", self.guest_name.as_str()),
        ])
        .unwrap_or_default();
        format!("/receipt?{query}")
    }
}

impl CheckoutRequest {
    /// `None` while any required selection is missing; the wizard's step
    /// gates normally guarantee completeness before this is called.
    pub fn from_selection(selection: &BookingSelection) -> Option<CheckoutRequest> {
        let service = selection.service.as_ref()?;
        Some(CheckoutRequest {
            guest_name: selection.guest.name.clone(),
            guest_phone: selection.guest.phone.clone(),
            appointment_date: selection.date.clone()?,
            appointment_time: selection.time.clone()?,
            service_id: service.id.clone(),
            barber_id: selection.barber.as_ref()?.id.clone(),
            amount_paid: service.price,
            payment_method: PAYMENT_METHOD_CASH.to_string(),
        })
    }
}

/// Drive one checkout attempt for a wizard sitting on the confirmation step.
/// Returns the receipt destination on success; on any failure the wizard
/// stays where it is with the message set and the busy flag cleared.
pub async fn submit_booking(
    wizard: &mut Wizard,
    client: &CheckoutClient,
) -> Option<ReceiptLocation> {
    if wizard.is_busy() {
        return None;
    }
    if let Some(message) = wizard.selection().first_incomplete() {
        wizard.fail_checkout(message);
        return None;
    }

    wizard.begin_checkout();
    let request = match CheckoutRequest::from_selection(wizard.selection()) {
        Some(request) => request,
        None => {
            wizard.fail_checkout(ERR_CHECKOUT_FAILED);
            return None;
        }
    };

    match client.submit(&request).await {
        Ok(response) if response.success => match response.data {
            Some(receipt) => Some(ReceiptLocation {
                transaction_id: receipt.guest_transaction_id,
                guest_name: request.guest_name,
            }),
            None => {
                wizard.fail_checkout(ERR_CHECKOUT_FAILED);
                None
            }
        },
        Ok(response) => {
            let message = response
                .error
                .unwrap_or_else(|| ERR_CHECKOUT_FAILED.to_string());
            wizard.fail_checkout(message);
            None
        }
        Err(err) => {
            log::error!("Checkout error: {err}");
            wizard.fail_checkout(ERR_CHECKOUT_UNEXPECTED);
            None
        }
    }
}
