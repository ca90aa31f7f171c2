//! Stripe integration via REST API (no SDK dependency)

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use super::{IntentRequest, IssuedIntent, PaymentAuthority, PaymentError};

/// Webhook events older than this are treated as replays
const SIGNATURE_TOLERANCE_SECS: u64 = 300;

/// Stripe payment intents client
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    /// Every request made by this client is bounded by `timeout`.
    pub fn new(
        api_base: &str,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }

    fn form(request: &IntentRequest) -> Vec<(String, String)> {
        let mut form = vec![
            ("amount".to_string(), request.amount_minor.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("description".to_string(), request.description.clone()),
        ];
        if let Some(email) = &request.receipt_email {
            form.push(("receipt_email".to_string(), email.clone()));
        }
        for (key, value) in &request.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }
        form
    }
}

#[async_trait]
impl PaymentAuthority for StripeClient {
    async fn create_intent(&self, request: &IntentRequest) -> Result<IssuedIntent, PaymentError> {
        let resp = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&Self::form(request))
            .send()
            .await?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("no error message")
                .to_string();
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        match (body["id"].as_str(), body["client_secret"].as_str()) {
            (Some(id), Some(secret)) => Ok(IssuedIntent {
                reference: id.to_string(),
                client_secret: secret.to_string(),
            }),
            _ => Err(PaymentError::MalformedResponse(
                "payment intent missing id or client_secret".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid Stripe-Signature header")]
    MalformedHeader,
    #[error("HMAC key error")]
    Key,
    #[error("invalid signature hex")]
    BadHex,
    #[error("webhook signature mismatch")]
    Mismatch,
    #[error("invalid timestamp")]
    BadTimestamp,
    #[error("webhook timestamp outside tolerance")]
    Expired,
}

/// Verify Stripe webhook signature (HMAC-SHA256) against `now` (unix seconds)
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp = "";
    let mut signatures = Vec::new();
    for part in sig_header.split(',') {
        let part = part.trim();
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signatures.push(v);
        }
    }

    if timestamp.is_empty() || signatures.is_empty() {
        return Err(SignatureError::MalformedHeader);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::Key)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    // Stripe may send several v1 entries while a secret is being rolled;
    // an undecodable entry must not hide a later valid one.
    let mut decoded_any = false;
    let mut matched = false;
    for signature in signatures {
        let Ok(sig_bytes) = hex::decode(signature) else {
            continue;
        };
        decoded_any = true;
        if mac.clone().verify_slice(&sig_bytes).is_ok() {
            matched = true;
            break;
        }
    }
    if !matched {
        return Err(if decoded_any {
            SignatureError::Mismatch
        } else {
            SignatureError::BadHex
        });
    }

    let ts: i64 = timestamp.parse().map_err(|_| SignatureError::BadTimestamp)?;
    if now.abs_diff(ts) > SIGNATURE_TOLERANCE_SECS {
        return Err(SignatureError::Expired);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sign(payload: &[u8], secret: &str, ts: i64) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{ts}.").as_bytes());
        mac.update(payload);
        format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature() {
        let payload = br#"{"type":"payment_intent.succeeded"}"#;
        let header = sign(payload, "whsec_test", 1_700_000_000);
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", 1_700_000_010),
            Ok(())
        );
    }

    #[test]
    fn test_wrong_secret() {
        let payload = b"{}";
        let header = sign(payload, "whsec_other", 1_700_000_000);
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", 1_700_000_000),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_tampered_payload() {
        let header = sign(b"{\"a\":1}", "whsec_test", 1_700_000_000);
        assert_eq!(
            verify_webhook_signature(b"{\"a\":2}", &header, "whsec_test", 1_700_000_000),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_stale_timestamp() {
        let payload = b"{}";
        let header = sign(payload, "whsec_test", 1_700_000_000);
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", 1_700_000_301),
            Err(SignatureError::Expired)
        );
    }

    #[test]
    fn test_malformed_header() {
        assert_eq!(
            verify_webhook_signature(b"{}", "garbage", "whsec_test", 0),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify_webhook_signature(b"{}", "t=1,v1=zz", "whsec_test", 1),
            Err(SignatureError::BadHex)
        );
    }

    #[test]
    fn test_second_v1_entry_accepted() {
        let payload = b"{}";
        let good = sign(payload, "whsec_test", 1_700_000_000);
        let good_sig = good.split("v1=").nth(1).unwrap();
        let header = format!("t=1700000000,v1={},v1={good_sig}", "00".repeat(32));
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", 1_700_000_000),
            Ok(())
        );
    }

    #[test]
    fn test_undecodable_entry_does_not_hide_valid_one() {
        let payload = b"{}";
        let good = sign(payload, "whsec_test", 1_700_000_000);
        let good_sig = good.split("v1=").nth(1).unwrap();
        let header = format!("t=1700000000,v1=not-hex,v1={good_sig}");
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", 1_700_000_000),
            Ok(())
        );
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let payload = b"{}";
        let header = sign(payload, "whsec_test", i64::MIN);
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", i64::MAX),
            Err(SignatureError::Expired)
        );
    }

    #[test]
    fn test_intent_form_encoding() {
        let mut metadata = BTreeMap::new();
        metadata.insert("donation_type".to_string(), "one_time".to_string());
        let form = StripeClient::form(&IntentRequest {
            amount_minor: 2500,
            currency: "usd".into(),
            description: "Donation".into(),
            receipt_email: Some("ann@x.com".into()),
            metadata,
        });

        assert!(form.contains(&("amount".into(), "2500".into())));
        assert!(form.contains(&("currency".into(), "usd".into())));
        assert!(form.contains(&("receipt_email".into(), "ann@x.com".into())));
        assert!(form.contains(&("metadata[donation_type]".into(), "one_time".into())));
    }
}
