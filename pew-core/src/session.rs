//! Signed session tokens.
//!
//! A token is `HMAC-SHA256(secret, "{session_id}:{start_time}")`, hex encoded.
//! The server never stores issued tokens; it re-derives the signature when a
//! score comes back.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::clock::Clock;
use crate::constants::SESSION_ID_BYTES;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub session_id: String,
    /// Server clock at issuance, epoch milliseconds.
    pub start_time: i64,
    pub token: String,
}

/// Keyed once; every signature starts from a clone of the keyed MAC.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret.as_ref())?,
        })
    }

    pub fn sign(&self, session_id: &str, start_time: i64) -> String {
        let mut mac = self.mac.clone();
        mac.update(format!("{session_id}:{start_time}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Exact match against the recomputed signature, compared without
    /// early exit.
    pub fn verify(&self, session_id: &str, start_time: i64, token: &str) -> bool {
        let expected = self.sign(session_id, start_time);
        constant_time_eq(expected.as_bytes(), token.as_bytes())
    }

    pub fn issue_at(&self, start_time: i64) -> SessionToken {
        let mut id = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut id);
        let session_id = hex::encode(id);
        let token = self.sign(&session_id, start_time);
        SessionToken {
            session_id,
            start_time,
            token,
        }
    }

    pub fn issue(&self, clock: &impl Clock) -> SessionToken {
        self.issue_at(clock.now_ms())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
