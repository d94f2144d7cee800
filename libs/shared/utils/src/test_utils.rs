//! Helpers for minting signed tokens in tests. Not used by the runtime
//! path, which only ever validates.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_models::auth::Role;

type HmacSha256 = Hmac<Sha256>;

pub fn mint_token(id: Uuid, role: Role, email: &str, name: &str, secret: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
    let exp = chrono::Utc::now().timestamp() as u64 + 3600;
    let claims = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": id.to_string(),
            "exp": exp,
            "email": email,
            "role": role.to_string(),
            "name": name,
        })
        .to_string(),
    );

    let signing_input = format!("{}.{}", header, claims);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{}.{}", signing_input, signature)
}
