use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::{Identity, JwtClaims};

type HmacSha256 = Hmac<Sha256>;

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Identity, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signature_string = format!("{}.{}", header_b64, claims_b64);

    let mut mac = match HmacSha256::new_from_slice(jwt_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err("Failed to create HMAC".to_string()),
    };

    mac.update(signature_string.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    // Decode claims
    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    // Check expiration
    if let Some(exp) = claims.exp {
        let now = chrono::Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    let id = Uuid::parse_str(&claims.sub).map_err(|_| "Invalid subject id".to_string())?;
    let role = claims.role.ok_or_else(|| "Missing role claim".to_string())?;

    let identity = Identity {
        id,
        role,
        email: claims.email.unwrap_or_default(),
        name: claims.name.unwrap_or_default(),
    };

    debug!("Token validated successfully for user: {}", identity.id);
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mint_token;
    use shared_models::auth::Role;

    #[test]
    fn round_trips_a_signed_token() {
        let id = Uuid::new_v4();
        let token = mint_token(id, Role::Patient, "jane@example.com", "Jane Smith", "secret");
        let identity = validate_token(&token, "secret").unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.role, Role::Patient);
        assert_eq!(identity.email, "jane@example.com");
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = mint_token(Uuid::new_v4(), Role::Doctor, "d@example.com", "Dr", "secret");
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(validate_token("not-a-jwt", "secret").is_err());
    }
}
