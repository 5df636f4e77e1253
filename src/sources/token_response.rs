use serde_json::Value;

use crate::errors::TokenError;

static ACCESS_TOKEN_FIELD: &str = "access_token";
static EXPIRES_IN_FIELD: &str = "expires_in";

/// Token endpoint answer reduced to what the cache needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// seconds
    pub expires_in: i64,
}

/// Both `access_token` and `expires_in` are required; other fields are ignored.
/// `expires_in` may arrive as a number or a numeric string.
pub fn parse_token_response(body: &str) -> Result<TokenGrant, TokenError> {
    let json: Value = serde_json::from_str(body)?;

    let access_token = match json.get(ACCESS_TOKEN_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => s.to_owned(),
        _ => return Err(TokenError::MissingField(ACCESS_TOKEN_FIELD)),
    };

    let expires_in = json
        .get(EXPIRES_IN_FIELD)
        .and_then(seconds_from_value)
        .ok_or(TokenError::MissingField(EXPIRES_IN_FIELD))?;

    Ok(TokenGrant { access_token, expires_in })
}

fn seconds_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
