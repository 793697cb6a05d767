use crate::lastfm::Params;

/// Parameters that never take part in the signature.
pub const UNSIGNED_KEYS: [&str; 2] = ["format", "callback"];

/// Computes the `api_sig` value for a set of request parameters.
///
/// All keys except `format` and `callback` are sorted lexicographically,
/// each key is immediately followed by its value, the API secret is
/// appended, and the MD5 digest of the UTF-8 bytes is returned as 32
/// lowercase hex characters.
///
/// Keys and values are concatenated verbatim. Delimiters such as `=` or
/// `&` are not escaped; the remote service computes its digest the same way.
///
/// # Example
///
/// ```
/// let mut params = Params::new();
/// params.insert("method".into(), "auth.getSession".into());
/// params.insert("format".into(), "json".into());
/// let sig = sign(&params, "secret"); // md5("methodauth.getSessionsecret")
/// ```
pub fn sign(params: &Params, secret: &str) -> String {
    let mut keys: Vec<&String> = params
        .keys()
        .filter(|k| !UNSIGNED_KEYS.contains(&k.as_str()))
        .collect();
    keys.sort();

    let mut payload = String::new();
    for key in keys {
        payload.push_str(key);
        payload.push_str(&params[key]);
    }
    payload.push_str(secret);

    format!("{:x}", md5::compute(payload.as_bytes()))
}

/// Signs `params` and inserts the result as `api_sig`.
pub fn sign_into(params: &mut Params, secret: &str) {
    let sig = sign(params, secret);
    params.insert("api_sig".to_string(), sig);
}
