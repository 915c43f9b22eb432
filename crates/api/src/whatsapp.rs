//! WhatsApp `wa.me` deep-link rendering for recap messages.
//!
//! The core composer produces plain text payloads; this turns them into
//! click-to-send links. Actual delivery stays with the user's WhatsApp
//! client, outside this service.

/// Build a `https://wa.me/<number>?text=<encoded>` deep link.
///
/// Everything that is not an ASCII digit is stripped from the phone number
/// (so `+33 6 12 34 56 78` and `+33612345678` produce the same link).
pub fn wa_link(phone: &str, text: &str) -> String {
    let number: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{number}?text={}", percent_encode(text))
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass
/// through, everything else is `%XX`-escaped byte-wise).
fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}
