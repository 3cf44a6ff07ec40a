//! Small "support desk" widgets: password hint, OS guess and a mock ping.

use rand::Rng;

pub const PASSWORD_WAITING: &str = "Waiting for you to type…";

/// Rough strength score from 0 to 5: length 8+, length 12+, an uppercase
/// letter, a digit, a symbol. Length counts UTF-16 units, as the input
/// element reports it.
pub fn password_score(value: &str) -> u8 {
    let len = value.encode_utf16().count();
    let checks = [
        len >= 8,
        len >= 12,
        value.chars().any(|c| c.is_ascii_uppercase()),
        value.chars().any(|c| c.is_ascii_digit()),
        value.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.into_iter().filter(|ok| *ok).count() as u8
}

pub fn password_feedback(value: &str) -> &'static str {
    if value.is_empty() {
        return PASSWORD_WAITING;
    }
    match password_score(value) {
        0..=2 => "This would feel weak in a real environment — try longer phrases and more variety.",
        3 => "Decent, but I’d still suggest a longer passphrase or an extra symbol.",
        4 => "Pretty strong! Just make sure it’s unique and not reused.",
        _ => "Very strong pattern — as long as it’s unique and stored safely, I’d feel good about this.",
    }
}

/// Best guess at the visitor's OS from a user-agent string.
pub fn detect_os(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ua.contains("windows") {
        "Windows"
    } else if ua.contains("macintosh") || ua.contains("mac os x") {
        "macOS"
    } else if ua.contains("linux") {
        "Linux"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("iphone") || ua.contains("ipad") {
        "iOS / iPadOS"
    } else {
        "another OS"
    }
}

pub fn os_message(user_agent: &str) -> String {
    format!("You’re likely using {}.", detect_os(user_agent))
}

pub const PING_RUNNING: &str = "Running a quick mock ping…";

pub const PING_RESULTS: [(&str, &str); 4] = [
    (
        "Excellent",
        "✨ Super snappy. If something feels slow, it’s probably the app — not the network.",
    ),
    (
        "Good",
        "✅ Overall healthy. A quick refresh or sign-out/sign-in usually fixes minor issues.",
    ),
    (
        "Okay",
        "⚠️ A bit of delay. I’d check Wi-Fi strength or ask if others are seeing the same slowness.",
    ),
    (
        "Slow",
        "🐢 Noticeably slow. I’d validate with a real ping/traceroute and check with the network team.",
    ),
];

/// One canned ping result, chosen uniformly.
pub fn mock_ping<R: Rng + ?Sized>(rng: &mut R) -> String {
    let (label, text) = PING_RESULTS[rng.random_range(0..PING_RESULTS.len())];
    format!("{label}: {text}")
}
