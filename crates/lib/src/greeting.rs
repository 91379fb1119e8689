//! Exact-match shortcut for trivial greetings and pleasantries.
//!
//! These inputs are frequent and never benefit from retrieval, so they get
//! deterministic canned replies without touching either external service.
//! Matching is exact string equality after trim + lowercase; no partial or
//! fuzzy matching.

/// Canned replies, keyed by the normalized phrase.
const GREETING_REPLIES: &[(&str, &str)] = &[
    (
        "hi",
        "Hi there! Feel free to ask me about my background, skills, or projects.",
    ),
    (
        "hello",
        "Hello! Ask me anything about my professional background.",
    ),
    (
        "hey",
        "Hey! Happy to talk about my experience, skills, or projects.",
    ),
    (
        "good morning",
        "Good morning! What would you like to know about my background?",
    ),
    (
        "good afternoon",
        "Good afternoon! What would you like to know about my background?",
    ),
    (
        "good evening",
        "Good evening! What would you like to know about my background?",
    ),
    ("thanks", "You're welcome! Anything else you'd like to know?"),
    (
        "thank you",
        "You're welcome! Anything else you'd like to know?",
    ),
    ("bye", "Goodbye! Thanks for stopping by."),
    ("goodbye", "Goodbye! Thanks for stopping by."),
];

/// Returns the canned reply for a greeting, or `None` for anything that
/// should go through the full pipeline.
pub fn greeting_reply(question: &str) -> Option<&'static str> {
    let normalized = question.trim().to_lowercase();
    GREETING_REPLIES
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .map(|(_, reply)| *reply)
}
