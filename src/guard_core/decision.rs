use super::types::Decision;

/// Coerces whatever the model wrote into a [`Decision`].
///
/// Only a bare "yes" (any case, surrounding whitespace ignored) approves.
/// Everything else, including an empty reply or "Yes." with punctuation,
/// is a rejection.
pub fn normalize(raw: &str) -> Decision {
    let reply = raw.trim();
    if reply.eq_ignore_ascii_case("yes") {
        Decision::Yes
    } else {
        if !reply.eq_ignore_ascii_case("no") {
            tracing::debug!(reply, "ambiguous model reply, failing closed");
        }
        Decision::No
    }
}
