//! Routing resolution.

/// Map the combined priority to its routing destination.
///
/// Exact match on the already-lowercased label; anything unrecognized
/// (including "low") falls through to the archive destination without error.
pub fn routing_hint(priority: &str) -> &'static str {
    match priority {
        "blocked" => "Security Review / Intelligence Unit",
        "high" => "Teams + ITSM Ticket",
        "medium" => "Agent Queue",
        _ => "Auto-reply / Archive",
    }
}
