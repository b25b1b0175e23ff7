// crates/patchbot-daemon/src/token.rs
//
// Bot token lookup from the process environment.

/// Variables checked for the bot token, in priority order.
pub const TOKEN_VARS: [&str; 3] = ["TOKEN", "DISCORD_TOKEN", "BOT_TOKEN"];

/// Characters of a value shown in diagnostics.
const MASK_PREFIX: usize = 10;

/// First non-empty token among `TOKEN_VARS`.
pub fn find_token<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Describe the token-like variables that are set, without leaking them.
///
/// A variable qualifies when its name contains `TOKEN` or `DISCORD`. Each
/// entry is the name and at most the first 10 characters of the value, with
/// an ellipsis only when the value was cut.
pub fn describe_token_vars<I>(vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut found: Vec<String> = vars
        .into_iter()
        .filter(|(name, _)| {
            let upper = name.to_uppercase();
            upper.contains("TOKEN") || upper.contains("DISCORD")
        })
        .map(|(name, value)| {
            let prefix: String = value.chars().take(MASK_PREFIX).collect();
            let cut = if value.chars().count() > MASK_PREFIX { "..." } else { "" };
            format!("{}={}{}", name, prefix, cut)
        })
        .collect();
    found.sort();
    found
}
