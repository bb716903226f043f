//! Payload template rendering.
//!
//! The dispatch service ships executable script text to the web server: a
//! caller-supplied template with three substitution points, filled with the
//! routine source and the two request flags rendered as source-level boolean
//! literals. Rendering is a pure function; template storage stays in
//! configuration.

/// Substitution point for the routine's full source text.
pub const CODE_PLACEHOLDER: &str = "%clearer_code%";

/// Substitution point for the user-cache flag.
pub const USER_PLACEHOLDER: &str = "%user%";

/// Substitution point for the opcode-cache flag.
pub const OPCODE_PLACEHOLDER: &str = "%opcode%";

/// Render a flag as a source-level boolean literal.
pub fn bool_literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Render the payload script from `template`, embedding `clearer_code` and the
/// two request flags.
pub fn render(template: &str, clearer_code: &str, user: bool, opcode: bool) -> String {
    template
        .replace(CODE_PLACEHOLDER, clearer_code)
        .replace(USER_PLACEHOLDER, bool_literal(user))
        .replace(OPCODE_PLACEHOLDER, bool_literal(opcode))
}
