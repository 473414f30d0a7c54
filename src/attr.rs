//! Text attributes combined with the foreground color.

use bitflags::bitflags;

bitflags! {
    /// SGR attributes, declared in the order they are emitted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attributes: u8 {
        const BOLD = 1 << 0;
        const UNDERSCORE = 1 << 1;
        const BLINK = 1 << 2;
        const REVERSE = 1 << 3;
        const CONCEALED = 1 << 4;
    }
}

/// Attribute names with their SGR codes, in emission order.
pub const ATTRIBUTE_CODES: [(&str, Attributes, &str); 5] = [
    ("bold", Attributes::BOLD, "1"),
    ("underscore", Attributes::UNDERSCORE, "4"),
    ("blink", Attributes::BLINK, "5"),
    ("reverse", Attributes::REVERSE, "7"),
    ("concealed", Attributes::CONCEALED, "8"),
];

impl Attributes {
    /// Resolve a single attribute name (case-insensitive).
    pub fn from_attr_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        ATTRIBUTE_CODES
            .iter()
            .find(|(n, _, _)| *n == lowered)
            .map(|(_, flag, _)| *flag)
    }

    /// Semicolon-terminated code list placed before the foreground code, e.g. `1;4;`.
    pub fn sgr_prefix(self) -> String {
        ATTRIBUTE_CODES
            .iter()
            .filter(|(_, flag, _)| self.contains(*flag))
            .map(|(_, _, code)| format!("{code};"))
            .collect()
    }
}
