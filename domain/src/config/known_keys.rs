//! Known greeter keys with their defaults.
//!
//! Used to fill in the `default` of an edit when the caller does not pass one,
//! to drop default-valued entries on write, and to describe keys in the CLI.

/// Group holding the greeter's own options
pub const GREETER_GROUP: &str = "greeter";

/// Kind of value a key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Freeform text
    Text,
    /// `true` or `false`
    Boolean,
    /// Non-negative integer
    Integer,
    /// File path, or `#name` for a themed icon / `#rrggbb` for a color
    Image,
    /// One of [`ConfigKeyInfo::valid_values`]
    Choice,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Image => "image",
            ValueKind::Choice => "choice",
        }
    }
}

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    pub group: &'static str,
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    pub kind: ValueKind,
    /// Value the greeter uses when no layer defines the key.
    pub default: Option<&'static str>,
    /// Valid string values (empty if freeform).
    pub valid_values: &'static [&'static str],
}

impl ConfigKeyInfo {
    /// Whether `value` is acceptable for this key.
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            ValueKind::Text | ValueKind::Image => true,
            ValueKind::Boolean => matches!(value, "true" | "false"),
            ValueKind::Integer => value.parse::<u64>().is_ok(),
            ValueKind::Choice => self.valid_values.contains(&value),
        }
    }
}

/// All known config keys with their metadata.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a config key.
pub fn lookup_key(group: &str, key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.group == group && k.key == key)
}

/// Registered default of a key, if any.
pub fn default_for(group: &str, key: &str) -> Option<&'static str> {
    lookup_key(group, key).and_then(|info| info.default)
}

/// Whether `value` is the registered default of the key
pub fn is_default(group: &str, key: &str, value: &str) -> bool {
    default_for(group, key) == Some(value)
}

/// Key replaced by `indicators`; still honoured on read.
pub const LEGACY_INDICATORS_KEY: &str = "show-indicators";
pub const INDICATORS_KEY: &str = "indicators";

static KNOWN_KEYS: [ConfigKeyInfo; 16] = [
    // ==================== Theme ====================
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "theme-name",
        description: "GTK theme",
        kind: ValueKind::Text,
        default: None,
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "icon-theme-name",
        description: "Icon theme",
        kind: ValueKind::Text,
        default: None,
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "font-name",
        description: "Font",
        kind: ValueKind::Text,
        default: Some("Sans 10"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "xft-antialias",
        description: "Whether to antialias Xft fonts",
        kind: ValueKind::Boolean,
        default: Some("false"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "xft-dpi",
        description: "Resolution for Xft in dots per inch",
        kind: ValueKind::Integer,
        default: None,
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "xft-rgba",
        description: "Type of subpixel antialiasing",
        kind: ValueKind::Choice,
        default: None,
        valid_values: &["none", "rgb", "bgr", "vrgb", "vbgr"],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "xft-hintstyle",
        description: "What degree of hinting to use",
        kind: ValueKind::Choice,
        default: None,
        valid_values: &["hintnone", "hintslight", "hintmedium", "hintfull"],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "background",
        description: "Background image file or color",
        kind: ValueKind::Image,
        default: Some("#000000"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "user-background",
        description: "Use the user's own background when available",
        kind: ValueKind::Boolean,
        default: Some("true"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "default-user-image",
        description: "Image used when the user has no avatar",
        kind: ValueKind::Image,
        default: Some("#avatar-default"),
        valid_values: &[],
    },
    // ==================== Panel ====================
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "show-clock",
        description: "Show the clock in the panel",
        kind: ValueKind::Boolean,
        default: Some("false"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "clock-format",
        description: "strftime format of the clock",
        kind: ValueKind::Text,
        default: Some("%a, %H:%M"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: INDICATORS_KEY,
        description: "Semicolon-separated list of panel indicators",
        kind: ValueKind::Text,
        default: None,
        valid_values: &[],
    },
    // ==================== Position ====================
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "position",
        description: "Login window position as 'x[,y]'",
        kind: ValueKind::Text,
        default: Some("50%,center"),
        valid_values: &[],
    },
    // ==================== Misc ====================
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "screensaver-timeout",
        description: "Seconds of inactivity before blanking the screen",
        kind: ValueKind::Integer,
        default: Some("60"),
        valid_values: &[],
    },
    ConfigKeyInfo {
        group: GREETER_GROUP,
        key: "keyboard",
        description: "On-screen keyboard command",
        kind: ValueKind::Text,
        default: None,
        valid_values: &[],
    },
];
