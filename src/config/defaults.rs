//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Sports Analytics Resources".into()
    }

    pub fn tagline() -> String {
        "Curated collection of sports analytics tools and resources".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data/resources.json".into()
    }

    pub fn output() -> PathBuf {
        "build".into()
    }

    pub fn assets() -> PathBuf {
        "static".into()
    }
}

// ============================================================================
// [navbar] Section Defaults
// ============================================================================

pub mod navbar {
    pub fn title() -> String {
        "Sports Analytics".into()
    }

    pub fn logo() -> Option<String> {
        None
    }

    pub fn logo_alt() -> String {
        "Sports Analytics Logo".into()
    }

    pub fn info_label() -> String {
        "What is this?".into()
    }
}

// ============================================================================
// [info] Section Defaults
// ============================================================================

pub mod info {
    pub fn title() -> String {
        "What is this?".into()
    }

    pub fn link() -> Option<String> {
        None
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        3000
    }
}
