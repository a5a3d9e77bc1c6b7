//! Player feedback produced by round events
//!
//! The round never shows anything itself; it hands these to the platform layer.

use serde::{Deserialize, Serialize};

/// Toast styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

impl ToastVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastVariant::Default => "default",
            ToastVariant::Destructive => "destructive",
        }
    }
}

/// Transient on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Vibration cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Haptic {
    Success,
    Error,
}

impl Haptic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Haptic::Success => "success",
            Haptic::Error => "error",
        }
    }

    /// Vibration pattern in milliseconds (on, off, on, ...)
    pub fn pattern_ms(&self) -> &'static [u32] {
        match self {
            Haptic::Success => &[40],
            Haptic::Error => &[60, 40, 60],
        }
    }
}

/// Everything the platform should do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub toast: Toast,
    pub haptic: Option<Haptic>,
}
