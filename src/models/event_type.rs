use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Kind of attendance event produced by a recognized face.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CheckIn,
    CheckOut,
}

impl EventType {
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "check_in" | "checkin" | "check-in" | "in" => Some(Self::CheckIn),
            "check_out" | "checkout" | "check-out" | "out" => Some(Self::CheckOut),
            _ => None,
        }
    }

    /// Same as [`et_from_str`](Self::et_from_str) but fails with `InvalidEventType`.
    pub fn parse(s: &str) -> AppResult<Self> {
        Self::et_from_str(s).ok_or_else(|| AppError::InvalidEventType(s.to_string()))
    }

    pub fn et_as_str(&self) -> &'static str {
        match self {
            EventType::CheckIn => "check_in",
            EventType::CheckOut => "check_out",
        }
    }

    /// Human label used in CLI messages.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::CheckIn => "Check-in",
            EventType::CheckOut => "Check-out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, EventType::CheckIn)
    }
}
