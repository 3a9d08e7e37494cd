use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(LogId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceId {
    Auth,
    Gateway,
    Tax,
    Billing,
    Db,
}

impl ServiceId {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceId::Auth => "auth",
            ServiceId::Gateway => "gateway",
            ServiceId::Tax => "tax",
            ServiceId::Billing => "billing",
            ServiceId::Db => "db",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "auth" => Some(ServiceId::Auth),
            "gateway" => Some(ServiceId::Gateway),
            "tax" => Some(ServiceId::Tax),
            "billing" => Some(ServiceId::Billing),
            "db" => Some(ServiceId::Db),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque icon token; front-ends decide how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    ShieldCheck,
    Server,
    Calculator,
    CreditCard,
    Database,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Live,
    Error,
    Healing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: &'static str,
    pub icon: IconKey,
    pub status: ServiceStatus,
}

/// The demo fleet, in display order.
pub const FLEET: [Service; 5] = [
    Service {
        id: ServiceId::Auth,
        name: "Auth-Service",
        icon: IconKey::ShieldCheck,
        status: ServiceStatus::Live,
    },
    Service {
        id: ServiceId::Gateway,
        name: "Gateway-Proxy",
        icon: IconKey::Server,
        status: ServiceStatus::Live,
    },
    Service {
        id: ServiceId::Tax,
        name: "Tax-Calculator",
        icon: IconKey::Calculator,
        status: ServiceStatus::Live,
    },
    Service {
        id: ServiceId::Billing,
        name: "Billing-Worker",
        icon: IconKey::CreditCard,
        status: ServiceStatus::Live,
    },
    Service {
        id: ServiceId::Db,
        name: "DB-Node-01",
        icon: IconKey::Database,
        status: ServiceStatus::Live,
    },
];

/// The service every chaos run knocks over.
pub const CHAOS_TARGET: ServiceId = ServiceId::Tax;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    System,
    Agent,
    Success,
    Error,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::System => "system",
            LogKind::Agent => "agent",
            LogKind::Success => "success",
            LogKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalLog {
    pub id: LogId,
    pub kind: LogKind,
    pub message: String,
    /// Local wall-clock time at insertion, `HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    pub label: String,
    pub health: f64,
}
