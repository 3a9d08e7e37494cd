//! Static copy shown around the simulation: header, patch card, integrations.

pub const PRODUCT_NAME: &str = "AEGIS";
pub const PRODUCT_TAGLINE: &str = "Self-Healing Infrastructure Swarm";
pub const REGION: &str = "us-east-1";
pub const HEADER_STATUS: &str = "All Systems Operational";

pub const INSTALL_COMMAND: &str = "pip install aegis-monitor && aegis init --key=AG_77X";
pub const PULL_REQUEST_URL: &str = "https://github.com/aegis/tax-calculator/pull/1847";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchContent {
    pub file_label: &'static str,
    pub hunk_header: &'static str,
    pub removed_line: &'static str,
    pub added_line: &'static str,
    pub comment: &'static str,
    pub pr_number: &'static str,
    pub pr_title: &'static str,
    pub approved_label: &'static str,
    pub pr_link_label: &'static str,
    pub badges: [StatusBadge; 3],
}

pub const PATCH: PatchContent = PatchContent {
    file_label: "tax_engine.py — Line 42",
    hunk_header: "@@ -40,7 +40,7 @@ def calculate_tax(total, count):",
    removed_line: "result = total / count",
    added_line: "result = total / count if count > 0 else 0",
    comment: "# Added guard clause for zero-value input protection",
    pr_number: "PR #1847",
    pr_title: "Fix: Add zero-division guard",
    approved_label: "Auto-Approved",
    pr_link_label: "github.com/aegis/tax-calculator/pull/1847",
    badges: [
        StatusBadge {
            label: "CI/CD",
            status: "passed",
        },
        StatusBadge {
            label: "Tests",
            status: "14/14",
        },
        StatusBadge {
            label: "Coverage",
            status: "94%",
        },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationItem {
    pub name: &'static str,
    pub logo: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationBody {
    Providers(&'static [IntegrationItem]),
    Command(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub body: IntegrationBody,
}

pub const INTEGRATIONS: [IntegrationCard; 3] = [
    IntegrationCard {
        id: "infra",
        title: "Infrastructure",
        description: "Connect your cloud provider",
        body: IntegrationBody::Providers(&[
            IntegrationItem {
                name: "AWS",
                logo: "🔶",
            },
            IntegrationItem {
                name: "GCP",
                logo: "🔵",
            },
            IntegrationItem {
                name: "Azure",
                logo: "🔷",
            },
        ]),
    },
    IntegrationCard {
        id: "code",
        title: "Code Access",
        description: "Link your repositories",
        body: IntegrationBody::Providers(&[
            IntegrationItem {
                name: "GitHub",
                logo: "⚫",
            },
            IntegrationItem {
                name: "GitLab",
                logo: "🟠",
            },
            IntegrationItem {
                name: "Bitbucket",
                logo: "🔵",
            },
        ]),
    },
    IntegrationCard {
        id: "agent",
        title: "Watchdog Agent",
        description: "Install the monitoring agent",
        body: IntegrationBody::Command(INSTALL_COMMAND),
    },
];
