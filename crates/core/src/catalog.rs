//! Static catalogs offered by the dashboard.
//!
//! These are read-only value tables. Nothing loads, mutates or persists them.

use serde::Serialize;

use crate::error::{ProgressError, Result};

/// Display identifier for a catalog entry.
///
/// Core code never interprets it; the presentation layer maps each variant
/// to whatever glyph it can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// Scales of justice
    Scale,
    /// Heart
    Heart,
    /// Dollar sign
    Dollar,
    /// Group of people
    Users,
    /// Text document
    FileText,
    /// Envelope
    Mail,
    /// Speech bubble
    MessageSquare,
    /// Shield
    Shield,
    /// Database cylinder
    Database,
}

/// An industry with its preconfigured use cases.
#[derive(Debug, Clone, Serialize)]
pub struct Industry {
    /// Catalog id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Display icon
    pub icon: Icon,
    /// Kinds of documents handled
    pub description: &'static str,
    /// Use cases offered for this industry
    pub use_cases: &'static [&'static str],
}

impl Industry {
    /// Whether `use_case` is offered for this industry.
    pub fn offers(&self, use_case: &str) -> bool {
        self.use_cases.iter().any(|u| *u == use_case)
    }
}

/// Model size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelTier {
    /// Small teams, basic analysis
    Lightweight,
    /// Default choice for most organizations
    Recommended,
    /// Large-scale deployments
    Enterprise,
}

/// A deployable model.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    /// Catalog id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Size tier
    pub tier: ModelTier,
    /// Monthly price in USD
    pub monthly_price: u32,
    /// Who the model suits
    pub description: &'static str,
    /// Parameter count, memory and throughput
    pub specs: &'static str,
    /// Whether the wizard highlights this model
    pub recommended: bool,
}

/// A hosting region.
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    /// Catalog id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Data center location
    pub location: &'static str,
    /// Typical round-trip latency
    pub latency: &'static str,
}

/// A compliance preset.
#[derive(Debug, Clone, Serialize)]
pub struct CompliancePreset {
    /// Catalog id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Controls the preset covers
    pub description: &'static str,
}

/// What a workflow template automates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowCategory {
    /// Document processing
    Document,
    /// Alerts and routing
    Notification,
    /// Scheduled reports
    Reporting,
    /// Third-party sync
    Integration,
}

/// Setup difficulty of a workflow template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Difficulty {
    /// A few clicks
    Easy,
    /// Some configuration
    Medium,
    /// External accounts and rules
    Advanced,
}

/// A prebuilt automation workflow.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowTemplate {
    /// Catalog id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// What the workflow does
    pub description: &'static str,
    /// Category
    pub category: WorkflowCategory,
    /// Display icon
    pub icon: Icon,
    /// Ordered steps the workflow runs
    pub steps: &'static [&'static str],
    /// Estimated setup time
    pub estimated_setup_time: &'static str,
    /// Setup difficulty
    pub difficulty: Difficulty,
    /// How many organizations use it, if known
    pub usage_count: Option<u32>,
}

/// Industries offered in the first wizard step.
pub static INDUSTRIES: &[Industry] = &[
    Industry {
        id: "legal",
        name: "Legal",
        icon: Icon::Scale,
        description: "Contracts, case files, briefs, legal research",
        use_cases: &[
            "Contract Analysis",
            "Legal Research",
            "Case Management",
            "Due Diligence",
            "Compliance Review",
        ],
    },
    Industry {
        id: "healthcare",
        name: "Healthcare",
        icon: Icon::Heart,
        description: "Patient records, research docs, clinical data",
        use_cases: &[
            "Medical Records Analysis",
            "Clinical Research",
            "Treatment Planning",
            "Drug Discovery",
            "Regulatory Documentation",
        ],
    },
    Industry {
        id: "finance",
        name: "Finance",
        icon: Icon::Dollar,
        description: "Reports, compliance docs, investment analysis",
        use_cases: &[
            "Financial Analysis",
            "Risk Assessment",
            "Compliance Monitoring",
            "Investment Research",
            "Audit Documentation",
        ],
    },
    Industry {
        id: "professional",
        name: "Professional Services",
        icon: Icon::Users,
        description: "Proposals, client docs, project management",
        use_cases: &[
            "Proposal Generation",
            "Client Communication",
            "Project Documentation",
            "Knowledge Management",
            "Business Intelligence",
        ],
    },
];

/// Models offered in the second wizard step.
pub static MODELS: &[Model] = &[
    Model {
        id: "llama-3-8b",
        name: "LLaMA 3 8B",
        tier: ModelTier::Lightweight,
        monthly_price: 300,
        description: "Perfect for basic document analysis and small teams",
        specs: "8 billion parameters, 4-16GB VRAM, up to 1M tokens/day",
        recommended: false,
    },
    Model {
        id: "llama-3-70b",
        name: "LLaMA 3 70B",
        tier: ModelTier::Recommended,
        monthly_price: 1200,
        description: "Ideal balance of performance and cost for most organizations",
        specs: "70 billion parameters, 40-80GB VRAM, up to 10M tokens/day",
        recommended: true,
    },
    Model {
        id: "llama-3-405b",
        name: "LLaMA 3 405B",
        tier: ModelTier::Enterprise,
        monthly_price: 3000,
        description: "Maximum performance for large-scale enterprise deployments",
        specs: "405 billion parameters, 200GB+ VRAM, up to 100M tokens/day",
        recommended: false,
    },
];

/// Regions offered in the infrastructure step.
pub static REGIONS: &[Region] = &[
    Region {
        id: "us-east",
        name: "US-East",
        location: "Virginia",
        latency: "~20ms",
    },
    Region {
        id: "us-west",
        name: "US-West",
        location: "California",
        latency: "~15ms",
    },
    Region {
        id: "eu-central",
        name: "EU-Central",
        location: "Frankfurt",
        latency: "~25ms",
    },
];

/// Compliance presets offered in the infrastructure step.
pub static COMPLIANCE_PRESETS: &[CompliancePreset] = &[
    CompliancePreset {
        id: "soc2",
        name: "SOC 2",
        description: "Security and availability controls",
    },
    CompliancePreset {
        id: "hipaa",
        name: "HIPAA",
        description: "Healthcare data protection",
    },
    CompliancePreset {
        id: "legal",
        name: "Legal Industry",
        description: "Attorney-client privilege protection",
    },
    CompliancePreset {
        id: "gdpr",
        name: "GDPR",
        description: "EU data protection regulations",
    },
];

/// Workflow templates offered on the automation page.
pub static WORKFLOW_TEMPLATES: &[WorkflowTemplate] = &[
    WorkflowTemplate {
        id: "auto-process",
        name: "Auto-Process New Documents",
        description: "Automatically extract text, embed, summarize, and notify team when new documents are uploaded",
        category: WorkflowCategory::Document,
        icon: Icon::FileText,
        steps: &[
            "Monitor Google Drive for new files",
            "Extract text and metadata",
            "Generate embeddings in ChromaDB",
            "Create AI summary",
            "Send notification to team",
        ],
        estimated_setup_time: "5 minutes",
        difficulty: Difficulty::Easy,
        usage_count: Some(234),
    },
    WorkflowTemplate {
        id: "daily-digest",
        name: "Daily Digest Generation",
        description: "Generate and email a daily summary of document updates and key insights",
        category: WorkflowCategory::Reporting,
        icon: Icon::Mail,
        steps: &[
            "Scheduled trigger daily at 9 AM",
            "Query document updates from last 24h",
            "Generate summary with AI",
            "Format email template",
            "Send to stakeholders list",
        ],
        estimated_setup_time: "10 minutes",
        difficulty: Difficulty::Medium,
        usage_count: Some(156),
    },
    WorkflowTemplate {
        id: "question-routing",
        name: "Intelligent Question Routing",
        description: "Analyze incoming questions and route to appropriate team members based on content",
        category: WorkflowCategory::Notification,
        icon: Icon::MessageSquare,
        steps: &[
            "Receive form submission",
            "Analyze question with AI",
            "Determine appropriate department",
            "Route to team member",
            "Send confirmation to requester",
        ],
        estimated_setup_time: "15 minutes",
        difficulty: Difficulty::Advanced,
        usage_count: Some(89),
    },
    WorkflowTemplate {
        id: "compliance-monitor",
        name: "Compliance Monitoring",
        description: "Scan documents for sensitive content and flag potential compliance issues",
        category: WorkflowCategory::Document,
        icon: Icon::Shield,
        steps: &[
            "Monitor document uploads",
            "Scan for sensitive data patterns",
            "Check against compliance rules",
            "Flag issues and create alerts",
            "Notify compliance officer",
        ],
        estimated_setup_time: "20 minutes",
        difficulty: Difficulty::Advanced,
        usage_count: Some(67),
    },
    WorkflowTemplate {
        id: "crm-sync",
        name: "CRM Integration Sync",
        description: "Sync document insights and client communications with Salesforce or HubSpot",
        category: WorkflowCategory::Integration,
        icon: Icon::Database,
        steps: &[
            "Detect client-related documents",
            "Extract key information",
            "Match with CRM contacts",
            "Update CRM records",
            "Log activity timeline",
        ],
        estimated_setup_time: "25 minutes",
        difficulty: Difficulty::Advanced,
        usage_count: Some(45),
    },
    WorkflowTemplate {
        id: "meeting-summary",
        name: "Meeting Notes Processor",
        description: "Process meeting recordings/notes and distribute action items to participants",
        category: WorkflowCategory::Notification,
        icon: Icon::Users,
        steps: &[
            "Upload meeting recording/notes",
            "Transcribe and analyze content",
            "Extract action items and decisions",
            "Create calendar events",
            "Send summaries to participants",
        ],
        estimated_setup_time: "12 minutes",
        difficulty: Difficulty::Medium,
        usage_count: Some(178),
    },
];

/// Look up an industry by id.
pub fn find_industry(id: &str) -> Result<&'static Industry> {
    INDUSTRIES
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| unknown("industry", id))
}

/// Look up a model by id.
pub fn find_model(id: &str) -> Result<&'static Model> {
    MODELS
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| unknown("model", id))
}

/// Look up a region by id.
pub fn find_region(id: &str) -> Result<&'static Region> {
    REGIONS
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| unknown("region", id))
}

/// Look up a compliance preset by id.
pub fn find_compliance(id: &str) -> Result<&'static CompliancePreset> {
    COMPLIANCE_PRESETS
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| unknown("compliance preset", id))
}

/// Look up a workflow template by id.
pub fn find_workflow_template(id: &str) -> Result<&'static WorkflowTemplate> {
    WORKFLOW_TEMPLATES
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| unknown("workflow template", id))
}

fn unknown(kind: &'static str, id: &str) -> ProgressError {
    ProgressError::UnknownCatalogEntry {
        kind,
        id: id.to_string(),
    }
}
