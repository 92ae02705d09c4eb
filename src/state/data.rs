//! Shared data structures for the application state
//!
//! These structs represent the catalog records that flow from the
//! embedded feed through the engines into the views. Field names follow
//! the camelCase keys of the feed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of research categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyCategory {
    ConsumerInsights,
    ProductResearch,
    MarketTrends,
    DigitalExperience,
    BrandStrategy,
    CustomerJourney,
    Technology,
    Sustainability,
    CompetitorAnalysis,
}

impl StudyCategory {
    pub const ALL: [StudyCategory; 9] = [
        StudyCategory::ConsumerInsights,
        StudyCategory::ProductResearch,
        StudyCategory::MarketTrends,
        StudyCategory::DigitalExperience,
        StudyCategory::BrandStrategy,
        StudyCategory::CustomerJourney,
        StudyCategory::Technology,
        StudyCategory::Sustainability,
        StudyCategory::CompetitorAnalysis,
    ];

    /// Human readable label (e.g., "Market Trends")
    pub fn label(self) -> &'static str {
        match self {
            StudyCategory::ConsumerInsights => "Consumer Insights",
            StudyCategory::ProductResearch => "Product Research",
            StudyCategory::MarketTrends => "Market Trends",
            StudyCategory::DigitalExperience => "Digital Experience",
            StudyCategory::BrandStrategy => "Brand Strategy",
            StudyCategory::CustomerJourney => "Customer Journey",
            StudyCategory::Technology => "Technology",
            StudyCategory::Sustainability => "Sustainability",
            StudyCategory::CompetitorAnalysis => "Competitor Analysis",
        }
    }
}

impl fmt::Display for StudyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a study
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl StudyStatus {
    pub const ALL: [StudyStatus; 4] = [
        StudyStatus::Completed,
        StudyStatus::InProgress,
        StudyStatus::Draft,
        StudyStatus::Archived,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StudyStatus::Draft => "Draft",
            StudyStatus::InProgress => "In Progress",
            StudyStatus::Completed => "Completed",
            StudyStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Internal,
    Restricted,
    Confidential,
}

/// An author, embedded by value in each study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Pptx,
    Xlsx,
    Docx,
    Video,
    Image,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Pdf => "PDF",
            DocumentType::Pptx => "PowerPoint",
            DocumentType::Xlsx => "Spreadsheet",
            DocumentType::Docx => "Word",
            DocumentType::Video => "Video",
            DocumentType::Image => "Image",
        }
    }
}

/// A file attached to exactly one study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    /// Size in bytes
    pub size: u64,
    pub date_uploaded: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

/// Metric values are either numeric or pre-formatted text (e.g., "4.2/5")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            MetricValue::Number(n) => write!(f, "{n:.1}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<MetricTrend>,
    /// Percent change against the previous period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// A single research catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    /// Unique across the catalog
    pub id: String,
    pub title: String,
    pub category: StudyCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub year: i32,
    /// e.g., "Q3"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
    pub status: StudyStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,
    #[serde(default, rename = "region")]
    pub regions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub date_created: DateTime<Utc>,
    /// Never earlier than `date_created`
    pub date_modified: DateTime<Utc>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub related_studies: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub access_level: AccessLevel,
}

impl Study {
    /// The first finding is presented as the key finding
    pub fn key_finding(&self) -> Option<&Finding> {
        self.findings.first()
    }
}

/// Maturity axis of the trend radar, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Adopt,
    Trial,
    Assess,
    Hold,
}

impl Ring {
    pub const ALL: [Ring; 4] = [Ring::Adopt, Ring::Trial, Ring::Assess, Ring::Hold];

    pub fn label(self) -> &'static str {
        match self {
            Ring::Adopt => "ADOPT",
            Ring::Trial => "TRIAL",
            Ring::Assess => "ASSESS",
            Ring::Hold => "HOLD",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Ring::Adopt => "Technologies with strong market fit that should be adopted now",
            Ring::Trial => "Technologies worth exploring in controlled pilots",
            Ring::Assess => "Technologies to watch and evaluate for future potential",
            Ring::Hold => "Technologies to avoid or phase out for various reasons",
        }
    }
}

/// Thematic axis of the trend radar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    ConsumerBehavior,
    Technology,
    MarketDynamics,
    ExperienceDesign,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ConsumerBehavior,
        Quadrant::Technology,
        Quadrant::MarketDynamics,
        Quadrant::ExperienceDesign,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::ConsumerBehavior => "Consumer Behavior",
            Quadrant::Technology => "Technology",
            Quadrant::MarketDynamics => "Market Dynamics",
            Quadrant::ExperienceDesign => "Experience Design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Rising,
    Stable,
    Declining,
}

impl Momentum {
    pub fn symbol(self) -> &'static str {
        match self {
            Momentum::Rising => "▲",
            Momentum::Stable => "–",
            Momentum::Declining => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
}

/// A trend radar entry. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub ring: Ring,
    pub quadrant: Quadrant,
    pub description: String,
    pub insight: String,
    #[serde(default)]
    pub sources: Vec<String>,
    /// Ids of studies backing this trend
    #[serde(default)]
    pub studies: Vec<String>,
    pub momentum: Momentum,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}
