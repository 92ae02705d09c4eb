//! Hand-built records for unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::state::data::{
    AccessLevel, Author, Momentum, Quadrant, Ring, Study, StudyCategory, StudyStatus, TrendItem,
};

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A study with only the fields the engines care about filled in
pub fn study(id: &str, title: &str, category: StudyCategory, year: i32) -> Study {
    Study {
        id: id.to_string(),
        title: title.to_string(),
        category,
        subcategory: None,
        year,
        quarter: None,
        status: StudyStatus::Completed,
        description: format!("{title} description"),
        summary: None,
        methodology: None,
        sample_size: None,
        regions: Vec::new(),
        tags: Vec::new(),
        authors: Vec::new(),
        date_created: day(year, 1, 1),
        date_modified: day(year, 6, 1),
        documents: Vec::new(),
        findings: Vec::new(),
        metrics: Vec::new(),
        related_studies: Vec::new(),
        is_featured: false,
        access_level: AccessLevel::Internal,
    }
}

pub fn author(id: &str, name: &str) -> Author {
    Author {
        id: id.to_string(),
        name: name.to_string(),
        department: "Research".to_string(),
        email: None,
    }
}

pub fn nev_study() -> Study {
    let mut study = study("study-a", "NEV Study", StudyCategory::MarketTrends, 2023);
    study.tags = vec!["EV".to_string()];
    study
}

pub fn gen_z_study() -> Study {
    let mut study = study("study-b", "Gen Z Lifestyle", StudyCategory::ConsumerInsights, 2022);
    study.tags = vec!["youth".to_string()];
    study
}

pub fn trend(id: &str, ring: Ring, quadrant: Quadrant) -> TrendItem {
    TrendItem {
        id: id.to_string(),
        name: format!("Trend {id}"),
        category: "Test".to_string(),
        ring,
        quadrant,
        description: String::new(),
        insight: String::new(),
        sources: Vec::new(),
        studies: Vec::new(),
        momentum: Momentum::Stable,
        data_points: Vec::new(),
    }
}

/// One trend item in every ring/quadrant cell
pub fn trend_grid() -> Vec<TrendItem> {
    Ring::ALL
        .iter()
        .flat_map(|&ring| {
            Quadrant::ALL.iter().map(move |&quadrant| {
                trend(&format!("{ring:?}-{quadrant:?}").to_lowercase(), ring, quadrant)
            })
        })
        .collect()
}
