use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::NavItem;
use crate::core::{SectionId, decimal_to_f64};
use crate::error::{DeckError, DeckResult};

/// One content section of the page, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: SectionId,
    pub title: String,
    /// Label in the navigation bar; sections without one are not linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_label: Option<String>,
}

/// Headline number revealed by a counter in the hero section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroCounter {
    pub widget: String,
    pub caption: String,
    pub target: u64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub title: String,
    pub points: Vec<String>,
}

/// Market sizing in USD billions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSize {
    pub total_usd_bn: Decimal,
    pub online_usd_bn: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Percent of artisans listing a first product within seven days.
    pub activation_percent: u32,
    pub avg_listings: u32,
    /// Average monthly GMV per artisan in rupees.
    pub avg_monthly_gmv_inr: Decimal,
    pub catalog_increase_percent: u32,
    /// Cost per acquisition in rupees.
    pub cpa_inr: Decimal,
}

/// Two-year projection; every series is in ₹ Crore and aligned with `years`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    pub years: Vec<String>,
    pub investment_crore: Vec<Decimal>,
    pub revenue_crore: Vec<Decimal>,
    pub net_profit_crore: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutPhase {
    pub title: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub risk: String,
    pub mitigation: String,
}

/// Read-only content model of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub sections: Vec<SectionSpec>,
    pub hero_counters: Vec<HeroCounter>,
    pub solutions: IndexMap<String, Solution>,
    pub market: MarketSize,
    pub kpis: Kpis,
    pub financials: Financials,
    pub rollout: Vec<RolloutPhase>,
    pub risks: Vec<Risk>,
}

impl ReportData {
    pub fn from_json_str(input: &str) -> DeckResult<Self> {
        let report: Self = serde_json::from_str(input)
            .map_err(|e| DeckError::InvalidData(format!("failed to parse report json: {e}")))?;
        report.validate()?;
        Ok(report)
    }

    pub fn to_json_pretty(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DeckError::InvalidData(format!("failed to serialize report json: {e}")))
    }

    /// Checks shape only: ids unique, series aligned, numbers representable.
    pub fn validate(&self) -> DeckResult<()> {
        if self.sections.is_empty() {
            return Err(DeckError::InvalidData(
                "report needs at least one section".to_owned(),
            ));
        }
        for (index, section) in self.sections.iter().enumerate() {
            if section.id.as_str().is_empty() {
                return Err(DeckError::InvalidData(format!(
                    "section {index} has an empty id"
                )));
            }
            if self.sections[..index].iter().any(|other| other.id == section.id) {
                return Err(DeckError::InvalidData(format!(
                    "duplicate section id `{}`",
                    section.id
                )));
            }
        }
        if self.kpis.activation_percent > 100 {
            return Err(DeckError::InvalidData(
                "activation percent must be <= 100".to_owned(),
            ));
        }

        let years = self.financials.years.len();
        for (name, series) in [
            ("investment", &self.financials.investment_crore),
            ("revenue", &self.financials.revenue_crore),
            ("net profit", &self.financials.net_profit_crore),
        ] {
            if series.len() != years {
                return Err(DeckError::InvalidData(format!(
                    "{name} series has {} values for {years} years",
                    series.len()
                )));
            }
            for value in series {
                decimal_to_f64(*value, name)?;
            }
        }
        for (name, value) in [
            ("market total", self.market.total_usd_bn),
            ("market online", self.market.online_usd_bn),
            ("monthly gmv", self.kpis.avg_monthly_gmv_inr),
            ("cpa", self.kpis.cpa_inr),
        ] {
            decimal_to_f64(value, name)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|section| section.id.clone()).collect()
    }

    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.sections
            .iter()
            .filter_map(|section| {
                section
                    .nav_label
                    .as_ref()
                    .map(|label| NavItem::new(label.clone(), section.id.clone()))
            })
            .collect()
    }

    /// One summary line per projected year, amounts to one decimal place.
    #[must_use]
    pub fn financial_summary(&self) -> Vec<String> {
        let financials = &self.financials;
        financials
            .years
            .iter()
            .zip(&financials.investment_crore)
            .zip(&financials.revenue_crore)
            .zip(&financials.net_profit_crore)
            .map(|(((year, investment), revenue), profit)| {
                format!(
                    "{year}: Total Investment: ₹{:.1} Cr, Net Revenue: ₹{:.1} Cr, Net Profit/Loss: ₹{:.1} Cr",
                    investment.round_dp(1),
                    revenue.round_dp(1),
                    profit.round_dp(1)
                )
            })
            .collect()
    }

    /// The Project Vistaar deck.
    #[must_use]
    pub fn vistaar() -> Self {
        Self {
            sections: vec![
                section("hero", "Onboarding India's Next Wave of Entrepreneurs", None),
                section(
                    "the-opportunity",
                    "The Opportunity & The Challenge",
                    Some("The Opportunity"),
                ),
                section(
                    "the-solution",
                    "The Solution: Project Vistaar's 3-Pronged Approach",
                    Some("The Solution"),
                ),
                section(
                    "the-impact",
                    "The Impact: Measuring Success with KPIs",
                    Some("The Impact"),
                ),
                section(
                    "blueprint",
                    "Project Vistaar: Go-to-Market Blueprint",
                    Some("Blueprint"),
                ),
                section("risks", "Potential Risks & Mitigation Strategies", Some("Risks")),
                section("financials", "Financial Projections", None),
            ],
            hero_counters: vec![
                hero("artisans", "New Artisans Onboarded", 1_000_000, ""),
                hero("listings", "Unique Product Listings", 5_000_000, ""),
                hero("gmv", "Crore Incremental GMV (24 Mo.)", 500, " Cr"),
            ],
            solutions: IndexMap::from([
                (
                    "saathi".to_owned(),
                    solution(
                        "The 'Meesho Saathi' Onboarding Program",
                        &[
                            "Partner with established local Self-Help Groups (SHGs) and NGOs.",
                            "Train a digitally savvy local youth ('Saathi') as a Meesho ambassador.",
                            "Conduct in-person workshops in local dialects covering account setup, app usage, and quality control.",
                            "The Saathi provides ongoing, trusted local support for a cluster of artisans.",
                        ],
                    ),
                ),
                (
                    "tools".to_owned(),
                    solution(
                        "Simplified Seller Tools",
                        &[
                            "Voice-First Cataloging: artisans list products by recording a voice note.",
                            "AI-Powered Pricing: suggests a fair, competitive price range from the product image and description.",
                            "Icon-Based Dashboard: replaces complex text menus with simple icons for key actions.",
                            "Vernacular Video Guides: short tutorials explaining every feature in local languages.",
                        ],
                    ),
                ),
                (
                    "partnerships".to_owned(),
                    solution(
                        "Ecosystem Partnerships",
                        &[
                            "Logistics: a national partnership with India Post for doorstep pickup from any village.",
                            "Finance: collaborate with a Micro-Finance Institution to offer quick loans.",
                            "Capital Access: pre-approved small working capital loans based on sales history.",
                            "Ecosystem Approach: removes the logistics and finance barriers so artisans can focus on their craft.",
                        ],
                    ),
                ),
            ]),
            market: MarketSize {
                total_usd_bn: Decimal::new(100, 0),
                online_usd_bn: Decimal::new(2, 0),
            },
            kpis: Kpis {
                activation_percent: 80,
                avg_listings: 5,
                avg_monthly_gmv_inr: Decimal::new(2_500, 0),
                catalog_increase_percent: 10,
                cpa_inr: Decimal::new(300, 0),
            },
            financials: Financials {
                years: vec!["Year 1".to_owned(), "Year 2".to_owned()],
                investment_crore: vec![Decimal::new(120, 1), Decimal::new(150, 1)],
                revenue_crore: vec![Decimal::new(48, 1), Decimal::new(152, 1)],
                net_profit_crore: vec![Decimal::new(-72, 1), Decimal::new(2, 1)],
            },
            rollout: vec![
                phase(
                    "Phase 1: Pilot",
                    "Months 1-3",
                    "Validate the model in two craft-rich districts, Jaipur and Bishnupur. Target: onboard 5,000 artisans.",
                ),
                phase(
                    "Phase 2: Scale",
                    "Months 4-12",
                    "Expand the pilot playbook to the top 20 craft clusters. Target: onboard an additional 400,000 artisans.",
                ),
                phase(
                    "Phase 3: Nationwide Rollout",
                    "Months 13-18",
                    "Expand to all remaining states and territories. Target: onboard the remaining 600,000 artisans to reach 1 million.",
                ),
            ],
            risks: vec![
                risk(
                    "Low Digital Literacy / Adoption",
                    "Intensive Saathi-led training; Simplified Voice-First Tools.",
                ),
                risk(
                    "Logistical Challenges in Remote Areas",
                    "Strategic India Post partnership for doorstep pickup.",
                ),
                risk(
                    "Working Capital Access for Artisans",
                    "MFI partnership for quick loans based on sales history.",
                ),
                risk(
                    "Quality Control / Standardization",
                    "Saathi training on product descriptions & photos; Feedback loops.",
                ),
                risk(
                    "Cultural & Linguistic Barriers",
                    "Local dialect support via Saathis & Vernacular Video Guides.",
                ),
                risk(
                    "Competition from Existing Supply Chains",
                    "Unique inventory; Fair pricing; Direct artisan relationships.",
                ),
            ],
        }
    }
}

impl Default for ReportData {
    fn default() -> Self {
        Self::vistaar()
    }
}

fn section(id: &str, title: &str, nav_label: Option<&str>) -> SectionSpec {
    SectionSpec {
        id: SectionId::new(id),
        title: title.to_owned(),
        nav_label: nav_label.map(str::to_owned),
    }
}

fn hero(widget: &str, caption: &str, target: u64, suffix: &str) -> HeroCounter {
    HeroCounter {
        widget: widget.to_owned(),
        caption: caption.to_owned(),
        target,
        prefix: String::new(),
        suffix: suffix.to_owned(),
    }
}

fn solution(title: &str, points: &[&str]) -> Solution {
    Solution {
        title: title.to_owned(),
        points: points.iter().map(|point| (*point).to_owned()).collect(),
    }
}

fn phase(title: &str, duration: &str, description: &str) -> RolloutPhase {
    RolloutPhase {
        title: title.to_owned(),
        duration: duration.to_owned(),
        description: description.to_owned(),
    }
}

fn risk(risk: &str, mitigation: &str) -> Risk {
    Risk {
        risk: risk.to_owned(),
        mitigation: mitigation.to_owned(),
    }
}
