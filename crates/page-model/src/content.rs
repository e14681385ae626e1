//! Page content: copy, chart data, and section structure.
//!
//! [`PageContent::pizzafun`] is the shipped page. Content can also be
//! loaded from JSON so copy changes never touch the animation code.

use serde::{Deserialize, Serialize};

use pizzafun_common::error::{PizzafunError, PizzafunResult};

/// Everything the presentation tree renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub metadata: Metadata,
    pub header: HeaderContent,
    pub hero: HeroContent,
    pub features: FeatureSection,
    pub performance: PerformanceSection,
    pub tokenomics: TokenomicsSection,
    pub roadmap: RoadmapSection,
    pub cta: CallToAction,
    pub footer: FooterContent,
}

/// Document metadata for `<head>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub favicon: String,
    pub lang: String,
}

/// Fixed header with logo, navigation, and two buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderContent {
    pub brand: String,
    pub logo: String,
    pub version_tag: String,
    pub nav: Vec<String>,
    pub secondary_button: String,
    pub primary_button: String,
}

/// Hero section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Small label typed out above the headline.
    pub kicker: String,
    /// Headline lines revealed character by character.
    pub headline: Vec<HeadlineLine>,
    /// Lead paragraph split into plain and highlighted runs.
    pub lead: Vec<TextRun>,
    pub stats: Vec<HeroStat>,
    pub primary_cta: String,
    pub secondary_cta: String,
}

/// One staggered headline line and when it starts revealing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineLine {
    pub text: String,
    pub delay_secs: f64,
}

/// A run of text, optionally emphasized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub highlight: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
        }
    }

    pub fn highlight(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: true,
        }
    }
}

/// A hero statistic animated by a glitch counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroStat {
    /// Counter target as written in the copy (parsed as an integer).
    pub value: String,
    pub suffix: String,
    pub label: String,
    pub icon: String,
}

impl HeroStat {
    /// The integer the counter animates towards.
    ///
    /// Leading digits are parsed the way `parseInt` would, so "35000"
    /// and "35000+" both yield 35000.
    pub fn target(&self) -> PizzafunResult<u64> {
        let digits: String = self
            .value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u64>().map_err(|_| {
            PizzafunError::content(format!(
                "hero stat '{}' has a non-numeric value '{}'",
                self.label, self.value
            ))
        })
    }
}

/// Feature grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSection {
    pub kicker: String,
    pub heading: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub badges: Vec<String>,
    pub icon: String,
}

/// Performance chart plus system metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSection {
    pub heading: String,
    pub chart_title: String,
    pub baseline_label: String,
    pub product_label: String,
    pub points: Vec<PerformancePoint>,
    pub metrics_title: String,
    pub metrics: Vec<SystemMetric>,
}

/// Confirmation progress (percent) at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub label: String,
    pub baseline: f64,
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetric {
    pub metric: String,
    pub value: String,
    pub description: String,
}

/// Token distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenomicsSection {
    pub kicker: String,
    pub heading: String,
    pub allocations: Vec<Allocation>,
    pub total_supply: u64,
    pub supply_label: String,
    pub supply_note: String,
    /// How many allocations the legend lists next to the chart.
    pub legend_size: usize,
    pub utilities_title: String,
    pub utilities: Vec<String>,
}

/// One pie slice, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    pub value: u32,
    pub color: String,
}

impl TokenomicsSection {
    /// Sum of all allocation percentages, widened so no input can overflow it.
    pub fn total_percent(&self) -> u64 {
        self.allocations.iter().map(|a| u64::from(a.value)).sum()
    }
}

/// Roadmap timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapSection {
    pub kicker: String,
    pub heading: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub period: String,
    pub title: String,
    pub items: Vec<String>,
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    Active,
    Next,
    Planned,
    Future,
}

impl MilestoneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MilestoneStatus::Active => "ACTIVE",
            MilestoneStatus::Next => "NEXT",
            MilestoneStatus::Planned => "PLANNED",
            MilestoneStatus::Future => "FUTURE",
        }
    }
}

/// Closing call to action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub kicker: String,
    pub heading: String,
    pub body: String,
    pub emphasis: String,
    pub primary_button: String,
    pub secondary_button: String,
}

/// Footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
    pub tagline: Vec<String>,
    pub socials: Vec<SocialLink>,
    pub sections: Vec<FooterSection>,
    pub copyright: String,
    pub legal: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterSection {
    pub title: String,
    pub links: Vec<String>,
}

/// Turn a nav label into the id of the section it links to.
pub fn anchor_id(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "-")
}

impl PageContent {
    /// Load content from a JSON file.
    pub fn load(path: &std::path::Path) -> PizzafunResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let content: Self = serde_json::from_str(&raw)?;
        content.validate()?;
        Ok(content)
    }

    /// Check the invariants the page relies on.
    pub fn validate(&self) -> PizzafunResult<()> {
        let total = self.tokenomics.total_percent();
        if total != 100 {
            return Err(PizzafunError::content(format!(
                "tokenomics allocations sum to {total}%, expected 100%"
            )));
        }
        if self.tokenomics.allocations.iter().any(|a| a.value == 0) {
            return Err(PizzafunError::content(
                "tokenomics allocations must all be non-zero",
            ));
        }
        if self.tokenomics.legend_size > self.tokenomics.allocations.len() {
            return Err(PizzafunError::content(
                "tokenomics legend lists more entries than there are allocations",
            ));
        }
        for stat in &self.hero.stats {
            stat.target()?;
        }
        if self.hero.headline.iter().any(|line| line.delay_secs < 0.0) {
            return Err(PizzafunError::content("headline delays must not be negative"));
        }
        if self.performance.points.is_empty() {
            return Err(PizzafunError::content("performance chart has no data points"));
        }
        for (name, empty) in [
            ("nav", self.header.nav.is_empty()),
            ("features", self.features.features.is_empty()),
            ("roadmap", self.roadmap.milestones.is_empty()),
            ("footer sections", self.footer.sections.is_empty()),
        ] {
            if empty {
                return Err(PizzafunError::content(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// The shipped PizzaFun landing page.
    pub fn pizzafun() -> Self {
        Self {
            metadata: Metadata {
                title: "PizzaFun".into(),
                description: "Next-generation Bitcoin token trading protocol with 2-second \
                              confirmations, zero gas fees, and military-grade security."
                    .into(),
                favicon: "/favicon.svg".into(),
                lang: "en".into(),
            },
            header: HeaderContent {
                brand: "PizzaFun".into(),
                logo: "\u{1F355}".into(),
                version_tag: "PROTOCOL v2.0".into(),
                nav: strings(&["Features", "Technology", "Tokenomics", "Roadmap", "Community"]),
                secondary_button: "Whitepaper".into(),
                primary_button: "Launch App".into(),
            },
            hero: HeroContent {
                kicker: "NEXT-GEN TRADING PROTOCOL".into(),
                headline: vec![
                    HeadlineLine {
                        text: "BITCOIN TRADING".into(),
                        delay_secs: 0.5,
                    },
                    HeadlineLine {
                        text: "REDEFINED".into(),
                        delay_secs: 2.0,
                    },
                ],
                lead: vec![
                    TextRun::plain("Experience the future of decentralized finance with "),
                    TextRun::highlight("2-second confirmations"),
                    TextRun::plain(", "),
                    TextRun::highlight("zero gas fees"),
                    TextRun::plain(", and "),
                    TextRun::highlight("military-grade security"),
                ],
                stats: vec![
                    stat("2", "SEC", "Confirmation Time", "zap"),
                    stat("35000", "TPS", "Peak Throughput", "database"),
                    stat("0", "$", "Gas Fees", "target"),
                ],
                primary_cta: "INITIALIZE TRADING".into(),
                secondary_cta: "SYSTEM DEMO".into(),
            },
            features: FeatureSection {
                kicker: "CORE ARCHITECTURE".into(),
                heading: "QUANTUM LEAP TECHNOLOGY".into(),
                features: vec![
                    Feature {
                        title: "HYPER-SPEED PROCESSING".into(),
                        description: "CrustNet quantum backend processes Bitcoin transactions \
                                      in 2 seconds using advanced sharding and parallel \
                                      computation."
                            .into(),
                        badges: strings(&["300x Faster", "2s Confirmation", "35K TPS"]),
                        icon: "zap".into(),
                    },
                    Feature {
                        title: "QUANTUM SECURITY".into(),
                        description: "Military-grade TSS and MPC protocols ensure your assets \
                                      are protected by distributed cryptographic signatures."
                            .into(),
                        badges: strings(&["Zero Trust", "TSS Protocol", "MPC Secured"]),
                        icon: "shield".into(),
                    },
                    Feature {
                        title: "NEURAL TRADING ENGINE".into(),
                        description: "AI-powered AMM with dynamic bonding curves and \
                                      intelligent liquidity distribution across multiple \
                                      phases."
                            .into(),
                        badges: strings(&["AI Powered", "Dynamic AMM", "Smart Routes"]),
                        icon: "network".into(),
                    },
                ],
            },
            performance: PerformanceSection {
                heading: "PERFORMANCE MATRIX".into(),
                chart_title: "TRANSACTION SPEED ANALYSIS".into(),
                baseline_label: "Traditional Bitcoin".into(),
                product_label: "PizzaFun Protocol".into(),
                points: vec![
                    point("0s", 0.0, 0.0),
                    point("2s", 0.0, 100.0),
                    point("60s", 10.0, 100.0),
                    point("300s", 50.0, 100.0),
                    point("600s", 100.0, 100.0),
                ],
                metrics_title: "SYSTEM METRICS".into(),
                metrics: vec![
                    metric("LATENCY", "< 2ms", "Ultra-low latency trading execution"),
                    metric("THROUGHPUT", "35,000 TPS", "Peak transaction processing capacity"),
                    metric("UPTIME", "99.99%", "Enterprise-grade reliability"),
                    metric("SECURITY", "QUANTUM", "Post-quantum cryptographic protection"),
                ],
            },
            tokenomics: TokenomicsSection {
                kicker: "TOKEN ECONOMICS".into(),
                heading: "$PIZZA DISTRIBUTION".into(),
                allocations: vec![
                    allocation("Ecosystem Development", 30, "#FF9325"),
                    allocation("Trading Mining", 15, "#00D4FF"),
                    allocation("Founding Team", 14, "#9D4EDD"),
                    allocation("Private Rounds", 10, "#06FFA5"),
                    allocation("Liquidity Pool", 10, "#FF006E"),
                    allocation("Marketing", 6, "#FB8500"),
                    allocation("Advisors", 5, "#8ECAE6"),
                    allocation("Reserve", 5, "#FFB3BA"),
                    allocation("Airdrops", 5, "#BAFFC9"),
                ],
                total_supply: 210_000_000,
                supply_label: "TOTAL $PIZZA SUPPLY".into(),
                supply_note: "// Tribute to Bitcoin's 21M \u{00D7} 10".into(),
                legend_size: 5,
                utilities_title: "TOKEN UTILITIES".into(),
                utilities: strings(&[
                    "Trading Discounts",
                    "Governance Rights",
                    "Staking Rewards",
                    "Deflationary Burns",
                ]),
            },
            roadmap: RoadmapSection {
                kicker: "DEVELOPMENT TIMELINE".into(),
                heading: "MISSION ROADMAP".into(),
                milestones: vec![
                    milestone(
                        "Q4 2024",
                        "GENESIS PROTOCOL",
                        &["Mainnet deployment", "Runes integration", "Core trading engine"],
                        MilestoneStatus::Active,
                    ),
                    milestone(
                        "Q1 2025",
                        "MOBILE MATRIX",
                        &["iOS/Android apps", "User acquisition", "Community rewards"],
                        MilestoneStatus::Next,
                    ),
                    milestone(
                        "Q2 2025",
                        "ECOSYSTEM EXPANSION",
                        &["Ordinals support", "BRC-20 integration", "Advanced features"],
                        MilestoneStatus::Planned,
                    ),
                    milestone(
                        "Q3 2025",
                        "CROSS-CHAIN BRIDGE",
                        &["Multi-chain support", "Developer APIs", "Third-party tools"],
                        MilestoneStatus::Planned,
                    ),
                    milestone(
                        "2026+",
                        "DEFI SINGULARITY",
                        &["Full DeFi suite", "Global adoption", "Quantum upgrades"],
                        MilestoneStatus::Future,
                    ),
                ],
            },
            cta: CallToAction {
                kicker: "JOIN THE REVOLUTION".into(),
                heading: "ENTER THE FUTURE".into(),
                body: "Join thousands of traders already experiencing the next generation of \
                       Bitcoin token trading."
                    .into(),
                emphasis: "The future is now.".into(),
                primary_button: "LAUNCH PROTOCOL".into(),
                secondary_button: "ACCESS TOKENS".into(),
            },
            footer: FooterContent {
                tagline: strings(&[
                    "// Revolutionizing Bitcoin Token Trading",
                    "// Through Quantum Technology",
                ]),
                socials: vec![
                    SocialLink {
                        name: "Twitter".into(),
                        href: "#".into(),
                    },
                    SocialLink {
                        name: "Discord".into(),
                        href: "#".into(),
                    },
                    SocialLink {
                        name: "GitHub".into(),
                        href: "#".into(),
                    },
                ],
                sections: vec![
                    FooterSection {
                        title: "PROTOCOL".into(),
                        links: strings(&["Features", "Technology", "Security", "Documentation"]),
                    },
                    FooterSection {
                        title: "COMMUNITY".into(),
                        links: strings(&["Discord", "Twitter", "Telegram", "GitHub"]),
                    },
                    FooterSection {
                        title: "RESOURCES".into(),
                        links: strings(&["Whitepaper", "API Docs", "Blog", "Support"]),
                    },
                ],
                copyright: "\u{00A9} 2024 PizzaFun Protocol. All rights reserved. | Built for \
                            the future."
                    .into(),
                legal: strings(&["Terms", "Privacy", "Security"]),
            },
        }
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::pizzafun()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stat(value: &str, suffix: &str, label: &str, icon: &str) -> HeroStat {
    HeroStat {
        value: value.into(),
        suffix: suffix.into(),
        label: label.into(),
        icon: icon.into(),
    }
}

fn point(label: &str, baseline: f64, product: f64) -> PerformancePoint {
    PerformancePoint {
        label: label.into(),
        baseline,
        product,
    }
}

fn metric(metric: &str, value: &str, description: &str) -> SystemMetric {
    SystemMetric {
        metric: metric.into(),
        value: value.into(),
        description: description.into(),
    }
}

fn allocation(name: &str, value: u32, color: &str) -> Allocation {
    Allocation {
        name: name.into(),
        value,
        color: color.into(),
    }
}

fn milestone(period: &str, title: &str, items: &[&str], status: MilestoneStatus) -> Milestone {
    Milestone {
        period: period.into(),
        title: title.into(),
        items: strings(items),
        status,
    }
}
