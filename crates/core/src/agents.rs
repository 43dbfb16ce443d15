//! The optimization agent catalog.
//!
//! A fixed table of personas, each carrying a static bundle of suggestions
//! and performance metrics. Composition is pure: no I/O, deterministic
//! output for a given agent id and site description.

use serde::Serialize;
use thiserror::Error;

use crate::session::{Impact, MetricMap, OptimizationSuggestion};

/// Release maturity of an agent.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Stable,
    Beta,
}

/// A named optimization persona.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub status: AgentStatus,
    pub capabilities: &'static [&'static str],
}

/// The full agent catalog, in presentation order.
pub const AGENTS: &[Agent] = &[
    Agent {
        id: "liv",
        name: "Liv",
        title: "Personalization Agent",
        description: "Liv creates tailored web experiences for every visitor, leveraging insights from ads and user behavior to deliver truly personalized pages that boost conversion.",
        image_url: "/agents/liv.jpg",
        status: AgentStatus::Stable,
        capabilities: &["Personalization", "User Behavior Analysis", "Conversion Optimization"],
    },
    Agent {
        id: "max",
        name: "Max",
        title: "Experimentation Agent",
        description: "Max drives results through continuous A/B testing and data analysis, fine-tuning every element of your website to maximize conversions.",
        image_url: "/agents/max.jpg",
        status: AgentStatus::Stable,
        capabilities: &["A/B Testing", "Data Analysis", "Conversion Rate Optimization"],
    },
    Agent {
        id: "aya",
        name: "Aya",
        title: "Web Performance Agent",
        description: "Aya ensures your website runs at peak performance, proactively monitoring speed, and reliability to deliver a seamless user experience.",
        image_url: "/agents/aya.jpg",
        status: AgentStatus::Beta,
        capabilities: &["Performance Monitoring", "Speed Optimization", "Reliability Analysis"],
    },
];

/// Look up an agent record by its id.
#[must_use]
pub fn agent_by_id(id: &str) -> Option<&'static Agent> {
    AGENTS.iter().find(|agent| agent.id == id)
}

/// Catalog composition output: the agent's bundle plus the optimized note.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub suggestions: Vec<OptimizationSuggestion>,
    pub optimized_description: String,
    pub performance_metrics: MetricMap,
}

/// An unknown agent id is a data-integrity fault upstream, not user input.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown agent id: {0}")]
    UnknownAgent(String),
}

/// Compose the static bundle for `agent_id` with a site description note.
///
/// # Errors
/// Fails fast with [`CatalogError::UnknownAgent`] when the id is not in the
/// catalog.
pub fn compose_optimizations(
    agent_id: &str,
    site_description: &str,
) -> Result<OptimizationReport, CatalogError> {
    let agent =
        agent_by_id(agent_id).ok_or_else(|| CatalogError::UnknownAgent(agent_id.to_owned()))?;
    let (suggestions, performance_metrics) = base_bundle(agent.id);
    Ok(OptimizationReport {
        suggestions,
        optimized_description: format!(
            "{site_description}\n\nOptimized for {}'s specialties: {}.",
            agent.name,
            agent.capabilities.join(", ")
        ),
        performance_metrics,
    })
}

fn suggestion(
    kind: &str,
    title: &str,
    description: &str,
    impact: Impact,
    implementation: &str,
) -> OptimizationSuggestion {
    OptimizationSuggestion {
        kind: kind.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        impact,
        implementation: implementation.to_owned(),
    }
}

fn metric_map(pairs: &[(&str, f64)]) -> MetricMap {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
}

// Static bundles. Only ids present in AGENTS reach this point.
fn base_bundle(agent_id: &str) -> (Vec<OptimizationSuggestion>, MetricMap) {
    match agent_id {
        "liv" => (
            vec![
                suggestion(
                    "personalization",
                    "Implement Dynamic Content",
                    "Personalize content based on user behavior and preferences",
                    Impact::High,
                    "Use user segmentation and dynamic content blocks",
                ),
                suggestion(
                    "conversion",
                    "Smart CTAs",
                    "Adapt call-to-action buttons based on user journey stage",
                    Impact::High,
                    "Implement smart CTAs using user behavior data",
                ),
                suggestion(
                    "engagement",
                    "Personalized Recommendations",
                    "Show tailored product/content recommendations",
                    Impact::Medium,
                    "Integrate recommendation engine based on user preferences",
                ),
            ],
            metric_map(&[
                ("personalization", 92.0),
                ("engagement", 88.0),
                ("conversion", 95.0),
                ("retention", 90.0),
            ]),
        ),
        "max" => (
            vec![
                suggestion(
                    "testing",
                    "A/B Test Homepage Layout",
                    "Test different layouts to optimize conversion rate",
                    Impact::High,
                    "Set up A/B test variants for homepage components",
                ),
                suggestion(
                    "analytics",
                    "Enhanced Conversion Tracking",
                    "Implement detailed funnel analytics",
                    Impact::High,
                    "Set up conversion funnels and event tracking",
                ),
                suggestion(
                    "optimization",
                    "Form Optimization",
                    "Optimize form fields and validation for better completion rates",
                    Impact::Medium,
                    "Implement progressive form filling and smart validation",
                ),
            ],
            metric_map(&[
                ("conversionRate", 95.0),
                ("bounceRate", 88.0),
                ("engagement", 92.0),
                ("retention", 94.0),
            ]),
        ),
        _ => (
            vec![
                suggestion(
                    "performance",
                    "Image Optimization",
                    "Optimize and lazy load images for faster page loads",
                    Impact::High,
                    "Implement responsive images and lazy loading strategies",
                ),
                suggestion(
                    "speed",
                    "Core Web Vitals Optimization",
                    "Improve LCP, FID, and CLS metrics",
                    Impact::High,
                    "Optimize critical rendering path and layout stability",
                ),
                suggestion(
                    "reliability",
                    "Error Monitoring Setup",
                    "Implement real-time error tracking and monitoring",
                    Impact::Medium,
                    "Set up error tracking and monitoring tools",
                ),
            ],
            metric_map(&[
                ("speed", 96.0),
                ("reliability", 98.0),
                ("accessibility", 94.0),
                ("bestPractices", 95.0),
            ]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_three_agents() {
        assert_eq!(AGENTS.len(), 3);
        assert!(agent_by_id("liv").is_some());
        assert!(agent_by_id("max").is_some());
        assert!(agent_by_id("aya").is_some());
    }

    #[test]
    fn unknown_agent_is_a_hard_error() {
        let err = compose_optimizations("zed", "A store").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAgent(id) if id == "zed"));
    }

    #[test]
    fn compose_appends_capability_note() {
        let report = compose_optimizations("max", "An online store").unwrap();
        assert_eq!(report.suggestions.len(), 3);
        assert!(report.optimized_description.starts_with("An online store"));
        assert!(
            report
                .optimized_description
                .ends_with("Optimized for Max's specialties: A/B Testing, Data Analysis, Conversion Rate Optimization.")
        );
        assert_eq!(report.performance_metrics.get("conversionRate"), Some(&95.0));
    }

    #[test]
    fn compose_is_deterministic() {
        let a = compose_optimizations("liv", "desc").unwrap();
        let b = compose_optimizations("liv", "desc").unwrap();
        assert_eq!(a.suggestions, b.suggestions);
        assert_eq!(a.optimized_description, b.optimized_description);
    }
}
