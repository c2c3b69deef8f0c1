//! Built-in content: AI adoption in corporate finance (figures as of July 2025).

use super::catalog::{CatalogData, LayerEntry, OverviewEntry, Rgb};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in catalog contents.
pub fn catalog_data() -> CatalogData {
    CatalogData {
        overview: OverviewEntry {
            headline: "AI in Corporate Finance: The Future Unfolds".to_string(),
            stats: strings(&[
                "**58%** of financial organizations using AI in 2024 (up from 37% in 2023).",
                "Global AI in Finance Market: **$38.36 Billion (2024)** projected to **$190.33 Billion (2030)** | **CAGR 30.6%**.",
                "**70%** of CFOs plan to increase AI investment in the next 5 years (Citizens Bank 2025 Report).",
                "**92%** of Fortune 500 companies leverage OpenAI's technology (Sequencr AI, July 2025).",
            ]),
        },
        layers: vec![
            LayerEntry {
                key: "automation".to_string(),
                label: "General Automation".to_string(),
                headline: "Phase 1: General Automation (Foundation of Efficiency)".to_string(),
                description: "AI-powered automation of repetitive, rule-based tasks. Focus on speed, cost reduction, and freeing up resources.".to_string(),
                stats: strings(&[
                    "**60%** of companies currently use automation solutions (Coherent Solutions).",
                    "Up to **80%** of finance's transactional workflow could be automated (Accenture estimate).",
                    "Financial Automation Market CAGR: **14.2% (2024-2032)**.",
                    "**63%** of CFOs say AI made payment automation significantly easier (up 23% from 2024) (Citizens Bank 2025 Report).",
                ]),
                functions: strings(&[
                    "Accounts Payable/Receivable",
                    "Financial Reporting/GL",
                    "Basic Treasury Operations",
                    "Invoice Processing",
                    "Expense Categorization",
                    "Compliance Checks",
                    "Data Entry Automation",
                    "Automated Reconciliation",
                ]),
                color: Rgb(0x4CAF50),
                emissive: Rgb(0x2A7030),
            },
            LayerEntry {
                key: "cognitive".to_string(),
                label: "Cognitive AI".to_string(),
                headline: "Phase 2: Cognitive AI (Unlocking Insights & Smarter Decisions)".to_string(),
                description: "AI that learns, understands context, reasons, and predicts. Augments human intelligence for complex decision-making.".to_string(),
                stats: strings(&[
                    "Cognitive Computing Market CAGR: **28.4% (2025-2030)** (Grand View Research).",
                    "BFSI leads adoption (25-28% market share) in cognitive computing.",
                    "**91%** of US banks use AI for fraud detection.",
                ]),
                functions: strings(&[
                    "Predictive Forecasting",
                    "Scenario Modeling",
                    "Advanced Fraud Detection",
                    "Credit Risk Assessment",
                    "Market Risk Analysis",
                    "M&A Due Diligence",
                    "Dynamic Risk Scoring",
                    "Portfolio Optimization",
                ]),
                color: Rgb(0x2196F3),
                emissive: Rgb(0x1565C0),
            },
            LayerEntry {
                key: "generative".to_string(),
                label: "Generative AI".to_string(),
                headline: "Phase 3: Generative AI (Creative & Human-Like Interaction)".to_string(),
                description: "AI that creates new text, images, code, etc., and supports natural language conversations.".to_string(),
                stats: strings(&[
                    "**65%** of organizations regularly use Generative AI (doubled 2023-2024) (McKinsey, AmplifAI).",
                    "GenAI Market Value: **$66.62 Billion (2024)** projected to **$1.2 Trillion (next 9 years)**.",
                    "**72%** of companies using or testing AI in financial reporting (KPMG).",
                    "**99%** of companies expected to adopt AI auditing tools by 2027.",
                    "**21%** of GenAI users report fundamental workflow redesigns (McKinsey).",
                ]),
                functions: strings(&[
                    "Narrative Reporting",
                    "Budget Explanations",
                    "Executive Summaries",
                    "Audit Summaries",
                    "Investor Presentations",
                    "Earnings Call Scripts",
                    "Policy Communications",
                    "Personalized Financial Explanations",
                ]),
                color: Rgb(0xFFC107),
                emissive: Rgb(0xFF8F00),
            },
        ],
    }
}
