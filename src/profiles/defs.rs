use crate::model::patent::{
    CLAIM_BREADTH, COMPETITOR_CITATIONS, COMPETITOR_COUNT, DESIGN_AROUND_DIFFICULTY,
    ELIGIBILITY_SCORE, ENFORCEMENT_CLARITY, FORWARD_CITATIONS, IPR_RISK_SCORE,
    MARKET_RELEVANCE_SCORE, PROSECUTION_QUALITY_SCORE, VALIDITY_SCORE, YEARS_REMAINING,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveDef {
    Linear(f64),
    Sqrt(f64),
    Log(f64),
    /// `(threshold, value)` pairs, any order.
    Stepped(&'static [(f64, f64)]),
    /// `(min, max, base_value, slope)` rows, ascending.
    Tiered(&'static [(f64, f64, f64, f64)]),
    Score5,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub metric: &'static str,
    pub weight: f64,
    pub curve: CurveDef,
    pub default: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct FactorDef {
    pub name: &'static str,
    pub floor: f64,
    pub metrics: &'static [MetricDef],
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileDef {
    pub id: &'static str,
    pub label: &'static str,
    pub factors: &'static [FactorDef],
}

const CITATIONS_AGGRESSIVE: CurveDef = CurveDef::Tiered(&[
    (0.0, 1.0, 0.005, 0.145),
    (1.0, 3.0, 0.15, 0.35),
    (3.0, 8.0, 0.50, 0.25),
    (8.0, 20.0, 0.75, 0.18),
    (20.0, 100.0, 0.93, 0.07),
]);

const CITATIONS_STANDARD: CurveDef = CurveDef::Tiered(&[
    (0.0, 1.0, 0.01, 0.14),
    (1.0, 3.0, 0.15, 0.30),
    (3.0, 8.0, 0.45, 0.25),
    (8.0, 20.0, 0.70, 0.20),
    (20.0, 100.0, 0.90, 0.10),
]);

const YEARS_LITIGATION: CurveDef = CurveDef::Stepped(&[
    (10.0, 1.0),
    (7.0, 0.85),
    (5.0, 0.60),
    (4.0, 0.40),
    (3.0, 0.25),
    (0.0, 0.10),
]);

const YEARS_CONSERVATIVE: CurveDef = CurveDef::Stepped(&[
    (12.0, 1.0),
    (9.0, 0.85),
    (7.0, 0.65),
    (5.0, 0.40),
    (3.0, 0.20),
    (0.0, 0.10),
]);

const YEARS_LICENSING: CurveDef = CurveDef::Stepped(&[
    (8.0, 1.0),
    (5.0, 0.80),
    (3.0, 0.55),
    (0.0, 0.25),
]);

const YEARS_LIFECYCLE: CurveDef = CurveDef::Stepped(&[
    (10.0, 1.0),
    (7.0, 0.80),
    (5.0, 0.60),
    (3.0, 0.35),
    (0.0, 0.15),
]);

const YEARS_LONGEVITY: CurveDef = CurveDef::Stepped(&[
    (10.0, 1.0),
    (7.0, 0.80),
    (5.0, 0.55),
    (3.0, 0.30),
    (0.0, 0.12),
]);

const fn counted(metric: &'static str, weight: f64, curve: CurveDef) -> MetricDef {
    MetricDef {
        metric,
        weight,
        curve,
        default: 0.0,
    }
}

/// A 1-5 assessment defaulting to the neutral midpoint.
const fn scored(metric: &'static str, weight: f64) -> MetricDef {
    scored_or(metric, weight, 3.0)
}

const fn scored_or(metric: &'static str, weight: f64, default: f64) -> MetricDef {
    MetricDef {
        metric,
        weight,
        curve: CurveDef::Score5,
        default,
    }
}

const fn term(curve: CurveDef) -> MetricDef {
    counted(YEARS_REMAINING, 1.0, curve)
}

const IP_LIT_AGGRESSIVE: &[FactorDef] = &[
    FactorDef {
        name: "MarketOpportunity",
        floor: 0.02,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.60, CITATIONS_AGGRESSIVE),
            counted(COMPETITOR_COUNT, 0.20, CurveDef::Sqrt(10.0)),
            counted(FORWARD_CITATIONS, 0.08, CurveDef::Sqrt(400.0)),
            scored_or(MARKET_RELEVANCE_SCORE, 0.12, 3.2),
        ],
    },
    FactorDef {
        name: "LegalMerit",
        floor: 0.15,
        metrics: &[
            scored(ELIGIBILITY_SCORE, 0.35),
            scored(VALIDITY_SCORE, 0.35),
            scored(CLAIM_BREADTH, 0.15),
            scored(PROSECUTION_QUALITY_SCORE, 0.15),
        ],
    },
    FactorDef {
        name: "CollectionYield",
        floor: 0.20,
        metrics: &[
            scored(ENFORCEMENT_CLARITY, 0.40),
            scored(DESIGN_AROUND_DIFFICULTY, 0.35),
            scored_or(IPR_RISK_SCORE, 0.25, 4.0),
        ],
    },
    FactorDef {
        name: "Timeline",
        floor: 0.12,
        metrics: &[term(YEARS_LITIGATION)],
    },
];

const IP_LIT_BALANCED: &[FactorDef] = &[
    FactorDef {
        name: "MarketEvidence",
        floor: 0.012,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.75, CITATIONS_AGGRESSIVE),
            counted(COMPETITOR_COUNT, 0.15, CurveDef::Linear(8.0)),
            scored(MARKET_RELEVANCE_SCORE, 0.10),
        ],
    },
    FactorDef {
        name: "LegalStrength",
        floor: 0.17,
        metrics: &[
            scored(ELIGIBILITY_SCORE, 0.30),
            scored(VALIDITY_SCORE, 0.30),
            scored(CLAIM_BREADTH, 0.20),
            scored(PROSECUTION_QUALITY_SCORE, 0.20),
        ],
    },
    FactorDef {
        name: "EnforcementViability",
        floor: 0.25,
        metrics: &[
            scored(ENFORCEMENT_CLARITY, 0.35),
            scored(DESIGN_AROUND_DIFFICULTY, 0.30),
            scored_or(IPR_RISK_SCORE, 0.35, 4.0),
        ],
    },
    FactorDef {
        name: "TimelineValue",
        floor: 0.15,
        metrics: &[term(YEARS_LITIGATION)],
    },
];

const IP_LIT_CONSERVATIVE: &[FactorDef] = &[
    FactorDef {
        name: "LegalFoundation",
        floor: 0.30,
        metrics: &[
            scored_or(ELIGIBILITY_SCORE, 0.30, 2.8),
            scored_or(VALIDITY_SCORE, 0.30, 2.8),
            scored_or(PROSECUTION_QUALITY_SCORE, 0.25, 2.8),
            scored(CLAIM_BREADTH, 0.15),
        ],
    },
    FactorDef {
        name: "MarketValidation",
        floor: 0.05,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.65, CITATIONS_STANDARD),
            counted(COMPETITOR_COUNT, 0.20, CurveDef::Linear(8.0)),
            counted(FORWARD_CITATIONS, 0.15, CurveDef::Sqrt(300.0)),
        ],
    },
    FactorDef {
        name: "RiskMitigation",
        floor: 0.35,
        metrics: &[
            scored_or(IPR_RISK_SCORE, 0.40, 3.5),
            scored(ENFORCEMENT_CLARITY, 0.35),
            scored(DESIGN_AROUND_DIFFICULTY, 0.25),
        ],
    },
    FactorDef {
        name: "TimelineMargin",
        floor: 0.20,
        metrics: &[term(YEARS_CONSERVATIVE)],
    },
];

const LICENSING: &[FactorDef] = &[
    FactorDef {
        name: "LicenseePool",
        floor: 0.05,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.45, CITATIONS_STANDARD),
            counted(COMPETITOR_COUNT, 0.30, CurveDef::Sqrt(10.0)),
            counted(FORWARD_CITATIONS, 0.25, CurveDef::Sqrt(400.0)),
        ],
    },
    FactorDef {
        name: "NegotiationLeverage",
        floor: 0.20,
        metrics: &[
            scored(CLAIM_BREADTH, 0.30),
            scored(DESIGN_AROUND_DIFFICULTY, 0.30),
            scored(ENFORCEMENT_CLARITY, 0.25),
            scored_or(IPR_RISK_SCORE, 0.15, 4.0),
        ],
    },
    FactorDef {
        name: "Credibility",
        floor: 0.20,
        metrics: &[
            scored(ELIGIBILITY_SCORE, 0.40),
            scored(VALIDITY_SCORE, 0.40),
            scored(PROSECUTION_QUALITY_SCORE, 0.20),
        ],
    },
    FactorDef {
        name: "TermValue",
        floor: 0.20,
        metrics: &[term(YEARS_LICENSING)],
    },
];

const CORPORATE_MA: &[FactorDef] = &[
    FactorDef {
        name: "StrategicValue",
        floor: 0.03,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.55, CITATIONS_AGGRESSIVE),
            counted(FORWARD_CITATIONS, 0.25, CurveDef::Sqrt(500.0)),
            counted(COMPETITOR_COUNT, 0.20, CurveDef::Linear(10.0)),
        ],
    },
    FactorDef {
        name: "DefensiveStrength",
        floor: 0.20,
        metrics: &[
            scored(CLAIM_BREADTH, 0.35),
            scored(DESIGN_AROUND_DIFFICULTY, 0.35),
            scored(MARKET_RELEVANCE_SCORE, 0.30),
        ],
    },
    FactorDef {
        name: "AssetQuality",
        floor: 0.25,
        metrics: &[
            scored(ELIGIBILITY_SCORE, 0.30),
            scored(VALIDITY_SCORE, 0.30),
            scored(PROSECUTION_QUALITY_SCORE, 0.20),
            scored_or(IPR_RISK_SCORE, 0.20, 4.0),
        ],
    },
    FactorDef {
        name: "LifecycleValue",
        floor: 0.15,
        metrics: &[term(YEARS_LIFECYCLE)],
    },
];

const EXECUTIVE: &[FactorDef] = &[
    FactorDef {
        name: "MarketPosition",
        floor: 0.02,
        metrics: &[
            counted(COMPETITOR_CITATIONS, 0.65, CITATIONS_AGGRESSIVE),
            counted(FORWARD_CITATIONS, 0.20, CurveDef::Sqrt(500.0)),
            scored(MARKET_RELEVANCE_SCORE, 0.15),
        ],
    },
    FactorDef {
        name: "PortfolioQuality",
        floor: 0.22,
        metrics: &[
            scored(ELIGIBILITY_SCORE, 0.25),
            scored(VALIDITY_SCORE, 0.25),
            scored(CLAIM_BREADTH, 0.25),
            scored(PROSECUTION_QUALITY_SCORE, 0.25),
        ],
    },
    FactorDef {
        name: "MonetizationPotential",
        floor: 0.20,
        metrics: &[
            counted(COMPETITOR_COUNT, 0.35, CurveDef::Sqrt(10.0)),
            scored(ENFORCEMENT_CLARITY, 0.35),
            scored(DESIGN_AROUND_DIFFICULTY, 0.30),
        ],
    },
    FactorDef {
        name: "AssetLongevity",
        floor: 0.18,
        metrics: &[term(YEARS_LONGEVITY)],
    },
];

const BUILTIN_PROFILES: &[ProfileDef] = &[
    ProfileDef {
        id: "ip-lit-aggressive",
        label: "IP Litigation (Aggressive)",
        factors: IP_LIT_AGGRESSIVE,
    },
    ProfileDef {
        id: "ip-lit-balanced",
        label: "IP Litigation (Balanced)",
        factors: IP_LIT_BALANCED,
    },
    ProfileDef {
        id: "ip-lit-conservative",
        label: "IP Litigation (Conservative)",
        factors: IP_LIT_CONSERVATIVE,
    },
    ProfileDef {
        id: "licensing",
        label: "Licensing",
        factors: LICENSING,
    },
    ProfileDef {
        id: "corporate-ma",
        label: "Corporate M&A",
        factors: CORPORATE_MA,
    },
    ProfileDef {
        id: "executive",
        label: "Executive Portfolio Review",
        factors: EXECUTIVE,
    },
];

pub fn builtin_profiles() -> &'static [ProfileDef] {
    BUILTIN_PROFILES
}
