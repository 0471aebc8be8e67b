use serde::Serialize;

use super::domain::ConditionKey;

/// Presentation data bound to a winning pattern. Carries no scoring logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionProfile {
    pub key: ConditionKey,
    pub display_name: &'static str,
    pub rationale: &'static str,
    pub lifestyle_tips: &'static [&'static str],
    pub reference: ReferenceRanges,
}

/// Typical laboratory picture for a pattern, as shown in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRanges {
    pub condition: &'static str,
    pub bilirubin: &'static str,
    pub alkaline_phosphatase: &'static str,
    pub transaminase_pattern: &'static str,
    pub albumin: &'static str,
    pub notes: &'static str,
    pub prevention: &'static [&'static str],
    pub screening: &'static str,
    pub interpretation: &'static str,
}

pub struct ConditionCatalog;

impl ConditionCatalog {
    pub fn lookup(key: ConditionKey) -> &'static ConditionProfile {
        match key {
            ConditionKey::AcuteViral => &ACUTE_VIRAL,
            ConditionKey::Alcoholic => &ALCOHOLIC,
            ConditionKey::Cholestasis => &CHOLESTASIS,
            ConditionKey::Cirrhosis => &CIRRHOSIS,
            ConditionKey::Nafld => &NAFLD,
            ConditionKey::Normal => &NORMAL,
        }
    }

    pub fn entries() -> impl Iterator<Item = &'static ConditionProfile> {
        ConditionKey::ALL.into_iter().map(Self::lookup)
    }
}

static ACUTE_VIRAL: ConditionProfile = ConditionProfile {
    key: ConditionKey::AcuteViral,
    display_name: "Acute Viral Hepatitis Pattern",
    rationale: "Pattern matches acute hepatocellular injury typically seen in viral hepatitis.",
    lifestyle_tips: &[
        "Avoid alcohol and unnecessary medications.",
        "Ensure Hepatitis A and B vaccination if not done.",
        "Maintain proper hygiene and safe food/water practices.",
        "Seek prompt medical evaluation for jaundice, fatigue, or dark urine.",
    ],
    reference: ReferenceRanges {
        condition: "Acute viral hepatitis (HAV, HBV, HCV)",
        bilirubin: "~5–15 mg/dL",
        alkaline_phosphatase: "~150–350 IU/L",
        transaminase_pattern: "AST 400–800 IU/L, ALT 600–1200 IU/L (ALT > AST; AST/ALT < 1)",
        albumin: "3.5–5.0 g/dL",
        notes: "Hepatocellular injury from viral infection; ALT rises earliest before bilirubin.",
        prevention: &[
            "Get vaccinated for Hepatitis A & B",
            "Avoid sharing needles, razors, toothbrushes",
            "Ensure food and water hygiene",
            "Practice safe sex",
            "Wash hands regularly",
        ],
        screening: "Hepatitis A/B/C serology if symptomatic or exposed",
        interpretation: "Potentially harmful: acute liver injury",
    },
};

static ALCOHOLIC: ConditionProfile = ConditionProfile {
    key: ConditionKey::Alcoholic,
    display_name: "Alcoholic Liver Disease Pattern",
    rationale: "AST/ALT ratio and enzymes are consistent with alcohol-related liver injury.",
    lifestyle_tips: &[
        "Completely avoid alcohol; even small amounts can worsen damage.",
        "Maintain a balanced, nutrient-rich diet.",
        "Discuss de-addiction and support options if needed.",
        "Regular liver function monitoring is strongly advised.",
    ],
    reference: ReferenceRanges {
        condition: "Alcoholic liver disease",
        bilirubin: "~3–10 mg/dL",
        alkaline_phosphatase: "~120–250 IU/L",
        transaminase_pattern: "AST 150–400 IU/L, ALT 50–200 IU/L (AST/ALT ≈ 2)",
        albumin: "2.5–3.5 g/dL",
        notes: "Ethanol toxicity leading to steatosis, then hepatitis, then cirrhosis.",
        prevention: &[
            "Complete alcohol cessation",
            "Nutrient-rich, balanced diet",
            "Avoid hepatotoxic drugs",
            "Regular clinical monitoring",
            "Seek help for alcohol dependence",
        ],
        screening: "Ultrasound, Fibroscan, LFT every 6–12 months",
        interpretation: "Harmful: chronic liver stress, risk of fibrosis/cirrhosis",
    },
};

static CHOLESTASIS: ConditionProfile = ConditionProfile {
    key: ConditionKey::Cholestasis,
    display_name: "Cholestasis / Bile Obstruction Pattern",
    rationale: "Profile suggests impaired bile flow or obstruction in the biliary system.",
    lifestyle_tips: &[
        "Follow a low-fat diet as advised by a clinician.",
        "Seek medical attention for persistent jaundice or itching.",
        "Avoid self-medication with hepatotoxic drugs or herbs.",
        "Further imaging (like ultrasound) may be required.",
    ],
    reference: ReferenceRanges {
        condition: "Cholestasis (biliary obstruction)",
        bilirubin: "~5–20 mg/dL",
        alkaline_phosphatase: "~300–900 IU/L",
        transaminase_pattern: "AST < 200 IU/L, ALT < 200 IU/L",
        albumin: "3.5–5.0 g/dL",
        notes: "Obstruction causing conjugated hyperbilirubinemia, dark urine, pale stools.",
        prevention: &[
            "Maintain healthy weight",
            "Stay hydrated",
            "Low-fat diet",
            "UDCA for primary biliary cholangitis",
            "Periodic ultrasound if high risk",
        ],
        screening: "Ultrasound, MRCP, periodic LFTs",
        interpretation: "Potentially harmful: indicates obstruction / cholestasis",
    },
};

static CIRRHOSIS: ConditionProfile = ConditionProfile {
    key: ConditionKey::Cirrhosis,
    display_name: "Cirrhosis / Chronic Liver Disease Pattern",
    rationale: "Findings align with chronic fibrosis and reduced synthetic function.",
    lifestyle_tips: &[
        "Avoid alcohol and hepatotoxic substances.",
        "Keep salt intake low to reduce fluid retention.",
        "Get vaccinated for Hepatitis A and B after consulting a doctor.",
        "Regular follow-up with a liver specialist is essential.",
    ],
    reference: ReferenceRanges {
        condition: "Cirrhosis (chronic liver disease)",
        bilirubin: "~2–15 mg/dL",
        alkaline_phosphatase: "~120–300 IU/L",
        transaminase_pattern: "AST 80–300 IU/L, ALT 40–200 IU/L (AST/ALT > 1)",
        albumin: "2.0–3.5 g/dL",
        notes: "End-stage fibrosis causing portal hypertension, ascites, varices.",
        prevention: &[
            "Avoid alcohol",
            "Vaccinate for Hepatitis A/B",
            "Balanced diet and protein intake",
            "Manage metabolic syndrome",
            "Liver cancer screening every 6 months",
        ],
        screening: "Ultrasound + AFP every 6 months",
        interpretation: "Harmful: advanced chronic liver disease",
    },
};

static NAFLD: ConditionProfile = ConditionProfile {
    key: ConditionKey::Nafld,
    display_name: "Non-Alcoholic Fatty Liver Disease (NAFLD) Pattern",
    rationale: "Pattern is compatible with fatty infiltration of the liver.",
    lifestyle_tips: &[
        "Aim for gradual weight loss through diet and exercise.",
        "Limit sugary drinks and refined carbohydrates.",
        "Exercise 30–45 minutes at least 5 days a week.",
        "Manage diabetes, cholesterol, and blood pressure if present.",
    ],
    reference: ReferenceRanges {
        condition: "NAFLD (nonalcoholic fatty liver)",
        bilirubin: "~0.8–2.0 mg/dL",
        alkaline_phosphatase: "~100–200 IU/L",
        transaminase_pattern: "AST 30–70 IU/L, ALT 40–100 IU/L (ALT > AST; ratio 0.7–1.5)",
        albumin: "3.5–5.0 g/dL",
        notes: "Steatosis due to obesity/insulin resistance; ALT predominance.",
        prevention: &[
            "Lose 7–10% body weight",
            "Exercise 150 min/week",
            "Mediterranean diet",
            "Control sugar, cholesterol, blood pressure",
            "Avoid sugary drinks & refined carbs",
        ],
        screening: "Liver Ultrasound, Fibroscan annually",
        interpretation: "Mildly harmful: risk for progression to NASH/cirrhosis",
    },
};

static NORMAL: ConditionProfile = ConditionProfile {
    key: ConditionKey::Normal,
    display_name: "Normal Liver Function Pattern",
    rationale: "Values fall within typical clinical reference ranges.",
    lifestyle_tips: &[
        "Maintain a balanced diet and active lifestyle.",
        "Avoid excessive alcohol and unnecessary medications.",
        "Continue routine health checkups as per medical advice.",
    ],
    reference: ReferenceRanges {
        condition: "Normal reference",
        bilirubin: "0.3–1.2 mg/dL",
        alkaline_phosphatase: "44–147 IU/L",
        transaminase_pattern: "AST 10–40 IU/L, ALT 7–56 IU/L",
        albumin: "3.5–5.0 g/dL",
        notes: "Baseline liver values for healthy adults.",
        prevention: &["Baseline health, no intervention needed"],
        screening: "Routine annual health check-up",
        interpretation: "Safe / normal physiology",
    },
};
