//! Built-in catalogue of featured structures and comparison presets.

/// A well-known structure suggested on start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedProtein {
    /// Structure identifier.
    pub id: &'static str,
    /// Common name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Functional category.
    pub category: &'static str,
}

/// One side of a [`ComparisonPreset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetEntry {
    /// Structure identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// A curated pair worth comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPreset {
    /// Short title.
    pub label: &'static str,
    /// What the comparison shows.
    pub description: &'static str,
    /// First structure.
    pub a: PresetEntry,
    /// Second structure.
    pub b: PresetEntry,
}

/// Featured structures, in display order.
pub const FEATURED_PROTEINS: [FeaturedProtein; 8] = [
    FeaturedProtein {
        id: "4INS",
        name: "Insulin",
        description: "Hormone regulating blood sugar",
        category: "Hormone",
    },
    FeaturedProtein {
        id: "1A3N",
        name: "Hemoglobin",
        description: "Oxygen transport protein in blood",
        category: "Transport",
    },
    FeaturedProtein {
        id: "5F9R",
        name: "CRISPR-Cas9",
        description: "Gene editing molecular scissors",
        category: "Enzyme",
    },
    FeaturedProtein {
        id: "6VXX",
        name: "COVID Spike Protein",
        description: "SARS-CoV-2 viral entry protein",
        category: "Viral",
    },
    FeaturedProtein {
        id: "1EMA",
        name: "Green Fluorescent Protein",
        description: "Bioluminescent marker protein",
        category: "Fluorescent",
    },
    FeaturedProtein {
        id: "1BNA",
        name: "DNA Double Helix",
        description: "The molecule of heredity",
        category: "Nucleic Acid",
    },
    FeaturedProtein {
        id: "5ARA",
        name: "ATP Synthase",
        description: "Cellular energy production machinery",
        category: "Enzyme",
    },
    FeaturedProtein {
        id: "1TUP",
        name: "p53 Tumor Suppressor",
        description: "Guardian of the genome",
        category: "Regulatory",
    },
];

/// Comparison presets, in display order.
pub const COMPARISON_PRESETS: [ComparisonPreset; 3] = [
    ComparisonPreset {
        label: "Normal vs Sickle Cell Hemoglobin",
        description:
            "See how a single amino acid change alters hemoglobin structure",
        a: PresetEntry {
            id: "1A3N",
            name: "Normal Hemoglobin",
        },
        b: PresetEntry {
            id: "2HBS",
            name: "Sickle Cell Hemoglobin",
        },
    },
    ComparisonPreset {
        label: "Wild-type vs Mutant p53",
        description:
            "Compare the tumor suppressor in its normal and mutant forms",
        a: PresetEntry {
            id: "1TUP",
            name: "Wild-type p53",
        },
        b: PresetEntry {
            id: "2PCX",
            name: "Mutant p53",
        },
    },
    ComparisonPreset {
        label: "Human vs Bacterial Insulin",
        description: "Explore evolutionary conservation of the insulin hormone",
        a: PresetEntry {
            id: "4INS",
            name: "Human Insulin",
        },
        b: PresetEntry {
            id: "1ZNJ",
            name: "Bacterial Insulin",
        },
    },
];

/// Featured entry for `id`, case-insensitive.
#[must_use]
pub fn featured(id: &str) -> Option<&'static FeaturedProtein> {
    let id = id.trim();
    FEATURED_PROTEINS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
}
