//! Literal content of the presentation: series, the example IO table, diagram topology,
//! causative-matrix positions and captions. Nothing here is computed.

use crate::foundation::core::Point;
use crate::scene::color::{Color, GREEN, ORANGE, RED, YELLOW};

/// A named, ordered list of `(year, value)` pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub samples: &'static [(f64, f64)],
}

pub const DOWNSTREAM_CLOSENESS: Series = Series {
    name: "downstream closeness",
    samples: &[
        (1996.0, 828.0),
        (2001.0, 1247.0),
        (2006.0, 2779.0),
        (2008.0, 5242.0),
        (2013.0, 14619.0),
        (2018.0, 18776.0),
    ],
};

pub const UPSTREAM_CLOSENESS: Series = Series {
    name: "upstream closeness",
    samples: &[
        (1996.0, 244.0),
        (2001.0, 443.0),
        (2006.0, 1367.0),
        (2008.0, 1413.0),
        (2013.0, 4293.0),
        (2018.0, 3433.0),
    ],
};

pub const FAGIOLO_CLUSTERING: Series = Series {
    name: "fagiolo clustering",
    samples: &[
        (1996.0, 0.073),
        (2001.0, 0.058),
        (2006.0, 0.036),
        (2013.0, 0.017),
        (2018.0, 0.015),
    ],
};

pub const SYMMETRY: Series = Series {
    name: "symmetry",
    samples: &[
        (1996.0, 0.298),
        (2001.0, 0.276),
        (2006.0, 0.295),
        (2009.0, 0.164),
        (2013.0, 0.217),
        (2018.0, 0.204),
    ],
};

/// Every plotted series in plot order.
pub const ALL_SERIES: [Series; 4] = [
    DOWNSTREAM_CLOSENESS,
    UPSTREAM_CLOSENESS,
    FAGIOLO_CLUSTERING,
    SYMMETRY,
];

/// Example input-output table, header row and column included.
pub const IO_TABLE: [[&str; 5]; 5] = [
    ["", "Agri.", "Manuf.", "Finance", "Services"],
    ["Agri.", "10", "50", "5", "15"],
    ["Manuf.", "20", "40", "30", "40"],
    ["Finance", "5", "25", "10", "50"],
    ["Services", "15", "30", "40", "20"],
];

pub const IO_NODES: [(&str, Point); 4] = [
    ("Agri", Point::new(-4.0, 2.0)),
    ("Manuf", Point::new(-2.0, -2.0)),
    ("Finance", Point::new(2.0, -2.0)),
    ("Services", Point::new(4.0, 2.0)),
];

pub const IO_EDGES: [(&str, &str); 5] = [
    ("Agri", "Manuf"),
    ("Manuf", "Finance"),
    ("Finance", "Services"),
    ("Services", "Agri"),
    ("Manuf", "Services"),
];

pub const BRIDGE_NODES: [(&str, Point); 3] = [
    ("A", Point::new(-4.0, 0.0)),
    ("B", Point::new(4.0, 0.0)),
    ("Finance", Point::new(0.0, 0.0)),
];

pub const BRIDGE_EDGES: [(&str, &str); 2] = [("A", "Finance"), ("Finance", "B")];

/// One period of the causative-matrix walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CausativePeriod {
    pub caption: &'static str,
    /// Axes coordinates `(off-diagonal, diagonal)`.
    pub position: (f64, f64),
    pub quadrant: &'static str,
}

pub const CAUSATIVE_PERIODS: [CausativePeriod; 3] = [
    CausativePeriod {
        caption: "Period: 1996-2006 (Pre-GFC)",
        position: (0.4, -0.3),
        quadrant: "Type II",
    },
    CausativePeriod {
        caption: "Period: 2008-2013 (Post-GFC)",
        position: (-0.4, 0.6),
        quadrant: "Type IV",
    },
    CausativePeriod {
        caption: "Period: 2013-2018",
        position: (0.6, 0.7),
        quadrant: "Type I",
    },
];

pub const PAPER_TITLE: [&str; 2] = [
    r"\textbf{Linkages and Structural Changes in the}",
    r"\textbf{Chinese Financial Sector (1996-2018)}",
];
pub const PAPER_SUBTITLE: &str = "A Network and Input-Output Approach";
pub const PAPER_AUTHORS: &str = "Khan, Li, and Mahsud (2024)";

pub const RESEARCH_QUESTIONS: [&str; 3] = [
    "1. How have the financial sector's links to the economy evolved?",
    "2. What is its role in the economic network?",
    "3. How has its structure and risk profile changed over time?",
];

pub const IO_TABLE_CAPTION: &str = "The economy is modeled using an Input-Output (IO) Table.";
pub const IO_TABLE_DESC: &str =
    r"Each cell $z_{ij}$ shows the output from sector $i$ (row) \\ used as input by sector $j$ (column).";
pub const NETWORK_CAPTION: &str = "This table can be visualized as a network.";
pub const NETWORK_DESC: &str = r"Sectors are nodes. Transactions are weighted, directed edges.";

pub const FINANCE_LABEL: &str = "Financial\nSector";
pub const UPSTREAM_LABEL: &str = "Upstream\n(e.g., IT)";
pub const DOWNSTREAM_LABEL: &str = "Downstream\n(e.g., Real Estate)";
pub const PULL_TITLE: &str = "Pull Effects (Demand)";
pub const PULL_DESC: &str = "Financial sector 'pulls' inputs from upstream sectors.";
pub const PUSH_TITLE: &str = "Push Effects (Supply)";
pub const PUSH_DESC: &str = "Financial sector 'pushes' services to downstream sectors.";

pub const CLOSENESS_CAPTION: &str = "Closeness Centrality: How influential is the sector?";
pub const DOWNSTREAM_SERIES_LABEL: &str = "Downstream (Supply)";
pub const UPSTREAM_SERIES_LABEL: &str = "Upstream (Demand)";
pub const CLOSENESS_FINDING: &str = r"Finding: Downstream $>$ Upstream. \\ The financial sector has strong \textbf{supply-side effects}.";
pub const BETWEENNESS_CAPTION: &str =
    "Betweenness Centrality: How important is it as an intermediary?";
pub const BRIDGE_CAPTION: &str = "It acts as a bridge for transactions between other sectors.";
pub const BETWEENNESS_FINDING: &str = r"Finding: Betweenness fluctuated, rising overall. \\ It is a crucial \textbf{network intermediary}, especially post-GFC.";

pub const CAUSATIVE_X_LABEL: &str = "Sum of Off-Diagonal Elements (Feedback from others)";
pub const CAUSATIVE_Y_LABEL: &str = r"Diagonal Element, \, C_{ii} \text{ (Internal/External effect)}";
/// Quadrant captions with the axes coordinates of their centers.
pub const QUADRANTS: [(&str, (f64, f64)); 4] = [
    ("Type I\nInternalized\n(More Feedback)", (0.5, 0.5)),
    ("Type II\nExternalized\n(More Feedback)", (0.5, -0.5)),
    ("Type III\nExternalized\n(Less Feedback)", (-0.5, -0.5)),
    ("Type IV\nInternalized\n(Less Feedback)", (-0.5, 0.5)),
];
pub const MARKER_LABEL: &str = "S36 (Finance)";
pub const CAUSATIVE_FINDING: &str = r"Finding: The financial sector shifted from \textbf{externalized} to \textbf{internalized} after the crisis.";

pub const CLUSTERING_CAPTION: &str = "Fagiolo Clustering: How tightly is the sector connected?";
pub const CLUSTERING_FINDING: &str = r"Finding: Clustering is \textbf{decreasing}. \\ The sector is becoming less tightly linked, \\ potentially reducing direct contagion risk.";
pub const SYMMETRY_CAPTION: &str = "Symmetry: How mutual are the relationships?";
pub const SYMMETRY_FINDING: &str = r"Finding: Symmetry \textbf{fluctuates}. \\ The balance of resource exchange changes, \\ implying a dynamic risk profile.";

/// Numbered conclusions with the keyword each one highlights and its color.
pub const CONCLUSIONS: [(&str, &str, Color); 4] = [
    (
        "1. The financial sector is a key driver of growth via supply-side effects.",
        "supply-side",
        GREEN,
    ),
    (
        "2. It is a crucial intermediary, but its role shifted after the GFC.",
        "intermediary",
        YELLOW,
    ),
    (
        "3. The sector became more internalized, focusing on its own growth.",
        "internalized",
        ORANGE,
    ),
    (
        "4. Its risk profile is complex: less clustered but with fluctuating interdependence.",
        "risk",
        RED,
    ),
];
pub const POLICY: &str =
    r"Policy Implication: Balance promoting growth with managing systemic risks.";

pub const END_TEXT: &str = "Animation created with Manim";
pub const END_CREDIT: &str = "Based on the 2024 paper by Khan, Li, and Mahsud";
