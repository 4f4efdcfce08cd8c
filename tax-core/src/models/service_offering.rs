use serde::Serialize;

/// An entry in the advisory firm's service catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOffering {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

static CATALOG: [ServiceOffering; 4] = [
    ServiceOffering {
        id: "itr",
        title: "ITR Filing",
        description: "Expert income tax return filing for individuals and businesses",
        price: "Starting ₹999",
        features: &["All ITR forms", "Tax optimization", "Quick processing", "Expert review"],
    },
    ServiceOffering {
        id: "gst",
        title: "GST Returns",
        description: "Complete GST compliance - GSTR-1, 3B, Annual returns",
        price: "Starting ₹1,499/month",
        features: &[
            "GSTR-1 & GSTR-3B",
            "Input credit reconciliation",
            "E-invoicing setup",
            "Compliance calendar",
        ],
    },
    ServiceOffering {
        id: "tax-planning",
        title: "Tax Planning",
        description: "Strategic tax planning to maximize your savings legally",
        price: "Starting ₹2,999",
        features: &[
            "Investment advice",
            "Deduction optimization",
            "Future planning",
            "Tax projections",
        ],
    },
    ServiceOffering {
        id: "business",
        title: "Business Services",
        description: "Complete accounting and compliance for businesses",
        price: "Custom pricing",
        features: &[
            "Company registration",
            "TDS returns",
            "Audit support",
            "Advisory services",
        ],
    },
];

impl ServiceOffering {
    pub fn catalog() -> &'static [ServiceOffering] {
        &CATALOG
    }
}
