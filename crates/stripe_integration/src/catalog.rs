/// Provider tools reachable through the generic call handler. The catalog is
/// fixed at construction to three capability groups: refund create/read,
/// customer read, payment-intent read/update. No other provider capability
/// is callable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTool {
    RefundsCreate,
    RefundsRetrieve,
    CustomersRetrieve,
    PaymentIntentsRetrieve,
    PaymentIntentsUpdate,
}

pub struct CatalogEntry {
    pub tool: CatalogTool,
    /// Registered names, canonical first. Calling agents mix snake_case and
    /// camelCase forms, so each tool registers both.
    pub names: &'static [&'static str],
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        tool: CatalogTool::RefundsCreate,
        names: &["refunds_create", "create_refund"],
    },
    CatalogEntry {
        tool: CatalogTool::RefundsRetrieve,
        names: &["refunds_retrieve", "retrieve_refund"],
    },
    CatalogEntry {
        tool: CatalogTool::CustomersRetrieve,
        names: &["customers_retrieve", "retrieve_customer"],
    },
    CatalogEntry {
        tool: CatalogTool::PaymentIntentsRetrieve,
        names: &[
            "paymentIntents_retrieve",
            "payment_intents_retrieve",
            "retrieve_payment_intent",
        ],
    },
    CatalogEntry {
        tool: CatalogTool::PaymentIntentsUpdate,
        names: &[
            "paymentIntents_update",
            "payment_intents_update",
            "update_payment_intent",
        ],
    },
];

impl CatalogTool {
    pub fn lookup(name: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|entry| entry.names.contains(&name))
            .map(|entry| entry.tool)
    }

    pub fn canonical_name(self) -> &'static str {
        CATALOG
            .iter()
            .find(|entry| entry.tool == self)
            .map(|entry| entry.names[0])
            .unwrap_or("unknown")
    }
}
