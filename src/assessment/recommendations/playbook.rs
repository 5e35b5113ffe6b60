//! Static advice tables consumed by the recommendation generator.
//!
//! Entries are keyed by criterion id (or category id for category-wide
//! advice) and supply the copy, action items, and curated impact estimate
//! for an unmet criterion. Criteria without an entry fall back to generic
//! advice derived from the question text.

use super::Priority;

pub(crate) struct PlaybookEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub actions: &'static [&'static str],
    pub resources: &'static [&'static str],
    pub impact: Option<u8>,
}

pub(crate) struct IndustryAdvice {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub actions: &'static [&'static str],
    pub priority: Priority,
    pub impact: u8,
}

pub(crate) fn criterion_entry(id: &str) -> Option<&'static PlaybookEntry> {
    CRITERION_PLAYBOOK.iter().find(|entry| entry.id == id)
}

pub(crate) fn category_entry(id: &str) -> Option<&'static PlaybookEntry> {
    CATEGORY_PLAYBOOK.iter().find(|entry| entry.id == id)
}

pub(crate) fn industry_advice(industry: &str) -> &'static [IndustryAdvice] {
    let normalized = industry.trim().to_ascii_lowercase();
    INDUSTRY_PLAYBOOK
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, advice)| *advice)
        .unwrap_or(&[])
}

static CRITERION_PLAYBOOK: &[PlaybookEntry] = &[
    PlaybookEntry {
        id: "entity_registered",
        title: "Register a formal legal entity",
        description: "Lenders fund LLCs and corporations, not sole proprietors. Registering a formal entity separates business and personal liability and is the first credential underwriters check.",
        actions: &[
            "File articles of organization or incorporation with your Secretary of State.",
            "Obtain a certificate of good standing once the filing is accepted.",
            "Update vendor and bank records to the registered legal name.",
        ],
        resources: &["https://www.sba.gov/business-guide/launch-your-business/choose-business-structure"],
        impact: Some(6),
    },
    PlaybookEntry {
        id: "ein_obtained",
        title: "Obtain a federal EIN",
        description: "An EIN is required to open business bank accounts, file returns, and establish credit files under the business rather than your SSN.",
        actions: &[
            "Apply for an EIN on the IRS website; issuance is immediate and free.",
            "Use the EIN on every credit and bank application going forward.",
        ],
        resources: &["https://www.irs.gov/businesses/small-businesses-self-employed/apply-for-an-employer-identification-number-ein-online"],
        impact: Some(5),
    },
    PlaybookEntry {
        id: "business_address",
        title: "Establish a verifiable business address",
        description: "Underwriters verify addresses against USPS and directory data. Residential or PO-box addresses trigger manual review or automatic declines.",
        actions: &[
            "Lease a commercial address or virtual office with a deliverable street address.",
            "Update the address with the state registry, IRS, and all bureaus.",
        ],
        resources: &[],
        impact: Some(4),
    },
    PlaybookEntry {
        id: "business_phone",
        title: "List a dedicated business phone line",
        description: "A dedicated line listed with 411 is one of the oldest fundability signals; verification services check it before approving tradelines.",
        actions: &[
            "Provision a VoIP or landline number in the business name.",
            "List the number with 411 directory assistance.",
        ],
        resources: &[],
        impact: Some(3),
    },
    PlaybookEntry {
        id: "dba_registered",
        title: "Register your trade name",
        description: "If you operate under a name other than the legal entity name, an unregistered DBA creates mismatches during verification.",
        actions: &["File the DBA with your county or state registry."],
        resources: &[],
        impact: Some(1),
    },
    PlaybookEntry {
        id: "months_in_business",
        title: "Build time in business",
        description: "Most lenders gate products at 6, 12, and 24 months in business. Keep the original incorporation date consistent across records so your age is provable.",
        actions: &[
            "Keep registration and licenses continuously active to avoid age resets.",
            "Target lenders whose minimum time in business matches your current age.",
        ],
        resources: &[],
        impact: Some(5),
    },
    PlaybookEntry {
        id: "business_bank_account",
        title: "Open a dedicated business bank account",
        description: "Lenders read bank statements before anything else. Commingled personal accounts make revenue unverifiable and disqualify most applications outright.",
        actions: &[
            "Open a business checking account under the legal entity name and EIN.",
            "Route all business income and expenses through it exclusively.",
        ],
        resources: &[],
        impact: Some(7),
    },
    PlaybookEntry {
        id: "monthly_revenue",
        title: "Grow and document monthly revenue",
        description: "Deposit volume is the primary driver of offer size. Consistent, documented deposits move you into higher revenue bands.",
        actions: &[
            "Invoice through channels that settle into the business account.",
            "Avoid large cash transactions that never reach a statement.",
        ],
        resources: &[],
        impact: Some(8),
    },
    PlaybookEntry {
        id: "account_balance",
        title: "Maintain a stronger average balance",
        description: "Average daily balance signals repayment capacity; repeated near-zero or negative days are scored heavily against you.",
        actions: &[
            "Hold a reserve covering at least one month of operating expenses.",
            "Eliminate overdrafts and NSF incidents for 90 days before applying.",
        ],
        resources: &[],
        impact: Some(4),
    },
    PlaybookEntry {
        id: "tax_returns_filed",
        title: "Bring tax filings current",
        description: "Unfiled returns block SBA and bank term loans entirely; most other lenders ask for the two most recent returns.",
        actions: &["File any outstanding business returns, amending where needed."],
        resources: &[],
        impact: Some(4),
    },
    PlaybookEntry {
        id: "bookkeeping_system",
        title: "Adopt a bookkeeping system",
        description: "Clean books shorten underwriting and unlock lenders that require financial statements.",
        actions: &["Set up accounting software or engage a bookkeeper monthly."],
        resources: &[],
        impact: Some(2),
    },
    PlaybookEntry {
        id: "duns_number",
        title: "Register for a D-U-N-S number",
        description: "Without a D-U-N-S number the business has no Dun & Bradstreet file, so vendor tradelines have nowhere to report.",
        actions: &[
            "Request a free D-U-N-S number from Dun & Bradstreet.",
            "Confirm the file's name and address match your registration exactly.",
        ],
        resources: &["https://www.dnb.com/duns-number/get-a-duns.html"],
        impact: Some(5),
    },
    PlaybookEntry {
        id: "tradelines_reporting",
        title: "Add reporting vendor tradelines",
        description: "Business credit scores need payment history. Net-30 vendor accounts that report to the bureaus are the fastest way to build a file.",
        actions: &[
            "Open accounts with net-30 vendors known to report.",
            "Pay early; Paydex rewards payments ahead of terms.",
            "Verify the tradelines appear on your file after two cycles.",
        ],
        resources: &[],
        impact: Some(6),
    },
    PlaybookEntry {
        id: "personal_credit_score",
        title: "Raise the owner's personal credit score",
        description: "Most business lenders still pull the owner's FICO. Each ~70-point band unlocks a wider lender pool and better pricing.",
        actions: &[
            "Bring utilization on revolving accounts under 30%.",
            "Dispute inaccurate derogatory items with the bureaus.",
        ],
        resources: &[],
        impact: Some(5),
    },
    PlaybookEntry {
        id: "derogatory_free",
        title: "Resolve open collections, liens, and judgments",
        description: "Open public records are automatic declines for most underwriters regardless of revenue.",
        actions: &[
            "Pull business bureau reports and list all open items.",
            "Negotiate pay-for-delete or satisfaction letters and record them.",
        ],
        resources: &[],
        impact: Some(4),
    },
    PlaybookEntry {
        id: "website_live",
        title: "Launch a website on your own domain",
        description: "Verification services check for an active site on a business-owned domain; its absence reads as an unestablished business.",
        actions: &[
            "Register a domain matching the business name.",
            "Publish at least a services page with the business NAP data.",
        ],
        resources: &[],
        impact: Some(3),
    },
    PlaybookEntry {
        id: "business_email",
        title: "Use domain-based email",
        description: "Free webmail addresses on applications correlate with fraud flags; domain email is a cheap credibility signal.",
        actions: &["Create addresses on the business domain and use them on every application."],
        resources: &[],
        impact: Some(2),
    },
    PlaybookEntry {
        id: "listings_consistent",
        title: "Align your business listings",
        description: "Name, address, and phone must match across Google, directories, the state registry, and the bureaus; mismatches fail automated verification.",
        actions: &[
            "Claim the Google Business Profile and correct the NAP data.",
            "Sweep major directories and fix inconsistencies.",
        ],
        resources: &[],
        impact: Some(3),
    },
    PlaybookEntry {
        id: "social_activity",
        title: "Keep social profiles active",
        description: "Active profiles corroborate that the business is operating; dormant ones do nothing for you.",
        actions: &["Post monthly on the channels your customers actually use."],
        resources: &[],
        impact: Some(1),
    },
    PlaybookEntry {
        id: "online_reviews",
        title: "Collect customer reviews",
        description: "Reviews feed the same verification checks as listings and influence revenue-based underwriting at some fintechs.",
        actions: &["Ask satisfied customers for Google reviews after each engagement."],
        resources: &[],
        impact: Some(1),
    },
    PlaybookEntry {
        id: "licenses_current",
        title: "Renew required licenses",
        description: "Lapsed licenses surface in underwriting background checks and can void funding agreements after the fact.",
        actions: &["Audit federal, state, and municipal license requirements and renew any that lapsed."],
        resources: &[],
        impact: Some(4),
    },
    PlaybookEntry {
        id: "industry_risk",
        title: "Mitigate industry risk classification",
        description: "High-risk NAICS codes shrink the lender pool. If your operations genuinely span codes, make sure the registered code reflects the lower-risk core business.",
        actions: &[
            "Verify the NAICS/SIC code on your registration matches actual operations.",
            "Target lenders that explicitly serve your industry.",
        ],
        resources: &[],
        impact: Some(3),
    },
    PlaybookEntry {
        id: "location_type",
        title: "Strengthen your location profile",
        description: "Commercial premises score higher than home-based operations with most underwriters.",
        actions: &["Consider a commercial or coworking lease with a deliverable street address."],
        resources: &[],
        impact: Some(2),
    },
    PlaybookEntry {
        id: "employee_count",
        title: "Document your team",
        description: "Payroll records substantiate operating scale for larger facilities.",
        actions: &["Run payroll through a provider so headcount is provable."],
        resources: &[],
        impact: Some(1),
    },
];

static CATEGORY_PLAYBOOK: &[PlaybookEntry] = &[
    PlaybookEntry {
        id: "foundation",
        title: "Shore up your business foundation",
        description: "Foundation items are pass/fail credibility checks; gaps here cause declines before revenue is ever considered.",
        actions: &["Work through registration, EIN, address, and phone items before applying anywhere."],
        resources: &[],
        impact: None,
    },
    PlaybookEntry {
        id: "financials",
        title: "Strengthen financial health signals",
        description: "Bank data drives offer size. Improving deposits, balances, and filings moves every lender's pricing in your favor.",
        actions: &["Prioritize the banking and revenue items; they compound with each statement cycle."],
        resources: &[],
        impact: None,
    },
    PlaybookEntry {
        id: "credit",
        title: "Build the business credit file",
        description: "A thin or absent bureau file forces lenders back onto personal guarantees and personal FICO.",
        actions: &["Establish the D&B file first, then layer reporting tradelines."],
        resources: &[],
        impact: None,
    },
    PlaybookEntry {
        id: "digital",
        title: "Complete your digital footprint",
        description: "Automated verification cross-checks your web presence; gaps read as an unestablished business.",
        actions: &["Bring the website, email, and listings into alignment with the legal entity."],
        resources: &[],
        impact: None,
    },
    PlaybookEntry {
        id: "operations",
        title: "Tighten industry and operations credentials",
        description: "Licensing and location issues surface late in underwriting, after you have already paid for appraisals and pulls.",
        actions: &["Resolve licensing and location items before starting applications."],
        resources: &[],
        impact: None,
    },
];

static INDUSTRY_PLAYBOOK: &[(&str, &[IndustryAdvice])] = &[
    (
        "trucking",
        &[IndustryAdvice {
            id: "trucking_compliance",
            title: "Keep DOT and MC authority active",
            description: "Equipment financiers verify FMCSA authority and insurance before funding; lapses pause otherwise-approved deals.",
            actions: &[
                "Confirm DOT/MC numbers are active and insurance certificates current.",
                "Keep CSA scores below intervention thresholds.",
            ],
            priority: Priority::Medium,
            impact: 3,
        }],
    ),
    (
        "restaurant",
        &[IndustryAdvice {
            id: "restaurant_statements",
            title: "Separate merchant processing statements",
            description: "Restaurant lenders underwrite card volume; clean processing statements under the legal entity unlock revenue-based products.",
            actions: &[
                "Put the merchant account under the legal entity and EIN.",
                "Retain 12 months of processing statements.",
            ],
            priority: Priority::Medium,
            impact: 3,
        }],
    ),
    (
        "construction",
        &[IndustryAdvice {
            id: "construction_bonding",
            title: "Establish bonding capacity",
            description: "Surety bonding history substitutes for collateral with many construction lenders and unlocks larger contract financing.",
            actions: &[
                "Engage a surety agent and complete a bonding prequalification.",
                "Keep work-in-progress schedules current for underwriters.",
            ],
            priority: Priority::Medium,
            impact: 3,
        }],
    ),
];
